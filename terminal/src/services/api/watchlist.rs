//! # Watchlist Endpoints

use chrono::{DateTime, Utc};
use shared::{normalize_symbol, WatchlistAddRequest, WatchlistItemDto};

use super::client::{user_path, ApiClient};
use super::normalize::parse_optional_date;
use super::stocks::path_symbol;
use crate::core::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct WatchlistItem {
    pub symbol: String,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub change_percent: Option<f64>,
    pub added_at: Option<DateTime<Utc>>,
}

fn normalize_item(dto: WatchlistItemDto) -> WatchlistItem {
    WatchlistItem {
        symbol: normalize_symbol(&dto.symbol),
        name: dto.name,
        price: dto.price,
        change_percent: dto.change_percent,
        added_at: parse_optional_date(dto.added_at.as_deref()),
    }
}

impl ApiClient {
    /// Watchlist in the order the backend keeps it, duplicates removed.
    pub async fn get_watchlist(&self, user_id: &str) -> Result<Vec<WatchlistItem>> {
        let user = user_path(user_id)?;
        let dtos: Vec<WatchlistItemDto> = self.get_json(&format!("/api/watchlist/{}", user), &[]).await?;

        let mut items: Vec<WatchlistItem> = Vec::with_capacity(dtos.len());
        for item in dtos.into_iter().map(normalize_item) {
            if !items.iter().any(|seen| seen.symbol == item.symbol) {
                items.push(item);
            }
        }
        Ok(items)
    }

    #[tracing::instrument(skip(self))]
    pub async fn add_to_watchlist(&self, user_id: &str, symbol: &str) -> Result<()> {
        let user = user_path(user_id)?;
        let request = WatchlistAddRequest {
            symbol: path_symbol(symbol)?,
        };
        self.post_ack(&format!("/api/watchlist/{}", user), &request).await?;
        tracing::info!(symbol = %request.symbol, "Added to watchlist");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn remove_from_watchlist(&self, user_id: &str, symbol: &str) -> Result<()> {
        let user = user_path(user_id)?;
        let symbol = path_symbol(symbol)?;
        self.delete_ack(&format!("/api/watchlist/{}/{}", user, symbol)).await?;
        tracing::info!(symbol = %symbol, "Removed from watchlist");
        Ok(())
    }
}
