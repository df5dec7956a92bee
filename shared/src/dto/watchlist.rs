//! # Watchlist Data Transfer Objects
//!
//! - `GET /api/watchlist/{user}` - list of [`WatchlistItemDto`]
//! - `POST /api/watchlist/{user}` - [`WatchlistAddRequest`]
//! - `DELETE /api/watchlist/{user}/{symbol}`

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchlistItemDto {
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "currentPrice", alias = "current_price")]
    pub price: Option<f64>,
    #[serde(default, alias = "changePercent")]
    pub change_percent: Option<f64>,
    #[serde(default, alias = "addedAt")]
    pub added_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistAddRequest {
    pub symbol: String,
}
