//! # Navigation Menu
//!
//! The menu is fetched once per [`NavigationCache`]; any failure falls back
//! to the built-in entries.

use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::core::service::MarketApi;
use crate::services::api::NavItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuSource {
    Backend,
    Fallback,
}

const DEFAULT_MENU: [(&str, &str, &str); 8] = [
    ("dashboard", "Dashboard", "/"),
    ("market", "Market", "/market"),
    ("portfolio", "Portfolio", "/portfolio"),
    ("watchlist", "Watchlist", "/watchlist"),
    ("leaderboard", "Leaderboard", "/leaderboard"),
    ("news", "News", "/news"),
    ("achievements", "Achievements", "/achievements"),
    ("settings", "Settings", "/settings"),
];

pub fn default_menu() -> Vec<NavItem> {
    DEFAULT_MENU
        .iter()
        .zip(0..)
        .map(|(&(id, label, path), order)| NavItem {
            id: id.to_string(),
            label: label.to_string(),
            path: path.to_string(),
            icon: None,
            order,
        })
        .collect()
}

pub struct NavigationCache {
    api: Arc<dyn MarketApi>,
    menu: OnceCell<(Vec<NavItem>, MenuSource)>,
}

impl NavigationCache {
    pub fn new(api: Arc<dyn MarketApi>) -> Self {
        Self {
            api,
            menu: OnceCell::new(),
        }
    }

    /// Menu items sorted by `order`. Only the first call hits the backend.
    pub async fn items(&self) -> (&[NavItem], MenuSource) {
        let (items, source) = self
            .menu
            .get_or_init(|| async {
                match self.api.get_navigation().await {
                    Ok(mut items) if !items.is_empty() => {
                        items.sort_by_key(|item| item.order);
                        (items, MenuSource::Backend)
                    }
                    Ok(_) => {
                        tracing::warn!("Backend returned an empty menu, using defaults");
                        (default_menu(), MenuSource::Fallback)
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to load navigation, using defaults");
                        (default_menu(), MenuSource::Fallback)
                    }
                }
            })
            .await;
        (items.as_slice(), *source)
    }
}
