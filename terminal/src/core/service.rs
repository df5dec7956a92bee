//! # Service Traits
//!
//! [`MarketApi`] is the seam between the views and the backend. The
//! production implementation is [`ApiClient`]; tests substitute an in-memory
//! mock.

use async_trait::async_trait;
use shared::TradeSide;

use crate::core::error::Result;
use crate::services::api::{
    Achievement, ApiClient, LeaderboardEntry, LeaderboardPeriod, MarketEvent, MarketStatus,
    NavItem, PerformancePoint, Portfolio, PricePoint, Settings, Stock, StockDetail, StockFilter,
    TimeRange, TradeResult, Transaction, WatchlistItem,
};

/// Every backend operation the client performs.
#[async_trait]
pub trait MarketApi: Send + Sync {
    /// Market table, possibly served from the quote cache
    async fn list_stocks(&self, filter: &StockFilter) -> Result<Vec<Stock>>;

    /// Market table, always fetched from the backend
    async fn refresh_stocks(&self, filter: &StockFilter) -> Result<Vec<Stock>>;

    async fn get_stock(&self, symbol: &str) -> Result<StockDetail>;

    async fn get_price_history(&self, symbol: &str, range: TimeRange) -> Result<Vec<PricePoint>>;

    async fn search_stocks(&self, query: &str) -> Result<Vec<Stock>>;

    async fn get_market_status(&self) -> Result<MarketStatus>;

    async fn get_portfolio(&self, user_id: &str) -> Result<Portfolio>;

    async fn get_transactions(&self, user_id: &str, limit: usize) -> Result<Vec<Transaction>>;

    async fn get_performance(&self, user_id: &str, range: TimeRange) -> Result<Vec<PerformancePoint>>;

    /// Buy or sell `shares` of `symbol`
    async fn execute_trade(
        &self,
        user_id: &str,
        side: TradeSide,
        symbol: &str,
        shares: u64,
    ) -> Result<TradeResult>;

    async fn get_watchlist(&self, user_id: &str) -> Result<Vec<WatchlistItem>>;

    async fn add_to_watchlist(&self, user_id: &str, symbol: &str) -> Result<()>;

    async fn remove_from_watchlist(&self, user_id: &str, symbol: &str) -> Result<()>;

    async fn get_achievements(&self, user_id: &str) -> Result<Vec<Achievement>>;

    async fn get_market_events(&self, limit: usize) -> Result<Vec<MarketEvent>>;

    async fn get_settings(&self, user_id: &str) -> Result<Settings>;

    async fn update_settings(&self, user_id: &str, settings: &Settings) -> Result<Settings>;

    /// Wipe the simulated portfolio back to starting cash
    async fn reset_account(&self, user_id: &str) -> Result<()>;

    async fn get_leaderboard(&self, period: LeaderboardPeriod, limit: usize) -> Result<Vec<LeaderboardEntry>>;

    async fn get_navigation(&self) -> Result<Vec<NavItem>>;
}

#[async_trait]
impl MarketApi for ApiClient {
    async fn list_stocks(&self, filter: &StockFilter) -> Result<Vec<Stock>> {
        ApiClient::list_stocks(self, filter).await
    }

    async fn refresh_stocks(&self, filter: &StockFilter) -> Result<Vec<Stock>> {
        ApiClient::refresh_stocks(self, filter).await
    }

    async fn get_stock(&self, symbol: &str) -> Result<StockDetail> {
        ApiClient::get_stock(self, symbol).await
    }

    async fn get_price_history(&self, symbol: &str, range: TimeRange) -> Result<Vec<PricePoint>> {
        ApiClient::get_price_history(self, symbol, range).await
    }

    async fn search_stocks(&self, query: &str) -> Result<Vec<Stock>> {
        ApiClient::search_stocks(self, query).await
    }

    async fn get_market_status(&self) -> Result<MarketStatus> {
        ApiClient::get_market_status(self).await
    }

    async fn get_portfolio(&self, user_id: &str) -> Result<Portfolio> {
        ApiClient::get_portfolio(self, user_id).await
    }

    async fn get_transactions(&self, user_id: &str, limit: usize) -> Result<Vec<Transaction>> {
        ApiClient::get_transactions(self, user_id, limit).await
    }

    async fn get_performance(&self, user_id: &str, range: TimeRange) -> Result<Vec<PerformancePoint>> {
        ApiClient::get_performance(self, user_id, range).await
    }

    async fn execute_trade(
        &self,
        user_id: &str,
        side: TradeSide,
        symbol: &str,
        shares: u64,
    ) -> Result<TradeResult> {
        ApiClient::execute_trade(self, user_id, side, symbol, shares).await
    }

    async fn get_watchlist(&self, user_id: &str) -> Result<Vec<WatchlistItem>> {
        ApiClient::get_watchlist(self, user_id).await
    }

    async fn add_to_watchlist(&self, user_id: &str, symbol: &str) -> Result<()> {
        ApiClient::add_to_watchlist(self, user_id, symbol).await
    }

    async fn remove_from_watchlist(&self, user_id: &str, symbol: &str) -> Result<()> {
        ApiClient::remove_from_watchlist(self, user_id, symbol).await
    }

    async fn get_achievements(&self, user_id: &str) -> Result<Vec<Achievement>> {
        ApiClient::get_achievements(self, user_id).await
    }

    async fn get_market_events(&self, limit: usize) -> Result<Vec<MarketEvent>> {
        ApiClient::get_market_events(self, limit).await
    }

    async fn get_settings(&self, user_id: &str) -> Result<Settings> {
        ApiClient::get_settings(self, user_id).await
    }

    async fn update_settings(&self, user_id: &str, settings: &Settings) -> Result<Settings> {
        ApiClient::update_settings(self, user_id, settings).await
    }

    async fn reset_account(&self, user_id: &str) -> Result<()> {
        ApiClient::reset_account(self, user_id).await
    }

    async fn get_leaderboard(&self, period: LeaderboardPeriod, limit: usize) -> Result<Vec<LeaderboardEntry>> {
        ApiClient::get_leaderboard(self, period, limit).await
    }

    async fn get_navigation(&self) -> Result<Vec<NavItem>> {
        ApiClient::get_navigation(self).await
    }
}
