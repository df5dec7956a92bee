//! In-memory [`MarketApi`] for command and provider tests.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use parking_lot::Mutex;
use shared::TradeSide;
use std::collections::HashMap;

use crate::core::error::{ApiError, AppError, Result};
use crate::core::service::MarketApi;
use crate::services::api::{
    Achievement, LeaderboardEntry, LeaderboardPeriod, MarketEvent, MarketStatus, NavItem,
    PerformancePoint, Portfolio, PricePoint, Settings, Stock, StockDetail, StockFilter, TimeRange,
    TradeResult, Transaction, WatchlistItem,
};

pub(crate) fn sample_stock(symbol: &str, price: f64) -> Stock {
    Stock {
        symbol: symbol.to_string(),
        name: format!("{} Inc.", symbol),
        sector: Some("Technology".to_string()),
        price,
        change: 1.5,
        change_percent: 0.8,
        volume: 1_200_000,
        market_cap: Some(2.5e12),
        updated_at: None,
    }
}

pub(crate) fn empty_portfolio(cash: f64) -> Portfolio {
    Portfolio {
        user_id: "mock-user".to_string(),
        cash_balance: cash,
        total_value: cash,
        invested_value: 0.0,
        total_gain_loss: 0.0,
        positions: Vec::new(),
        updated_at: None,
    }
}

enum Failure {
    Api(ApiError),
    LoginRequired(String),
}

#[derive(Default)]
struct MockState {
    stocks: Vec<Stock>,
    history: Vec<PricePoint>,
    portfolio: Option<Portfolio>,
    transactions: Vec<Transaction>,
    performance: Vec<PerformancePoint>,
    watchlist: Vec<WatchlistItem>,
    achievements: Vec<Achievement>,
    events: Vec<MarketEvent>,
    settings: Option<Settings>,
    leaderboard: Vec<LeaderboardEntry>,
    navigation: Vec<NavItem>,
    trades: Vec<(TradeSide, String, u64)>,
    resets: usize,
}

#[derive(Default)]
pub(crate) struct MockApi {
    state: Mutex<MockState>,
    failures: Mutex<HashMap<&'static str, Failure>>,
    calls: Mutex<Vec<&'static str>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_stocks(&self, stocks: Vec<Stock>) {
        self.state.lock().stocks = stocks;
    }

    pub fn set_history(&self, history: Vec<PricePoint>) {
        self.state.lock().history = history;
    }

    pub fn set_portfolio(&self, portfolio: Portfolio) {
        self.state.lock().portfolio = Some(portfolio);
    }

    pub fn set_transactions(&self, transactions: Vec<Transaction>) {
        self.state.lock().transactions = transactions;
    }

    pub fn set_performance(&self, points: Vec<PerformancePoint>) {
        self.state.lock().performance = points;
    }

    pub fn set_watchlist(&self, items: Vec<WatchlistItem>) {
        self.state.lock().watchlist = items;
    }

    pub fn set_achievements(&self, achievements: Vec<Achievement>) {
        self.state.lock().achievements = achievements;
    }

    pub fn set_events(&self, events: Vec<MarketEvent>) {
        self.state.lock().events = events;
    }

    pub fn set_leaderboard(&self, entries: Vec<LeaderboardEntry>) {
        self.state.lock().leaderboard = entries;
    }

    pub fn set_navigation(&self, items: Vec<NavItem>) {
        self.state.lock().navigation = items;
    }

    /// Make `operation` fail with `err` until cleared.
    pub fn fail_with(&self, operation: &'static str, err: ApiError) {
        self.failures.lock().insert(operation, Failure::Api(err));
    }

    pub fn require_login(&self, operation: &'static str, login_url: &str) {
        self.failures
            .lock()
            .insert(operation, Failure::LoginRequired(login_url.to_string()));
    }

    pub fn call_count(&self, operation: &str) -> usize {
        self.calls.lock().iter().filter(|c| **c == operation).count()
    }

    pub fn trades(&self) -> Vec<(TradeSide, String, u64)> {
        self.state.lock().trades.clone()
    }

    pub fn resets(&self) -> usize {
        self.state.lock().resets
    }

    fn enter(&self, operation: &'static str) -> Result<()> {
        self.calls.lock().push(operation);
        match self.failures.lock().get(operation) {
            Some(Failure::Api(err)) => Err(AppError::Api(err.clone())),
            Some(Failure::LoginRequired(url)) => Err(AppError::LoginRequired {
                login_url: url.clone(),
            }),
            None => Ok(()),
        }
    }

    fn find_stock(&self, symbol: &str) -> Result<Stock> {
        let symbol = shared::normalize_symbol(symbol);
        self.state
            .lock()
            .stocks
            .iter()
            .find(|s| s.symbol == symbol)
            .cloned()
            .ok_or_else(|| AppError::Api(ApiError::new("NOT_FOUND", format!("Stock {} not found", symbol))))
    }
}

#[async_trait]
impl MarketApi for MockApi {
    async fn list_stocks(&self, filter: &StockFilter) -> Result<Vec<Stock>> {
        self.enter("list_stocks")?;
        let mut stocks = self.state.lock().stocks.clone();
        if let Some(sector) = &filter.sector {
            stocks.retain(|s| s.sector.as_deref().is_some_and(|x| x.eq_ignore_ascii_case(sector)));
        }
        if let Some(sort) = filter.sort {
            sort.apply(&mut stocks);
        }
        Ok(stocks)
    }

    async fn refresh_stocks(&self, _filter: &StockFilter) -> Result<Vec<Stock>> {
        self.enter("refresh_stocks")?;
        Ok(self.state.lock().stocks.clone())
    }

    async fn get_stock(&self, symbol: &str) -> Result<StockDetail> {
        self.enter("get_stock")?;
        let quote = self.find_stock(symbol)?;
        Ok(StockDetail {
            description: Some(format!("{} makes things", quote.name)),
            open: Some(quote.price - 1.0),
            high: Some(quote.price + 2.0),
            low: Some(quote.price - 2.0),
            previous_close: Some(quote.price - quote.change),
            pe_ratio: Some(28.4),
            week52_high: None,
            week52_low: None,
            quote,
        })
    }

    async fn get_price_history(&self, symbol: &str, _range: TimeRange) -> Result<Vec<PricePoint>> {
        self.enter("get_price_history")?;
        self.find_stock(symbol)?;
        Ok(self.state.lock().history.clone())
    }

    async fn search_stocks(&self, query: &str) -> Result<Vec<Stock>> {
        self.enter("search_stocks")?;
        let query = query.trim().to_ascii_lowercase();
        Ok(self
            .state
            .lock()
            .stocks
            .iter()
            .filter(|s| s.symbol.to_ascii_lowercase().contains(&query) || s.name.to_ascii_lowercase().contains(&query))
            .cloned()
            .collect())
    }

    async fn get_market_status(&self) -> Result<MarketStatus> {
        self.enter("get_market_status")?;
        Ok(MarketStatus {
            is_open: true,
            next_open: None,
            next_close: Utc.with_ymd_and_hms(2024, 1, 2, 21, 0, 0).single(),
            server_time: None,
        })
    }

    async fn get_portfolio(&self, _user_id: &str) -> Result<Portfolio> {
        self.enter("get_portfolio")?;
        Ok(self
            .state
            .lock()
            .portfolio
            .clone()
            .unwrap_or_else(|| empty_portfolio(100_000.0)))
    }

    async fn get_transactions(&self, _user_id: &str, limit: usize) -> Result<Vec<Transaction>> {
        self.enter("get_transactions")?;
        Ok(self.state.lock().transactions.iter().take(limit).cloned().collect())
    }

    async fn get_performance(&self, _user_id: &str, _range: TimeRange) -> Result<Vec<PerformancePoint>> {
        self.enter("get_performance")?;
        Ok(self.state.lock().performance.clone())
    }

    async fn execute_trade(
        &self,
        _user_id: &str,
        side: TradeSide,
        symbol: &str,
        shares: u64,
    ) -> Result<TradeResult> {
        self.enter("execute_trade")?;
        let stock = self.find_stock(symbol)?;
        let total = stock.price * shares as f64;
        let mut state = self.state.lock();
        state.trades.push((side, stock.symbol.clone(), shares));
        let cash = state.portfolio.as_ref().map(|p| match side {
            TradeSide::Buy => p.cash_balance - total,
            TradeSide::Sell => p.cash_balance + total,
        });
        Ok(TradeResult {
            transaction: Transaction {
                id: format!("tx-{}", state.trades.len()),
                symbol: stock.symbol,
                side,
                shares,
                price: stock.price,
                total,
                executed_at: Utc::now(),
            },
            cash_balance: cash,
            message: None,
        })
    }

    async fn get_watchlist(&self, _user_id: &str) -> Result<Vec<WatchlistItem>> {
        self.enter("get_watchlist")?;
        Ok(self.state.lock().watchlist.clone())
    }

    async fn add_to_watchlist(&self, _user_id: &str, symbol: &str) -> Result<()> {
        self.enter("add_to_watchlist")?;
        let symbol = shared::normalize_symbol(symbol);
        let mut state = self.state.lock();
        if !state.watchlist.iter().any(|w| w.symbol == symbol) {
            state.watchlist.push(WatchlistItem {
                symbol,
                name: None,
                price: None,
                change_percent: None,
                added_at: None,
            });
        }
        Ok(())
    }

    async fn remove_from_watchlist(&self, _user_id: &str, symbol: &str) -> Result<()> {
        self.enter("remove_from_watchlist")?;
        let symbol = shared::normalize_symbol(symbol);
        self.state.lock().watchlist.retain(|w| w.symbol != symbol);
        Ok(())
    }

    async fn get_achievements(&self, _user_id: &str) -> Result<Vec<Achievement>> {
        self.enter("get_achievements")?;
        Ok(self.state.lock().achievements.clone())
    }

    async fn get_market_events(&self, limit: usize) -> Result<Vec<MarketEvent>> {
        self.enter("get_market_events")?;
        Ok(self.state.lock().events.iter().take(limit).cloned().collect())
    }

    async fn get_settings(&self, _user_id: &str) -> Result<Settings> {
        self.enter("get_settings")?;
        Ok(self.state.lock().settings.clone().unwrap_or_default())
    }

    async fn update_settings(&self, _user_id: &str, settings: &Settings) -> Result<Settings> {
        self.enter("update_settings")?;
        settings.validate()?;
        self.state.lock().settings = Some(settings.clone());
        Ok(settings.clone())
    }

    async fn reset_account(&self, _user_id: &str) -> Result<()> {
        self.enter("reset_account")?;
        let mut state = self.state.lock();
        state.resets += 1;
        state.portfolio = None;
        state.transactions.clear();
        Ok(())
    }

    async fn get_leaderboard(&self, _period: LeaderboardPeriod, limit: usize) -> Result<Vec<LeaderboardEntry>> {
        self.enter("get_leaderboard")?;
        Ok(self.state.lock().leaderboard.iter().take(limit).cloned().collect())
    }

    async fn get_navigation(&self) -> Result<Vec<NavItem>> {
        self.enter("get_navigation")?;
        Ok(self.state.lock().navigation.clone())
    }
}
