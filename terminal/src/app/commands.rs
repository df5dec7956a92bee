//! # Command Handlers
//!
//! One method per CLI page. Every handler goes through [`MarketApi`] and the
//! [`Session`], validates user input before anything reaches the backend,
//! and returns the rendered page.

use async_channel::Sender;
use chrono::Utc;
use shared::TradeSide;
use std::sync::Arc;
use std::time::Duration;

use crate::app::events::AppEvent;
use crate::app::navigation::NavigationCache;
use crate::app::session::Session;
use crate::app::ticker::PriceTicker;
use crate::core::error::{AppError, Result};
use crate::core::service::MarketApi;
use crate::services::api::{LeaderboardPeriod, Settings, StockFilter, Theme, TimeRange};
use crate::ui::tables::render_empty_state;
use crate::ui::views;
use crate::utils::validation::{validate_buy, validate_sell, validate_share_count, validate_symbol};

/// Settings fields to change; `None` leaves the stored value.
#[derive(Debug, Clone, Default)]
pub struct SettingsUpdate {
    pub display_name: Option<String>,
    pub currency: Option<String>,
    pub theme: Option<Theme>,
    pub notifications: Option<bool>,
    pub refresh_interval_secs: Option<u64>,
    pub default_chart_range: Option<TimeRange>,
}

impl SettingsUpdate {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.currency.is_none()
            && self.theme.is_none()
            && self.notifications.is_none()
            && self.refresh_interval_secs.is_none()
            && self.default_chart_range.is_none()
    }

    fn apply(self, settings: &mut Settings) {
        if let Some(name) = self.display_name {
            settings.display_name = Some(name.trim().to_string());
        }
        if let Some(currency) = self.currency {
            settings.currency = currency.trim().to_ascii_uppercase();
        }
        if let Some(theme) = self.theme {
            settings.theme = theme;
        }
        if let Some(enabled) = self.notifications {
            settings.notifications_enabled = enabled;
        }
        if let Some(secs) = self.refresh_interval_secs {
            settings.refresh_interval_secs = secs;
        }
        if let Some(range) = self.default_chart_range {
            settings.default_chart_range = range;
        }
    }
}

pub struct App {
    api: Arc<dyn MarketApi>,
    session: Arc<Session>,
    navigation: NavigationCache,
}

impl App {
    pub fn new(api: Arc<dyn MarketApi>, session: Arc<Session>) -> Self {
        Self {
            navigation: NavigationCache::new(api.clone()),
            api,
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn user_id(&self) -> Result<String> {
        Ok(self.session.ensure_user()?.id)
    }

    /// Market table. The status line is best effort.
    pub async fn stocks(&self, filter: &StockFilter) -> Result<String> {
        let (stocks, status) = tokio::join!(self.api.list_stocks(filter), self.api.get_market_status());
        let status = status
            .map_err(|e| tracing::debug!(error = %e, "Market status unavailable"))
            .ok();
        Ok(views::render_market(&stocks?, status.as_ref()))
    }

    pub async fn search(&self, query: &str) -> Result<String> {
        let results = self.api.search_stocks(query).await?;
        Ok(views::render_market(&results, None))
    }

    /// Detail page; `range` defaults to the chart range from settings.
    pub async fn stock(&self, symbol: &str, range: Option<TimeRange>) -> Result<String> {
        let symbol = validate_symbol(symbol)?;
        let range = match range {
            Some(range) => range,
            None => self.preferred_range().await,
        };
        let (detail, history) = tokio::try_join!(
            self.api.get_stock(&symbol),
            self.api.get_price_history(&symbol, range)
        )?;
        Ok(views::render_stock_detail(&detail, &history, range))
    }

    pub async fn buy(&self, symbol: &str, shares: &str) -> Result<String> {
        let symbol = validate_symbol(symbol)?;
        let shares = validate_share_count(shares)?;
        let user_id = self.user_id()?;

        let (detail, portfolio) = tokio::try_join!(self.api.get_stock(&symbol), self.api.get_portfolio(&user_id))?;
        validate_buy(shares, detail.quote.price, portfolio.cash_balance).into_result()?;

        let result = self.api.execute_trade(&user_id, TradeSide::Buy, &symbol, shares).await?;
        tracing::info!(symbol = %symbol, shares, "Buy executed");
        Ok(views::render_trade(&result))
    }

    pub async fn sell(&self, symbol: &str, shares: &str) -> Result<String> {
        let symbol = validate_symbol(symbol)?;
        let shares = validate_share_count(shares)?;
        let user_id = self.user_id()?;

        let portfolio = self.api.get_portfolio(&user_id).await?;
        validate_sell(shares, portfolio.shares_held(&symbol)).into_result()?;

        let result = self.api.execute_trade(&user_id, TradeSide::Sell, &symbol, shares).await?;
        tracing::info!(symbol = %symbol, shares, "Sell executed");
        Ok(views::render_trade(&result))
    }

    pub async fn portfolio(&self) -> Result<String> {
        let portfolio = self.api.get_portfolio(&self.user_id()?).await?;
        Ok(views::render_portfolio(&portfolio))
    }

    pub async fn history(&self, limit: usize) -> Result<String> {
        let transactions = self.api.get_transactions(&self.user_id()?, limit).await?;
        Ok(views::render_transactions(&transactions))
    }

    pub async fn performance(&self, range: Option<TimeRange>) -> Result<String> {
        let range = match range {
            Some(range) => range,
            None => self.preferred_range().await,
        };
        let points = self.api.get_performance(&self.user_id()?, range).await?;
        Ok(views::render_performance(&points, range))
    }

    pub async fn watchlist(&self) -> Result<String> {
        let items = self.api.get_watchlist(&self.user_id()?).await?;
        Ok(views::render_watchlist(&items))
    }

    pub async fn watchlist_add(&self, symbol: &str) -> Result<String> {
        let symbol = validate_symbol(symbol)?;
        self.api.add_to_watchlist(&self.user_id()?, &symbol).await?;
        Ok(format!("Added {} to your watchlist.\n", symbol))
    }

    pub async fn watchlist_remove(&self, symbol: &str) -> Result<String> {
        let symbol = validate_symbol(symbol)?;
        self.api.remove_from_watchlist(&self.user_id()?, &symbol).await?;
        Ok(format!("Removed {} from your watchlist.\n", symbol))
    }

    pub async fn achievements(&self) -> Result<String> {
        let achievements = self.api.get_achievements(&self.user_id()?).await?;
        Ok(views::render_achievements(&achievements))
    }

    pub async fn news(&self, limit: usize) -> Result<String> {
        let events = self.api.get_market_events(limit).await?;
        Ok(views::render_events(&events, Utc::now()))
    }

    pub async fn leaderboard(&self, period: LeaderboardPeriod, limit: usize) -> Result<String> {
        let entries = self.api.get_leaderboard(period, limit).await?;
        let me = self.session.current().map(|u| u.id);
        Ok(views::render_leaderboard(&entries, period, me.as_deref()))
    }

    pub async fn settings(&self) -> Result<String> {
        let settings = self.api.get_settings(&self.user_id()?).await?;
        Ok(views::render_settings(&settings))
    }

    pub async fn settings_set(&self, update: SettingsUpdate) -> Result<String> {
        if update.is_empty() {
            return Err(AppError::Validation("Nothing to change".to_string()));
        }
        let user_id = self.user_id()?;
        let mut settings = self.api.get_settings(&user_id).await?;
        update.apply(&mut settings);
        settings.validate()?;

        let saved = self.api.update_settings(&user_id, &settings).await?;
        Ok(format!("Settings saved.\n\n{}", views::render_settings(&saved)))
    }

    /// Requires `confirm`; resetting wipes the simulated portfolio.
    pub async fn settings_reset(&self, confirm: bool) -> Result<String> {
        if !confirm {
            return Err(AppError::Validation(
                "Resetting erases your portfolio and history; pass --yes to confirm".to_string(),
            ));
        }
        self.api.reset_account(&self.user_id()?).await?;
        Ok("Account reset to starting cash.\n".to_string())
    }

    pub async fn nav(&self) -> Result<String> {
        let (items, source) = self.navigation.items().await;
        Ok(views::render_nav(items, source))
    }

    pub fn whoami(&self) -> Result<String> {
        let user = self.session.ensure_user()?;
        let mut out = views::render_user(&user, self.session.token().is_some());
        if let Some(url) = self.session.pending_login_url() {
            out.push_str(&format!("\nBackend login pending: {}\n", url));
        }
        Ok(out)
    }

    pub fn login(&self, display_name: &str, token: Option<&str>) -> Result<String> {
        let user = self.session.login(display_name)?;
        if let Some(token) = token {
            self.session.set_token(token)?;
        }
        Ok(format!("Signed in as {}.\n", user.display_name))
    }

    pub fn logout(&self) -> Result<String> {
        self.session.logout()?;
        Ok("Signed out. A new identity is created on the next command.\n".to_string())
    }

    /// Ticker interval: explicit, else the refresh interval from settings.
    pub async fn watch_interval(&self, explicit: Option<u64>) -> Duration {
        if let Some(secs) = explicit {
            return Duration::from_secs(secs.max(1));
        }
        let settings = match self.user_id() {
            Ok(user_id) => self.api.get_settings(&user_id).await.unwrap_or_default(),
            Err(_) => Settings::default(),
        };
        Duration::from_secs(settings.refresh_interval_secs)
    }

    pub fn start_ticker(&self, symbols: Vec<String>, period: Duration, events: Sender<AppEvent>) -> Result<PriceTicker> {
        let symbols = symbols
            .iter()
            .map(|s| validate_symbol(s))
            .collect::<Result<Vec<_>>>()?;
        Ok(PriceTicker::start(self.api.clone(), symbols, period, events))
    }

    /// Render one event received while watching.
    pub fn render_event(&self, event: &AppEvent) -> String {
        match event {
            AppEvent::QuotesUpdated(stocks) => views::render_quotes(stocks, Utc::now()),
            AppEvent::RefreshFailed(reason) => render_empty_state("Refresh failed, showing last quotes.", Some(reason)),
            AppEvent::LoginRequired { login_url } => format!("Login required: {}\n", login_url),
        }
    }

    async fn preferred_range(&self) -> TimeRange {
        match self.user_id() {
            Ok(user_id) => self
                .api
                .get_settings(&user_id)
                .await
                .map(|s| s.default_chart_range)
                .unwrap_or_default(),
            Err(_) => TimeRange::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ApiError;
    use crate::core::mock::{empty_portfolio, sample_stock, MockApi};
    use crate::services::api::Position;
    use crate::services::storage::MemoryStore;

    fn app_with(mock: Arc<MockApi>) -> App {
        let session = Arc::new(Session::load(Arc::new(MemoryStore::new())).unwrap());
        App::new(mock, session)
    }

    fn holding(symbol: &str, shares: u64) -> Position {
        Position {
            symbol: symbol.to_string(),
            name: None,
            shares,
            average_cost: 100.0,
            current_price: 100.0,
            market_value: shares as f64 * 100.0,
            cost_basis: shares as f64 * 100.0,
            gain_loss: 0.0,
            gain_loss_percent: 0.0,
        }
    }

    #[tokio::test]
    async fn test_buy_executes_trade() {
        let mock = Arc::new(MockApi::new());
        mock.set_stocks(vec![sample_stock("AAPL", 100.0)]);
        mock.set_portfolio(empty_portfolio(1_000.0));
        let app = app_with(mock.clone());

        let out = app.buy("aapl", "5").await.unwrap();
        assert!(out.starts_with("Bought 5 AAPL @ $100.00 = $500.00"));
        assert!(out.contains("Cash balance: $500.00"));
        assert_eq!(mock.trades(), vec![(TradeSide::Buy, "AAPL".to_string(), 5)]);
    }

    #[tokio::test]
    async fn test_buy_rejects_insufficient_funds() {
        let mock = Arc::new(MockApi::new());
        mock.set_stocks(vec![sample_stock("AAPL", 100.0)]);
        mock.set_portfolio(empty_portfolio(100.0));
        let app = app_with(mock.clone());

        let err = app.buy("AAPL", "2").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m.starts_with("Insufficient funds")));
        assert_eq!(mock.call_count("execute_trade"), 0);
    }

    #[tokio::test]
    async fn test_bad_input_never_reaches_backend() {
        let mock = Arc::new(MockApi::new());
        let app = app_with(mock.clone());

        assert!(app.buy("AAPL", "abc").await.is_err());
        assert!(app.buy("NOT A SYMBOL", "1").await.is_err());
        assert!(app.sell("AAPL", "0").await.is_err());
        assert_eq!(mock.call_count("get_stock"), 0);
        assert_eq!(mock.call_count("get_portfolio"), 0);
    }

    #[tokio::test]
    async fn test_sell_checks_holdings() {
        let mock = Arc::new(MockApi::new());
        mock.set_stocks(vec![sample_stock("MSFT", 100.0)]);
        let mut portfolio = empty_portfolio(0.0);
        portfolio.positions.push(holding("MSFT", 3));
        mock.set_portfolio(portfolio);
        let app = app_with(mock.clone());

        assert!(app.sell("MSFT", "4").await.is_err());
        let out = app.sell("MSFT", "3").await.unwrap();
        assert!(out.starts_with("Sold 3 MSFT"));
        assert_eq!(mock.trades().len(), 1);
    }

    #[tokio::test]
    async fn test_stocks_survives_missing_status() {
        let mock = Arc::new(MockApi::new());
        mock.set_stocks(vec![sample_stock("AAPL", 190.0)]);
        mock.fail_with("get_market_status", ApiError::generic("boom"));
        let app = app_with(mock);

        let out = app.stocks(&StockFilter::default()).await.unwrap();
        assert!(out.contains("AAPL"));
        assert!(!out.contains("Market OPEN"));
    }

    #[tokio::test]
    async fn test_login_required_propagates() {
        let mock = Arc::new(MockApi::new());
        mock.require_login("get_portfolio", "https://sim/login");
        let app = app_with(mock);

        let err = app.portfolio().await.unwrap_err();
        assert!(err.is_login_required());
    }

    #[tokio::test]
    async fn test_watchlist_add_and_remove() {
        let mock = Arc::new(MockApi::new());
        let app = app_with(mock.clone());

        assert_eq!(app.watchlist_add("tsla").await.unwrap(), "Added TSLA to your watchlist.\n");
        assert!(app.watchlist().await.unwrap().contains("TSLA"));
        app.watchlist_remove("TSLA").await.unwrap();
        assert!(app.watchlist().await.unwrap().contains("Your watchlist is empty."));
    }

    #[tokio::test]
    async fn test_settings_set_validates() {
        let mock = Arc::new(MockApi::new());
        let app = app_with(mock.clone());

        assert!(app.settings_set(SettingsUpdate::default()).await.is_err());

        let bad = SettingsUpdate { refresh_interval_secs: Some(1), ..Default::default() };
        assert!(app.settings_set(bad).await.is_err());
        assert_eq!(mock.call_count("update_settings"), 0);

        let good = SettingsUpdate { theme: Some(Theme::Light), ..Default::default() };
        let out = app.settings_set(good).await.unwrap();
        assert!(out.contains("light"));
    }

    #[tokio::test]
    async fn test_reset_requires_confirmation() {
        let mock = Arc::new(MockApi::new());
        let app = app_with(mock.clone());

        assert!(app.settings_reset(false).await.is_err());
        assert_eq!(mock.resets(), 0);
        app.settings_reset(true).await.unwrap();
        assert_eq!(mock.resets(), 1);
    }

    #[tokio::test]
    async fn test_whoami_and_logout() {
        let app = app_with(Arc::new(MockApi::new()));
        assert!(app.whoami().unwrap().contains("Trader-"));

        app.login("Market Maker", Some("tok")).unwrap();
        let out = app.whoami().unwrap();
        assert!(out.contains("Market Maker"));
        assert!(out.contains("stored"));

        app.logout().unwrap();
        assert!(app.session().current().is_none());
    }

    #[tokio::test]
    async fn test_watch_interval_uses_settings() {
        let app = app_with(Arc::new(MockApi::new()));
        assert_eq!(app.watch_interval(Some(0)).await, Duration::from_secs(1));
        assert_eq!(app.watch_interval(None).await, Duration::from_secs(30));
    }
}
