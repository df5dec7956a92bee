//! # Portfolio Endpoints
//!
//! Portfolio snapshot, transaction history, performance series and trades.
//! Position values that the backend leaves implicit (market value, cost
//! basis, gain/loss) are derived here so the views never recompute them.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use shared::{
    normalize_symbol, PerformancePointDto, PortfolioDto, PositionDto, TradeRequest, TradeResultDto, TradeSide,
    TransactionDto,
};

use super::client::{user_path, ApiClient};
use super::envelope::invalid_shape;
use super::normalize::{parse_date, parse_optional_date};
use super::stocks::{path_symbol, TimeRange};
use crate::core::error::{ApiError, Result, INVALID_RESPONSE};
use crate::utils::validation::validate_share_bounds;

/// Transactions are requested in pages of at most this many rows.
pub const MAX_TRANSACTION_PAGE: usize = 500;

#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub symbol: String,
    pub name: Option<String>,
    pub shares: u64,
    pub average_cost: f64,
    pub current_price: f64,
    pub market_value: f64,
    pub cost_basis: f64,
    pub gain_loss: f64,
    pub gain_loss_percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    pub user_id: String,
    pub cash_balance: f64,
    /// Cash plus market value of every position
    pub total_value: f64,
    pub invested_value: f64,
    pub total_gain_loss: f64,
    pub positions: Vec<Position>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Portfolio {
    pub fn position(&self, symbol: &str) -> Option<&Position> {
        let symbol = normalize_symbol(symbol);
        self.positions.iter().find(|p| p.symbol == symbol)
    }

    /// Shares held of `symbol`, zero when there is no position.
    pub fn shares_held(&self, symbol: &str) -> u64 {
        self.position(symbol).map(|p| p.shares).unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub symbol: String,
    pub side: TradeSide,
    pub shares: u64,
    pub price: f64,
    pub total: f64,
    pub executed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerformancePoint {
    pub date: DateTime<Utc>,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TradeResult {
    pub transaction: Transaction,
    pub cash_balance: Option<f64>,
    pub message: Option<String>,
}

fn normalize_position(dto: PositionDto) -> Position {
    let market_value = dto.shares as f64 * dto.current_price;
    let cost_basis = dto.shares as f64 * dto.average_cost;
    let gain_loss = market_value - cost_basis;
    let gain_loss_percent = if cost_basis > 0.0 {
        gain_loss / cost_basis * 100.0
    } else {
        0.0
    };

    Position {
        symbol: normalize_symbol(&dto.symbol),
        name: dto.name,
        shares: dto.shares,
        average_cost: dto.average_cost,
        current_price: dto.current_price,
        market_value,
        cost_basis,
        gain_loss,
        gain_loss_percent,
    }
}

pub(crate) fn normalize_portfolio(dto: PortfolioDto) -> Portfolio {
    let positions: Vec<Position> = dto
        .positions
        .into_iter()
        .filter(|p| p.shares > 0)
        .map(normalize_position)
        .collect();

    let invested_value: f64 = positions.iter().map(|p| p.market_value).sum();
    let total_gain_loss: f64 = positions.iter().map(|p| p.gain_loss).sum();

    Portfolio {
        user_id: dto.user_id,
        cash_balance: dto.cash_balance,
        total_value: dto.total_value.unwrap_or(dto.cash_balance + invested_value),
        invested_value,
        total_gain_loss,
        positions,
        updated_at: parse_optional_date(dto.updated_at.as_deref()),
    }
}

pub(crate) fn normalize_transaction(dto: TransactionDto) -> Result<Transaction> {
    let side = TradeSide::parse(&dto.side)
        .ok_or_else(|| ApiError::new(INVALID_RESPONSE, format!("Unknown trade side '{}'", dto.side)))?;

    Ok(Transaction {
        total: dto.total.unwrap_or(dto.shares as f64 * dto.price),
        executed_at: parse_date("executed_at", &dto.executed_at)?,
        id: dto.id,
        symbol: normalize_symbol(&dto.symbol),
        side,
        shares: dto.shares,
        price: dto.price,
    })
}

/// Accepts `{transaction, cashBalance?, message?}` or a bare transaction.
pub(crate) fn normalize_trade_result(body: Value) -> Result<TradeResult> {
    if body.get("transaction").is_some() {
        let dto = TradeResultDto::deserialize(&body).map_err(|e| invalid_shape(&e))?;
        return Ok(TradeResult {
            transaction: normalize_transaction(dto.transaction)?,
            cash_balance: dto.cash_balance,
            message: dto.message,
        });
    }

    let dto = TransactionDto::deserialize(&body).map_err(|e| invalid_shape(&e))?;
    Ok(TradeResult {
        transaction: normalize_transaction(dto)?,
        cash_balance: body
            .get("cashBalance")
            .or_else(|| body.get("cash_balance"))
            .and_then(Value::as_f64),
        message: body.get("message").and_then(Value::as_str).map(str::to_string),
    })
}

fn normalize_performance_point(dto: PerformancePointDto) -> Result<PerformancePoint> {
    Ok(PerformancePoint {
        date: parse_date("date", &dto.date)?,
        value: dto.value,
    })
}

impl ApiClient {
    #[tracing::instrument(skip(self))]
    pub async fn get_portfolio(&self, user_id: &str) -> Result<Portfolio> {
        let user = user_path(user_id)?;
        let dto: PortfolioDto = self.get_json(&format!("/api/portfolio/{}", user), &[]).await?;
        let portfolio = normalize_portfolio(dto);
        tracing::debug!(
            positions = portfolio.positions.len(),
            total_value = portfolio.total_value,
            "Portfolio fetched"
        );
        Ok(portfolio)
    }

    /// Newest transaction first.
    #[tracing::instrument(skip(self))]
    pub async fn get_transactions(&self, user_id: &str, limit: usize) -> Result<Vec<Transaction>> {
        let user = user_path(user_id)?;
        let limit = limit.clamp(1, MAX_TRANSACTION_PAGE);
        let dtos: Vec<TransactionDto> = self
            .get_json(
                &format!("/api/portfolio/{}/transactions", user),
                &[("limit", limit.to_string())],
            )
            .await?;

        let mut transactions = dtos
            .into_iter()
            .map(normalize_transaction)
            .collect::<Result<Vec<_>>>()?;
        transactions.sort_by(|a, b| b.executed_at.cmp(&a.executed_at));
        transactions.truncate(limit);
        Ok(transactions)
    }

    /// Portfolio value series, oldest point first.
    pub async fn get_performance(&self, user_id: &str, range: TimeRange) -> Result<Vec<PerformancePoint>> {
        let user = user_path(user_id)?;
        let dtos: Vec<PerformancePointDto> = self
            .get_json(
                &format!("/api/portfolio/{}/performance", user),
                &[("range", range.as_str().to_string())],
            )
            .await?;

        let mut points = dtos
            .into_iter()
            .map(normalize_performance_point)
            .collect::<Result<Vec<_>>>()?;
        points.sort_by_key(|p| p.date);
        Ok(points)
    }

    /// Place a market order. Share bounds are checked before anything is sent;
    /// cash and holdings checks belong to the caller, which has the portfolio.
    #[tracing::instrument(skip(self), fields(side = %side))]
    pub async fn execute_trade(
        &self,
        user_id: &str,
        side: TradeSide,
        symbol: &str,
        shares: u64,
    ) -> Result<TradeResult> {
        let user = user_path(user_id)?;
        let symbol = path_symbol(symbol)?;
        validate_share_bounds(shares)?;

        tracing::info!(symbol = %symbol, shares = shares, "Submitting trade");
        let start = std::time::Instant::now();

        let request = TradeRequest { symbol, shares, side };
        let body: Value = self
            .post_json(&format!("/api/portfolio/{}/trades", user), &request)
            .await?;

        // Any 2xx means the backend committed the trade; prices and rankings moved
        self.invalidate_caches();

        let result = normalize_trade_result(body).map_err(|e| {
            tracing::warn!(error = %e, "Trade committed but the result could not be read");
            e
        })?;

        tracing::info!(
            transaction_id = %result.transaction.id,
            price = result.transaction.price,
            duration_ms = start.elapsed().as_millis(),
            "Trade executed"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_portfolio_derives_values() {
        let dto: PortfolioDto = serde_json::from_value(json!({
            "userId": "u1",
            "cashBalance": 1000.0,
            "positions": [
                {"symbol": "acme", "shares": 10, "averageCost": 50.0, "currentPrice": 60.0},
                {"symbol": "gone", "shares": 0, "averageCost": 5.0, "currentPrice": 6.0}
            ]
        }))
        .unwrap();

        let portfolio = normalize_portfolio(dto);
        assert_eq!(portfolio.positions.len(), 1);
        let acme = portfolio.position("acme").unwrap();
        assert_eq!(acme.market_value, 600.0);
        assert_eq!(acme.gain_loss, 100.0);
        assert!((acme.gain_loss_percent - 20.0).abs() < 1e-9);
        assert_eq!(portfolio.total_value, 1600.0);
        assert_eq!(portfolio.invested_value, 600.0);
        assert_eq!(portfolio.shares_held("ACME"), 10);
        assert_eq!(portfolio.shares_held("NONE"), 0);
    }

    #[test]
    fn test_backend_total_value_wins() {
        let dto: PortfolioDto =
            serde_json::from_value(json!({"user_id": "u1", "cash": 10.0, "totalValue": 99.0})).unwrap();
        assert_eq!(normalize_portfolio(dto).total_value, 99.0);
    }

    #[test]
    fn test_normalize_transaction() {
        let dto: TransactionDto = serde_json::from_value(json!({
            "id": 9, "symbol": "acme", "type": "SELL", "quantity": 3, "price": 2.5,
            "createdAt": "2024-02-01T12:00:00Z"
        }))
        .unwrap();
        let tx = normalize_transaction(dto).unwrap();
        assert_eq!(tx.id, "9");
        assert_eq!(tx.side, TradeSide::Sell);
        assert_eq!(tx.total, 7.5);
        assert_eq!(tx.executed_at.to_rfc3339(), "2024-02-01T12:00:00+00:00");
    }

    #[test]
    fn test_normalize_transaction_bad_side_and_date() {
        let bad_side: TransactionDto = serde_json::from_value(json!({
            "id": "1", "symbol": "A", "side": "short", "shares": 1, "price": 1.0, "executedAt": "2024-01-01"
        }))
        .unwrap();
        assert_eq!(normalize_transaction(bad_side).unwrap_err().api_code(), Some(INVALID_RESPONSE));

        let bad_date: TransactionDto = serde_json::from_value(json!({
            "id": "1", "symbol": "A", "side": "buy", "shares": 1, "price": 1.0, "executedAt": "soon"
        }))
        .unwrap();
        assert_eq!(
            normalize_transaction(bad_date).unwrap_err().api_code(),
            Some(crate::core::error::INVALID_DATE)
        );
    }

    #[test]
    fn test_trade_result_wrapped_and_bare() {
        let wrapped = normalize_trade_result(json!({
            "transaction": {"id": "t1", "symbol": "acme", "side": "buy", "shares": 2, "price": 10.0,
                            "executedAt": "2024-03-01T10:00:00Z"},
            "cashBalance": 980.0,
            "message": "Filled"
        }))
        .unwrap();
        assert_eq!(wrapped.transaction.symbol, "ACME");
        assert_eq!(wrapped.cash_balance, Some(980.0));
        assert_eq!(wrapped.message.as_deref(), Some("Filled"));

        let bare = normalize_trade_result(json!({
            "id": "t2", "symbol": "acme", "side": "sell", "shares": 1, "price": 11.0,
            "executedAt": "2024-03-01T11:00:00Z", "cash_balance": 991.0
        }))
        .unwrap();
        assert_eq!(bare.transaction.id, "t2");
        assert_eq!(bare.transaction.side, TradeSide::Sell);
        assert_eq!(bare.cash_balance, Some(991.0));
        assert_eq!(bare.message, None);
    }

    #[test]
    fn test_trade_result_unreadable() {
        let err = normalize_trade_result(json!({"ok": true})).unwrap_err();
        assert_eq!(err.api_code(), Some(INVALID_RESPONSE));
    }
}
