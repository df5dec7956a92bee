//! # Portfolio Data Transfer Objects
//!
//! The backend owns the ledger; these types only carry what it reports and
//! what the client asks it to do.
//!
//! ## Endpoints Using These DTOs
//!
//! - `GET /api/portfolio/{user}` - [`PortfolioDto`]
//! - `GET /api/portfolio/{user}/transactions?limit=` - list of [`TransactionDto`]
//! - `GET /api/portfolio/{user}/performance?range=` - list of [`PerformancePointDto`]
//! - `POST /api/portfolio/{user}/trades` - [`TradeRequest`] → [`TradeResultDto`]

use serde::{Deserialize, Serialize};
use std::fmt;

use super::de::string_or_number;

/// Direction of a trade.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    /// Parse a side case-insensitively (`"BUY"`, `"sell"`, ...).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "buy" => Some(TradeSide::Buy),
            "sell" => Some(TradeSide::Sell),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => "buy",
            TradeSide::Sell => "sell",
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A held position as reported by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PositionDto {
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(alias = "quantity")]
    pub shares: u64,
    #[serde(alias = "averageCost", alias = "avgCost", alias = "avg_cost")]
    pub average_cost: f64,
    #[serde(alias = "currentPrice", alias = "price")]
    pub current_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioDto {
    #[serde(alias = "userId", deserialize_with = "string_or_number")]
    pub user_id: String,
    #[serde(alias = "cashBalance", alias = "cash")]
    pub cash_balance: f64,
    #[serde(default, alias = "totalValue")]
    pub total_value: Option<f64>,
    #[serde(default, alias = "holdings")]
    pub positions: Vec<PositionDto>,
    #[serde(default, alias = "updatedAt")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionDto {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub symbol: String,
    /// `"buy"`/`"sell"` in any case; parsed by the client normalizer.
    #[serde(alias = "type", alias = "tradeType", alias = "trade_type")]
    pub side: String,
    #[serde(alias = "quantity")]
    pub shares: u64,
    pub price: f64,
    #[serde(default, alias = "totalAmount", alias = "total_amount")]
    pub total: Option<f64>,
    #[serde(
        alias = "executedAt",
        alias = "timestamp",
        alias = "createdAt",
        alias = "created_at"
    )]
    pub executed_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerformancePointDto {
    #[serde(alias = "timestamp")]
    pub date: String,
    #[serde(alias = "totalValue", alias = "total_value")]
    pub value: f64,
}

/// Body of a buy/sell request. Serialized camelCase like every outgoing request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TradeRequest {
    pub symbol: String,
    pub shares: u64,
    pub side: TradeSide,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradeResultDto {
    pub transaction: TransactionDto,
    #[serde(default, alias = "cashBalance")]
    pub cash_balance: Option<f64>,
    #[serde(default)]
    pub message: Option<String>,
}
