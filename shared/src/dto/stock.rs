//! # Stock Data Transfer Objects
//!
//! Quotes, detail pages, price history and market status.
//!
//! ## Endpoints Using These DTOs
//!
//! - `GET /api/stocks` - list of [`StockDto`]
//! - `GET /api/stocks/search?q=` - list of [`StockDto`]
//! - `GET /api/stocks/{symbol}` - [`StockDetailDto`]
//! - `GET /api/stocks/{symbol}/history?range=1M` - list of [`PricePointDto`]
//! - `GET /api/market/status` - [`MarketStatusDto`]

use serde::{Deserialize, Serialize};

/// One row of the market table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockDto {
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(alias = "currentPrice", alias = "current_price")]
    pub price: f64,
    #[serde(default, alias = "priceChange", alias = "price_change")]
    pub change: f64,
    #[serde(default, alias = "changePercent")]
    pub change_percent: f64,
    #[serde(default)]
    pub volume: u64,
    #[serde(default, alias = "marketCap")]
    pub market_cap: Option<f64>,
    #[serde(default, alias = "updatedAt", alias = "lastUpdated", alias = "last_updated")]
    pub updated_at: Option<String>,
}

/// Stock detail page: the quote plus session and fundamentals data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockDetailDto {
    #[serde(flatten)]
    pub quote: StockDto,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub open: Option<f64>,
    #[serde(default, alias = "dayHigh", alias = "day_high")]
    pub high: Option<f64>,
    #[serde(default, alias = "dayLow", alias = "day_low")]
    pub low: Option<f64>,
    #[serde(default, alias = "previousClose")]
    pub previous_close: Option<f64>,
    #[serde(default, alias = "peRatio")]
    pub pe_ratio: Option<f64>,
    #[serde(default, alias = "week52High", alias = "fiftyTwoWeekHigh")]
    pub week52_high: Option<f64>,
    #[serde(default, alias = "week52Low", alias = "fiftyTwoWeekLow")]
    pub week52_low: Option<f64>,
}

/// One point of a price chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricePointDto {
    #[serde(alias = "date", alias = "time")]
    pub timestamp: String,
    #[serde(alias = "close")]
    pub price: f64,
    #[serde(default)]
    pub volume: Option<u64>,
}

/// Whether the simulated exchange is trading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketStatusDto {
    #[serde(alias = "isOpen")]
    pub is_open: bool,
    #[serde(default, alias = "nextOpen")]
    pub next_open: Option<String>,
    #[serde(default, alias = "nextClose")]
    pub next_close: Option<String>,
    #[serde(default, alias = "serverTime")]
    pub server_time: Option<String>,
}
