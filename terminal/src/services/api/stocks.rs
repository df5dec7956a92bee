//! # Stock Endpoints
//!
//! Market table, stock detail, price history, search and market status.
//! The market table and detail pages go through the quote cache.

use chrono::{DateTime, Utc};
use shared::{normalize_symbol, MarketStatusDto, PricePointDto, StockDetailDto, StockDto};
use std::fmt;
use std::str::FromStr;

use super::client::ApiClient;
use super::normalize::{parse_date, parse_optional_date};
use crate::core::error::{AppError, Result};

/// Chart window for price history and performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeRange {
    OneDay,
    OneWeek,
    #[default]
    OneMonth,
    ThreeMonths,
    OneYear,
    All,
}

impl TimeRange {
    pub const ALL_RANGES: [TimeRange; 6] = [
        TimeRange::OneDay,
        TimeRange::OneWeek,
        TimeRange::OneMonth,
        TimeRange::ThreeMonths,
        TimeRange::OneYear,
        TimeRange::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::OneDay => "1D",
            TimeRange::OneWeek => "1W",
            TimeRange::OneMonth => "1M",
            TimeRange::ThreeMonths => "3M",
            TimeRange::OneYear => "1Y",
            TimeRange::All => "ALL",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_uppercase();
        TimeRange::ALL_RANGES
            .into_iter()
            .find(|range| range.as_str() == wanted)
            .ok_or_else(|| AppError::Validation(format!("Unknown range '{}' (use 1D, 1W, 1M, 3M, 1Y or ALL)", s)))
    }
}

/// Sort order of the market table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockSort {
    Symbol,
    Price,
    Change,
    Volume,
}

impl StockSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockSort::Symbol => "symbol",
            StockSort::Price => "price",
            StockSort::Change => "change",
            StockSort::Volume => "volume",
        }
    }

    /// Symbol ascending; everything else descending.
    pub fn apply(&self, stocks: &mut [Stock]) {
        match self {
            StockSort::Symbol => stocks.sort_by(|a, b| a.symbol.cmp(&b.symbol)),
            StockSort::Price => stocks.sort_by(|a, b| b.price.total_cmp(&a.price)),
            StockSort::Change => stocks.sort_by(|a, b| b.change_percent.total_cmp(&a.change_percent)),
            StockSort::Volume => stocks.sort_by(|a, b| b.volume.cmp(&a.volume)),
        }
    }
}

impl FromStr for StockSort {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "symbol" => Ok(StockSort::Symbol),
            "price" => Ok(StockSort::Price),
            "change" => Ok(StockSort::Change),
            "volume" => Ok(StockSort::Volume),
            other => Err(AppError::Validation(format!(
                "Unknown sort '{}' (use symbol, price, change or volume)",
                other
            ))),
        }
    }
}

/// Market table filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockFilter {
    pub sector: Option<String>,
    pub search: Option<String>,
    pub sort: Option<StockSort>,
}

impl StockFilter {
    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(sector) = self.sector.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            pairs.push(("sector", sector.to_string()));
        }
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            pairs.push(("search", search.to_string()));
        }
        if let Some(sort) = self.sort {
            pairs.push(("sort", sort.as_str().to_string()));
        }
        pairs
    }

    fn cache_key(&self) -> String {
        self.query_pairs()
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, v.to_lowercase()))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Normalized market table row.
#[derive(Debug, Clone, PartialEq)]
pub struct Stock {
    pub symbol: String,
    pub name: String,
    pub sector: Option<String>,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: u64,
    pub market_cap: Option<f64>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StockDetail {
    pub quote: Stock,
    pub description: Option<String>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub previous_close: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub week52_high: Option<f64>,
    pub week52_low: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub volume: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarketStatus {
    pub is_open: bool,
    pub next_open: Option<DateTime<Utc>>,
    pub next_close: Option<DateTime<Utc>>,
    pub server_time: Option<DateTime<Utc>>,
}

pub(crate) fn normalize_stock(dto: StockDto) -> Stock {
    Stock {
        symbol: normalize_symbol(&dto.symbol),
        name: dto.name,
        sector: dto.sector.filter(|s| !s.is_empty()),
        price: dto.price,
        change: dto.change,
        change_percent: dto.change_percent,
        volume: dto.volume,
        market_cap: dto.market_cap,
        updated_at: parse_optional_date(dto.updated_at.as_deref()),
    }
}

fn normalize_detail(dto: StockDetailDto) -> StockDetail {
    StockDetail {
        quote: normalize_stock(dto.quote),
        description: dto.description.filter(|d| !d.trim().is_empty()),
        open: dto.open,
        high: dto.high,
        low: dto.low,
        previous_close: dto.previous_close,
        pe_ratio: dto.pe_ratio,
        week52_high: dto.week52_high,
        week52_low: dto.week52_low,
    }
}

fn normalize_price_point(dto: PricePointDto) -> Result<PricePoint> {
    Ok(PricePoint {
        timestamp: parse_date("timestamp", &dto.timestamp)?,
        price: dto.price,
        volume: dto.volume,
    })
}

fn normalize_market_status(dto: MarketStatusDto) -> MarketStatus {
    MarketStatus {
        is_open: dto.is_open,
        next_open: parse_optional_date(dto.next_open.as_deref()),
        next_close: parse_optional_date(dto.next_close.as_deref()),
        server_time: parse_optional_date(dto.server_time.as_deref()),
    }
}

/// Upper-case and check a symbol before it goes into a URL path.
pub(crate) fn path_symbol(symbol: &str) -> Result<String> {
    let symbol = normalize_symbol(symbol);
    if symbol.is_empty() || !symbol.chars().all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-') {
        return Err(AppError::Validation(format!("Invalid symbol '{}'", symbol)));
    }
    Ok(symbol)
}

impl ApiClient {
    /// Market table. Served from the quote cache while fresh.
    #[tracing::instrument(skip(self), fields(filter = ?filter))]
    pub async fn list_stocks(&self, filter: &StockFilter) -> Result<Vec<Stock>> {
        let key = filter.cache_key();
        if let Some(stocks) = self.stock_lists.get(&key) {
            tracing::debug!(count = stocks.len(), "Stock list cache hit");
            return Ok(stocks);
        }
        self.fetch_stocks(filter, key).await
    }

    /// Market table, bypassing the cache (and refreshing it).
    pub async fn refresh_stocks(&self, filter: &StockFilter) -> Result<Vec<Stock>> {
        let key = filter.cache_key();
        self.stock_lists.invalidate(&key);
        self.fetch_stocks(filter, key).await
    }

    async fn fetch_stocks(&self, filter: &StockFilter, key: String) -> Result<Vec<Stock>> {
        let dtos: Vec<StockDto> = self.get_json("/api/stocks", &filter.query_pairs()).await?;
        let mut stocks: Vec<Stock> = dtos.into_iter().map(normalize_stock).collect();
        if let Some(sort) = filter.sort {
            sort.apply(&mut stocks);
        }
        tracing::debug!(count = stocks.len(), "Stocks fetched");
        self.stock_lists.insert(key, stocks.clone());
        Ok(stocks)
    }

    /// Stock detail page.
    #[tracing::instrument(skip(self))]
    pub async fn get_stock(&self, symbol: &str) -> Result<StockDetail> {
        let symbol = path_symbol(symbol)?;
        if let Some(detail) = self.stock_details.get(&symbol) {
            return Ok(detail);
        }

        let dto: StockDetailDto = self.get_json(&format!("/api/stocks/{}", symbol), &[]).await?;
        let detail = normalize_detail(dto);
        self.stock_details.insert(symbol, detail.clone());
        Ok(detail)
    }

    /// Price history, oldest point first.
    #[tracing::instrument(skip(self))]
    pub async fn get_price_history(&self, symbol: &str, range: TimeRange) -> Result<Vec<PricePoint>> {
        let symbol = path_symbol(symbol)?;
        let dtos: Vec<PricePointDto> = self
            .get_json(
                &format!("/api/stocks/{}/history", symbol),
                &[("range", range.as_str().to_string())],
            )
            .await?;

        let mut points = dtos
            .into_iter()
            .map(normalize_price_point)
            .collect::<Result<Vec<_>>>()?;
        points.sort_by_key(|p| p.timestamp);
        Ok(points)
    }

    /// Search by symbol or name. An empty query matches nothing and sends no request.
    pub async fn search_stocks(&self, query: &str) -> Result<Vec<Stock>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let dtos: Vec<StockDto> = self
            .get_json("/api/stocks/search", &[("q", query.to_string())])
            .await?;
        Ok(dtos.into_iter().map(normalize_stock).collect())
    }

    pub async fn get_market_status(&self) -> Result<MarketStatus> {
        let dto: MarketStatusDto = self.get_json("/api/market/status", &[]).await?;
        Ok(normalize_market_status(dto))
    }
}
