//! # Market Event Endpoints
//!
//! Generated market news, newest first.

use chrono::{DateTime, Utc};
use shared::{normalize_symbol, MarketEventDto};
use std::fmt;

use super::client::ApiClient;
use super::normalize::parse_date;
use crate::core::error::Result;

pub const MAX_EVENTS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Unknown or missing sentiment is neutral.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("positive" | "bullish" | "up") => Sentiment::Positive,
            Some("negative" | "bearish" | "down") => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarketEvent {
    pub id: String,
    pub headline: String,
    pub summary: Option<String>,
    pub affected_symbols: Vec<String>,
    pub sentiment: Sentiment,
    pub impact: Option<f64>,
    pub published_at: DateTime<Utc>,
}

fn normalize_event(dto: MarketEventDto) -> Result<MarketEvent> {
    Ok(MarketEvent {
        published_at: parse_date("published_at", &dto.published_at)?,
        sentiment: Sentiment::parse(dto.sentiment.as_deref()),
        id: dto.id,
        headline: dto.headline,
        summary: dto.summary.filter(|s| !s.trim().is_empty()),
        affected_symbols: dto.affected_symbols.iter().map(|s| normalize_symbol(s)).collect(),
        impact: dto.impact,
    })
}

impl ApiClient {
    #[tracing::instrument(skip(self))]
    pub async fn get_market_events(&self, limit: usize) -> Result<Vec<MarketEvent>> {
        let limit = limit.clamp(1, MAX_EVENTS);
        let dtos: Vec<MarketEventDto> = self.get_json("/api/events", &[("limit", limit.to_string())]).await?;

        let mut events = dtos.into_iter().map(normalize_event).collect::<Result<Vec<_>>>()?;
        events.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        events.truncate(limit);
        Ok(events)
    }
}
