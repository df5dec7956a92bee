//! # Market Event Data Transfer Objects
//!
//! Generated market news.
//!
//! - `GET /api/events?limit=` - list of [`MarketEventDto`]
//!
//! ```json
//! {
//!   "id": 12,
//!   "title": "Acme beats earnings expectations",
//!   "description": "Quarterly revenue up 14%",
//!   "affectedSymbols": ["ACME"],
//!   "sentiment": "positive",
//!   "impactPercent": 3.5,
//!   "createdAt": "2024-03-01T09:30:00Z"
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::de::string_or_number;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketEventDto {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(alias = "title")]
    pub headline: String,
    #[serde(default, alias = "description", alias = "content")]
    pub summary: Option<String>,
    #[serde(default, alias = "affectedSymbols", alias = "symbols")]
    pub affected_symbols: Vec<String>,
    #[serde(default)]
    pub sentiment: Option<String>,
    #[serde(default, alias = "impactPercent", alias = "impact_percent")]
    pub impact: Option<f64>,
    #[serde(
        alias = "publishedAt",
        alias = "timestamp",
        alias = "createdAt",
        alias = "created_at"
    )]
    pub published_at: String,
}
