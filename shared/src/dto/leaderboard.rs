//! # Leaderboard Data Transfer Objects
//!
//! - `GET /api/leaderboard?period=weekly&limit=20` - list of [`LeaderboardEntryDto`]

use serde::{Deserialize, Serialize};

use super::de::string_or_number;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaderboardEntryDto {
    pub rank: u32,
    #[serde(alias = "userId", deserialize_with = "string_or_number")]
    pub user_id: String,
    #[serde(alias = "displayName", alias = "username")]
    pub display_name: String,
    #[serde(alias = "totalValue", alias = "portfolioValue", alias = "portfolio_value")]
    pub total_value: f64,
    #[serde(default, alias = "returnPercent", alias = "gainPercent", alias = "gain_percent")]
    pub return_percent: f64,
}
