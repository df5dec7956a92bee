//! # Leaderboard Endpoint

use shared::LeaderboardEntryDto;
use std::fmt;
use std::str::FromStr;

use super::client::ApiClient;
use crate::core::error::{AppError, Result};

pub const MAX_LEADERBOARD_ROWS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LeaderboardPeriod {
    Daily,
    #[default]
    Weekly,
    Monthly,
    AllTime,
}

impl LeaderboardPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaderboardPeriod::Daily => "daily",
            LeaderboardPeriod::Weekly => "weekly",
            LeaderboardPeriod::Monthly => "monthly",
            LeaderboardPeriod::AllTime => "all-time",
        }
    }
}

impl fmt::Display for LeaderboardPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaderboardPeriod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "daily" | "day" => Ok(LeaderboardPeriod::Daily),
            "weekly" | "week" => Ok(LeaderboardPeriod::Weekly),
            "monthly" | "month" => Ok(LeaderboardPeriod::Monthly),
            "all-time" | "alltime" | "all" => Ok(LeaderboardPeriod::AllTime),
            other => Err(AppError::Validation(format!(
                "Unknown period '{}' (use daily, weekly, monthly or all-time)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub user_id: String,
    pub display_name: String,
    pub total_value: f64,
    pub return_percent: f64,
}

fn normalize_entry(dto: LeaderboardEntryDto) -> LeaderboardEntry {
    LeaderboardEntry {
        rank: dto.rank,
        user_id: dto.user_id,
        display_name: dto.display_name,
        total_value: dto.total_value,
        return_percent: dto.return_percent,
    }
}

/// Row of `user_id`, if ranked.
pub fn find_user<'a>(entries: &'a [LeaderboardEntry], user_id: &str) -> Option<&'a LeaderboardEntry> {
    entries.iter().find(|e| e.user_id == user_id)
}

impl ApiClient {
    /// Ranked rows, rank 1 first. Cached like quotes.
    pub async fn get_leaderboard(&self, period: LeaderboardPeriod, limit: usize) -> Result<Vec<LeaderboardEntry>> {
        let limit = limit.clamp(1, MAX_LEADERBOARD_ROWS);
        let key = format!("{}:{}", period, limit);
        if let Some(entries) = self.leaderboards.get(&key) {
            return Ok(entries);
        }

        let dtos: Vec<LeaderboardEntryDto> = self
            .get_json(
                "/api/leaderboard",
                &[("period", period.as_str().to_string()), ("limit", limit.to_string())],
            )
            .await?;

        let mut entries: Vec<LeaderboardEntry> = dtos.into_iter().map(normalize_entry).collect();
        entries.sort_by_key(|e| e.rank);
        entries.truncate(limit);
        self.leaderboards.insert(key, entries.clone());
        Ok(entries)
    }
}
