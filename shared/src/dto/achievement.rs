//! # Achievement Data Transfer Objects
//!
//! - `GET /api/achievements/{user}` - list of [`AchievementDto`]

use serde::{Deserialize, Serialize};

use super::de::string_or_number;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AchievementDto {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(alias = "title")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default, alias = "isUnlocked", alias = "is_unlocked")]
    pub unlocked: bool,
    #[serde(default, alias = "unlockedAt")]
    pub unlocked_at: Option<String>,
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default, alias = "goal")]
    pub target: Option<f64>,
}
