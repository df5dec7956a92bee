//! # Achievement Endpoints

use chrono::{DateTime, Utc};
use shared::AchievementDto;

use super::client::{user_path, ApiClient};
use super::normalize::parse_optional_date;
use crate::core::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: Option<String>,
    pub unlocked: bool,
    pub unlocked_at: Option<DateTime<Utc>>,
    pub progress: Option<f64>,
    pub target: Option<f64>,
}

impl Achievement {
    /// Completion in percent, 0 to 100.
    pub fn completion_percent(&self) -> f64 {
        if self.unlocked {
            return 100.0;
        }
        match (self.progress, self.target) {
            (Some(progress), Some(target)) if target > 0.0 => (progress / target * 100.0).clamp(0.0, 100.0),
            _ => 0.0,
        }
    }
}

/// `(unlocked, total)`
pub fn unlocked_count(achievements: &[Achievement]) -> (usize, usize) {
    let unlocked = achievements.iter().filter(|a| a.unlocked).count();
    (unlocked, achievements.len())
}

fn normalize_achievement(dto: AchievementDto) -> Achievement {
    let unlocked_at = parse_optional_date(dto.unlocked_at.as_deref());
    Achievement {
        id: dto.id,
        name: dto.name,
        description: dto.description,
        icon: dto.icon,
        // Some endpoints only send the unlock date
        unlocked: dto.unlocked || unlocked_at.is_some(),
        unlocked_at,
        progress: dto.progress,
        target: dto.target,
    }
}

impl ApiClient {
    /// Unlocked achievements first, newest unlock first; locked ones keep backend order.
    pub async fn get_achievements(&self, user_id: &str) -> Result<Vec<Achievement>> {
        let user = user_path(user_id)?;
        let dtos: Vec<AchievementDto> = self.get_json(&format!("/api/achievements/{}", user), &[]).await?;
        let mut achievements: Vec<Achievement> = dtos.into_iter().map(normalize_achievement).collect();
        achievements.sort_by(|a, b| b.unlocked.cmp(&a.unlocked).then(b.unlocked_at.cmp(&a.unlocked_at)));
        Ok(achievements)
    }
}
