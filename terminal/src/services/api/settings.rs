//! # Settings Endpoints
//!
//! Account settings plus the account reset action.

use shared::SettingsDto;
use std::fmt;
use std::str::FromStr;

use super::client::{user_path, ApiClient};
use super::stocks::TimeRange;
use crate::core::error::{AppError, Result};

pub const MIN_REFRESH_INTERVAL_SECS: u64 = 5;
pub const MAX_REFRESH_INTERVAL_SECS: u64 = 3600;
pub const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
    System,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
            Theme::System => "system",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            "system" | "auto" => Ok(Theme::System),
            other => Err(AppError::Validation(format!("Unknown theme '{}' (use dark, light or system)", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub display_name: Option<String>,
    /// ISO 4217, upper case
    pub currency: String,
    pub theme: Theme,
    pub notifications_enabled: bool,
    pub refresh_interval_secs: u64,
    pub default_chart_range: TimeRange,
}

impl Default for Settings {
    fn default() -> Self {
        normalize_settings(SettingsDto::default())
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if !(MIN_REFRESH_INTERVAL_SECS..=MAX_REFRESH_INTERVAL_SECS).contains(&self.refresh_interval_secs) {
            return Err(AppError::Validation(format!(
                "Refresh interval must be between {} and {} seconds",
                MIN_REFRESH_INTERVAL_SECS, MAX_REFRESH_INTERVAL_SECS
            )));
        }
        if !is_currency_code(&self.currency) {
            return Err(AppError::Validation(format!(
                "Currency must be a 3-letter code (got '{}')",
                self.currency
            )));
        }
        if let Some(name) = &self.display_name {
            crate::utils::validation::validate_display_name(name).into_result()?;
        }
        Ok(())
    }
}

fn is_currency_code(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase())
}

/// Values the backend sends that this client does not know fall back to defaults.
fn normalize_settings(dto: SettingsDto) -> Settings {
    let currency = dto.currency.trim().to_ascii_uppercase();
    Settings {
        display_name: dto.display_name.filter(|n| !n.trim().is_empty()),
        currency: if is_currency_code(&currency) {
            currency
        } else {
            DEFAULT_CURRENCY.to_string()
        },
        theme: dto.theme.parse().unwrap_or_default(),
        notifications_enabled: dto.notifications_enabled,
        refresh_interval_secs: dto
            .refresh_interval_secs
            .clamp(MIN_REFRESH_INTERVAL_SECS, MAX_REFRESH_INTERVAL_SECS),
        default_chart_range: dto.default_chart_range.parse().unwrap_or_default(),
    }
}

fn to_dto(settings: &Settings) -> SettingsDto {
    SettingsDto {
        display_name: settings.display_name.clone(),
        currency: settings.currency.clone(),
        theme: settings.theme.as_str().to_string(),
        notifications_enabled: settings.notifications_enabled,
        refresh_interval_secs: settings.refresh_interval_secs,
        default_chart_range: settings.default_chart_range.as_str().to_string(),
    }
}

impl ApiClient {
    pub async fn get_settings(&self, user_id: &str) -> Result<Settings> {
        let user = user_path(user_id)?;
        let dto: SettingsDto = self.get_json(&format!("/api/settings/{}", user), &[]).await?;
        Ok(normalize_settings(dto))
    }

    /// Validate and save; returns what the backend stored.
    #[tracing::instrument(skip(self, settings))]
    pub async fn update_settings(&self, user_id: &str, settings: &Settings) -> Result<Settings> {
        let user = user_path(user_id)?;
        settings.validate()?;
        let dto: SettingsDto = self
            .put_json(&format!("/api/settings/{}", user), &to_dto(settings))
            .await?;
        tracing::info!("Settings updated");
        Ok(normalize_settings(dto))
    }

    /// Reset the simulated account to its starting cash.
    #[tracing::instrument(skip(self))]
    pub async fn reset_account(&self, user_id: &str) -> Result<()> {
        let user = user_path(user_id)?;
        self.post_ack(&format!("/api/settings/{}/reset", user), &serde_json::json!({}))
            .await?;
        self.invalidate_caches();
        tracing::info!("Account reset");
        Ok(())
    }
}
