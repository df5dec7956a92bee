//! # Settings Data Transfer Objects
//!
//! Settings travel both ways, so this DTO serializes camelCase and accepts
//! snake_case on input.
//!
//! - `GET /api/settings/{user}` - [`SettingsDto`]
//! - `PUT /api/settings/{user}` - [`SettingsDto`] → [`SettingsDto`]
//! - `POST /api/settings/{user}/reset` - acknowledgement

use serde::{Deserialize, Serialize};

fn default_currency() -> String {
    "USD".to_string()
}

fn default_theme() -> String {
    "dark".to_string()
}

fn default_true() -> bool {
    true
}

fn default_refresh_interval() -> u64 {
    30
}

fn default_chart_range() -> String {
    "1M".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SettingsDto {
    #[serde(default, alias = "display_name", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_true", alias = "notifications_enabled")]
    pub notifications_enabled: bool,
    #[serde(
        default = "default_refresh_interval",
        alias = "refresh_interval_secs",
        alias = "refreshInterval",
        alias = "refresh_interval"
    )]
    pub refresh_interval_secs: u64,
    #[serde(default = "default_chart_range", alias = "default_chart_range")]
    pub default_chart_range: String,
}

impl Default for SettingsDto {
    fn default() -> Self {
        Self {
            display_name: None,
            currency: default_currency(),
            theme: default_theme(),
            notifications_enabled: true,
            refresh_interval_secs: default_refresh_interval(),
            default_chart_range: default_chart_range(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults_from_empty_object() {
        let s: SettingsDto = serde_json::from_str("{}").unwrap();
        assert_eq!(s, SettingsDto::default());
    }

    #[test]
    fn test_settings_round_trip_casing() {
        let s: SettingsDto =
            serde_json::from_str(r#"{"display_name":"ann","refreshInterval":10,"theme":"light"}"#).unwrap();
        assert_eq!(s.display_name.as_deref(), Some("ann"));
        assert_eq!(s.refresh_interval_secs, 10);

        let out = serde_json::to_value(&s).unwrap();
        assert_eq!(out["displayName"], "ann");
        assert_eq!(out["refreshIntervalSecs"], 10);
        assert_eq!(out["notificationsEnabled"], true);
    }
}
