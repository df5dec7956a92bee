//! Logging configuration from environment variables

use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

pub const DEFAULT_LOG_FILTER: &str = "stocksim=info,warn";

/// Logging system configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log directory (for rotation)
    pub log_dir: PathBuf,
    /// Log file name prefix, rotated daily
    pub file_name: String,
    /// Log level filter for the file (e.g., "stocksim=debug,info")
    pub log_level: String,
    /// Level of the stderr layer
    pub stderr_level: LevelFilter,
    /// Write the file log as JSON lines
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from(".stocksim/logs"),
            file_name: "stocksim.log".to_string(),
            log_level: DEFAULT_LOG_FILTER.to_string(),
            stderr_level: LevelFilter::WARN,
            json: false,
        }
    }
}

impl LogConfig {
    /// Load configuration from environment variables
    pub fn from_env(log_dir: impl Into<PathBuf>, verbosity: u8) -> Self {
        Self {
            log_dir: log_dir.into(),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
            stderr_level: Self::level_for(verbosity),
            json: std::env::var("STOCKSIM_LOG_JSON")
                .map(|v| v == "1")
                .unwrap_or(false),
            ..Default::default()
        }
    }

    /// `-v` count to stderr level
    pub fn level_for(verbosity: u8) -> LevelFilter {
        match verbosity {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    /// Check if debug logging is enabled
    pub fn is_debug_enabled(&self) -> bool {
        self.log_level.contains("debug") || self.stderr_level >= LevelFilter::DEBUG
    }
}
