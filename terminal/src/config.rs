//! # Client Configuration
//!
//! Configuration is read from environment variables and can be overridden by
//! command-line flags. It is validated once at startup so a bad URL fails
//! before the first request.
//!
//! | Variable | Default |
//! |---|---|
//! | `STOCKSIM_API_URL` | `http://127.0.0.1:3001` |
//! | `STOCKSIM_LOGIN_URL` | `<api url>/login` |
//! | `STOCKSIM_TIMEOUT_SECS` | `10` |
//! | `STOCKSIM_CACHE_TTL_SECS` | `5` |
//! | `STOCKSIM_DATA_DIR` | `.stocksim` |
//! | `STOCKSIM_LOG_DIR` | `<data dir>/logs` |

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::error::{AppError, Result};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3001";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CACHE_TTL_SECS: u64 = 5;
const DEFAULT_DATA_DIR: &str = ".stocksim";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL, without trailing slash
    pub api_url: String,
    /// Where a 401 sends the user when the backend does not say
    pub login_url: String,
    pub timeout: Duration,
    /// Lifetime of cached stock quotes
    pub cache_ttl: Duration,
    /// Holds `storage.json`
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::with_api_url(DEFAULT_API_URL)
    }
}

impl ClientConfig {
    /// Defaults pointed at `api_url`.
    pub fn with_api_url(api_url: &str) -> Self {
        let api_url = api_url.trim_end_matches('/').to_string();
        let data_dir = PathBuf::from(DEFAULT_DATA_DIR);
        Self {
            login_url: format!("{}/login", api_url),
            api_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            log_dir: data_dir.join("logs"),
            data_dir,
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let api_url = env::var("STOCKSIM_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let mut config = Self::with_api_url(&api_url);

        if let Ok(login_url) = env::var("STOCKSIM_LOGIN_URL") {
            config.login_url = login_url;
        }
        if let Some(secs) = parse_env_secs("STOCKSIM_TIMEOUT_SECS")? {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_env_secs("STOCKSIM_CACHE_TTL_SECS")? {
            config.cache_ttl = Duration::from_secs(secs);
        }
        if let Ok(dir) = env::var("STOCKSIM_DATA_DIR") {
            config.set_data_dir(PathBuf::from(dir));
        }
        if let Ok(dir) = env::var("STOCKSIM_LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    /// Point the client at another backend, keeping the login URL in step
    /// when it was derived from the old one.
    pub fn set_api_url(&mut self, api_url: &str) {
        let api_url = api_url.trim_end_matches('/').to_string();
        if self.login_url == format!("{}/login", self.api_url) {
            self.login_url = format!("{}/login", api_url);
        }
        self.api_url = api_url;
    }

    /// Move the data directory; the log directory follows if it was the default.
    pub fn set_data_dir(&mut self, data_dir: PathBuf) {
        if self.log_dir == self.data_dir.join("logs") {
            self.log_dir = data_dir.join("logs");
        }
        self.data_dir = data_dir;
    }

    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join("storage.json")
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        validate_http_url("api url", &self.api_url)?;
        validate_http_url("login url", &self.login_url)?;
        if self.timeout.is_zero() {
            return Err(AppError::Config("timeout must be greater than 0".to_string()));
        }
        Ok(())
    }
}

fn parse_env_secs(name: &'static str) -> Result<Option<u64>> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|e| AppError::Config(format!("{} must be a whole number of seconds: {}", name, e))),
        Err(_) => Ok(None),
    }
}

fn validate_http_url(what: &str, url: &str) -> Result<()> {
    if url.trim().is_empty() {
        return Err(AppError::Config(format!("{} cannot be empty", what)));
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(AppError::Config(format!(
            "{} must start with http:// or https:// (got {})",
            what, url
        )));
    }
    Ok(())
}
