//! # Common Error Types
//!
//! Consolidated error handling for the stock simulator client.
//!
//! ## Error Categories
//!
//! - **Api**: The backend answered with an error, or could not be reached.
//!   Carries a coalesced [`ApiError`] `{code, message, details}`.
//! - **LoginRequired**: The backend answered 401. The transport has already
//!   stored the login URL and notified listeners; this variant only tells the
//!   caller to stop.
//! - **Validation**: Client-side input checks (share counts, symbols, names).
//! - **Storage**: Local key/value store failures.
//! - **Config**: Invalid configuration.
//!
//! ## Usage Pattern
//!
//! ```rust
//! use stocksim::core::error::{AppError, Result};
//!
//! fn validate_shares(shares: u64) -> Result<u64> {
//!     if shares == 0 {
//!         return Err(AppError::Validation("Shares must be at least 1".to_string()));
//!     }
//!     Ok(shares)
//! }
//! ```

use serde_json::Value;
use thiserror::Error;

/// Error code for requests that never produced a response.
pub const CONNECTION_ERROR: &str = "CONNECTION_ERROR";
/// Error code used when the backend gives no code of its own.
pub const GENERIC_ERROR: &str = "ERROR";
/// Error code for date fields the normalizers could not parse.
pub const INVALID_DATE: &str = "INVALID_DATE";
/// Error code for bodies that do not match the expected shape.
pub const INVALID_RESPONSE: &str = "INVALID_RESPONSE";

/// Coalesced API failure, whatever shape the backend used to report it.
///
/// ```rust
/// use stocksim::core::error::ApiError;
///
/// let err = ApiError::new("INSUFFICIENT_FUNDS", "Not enough cash");
/// assert_eq!(err.to_string(), "[INSUFFICIENT_FUNDS] Not enough cash");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
#[error("[{code}] {message}")]
pub struct ApiError {
    pub code: String,
    pub message: String,
    pub details: Option<Value>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Request never reached the server or never got an answer.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::new(CONNECTION_ERROR, message)
    }

    pub fn generic(message: impl Into<String>) -> Self {
        Self::new(GENERIC_ERROR, message)
    }

    pub fn is_connection_error(&self) -> bool {
        self.code == CONNECTION_ERROR
    }
}

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Backend communication error (HTTP error status, envelope failure,
    /// network failure, unparseable body).
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// HTTP 401. The login URL has already been written to the local store
    /// and broadcast as [`crate::app::AppEvent::LoginRequired`].
    #[error("Login required: {login_url}")]
    LoginRequired { login_url: String },

    /// Input validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Local store read/write error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid configuration.
    #[error("Config error: {0}")]
    Config(String),
}

impl AppError {
    /// The API error code, when this is an API error.
    pub fn api_code(&self) -> Option<&str> {
        match self {
            AppError::Api(err) => Some(err.code.as_str()),
            _ => None,
        }
    }

    pub fn is_login_required(&self) -> bool {
        matches!(self, AppError::LoginRequired { .. })
    }
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}
