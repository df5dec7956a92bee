//! # Application Events
//!
//! Event types for async task communication between background tasks and the main task.

use crate::services::api::Stock;

/// Async results and notices sent to the main task
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Backend answered 401; the user must sign in at `login_url`
    LoginRequired { login_url: String },
    /// Ticker fetched fresh quotes
    QuotesUpdated(Vec<Stock>),
    /// Ticker fetch failed; last quotes stay on screen
    RefreshFailed(String),
}
