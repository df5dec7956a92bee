//! # Logging Infrastructure
//!
//! File-based structured logging for the client.
//!
//! ## Features
//!
//! - **File-based logging**: `<data_dir>/logs/stocksim.log.YYYY-MM-DD` (daily rotation)
//! - **Stderr output**: level chosen with `-v`/`-vv`/`-vvv`
//! - **Panic logging**: panics are recorded with location and message
//!
//! ## Usage
//!
//! ```rust,no_run
//! use stocksim::debug::{self, LogConfig};
//!
//! let _guard = debug::init(&LogConfig::from_env(".stocksim/logs", 1));
//! tracing::info!(endpoint = "/api/stocks", duration_ms = 42, "API call completed");
//! ```
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: File log filter (default `stocksim=info,warn`)
//! - `STOCKSIM_LOG_DIR`: Log directory (default `<data_dir>/logs`)
//! - `STOCKSIM_LOG_JSON`: Write the file log as JSON lines (1=on)

pub mod config;
pub mod logger;

pub use config::LogConfig;
pub use logger::{init, LogGuard};
