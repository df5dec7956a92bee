//! # StockSim Terminal Client - Library Root
//!
//! A command-line client for a simulated stock market. Browse quotes, trade
//! against a fictional portfolio, keep a watchlist and compare returns on
//! the leaderboard. All pricing and bookkeeping happens in the simulator
//! backend; this crate consumes its REST API and renders the results.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              stocksim (this crate)                     │
//! ├────────────────────────────────────────────────────────┤
//! │  clap          - Command-line parsing                  │
//! │  Tokio         - Async runtime, ticker intervals       │
//! │  Reqwest       - HTTP client                           │
//! │  tracing       - Structured logging to file + stderr   │
//! └────────────────────────────────────────────────────────┘
//!          │ HTTP/JSON                   │
//!          ▼                             ▼
//! ┌─────────────────┐          ┌─────────────────────────┐
//! │  Simulator API  │          │  <data_dir>/storage.json│
//! │  /api/*         │          │  user, authToken, ...   │
//! └─────────────────┘          └─────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - **app**: command handlers, session, navigation menu, price ticker
//! - **config**: environment + CLI configuration
//! - **core**: error types and the [`MarketApi`] service trait
//! - **debug**: logging setup
//! - **services**: backend API client, TTL cache, local key/value store
//! - **ui**: text tables and page renderers
//! - **utils**: formatting and input validation
//!
//! ## Request Pipeline
//!
//! Every backend call goes through the same steps:
//!
//! 1. `ApiClient` adds `Authorization: Bearer <authToken>` when a token is stored
//! 2. the response envelope `{success, data, error}` is unwrapped, or the bare
//!    body is used when there is no envelope
//! 3. error bodies of any shape are coalesced into [`ApiError`]
//! 4. a 401 stores `loginUrl`, emits [`AppEvent::LoginRequired`] and returns
//!    [`AppError::LoginRequired`]
//! 5. the service's normalizer renames fields and parses dates
//!
//! ## Usage
//!
//! ```bash
//! stocksim stocks --sort change
//! stocksim buy AAPL 10
//! stocksim portfolio
//! ```

pub mod app;
pub mod config;
pub mod core;
pub mod debug;
pub mod services;
pub mod ui;
pub mod utils;

pub use app::{App, AppEvent, Session};
pub use config::ClientConfig;
pub use self::core::{ApiError, AppError, MarketApi, Result};
pub use services::api::ApiClient;
