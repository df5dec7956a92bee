//! # Backend API Client Module
//!
//! HTTP client for the stock simulator backend.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs           - Module exports
//! ├── client.rs        - ApiClient transport (auth header, 401 side channel)
//! ├── envelope.rs      - {success, data, error} unwrapping and error coalescing
//! ├── normalize.rs     - Wire date parsing
//! ├── stocks.rs        - Market table, detail, history, search, status
//! ├── portfolio.rs     - Portfolio, transactions, performance, trades
//! ├── watchlist.rs     - Watchlist
//! ├── achievements.rs  - Achievements
//! ├── events.rs        - Market news
//! ├── settings.rs      - Settings and account reset
//! ├── leaderboard.rs   - Leaderboard
//! └── navigation.rs    - Navigation menu
//! ```
//!
//! Every service follows the same three steps: transport, envelope
//! unwrapping, then its own normalizer (field renames, date parsing, derived
//! values).

pub mod achievements;
pub mod client;
pub mod envelope;
pub mod events;
pub mod leaderboard;
pub mod navigation;
pub mod normalize;
pub mod portfolio;
pub mod settings;
pub mod stocks;
pub mod watchlist;

pub use achievements::*;
pub use client::ApiClient;
pub use events::*;
pub use leaderboard::*;
pub use navigation::*;
pub use portfolio::*;
pub use settings::*;
pub use stocks::*;
pub use watchlist::*;
