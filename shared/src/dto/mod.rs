//! # Data Transfer Objects (DTOs)
//!
//! Data structures exchanged with the stock simulator backend over REST.
//!
//! ## Module Organization
//!
//! - [`envelope`] - Error body of the `{success, data, error}` envelope
//! - [`stock`] - Stock quotes, details, price history, market status
//! - [`portfolio`] - Portfolio, positions, transactions, trades, performance
//! - [`watchlist`] - Watchlist entries
//! - [`achievement`] - Achievements and progress
//! - [`event`] - Generated market news
//! - [`settings`] - Account settings
//! - [`leaderboard`] - Leaderboard rows
//! - [`navigation`] - Navigation menu items
//!
//! ## Example JSON Communication
//!
//! Enveloped success:
//!
//! ```text
//! GET /api/stocks/ACME
//!
//! { "success": true, "data": { "symbol": "ACME", "name": "Acme Corp", "currentPrice": 101.5 } }
//! ```
//!
//! Bare success (same endpoint family, no envelope):
//!
//! ```text
//! { "symbol": "ACME", "name": "Acme Corp", "current_price": 101.5 }
//! ```
//!
//! Error:
//!
//! ```text
//! { "success": false, "error": { "code": "INSUFFICIENT_FUNDS", "message": "Not enough cash" } }
//! ```

pub mod achievement;
pub mod de;
pub mod envelope;
pub mod event;
pub mod leaderboard;
pub mod navigation;
pub mod portfolio;
pub mod settings;
pub mod stock;
pub mod watchlist;

pub use achievement::*;
pub use envelope::*;
pub use event::*;
pub use leaderboard::*;
pub use navigation::*;
pub use portfolio::*;
pub use settings::*;
pub use stock::*;
pub use watchlist::*;
