//! # Shared Data Transfer Objects Library
//!
//! This library defines the wire contract between the stock simulator backend
//! and its clients. All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::envelope`]**: Error body shapes used by the `{success, data, error}` envelope
//!   - **[`dto::stock`]**: Stocks, price history and market status
//!   - **[`dto::portfolio`]**: Portfolio, positions, transactions and trades
//!   - **[`dto::watchlist`]**, **[`dto::achievement`]**, **[`dto::event`]**,
//!     **[`dto::settings`]**, **[`dto::leaderboard`]**, **[`dto::navigation`]**
//! - **[`utils`]**: Shared helpers (symbol normalization)
//!
//! ## Wire Format
//!
//! The backend is not consistent about field casing. Some endpoints answer in
//! snake_case, some in camelCase. Response DTOs therefore use snake_case Rust
//! field names and accept the camelCase spelling through `#[serde(alias)]`:
//!
//! ```rust
//! use shared::dto::stock::StockDto;
//!
//! let a: StockDto = serde_json::from_str(r#"{"symbol":"ACME","name":"Acme","price":10.0,"change_percent":1.5}"#).unwrap();
//! let b: StockDto = serde_json::from_str(r#"{"symbol":"ACME","name":"Acme","price":10.0,"changePercent":1.5}"#).unwrap();
//! assert_eq!(a.change_percent, b.change_percent);
//! ```
//!
//! Request DTOs serialize camelCase. Date fields stay `String` here; turning
//! them into `DateTime<Utc>` is the job of each client-side normalizer.

pub mod dto;
pub mod utils;

// Wildcard re-exports: shared is a DTO library where all exports are public API
pub use dto::*;
pub use utils::*;
