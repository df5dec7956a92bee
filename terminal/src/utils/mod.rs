//! # Utility Functions
//!
//! Shared utility functions used across the terminal client.
//!
//! ## Modules
//!
//! - **[`format`]**: Money, percentage and date formatting
//! - **[`validation`]**: Input validation (share counts, symbols, display names)
//!
//! ## Related Modules
//!
//! - [`shared::utils`]: Cross-crate utilities (symbol normalization)
//! - [`crate::core`]: Core abstractions and error types

pub mod format;
pub mod validation;

pub use format::*;
pub use validation::*;
