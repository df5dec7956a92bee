//! # Core Abstractions
//!
//! - **[`error`]**: Application error types (`AppError`, `ApiError`, `Result<T>`)
//! - **[`service`]**: The [`MarketApi`] trait used for dependency injection
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use stocksim::core::MarketApi;
//! use stocksim::services::api::ApiClient;
//!
//! fn wire(client: ApiClient) -> Arc<dyn MarketApi> {
//!     Arc::new(client)
//! }
//! ```

pub mod error;
pub mod service;

#[cfg(test)]
pub(crate) mod mock;

pub use error::{ApiError, AppError, Result};
pub use service::MarketApi;
