//! # Envelope Error Body
//!
//! Endpoints that use the envelope answer failures with
//!
//! ```json
//! { "success": false, "error": { "code": "NOT_FOUND", "message": "Unknown symbol", "details": {} } }
//! ```
//!
//! Older endpoints send `{ "error": "text" }` or `{ "message": "text" }` instead.
//! [`ApiErrorBody`] describes the structured shape only; coalescing the other
//! shapes happens client-side.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::de::opt_string_or_number;

/// Structured error object inside a failed envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiErrorBody {
    /// Some backends send the HTTP status as a numeric code.
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Body of `DELETE`/`POST` endpoints that only acknowledge.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AckResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}
