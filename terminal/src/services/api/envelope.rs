//! # Response Envelope
//!
//! The backend wraps some answers in `{success, data, error}` and sends others
//! bare. This module turns every body into either a typed value or an
//! [`ApiError`], whatever shape it arrived in.
//!
//! ## Success
//!
//! ```text
//! { "success": true, "data": T }   →  T
//! T                                →  T
//! ```
//!
//! A non-null `data` is authoritative: when it does not fit `T` the result is
//! `INVALID_RESPONSE`, never a decode of the surrounding envelope. The whole
//! body is only used when `data` is missing or null.
//!
//! ## Failure
//!
//! ```text
//! { "success": false, "error": { "code", "message", "details"? } }
//! { "error": "text" }
//! { "message": "text", "code"? }
//! anything else                    →  ERROR "Request failed with status code N"
//! ```
//!
//! Transport failures that never produced a response become
//! `CONNECTION_ERROR`; everything else is `ERROR`.
//!
//! Dates are NOT converted here. Each service normalizer does that for its
//! own entities.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use shared::ApiErrorBody;

use crate::core::error::{ApiError, GENERIC_ERROR, INVALID_RESPONSE};

/// Extract the payload of a successful body.
pub fn unwrap_data<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    if let Some(err) = envelope_failure(&body) {
        return Err(err);
    }

    if let Some(data) = body.get("data").filter(|data| !data.is_null()) {
        return T::deserialize(data).map_err(|e| invalid_shape(&e));
    }

    T::deserialize(&body).map_err(|e| invalid_shape(&e))
}

/// `Err` if the body is an explicit `{success: false}` envelope.
///
/// Used by acknowledgement-only endpoints whose payload is ignored.
pub fn check_success(body: &Value) -> Result<(), ApiError> {
    match envelope_failure(body) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn envelope_failure(body: &Value) -> Option<ApiError> {
    let map = body.as_object()?;
    if map.get("success").and_then(Value::as_bool) != Some(false) {
        return None;
    }
    Some(error_from_map(map).unwrap_or_else(|| ApiError::generic("Request failed")))
}

/// Coalesce an error body (any shape) returned with HTTP `status`.
pub fn error_from_body(status: u16, body: &Value) -> ApiError {
    let fallback = || ApiError::generic(format!("Request failed with status code {}", status));

    match body {
        Value::Object(map) => error_from_map(map).unwrap_or_else(fallback),
        Value::String(text) if !text.trim().is_empty() => ApiError::generic(text.trim()),
        _ => fallback(),
    }
}

fn error_from_map(map: &Map<String, Value>) -> Option<ApiError> {
    let top_code = map.get("code").and_then(scalar_text);
    let top_code = top_code.as_deref();

    match map.get("error") {
        Some(error @ Value::Object(_)) => {
            let body = ApiErrorBody::deserialize(error).unwrap_or_else(|_| ApiErrorBody {
                code: error.get("code").and_then(scalar_text),
                message: error.get("message").and_then(scalar_text),
                details: error.get("details").cloned(),
            });
            let code = body.code.unwrap_or_else(|| GENERIC_ERROR.to_string());
            let message = body.message.unwrap_or_else(|| "Unknown error".to_string());
            let mut err = ApiError::new(code, message);
            err.details = body.details.filter(|details| !details.is_null());
            Some(err)
        }
        Some(Value::String(text)) => Some(ApiError::new(top_code.unwrap_or(GENERIC_ERROR), text.clone())),
        _ => map
            .get("message")
            .and_then(Value::as_str)
            .map(|message| ApiError::new(top_code.unwrap_or(GENERIC_ERROR), message)),
    }
}

/// Map a `reqwest` failure.
pub fn error_from_transport(err: &reqwest::Error) -> ApiError {
    if err.is_builder() {
        return ApiError::generic(err.to_string());
    }
    if err.is_connect() || err.is_timeout() || err.is_request() {
        return ApiError::connection("Unable to connect to the server")
            .with_details(Value::String(err.to_string()));
    }
    ApiError::generic(err.to_string())
}

/// Login URL advertised by a 401 body, if any.
pub fn login_url_from_body(body: &Value) -> Option<String> {
    let candidates = [
        body.get("loginUrl"),
        body.get("login_url"),
        body.pointer("/error/details/loginUrl"),
        body.pointer("/error/details/login_url"),
        body.pointer("/data/loginUrl"),
    ];
    candidates
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .find(|url| !url.trim().is_empty())
        .map(str::to_string)
}

/// Text of a string or number field; anything else is ignored.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

pub(crate) fn invalid_shape(err: &serde_json::Error) -> ApiError {
    ApiError::new(INVALID_RESPONSE, format!("Unexpected response shape: {}", err))
}
