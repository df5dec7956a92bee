//! Date parsing shared by the per-service normalizers.
//!
//! Wire dates arrive as RFC 3339 strings most of the time, but some endpoints
//! send naive timestamps, bare dates or unix epochs. Naive values are UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::core::error::{ApiError, INVALID_DATE};

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Epoch values above this are milliseconds.
const EPOCH_MILLIS_THRESHOLD: i64 = 100_000_000_000;

fn parse_any(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if raw.bytes().all(|b| b.is_ascii_digit()) {
        let n: i64 = raw.parse().ok()?;
        return if n > EPOCH_MILLIS_THRESHOLD {
            Utc.timestamp_millis_opt(n).single()
        } else {
            Utc.timestamp_opt(n, 0).single()
        };
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Parse a required date field; `field` names it in the error.
pub fn parse_date(field: &str, raw: &str) -> Result<DateTime<Utc>, ApiError> {
    parse_any(raw).ok_or_else(|| {
        ApiError::new(INVALID_DATE, format!("Field '{}' has an invalid date: '{}'", field, raw))
    })
}

/// Parse an optional date field. Unparseable values are dropped.
pub fn parse_optional_date(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?;
    let parsed = parse_any(raw);
    if parsed.is_none() {
        tracing::debug!(value = %raw, "Ignoring unparseable optional date");
    }
    parsed
}
