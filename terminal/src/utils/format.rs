//! # Formatting Utilities
//!
//! Money, percentage and date formatting for the text views.
//!
//! ## Functions
//!
//! - [`format_number`] - Format numbers with comma separators
//! - [`format_currency`] - Dollar amounts (`$1,234.56`)
//! - [`format_percentage`] - Signed percentage (`+1.23%`)
//! - [`format_change`] - Signed dollar change (`+$1.23`)
//! - [`format_compact`] - Large numbers (`1.2K`, `3.4M`)
//! - [`format_date`], [`format_datetime`], [`format_relative`] - Timestamps

use chrono::{DateTime, Utc};

/// Format a number with commas (e.g., 1234567.89 -> "1,234,567.89")
///
/// # Examples
///
/// ```rust
/// use stocksim::utils::format::format_number;
///
/// assert_eq!(format_number(1234567.89, 2), "1,234,567.89");
/// assert_eq!(format_number(-1234.5, 1), "-1,234.5");
/// ```
pub fn format_number(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.prec$}", value.abs(), prec = decimals);
    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((int, dec)) => (int, dec),
        None => (formatted.as_str(), ""),
    };

    let mut result = String::new();
    for (i, ch) in integer_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    let integer_with_commas: String = result.chars().rev().collect();

    // -0.00 prints without sign
    let sign = if value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };

    if decimal_part.is_empty() {
        format!("{}{}", sign, integer_with_commas)
    } else {
        format!("{}{}.{}", sign, integer_with_commas, decimal_part)
    }
}

/// Format a dollar amount (e.g., -1234.5 -> "-$1,234.50")
pub fn format_currency(value: f64) -> String {
    let body = format_number(value.abs(), 2);
    if value < 0.0 && body != "0.00" {
        format!("-${}", body)
    } else {
        format!("${}", body)
    }
}

/// Format percentage change with sign
pub fn format_percentage(pct: f64) -> String {
    let body = format!("{:.2}", pct.abs());
    if pct < 0.0 && body != "0.00" {
        format!("-{}%", body)
    } else {
        format!("+{}%", body)
    }
}

/// Format a price change with sign (e.g., 1.5 -> "+$1.50")
pub fn format_change(value: f64) -> String {
    let body = format_currency(value.abs());
    if value < 0.0 && body != "$0.00" {
        format!("-{}", body)
    } else {
        format!("+{}", body)
    }
}

/// Format large values with a K/M/B/T suffix (volume, market cap)
pub fn format_compact(value: f64) -> String {
    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };
    let (scaled, suffix) = if abs >= 1e12 {
        (abs / 1e12, "T")
    } else if abs >= 1e9 {
        (abs / 1e9, "B")
    } else if abs >= 1e6 {
        (abs / 1e6, "M")
    } else if abs >= 1e3 {
        (abs / 1e3, "K")
    } else {
        return format!("{}{}", sign, format_number(abs, 0));
    };
    format!("{}{:.1}{}", sign, scaled, suffix)
}

pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.format("%b %d, %Y").to_string()
}

pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%b %d, %Y %H:%M").to_string()
}

/// Age of `dt` relative to `now`; older than a week prints the date.
pub fn format_relative(dt: &DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - *dt).num_seconds();
    match secs {
        s if s < 60 => "just now".to_string(),
        s if s < 3_600 => format!("{}m ago", s / 60),
        s if s < 86_400 => format!("{}h ago", s / 3_600),
        s if s < 7 * 86_400 => format!("{}d ago", s / 86_400),
        _ => format_date(dt),
    }
}
