//! # Shared Utility Functions
//!
//! Helpers used by both the wire layer and its consumers.
//!
//! ```rust
//! use shared::utils::normalize_symbol;
//!
//! assert_eq!(normalize_symbol("  aapl "), "AAPL");
//! ```

/// Trim a ticker symbol and upper-case it.
///
/// Symbols are case-insensitive on the backend but are always displayed and
/// placed in URL paths in upper case.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_ascii_uppercase()
}

/// Shorten `text` to at most `max_chars` characters, ending with `...` when cut.
///
/// Counts characters, not bytes, so headlines with non-ASCII text never split
/// a code point.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars <= 3 {
        return text.chars().take(max_chars).collect();
    }
    let mut out: String = text.chars().take(max_chars - 3).collect();
    out.push_str("...");
    out
}
