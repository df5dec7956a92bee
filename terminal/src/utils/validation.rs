//! Validation utilities for user input

use crate::core::error::{AppError, Result};

pub const MAX_SHARES_PER_TRADE: u64 = 10_000;

pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
        }
    }

    pub fn into_result(self) -> Result<()> {
        match self.error {
            Some(message) if !self.is_valid => Err(AppError::Validation(message)),
            _ => Ok(()),
        }
    }
}

/// Parse a share count typed by the user
pub fn validate_share_count(input: &str) -> Result<u64> {
    let input = input.trim();
    if input.is_empty() {
        return Err(AppError::Validation("Share count is required".to_string()));
    }
    let shares: u64 = input
        .parse()
        .map_err(|_| AppError::Validation(format!("'{}' is not a whole number of shares", input)))?;
    validate_share_bounds(shares)?;
    Ok(shares)
}

pub fn validate_share_bounds(shares: u64) -> Result<()> {
    if shares == 0 {
        return Err(AppError::Validation("Share count must be at least 1".to_string()));
    }
    if shares > MAX_SHARES_PER_TRADE {
        return Err(AppError::Validation(format!(
            "Cannot trade more than {} shares at once",
            MAX_SHARES_PER_TRADE
        )));
    }
    Ok(())
}

/// Validate a purchase against available cash
pub fn validate_buy(shares: u64, price: f64, cash: f64) -> ValidationResult {
    if let Err(e) = validate_share_bounds(shares) {
        return ValidationResult::err(e.to_string());
    }
    if !price.is_finite() || price <= 0.0 {
        return ValidationResult::err("Price is not available");
    }

    let cost = shares as f64 * price;
    if cost > cash {
        return ValidationResult::err(format!(
            "Insufficient funds: need {}, have {}",
            super::format::format_currency(cost),
            super::format::format_currency(cash)
        ));
    }

    ValidationResult::ok()
}

/// Validate a sale against the shares held
pub fn validate_sell(shares: u64, held: u64) -> ValidationResult {
    if let Err(e) = validate_share_bounds(shares) {
        return ValidationResult::err(e.to_string());
    }
    if held == 0 {
        return ValidationResult::err("You do not own this stock");
    }
    if shares > held {
        return ValidationResult::err(format!("Insufficient shares: you hold {}", held));
    }

    ValidationResult::ok()
}

/// Validate a ticker symbol, returning it upper-cased
pub fn validate_symbol(input: &str) -> Result<String> {
    let symbol = shared::normalize_symbol(input);
    if symbol.is_empty() {
        return Err(AppError::Validation("Symbol is required".to_string()));
    }

    let (base, class) = match symbol.split_once('.') {
        Some((base, class)) => (base, Some(class)),
        None => (symbol.as_str(), None),
    };
    let base_ok = (1..=5).contains(&base.len()) && base.chars().all(|c| c.is_ascii_uppercase());
    let class_ok = class.map_or(true, |c| c.len() == 1 && c.chars().all(|c| c.is_ascii_uppercase()));
    if !base_ok || !class_ok {
        return Err(AppError::Validation(format!("Invalid symbol '{}'", input.trim())));
    }

    Ok(symbol)
}

/// Validate display name
pub fn validate_display_name(name: &str) -> ValidationResult {
    let name = name.trim();
    if name.is_empty() {
        return ValidationResult::err("Display name is required");
    }

    let len = name.chars().count();
    if len < 3 {
        return ValidationResult::err("Display name must be at least 3 characters");
    }

    if len > 20 {
        return ValidationResult::err("Display name must be at most 20 characters");
    }

    if !name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == ' ')
    {
        return ValidationResult::err("Display name can only contain letters, numbers, spaces, _ and -");
    }

    ValidationResult::ok()
}
