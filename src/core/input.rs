//! Parsing of user-typed numbers. Rejected input never reaches a store.

use crate::errors::{LedgerError, Result};

/// Parses a transaction or loan amount. Accepts a comma as decimal separator.
pub fn parse_amount(raw: &str) -> Result<f64> {
    let cleaned = raw.trim().replace(',', ".");
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => {
            tracing::warn!(input = raw, "rejected non-numeric amount");
            Err(LedgerError::InvalidInput(format!(
                "`{}` is not a valid amount",
                raw.trim()
            )))
        }
    }
}

/// Parses a spending ceiling; only positive values are accepted.
pub fn parse_limit(raw: &str) -> Result<f64> {
    let value = parse_amount(raw)?;
    validate_limit(value)
}

pub fn validate_limit(value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(LedgerError::InvalidInput(format!(
            "limit must be a positive number, got {value}"
        )))
    }
}
