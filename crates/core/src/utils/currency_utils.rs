//! Helpers for ISO-4217-style currency codes.

use crate::errors::{Error, Result, ValidationError};

/// Trims and upper-cases a currency code.
pub fn normalize_currency(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Checks that `code` is a normalized three-letter currency code.
///
/// `field` names the offending input in the error message.
pub fn validate_currency(code: &str, field: &str) -> Result<()> {
    if code.is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            field.to_string(),
        )));
    }
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "{} must be a three-letter currency code, got '{}'",
            field, code
        ))));
    }
    Ok(())
}
