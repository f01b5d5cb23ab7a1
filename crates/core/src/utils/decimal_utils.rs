use rust_decimal::Decimal;
use std::str::FromStr;

use crate::errors::{Result, ValidationError};

/// Parses a decimal string, accepting scientific notation as a fallback.
///
/// Stored amounts are always written by this engine, so a value that cannot be
/// parsed is reported instead of being silently replaced with zero.
pub fn parse_decimal(value_str: &str, field_name: &str) -> Result<Decimal> {
    match Decimal::from_str(value_str) {
        Ok(d) => Ok(d),
        Err(e_decimal) => Decimal::from_scientific(value_str).map_err(|e_scientific| {
            log::error!(
                "Failed to parse {} '{}': as Decimal (err: {}), and as scientific (err: {}).",
                field_name,
                value_str,
                e_decimal,
                e_scientific
            );
            ValidationError::DecimalParse(e_decimal).into()
        }),
    }
}

/// Like [`parse_decimal`] for nullable columns.
pub fn parse_optional_decimal(value: Option<&str>, field_name: &str) -> Result<Option<Decimal>> {
    value.map(|v| parse_decimal(v, field_name)).transpose()
}
