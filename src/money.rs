//! Monetary value normalization.
//!
//! Extracted documents carry monetary fields as free-form text: thousands
//! separators, a stray dollar sign, surrounding whitespace, or nothing at all
//! when a box on the form was blank. This module normalizes all of those into
//! exact [`Decimal`] values. Binary floating point is never used for currency;
//! repeated additions of `f64` cents drift, `Decimal` does not.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

/// Parses a raw monetary field into an exact decimal amount.
///
/// Stripping rules, applied before parsing:
/// - surrounding whitespace is removed
/// - a single leading `$` is removed
/// - thousands separators (`,`) are removed
///
/// An empty or whitespace-only input normalizes to zero rather than failing,
/// matching how a blank box on a paper form is read. Anything that still does
/// not parse as a decimal number fails with [`EngineError::InvalidAmount`]
/// naming the field.
///
/// # Example
///
/// ```
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
/// use tax_return_engine::money;
///
/// let amount = money::parse("wages", " $12,345.67 ").unwrap();
/// assert_eq!(amount, Decimal::from_str("12345.67").unwrap());
/// assert_eq!(money::parse("wages", "").unwrap(), Decimal::ZERO);
/// assert!(money::parse("wages", "12x4").is_err());
/// ```
pub fn parse(field: &str, input: &str) -> EngineResult<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }

    let cleaned = trimmed.strip_prefix('$').unwrap_or(trimmed).replace(',', "");

    cleaned
        .parse::<Decimal>()
        .map_err(|_| EngineError::InvalidAmount {
            field: field.to_string(),
            value: input.to_string(),
        })
}

/// Parses an optional monetary field, treating `None` as zero.
///
/// Used for fields that are absent entirely when the corresponding document
/// was not submitted.
pub fn parse_optional(field: &str, input: Option<&str>) -> EngineResult<Decimal> {
    match input {
        Some(value) => parse(field, value),
        None => Ok(Decimal::ZERO),
    }
}

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at
/// exactly 0.005 are rounded up to 0.01 (away from zero).
///
/// # Example
///
/// ```
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
/// use tax_return_engine::money;
///
/// let rounded = money::round_half_up(Decimal::from_str("4016.005").unwrap());
/// assert_eq!(rounded, Decimal::from_str("4016.01").unwrap());
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_plain_number() {
        assert_eq!(parse("wages", "50000").unwrap(), dec("50000"));
    }

    #[test]
    fn test_parse_with_cents() {
        assert_eq!(parse("wages", "12345.67").unwrap(), dec("12345.67"));
    }

    #[test]
    fn test_parse_strips_thousands_separators() {
        assert_eq!(parse("wages", "12,345.67").unwrap(), dec("12345.67"));
    }

    #[test]
    fn test_parse_strips_dollar_sign_and_whitespace() {
        assert_eq!(parse("wages", "  $1,000.00  ").unwrap(), dec("1000.00"));
    }

    #[test]
    fn test_separator_variants_yield_identical_amount() {
        let with_separator = parse("wages", "12,345.67").unwrap();
        let without_separator = parse("wages", "12345.67").unwrap();
        assert_eq!(with_separator, without_separator);
    }

    #[test]
    fn test_empty_string_normalizes_to_zero() {
        assert_eq!(parse("wages", "").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_whitespace_only_normalizes_to_zero() {
        assert_eq!(parse("wages", "   ").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_none_normalizes_to_zero() {
        assert_eq!(parse_optional("wages", None).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_some_value_is_parsed() {
        assert_eq!(parse_optional("wages", Some("500")).unwrap(), dec("500"));
    }

    #[test]
    fn test_garbage_fails_with_invalid_amount() {
        let result = parse("interest_income", "12x4");
        match result.unwrap_err() {
            EngineError::InvalidAmount { field, value } => {
                assert_eq!(field, "interest_income");
                assert_eq!(value, "12x4");
            }
            other => panic!("Expected InvalidAmount, got {:?}", other),
        }
    }

    #[test]
    fn test_currency_word_noise_fails() {
        assert!(parse("wages", "50000 USD").is_err());
    }

    #[test]
    fn test_round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec("123.454")), dec("123.45"));
    }

    #[test]
    fn test_round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec("123.455")), dec("123.46"));
    }

    #[test]
    fn test_round_half_up_preserves_already_rounded_values() {
        assert_eq!(round_half_up(dec("123.45")), dec("123.45"));
    }

    #[test]
    fn test_round_half_up_handles_zero() {
        assert_eq!(round_half_up(Decimal::ZERO), dec("0.00"));
    }
}
