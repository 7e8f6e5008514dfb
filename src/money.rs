//! Currency amounts
//!
//! Prices and order amounts are held as [`Decimal`] so cart arithmetic stays
//! exact. The product API and checkout forms send amounts either as JSON
//! numbers or as numeric strings, so decoding goes through [`parse_decimal`]
//! instead of the `Decimal` deserializer.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{de::Error as _, Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

/// Number of decimal places shown for currency values.
pub const CURRENCY_SCALE: u32 = 2;

/// Rounds an amount to two decimal places, halves away from zero.
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Price times quantity, saturating at [`Decimal::MAX`].
pub fn line_amount(price: Decimal, quantity: u32) -> Decimal {
    price.saturating_mul(Decimal::from(quantity))
}

/// Sum of amounts, saturating at [`Decimal::MAX`].
pub fn sum_amounts(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Interprets a JSON number or numeric string as a decimal amount.
///
/// Returns `None` for anything else, including blank strings.
pub fn parse_decimal(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.trim().to_owned(),
        _ => return None,
    };

    if text.is_empty() {
        return None;
    }

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

/// Deserializes an optional, non-negative amount entered by a user.
///
/// `null`, a missing field and a blank string all mean "not provided". Any
/// other value must be a non-negative number.
pub fn deserialize_optional_amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;

    match &value {
        Value::Null => Ok(None),
        Value::String(text) if text.trim().is_empty() => Ok(None),
        _ => match parse_decimal(&value) {
            Some(amount) if amount >= Decimal::ZERO => Ok(Some(amount)),
            Some(amount) => Err(D::Error::custom(format!(
                "amount must not be negative, got {amount}"
            ))),
            None => Err(D::Error::custom(format!("invalid amount: {value}"))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_decimal_accepts_numbers_and_strings() {
        assert_eq!(parse_decimal(&json!(29.99)), Some(Decimal::new(2999, 2)));
        assert_eq!(parse_decimal(&json!("299.99")), Some(Decimal::new(29999, 2)));
        assert_eq!(parse_decimal(&json!(" 80 ")), Some(Decimal::from(80)));
        assert_eq!(parse_decimal(&json!(1e3)), Some(Decimal::from(1000)));
    }

    #[test]
    fn test_parse_decimal_rejects_other_values() {
        assert_eq!(parse_decimal(&json!("")), None);
        assert_eq!(parse_decimal(&json!("cheap")), None);
        assert_eq!(parse_decimal(&json!(null)), None);
        assert_eq!(parse_decimal(&json!([1])), None);
    }

    #[test]
    fn test_amounts_saturate_instead_of_overflowing() {
        assert_eq!(line_amount(Decimal::MAX, 2), Decimal::MAX);
        assert_eq!(line_amount(Decimal::new(2999, 2), 3), Decimal::new(8997, 2));
        assert_eq!(sum_amounts([Decimal::MAX, Decimal::ONE]), Decimal::MAX);
        assert_eq!(sum_amounts([]), Decimal::ZERO);
    }

    #[test]
    fn test_round_currency() {
        assert_eq!(round_currency(Decimal::new(12345, 3)), Decimal::new(1235, 2));
        assert_eq!(round_currency(Decimal::new(35997, 2)), Decimal::new(35997, 2));
    }
}
