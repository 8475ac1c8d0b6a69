use std::str::FromStr;

use error_stack::report;
use rust_decimal::{prelude::FromPrimitive, Decimal, RoundingStrategy};

use crate::{
    errors::{CustomResult, ValidationError},
    types::MinorUnit,
};

pub(crate) fn missing_field_err(
    field_name: &'static str,
) -> impl Fn() -> error_stack::Report<ValidationError> {
    move || report!(ValidationError::MissingRequiredField { field_name })
}

/// Converts an amount in major units into minor units, rounding half away from zero.
pub fn to_minor_unit(amount: Decimal) -> CustomResult<MinorUnit, ValidationError> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|minor| minor.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|minor| i64::try_from(minor).ok())
        .map(MinorUnit::new)
        .ok_or_else(|| {
            report!(ValidationError::InvalidValue {
                message: format!("amount {amount} cannot be expressed in minor units"),
            })
        })
}

/// Converts an amount in minor units back into major units.
pub fn to_major_unit(amount: MinorUnit) -> Decimal {
    Decimal::from(amount.get_amount_as_i64()) / Decimal::ONE_HUNDRED
}

/// Reads a JSON number or numeric string, as the provider sends both.
pub(crate) fn decimal_from_value(value: &serde_json::Value) -> Option<Decimal> {
    match value {
        serde_json::Value::Number(number) => number
            .as_i64()
            .map(Decimal::from)
            .or_else(|| number.as_f64().and_then(Decimal::from_f64)),
        serde_json::Value::String(text) => {
            let text = text.trim();
            if text.is_empty() {
                None
            } else {
                Decimal::from_str(text).ok()
            }
        }
        _ => None,
    }
}

/// Takes at most `max_chars` characters, never splitting a character.
pub(crate) fn truncate_chars(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

pub(crate) trait OptionStringExt {
    /// The contained string, unless it is absent or empty.
    fn get_non_empty(&self) -> Option<&str>;
}

impl OptionStringExt for Option<String> {
    fn get_non_empty(&self) -> Option<&str> {
        self.as_deref().filter(|value| !value.is_empty())
    }
}
