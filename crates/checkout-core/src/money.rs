//! # Monetary Amounts
//!
//! Decimal-string amount handling shared by both provider adapters.
//!
//! PayPal's wire format carries amounts as decimal strings ("4.99"); Stripe's
//! carries integer minor units (499). `to_minor_units` is the single
//! conversion point used by both the billing and display paths, so the two
//! can never drift apart by a rounding difference.

use crate::error::{CheckoutError, CheckoutResult};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Parse a decimal price string ("4.99") into an exact decimal.
pub fn parse_amount(value: &str) -> CheckoutResult<Decimal> {
    value
        .trim()
        .parse::<Decimal>()
        .map_err(|_| CheckoutError::InvalidAmount(value.to_string()))
}

/// Line total as a decimal string: `unit_price × quantity`.
///
/// The scale of the input is preserved, so "10.10" × 3 is "30.30",
/// never "30.3" or "30.299999".
pub fn line_total(unit_price: &str, quantity: u32) -> CheckoutResult<String> {
    let unit = parse_amount(unit_price)?;
    Ok((unit * Decimal::from(quantity)).to_string())
}

/// Convert a decimal price string into integer minor units (cents).
///
/// "4.99" yields exactly 499. Sub-cent fractions round half-up.
pub fn to_minor_units(value: &str) -> CheckoutResult<i64> {
    let amount = parse_amount(value)?;
    (amount * Decimal::from(100))
        .round()
        .to_i64()
        .ok_or_else(|| CheckoutError::InvalidAmount(value.to_string()))
}

/// Convert integer minor units back to a decimal amount (499 -> 4.99).
pub fn from_minor_units(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}
