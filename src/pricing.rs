//! Pricing
//!
//! Totals are accumulated in [`Decimal`] at full precision. Conversion to [`Money`] (and the
//! rounding to minor units that comes with it) only happens when a value is presented.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use thiserror::Error;

/// Errors that can occur while calculating prices.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// A multiplication or sum exceeded the decimal range.
    #[error("arithmetic overflow while calculating a total")]
    Overflow,

    /// The amount does not fit into the minor units of its currency.
    #[error("amount {0} cannot be represented in minor units")]
    NotRepresentable(Decimal),
}

/// Minor units per major unit. Every supported currency has two decimal places.
const MINOR_UNITS: i64 = 100;

/// Look up a supported ISO currency by its alphabetic code.
pub fn currency_from_code(code: &str) -> Option<&'static Currency> {
    match code {
        "GBP" => Some(GBP),
        "USD" => Some(USD),
        "EUR" => Some(EUR),
        _ => None,
    }
}

/// Calculates `price × quantity`.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the product does not fit in a [`Decimal`].
pub fn line_total(price: Decimal, quantity: u32) -> Result<Decimal, PricingError> {
    price
        .checked_mul(Decimal::from(quantity))
        .ok_or(PricingError::Overflow)
}

/// Sums `price × quantity` over a sequence of lines.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if any intermediate value leaves the [`Decimal`] range.
pub fn total_price(lines: impl IntoIterator<Item = (Decimal, u32)>) -> Result<Decimal, PricingError> {
    lines
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, (price, quantity)| {
            acc.checked_add(line_total(price, quantity)?)
                .ok_or(PricingError::Overflow)
        })
}

/// Rounds an amount to minor units (half away from zero) and wraps it as [`Money`].
///
/// # Errors
///
/// Returns [`PricingError::NotRepresentable`] if the amount overflows `i64` minor units.
pub fn to_money(
    amount: Decimal,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, PricingError> {
    let minor_units = amount
        .checked_mul(Decimal::from(MINOR_UNITS))
        .map(|value| value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|value| value.to_i64())
        .ok_or(PricingError::NotRepresentable(amount))?;

    Ok(Money::from_minor(minor_units, currency))
}
