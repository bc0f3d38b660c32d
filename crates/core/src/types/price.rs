//! Money amounts and per-unit rates using decimal arithmetic.
//!
//! Milk is sold by the litre. A [`Rate`] is the price of one litre, an
//! [`Amount`] is a rupee value rounded to paise. Prices are always derived as
//! `quantity × rate` at display time and never stored next to the quantity.

use core::fmt;
use core::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Amount`] or [`Rate`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    /// The input string is empty.
    #[error("amount cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("amount must be a number")]
    NotANumber,
    /// The input is zero or negative.
    #[error("amount must be greater than zero")]
    NotPositive,
}

/// Currency symbol used for display.
pub const CURRENCY_SYMBOL: &str = "₹";

/// A rupee amount, always rounded to two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    /// Zero rupees.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create an amount, rounding half away from zero to paise.
    #[must_use]
    pub fn new(value: Decimal) -> Self {
        Self(round_money(value))
    }

    /// Parse a strictly positive amount from user input.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, not numeric, or not above zero.
    pub fn parse_positive(s: &str) -> Result<Self, AmountError> {
        parse_positive_decimal(s).map(Self::new)
    }

    /// Get the underlying decimal value.
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Lossy conversion for floating-point totals.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }

    /// Format for display (e.g., "₹800.00").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{CURRENCY_SYMBOL}{:.2}", self.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl core::ops::Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl core::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, a| acc + a)
    }
}

/// Price of one litre of milk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rate(Decimal);

impl Rate {
    /// Create a new rate.
    #[must_use]
    pub const fn new(per_unit: Decimal) -> Self {
        Self(per_unit)
    }

    /// Parse a strictly positive rate from user input.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, not numeric, or not above zero.
    pub fn parse_positive(s: &str) -> Result<Self, AmountError> {
        parse_positive_decimal(s).map(Self)
    }

    /// Get the per-unit value.
    #[must_use]
    pub const fn per_unit(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units at this rate.
    ///
    /// A product too large for a decimal prices at zero, like any other
    /// quantity that cannot be priced.
    #[must_use]
    pub fn price_for(&self, quantity: Decimal) -> Amount {
        quantity
            .checked_mul(self.0)
            .map_or(Amount::ZERO, Amount::new)
    }
}

impl From<i64> for Rate {
    fn from(per_unit: i64) -> Self {
        Self(Decimal::from(per_unit))
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl FromStr for Rate {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_positive(s)
    }
}

/// Price of a delivery: `quantity × rate`, rounded to two decimals.
///
/// The quantity arrives as user or backend text; anything that is not a
/// number prices at zero.
#[must_use]
pub fn price_for(quantity: &str, rate: Rate) -> Amount {
    Decimal::from_str(quantity.trim())
        .map_or(Amount::ZERO, |q| rate.price_for(q))
}

fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Parse a strictly positive decimal, accepting scientific-free plain input.
pub(crate) fn parse_positive_decimal(s: &str) -> Result<Decimal, AmountError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(AmountError::Empty);
    }
    let value = Decimal::from_str(s).map_err(|_| AmountError::NotANumber)?;
    if value <= Decimal::ZERO {
        return Err(AmountError::NotPositive);
    }
    Ok(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_price_rounds_to_paise() {
        let amount = price_for("12.5", Rate::from(64));
        assert_eq!(amount.display(), "₹800.00");
    }

    #[test]
    fn test_price_half_paisa_rounds_up() {
        let rate = Rate::new(Decimal::new(3333, 2)); // 33.33
        // 0.25 * 33.33 = 8.3325 -> 8.33
        assert_eq!(price_for("0.25", rate).to_string(), "8.33");
        // 0.5 * 33.33 = 16.665 -> 16.67
        assert_eq!(price_for("0.5", rate).to_string(), "16.67");
    }

    #[test]
    fn test_price_non_numeric_quantity_is_zero() {
        assert_eq!(price_for("abc", Rate::from(64)), Amount::ZERO);
        assert_eq!(price_for("", Rate::from(64)), Amount::ZERO);
    }

    #[test]
    fn test_price_overflowing_quantity_is_zero() {
        assert_eq!(
            price_for("79228162514264337593543950335", Rate::from(64)),
            Amount::ZERO
        );
        assert_eq!(Rate::from(64).price_for(Decimal::MAX), Amount::ZERO);
    }

    #[test]
    fn test_amount_sum_saturates() {
        let big = Amount::new(Decimal::MAX);
        assert_eq!((big + big).value(), Decimal::MAX);
    }

    #[test]
    fn test_parse_positive() {
        assert!(Amount::parse_positive("150").is_ok());
        assert_eq!(Amount::parse_positive(""), Err(AmountError::Empty));
        assert_eq!(Amount::parse_positive("ten"), Err(AmountError::NotANumber));
        assert_eq!(Amount::parse_positive("0"), Err(AmountError::NotPositive));
        assert_eq!(Amount::parse_positive("-5"), Err(AmountError::NotPositive));
    }

    #[test]
    fn test_amount_sum() {
        let total: Amount = [Amount::new(Decimal::new(1050, 2)), Amount::new(Decimal::new(25, 1))]
            .into_iter()
            .sum();
        assert_eq!(total.display(), "₹13.00");
    }

    #[test]
    fn test_rate_display_is_normalized() {
        let rate: Rate = "64.00".parse().unwrap();
        assert_eq!(rate.to_string(), "64");
    }
}
