//! Type-safe price representation using decimal arithmetic.
//!
//! All menu prices are US dollars, so a `Price` carries only its amount.
//! Arithmetic stays in `Decimal` and is exact; rounding happens only when a
//! price is formatted for display.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price in dollars.
///
/// Serializes as a decimal string (`"8.99"`). Deserialization also accepts
/// JSON numbers, so carts written by older clients still load.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero dollars.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price from a decimal amount in dollars.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The amount in dollars.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns `true` if the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// The price of `quantity` units.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Format for display (e.g., "$19.99"), rounding half away from zero.
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("${rounded:.2}")
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        assert_eq!(Price::from_cents(899).amount(), Decimal::new(899, 2));
    }

    #[test]
    fn test_display_two_places() {
        assert_eq!(Price::from_cents(899).display(), "$8.99");
        assert_eq!(Price::new(Decimal::from(25)).display(), "$25.00");
        assert_eq!(Price::ZERO.display(), "$0.00");
    }

    #[test]
    fn test_display_rounds_extra_places() {
        assert_eq!(Price::new(Decimal::new(12_345, 3)).display(), "$12.35");
    }

    #[test]
    fn test_times_and_sum() {
        let total: Price = [Price::from_cents(1000).times(2), Price::from_cents(500)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::new(Decimal::from(25)));
    }

    #[test]
    fn test_is_negative() {
        assert!(Price::from_cents(-1).is_negative());
        assert!(!Price::ZERO.is_negative());
        assert!(!Price::from_cents(1).is_negative());
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&Price::from_cents(499)).unwrap();
        assert_eq!(json, "\"4.99\"");
    }

    #[test]
    fn test_deserializes_from_number_or_string() {
        let from_str: Price = serde_json::from_str("\"4.99\"").unwrap();
        let from_num: Price = serde_json::from_str("4.99").unwrap();
        assert_eq!(from_str, Price::from_cents(499));
        assert_eq!(from_num, Price::from_cents(499));
    }
}
