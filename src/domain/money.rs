//! Money type
//!
//! Currency primitive for purchase, sale and profit values.
//! Values are held as 2-decimal fixed point so that sums are exact and
//! independent of the order in which records are added.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;

/// Decimal places kept for currency values
pub const MONEY_SCALE: u32 = 2;

/// Money represents a currency value with exactly 2 decimal places.
///
/// Unlike a balance, money may be negative: a profit value is negative
/// when a product was sold below its purchase value.
///
/// # Example
/// ```
/// use rust_decimal::Decimal;
/// use stock_summary::domain::Money;
///
/// let price = Money::new(Decimal::new(12345, 3));
/// assert_eq!(price.to_string(), "12.35");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Money(Decimal);

/// Errors that can occur when parsing Money from text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyError {
    #[error("Invalid money format: {0}")]
    ParseError(String),
}

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Create Money, rounding to 2 decimal places (midpoint away from zero).
    pub fn new(value: Decimal) -> Self {
        let mut rounded = value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(MONEY_SCALE);
        Self(rounded)
    }

    /// Create Money from a whole currency amount.
    pub fn from_integer(value: i64) -> Self {
        Self::new(Decimal::from(value))
    }

    /// Create Money from minor units (cents).
    pub fn from_cents(cents: i64) -> Self {
        Self::new(Decimal::new(cents, MONEY_SCALE))
    }

    /// Get the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Add, or `None` when the sum leaves the `Decimal` range.
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Add, clamping at the `Decimal` bounds.
    pub fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }

    /// Subtract, clamping at the `Decimal` bounds.
    pub fn saturating_sub(self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decimal = Decimal::from_str(s.trim())
            .map_err(|e| MoneyError::ParseError(format!("{s}: {e}")))?;
        Ok(Money::new(decimal))
    }
}

impl TryFrom<String> for Money {
    type Error = MoneyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Money::from_str(&value)
    }
}

impl From<Money> for String {
    fn from(money: Money) -> Self {
        money.to_string()
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Money::new(value)
    }
}

// Operators saturate at the Decimal bounds.
impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        self.saturating_add(rhs)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.saturating_add(rhs);
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Self) -> Self::Output {
        self.saturating_sub(rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_rounds_to_cents() {
        assert_eq!(Money::new(dec!(10.005)).value(), dec!(10.01));
        assert_eq!(Money::new(dec!(10.004)).value(), dec!(10.00));
        assert_eq!(Money::new(dec!(-2.345)).value(), dec!(-2.35));
    }

    #[test]
    fn test_money_display_always_two_decimals() {
        assert_eq!(Money::from_integer(15).to_string(), "15.00");
        assert_eq!(Money::from_cents(705).to_string(), "7.05");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn test_money_from_str() {
        let money: Money = " 123.456 ".parse().unwrap();
        assert_eq!(money.value(), dec!(123.46));

        let err = "abc".parse::<Money>();
        assert!(matches!(err, Err(MoneyError::ParseError(_))));
    }

    #[test]
    fn test_money_negative_allowed() {
        let loss = Money::from_integer(4) - Money::from_integer(10);
        assert!(loss.is_negative());
        assert_eq!(loss.to_string(), "-6.00");
        assert!(!Money::ZERO.is_negative());
    }

    #[test]
    fn test_money_sum() {
        let values = [Money::from_cents(1050), Money::from_cents(250), Money::from_integer(-1)];
        let total: Money = values.iter().sum();
        assert_eq!(total, Money::from_integer(12));
    }

    #[test]
    fn test_money_addition_saturates() {
        let max = Money::new(Decimal::MAX);
        assert_eq!(max.checked_add(Money::from_integer(1)), None);
        assert_eq!(max.checked_add(Money::from_integer(-1)), Some(Money::new(Decimal::MAX - Decimal::ONE)));

        assert_eq!(max + max, max);
        assert_eq!(Money::new(Decimal::MIN) - max, Money::new(Decimal::MIN));

        let mut total = max;
        total += Money::from_cents(1);
        assert_eq!(total.value(), Decimal::MAX);
    }

    #[test]
    fn test_money_serde_as_string() {
        let json = serde_json::to_string(&Money::from_cents(2100)).unwrap();
        assert_eq!(json, "\"21.00\"");

        let back: Money = serde_json::from_str("\"6.5\"").unwrap();
        assert_eq!(back, Money::from_cents(650));
    }
}
