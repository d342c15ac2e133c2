//! Monetary amount type.
//!
//! Uses `rust_decimal` internally so balances never accumulate
//! floating-point error. Values keep whatever precision they were entered
//! with and are displayed with two decimal places.

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A monetary amount.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use bank_sim::Money;
///
/// let amount = Money::from_str("10.5").unwrap();
/// assert_eq!(amount.to_string(), "10.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

impl Money {
    /// Number of decimal places shown when displaying.
    pub const DISPLAY_SCALE: usize = 2;

    /// Zero value.
    pub const ZERO: Self = Money(Decimal::ZERO);

    /// Creates an amount of whole currency units.
    pub fn whole(units: i64) -> Self {
        Money(Decimal::from(units))
    }

    /// Returns `true` if the amount is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Sum of both amounts, or `None` if it does not fit a `Decimal`.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Difference of both amounts, or `None` if it does not fit a `Decimal`.
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    /// Returns the underlying decimal.
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Money(value)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        // Operators may type a comma as the decimal separator.
        let normalized = s.trim().replace(',', ".");
        Ok(Money(Decimal::from_str(&normalized)?))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.*}", Self::DISPLAY_SCALE, self.0)
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
