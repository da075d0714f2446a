//! # Money
//!
//! Monetary amounts held as whole cents so that sums and per-pallet
//! multiplication stay exact. Values cross the wire as decimal numbers with
//! two places.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Number of decimal places carried by every amount
pub const DECIMAL_PLACES: u32 = 2;

const CENTS_PER_UNIT: i64 = 10_i64.pow(DECIMAL_PLACES);

/// Amount in the smallest unit (cents)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money {
    cents: i64,
}

impl Money {
    pub const ZERO: Money = Money { cents: 0 };

    /// Create an amount from cents
    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Create an amount from whole units (e.g. `Money::from_units(100)` is 100.00)
    pub const fn from_units(units: i64) -> Self {
        Self {
            cents: units * CENTS_PER_UNIT,
        }
    }

    /// Convert a decimal amount, rounding half away from zero to the nearest cent
    pub fn from_decimal(amount: f64) -> Self {
        Self {
            cents: (amount * CENTS_PER_UNIT as f64).round() as i64,
        }
    }

    /// Amount in cents
    pub const fn cents(&self) -> i64 {
        self.cents
    }

    /// Decimal amount (e.g. 450.0)
    pub fn as_decimal(&self) -> f64 {
        self.cents as f64 / CENTS_PER_UNIT as f64
    }

    pub fn is_negative(&self) -> bool {
        self.cents < 0
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.cents.checked_add(other.cents).map(Money::from_cents)
    }

    /// Multiply by a count (number of pallets)
    pub fn checked_mul(self, count: i64) -> Option<Money> {
        self.cents.checked_mul(count).map(Money::from_cents)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        let per_unit = CENTS_PER_UNIT as u64;
        write!(f, "{}{}.{:02}", sign, abs / per_unit, abs % per_unit)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_decimal())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        if !amount.is_finite() {
            return Err(serde::de::Error::custom("amount must be a finite number"));
        }
        Ok(Money::from_decimal(amount))
    }
}
