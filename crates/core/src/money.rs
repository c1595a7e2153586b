//! Exact fixed-point monetary value.
//!
//! `Money` is a value object: immutable, compared by value, never floating
//! point. Line totals are rounded half-up at two decimal places, and the
//! rounding is applied exactly once per computed total.

use core::ops::Add;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Monetary amount with value semantics.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Fixed display/rounding scale: two decimal places.
    pub const SCALE: u32 = 2;

    pub const ZERO: Money = Money(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Whole currency units (no fractional part).
    pub fn from_major(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let amount = Decimal::from_str(s)
            .map_err(|e| DomainError::validation(format!("money: {e}")))?;
        Ok(Self(amount))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn mul_quantity(&self, quantity: u32) -> Money {
        Self(self.0 * Decimal::from(quantity))
    }

    pub fn apply_rate(&self, rate: Decimal) -> Money {
        Self(self.0 * rate)
    }

    /// Round half-up (midpoint away from zero) to [`Money::SCALE`] decimals.
    pub fn rounded(&self) -> Money {
        Self(
            self.0
                .round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl core::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.rounded().0, f)
    }
}
