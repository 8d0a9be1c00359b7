//! Vietnamese Dong money type.
//!
//! All monetary values in the storefront are Vietnamese Dong: an integral
//! currency with no sub-unit fractions. `Vnd` normalizes to whole dong at
//! construction and renders the `vi-VN` convention (`250.000 ₫`) rather than
//! a generic `$`-style format.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul};

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// A non-negative amount of Vietnamese Dong.
///
/// Amounts are rounded to whole dong and clamped at zero when constructed.
/// Deserialization routes through [`Vnd::new`], so wire values carrying
/// fractions or negative signs are normalized at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(from = "Decimal", into = "Decimal")]
pub struct Vnd(Decimal);

impl From<Decimal> for Vnd {
    fn from(amount: Decimal) -> Self {
        Self::new(amount)
    }
}

impl From<Vnd> for Decimal {
    fn from(vnd: Vnd) -> Self {
        vnd.0
    }
}

impl Vnd {
    /// Zero dong.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create an amount from a decimal value, rounding to whole dong and
    /// clamping negatives to zero.
    #[must_use]
    pub fn new(amount: Decimal) -> Self {
        let whole = amount.round_dp(0);
        if whole.is_sign_negative() {
            Self(Decimal::ZERO)
        } else {
            Self(whole)
        }
    }

    /// Create an amount from a whole number of dong.
    #[must_use]
    pub fn from_dong(dong: i64) -> Self {
        Self::new(Decimal::from(dong))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether this amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Subtract, clamping at zero instead of going negative.
    #[must_use]
    pub fn saturating_sub(self, other: Self) -> Self {
        Self::new(self.0 - other.0)
    }
}

impl Add for Vnd {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Vnd {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Mul<u32> for Vnd {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self {
        Self(self.0 * Decimal::from(rhs))
    }
}

impl Sum for Vnd {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Vnd {
    /// Format per the `vi-VN` locale: thousands grouped with `.`, a
    /// non-breaking space, then the dong sign (`1.234.567 ₫`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dong = self.0.to_i128().unwrap_or_default();
        let digits = dong.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 3);
        let offset = digits.len() % 3;
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (i + 3 - offset) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }
        write!(f, "{grouped}\u{a0}\u{20ab}")
    }
}
