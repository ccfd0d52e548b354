//! Raw token amount with checked arithmetic.

use core::fmt;

use super::Rounding;

/// A raw token or share amount in the asset's smallest base unit.
///
/// `Amount` never interprets decimals; scaling is the concern of each
/// token's own contract. All `u128` values are valid amounts.
///
/// Arithmetic is checked: operations return `None` on overflow,
/// underflow, or division by zero instead of panicking, and division
/// always takes an explicit [`Rounding`] direction.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::{Amount, Rounding};
///
/// let a = Amount::new(10);
/// let b = Amount::new(3);
/// assert_eq!(a.checked_div(b, Rounding::Down), Some(Amount::new(3)));
/// assert_eq!(a.checked_div(b, Rounding::Up), Some(Amount::new(4)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// One base unit.
    pub const ONE: Self = Self(1);

    /// Creates a new `Amount` from a raw `u128` value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked multiplication. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_mul(self, other: Self) -> Option<Self> {
        match self.0.checked_mul(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked division with an explicit rounding direction.
    ///
    /// Returns `None` if `divisor` is zero. `Rounding::Up` cannot
    /// overflow: a non-zero remainder implies the quotient is below
    /// `u128::MAX`.
    #[must_use]
    pub const fn checked_div(self, divisor: Self, rounding: Rounding) -> Option<Self> {
        if divisor.0 == 0 {
            return None;
        }
        let quotient = self.0 / divisor.0;
        let remainder = self.0 % divisor.0;
        match rounding {
            Rounding::Down => Some(Self(quotient)),
            Rounding::Up => {
                if remainder == 0 {
                    Some(Self(quotient))
                } else {
                    Some(Self(quotient + 1))
                }
            }
        }
    }

    /// Checked `self × mul / div` in one step.
    ///
    /// Returns `None` if the intermediate product overflows or `div`
    /// is zero.
    #[must_use]
    pub const fn checked_mul_div(self, mul: Self, div: Self, rounding: Rounding) -> Option<Self> {
        match self.checked_mul(mul) {
            Some(product) => product.checked_div(div, rounding),
            None => None,
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
