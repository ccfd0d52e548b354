//! Swap fee as an exact rational.

use core::fmt;

use crate::error::{DexError, Result};

/// The fraction of each hop's input that remains after the swap fee.
///
/// Stored as a numerator/denominator pair so fee math stays exact in
/// integer arithmetic: with the default `997/1000`, a hop keeps 99.7% of
/// the input in the pricing formula and the remaining 0.3% stays in the
/// pool as the fee.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::FeeRate;
///
/// let fee = FeeRate::new(997, 1000).expect("valid rate");
/// assert_eq!(fee.numerator(), 997);
/// assert_eq!(fee, FeeRate::DEFAULT);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeeRate {
    numerator: u128,
    denominator: u128,
}

impl FeeRate {
    /// The conventional 0.3% fee.
    pub const DEFAULT: Self = Self {
        numerator: 997,
        denominator: 1000,
    };

    /// Creates a validated `FeeRate`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidFee`] if the denominator is zero, the
    /// numerator is zero (a 100% fee makes every swap output zero), or
    /// the numerator exceeds the denominator (a negative fee).
    pub const fn new(numerator: u128, denominator: u128) -> Result<Self> {
        if denominator == 0 {
            return Err(DexError::InvalidFee("denominator must be non-zero"));
        }
        if numerator == 0 {
            return Err(DexError::InvalidFee("kept fraction must be non-zero"));
        }
        if numerator > denominator {
            return Err(DexError::InvalidFee(
                "kept fraction cannot exceed the whole",
            ));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Returns the kept-fraction numerator.
    #[must_use]
    pub const fn numerator(&self) -> u128 {
        self.numerator
    }

    /// Returns the kept-fraction denominator.
    #[must_use]
    pub const fn denominator(&self) -> u128 {
        self.denominator
    }

    /// Returns `true` if the rate charges no fee at all.
    #[must_use]
    pub const fn is_free(&self) -> bool {
        self.numerator == self.denominator
    }
}

impl Default for FeeRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for FeeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}
