//! DEX configuration.

use crate::domain::FeeRate;

/// Immutable parameters of a [`Dex`](crate::dex::Dex) instance.
///
/// Validation happens inside the component types: an invalid fee rate
/// cannot be constructed, so holding a `DexConfig` implies a usable
/// configuration.
///
/// # Examples
///
/// ```
/// use hydra_dex::config::DexConfig;
/// use hydra_dex::domain::FeeRate;
///
/// let five_bps = FeeRate::new(9995, 10_000).expect("valid rate");
/// let config = DexConfig::new(five_bps);
/// assert_eq!(config.fee(), five_bps);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DexConfig {
    fee: FeeRate,
}

impl DexConfig {
    /// Creates a configuration with the given per-hop swap fee.
    #[must_use]
    pub const fn new(fee: FeeRate) -> Self {
        Self { fee }
    }

    /// Returns the per-hop swap fee.
    #[must_use]
    pub const fn fee(&self) -> FeeRate {
        self.fee
    }
}
