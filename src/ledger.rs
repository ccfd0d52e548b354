//! Pool reserve ledger and system-asset registry.
//!
//! [`PoolLedger`] is the single owner of every pool's reserves. No other
//! component mutates reserves directly; the router and liquidity manager
//! go through [`PoolLedger::apply_delta`] and [`PoolLedger::apply_hops`],
//! both of which apply fully or not at all.
//!
//! # Reserve Invariant
//!
//! For every pool, both reserves are zero (the pool has never been
//! funded) or both are strictly positive. Across a fee-bearing swap the
//! product `reserve_a × reserve_b` never decreases, because the fee
//! portion of the input stays in the pool.

use std::collections::BTreeMap;

use crate::domain::{Amount, TokenId, TokenPair};
use crate::error::{DexError, Result};

/// Descriptive metadata recorded when an asset is registered.
///
/// The symbol and name feed liquidity-token naming; the DEX core
/// attaches no other meaning to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetInfo {
    symbol: String,
    name: String,
}

impl AssetInfo {
    /// Returns the asset's ticker-style symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Returns the asset's human-readable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Reserve balances of one pool, in the pair's canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolReserves {
    reserve_a: Amount,
    reserve_b: Amount,
}

impl PoolReserves {
    /// Returns the reserve of the pair's first (lower-ordered) token.
    #[must_use]
    pub const fn reserve_a(&self) -> Amount {
        self.reserve_a
    }

    /// Returns the reserve of the pair's second token.
    #[must_use]
    pub const fn reserve_b(&self) -> Amount {
        self.reserve_b
    }

    /// Returns `true` if the pool has never been funded or was fully
    /// drained.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.reserve_a.is_zero() && self.reserve_b.is_zero()
    }
}

/// A signed adjustment to one side of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReserveDelta {
    /// Increase the reserve.
    Credit(Amount),
    /// Decrease the reserve.
    Debit(Amount),
}

impl ReserveDelta {
    /// Applies the delta to a reserve value.
    ///
    /// # Errors
    ///
    /// - [`DexError::Overflow`] if a credit exceeds `u128::MAX`.
    /// - [`DexError::InsufficientReserve`] if a debit underflows.
    pub fn apply_to(self, reserve: Amount) -> Result<Amount> {
        match self {
            Self::Credit(amount) => reserve
                .checked_add(amount)
                .ok_or(DexError::Overflow("reserve credit")),
            Self::Debit(amount) => reserve
                .checked_sub(amount)
                .ok_or(DexError::InsufficientReserve),
        }
    }
}

/// One executed hop of a multi-hop swap: the input token's reserve grows
/// by `amount_in` while the output token's reserve shrinks by
/// `amount_out`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HopDelta {
    /// Token supplied into the hop's pool.
    pub token_in: TokenId,
    /// Token taken out of the hop's pool.
    pub token_out: TokenId,
    /// Amount added to the input-side reserve.
    pub amount_in: Amount,
    /// Amount removed from the output-side reserve.
    pub amount_out: Amount,
}

/// Owner of all pool reserves and the registered-asset set.
///
/// Pools are keyed by canonical [`TokenPair`], so `(A, B)` and `(B, A)`
/// name the same pool. A pair with no liquidity reads as `(0, 0)`; a
/// pool comes into being on its first deposit.
#[derive(Debug, Clone, Default)]
pub struct PoolLedger {
    assets: BTreeMap<TokenId, AssetInfo>,
    pools: BTreeMap<TokenPair, PoolReserves>,
}

impl PoolLedger {
    /// Creates an empty ledger with no registered assets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `id` as a system asset.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::AssetAlreadyRegistered`] on a duplicate.
    pub fn register_asset(&mut self, id: TokenId, symbol: &str, name: &str) -> Result<()> {
        if self.assets.contains_key(&id) {
            return Err(DexError::AssetAlreadyRegistered(id));
        }
        self.assets.insert(
            id,
            AssetInfo {
                symbol: symbol.to_owned(),
                name: name.to_owned(),
            },
        );
        Ok(())
    }

    /// Returns `true` if `id` is a registered system asset.
    #[must_use]
    pub fn is_registered(&self, id: TokenId) -> bool {
        self.assets.contains_key(&id)
    }

    /// Fails unless `id` is a registered system asset.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::UnknownToken`] otherwise.
    pub fn ensure_registered(&self, id: TokenId) -> Result<()> {
        if self.is_registered(id) {
            Ok(())
        } else {
            Err(DexError::UnknownToken(id))
        }
    }

    /// Returns the metadata recorded for a registered asset.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::UnknownToken`] for an unregistered id.
    pub fn asset_info(&self, id: TokenId) -> Result<&AssetInfo> {
        self.assets.get(&id).ok_or(DexError::UnknownToken(id))
    }

    /// Returns the pool reserves oriented to the caller's argument
    /// order: the first returned amount is `token_a`'s reserve.
    ///
    /// A registered pair that has never been funded reads as `(0, 0)`;
    /// that is not an error.
    ///
    /// # Errors
    ///
    /// - [`DexError::UnknownToken`] if either token is unregistered.
    /// - [`DexError::IdenticalTokens`] if both handles are equal.
    pub fn get_pool(&self, token_a: TokenId, token_b: TokenId) -> Result<(Amount, Amount)> {
        self.ensure_registered(token_a)?;
        self.ensure_registered(token_b)?;
        let pair = TokenPair::new(token_a, token_b)?;
        let reserves = self.reserves(&pair);
        if token_a == pair.first() {
            Ok((reserves.reserve_a, reserves.reserve_b))
        } else {
            Ok((reserves.reserve_b, reserves.reserve_a))
        }
    }

    /// Returns the stored reserves for a pair, `(0, 0)` if unfunded.
    #[must_use]
    pub fn reserves(&self, pair: &TokenPair) -> PoolReserves {
        self.pools.get(pair).copied().unwrap_or_default()
    }

    /// Returns `(reserve_in, reserve_out)` for a single hop.
    ///
    /// # Errors
    ///
    /// Same conditions as [`PoolLedger::get_pool`].
    pub fn oriented_reserves(
        &self,
        token_in: TokenId,
        token_out: TokenId,
    ) -> Result<(Amount, Amount)> {
        self.get_pool(token_in, token_out)
    }

    /// Atomically adjusts both sides of one pool.
    ///
    /// Both new reserve values are computed before either is stored, so
    /// a failing side leaves the pool untouched.
    ///
    /// # Errors
    ///
    /// - [`DexError::UnknownToken`] / [`DexError::IdenticalTokens`] for
    ///   invalid pairs.
    /// - [`DexError::InsufficientReserve`] if a debit underflows.
    /// - [`DexError::Overflow`] if a credit overflows.
    pub fn apply_delta(
        &mut self,
        token_a: TokenId,
        token_b: TokenId,
        delta_a: ReserveDelta,
        delta_b: ReserveDelta,
    ) -> Result<()> {
        self.ensure_registered(token_a)?;
        self.ensure_registered(token_b)?;
        let pair = TokenPair::new(token_a, token_b)?;
        let reserves = self.reserves(&pair);
        let (canon_delta_a, canon_delta_b) = if token_a == pair.first() {
            (delta_a, delta_b)
        } else {
            (delta_b, delta_a)
        };
        let reserve_a = canon_delta_a.apply_to(reserves.reserve_a)?;
        let reserve_b = canon_delta_b.apply_to(reserves.reserve_b)?;
        self.pools.insert(pair, PoolReserves { reserve_a, reserve_b });
        Ok(())
    }

    /// Applies a planned multi-hop swap, all hops or none.
    ///
    /// Every hop is first replayed against a staged copy of the touched
    /// pools; only when the whole plan checks out are the staged values
    /// written back. A path that crosses the same pool twice (such as
    /// `[A, B, A]`) accumulates both hops in the staged entry.
    ///
    /// # Errors
    ///
    /// - [`DexError::UnknownToken`] / [`DexError::IdenticalTokens`] for
    ///   invalid hop pairs.
    /// - [`DexError::InsufficientReserve`] if any output-side debit
    ///   underflows.
    /// - [`DexError::Overflow`] if any input-side credit overflows.
    ///
    /// On any error no reserve has been modified.
    pub fn apply_hops(&mut self, hops: &[HopDelta]) -> Result<()> {
        let mut staged: BTreeMap<TokenPair, PoolReserves> = BTreeMap::new();
        for hop in hops {
            self.ensure_registered(hop.token_in)?;
            self.ensure_registered(hop.token_out)?;
            let pair = TokenPair::new(hop.token_in, hop.token_out)?;
            let current = staged
                .get(&pair)
                .copied()
                .unwrap_or_else(|| self.reserves(&pair));
            let (delta_a, delta_b) = if hop.token_in == pair.first() {
                (
                    ReserveDelta::Credit(hop.amount_in),
                    ReserveDelta::Debit(hop.amount_out),
                )
            } else {
                (
                    ReserveDelta::Debit(hop.amount_out),
                    ReserveDelta::Credit(hop.amount_in),
                )
            };
            let reserve_a = delta_a.apply_to(current.reserve_a)?;
            let reserve_b = delta_b.apply_to(current.reserve_b)?;
            staged.insert(pair, PoolReserves { reserve_a, reserve_b });
        }
        for (pair, reserves) in staged {
            self.pools.insert(pair, reserves);
        }
        Ok(())
    }
}
