//! Public DEX facade.
//!
//! [`Dex`] composes the pool ledger, share registry, swap router, and
//! liquidity manager behind the surface the host environment calls.
//! Every input passes path-length and token-registration validation
//! before reaching an inner component, and every mutating operation
//! runs to completion as one atomic unit: a failure leaves no partial
//! state behind.
//!
//! Concurrency is the host's concern. The facade assumes the host
//! serializes mutating calls (one in-flight mutation per instance);
//! read-only queries take `&self` and may run concurrently with each
//! other.

use crate::config::DexConfig;
use crate::domain::{AccountId, Amount, SwapPath, TokenId, TokenPair};
use crate::error::{DexError, Result};
use crate::ledger::PoolLedger;
use crate::liquidity::LiquidityManager;
use crate::registry::ShareRegistry;
use crate::router::SwapRouter;
use crate::traits::BalanceLedger;

/// The exchange: pools, share accounting, routing, and the balance
/// collaborator, behind one typed surface.
///
/// The type parameter is the token-balance collaborator; tests use
/// [`MemoryBalanceLedger`](crate::balances::MemoryBalanceLedger), hosts
/// plug in their own ledgers.
///
/// # Examples
///
/// ```
/// use hydra_dex::balances::MemoryBalanceLedger;
/// use hydra_dex::config::DexConfig;
/// use hydra_dex::dex::Dex;
/// use hydra_dex::domain::{AccountId, Amount, TokenId};
///
/// let aca = TokenId::from_bytes([1u8; 32]);
/// let ausd = TokenId::from_bytes([2u8; 32]);
/// let alice = AccountId::from_bytes([1u8; 32]);
///
/// let mut balances = MemoryBalanceLedger::new();
/// balances.set_balance(aca, alice, Amount::new(200_000));
/// balances.set_balance(ausd, alice, Amount::new(200_000));
///
/// let mut dex = Dex::new(DexConfig::default(), balances);
/// dex.register_asset(aca, "ACA", "Acala").expect("fresh asset");
/// dex.register_asset(ausd, "AUSD", "Acala Dollar").expect("fresh asset");
///
/// dex.add_liquidity(
///     alice,
///     aca,
///     ausd,
///     Amount::new(100_000),
///     Amount::new(100_000),
///     Amount::ZERO,
/// )
/// .expect("pool funded");
///
/// let received = dex
///     .swap_with_exact_supply(alice, &[aca, ausd], Amount::new(1_000), Amount::ONE)
///     .expect("swap executed");
/// assert!(received > Amount::ZERO);
/// ```
#[derive(Debug, Clone)]
pub struct Dex<L> {
    config: DexConfig,
    pools: PoolLedger,
    shares: ShareRegistry,
    balances: L,
    router: SwapRouter,
    liquidity: LiquidityManager,
}

impl<L: BalanceLedger> Dex<L> {
    /// Creates an exchange with no registered assets or pools.
    #[must_use]
    pub fn new(config: DexConfig, balances: L) -> Self {
        Self {
            config,
            pools: PoolLedger::new(),
            shares: ShareRegistry::new(),
            balances,
            router: SwapRouter::new(config.fee()),
            liquidity: LiquidityManager::new(),
        }
    }

    /// Returns the configuration the exchange was built with.
    #[must_use]
    pub const fn config(&self) -> DexConfig {
        self.config
    }

    /// Returns the token-balance collaborator.
    #[must_use]
    pub const fn balances(&self) -> &L {
        &self.balances
    }

    /// Registers a system asset so pools can be opened against it.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::AssetAlreadyRegistered`] on a duplicate.
    pub fn register_asset(&mut self, id: TokenId, symbol: &str, name: &str) -> Result<()> {
        self.pools.register_asset(id, symbol, name)?;
        tracing::debug!(asset = %id, symbol, "asset registered");
        Ok(())
    }

    // -- Query surface ------------------------------------------------------

    /// Returns the pool reserves for a pair, oriented to the argument
    /// order. A registered pair with no liquidity reads `(0, 0)`.
    ///
    /// # Errors
    ///
    /// - [`DexError::UnknownToken`] if either token is unregistered.
    /// - [`DexError::IdenticalTokens`] if both handles are equal.
    pub fn get_liquidity_pool(
        &self,
        token_a: TokenId,
        token_b: TokenId,
    ) -> Result<(Amount, Amount)> {
        self.pools.get_pool(token_a, token_b)
    }

    /// Returns the deterministic liquidity-token handle for a pair.
    ///
    /// The handle exists independently of whether the pool has ever
    /// been funded.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Dex::get_liquidity_pool`].
    pub fn get_liquidity_token_address(
        &self,
        token_a: TokenId,
        token_b: TokenId,
    ) -> Result<TokenId> {
        self.pools.ensure_registered(token_a)?;
        self.pools.ensure_registered(token_b)?;
        let pair = TokenPair::new(token_a, token_b)?;
        Ok(ShareRegistry::derive_token_id(&pair))
    }

    /// Quotes the target amount received for an exact supply over a
    /// path of 2–4 tokens. Read-only.
    ///
    /// # Errors
    ///
    /// - [`DexError::PathLengthInvalid`] before any reserve lookup.
    /// - [`DexError::ZeroAmount`] if `supply_amount` is zero.
    /// - Any routing error from the quote itself.
    pub fn get_swap_target_amount(
        &self,
        path: &[TokenId],
        supply_amount: Amount,
    ) -> Result<Amount> {
        let path = SwapPath::try_from(path)?;
        if supply_amount.is_zero() {
            return Err(DexError::ZeroAmount("supply amount must be non-zero"));
        }
        tracing::trace!(%path, %supply_amount, "quoting exact supply");
        self.router
            .quote_exact_supply(&self.pools, &path, supply_amount)
    }

    /// Quotes the supply amount required for an exact target over a
    /// path of 2–4 tokens. Read-only.
    ///
    /// # Errors
    ///
    /// - [`DexError::PathLengthInvalid`] before any reserve lookup.
    /// - [`DexError::ZeroAmount`] if `target_amount` is zero.
    /// - Any routing error from the quote itself.
    pub fn get_swap_supply_amount(
        &self,
        path: &[TokenId],
        target_amount: Amount,
    ) -> Result<Amount> {
        let path = SwapPath::try_from(path)?;
        if target_amount.is_zero() {
            return Err(DexError::ZeroAmount("target amount must be non-zero"));
        }
        tracing::trace!(%path, %target_amount, "quoting exact target");
        self.router
            .quote_exact_target(&self.pools, &path, target_amount)
    }

    /// Returns `account`'s liquidity-share balance for a pair.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Dex::get_liquidity_pool`].
    pub fn share_balance_of(
        &self,
        token_a: TokenId,
        token_b: TokenId,
        account: AccountId,
    ) -> Result<Amount> {
        self.pools.ensure_registered(token_a)?;
        self.pools.ensure_registered(token_b)?;
        let pair = TokenPair::new(token_a, token_b)?;
        Ok(self.shares.balance_of(&pair, account))
    }

    /// Returns the outstanding liquidity-share supply for a pair.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Dex::get_liquidity_pool`].
    pub fn total_shares(&self, token_a: TokenId, token_b: TokenId) -> Result<Amount> {
        self.pools.ensure_registered(token_a)?;
        self.pools.ensure_registered(token_b)?;
        let pair = TokenPair::new(token_a, token_b)?;
        Ok(self.shares.total_shares(&pair))
    }

    /// Returns the `(symbol, name)` of the pair's liquidity token,
    /// derived from the registered asset metadata in canonical order.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Dex::get_liquidity_pool`].
    pub fn liquidity_token_metadata(
        &self,
        token_a: TokenId,
        token_b: TokenId,
    ) -> Result<(String, String)> {
        self.pools.ensure_registered(token_a)?;
        self.pools.ensure_registered(token_b)?;
        let pair = TokenPair::new(token_a, token_b)?;
        let first = self.pools.asset_info(pair.first())?;
        let second = self.pools.asset_info(pair.second())?;
        Ok((
            format!("LP_{}_{}", first.symbol(), second.symbol()),
            format!("LP {} - {}", first.name(), second.name()),
        ))
    }

    // -- Mutating surface ---------------------------------------------------

    /// Swaps an exact supply amount along `path`, on behalf of `caller`.
    ///
    /// Returns the target amount credited.
    ///
    /// # Errors
    ///
    /// - [`DexError::PathLengthInvalid`] before any reserve lookup.
    /// - [`DexError::ZeroAmount`] if `supply_amount` is zero.
    /// - [`DexError::SlippageExceeded`] if the quote falls below
    ///   `min_target_amount`.
    /// - [`DexError::InsufficientBalance`] if `caller` cannot fund the
    ///   supply.
    pub fn swap_with_exact_supply(
        &mut self,
        caller: AccountId,
        path: &[TokenId],
        supply_amount: Amount,
        min_target_amount: Amount,
    ) -> Result<Amount> {
        let path = SwapPath::try_from(path)?;
        if supply_amount.is_zero() {
            return Err(DexError::ZeroAmount("supply amount must be non-zero"));
        }
        let target = self.router.swap_with_exact_supply(
            &mut self.pools,
            &mut self.balances,
            caller,
            &path,
            supply_amount,
            min_target_amount,
        )?;
        tracing::debug!(
            caller = %caller,
            %path,
            supply = %supply_amount,
            target = %target,
            "swap with exact supply executed"
        );
        Ok(target)
    }

    /// Swaps for an exact target amount along `path`, on behalf of
    /// `caller`.
    ///
    /// Returns the supply amount debited.
    ///
    /// # Errors
    ///
    /// - [`DexError::PathLengthInvalid`] before any reserve lookup.
    /// - [`DexError::ZeroAmount`] if `target_amount` is zero.
    /// - [`DexError::SlippageExceeded`] if the required supply exceeds
    ///   `max_supply_amount`.
    /// - [`DexError::InsufficientLiquidity`] if any hop cannot reach
    ///   its target.
    pub fn swap_with_exact_target(
        &mut self,
        caller: AccountId,
        path: &[TokenId],
        target_amount: Amount,
        max_supply_amount: Amount,
    ) -> Result<Amount> {
        let path = SwapPath::try_from(path)?;
        if target_amount.is_zero() {
            return Err(DexError::ZeroAmount("target amount must be non-zero"));
        }
        let supply = self.router.swap_with_exact_target(
            &mut self.pools,
            &mut self.balances,
            caller,
            &path,
            target_amount,
            max_supply_amount,
        )?;
        tracing::debug!(
            caller = %caller,
            %path,
            supply = %supply,
            target = %target_amount,
            "swap with exact target executed"
        );
        Ok(supply)
    }

    /// Adds liquidity to the `(token_a, token_b)` pool on behalf of
    /// `caller`. Returns the shares minted.
    ///
    /// # Errors
    ///
    /// See [`LiquidityManager::add_liquidity`].
    pub fn add_liquidity(
        &mut self,
        caller: AccountId,
        token_a: TokenId,
        token_b: TokenId,
        max_amount_a: Amount,
        max_amount_b: Amount,
        min_share_amount: Amount,
    ) -> Result<Amount> {
        let minted = self.liquidity.add_liquidity(
            &mut self.pools,
            &mut self.shares,
            &mut self.balances,
            caller,
            token_a,
            token_b,
            max_amount_a,
            max_amount_b,
            min_share_amount,
        )?;
        tracing::debug!(
            caller = %caller,
            token_a = %token_a,
            token_b = %token_b,
            shares = %minted,
            "liquidity added"
        );
        Ok(minted)
    }

    /// Redeems liquidity shares for both reserves on behalf of
    /// `caller`. Returns the `(token_a, token_b)` amounts paid out.
    ///
    /// # Errors
    ///
    /// See [`LiquidityManager::remove_liquidity`].
    pub fn remove_liquidity(
        &mut self,
        caller: AccountId,
        token_a: TokenId,
        token_b: TokenId,
        share_amount: Amount,
        min_amount_a: Amount,
        min_amount_b: Amount,
    ) -> Result<(Amount, Amount)> {
        let (amount_a, amount_b) = self.liquidity.remove_liquidity(
            &mut self.pools,
            &mut self.shares,
            &mut self.balances,
            caller,
            token_a,
            token_b,
            share_amount,
            min_amount_a,
            min_amount_b,
        )?;
        tracing::debug!(
            caller = %caller,
            token_a = %token_a,
            token_b = %token_b,
            shares = %share_amount,
            "liquidity removed"
        );
        Ok((amount_a, amount_b))
    }

    /// Transfers liquidity shares between accounts.
    ///
    /// # Errors
    ///
    /// - [`DexError::UnknownToken`] / [`DexError::IdenticalTokens`] for
    ///   an invalid pair, or if the pool's share token was never
    ///   created.
    /// - [`DexError::InsufficientShares`] if `caller` holds fewer than
    ///   `amount`.
    pub fn transfer_shares(
        &mut self,
        caller: AccountId,
        token_a: TokenId,
        token_b: TokenId,
        to: AccountId,
        amount: Amount,
    ) -> Result<()> {
        self.pools.ensure_registered(token_a)?;
        self.pools.ensure_registered(token_b)?;
        let pair = TokenPair::new(token_a, token_b)?;
        self.shares.transfer(&pair, caller, to, amount)?;
        tracing::debug!(
            from = %caller,
            to = %to,
            amount = %amount,
            "liquidity shares transferred"
        );
        Ok(())
    }
}
