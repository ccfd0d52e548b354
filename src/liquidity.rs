//! Liquidity provision and withdrawal for a single pair.
//!
//! The manager converts caller deposits into pool reserves plus minted
//! shares, and redeems shares back into proportional reserves. Share
//! issuance follows the usual constant-product conventions:
//!
//! - First deposit: shares = `isqrt(amount_a × amount_b)` (geometric
//!   mean), consuming both offered amounts in full.
//! - Later deposits: the offered amounts are maxima. The deposit is
//!   rebalanced to the pool's current ratio and shares are issued
//!   proportionally from the binding side, rounding down.
//!
//! Withdrawal pays `reserve × shares / total_shares` per side, rounding
//! down, so redeeming the entire supply drains the pool exactly.

use crate::domain::{AccountId, Amount, Rounding, TokenId, TokenPair};
use crate::error::{DexError, Result};
use crate::ledger::{PoolLedger, ReserveDelta};
use crate::registry::ShareRegistry;
use crate::traits::BalanceLedger;

/// Share issuance and redemption engine.
///
/// Stateless; every call receives the pool ledger, share registry, and
/// balance collaborator it operates on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiquidityManager;

impl LiquidityManager {
    /// Creates a manager.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Adds liquidity to the `(token_a, token_b)` pool.
    ///
    /// `max_amount_a` and `max_amount_b` bound what the caller is
    /// willing to deposit; the amounts actually consumed follow the
    /// pool ratio. Returns the number of shares minted to `caller`.
    ///
    /// # Errors
    ///
    /// - [`DexError::UnknownToken`] / [`DexError::IdenticalTokens`] for
    ///   an invalid pair.
    /// - [`DexError::ZeroAmount`] if the deposit cannot mint a single
    ///   share.
    /// - [`DexError::SlippageExceeded`] if fewer than `min_share_amount`
    ///   shares would be minted.
    /// - [`DexError::InsufficientBalance`] if the caller cannot cover
    ///   the consumed amounts.
    #[allow(clippy::too_many_arguments)]
    pub fn add_liquidity<L: BalanceLedger>(
        &self,
        pools: &mut PoolLedger,
        shares: &mut ShareRegistry,
        balances: &mut L,
        caller: AccountId,
        token_a: TokenId,
        token_b: TokenId,
        max_amount_a: Amount,
        max_amount_b: Amount,
        min_share_amount: Amount,
    ) -> Result<Amount> {
        let (reserve_a, reserve_b) = pools.get_pool(token_a, token_b)?;
        let pair = TokenPair::new(token_a, token_b)?;
        let total = shares.total_shares(&pair);

        let (consumed_a, consumed_b, minted) = if total.is_zero() {
            Self::initial_deposit(max_amount_a, max_amount_b)?
        } else {
            Self::proportional_deposit(
                reserve_a,
                reserve_b,
                total,
                max_amount_a,
                max_amount_b,
            )?
        };

        if minted.is_zero() || consumed_a.is_zero() || consumed_b.is_zero() {
            return Err(DexError::ZeroAmount("deposit too small to mint shares"));
        }
        if minted < min_share_amount {
            return Err(DexError::SlippageExceeded);
        }

        balances.debit(token_a, caller, consumed_a)?;
        if let Err(err) = balances.debit(token_b, caller, consumed_b) {
            balances.credit(token_a, caller, consumed_a)?;
            return Err(err);
        }
        pools.apply_delta(
            token_a,
            token_b,
            ReserveDelta::Credit(consumed_a),
            ReserveDelta::Credit(consumed_b),
        )?;

        let (lp_symbol, lp_name) = Self::share_token_naming(pools, &pair)?;
        shares.get_or_create(pair, &lp_symbol, &lp_name);
        shares.mint(&pair, minted, caller)?;
        Ok(minted)
    }

    /// Redeems `share_amount` of the caller's shares for both reserves.
    ///
    /// Returns the `(token_a, token_b)` amounts paid out, oriented to
    /// the argument order.
    ///
    /// # Errors
    ///
    /// - [`DexError::UnknownToken`] / [`DexError::IdenticalTokens`] for
    ///   an invalid pair.
    /// - [`DexError::ZeroAmount`] if `share_amount` is zero.
    /// - [`DexError::InsufficientShares`] if the caller holds fewer
    ///   shares, or the pool has no share supply at all.
    /// - [`DexError::SlippageExceeded`] if either payout is below its
    ///   minimum.
    #[allow(clippy::too_many_arguments)]
    pub fn remove_liquidity<L: BalanceLedger>(
        &self,
        pools: &mut PoolLedger,
        shares: &mut ShareRegistry,
        balances: &mut L,
        caller: AccountId,
        token_a: TokenId,
        token_b: TokenId,
        share_amount: Amount,
        min_amount_a: Amount,
        min_amount_b: Amount,
    ) -> Result<(Amount, Amount)> {
        let (reserve_a, reserve_b) = pools.get_pool(token_a, token_b)?;
        let pair = TokenPair::new(token_a, token_b)?;
        if share_amount.is_zero() {
            return Err(DexError::ZeroAmount("cannot redeem zero shares"));
        }
        let total = shares.total_shares(&pair);
        if total.is_zero() {
            return Err(DexError::InsufficientShares);
        }

        let amount_a = reserve_a
            .checked_mul_div(share_amount, total, Rounding::Down)
            .ok_or(DexError::Overflow("withdrawal payout"))?;
        let amount_b = reserve_b
            .checked_mul_div(share_amount, total, Rounding::Down)
            .ok_or(DexError::Overflow("withdrawal payout"))?;
        if amount_a < min_amount_a || amount_b < min_amount_b {
            return Err(DexError::SlippageExceeded);
        }

        shares.burn(&pair, share_amount, caller)?;
        pools.apply_delta(
            token_a,
            token_b,
            ReserveDelta::Debit(amount_a),
            ReserveDelta::Debit(amount_b),
        )?;
        balances.credit(token_a, caller, amount_a)?;
        balances.credit(token_b, caller, amount_b)?;
        Ok((amount_a, amount_b))
    }

    /// First deposit: both maxima are consumed and shares equal the
    /// geometric mean of the amounts.
    fn initial_deposit(
        max_amount_a: Amount,
        max_amount_b: Amount,
    ) -> Result<(Amount, Amount, Amount)> {
        if max_amount_a.is_zero() || max_amount_b.is_zero() {
            return Err(DexError::ZeroAmount("initial deposit requires both tokens"));
        }
        let product = max_amount_a
            .checked_mul(max_amount_b)
            .ok_or(DexError::Overflow("initial share product"))?;
        let minted = Amount::new(product.get().isqrt());
        Ok((max_amount_a, max_amount_b, minted))
    }

    /// Later deposit: rebalance to the pool ratio and issue shares from
    /// the binding side.
    fn proportional_deposit(
        reserve_a: Amount,
        reserve_b: Amount,
        total: Amount,
        max_amount_a: Amount,
        max_amount_b: Amount,
    ) -> Result<(Amount, Amount, Amount)> {
        let overflow = DexError::Overflow("proportional deposit");
        let needed_b = max_amount_a
            .checked_mul_div(reserve_b, reserve_a, Rounding::Down)
            .ok_or(overflow)?;
        if needed_b <= max_amount_b {
            let minted = max_amount_a
                .checked_mul_div(total, reserve_a, Rounding::Down)
                .ok_or(overflow)?;
            Ok((max_amount_a, needed_b, minted))
        } else {
            let needed_a = max_amount_b
                .checked_mul_div(reserve_a, reserve_b, Rounding::Down)
                .ok_or(overflow)?;
            let minted = max_amount_b
                .checked_mul_div(total, reserve_b, Rounding::Down)
                .ok_or(overflow)?;
            Ok((needed_a, max_amount_b, minted))
        }
    }

    /// Builds the share token's symbol and name from the registered
    /// asset metadata, in canonical pair order.
    fn share_token_naming(pools: &PoolLedger, pair: &TokenPair) -> Result<(String, String)> {
        let info_first = pools.asset_info(pair.first())?;
        let info_second = pools.asset_info(pair.second())?;
        let symbol = format!("LP_{}_{}", info_first.symbol(), info_second.symbol());
        let name = format!("LP {} - {}", info_first.name(), info_second.name());
        Ok((symbol, name))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::balances::MemoryBalanceLedger;

    fn tok(byte: u8) -> TokenId {
        TokenId::from_bytes([byte; 32])
    }

    fn caller() -> AccountId {
        AccountId::from_bytes([77u8; 32])
    }

    fn pair() -> TokenPair {
        let Ok(pair) = TokenPair::new(tok(1), tok(2)) else {
            panic!("expected valid pair");
        };
        pair
    }

    struct Fixture {
        pools: PoolLedger,
        shares: ShareRegistry,
        balances: MemoryBalanceLedger,
        manager: LiquidityManager,
    }

    fn fixture() -> Fixture {
        let mut pools = PoolLedger::new();
        pools
            .register_asset(tok(1), "ACA", "Acala")
            .expect("fresh asset");
        pools
            .register_asset(tok(2), "AUSD", "Acala Dollar")
            .expect("fresh asset");
        let mut balances = MemoryBalanceLedger::new();
        balances.set_balance(tok(1), caller(), Amount::new(1_000_000));
        balances.set_balance(tok(2), caller(), Amount::new(1_000_000));
        Fixture {
            pools,
            shares: ShareRegistry::new(),
            balances,
            manager: LiquidityManager::new(),
        }
    }

    fn add(fx: &mut Fixture, max_a: u128, max_b: u128, min_shares: u128) -> Result<Amount> {
        fx.manager.add_liquidity(
            &mut fx.pools,
            &mut fx.shares,
            &mut fx.balances,
            caller(),
            tok(1),
            tok(2),
            Amount::new(max_a),
            Amount::new(max_b),
            Amount::new(min_shares),
        )
    }

    fn remove(fx: &mut Fixture, shares: u128, min_a: u128, min_b: u128) -> Result<(Amount, Amount)> {
        fx.manager.remove_liquidity(
            &mut fx.pools,
            &mut fx.shares,
            &mut fx.balances,
            caller(),
            tok(1),
            tok(2),
            Amount::new(shares),
            Amount::new(min_a),
            Amount::new(min_b),
        )
    }

    // -- add_liquidity: first deposit -----------------------------------------

    #[test]
    fn first_deposit_mints_geometric_mean() {
        let mut fx = fixture();
        let minted = add(&mut fx, 100, 100, 0);
        assert_eq!(minted, Ok(Amount::new(100)));
        assert_eq!(
            fx.pools.get_pool(tok(1), tok(2)),
            Ok((Amount::new(100), Amount::new(100)))
        );
        assert_eq!(fx.shares.total_shares(&pair()), Amount::new(100));
    }

    #[test]
    fn first_deposit_unbalanced_amounts() {
        let mut fx = fixture();
        // isqrt(100 × 400) = 200
        let minted = add(&mut fx, 100, 400, 0);
        assert_eq!(minted, Ok(Amount::new(200)));
    }

    #[test]
    fn first_deposit_requires_both_tokens() {
        let mut fx = fixture();
        assert!(matches!(add(&mut fx, 100, 0, 0), Err(DexError::ZeroAmount(_))));
        assert!(matches!(add(&mut fx, 0, 100, 0), Err(DexError::ZeroAmount(_))));
    }

    #[test]
    fn first_deposit_debits_caller() {
        let mut fx = fixture();
        add(&mut fx, 100, 100, 0).expect("deposit succeeds");
        assert_eq!(
            fx.balances.balance(tok(1), caller()),
            Amount::new(1_000_000 - 100)
        );
        assert_eq!(
            fx.balances.balance(tok(2), caller()),
            Amount::new(1_000_000 - 100)
        );
    }

    // -- add_liquidity: proportional deposits ---------------------------------

    #[test]
    fn second_identical_deposit_mints_identical_shares() {
        let mut fx = fixture();
        let first = add(&mut fx, 100, 100, 0).expect("first deposit");
        let second = add(&mut fx, 100, 100, 0).expect("second deposit");
        assert_eq!(first, second);
        assert_eq!(
            fx.pools.get_pool(tok(1), tok(2)),
            Ok((Amount::new(200), Amount::new(200)))
        );
        assert_eq!(fx.shares.total_shares(&pair()), Amount::new(200));
    }

    #[test]
    fn deposit_rebalances_to_pool_ratio() {
        let mut fx = fixture();
        add(&mut fx, 200, 200, 0).expect("first deposit");
        // Offering (50, 100): token A binds, only 50 of B is consumed.
        let minted = add(&mut fx, 50, 100, 0);
        assert_eq!(minted, Ok(Amount::new(50)));
        assert_eq!(
            fx.pools.get_pool(tok(1), tok(2)),
            Ok((Amount::new(250), Amount::new(250)))
        );
        assert_eq!(
            fx.balances.balance(tok(2), caller()),
            Amount::new(1_000_000 - 200 - 50)
        );
    }

    #[test]
    fn deposit_binding_on_second_token() {
        let mut fx = fixture();
        add(&mut fx, 200, 200, 0).expect("first deposit");
        // Offering (100, 50): token B binds.
        let minted = add(&mut fx, 100, 50, 0);
        assert_eq!(minted, Ok(Amount::new(50)));
        assert_eq!(
            fx.pools.get_pool(tok(1), tok(2)),
            Ok((Amount::new(250), Amount::new(250)))
        );
    }

    #[test]
    fn deposit_below_min_shares_rejected() {
        let mut fx = fixture();
        add(&mut fx, 200, 200, 0).expect("first deposit");
        let result = add(&mut fx, 50, 100, 51);
        assert_eq!(result, Err(DexError::SlippageExceeded));
        // Nothing moved.
        assert_eq!(
            fx.pools.get_pool(tok(1), tok(2)),
            Ok((Amount::new(200), Amount::new(200)))
        );
        assert_eq!(fx.shares.total_shares(&pair()), Amount::new(200));
    }

    #[test]
    fn dust_deposit_rejected() {
        let mut fx = fixture();
        add(&mut fx, 1_000_000 / 2, 1_000_000 / 2, 0).expect("first deposit");
        // One base unit of A against a 500k reserve mints zero shares.
        assert!(matches!(add(&mut fx, 0, 1, 0), Err(DexError::ZeroAmount(_))));
    }

    #[test]
    fn deposit_with_unknown_token_rejected() {
        let mut fx = fixture();
        let result = fx.manager.add_liquidity(
            &mut fx.pools,
            &mut fx.shares,
            &mut fx.balances,
            caller(),
            tok(1),
            tok(9),
            Amount::new(100),
            Amount::new(100),
            Amount::ZERO,
        );
        assert_eq!(result, Err(DexError::UnknownToken(tok(9))));
    }

    #[test]
    fn deposit_beyond_balance_rolls_back_first_debit() {
        let mut fx = fixture();
        add(&mut fx, 100, 100, 0).expect("first deposit");
        fx.balances.set_balance(tok(2), caller(), Amount::new(10));
        let result = add(&mut fx, 100, 100, 0);
        assert_eq!(result, Err(DexError::InsufficientBalance));
        // The token-1 debit was refunded.
        assert_eq!(
            fx.balances.balance(tok(1), caller()),
            Amount::new(1_000_000 - 100)
        );
        assert_eq!(
            fx.pools.get_pool(tok(1), tok(2)),
            Ok((Amount::new(100), Amount::new(100)))
        );
    }

    #[test]
    fn share_token_gets_derived_metadata() {
        let mut fx = fixture();
        add(&mut fx, 100, 100, 0).expect("deposit succeeds");
        let Some(token) = fx.shares.token(&pair()) else {
            panic!("expected share token");
        };
        assert_eq!(token.symbol(), "LP_ACA_AUSD");
        assert_eq!(token.name(), "LP Acala - Acala Dollar");
    }

    // -- remove_liquidity -----------------------------------------------------

    #[test]
    fn remove_pays_proportional_reserves() {
        let mut fx = fixture();
        add(&mut fx, 400, 100, 0).expect("deposit succeeds");
        // total = isqrt(40_000) = 200; half the shares pay half of each side.
        let out = remove(&mut fx, 100, 0, 0);
        assert_eq!(out, Ok((Amount::new(200), Amount::new(50))));
        assert_eq!(
            fx.pools.get_pool(tok(1), tok(2)),
            Ok((Amount::new(200), Amount::new(50)))
        );
        assert_eq!(fx.shares.total_shares(&pair()), Amount::new(100));
    }

    #[test]
    fn remove_all_shares_drains_pool() {
        let mut fx = fixture();
        add(&mut fx, 100, 100, 0).expect("deposit succeeds");
        let out = remove(&mut fx, 100, 0, 0);
        assert_eq!(out, Ok((Amount::new(100), Amount::new(100))));
        assert_eq!(
            fx.pools.get_pool(tok(1), tok(2)),
            Ok((Amount::ZERO, Amount::ZERO))
        );
        assert_eq!(fx.shares.total_shares(&pair()), Amount::ZERO);
        // Caller is made whole.
        assert_eq!(fx.balances.balance(tok(1), caller()), Amount::new(1_000_000));
        assert_eq!(fx.balances.balance(tok(2), caller()), Amount::new(1_000_000));
    }

    #[test]
    fn remove_zero_shares_rejected() {
        let mut fx = fixture();
        add(&mut fx, 100, 100, 0).expect("deposit succeeds");
        assert!(matches!(
            remove(&mut fx, 0, 0, 0),
            Err(DexError::ZeroAmount(_))
        ));
    }

    #[test]
    fn remove_from_empty_pool_rejected() {
        let mut fx = fixture();
        assert_eq!(remove(&mut fx, 1, 0, 0), Err(DexError::InsufficientShares));
    }

    #[test]
    fn remove_more_than_held_rejected() {
        let mut fx = fixture();
        add(&mut fx, 100, 100, 0).expect("deposit succeeds");
        assert_eq!(
            remove(&mut fx, 101, 0, 0),
            Err(DexError::InsufficientShares)
        );
        assert_eq!(fx.shares.total_shares(&pair()), Amount::new(100));
    }

    #[test]
    fn remove_below_minimum_rejected() {
        let mut fx = fixture();
        add(&mut fx, 100, 100, 0).expect("deposit succeeds");
        assert_eq!(remove(&mut fx, 50, 51, 0), Err(DexError::SlippageExceeded));
        assert_eq!(remove(&mut fx, 50, 0, 51), Err(DexError::SlippageExceeded));
        // Failed attempts left everything in place.
        assert_eq!(
            fx.pools.get_pool(tok(1), tok(2)),
            Ok((Amount::new(100), Amount::new(100)))
        );
    }
}
