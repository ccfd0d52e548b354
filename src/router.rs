//! Multi-hop swap routing over constant-product pools.
//!
//! The router resolves a [`SwapPath`] into consecutive pairwise hops and
//! prices each hop with the constant-product formula, fee deducted from
//! the input before pricing. Quoting is pure; execution plans every hop
//! up front from current reserves, then commits the whole plan through
//! [`PoolLedger::apply_hops`] so a multi-hop swap is never observable
//! half-applied.
//!
//! # Hop Pricing
//!
//! With kept-fraction fee `num/den` and reserves `(R_in, R_out)`:
//!
//! ```text
//! exact supply:  out = in·num·R_out / (R_in·den + in·num)        (floor)
//! exact target:  in  = R_in·target·den / ((R_out − target)·num) + 1
//! ```
//!
//! The `+ 1` after floor division rounds the required input up, so an
//! exact-target swap always delivers at least the requested amount and
//! the pool keeps the rounding dust.

use crate::domain::{AccountId, Amount, FeeRate, Rounding, SwapPath, TokenId};
use crate::error::{DexError, Result};
use crate::ledger::{HopDelta, PoolLedger};
use crate::traits::BalanceLedger;

/// Quoting and execution engine for multi-hop swaps.
///
/// The router is stateless apart from its [`FeeRate`]; pool reserves are
/// passed in explicitly on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapRouter {
    fee: FeeRate,
}

impl SwapRouter {
    /// Creates a router charging the given fee per hop.
    #[must_use]
    pub const fn new(fee: FeeRate) -> Self {
        Self { fee }
    }

    /// Returns the per-hop fee rate.
    #[must_use]
    pub const fn fee(&self) -> FeeRate {
        self.fee
    }

    /// Quotes the target amount received for an exact supply amount.
    ///
    /// Walks the path hop by hop, each hop's output feeding the next
    /// hop's input. Pure; reserves are not modified.
    ///
    /// # Errors
    ///
    /// - [`DexError::UnknownToken`] if a hop's tokens are unregistered
    ///   or its pool has never been funded.
    /// - [`DexError::Overflow`] if intermediate arithmetic overflows.
    pub fn quote_exact_supply(
        &self,
        pools: &PoolLedger,
        path: &SwapPath,
        supply_amount: Amount,
    ) -> Result<Amount> {
        self.plan_exact_supply(pools, path, supply_amount)
            .map(|plan| plan.target)
    }

    /// Quotes the supply amount required for an exact target amount.
    ///
    /// Walks the path in reverse, solving each hop for its required
    /// input. Pure; reserves are not modified.
    ///
    /// # Errors
    ///
    /// - [`DexError::InsufficientLiquidity`] if any hop's target meets
    ///   or exceeds its output reserve.
    /// - [`DexError::UnknownToken`] if a hop's tokens are unregistered
    ///   or its pool has never been funded.
    /// - [`DexError::Overflow`] if intermediate arithmetic overflows.
    pub fn quote_exact_target(
        &self,
        pools: &PoolLedger,
        path: &SwapPath,
        target_amount: Amount,
    ) -> Result<Amount> {
        self.plan_exact_target(pools, path, target_amount)
            .map(|plan| plan.supply)
    }

    /// Executes an exact-supply swap on behalf of `caller`.
    ///
    /// Quotes first, enforces the slippage bound, then moves funds:
    /// debit the supply token, commit every hop delta, credit the
    /// target token. All hops succeed or none do.
    ///
    /// # Errors
    ///
    /// - [`DexError::SlippageExceeded`] if the quoted target is below
    ///   `min_target_amount`.
    /// - [`DexError::InsufficientBalance`] if the caller cannot cover
    ///   the supply amount.
    /// - Any quoting error from [`SwapRouter::quote_exact_supply`].
    pub fn swap_with_exact_supply<L: BalanceLedger>(
        &self,
        pools: &mut PoolLedger,
        balances: &mut L,
        caller: AccountId,
        path: &SwapPath,
        supply_amount: Amount,
        min_target_amount: Amount,
    ) -> Result<Amount> {
        let plan = self.plan_exact_supply(pools, path, supply_amount)?;
        if plan.target < min_target_amount {
            return Err(DexError::SlippageExceeded);
        }
        self.execute(pools, balances, caller, path, plan)
    }

    /// Executes an exact-target swap on behalf of `caller`.
    ///
    /// The output reserve of every hop decreases by exactly that hop's
    /// target; the rounded-up supply stays in the input reserves.
    ///
    /// # Errors
    ///
    /// - [`DexError::SlippageExceeded`] if the required supply exceeds
    ///   `max_supply_amount`.
    /// - [`DexError::InsufficientBalance`] if the caller cannot cover
    ///   the required supply.
    /// - Any quoting error from [`SwapRouter::quote_exact_target`].
    pub fn swap_with_exact_target<L: BalanceLedger>(
        &self,
        pools: &mut PoolLedger,
        balances: &mut L,
        caller: AccountId,
        path: &SwapPath,
        target_amount: Amount,
        max_supply_amount: Amount,
    ) -> Result<Amount> {
        let plan = self.plan_exact_target(pools, path, target_amount)?;
        if plan.supply > max_supply_amount {
            return Err(DexError::SlippageExceeded);
        }
        let supply = plan.supply;
        self.execute(pools, balances, caller, path, plan)?;
        Ok(supply)
    }

    /// Prices one hop for a fixed input amount.
    fn hop_target_amount(
        &self,
        reserve_in: Amount,
        reserve_out: Amount,
        amount_in: Amount,
    ) -> Result<Amount> {
        let fee_num = Amount::new(self.fee.numerator());
        let fee_den = Amount::new(self.fee.denominator());
        let supply_kept = amount_in
            .checked_mul(fee_num)
            .ok_or(DexError::Overflow("supply after fee"))?;
        let numerator = supply_kept
            .checked_mul(reserve_out)
            .ok_or(DexError::Overflow("target numerator"))?;
        let denominator = reserve_in
            .checked_mul(fee_den)
            .ok_or(DexError::Overflow("target denominator"))?
            .checked_add(supply_kept)
            .ok_or(DexError::Overflow("target denominator"))?;
        numerator
            .checked_div(denominator, Rounding::Down)
            .ok_or(DexError::InsufficientLiquidity)
    }

    /// Prices one hop for a fixed output amount.
    fn hop_supply_amount(
        &self,
        reserve_in: Amount,
        reserve_out: Amount,
        amount_out: Amount,
    ) -> Result<Amount> {
        if amount_out >= reserve_out {
            return Err(DexError::InsufficientLiquidity);
        }
        let fee_num = Amount::new(self.fee.numerator());
        let fee_den = Amount::new(self.fee.denominator());
        let numerator = reserve_in
            .checked_mul(amount_out)
            .ok_or(DexError::Overflow("supply numerator"))?
            .checked_mul(fee_den)
            .ok_or(DexError::Overflow("supply numerator"))?;
        let remaining_out = reserve_out
            .checked_sub(amount_out)
            .ok_or(DexError::InsufficientLiquidity)?;
        let denominator = remaining_out
            .checked_mul(fee_num)
            .ok_or(DexError::Overflow("supply denominator"))?;
        let floored = numerator
            .checked_div(denominator, Rounding::Down)
            .ok_or(DexError::InsufficientLiquidity)?;
        floored
            .checked_add(Amount::ONE)
            .ok_or(DexError::Overflow("supply rounding"))
    }

    /// Reads a hop's reserves, treating an unfunded pool as unknown.
    fn hop_reserves(
        pools: &PoolLedger,
        token_in: TokenId,
        token_out: TokenId,
    ) -> Result<(Amount, Amount)> {
        let (reserve_in, reserve_out) = pools.oriented_reserves(token_in, token_out)?;
        if reserve_in.is_zero() || reserve_out.is_zero() {
            return Err(DexError::UnknownToken(token_out));
        }
        Ok((reserve_in, reserve_out))
    }

    /// Plans every hop of an exact-supply swap against current reserves.
    fn plan_exact_supply(
        &self,
        pools: &PoolLedger,
        path: &SwapPath,
        supply_amount: Amount,
    ) -> Result<SwapPlan> {
        let mut hops = Vec::with_capacity(path.hop_count());
        let mut amount_in = supply_amount;
        for (token_in, token_out) in path.hops() {
            let (reserve_in, reserve_out) = Self::hop_reserves(pools, token_in, token_out)?;
            let amount_out = self.hop_target_amount(reserve_in, reserve_out, amount_in)?;
            hops.push(HopDelta {
                token_in,
                token_out,
                amount_in,
                amount_out,
            });
            amount_in = amount_out;
        }
        Ok(SwapPlan {
            supply: supply_amount,
            target: amount_in,
            hops,
        })
    }

    /// Plans every hop of an exact-target swap against current reserves.
    fn plan_exact_target(
        &self,
        pools: &PoolLedger,
        path: &SwapPath,
        target_amount: Amount,
    ) -> Result<SwapPlan> {
        let mut hops = Vec::with_capacity(path.hop_count());
        let mut amount_out = target_amount;
        for (token_in, token_out) in path.hops().rev() {
            let (reserve_in, reserve_out) = Self::hop_reserves(pools, token_in, token_out)?;
            let amount_in = self.hop_supply_amount(reserve_in, reserve_out, amount_out)?;
            hops.push(HopDelta {
                token_in,
                token_out,
                amount_in,
                amount_out,
            });
            amount_out = amount_in;
        }
        hops.reverse();
        Ok(SwapPlan {
            supply: amount_out,
            target: target_amount,
            hops,
        })
    }

    /// Moves funds for a validated plan: debit supply, commit hop
    /// deltas, credit target.
    fn execute<L: BalanceLedger>(
        &self,
        pools: &mut PoolLedger,
        balances: &mut L,
        caller: AccountId,
        path: &SwapPath,
        plan: SwapPlan,
    ) -> Result<Amount> {
        balances.debit(path.supply_token(), caller, plan.supply)?;
        if let Err(err) = pools.apply_hops(&plan.hops) {
            // The plan was computed from current reserves, so the commit
            // cannot fail in a serialized execution; refund if it does.
            balances.credit(path.supply_token(), caller, plan.supply)?;
            return Err(err);
        }
        balances.credit(path.target_token(), caller, plan.target)?;
        Ok(plan.target)
    }
}

impl Default for SwapRouter {
    fn default() -> Self {
        Self::new(FeeRate::DEFAULT)
    }
}

/// A fully priced swap: endpoint amounts plus the per-hop deltas that
/// realize them.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SwapPlan {
    supply: Amount,
    target: Amount,
    hops: Vec<HopDelta>,
}
