//! Token-balance collaborator trait.
//!
//! The DEX core never maintains holder balances for the traded tokens;
//! each token keeps its own ledger. [`BalanceLedger`] is the seam
//! through which the core moves funds in and out of pools: the host
//! environment supplies an implementation backed by its token contracts,
//! while tests and embedders without their own ledger use
//! [`MemoryBalanceLedger`](crate::balances::MemoryBalanceLedger).
//!
//! # Atomicity Contract
//!
//! Each `debit` and `credit` call applies fully or not at all. A failed
//! `debit` must leave the holder's balance untouched; the core relies on
//! this to keep multi-step operations free of partial state.

use crate::domain::{AccountId, Amount, TokenId};
use crate::error::Result;

/// Per-token holder balance ledger.
///
/// Implementations own the balances; the DEX core only requests
/// transfers and queries. All methods identify a balance by the
/// `(token, holder)` pair.
///
/// # Errors
///
/// - `debit` fails with
///   [`DexError::InsufficientBalance`](crate::error::DexError::InsufficientBalance)
///   when the holder's balance is below the requested amount, without
///   any partial transfer.
/// - `credit` fails with
///   [`DexError::Overflow`](crate::error::DexError::Overflow) if the
///   holder's balance cannot represent the result.
pub trait BalanceLedger {
    /// Returns the holder's balance of `token`, zero if never credited.
    fn balance(&self, token: TokenId, holder: AccountId) -> Amount;

    /// Removes `amount` of `token` from `holder`.
    ///
    /// # Errors
    ///
    /// Fails atomically with `InsufficientBalance` on a shortfall.
    fn debit(&mut self, token: TokenId, holder: AccountId, amount: Amount) -> Result<()>;

    /// Adds `amount` of `token` to `holder`.
    ///
    /// # Errors
    ///
    /// Fails with `Overflow` if the balance cannot hold the result.
    fn credit(&mut self, token: TokenId, holder: AccountId, amount: Amount) -> Result<()>;
}
