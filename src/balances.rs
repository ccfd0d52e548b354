//! In-memory [`BalanceLedger`] implementation.

use std::collections::BTreeMap;

use crate::domain::{AccountId, Amount, TokenId};
use crate::error::{DexError, Result};
use crate::traits::BalanceLedger;

/// A `BTreeMap`-backed balance ledger.
///
/// Used by the test suites and by embedders that do not bring their own
/// token ledgers. Zero balances are not stored.
///
/// # Examples
///
/// ```
/// use hydra_dex::balances::MemoryBalanceLedger;
/// use hydra_dex::domain::{AccountId, Amount, TokenId};
/// use hydra_dex::traits::BalanceLedger;
///
/// let token = TokenId::from_bytes([1u8; 32]);
/// let alice = AccountId::from_bytes([1u8; 32]);
///
/// let mut ledger = MemoryBalanceLedger::new();
/// ledger.set_balance(token, alice, Amount::new(100));
/// ledger.debit(token, alice, Amount::new(40)).expect("funded");
/// assert_eq!(ledger.balance(token, alice), Amount::new(60));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryBalanceLedger {
    balances: BTreeMap<(TokenId, AccountId), Amount>,
}

impl MemoryBalanceLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the holder's balance of `token`.
    pub fn set_balance(&mut self, token: TokenId, holder: AccountId, amount: Amount) {
        if amount.is_zero() {
            self.balances.remove(&(token, holder));
        } else {
            self.balances.insert((token, holder), amount);
        }
    }
}

impl BalanceLedger for MemoryBalanceLedger {
    fn balance(&self, token: TokenId, holder: AccountId) -> Amount {
        self.balances
            .get(&(token, holder))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn debit(&mut self, token: TokenId, holder: AccountId, amount: Amount) -> Result<()> {
        let current = self.balance(token, holder);
        let remaining = current
            .checked_sub(amount)
            .ok_or(DexError::InsufficientBalance)?;
        self.set_balance(token, holder, remaining);
        Ok(())
    }

    fn credit(&mut self, token: TokenId, holder: AccountId, amount: Amount) -> Result<()> {
        let current = self.balance(token, holder);
        let total = current
            .checked_add(amount)
            .ok_or(DexError::Overflow("balance credit"))?;
        self.set_balance(token, holder, total);
        Ok(())
    }
}
