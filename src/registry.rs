//! Liquidity-share token registry.
//!
//! Each funded pool has exactly one fungible liquidity token: a claim on
//! a proportional fraction of the pool's reserves. The registry owns
//! every such token: its deterministic handle, metadata, total supply,
//! and per-account share balances. The liquidity manager mints and burns
//! through the registry; no other component touches share supply.
//!
//! # Supply Invariant
//!
//! A pool's `total_shares` is zero exactly when both of its reserves are
//! zero. The liquidity manager maintains this by minting on every
//! deposit and burning on every withdrawal.

use std::collections::BTreeMap;

use crate::domain::{AccountId, Amount, TokenId, TokenPair};
use crate::error::{DexError, Result};

/// The fungible share token of one pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiquidityToken {
    id: TokenId,
    symbol: String,
    name: String,
    total_shares: Amount,
    balances: BTreeMap<AccountId, Amount>,
}

impl LiquidityToken {
    /// Returns the token's deterministic handle.
    #[must_use]
    pub const fn id(&self) -> TokenId {
        self.id
    }

    /// Returns the ticker-style symbol, e.g. `LP_ACA_AUSD`.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Returns the human-readable name, e.g. `LP Acala - Acala Dollar`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the outstanding share supply.
    #[must_use]
    pub const fn total_shares(&self) -> Amount {
        self.total_shares
    }

    /// Returns `account`'s share balance, zero if it holds none.
    #[must_use]
    pub fn balance_of(&self, account: AccountId) -> Amount {
        self.balances.get(&account).copied().unwrap_or(Amount::ZERO)
    }
}

/// Registry of all liquidity tokens, keyed by canonical pair.
#[derive(Debug, Clone, Default)]
pub struct ShareRegistry {
    tokens: BTreeMap<TokenPair, LiquidityToken>,
}

impl ShareRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives the liquidity token handle for a pair.
    ///
    /// The handle concatenates the first sixteen bytes of each member
    /// id in canonical order, so it is stable across calls and unique
    /// per pair (given ids that differ within their leading half).
    #[must_use]
    pub fn derive_token_id(pair: &TokenPair) -> TokenId {
        let first = pair.first().as_bytes();
        let second = pair.second().as_bytes();
        let mut bytes = [0u8; 32];
        bytes[..16].copy_from_slice(&first[..16]);
        bytes[16..].copy_from_slice(&second[..16]);
        TokenId::from_bytes(bytes)
    }

    /// Returns the pair's liquidity token, creating a zero-supply one
    /// on first use.
    ///
    /// `symbol` and `name` are only consulted at creation; an existing
    /// token keeps its original metadata.
    pub fn get_or_create(&mut self, pair: TokenPair, symbol: &str, name: &str) -> &LiquidityToken {
        self.tokens.entry(pair).or_insert_with(|| LiquidityToken {
            id: Self::derive_token_id(&pair),
            symbol: symbol.to_owned(),
            name: name.to_owned(),
            total_shares: Amount::ZERO,
            balances: BTreeMap::new(),
        })
    }

    /// Returns the pair's liquidity token if one was ever created.
    #[must_use]
    pub fn token(&self, pair: &TokenPair) -> Option<&LiquidityToken> {
        self.tokens.get(pair)
    }

    /// Returns the pair's outstanding share supply, zero if the token
    /// was never created.
    #[must_use]
    pub fn total_shares(&self, pair: &TokenPair) -> Amount {
        self.tokens
            .get(pair)
            .map_or(Amount::ZERO, |token| token.total_shares)
    }

    /// Returns `account`'s share balance for the pair.
    #[must_use]
    pub fn balance_of(&self, pair: &TokenPair, account: AccountId) -> Amount {
        self.tokens
            .get(pair)
            .map_or(Amount::ZERO, |token| token.balance_of(account))
    }

    /// Mints `amount` shares to `to`, growing the total supply.
    ///
    /// # Errors
    ///
    /// - [`DexError::ZeroAmount`] if `amount` is zero.
    /// - [`DexError::UnknownToken`] if the pair's token was never
    ///   created.
    /// - [`DexError::Overflow`] if supply or balance overflows.
    pub fn mint(&mut self, pair: &TokenPair, amount: Amount, to: AccountId) -> Result<()> {
        if amount.is_zero() {
            return Err(DexError::ZeroAmount("cannot mint zero shares"));
        }
        let token = self
            .tokens
            .get_mut(pair)
            .ok_or_else(|| DexError::UnknownToken(Self::derive_token_id(pair)))?;
        let total = token
            .total_shares
            .checked_add(amount)
            .ok_or(DexError::Overflow("share supply"))?;
        let balance = token
            .balance_of(to)
            .checked_add(amount)
            .ok_or(DexError::Overflow("share balance"))?;
        token.total_shares = total;
        token.balances.insert(to, balance);
        Ok(())
    }

    /// Burns `amount` shares from `from`, shrinking the total supply.
    ///
    /// # Errors
    ///
    /// - [`DexError::ZeroAmount`] if `amount` is zero.
    /// - [`DexError::UnknownToken`] if the pair's token was never
    ///   created.
    /// - [`DexError::InsufficientShares`] if `from` holds fewer than
    ///   `amount`.
    pub fn burn(&mut self, pair: &TokenPair, amount: Amount, from: AccountId) -> Result<()> {
        if amount.is_zero() {
            return Err(DexError::ZeroAmount("cannot burn zero shares"));
        }
        let token = self
            .tokens
            .get_mut(pair)
            .ok_or_else(|| DexError::UnknownToken(Self::derive_token_id(pair)))?;
        let balance = token
            .balance_of(from)
            .checked_sub(amount)
            .ok_or(DexError::InsufficientShares)?;
        // Supply always covers the sum of balances, so this cannot fail
        // after the balance check.
        let total = token
            .total_shares
            .checked_sub(amount)
            .ok_or(DexError::InsufficientShares)?;
        token.total_shares = total;
        if balance.is_zero() {
            token.balances.remove(&from);
        } else {
            token.balances.insert(from, balance);
        }
        Ok(())
    }

    /// Moves `amount` shares from `from` to `to` without changing the
    /// total supply.
    ///
    /// A self-transfer still validates the balance but moves nothing.
    ///
    /// # Errors
    ///
    /// - [`DexError::UnknownToken`] if the pair's token was never
    ///   created.
    /// - [`DexError::InsufficientShares`] if `from` holds fewer than
    ///   `amount`.
    /// - [`DexError::Overflow`] if the recipient balance overflows.
    pub fn transfer(
        &mut self,
        pair: &TokenPair,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<()> {
        let token = self
            .tokens
            .get_mut(pair)
            .ok_or_else(|| DexError::UnknownToken(Self::derive_token_id(pair)))?;
        let sender_balance = token
            .balance_of(from)
            .checked_sub(amount)
            .ok_or(DexError::InsufficientShares)?;
        if from == to {
            return Ok(());
        }
        let recipient_balance = token
            .balance_of(to)
            .checked_add(amount)
            .ok_or(DexError::Overflow("share balance"))?;
        if sender_balance.is_zero() {
            token.balances.remove(&from);
        } else {
            token.balances.insert(from, sender_balance);
        }
        token.balances.insert(to, recipient_balance);
        Ok(())
    }
}
