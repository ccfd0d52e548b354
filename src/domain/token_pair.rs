//! Canonical unordered pair of distinct tokens.

use super::TokenId;
use crate::error::{DexError, Result};

/// An unordered pair of distinct tokens, canonicalized by id order.
///
/// `(A, B)` and `(B, A)` construct the same `TokenPair`, so a pair is a
/// stable map key for the pool it names: `first() < second()` always
/// holds.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::{TokenId, TokenPair};
///
/// let a = TokenId::from_bytes([1u8; 32]);
/// let b = TokenId::from_bytes([2u8; 32]);
///
/// let forward = TokenPair::new(a, b).expect("distinct tokens");
/// let reversed = TokenPair::new(b, a).expect("distinct tokens");
/// assert_eq!(forward, reversed);
/// assert_eq!(forward.first(), a);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenPair {
    first: TokenId,
    second: TokenId,
}

impl TokenPair {
    /// Creates a canonical `TokenPair` from two tokens in any order.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::IdenticalTokens`] if both handles are equal.
    pub fn new(token_a: TokenId, token_b: TokenId) -> Result<Self> {
        if token_a == token_b {
            return Err(DexError::IdenticalTokens);
        }
        let (first, second) = if token_a < token_b {
            (token_a, token_b)
        } else {
            (token_b, token_a)
        };
        Ok(Self { first, second })
    }

    /// Returns the lower-ordered token of the pair.
    #[must_use]
    pub const fn first(&self) -> TokenId {
        self.first
    }

    /// Returns the higher-ordered token of the pair.
    #[must_use]
    pub const fn second(&self) -> TokenId {
        self.second
    }

    /// Returns `true` if `token` is one of the pair's members.
    #[must_use]
    pub fn contains(&self, token: TokenId) -> bool {
        self.first == token || self.second == token
    }

    /// Returns the counterpart of `token` within the pair.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::UnknownToken`] if `token` is not a member.
    pub fn other(&self, token: TokenId) -> Result<TokenId> {
        if token == self.first {
            Ok(self.second)
        } else if token == self.second {
            Ok(self.first)
        } else {
            Err(DexError::UnknownToken(token))
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn tok(byte: u8) -> TokenId {
        TokenId::from_bytes([byte; 32])
    }

    #[test]
    fn preserves_sorted_input() {
        let Ok(pair) = TokenPair::new(tok(1), tok(2)) else {
            panic!("expected Ok");
        };
        assert_eq!(pair.first(), tok(1));
        assert_eq!(pair.second(), tok(2));
    }

    #[test]
    fn sorts_reversed_input() {
        let Ok(pair) = TokenPair::new(tok(2), tok(1)) else {
            panic!("expected Ok");
        };
        assert_eq!(pair.first(), tok(1));
        assert_eq!(pair.second(), tok(2));
    }

    #[test]
    fn both_orders_are_equal() {
        let (Ok(p1), Ok(p2)) = (TokenPair::new(tok(1), tok(2)), TokenPair::new(tok(2), tok(1)))
        else {
            panic!("expected Ok");
        };
        assert_eq!(p1, p2);
    }

    #[test]
    fn rejects_identical_tokens() {
        assert_eq!(
            TokenPair::new(tok(1), tok(1)),
            Err(DexError::IdenticalTokens)
        );
    }

    #[test]
    fn contains_members_only() {
        let Ok(pair) = TokenPair::new(tok(1), tok(2)) else {
            panic!("expected Ok");
        };
        assert!(pair.contains(tok(1)));
        assert!(pair.contains(tok(2)));
        assert!(!pair.contains(tok(3)));
    }

    #[test]
    fn other_returns_counterpart() {
        let Ok(pair) = TokenPair::new(tok(1), tok(2)) else {
            panic!("expected Ok");
        };
        assert_eq!(pair.other(tok(1)), Ok(tok(2)));
        assert_eq!(pair.other(tok(2)), Ok(tok(1)));
    }

    #[test]
    fn other_rejects_foreign_token() {
        let Ok(pair) = TokenPair::new(tok(1), tok(2)) else {
            panic!("expected Ok");
        };
        assert_eq!(pair.other(tok(9)), Err(DexError::UnknownToken(tok(9))));
    }
}
