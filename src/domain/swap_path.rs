//! Validated multi-hop swap path.

use core::fmt;

use super::TokenId;
use crate::error::{DexError, Result};

/// An ordered sequence of tokens describing consecutive pairwise hops.
///
/// A path of `n` tokens performs `n − 1` hops. Validation happens
/// entirely at construction, before any reserve is looked up:
///
/// - length must be within [`SwapPath::MIN_TOKENS`] ..= [`SwapPath::MAX_TOKENS`];
/// - consecutive tokens must be distinct (a hop cannot trade a token
///   against itself). Non-adjacent repeats are allowed, so a round-trip
///   path such as `[A, B, A]` is valid.
///
/// Paths are transient request data and are never persisted.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::{SwapPath, TokenId};
///
/// let a = TokenId::from_bytes([1u8; 32]);
/// let b = TokenId::from_bytes([2u8; 32]);
/// let path = SwapPath::new(vec![a, b]).expect("valid path");
/// assert_eq!(path.hop_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SwapPath(Vec<TokenId>);

impl SwapPath {
    /// Minimum number of tokens in a path (one hop).
    pub const MIN_TOKENS: usize = 2;

    /// Maximum number of tokens in a path (three hops).
    pub const MAX_TOKENS: usize = 4;

    /// Validates and creates a `SwapPath`.
    ///
    /// # Errors
    ///
    /// - [`DexError::PathLengthInvalid`] if the length is outside
    ///   `[2, 4]`.
    /// - [`DexError::IdenticalTokens`] if two consecutive tokens are
    ///   equal.
    pub fn new(tokens: Vec<TokenId>) -> Result<Self> {
        if tokens.len() < Self::MIN_TOKENS || tokens.len() > Self::MAX_TOKENS {
            return Err(DexError::PathLengthInvalid);
        }
        if tokens.windows(2).any(|w| w[0] == w[1]) {
            return Err(DexError::IdenticalTokens);
        }
        Ok(Self(tokens))
    }

    /// Returns the tokens in traversal order.
    #[must_use]
    pub fn tokens(&self) -> &[TokenId] {
        &self.0
    }

    /// Returns the number of pairwise hops the path performs.
    #[must_use]
    pub fn hop_count(&self) -> usize {
        self.0.len() - 1
    }

    /// Returns the token the caller supplies.
    #[must_use]
    pub fn supply_token(&self) -> TokenId {
        self.0[0]
    }

    /// Returns the token the caller receives.
    #[must_use]
    pub fn target_token(&self) -> TokenId {
        self.0[self.0.len() - 1]
    }

    /// Iterates the path's hops as `(token_in, token_out)` pairs.
    pub fn hops(&self) -> impl DoubleEndedIterator<Item = (TokenId, TokenId)> + '_ {
        self.0.windows(2).map(|w| (w[0], w[1]))
    }
}

impl TryFrom<&[TokenId]> for SwapPath {
    type Error = DexError;

    fn try_from(tokens: &[TokenId]) -> Result<Self> {
        Self::new(tokens.to_vec())
    }
}

impl fmt::Display for SwapPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}
