//! Unified error types for the DEX core.
//!
//! All fallible operations across the crate return [`DexError`] as their
//! error type. Errors are surfaced synchronously to the caller of the
//! failing operation; nothing is retried internally, and no operation
//! commits partial state on a failure path.

use thiserror::Error;

use crate::domain::TokenId;

/// Convenience alias used by every fallible operation in the crate.
pub type Result<T> = core::result::Result<T, DexError>;

/// Unified error enum for all DEX operations.
///
/// Variants carry either a small `Copy` payload (the offending
/// [`TokenId`]) or a static description of the failing computation, so
/// errors stay cheap to construct and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DexError {
    /// A swap path had fewer than two or more than four tokens.
    #[error("token path over the limit")]
    PathLengthInvalid,

    /// A token handle is not a registered system asset, or the hop's
    /// pool has never been funded.
    #[error("token {0} is not a known system asset")]
    UnknownToken(TokenId),

    /// A pair or hop was built from two identical token handles.
    #[error("pair requires two distinct tokens")]
    IdenticalTokens,

    /// Pool reserves cannot satisfy the requested target amount.
    #[error("insufficient liquidity in pool")]
    InsufficientLiquidity,

    /// The quoted or executed amount violated a caller-supplied bound.
    #[error("slippage bound exceeded")]
    SlippageExceeded,

    /// The caller's token balance is too low for the requested debit.
    #[error("insufficient token balance")]
    InsufficientBalance,

    /// The caller holds fewer liquidity shares than requested.
    #[error("insufficient liquidity shares")]
    InsufficientShares,

    /// A reserve subtraction would underflow. Prior checks make this
    /// unreachable; observing it indicates a logic defect.
    #[error("pool reserve underflow")]
    InsufficientReserve,

    /// An amount that must be strictly positive was zero.
    #[error("amount must be non-zero: {0}")]
    ZeroAmount(&'static str),

    /// Arithmetic overflow in the named computation.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// A fee rate failed validation.
    #[error("invalid fee rate: {0}")]
    InvalidFee(&'static str),

    /// The asset handle is already registered.
    #[error("asset {0} is already registered")]
    AssetAlreadyRegistered(TokenId),
}
