//! Fundamental domain value types for the DEX core.
//!
//! This module contains the value types that model the exchange domain:
//! token and account identities, raw amounts, canonical token pairs,
//! validated swap paths, and the fee rate. All types are newtypes with
//! validated constructors so invariants hold by construction.

mod account_id;
mod amount;
mod fee_rate;
mod rounding;
mod swap_path;
mod token_id;
mod token_pair;

pub use account_id::AccountId;
pub use amount::Amount;
pub use fee_rate::FeeRate;
pub use rounding::Rounding;
pub use swap_path::SwapPath;
pub use token_id::TokenId;
pub use token_pair::TokenPair;
