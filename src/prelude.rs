//! Convenience re-exports for common types and traits.
//!
//! A single import brings the frequently used items into scope:
//!
//! ```rust
//! use hydra_dex::prelude::*;
//! ```

// Domain value types
pub use crate::domain::{AccountId, Amount, FeeRate, Rounding, SwapPath, TokenId, TokenPair};

// Error types
pub use crate::error::{DexError, Result};

// Core components and their seams
pub use crate::balances::MemoryBalanceLedger;
pub use crate::config::DexConfig;
pub use crate::dex::Dex;
pub use crate::ledger::PoolLedger;
pub use crate::liquidity::LiquidityManager;
pub use crate::registry::ShareRegistry;
pub use crate::router::SwapRouter;
pub use crate::traits::BalanceLedger;
