//! # Hydra DEX
//!
//! Constant-product DEX core: multi-hop swap routing, pool reserve
//! accounting, and liquidity-share bookkeeping behind a single typed
//! facade.
//!
//! The crate models the on-chain exchange logic only. Consensus, block
//! production, transaction signing, and oracle transport belong to the
//! host environment; the core reaches the outside world through exactly
//! two seams: the caller identity passed into each mutating call and
//! the [`BalanceLedger`](traits::BalanceLedger) collaborator that moves
//! token balances.
//!
//! # Quick Start
//!
//! ```rust
//! use hydra_dex::balances::MemoryBalanceLedger;
//! use hydra_dex::config::DexConfig;
//! use hydra_dex::dex::Dex;
//! use hydra_dex::domain::{AccountId, Amount, TokenId};
//!
//! // 1. Two assets and a funded caller.
//! let aca = TokenId::from_bytes([1u8; 32]);
//! let ausd = TokenId::from_bytes([2u8; 32]);
//! let alice = AccountId::from_bytes([1u8; 32]);
//!
//! let mut balances = MemoryBalanceLedger::new();
//! balances.set_balance(aca, alice, Amount::new(1_000_000));
//! balances.set_balance(ausd, alice, Amount::new(1_000_000));
//!
//! // 2. An exchange with the conventional 0.3% fee.
//! let mut dex = Dex::new(DexConfig::default(), balances);
//! dex.register_asset(aca, "ACA", "Acala").expect("fresh asset");
//! dex.register_asset(ausd, "AUSD", "Acala Dollar").expect("fresh asset");
//!
//! // 3. Fund the pool, then trade against it.
//! let shares = dex
//!     .add_liquidity(alice, aca, ausd, Amount::new(100_000), Amount::new(100_000), Amount::ZERO)
//!     .expect("pool funded");
//! assert!(shares > Amount::ZERO);
//!
//! let quoted = dex
//!     .get_swap_target_amount(&[aca, ausd], Amount::new(1_000))
//!     .expect("quote computed");
//! let received = dex
//!     .swap_with_exact_supply(alice, &[aca, ausd], Amount::new(1_000), quoted)
//!     .expect("swap executed");
//! assert_eq!(received, quoted);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │  Dex facade   │  validation, composition, the public surface
//! └──────┬───────┘
//!        │
//!   ┌────┴─────────────────┐
//!   ▼                      ▼
//! ┌──────────────┐  ┌──────────────────┐
//! │  SwapRouter   │  │ LiquidityManager  │
//! └──────┬───────┘  └───────┬──────────┘
//!        │                  │
//!        ▼                  ▼
//! ┌──────────────┐  ┌──────────────────┐     ┌────────────────┐
//! │  PoolLedger   │  │  ShareRegistry    │     │ BalanceLedger   │
//! │  (reserves)   │  │  (LP shares)      │     │ (collaborator)  │
//! └──────────────┘  └──────────────────┘     └────────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Amount`](domain::Amount), [`TokenId`](domain::TokenId), [`SwapPath`](domain::SwapPath), … |
//! | [`traits`] | The [`BalanceLedger`](traits::BalanceLedger) collaborator seam |
//! | [`config`] | [`DexConfig`](config::DexConfig) immutable parameters |
//! | [`ledger`] | [`PoolLedger`](ledger::PoolLedger): asset registry and atomic reserve updates |
//! | [`registry`] | [`ShareRegistry`](registry::ShareRegistry): liquidity-share tokens |
//! | [`router`] | [`SwapRouter`](router::SwapRouter): multi-hop quoting and execution |
//! | [`liquidity`] | [`LiquidityManager`](liquidity::LiquidityManager): share issuance and redemption |
//! | [`dex`] | [`Dex`](dex::Dex): the public facade |
//! | [`balances`] | In-memory [`BalanceLedger`](traits::BalanceLedger) implementation |
//! | [`error`] | [`DexError`](error::DexError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types |

pub mod balances;
pub mod config;
pub mod dex;
pub mod domain;
pub mod error;
pub mod ledger;
pub mod liquidity;
pub mod prelude;
pub mod registry;
pub mod router;
pub mod traits;

#[cfg(test)]
mod proptest_properties;
