//! Core abstractions at the system's seams.

mod balance_ledger;

pub use balance_ledger::BalanceLedger;
