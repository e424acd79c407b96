//! Liquidity-provider position ledger.
//!
//! This crate contains the bookkeeping a swap pool engine calls into. It has
//! no I/O and no host runtime dependencies; the invoking identity is passed
//! explicitly to every operation.
//!
//! # Modules
//!
//! - `ledger` - Access control, per-account balances, and the mutating and
//!   query operations over them

pub mod ledger;

pub use ledger::{AccountInfo, LedgerError, LedgerEvent, LpLedger};
