//! LP bookkeeping ledger.
//!
//! This module implements:
//! - The owner/allow-list gate for mutating calls
//! - Four per-account balances with zero-default reads
//! - Add/remove/lock/unlock operations and read-only queries
//! - Error types for rejected calls
//! - Events describing applied changes

pub mod access;
pub mod error;
pub mod service;
pub mod store;
pub mod types;
pub mod validation;

#[cfg(test)]
mod service_props;

pub use access::AccessControl;
pub use error::{Balance, InvalidArgument, LedgerError};
pub use service::LpLedger;
pub use store::{LedgerField, LedgerStore};
pub use types::{AccountInfo, LedgerEvent};
