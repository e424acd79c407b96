//! Ledger error types.
//!
//! Every error is a rejection: the call that produced it changed nothing.

use lpledger_shared::types::{Address, Amount};
use thiserror::Error;

/// Reasons an argument is rejected before any state is read for mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidArgument {
    /// A quantity that must be strictly positive was zero.
    #[error("{argument} must be > 0")]
    NonPositiveAmount {
        /// Name of the offending argument.
        argument: &'static str,
    },

    /// A required identity was the nil address.
    #[error("{argument} can't be null")]
    MissingIdentity {
        /// Name of the offending argument.
        argument: &'static str,
    },
}

/// The balance an operation found short.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Balance {
    /// LP units not currently locked.
    UnlockedLp,
    /// LP units currently locked.
    LockedLp,
    /// Base-asset value.
    Value,
    /// Paired-token amount.
    TokenAmount,
}

impl std::fmt::Display for Balance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnlockedLp => write!(f, "unlocked lp"),
            Self::LockedLp => write!(f, "locked lp"),
            Self::Value => write!(f, "value"),
            Self::TokenAmount => write!(f, "token amount"),
        }
    }
}

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The invoker is neither the owner nor an allow-listed caller.
    #[error("Caller {caller} is not allowed to call this method")]
    Unauthorized {
        /// The rejected invoker.
        caller: Address,
    },

    /// A required identity is absent or a quantity is not strictly positive.
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),

    /// The requested amount exceeds the relevant balance.
    #[error("Insufficient {balance} for account {account}: requested {requested}, available {available}")]
    InsufficientLiquidity {
        /// The account whose balance was checked.
        account: Address,
        /// Which balance fell short.
        balance: Balance,
        /// Amount the operation asked for.
        requested: Amount,
        /// Amount the balance holds.
        available: Amount,
    },
}

impl LedgerError {
    /// Returns the error code reported to external callers.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "UNAUTHORIZED",
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::InsufficientLiquidity { .. } => "INSUFFICIENT_LIQUIDITY",
        }
    }
}
