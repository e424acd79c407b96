//! Argument checks shared by the mutating operations.

use lpledger_shared::types::{Address, Amount};

use super::error::InvalidArgument;

/// Rejects a zero quantity.
pub fn require_positive(argument: &'static str, amount: &Amount) -> Result<(), InvalidArgument> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(InvalidArgument::NonPositiveAmount { argument })
    }
}

/// Rejects the nil address.
pub fn require_identity(argument: &'static str, address: &Address) -> Result<(), InvalidArgument> {
    if address.is_nil() {
        Err(InvalidArgument::MissingIdentity { argument })
    } else {
        Ok(())
    }
}
