//! Owner and allow-list gate for mutating operations.

use std::collections::HashMap;

use lpledger_shared::types::Address;

use super::error::LedgerError;
use super::validation::require_identity;

/// Owner identity plus an allow-list of trusted callers.
///
/// Revoking a caller keeps its entry with a `false` flag; only `true` entries
/// authorize.
#[derive(Debug, Clone)]
pub struct AccessControl {
    owner: Address,
    allowed: HashMap<Address, bool>,
}

impl AccessControl {
    /// Creates the gate with a fixed owner and an empty allow-list.
    ///
    /// A nil owner yields a gate nobody can pass, since the nil address never
    /// authorizes.
    #[must_use]
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            allowed: HashMap::new(),
        }
    }

    /// The owner designated at construction.
    #[must_use]
    pub const fn owner(&self) -> Address {
        self.owner
    }

    /// Returns true if `caller` has a `true` allow-list flag.
    #[must_use]
    pub fn is_allowed(&self, caller: &Address) -> bool {
        self.allowed.get(caller).copied().unwrap_or(false)
    }

    /// Returns true if `caller` is the owner or allow-listed.
    ///
    /// The nil address is never authorized.
    #[must_use]
    pub fn authorize(&self, caller: &Address) -> bool {
        !caller.is_nil() && (*caller == self.owner || self.is_allowed(caller))
    }

    /// Fails with `Unauthorized` unless [`authorize`](Self::authorize) passes.
    pub fn ensure_authorized(&self, invoker: &Address) -> Result<(), LedgerError> {
        if self.authorize(invoker) {
            Ok(())
        } else {
            Err(LedgerError::Unauthorized { caller: *invoker })
        }
    }

    fn ensure_owner(&self, invoker: &Address) -> Result<(), LedgerError> {
        if !invoker.is_nil() && *invoker == self.owner {
            Ok(())
        } else {
            Err(LedgerError::Unauthorized { caller: *invoker })
        }
    }

    fn check_change(&self, invoker: &Address, caller: &Address) -> Result<(), LedgerError> {
        self.ensure_owner(invoker)?;
        require_identity("caller", caller)?;
        Ok(())
    }

    /// Sets the allow-list flag of `caller`. Owner only.
    pub fn grant(&mut self, invoker: &Address, caller: Address) -> Result<(), LedgerError> {
        self.check_change(invoker, &caller)?;
        self.allowed.insert(caller, true);
        Ok(())
    }

    /// Clears the allow-list flag of `caller`. Owner only.
    pub fn revoke(&mut self, invoker: &Address, caller: Address) -> Result<(), LedgerError> {
        self.check_change(invoker, &caller)?;
        self.allowed.insert(caller, false);
        Ok(())
    }

    /// Identities currently allowed, sorted.
    #[must_use]
    pub fn allowed_callers(&self) -> Vec<Address> {
        let mut callers: Vec<Address> = self
            .allowed
            .iter()
            .filter_map(|(caller, allowed)| allowed.then_some(*caller))
            .collect();
        callers.sort_unstable();
        callers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::error::InvalidArgument;

    #[test]
    fn test_owner_is_authorized() {
        let owner = Address::generate();
        let access = AccessControl::new(owner);
        assert_eq!(access.owner(), owner);
        assert!(access.authorize(&owner));
        assert!(!access.is_allowed(&owner));
    }

    #[test]
    fn test_stranger_is_not_authorized() {
        let access = AccessControl::new(Address::generate());
        let stranger = Address::generate();
        assert!(!access.authorize(&stranger));
        assert_eq!(
            access.ensure_authorized(&stranger),
            Err(LedgerError::Unauthorized { caller: stranger })
        );
    }

    #[test]
    fn test_grant_and_revoke() {
        let owner = Address::generate();
        let pool = Address::generate();
        let mut access = AccessControl::new(owner);

        access.grant(&owner, pool).unwrap();
        assert!(access.authorize(&pool));
        assert_eq!(access.allowed_callers(), vec![pool]);

        access.revoke(&owner, pool).unwrap();
        assert!(!access.authorize(&pool));
        assert!(access.allowed_callers().is_empty());
    }

    #[test]
    fn test_revoke_unknown_caller_is_noop() {
        let owner = Address::generate();
        let mut access = AccessControl::new(owner);
        let caller = Address::generate();
        access.revoke(&owner, caller).unwrap();
        assert!(!access.authorize(&caller));
    }

    #[test]
    fn test_only_owner_can_grant() {
        let owner = Address::generate();
        let pool = Address::generate();
        let mut access = AccessControl::new(owner);
        access.grant(&owner, pool).unwrap();

        // allow-listed callers still cannot manage the list
        let other = Address::generate();
        assert_eq!(
            access.grant(&pool, other),
            Err(LedgerError::Unauthorized { caller: pool })
        );
        assert_eq!(
            access.revoke(&pool, pool),
            Err(LedgerError::Unauthorized { caller: pool })
        );
        assert!(!access.is_allowed(&other));
        assert!(access.is_allowed(&pool));
    }

    #[test]
    fn test_nil_caller_rejected() {
        let owner = Address::generate();
        let mut access = AccessControl::new(owner);
        let expected = Err(LedgerError::InvalidArgument(InvalidArgument::MissingIdentity {
            argument: "caller",
        }));
        assert_eq!(access.grant(&owner, Address::nil()), expected);
        assert_eq!(access.revoke(&owner, Address::nil()), expected);
        assert!(access.allowed_callers().is_empty());
    }

    #[test]
    fn test_ownership_checked_before_identity() {
        let mut access = AccessControl::new(Address::generate());
        let stranger = Address::generate();
        assert_eq!(
            access.grant(&stranger, Address::nil()),
            Err(LedgerError::Unauthorized { caller: stranger })
        );
    }

    #[test]
    fn test_nil_owner_authorizes_nobody() {
        let mut access = AccessControl::new(Address::nil());
        let nil = Address::nil();
        assert!(!access.authorize(&nil));
        assert_eq!(
            access.ensure_authorized(&nil),
            Err(LedgerError::Unauthorized { caller: nil })
        );
        assert_eq!(
            access.grant(&nil, Address::generate()),
            Err(LedgerError::Unauthorized { caller: nil })
        );
        assert!(access.allowed_callers().is_empty());
    }
}
