//! LP position ledger operations.
//!
//! `LpLedger` composes the [`AccessControl`] gate with the [`LedgerStore`].
//! Every mutating operation runs its checks in a fixed order before the first
//! write, so a rejected call leaves the ledger untouched:
//! 1. the invoker must be the owner or allow-listed,
//! 2. the target account must not be the nil address,
//! 3. every quantity must be strictly positive,
//! 4. the relevant balance must cover the request.
//!
//! # Caller contract
//!
//! `add_liquidity` and `remove_liquidity` take the `(lp_amount, value,
//! token_amount)` triple as given. The ledger does not check that value and
//! token amount are proportional to the LP units; the calling pool engine is
//! trusted to pass consistent triples.

use lpledger_shared::types::{Address, Amount};
use tracing::{debug, info, warn};

use super::access::AccessControl;
use super::error::{Balance, LedgerError};
use super::store::{LedgerField, LedgerStore};
use super::types::{AccountInfo, LedgerEvent};
use super::validation::{require_identity, require_positive};

/// Liquidity-provider bookkeeping ledger.
#[derive(Debug, Clone)]
pub struct LpLedger {
    access: AccessControl,
    store: LedgerStore,
}

impl LpLedger {
    /// Creates an empty ledger owned by `owner`.
    ///
    /// `owner` should not be nil: a nil owner can never mutate the ledger. Use
    /// [`with_allowed_callers`](Self::with_allowed_callers) to have it checked.
    #[must_use]
    pub fn new(owner: Address) -> Self {
        Self {
            access: AccessControl::new(owner),
            store: LedgerStore::new(),
        }
    }

    /// Creates an empty ledger and has the owner grant each of `callers`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the owner or any caller is the nil
    /// address.
    pub fn with_allowed_callers(
        owner: Address,
        callers: impl IntoIterator<Item = Address>,
    ) -> Result<Self, LedgerError> {
        require_identity("owner", &owner)?;
        let mut ledger = Self::new(owner);
        for caller in callers {
            ledger.grant_caller(&owner, caller)?;
        }
        Ok(ledger)
    }

    /// Read access to the gate.
    #[must_use]
    pub const fn access(&self) -> &AccessControl {
        &self.access
    }

    /// Read access to the balances.
    #[must_use]
    pub const fn store(&self) -> &LedgerStore {
        &self.store
    }

    // ========================================================================
    // Access control
    // ========================================================================

    /// The owner designated at construction.
    #[must_use]
    pub const fn owner(&self) -> Address {
        self.access.owner()
    }

    /// Returns true if `caller` may invoke mutating operations.
    #[must_use]
    pub fn is_authorized(&self, caller: &Address) -> bool {
        self.access.authorize(caller)
    }

    /// Returns true if `caller` holds a `true` allow-list flag.
    #[must_use]
    pub fn is_allowed_caller(&self, caller: &Address) -> bool {
        self.access.is_allowed(caller)
    }

    /// Currently allowed callers, sorted.
    #[must_use]
    pub fn allowed_callers(&self) -> Vec<Address> {
        self.access.allowed_callers()
    }

    /// Adds `caller` to the allow-list. Owner only.
    pub fn grant_caller(
        &mut self,
        invoker: &Address,
        caller: Address,
    ) -> Result<LedgerEvent, LedgerError> {
        let outcome = self
            .access
            .grant(invoker, caller)
            .map(|()| LedgerEvent::CallerGranted { caller });
        log_outcome("grant_caller", invoker, &outcome);
        outcome
    }

    /// Clears the allow-list flag of `caller`. Owner only.
    pub fn revoke_caller(
        &mut self,
        invoker: &Address,
        caller: Address,
    ) -> Result<LedgerEvent, LedgerError> {
        let outcome = self
            .access
            .revoke(invoker, caller)
            .map(|()| LedgerEvent::CallerRevoked { caller });
        log_outcome("revoke_caller", invoker, &outcome);
        outcome
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Credits LP units, value and token amount to `account`.
    ///
    /// There is no upper bound; balances grow as the pool engine mints.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if `invoker` is neither owner nor allow-listed.
    /// - `InvalidArgument` if `account` is nil or any quantity is zero.
    pub fn add_liquidity(
        &mut self,
        invoker: &Address,
        account: Address,
        lp_amount: Amount,
        value: Amount,
        token_amount: Amount,
    ) -> Result<LedgerEvent, LedgerError> {
        let outcome = self.apply_add(invoker, account, lp_amount, value, token_amount);
        log_outcome("add_liquidity", invoker, &outcome);
        outcome
    }

    /// Debits LP units, value and token amount from `account`.
    ///
    /// Only unlocked LP units can be removed.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if `invoker` is neither owner nor allow-listed.
    /// - `InvalidArgument` if `account` is nil or any quantity is zero.
    /// - `InsufficientLiquidity` if `lp_amount` exceeds the unlocked LP units,
    ///   or `value`/`token_amount` exceed the account's balances.
    pub fn remove_liquidity(
        &mut self,
        invoker: &Address,
        account: Address,
        lp_amount: Amount,
        value: Amount,
        token_amount: Amount,
    ) -> Result<LedgerEvent, LedgerError> {
        let outcome = self.apply_remove(invoker, account, lp_amount, value, token_amount);
        log_outcome("remove_liquidity", invoker, &outcome);
        outcome
    }

    /// Reserves `lp_amount` of the account's unlocked LP units.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if `invoker` is neither owner nor allow-listed.
    /// - `InvalidArgument` if `account` is nil or `lp_amount` is zero.
    /// - `InsufficientLiquidity` if `lp_amount` exceeds the unlocked LP units.
    pub fn lock_liquidity(
        &mut self,
        invoker: &Address,
        account: Address,
        lp_amount: Amount,
    ) -> Result<LedgerEvent, LedgerError> {
        let outcome = self.apply_lock(invoker, account, lp_amount);
        log_outcome("lock_liquidity", invoker, &outcome);
        outcome
    }

    /// Releases `lp_amount` of the account's locked LP units.
    ///
    /// This is a bookkeeping release only; no assets move. Hosts exposing the
    /// legacy `withdraw_liquidity` entry point route it here.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if `invoker` is neither owner nor allow-listed.
    /// - `InvalidArgument` if `account` is nil or `lp_amount` is zero.
    /// - `InsufficientLiquidity` if `lp_amount` exceeds the locked LP units.
    pub fn unlock_liquidity(
        &mut self,
        invoker: &Address,
        account: Address,
        lp_amount: Amount,
    ) -> Result<LedgerEvent, LedgerError> {
        let outcome = self.apply_unlock(invoker, account, lp_amount);
        log_outcome("unlock_liquidity", invoker, &outcome);
        outcome
    }

    fn apply_add(
        &mut self,
        invoker: &Address,
        account: Address,
        lp_amount: Amount,
        value: Amount,
        token_amount: Amount,
    ) -> Result<LedgerEvent, LedgerError> {
        self.access.ensure_authorized(invoker)?;
        require_identity("account", &account)?;
        require_positive("lp_amount", &lp_amount)?;
        require_positive("value", &value)?;
        require_positive("token_amount", &token_amount)?;

        self.store.credit(LedgerField::TotalLp, account, &lp_amount);
        self.store.credit(LedgerField::Value, account, &value);
        self.store.credit(LedgerField::TokenAmount, account, &token_amount);

        Ok(LedgerEvent::LiquidityAdded {
            account,
            lp_amount,
            value,
            token_amount,
        })
    }

    fn apply_remove(
        &mut self,
        invoker: &Address,
        account: Address,
        lp_amount: Amount,
        value: Amount,
        token_amount: Amount,
    ) -> Result<LedgerEvent, LedgerError> {
        self.access.ensure_authorized(invoker)?;
        require_identity("account", &account)?;
        require_positive("lp_amount", &lp_amount)?;
        require_positive("value", &value)?;
        require_positive("token_amount", &token_amount)?;

        self.ensure_unlocked(account, &lp_amount)?;
        let total_after = self.remaining(
            account,
            LedgerField::TotalLp,
            Balance::UnlockedLp,
            &lp_amount,
        )?;
        let value_after = self.remaining(account, LedgerField::Value, Balance::Value, &value)?;
        let token_after = self.remaining(
            account,
            LedgerField::TokenAmount,
            Balance::TokenAmount,
            &token_amount,
        )?;

        // Every check has passed; nothing below can fail.
        self.store.set(LedgerField::TotalLp, account, total_after);
        self.store.set(LedgerField::Value, account, value_after);
        self.store.set(LedgerField::TokenAmount, account, token_after);

        Ok(LedgerEvent::LiquidityRemoved {
            account,
            lp_amount,
            value,
            token_amount,
        })
    }

    fn apply_lock(
        &mut self,
        invoker: &Address,
        account: Address,
        lp_amount: Amount,
    ) -> Result<LedgerEvent, LedgerError> {
        self.access.ensure_authorized(invoker)?;
        require_identity("account", &account)?;
        require_positive("lp_amount", &lp_amount)?;
        self.ensure_unlocked(account, &lp_amount)?;

        self.store.credit(LedgerField::LockedLp, account, &lp_amount);

        Ok(LedgerEvent::LiquidityLocked { account, lp_amount })
    }

    fn apply_unlock(
        &mut self,
        invoker: &Address,
        account: Address,
        lp_amount: Amount,
    ) -> Result<LedgerEvent, LedgerError> {
        self.access.ensure_authorized(invoker)?;
        require_identity("account", &account)?;
        require_positive("lp_amount", &lp_amount)?;
        let locked_after = self.remaining(
            account,
            LedgerField::LockedLp,
            Balance::LockedLp,
            &lp_amount,
        )?;

        self.store.set(LedgerField::LockedLp, account, locked_after);

        Ok(LedgerEvent::LiquidityUnlocked { account, lp_amount })
    }

    fn ensure_unlocked(&self, account: Address, requested: &Amount) -> Result<(), LedgerError> {
        let available = self.store.unlocked_lp(&account);
        if available < *requested {
            return Err(LedgerError::InsufficientLiquidity {
                account,
                balance: Balance::UnlockedLp,
                requested: requested.clone(),
                available,
            });
        }
        Ok(())
    }

    /// Balance of `field` after subtracting `requested`, without writing it.
    fn remaining(
        &self,
        account: Address,
        field: LedgerField,
        balance: Balance,
        requested: &Amount,
    ) -> Result<Amount, LedgerError> {
        let available = self.store.lookup(field, &account);
        match available.checked_sub(requested) {
            Some(after) => Ok(after),
            None => Err(LedgerError::InsufficientLiquidity {
                account,
                balance,
                requested: requested.clone(),
                available,
            }),
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// LP units not currently locked.
    #[must_use]
    pub fn available_lp_amount(&self, account: &Address) -> Amount {
        self.store.unlocked_lp(account)
    }

    /// LP units currently locked.
    #[must_use]
    pub fn locked_lp_amount(&self, account: &Address) -> Amount {
        self.store.lookup(LedgerField::LockedLp, account)
    }

    /// Base-asset value attributed to the account.
    #[must_use]
    pub fn account_value(&self, account: &Address) -> Amount {
        self.store.lookup(LedgerField::Value, account)
    }

    /// Paired-token amount attributed to the account.
    #[must_use]
    pub fn account_token_amount(&self, account: &Address) -> Amount {
        self.store.lookup(LedgerField::TokenAmount, account)
    }

    /// Total LP units, locked and unlocked.
    #[must_use]
    pub fn lp_amount(&self, account: &Address) -> Amount {
        self.store.lookup(LedgerField::TotalLp, account)
    }

    /// `(lp_amount, value, token_amount)` read together.
    #[must_use]
    pub fn account_info(&self, account: &Address) -> AccountInfo {
        AccountInfo {
            lp_amount: self.lp_amount(account),
            value: self.account_value(account),
            token_amount: self.account_token_amount(account),
        }
    }

    /// Every account ever credited, sorted.
    #[must_use]
    pub fn accounts(&self) -> Vec<Address> {
        self.store.accounts()
    }
}

fn log_outcome(
    operation: &'static str,
    invoker: &Address,
    outcome: &Result<LedgerEvent, LedgerError>,
) {
    match outcome {
        Ok(event) => info!(operation, %invoker, ?event, "ledger updated"),
        Err(err @ LedgerError::Unauthorized { .. }) => {
            warn!(operation, %invoker, error = %err, "call rejected");
        }
        Err(err) => debug!(operation, %invoker, code = err.error_code(), error = %err, "call rejected"),
    }
}
