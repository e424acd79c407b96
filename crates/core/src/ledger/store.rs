//! Per-account balance storage.
//!
//! Four parallel mappings share one key domain. Reads are total: an account
//! that was never credited reads as zero in every field. Entries are never
//! deleted, so a fully drained account is indistinguishable from a fresh one.

use std::collections::{BTreeSet, HashMap};

use lpledger_shared::types::{Address, Amount};

/// One of the four per-account quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedgerField {
    /// LP units credited minus LP units debited.
    TotalLp,
    /// Portion of `TotalLp` currently reserved.
    LockedLp,
    /// Base-asset value attributed to the account's liquidity.
    Value,
    /// Paired-token amount attributed to the account's liquidity.
    TokenAmount,
}

impl LedgerField {
    /// Every field, in storage order.
    pub const ALL: [Self; 4] = [Self::TotalLp, Self::LockedLp, Self::Value, Self::TokenAmount];
}

/// Owned ledger state.
///
/// Mutation is crate-private; outside callers go through
/// [`LpLedger`](super::LpLedger), which enforces authorization and the
/// `locked <= total` invariant.
#[derive(Debug, Clone, Default)]
pub struct LedgerStore {
    total_lp: HashMap<Address, Amount>,
    locked_lp: HashMap<Address, Amount>,
    value: HashMap<Address, Amount>,
    token_amount: HashMap<Address, Amount>,
}

impl LedgerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn column(&self, field: LedgerField) -> &HashMap<Address, Amount> {
        match field {
            LedgerField::TotalLp => &self.total_lp,
            LedgerField::LockedLp => &self.locked_lp,
            LedgerField::Value => &self.value,
            LedgerField::TokenAmount => &self.token_amount,
        }
    }

    fn column_mut(&mut self, field: LedgerField) -> &mut HashMap<Address, Amount> {
        match field {
            LedgerField::TotalLp => &mut self.total_lp,
            LedgerField::LockedLp => &mut self.locked_lp,
            LedgerField::Value => &mut self.value,
            LedgerField::TokenAmount => &mut self.token_amount,
        }
    }

    /// Reads one field, zero if the account has no entry.
    #[must_use]
    pub fn lookup(&self, field: LedgerField, account: &Address) -> Amount {
        self.column(field).get(account).cloned().unwrap_or_default()
    }

    /// `TotalLp - LockedLp` for the account.
    #[must_use]
    pub fn unlocked_lp(&self, account: &Address) -> Amount {
        let total = self.lookup(LedgerField::TotalLp, account);
        let locked = self.lookup(LedgerField::LockedLp, account);
        // locked <= total holds after every operation
        total.saturating_sub(&locked)
    }

    /// Every account with an entry in any field, sorted.
    #[must_use]
    pub fn accounts(&self) -> Vec<Address> {
        LedgerField::ALL
            .iter()
            .flat_map(|field| self.column(*field).keys().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Adds `amount` to a field, creating the entry on first credit.
    pub(crate) fn credit(&mut self, field: LedgerField, account: Address, amount: &Amount) {
        *self.column_mut(field).entry(account).or_default() += amount;
    }

    /// Overwrites a field with an already validated balance.
    pub(crate) fn set(&mut self, field: LedgerField, account: Address, amount: Amount) {
        self.column_mut(field).insert(account, amount);
    }
}
