//! Property-based tests for LpLedger.
//!
//! - Zero default for accounts never credited
//! - `locked <= total` after every step of arbitrary operation sequences
//! - Rejected calls leave every balance unchanged
//! - add/remove and lock/unlock round trips
//! - Unauthorized callers cannot change anything

use lpledger_shared::types::{Address, Amount};
use proptest::prelude::*;

use super::error::LedgerError;
use super::service::LpLedger;
use super::types::{AccountInfo, LedgerEvent};

const ACCOUNT_COUNT: usize = 3;

/// A mutating call against one of the test accounts.
#[derive(Debug, Clone)]
enum Op {
    Add { account: usize, lp: u64, value: u64, token: u64 },
    Remove { account: usize, lp: u64, value: u64, token: u64 },
    Lock { account: usize, lp: u64 },
    Unlock { account: usize, lp: u64 },
}

/// Quantities include zero so that argument rejections are exercised too.
fn quantity() -> impl Strategy<Value = u64> {
    0u64..500
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let account = 0..ACCOUNT_COUNT;
    prop_oneof![
        (account.clone(), quantity(), quantity(), quantity())
            .prop_map(|(account, lp, value, token)| Op::Add { account, lp, value, token }),
        (account.clone(), quantity(), quantity(), quantity())
            .prop_map(|(account, lp, value, token)| Op::Remove { account, lp, value, token }),
        (account.clone(), quantity()).prop_map(|(account, lp)| Op::Lock { account, lp }),
        (account, quantity()).prop_map(|(account, lp)| Op::Unlock { account, lp }),
    ]
}

fn ops_strategy(max_len: usize) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(), 0..=max_len)
}

fn accounts() -> [Address; ACCOUNT_COUNT] {
    [
        Address::from_bytes([1; 16]),
        Address::from_bytes([2; 16]),
        Address::from_bytes([3; 16]),
    ]
}

fn owner() -> Address {
    Address::from_bytes([0xAA; 16])
}

fn apply(ledger: &mut LpLedger, invoker: &Address, op: &Op) -> Result<LedgerEvent, LedgerError> {
    let accounts = accounts();
    match *op {
        Op::Add { account, lp, value, token } => ledger.add_liquidity(
            invoker,
            accounts[account],
            Amount::from(lp),
            Amount::from(value),
            Amount::from(token),
        ),
        Op::Remove { account, lp, value, token } => ledger.remove_liquidity(
            invoker,
            accounts[account],
            Amount::from(lp),
            Amount::from(value),
            Amount::from(token),
        ),
        Op::Lock { account, lp } => ledger.lock_liquidity(invoker, accounts[account], Amount::from(lp)),
        Op::Unlock { account, lp } => {
            ledger.unlock_liquidity(invoker, accounts[account], Amount::from(lp))
        }
    }
}

/// Every field of every test account.
fn snapshot(ledger: &LpLedger) -> Vec<(AccountInfo, Amount)> {
    accounts()
        .iter()
        .map(|a| (ledger.account_info(a), ledger.locked_lp_amount(a)))
        .collect()
}

fn replay(ops: &[Op]) -> LpLedger {
    let mut ledger = LpLedger::new(owner());
    for op in ops {
        let _ = apply(&mut ledger, &owner(), op);
    }
    ledger
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* history, an address never credited reads zero everywhere.
    #[test]
    fn prop_uncredited_account_reads_zero(ops in ops_strategy(30)) {
        let ledger = replay(&ops);
        let stranger = Address::from_bytes([9; 16]);

        prop_assert_eq!(ledger.lp_amount(&stranger), Amount::zero());
        prop_assert_eq!(ledger.locked_lp_amount(&stranger), Amount::zero());
        prop_assert_eq!(ledger.account_value(&stranger), Amount::zero());
        prop_assert_eq!(ledger.account_token_amount(&stranger), Amount::zero());
        prop_assert_eq!(ledger.available_lp_amount(&stranger), Amount::zero());
    }

    /// *For any* sequence of operations, locked LP never exceeds total LP and
    /// available LP is exactly their difference.
    #[test]
    fn prop_locked_never_exceeds_total(ops in ops_strategy(40)) {
        let mut ledger = LpLedger::new(owner());
        for op in &ops {
            let _ = apply(&mut ledger, &owner(), op);
            for account in &accounts() {
                let total = ledger.lp_amount(account);
                let locked = ledger.locked_lp_amount(account);
                prop_assert!(locked <= total, "locked {} > total {}", locked, total);
                prop_assert_eq!(
                    ledger.available_lp_amount(account),
                    total.checked_sub(&locked).unwrap()
                );
            }
        }
    }

    /// *For any* operation that fails, no balance changes.
    #[test]
    fn prop_rejection_is_atomic(ops in ops_strategy(40)) {
        let mut ledger = LpLedger::new(owner());
        for op in &ops {
            let before = snapshot(&ledger);
            if apply(&mut ledger, &owner(), op).is_err() {
                prop_assert_eq!(snapshot(&ledger), before, "failed {:?} mutated state", op);
            }
        }
    }

    /// *For any* history, adding then removing the same triple restores all
    /// four fields.
    #[test]
    fn prop_add_remove_round_trip(
        ops in ops_strategy(20),
        account in 0..ACCOUNT_COUNT,
        lp in 1u64..1_000,
        value in 1u64..1_000,
        token in 1u64..1_000,
    ) {
        let mut ledger = replay(&ops);
        let before = snapshot(&ledger);

        let add = Op::Add { account, lp, value, token };
        let remove = Op::Remove { account, lp, value, token };
        prop_assert!(apply(&mut ledger, &owner(), &add).is_ok());
        prop_assert!(apply(&mut ledger, &owner(), &remove).is_ok());

        prop_assert_eq!(snapshot(&ledger), before);
    }

    /// *For any* history and any lockable amount, lock then unlock restores
    /// locked and available LP.
    #[test]
    fn prop_lock_unlock_round_trip(
        ops in ops_strategy(20),
        account in 0..ACCOUNT_COUNT,
        fraction in 1u64..=100,
    ) {
        let mut ledger = replay(&ops);
        let address = accounts()[account];
        let available = ledger.available_lp_amount(&address);
        prop_assume!(available.is_positive());

        // lock a share of what is available, at least one unit
        let units = available.to_u64().unwrap();
        let amount = Amount::from((units * fraction / 100).max(1));
        let before = snapshot(&ledger);
        let available_before = ledger.available_lp_amount(&address);

        prop_assert!(ledger.lock_liquidity(&owner(), address, amount.clone()).is_ok());
        prop_assert!(ledger.unlock_liquidity(&owner(), address, amount).is_ok());

        prop_assert_eq!(snapshot(&ledger), before);
        prop_assert_eq!(ledger.available_lp_amount(&address), available_before);
    }

    /// *For any* history, asking to remove or lock more than the unlocked LP
    /// fails with InsufficientLiquidity and changes nothing.
    #[test]
    fn prop_over_request_rejected(
        ops in ops_strategy(20),
        account in 0..ACCOUNT_COUNT,
        extra in 1u64..1_000,
    ) {
        let mut ledger = replay(&ops);
        let address = accounts()[account];
        let too_much = &ledger.available_lp_amount(&address) + &Amount::from(extra);
        let before = snapshot(&ledger);

        let removed = ledger.remove_liquidity(
            &owner(),
            address,
            too_much.clone(),
            Amount::from(1u64),
            Amount::from(1u64),
        );
        let is_shortfall = matches!(removed, Err(LedgerError::InsufficientLiquidity { .. }));
        prop_assert!(is_shortfall);

        let locked = ledger.lock_liquidity(&owner(), address, too_much);
        let is_shortfall = matches!(locked, Err(LedgerError::InsufficientLiquidity { .. }));
        prop_assert!(is_shortfall);

        prop_assert_eq!(snapshot(&ledger), before);
    }

    /// *For any* operation by a caller that is neither owner nor allowed,
    /// the call is Unauthorized and nothing changes.
    #[test]
    fn prop_stranger_cannot_mutate(history in ops_strategy(20), attempts in ops_strategy(20)) {
        let mut ledger = replay(&history);
        let stranger = Address::from_bytes([0xBB; 16]);
        let before = snapshot(&ledger);

        for op in &attempts {
            prop_assert_eq!(
                apply(&mut ledger, &stranger, op),
                Err(LedgerError::Unauthorized { caller: stranger })
            );
        }
        prop_assert_eq!(snapshot(&ledger), before);
    }
}
