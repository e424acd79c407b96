//! Serialized ledger calls accepted by the host.

use lpledger_core::ledger::{AccountInfo, LedgerError, LedgerEvent, LpLedger};
use lpledger_shared::types::{Address, Amount};
use serde::{Deserialize, Serialize};

/// One ledger call, tagged by `"op"`.
///
/// Mutations carry the invoking identity in `caller`; queries need none.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", deny_unknown_fields)]
pub enum Command {
    /// Credit liquidity to an account.
    AddLiquidity {
        /// Invoking identity.
        caller: Address,
        /// Credited account.
        account: Address,
        /// LP units.
        lp_amount: Amount,
        /// Base-asset value.
        value: Amount,
        /// Paired-token amount.
        token_amount: Amount,
    },
    /// Debit liquidity from an account.
    RemoveLiquidity {
        /// Invoking identity.
        caller: Address,
        /// Debited account.
        account: Address,
        /// LP units.
        lp_amount: Amount,
        /// Base-asset value.
        value: Amount,
        /// Paired-token amount.
        token_amount: Amount,
    },
    /// Reserve unlocked LP units.
    LockLiquidity {
        /// Invoking identity.
        caller: Address,
        /// Affected account.
        account: Address,
        /// LP units.
        lp_amount: Amount,
    },
    /// Release locked LP units.
    #[serde(alias = "withdraw_liquidity")]
    UnlockLiquidity {
        /// Invoking identity.
        caller: Address,
        /// Affected account.
        account: Address,
        /// LP units.
        lp_amount: Amount,
    },
    /// Allow-list an identity.
    GrantCaller {
        /// Invoking identity; must be the owner.
        caller: Address,
        /// Identity to allow.
        address: Address,
    },
    /// Remove an identity from the allow-list.
    RevokeCaller {
        /// Invoking identity; must be the owner.
        caller: Address,
        /// Identity to revoke.
        address: Address,
    },
    /// Total LP units.
    LpAmount {
        /// Queried account.
        account: Address,
    },
    /// Locked LP units.
    LockedLpAmount {
        /// Queried account.
        account: Address,
    },
    /// Unlocked LP units.
    AvailableLpAmount {
        /// Queried account.
        account: Address,
    },
    /// Base-asset value.
    AccountValue {
        /// Queried account.
        account: Address,
    },
    /// Paired-token amount.
    AccountTokenAmount {
        /// Queried account.
        account: Address,
    },
    /// `[lp_amount, value, token_amount]`.
    AccountInfo {
        /// Queried account.
        account: Address,
    },
    /// Allow-list flag of an identity.
    IsAllowedCaller {
        /// Queried identity.
        address: Address,
    },
}

/// Value returned by a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum QueryResult {
    /// A single balance.
    Amount(Amount),
    /// An account snapshot.
    AccountInfo(AccountInfo),
    /// A flag.
    Flag(bool),
}

/// What an accepted command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// A mutation was applied.
    Event(LedgerEvent),
    /// A query was answered.
    Query(QueryResult),
}

impl Command {
    /// Returns true for commands that never change the ledger.
    #[must_use]
    pub const fn is_query(&self) -> bool {
        !matches!(
            self,
            Self::AddLiquidity { .. }
                | Self::RemoveLiquidity { .. }
                | Self::LockLiquidity { .. }
                | Self::UnlockLiquidity { .. }
                | Self::GrantCaller { .. }
                | Self::RevokeCaller { .. }
        )
    }

    /// Runs the command against `ledger`.
    pub fn execute(self, ledger: &mut LpLedger) -> Result<Response, LedgerError> {
        let response = match self {
            Self::AddLiquidity {
                caller,
                account,
                lp_amount,
                value,
                token_amount,
            } => Response::Event(ledger.add_liquidity(
                &caller,
                account,
                lp_amount,
                value,
                token_amount,
            )?),
            Self::RemoveLiquidity {
                caller,
                account,
                lp_amount,
                value,
                token_amount,
            } => Response::Event(ledger.remove_liquidity(
                &caller,
                account,
                lp_amount,
                value,
                token_amount,
            )?),
            Self::LockLiquidity {
                caller,
                account,
                lp_amount,
            } => Response::Event(ledger.lock_liquidity(&caller, account, lp_amount)?),
            Self::UnlockLiquidity {
                caller,
                account,
                lp_amount,
            } => Response::Event(ledger.unlock_liquidity(&caller, account, lp_amount)?),
            Self::GrantCaller { caller, address } => {
                Response::Event(ledger.grant_caller(&caller, address)?)
            }
            Self::RevokeCaller { caller, address } => {
                Response::Event(ledger.revoke_caller(&caller, address)?)
            }
            Self::LpAmount { account } => {
                Response::Query(QueryResult::Amount(ledger.lp_amount(&account)))
            }
            Self::LockedLpAmount { account } => {
                Response::Query(QueryResult::Amount(ledger.locked_lp_amount(&account)))
            }
            Self::AvailableLpAmount { account } => {
                Response::Query(QueryResult::Amount(ledger.available_lp_amount(&account)))
            }
            Self::AccountValue { account } => {
                Response::Query(QueryResult::Amount(ledger.account_value(&account)))
            }
            Self::AccountTokenAmount { account } => {
                Response::Query(QueryResult::Amount(ledger.account_token_amount(&account)))
            }
            Self::AccountInfo { account } => {
                Response::Query(QueryResult::AccountInfo(ledger.account_info(&account)))
            }
            Self::IsAllowedCaller { address } => {
                Response::Query(QueryResult::Flag(ledger.is_allowed_caller(&address)))
            }
        };
        Ok(response)
    }
}
