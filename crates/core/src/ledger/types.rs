//! Domain types returned across the ledger boundary.

use lpledger_shared::types::{Address, Amount};
use serde::{Deserialize, Serialize};

/// Consistent snapshot of an account's liquidity position.
///
/// Serialized as the ordered triple `[lp_amount, value, token_amount]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(Amount, Amount, Amount)", into = "(Amount, Amount, Amount)")]
pub struct AccountInfo {
    /// Total LP units, locked and unlocked.
    pub lp_amount: Amount,
    /// Base-asset value.
    pub value: Amount,
    /// Paired-token amount.
    pub token_amount: Amount,
}

impl From<AccountInfo> for (Amount, Amount, Amount) {
    fn from(info: AccountInfo) -> Self {
        (info.lp_amount, info.value, info.token_amount)
    }
}

impl From<(Amount, Amount, Amount)> for AccountInfo {
    fn from((lp_amount, value, token_amount): (Amount, Amount, Amount)) -> Self {
        Self {
            lp_amount,
            value,
            token_amount,
        }
    }
}

/// Record of an applied mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// Liquidity credited to an account.
    LiquidityAdded {
        /// Credited account.
        account: Address,
        /// LP units credited.
        lp_amount: Amount,
        /// Base-asset value credited.
        value: Amount,
        /// Paired-token amount credited.
        token_amount: Amount,
    },
    /// Liquidity debited from an account.
    LiquidityRemoved {
        /// Debited account.
        account: Address,
        /// LP units debited.
        lp_amount: Amount,
        /// Base-asset value debited.
        value: Amount,
        /// Paired-token amount debited.
        token_amount: Amount,
    },
    /// LP units reserved.
    LiquidityLocked {
        /// Affected account.
        account: Address,
        /// LP units locked.
        lp_amount: Amount,
    },
    /// Reserved LP units released.
    LiquidityUnlocked {
        /// Affected account.
        account: Address,
        /// LP units unlocked.
        lp_amount: Amount,
    },
    /// A caller was added to the allow-list.
    CallerGranted {
        /// The granted identity.
        caller: Address,
    },
    /// A caller was removed from the allow-list.
    CallerRevoked {
        /// The revoked identity.
        caller: Address,
    },
}
