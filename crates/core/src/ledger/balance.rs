//! Account balance calculations.
//!
//! Entry values are always positive; whether an entry raises or lowers an
//! account's balance depends only on the account's normal balance:
//! - debit-normal: balance += debit - credit
//! - credit-normal: balance += credit - debit

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entry::{Entry, EntryType};
use crate::chart::{Account, NormalBalance};

impl NormalBalance {
    /// Calculates the balance change for a pair of debit and credit amounts.
    #[must_use]
    pub fn balance_change(self, debit: Decimal, credit: Decimal) -> Decimal {
        match self {
            Self::Debit => debit - credit,
            Self::Credit => credit - debit,
        }
    }

    /// Returns true if entries on `side` raise the balance.
    #[must_use]
    pub const fn grows_with(self, side: EntryType) -> bool {
        matches!(
            (self, side),
            (Self::Debit, EntryType::Debit) | (Self::Credit, EntryType::Credit)
        )
    }
}

/// Signed effect of one entry on an account's balance.
///
/// `+value` when the entry's side matches the account's normal balance,
/// `-value` otherwise.
#[must_use]
pub fn signed_contribution(account: &Account, entry: &Entry, side: EntryType) -> Decimal {
    let (debit, credit) = match side {
        EntryType::Debit => (entry.value, Decimal::ZERO),
        EntryType::Credit => (Decimal::ZERO, entry.value),
    };
    account.normal_balance().balance_change(debit, credit)
}

/// Running balance after a number of applied entries.
///
/// - current_balance[N] = previous_balance[N] + change
/// - previous_balance[N] = current_balance[N-1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunningBalance {
    /// Number of entries applied so far.
    pub entry_count: u64,
    /// Balance before the last entry.
    pub previous_balance: Decimal,
    /// Balance after the last entry.
    pub current_balance: Decimal,
}

impl RunningBalance {
    /// Balance before any entry.
    #[must_use]
    pub const fn start() -> Self {
        Self {
            entry_count: 0,
            previous_balance: Decimal::ZERO,
            current_balance: Decimal::ZERO,
        }
    }

    /// Returns the balance after one more entry.
    #[must_use]
    pub fn next_entry(&self, balance_change: Decimal) -> Self {
        Self {
            entry_count: self.entry_count + 1,
            previous_balance: self.current_balance,
            current_balance: self.current_balance + balance_change,
        }
    }

    /// Applies an entry on `side` to `account`.
    #[must_use]
    pub fn apply(&self, account: &Account, entry: &Entry, side: EntryType) -> Self {
        self.next_entry(signed_contribution(account, entry, side))
    }
}
