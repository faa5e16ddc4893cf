//! Report data types.

use std::fmt;

use chrono::{DateTime, Utc};
use ledgerbook_shared::types::{AccountId, TransactionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::chart::{Account, NormalBalance};
use crate::ledger::{EntryType, Transaction, ValidationError};

/// Closed query window `[from, to]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// First instant included.
    pub from: DateTime<Utc>,
    /// Last instant included.
    pub to: DateTime<Utc>,
}

impl Period {
    /// Creates a period.
    ///
    /// # Errors
    ///
    /// Returns `PeriodReversed` if `from` is after `to`.
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Self, ValidationError> {
        if from > to {
            return Err(ValidationError::PeriodReversed);
        }
        Ok(Self { from, to })
    }

    /// Returns true if the instant falls inside the window.
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.from <= at && at <= self.to
    }
}

/// Identity and labels of an account referenced by a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRef {
    /// Account ID.
    pub id: AccountId,
    /// Account number.
    pub number: String,
    /// Account name.
    pub name: String,
}

impl From<&Account> for AccountRef {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            number: account.number.clone(),
            name: account.name.clone(),
        }
    }
}

/// Account heading of a ledger report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    /// Account ID.
    pub id: AccountId,
    /// Account number.
    pub number: String,
    /// Account name.
    pub name: String,
    /// Side the balance grows on.
    pub normal_balance: NormalBalance,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            number: account.number.clone(),
            name: account.name.clone(),
            normal_balance: account.normal_balance(),
        }
    }
}

/// One flattened entry of the journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    /// Owning transaction.
    pub transaction_id: TransactionId,
    /// Transaction date.
    pub date: DateTime<Utc>,
    /// Transaction memo.
    pub memo: String,
    /// Side of the entry.
    pub entry_type: EntryType,
    /// Target account.
    pub account: AccountRef,
    /// Entry value.
    pub value: Decimal,
}

/// Chronological journal of a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Journal {
    /// Transactions dated within the period, ordered.
    pub transactions: Vec<Transaction>,
    /// Their entries, flattened and annotated.
    pub entries: Vec<JournalEntry>,
}

impl Journal {
    /// Iterates over the flattened entries.
    pub fn iter(&self) -> std::slice::Iter<'_, JournalEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Journal {
    type Item = &'a JournalEntry;
    type IntoIter = std::slice::Iter<'a, JournalEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Opposite side of a ledger row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Counterpart {
    /// The single account on the opposite side.
    Account(AccountRef),
    /// More than one account on the opposite side.
    Many,
}

impl fmt::Display for Counterpart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Account(account) => write!(f, "{} {}", account.number, account.name),
            Self::Many => f.write_str("many"),
        }
    }
}

/// One row of an account ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerRow {
    /// Owning transaction.
    pub transaction_id: TransactionId,
    /// Transaction date.
    pub date: DateTime<Utc>,
    /// Transaction memo.
    pub memo: String,
    /// Side of the entry on this account.
    pub entry_type: EntryType,
    /// Entry value.
    pub value: Decimal,
    /// Running balance after this entry.
    pub balance: Decimal,
    /// Opposite side of the transaction.
    pub counterpart: Counterpart,
}

/// Ledger of one account over a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerReport {
    /// Account heading.
    pub account: AccountSummary,
    /// Balance before the period.
    pub opening_balance: Decimal,
    /// Balance at the end of the period.
    pub closing_balance: Decimal,
    /// Rows in order.
    pub rows: Vec<LedgerRow>,
}
