//! Journal and ledger aggregation over a transaction log.
//!
//! Everything here is pure. The caller fetches the ordered transactions and
//! resolves the referenced accounts; these functions only walk and assemble.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use ledgerbook_shared::types::{AccountId, TransactionId};
use rust_decimal::Decimal;

use super::types::{
    AccountRef, AccountSummary, Counterpart, Journal, JournalEntry, LedgerReport, LedgerRow,
    Period,
};
use crate::chart::Account;
use crate::ledger::{EntryType, RunningBalance, Transaction};

/// A ledger row whose counterpart is not resolved yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLedgerRow {
    /// Owning transaction.
    pub transaction_id: TransactionId,
    /// Transaction date.
    pub date: DateTime<Utc>,
    /// Transaction memo.
    pub memo: String,
    /// Side of the entry on the ledger account.
    pub entry_type: EntryType,
    /// Entry value.
    pub value: Decimal,
    /// Running balance after the entry.
    pub balance: Decimal,
    /// Single opposite account, or `None` when there are several.
    pub counterpart: Option<AccountId>,
}

/// Result of walking an account's transactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerWalk {
    /// Running balance over everything dated before the period.
    pub opening_balance: Decimal,
    /// Running balance after the last row.
    pub closing_balance: Decimal,
    /// Rows dated within the period.
    pub rows: Vec<PendingLedgerRow>,
}

impl LedgerWalk {
    /// Distinct single counterparts, in first-appearance order.
    #[must_use]
    pub fn counterpart_ids(&self) -> Vec<AccountId> {
        dedup(self.rows.iter().filter_map(|row| row.counterpart))
    }
}

fn dedup(ids: impl Iterator<Item = AccountId>) -> Vec<AccountId> {
    let mut seen = Vec::new();
    for id in ids {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}

/// Service for assembling journal and ledger reports.
pub struct ReportService;

impl ReportService {
    /// Distinct accounts referenced by the transactions, in first-appearance order.
    #[must_use]
    pub fn referenced_accounts(transactions: &[Transaction]) -> Vec<AccountId> {
        dedup(transactions.iter().flat_map(|tx| {
            EntryType::BOTH
                .into_iter()
                .flat_map(move |side| tx.entries(side).iter().map(|e| e.account))
        }))
    }

    /// Flattens ordered transactions into the journal.
    ///
    /// Entries follow transaction order, then debits before credits, then list
    /// order.
    ///
    /// # Errors
    ///
    /// Returns the first account id missing from `accounts`.
    pub fn build_journal(
        transactions: Vec<Transaction>,
        accounts: &HashMap<AccountId, Account>,
    ) -> Result<Journal, AccountId> {
        let mut entries = Vec::new();
        for tx in &transactions {
            for side in EntryType::BOTH {
                for entry in tx.entries(side) {
                    let account = accounts.get(&entry.account).ok_or(entry.account)?;
                    entries.push(JournalEntry {
                        transaction_id: tx.id,
                        date: tx.date,
                        memo: tx.memo.clone(),
                        entry_type: side,
                        account: AccountRef::from(account),
                        value: entry.value,
                    });
                }
            }
        }
        Ok(Journal {
            transactions,
            entries,
        })
    }

    /// Walks an account's ordered transactions once, computing running balances.
    ///
    /// Transactions dated after the period are ignored. Every matching entry
    /// moves the running balance; only those dated within the period produce a
    /// row. A transaction yields one row per matching entry.
    #[must_use]
    pub fn walk_ledger(
        account: &Account,
        transactions: &[Transaction],
        period: &Period,
    ) -> LedgerWalk {
        let mut running = RunningBalance::start();
        let mut opening_balance = Decimal::ZERO;
        let mut rows = Vec::new();

        for tx in transactions.iter().filter(|tx| tx.date <= period.to) {
            for side in EntryType::BOTH {
                for entry in tx.entries(side).iter().filter(|e| e.account == account.id) {
                    running = running.apply(account, entry, side);
                    if tx.date < period.from {
                        opening_balance = running.current_balance;
                        continue;
                    }
                    rows.push(PendingLedgerRow {
                        transaction_id: tx.id,
                        date: tx.date,
                        memo: tx.memo.clone(),
                        entry_type: side,
                        value: entry.value,
                        balance: running.current_balance,
                        counterpart: match tx.entries(side.opposite()) {
                            [single] => Some(single.account),
                            _ => None,
                        },
                    });
                }
            }
        }

        LedgerWalk {
            opening_balance,
            closing_balance: running.current_balance,
            rows,
        }
    }

    /// Resolves counterparts and assembles the ledger report.
    ///
    /// # Errors
    ///
    /// Returns the first counterpart id missing from `accounts`.
    pub fn build_ledger(
        account: &Account,
        walk: LedgerWalk,
        accounts: &HashMap<AccountId, Account>,
    ) -> Result<LedgerReport, AccountId> {
        let rows = walk
            .rows
            .into_iter()
            .map(|row| {
                let counterpart = match row.counterpart {
                    Some(id) => Counterpart::Account(AccountRef::from(accounts.get(&id).ok_or(id)?)),
                    None => Counterpart::Many,
                };
                Ok(LedgerRow {
                    transaction_id: row.transaction_id,
                    date: row.date,
                    memo: row.memo,
                    entry_type: row.entry_type,
                    value: row.value,
                    balance: row.balance,
                    counterpart,
                })
            })
            .collect::<Result<Vec<_>, AccountId>>()?;

        Ok(LedgerReport {
            account: AccountSummary::from(account),
            opening_balance: walk.opening_balance,
            closing_balance: walk.closing_balance,
            rows,
        })
    }
}
