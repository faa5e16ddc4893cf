//! Ledger service: validated writes and report queries over a record store.
//!
//! Writes to one chart are serialized by a per-chart writer lock held across
//! validation and the store write, so two concurrent attaches can neither
//! both pass the duplicate-number rule nor race on the parent's synthetic flip.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use futures::future::try_join_all;
use ledgerbook_shared::types::{AccountId, ChartId};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, warn};

use super::error::LedgerError;
use super::transaction::{Transaction, TransactionInput};
use super::validation::validate_transaction;
use crate::chart::{
    Account, AccountInput, ChartInput, ChartOfAccounts, validate_account, validate_chart,
};
use crate::reports::{Journal, LedgerReport, Period, ReportService};
use crate::store::RecordStore;

/// Ledger service over a record store.
pub struct LedgerService<S: RecordStore> {
    store: Arc<S>,
    writers: DashMap<ChartId, Arc<Mutex<()>>>,
}

impl<S: RecordStore> LedgerService<S> {
    /// Create a new ledger service.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            writers: DashMap::new(),
        }
    }

    /// The underlying record store.
    #[must_use]
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Takes the chart's writer lock. Lock entries are only created for
    /// charts the store knows, so the table is bounded by the chart count.
    async fn lock_chart(&self, chart_id: ChartId) -> Result<OwnedMutexGuard<()>, LedgerError> {
        let existing = self.writers.get(&chart_id).map(|lock| Arc::clone(lock.value()));
        let lock = match existing {
            Some(lock) => lock,
            None => {
                self.require_chart(chart_id).await?;
                Arc::clone(self.writers.entry(chart_id).or_default().value())
            }
        };
        Ok(lock.lock_owned().await)
    }

    #[cfg(test)]
    pub(crate) fn writer_count(&self) -> usize {
        self.writers.len()
    }

    async fn require_chart(&self, chart_id: ChartId) -> Result<ChartOfAccounts, LedgerError> {
        self.store
            .find_chart(chart_id)
            .await?
            .ok_or(LedgerError::ChartNotFound(chart_id))
    }

    /// Looks up accounts concurrently, keyed by id.
    async fn resolve_accounts(
        &self,
        ids: &[AccountId],
    ) -> Result<HashMap<AccountId, Account>, LedgerError> {
        let found = try_join_all(ids.iter().map(|id| self.store.find_account(*id))).await?;
        ids.iter()
            .zip(found)
            .map(|(id, account)| {
                account
                    .map(|a| (*id, a))
                    .ok_or(LedgerError::AccountNotFound(*id))
            })
            .collect()
    }

    // ========== Queries ==========

    /// List all charts of accounts.
    pub async fn charts(&self) -> Result<Vec<ChartOfAccounts>, LedgerError> {
        let charts = self.store.list_charts().await?;
        debug!(count = charts.len(), "listed charts of accounts");
        Ok(charts)
    }

    /// Fetch one chart of accounts with its accounts.
    pub async fn chart(&self, chart_id: ChartId) -> Result<ChartOfAccounts, LedgerError> {
        self.require_chart(chart_id).await
    }

    /// List the accounts of a chart in insertion order.
    pub async fn accounts(&self, chart_id: ChartId) -> Result<Vec<Account>, LedgerError> {
        Ok(self.require_chart(chart_id).await?.accounts)
    }

    /// Fetch one account of a chart.
    pub async fn account(
        &self,
        chart_id: ChartId,
        account_id: AccountId,
    ) -> Result<Account, LedgerError> {
        let chart = self.require_chart(chart_id).await?;
        chart
            .account(account_id)
            .cloned()
            .ok_or(LedgerError::AccountNotFound(account_id))
    }

    /// List the transactions of a chart ordered by date, then posting time.
    pub async fn transactions(&self, chart_id: ChartId) -> Result<Vec<Transaction>, LedgerError> {
        self.require_chart(chart_id).await?;
        Ok(self.store.list_transactions(chart_id).await?)
    }

    // ========== Charts & accounts ==========

    /// Validate and store a chart of accounts.
    pub async fn validate_and_store_chart(
        &self,
        input: ChartInput,
    ) -> Result<ChartOfAccounts, LedgerError> {
        let new = validate_chart(&input, Utc::now()).inspect_err(|e| {
            warn!(error = %e, "chart of accounts rejected");
        })?;
        let chart = self.store.insert_chart(new).await?;
        info!(chart_id = %chart.id, name = %chart.name, "chart of accounts created");
        Ok(chart)
    }

    /// Validate an account definition and attach it to a chart.
    ///
    /// The new account is analytic; its parent, if any, becomes synthetic.
    /// `retainedEarnings: true` designates it afterwards in a second store
    /// write. If that write fails the account stays attached and the error is
    /// returned; designating again through `designate_retained_earnings`
    /// completes it.
    pub async fn validate_and_attach_account(
        &self,
        chart_id: ChartId,
        input: AccountInput,
    ) -> Result<Account, LedgerError> {
        let _writer = self.lock_chart(chart_id).await?;
        let chart = self.require_chart(chart_id).await?;

        let valid = validate_account(self.store.as_ref(), &chart, &input, None)
            .await
            .inspect_err(|e| warn!(chart_id = %chart_id, error = %e, "account rejected"))?;

        let account = self.store.attach_account(chart_id, valid.account).await?;
        info!(
            chart_id = %chart_id,
            account_id = %account.id,
            number = %account.number,
            parent = ?account.parent,
            "account attached"
        );

        if valid.retained_earnings == Some(true) {
            self.set_retained_earnings(chart_id, Some(account.id))
                .await
                .inspect_err(|e| {
                    warn!(
                        chart_id = %chart_id,
                        account_id = %account.id,
                        error = %e,
                        "account attached but retained earnings designation failed"
                    );
                })?;
        }
        Ok(account)
    }

    /// Validate an account definition and apply it to a stored account.
    ///
    /// Only the name changes; number, classification, parent and hierarchy
    /// status stay as stored. `retainedEarnings: false` clears the chart's
    /// pointer only when it points at this account.
    pub async fn validate_and_update_account(
        &self,
        chart_id: ChartId,
        account_id: AccountId,
        input: AccountInput,
    ) -> Result<Account, LedgerError> {
        let _writer = self.lock_chart(chart_id).await?;
        let chart = self.require_chart(chart_id).await?;
        let existing = chart
            .account(account_id)
            .cloned()
            .ok_or(LedgerError::AccountNotFound(account_id))?;

        let valid = validate_account(self.store.as_ref(), &chart, &input, Some(account_id))
            .await
            .inspect_err(|e| {
                warn!(chart_id = %chart_id, account_id = %account_id, error = %e, "account update rejected");
            })?;

        let updated = Account {
            name: valid.account.name,
            ..existing
        };
        let account = self.store.replace_account(chart_id, updated).await?;
        info!(chart_id = %chart_id, account_id = %account_id, name = %account.name, "account updated");

        match valid.retained_earnings {
            Some(true) => self.set_retained_earnings(chart_id, Some(account_id)).await?,
            Some(false) if chart.retained_earnings_account == Some(account_id) => {
                self.set_retained_earnings(chart_id, None).await?;
            }
            _ => {}
        }
        Ok(account)
    }

    /// Designate an account of the chart as its retained earnings account.
    pub async fn designate_retained_earnings(
        &self,
        chart_id: ChartId,
        account_id: AccountId,
    ) -> Result<(), LedgerError> {
        let _writer = self.lock_chart(chart_id).await?;
        let chart = self.require_chart(chart_id).await?;
        if chart.account(account_id).is_none() {
            return Err(LedgerError::AccountNotFound(account_id));
        }
        self.set_retained_earnings(chart_id, Some(account_id)).await
    }

    /// Remove the chart's retained earnings designation.
    pub async fn clear_retained_earnings(&self, chart_id: ChartId) -> Result<(), LedgerError> {
        let _writer = self.lock_chart(chart_id).await?;
        self.require_chart(chart_id).await?;
        self.set_retained_earnings(chart_id, None).await
    }

    /// Caller holds the chart's writer lock.
    async fn set_retained_earnings(
        &self,
        chart_id: ChartId,
        account_id: Option<AccountId>,
    ) -> Result<(), LedgerError> {
        self.store
            .set_retained_earnings_account(chart_id, account_id)
            .await?;
        info!(chart_id = %chart_id, account_id = ?account_id, "retained earnings account set");
        Ok(())
    }

    // ========== Transactions ==========

    /// Validate a transaction and append it to the chart's log.
    pub async fn validate_and_post_transaction(
        &self,
        chart_id: ChartId,
        input: TransactionInput,
    ) -> Result<Transaction, LedgerError> {
        let _writer = self.lock_chart(chart_id).await?;
        self.require_chart(chart_id).await?;

        let new = validate_transaction(self.store.as_ref(), chart_id, &input, Utc::now())
            .await
            .inspect_err(|e| warn!(chart_id = %chart_id, error = %e, "transaction rejected"))?;

        let transaction = self.store.insert_transaction(chart_id, new).await?;
        info!(
            chart_id = %chart_id,
            transaction_id = %transaction.id,
            debits = transaction.debits.len(),
            credits = transaction.credits.len(),
            "transaction posted"
        );
        Ok(transaction)
    }

    // ========== Reports ==========

    /// Journal of a chart over a period.
    pub async fn journal(&self, chart_id: ChartId, period: Period) -> Result<Journal, LedgerError> {
        self.require_chart(chart_id).await?;
        let transactions = self
            .store
            .find_transactions_in_range(chart_id, period.from, period.to)
            .await?;

        let ids = ReportService::referenced_accounts(&transactions);
        let accounts = self.resolve_accounts(&ids).await?;
        let journal = ReportService::build_journal(transactions, &accounts)
            .map_err(LedgerError::AccountNotFound)?;

        debug!(
            chart_id = %chart_id,
            transactions = journal.transactions.len(),
            entries = journal.entries.len(),
            "journal built"
        );
        Ok(journal)
    }

    /// Ledger of one account over a period.
    pub async fn ledger(
        &self,
        chart_id: ChartId,
        account_id: AccountId,
        period: Period,
    ) -> Result<LedgerReport, LedgerError> {
        let chart = self.require_chart(chart_id).await?;
        let account = chart
            .account(account_id)
            .ok_or(LedgerError::AccountNotFound(account_id))?;

        let transactions = self
            .store
            .find_transactions_touching_account(chart_id, account_id, period.to)
            .await?;
        let walk = ReportService::walk_ledger(account, &transactions, &period);

        let counterparts = self.resolve_accounts(&walk.counterpart_ids()).await?;
        let report = ReportService::build_ledger(account, walk, &counterparts)
            .map_err(LedgerError::AccountNotFound)?;

        debug!(
            chart_id = %chart_id,
            account_id = %account_id,
            rows = report.rows.len(),
            "ledger built"
        );
        Ok(report)
    }
}
