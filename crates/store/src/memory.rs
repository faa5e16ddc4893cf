//! In-memory record store.
//!
//! Charts (with their embedded accounts) are kept in creation order. Each
//! chart's transaction log is kept sorted by `(date, timestamp)` on insert,
//! with equal keys in insertion order, so reads never sort.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use ledgerbook_core::chart::{Account, ChartOfAccounts, NewAccount, NewChart};
use ledgerbook_core::ledger::{NewTransaction, Transaction};
use ledgerbook_core::store::{RecordStore, StoreError};
use ledgerbook_shared::types::{AccountId, ChartId, TransactionId};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Inner {
    charts: Vec<ChartOfAccounts>,
    account_index: HashMap<AccountId, ChartId>,
    transactions: HashMap<ChartId, Vec<Transaction>>,
}

impl Inner {
    fn chart(&self, id: ChartId) -> Option<&ChartOfAccounts> {
        self.charts.iter().find(|c| c.id == id)
    }

    fn chart_mut(&mut self, id: ChartId) -> Result<&mut ChartOfAccounts, StoreError> {
        self.charts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StoreError::ChartMissing(id))
    }

    fn log(&self, chart_id: ChartId) -> &[Transaction] {
        self.transactions
            .get(&chart_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Record store held entirely in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    async fn find_account(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .account_index
            .get(&id)
            .and_then(|chart_id| inner.chart(*chart_id))
            .and_then(|chart| chart.account(id))
            .cloned())
    }

    async fn find_chart(&self, id: ChartId) -> Result<Option<ChartOfAccounts>, StoreError> {
        Ok(self.inner.read().await.chart(id).cloned())
    }

    async fn list_charts(&self) -> Result<Vec<ChartOfAccounts>, StoreError> {
        Ok(self.inner.read().await.charts.clone())
    }

    async fn insert_chart(&self, chart: NewChart) -> Result<ChartOfAccounts, StoreError> {
        let chart = ChartOfAccounts::from_new(ChartId::new(), chart);
        self.inner.write().await.charts.push(chart.clone());
        Ok(chart)
    }

    async fn attach_account(
        &self,
        chart_id: ChartId,
        account: NewAccount,
    ) -> Result<Account, StoreError> {
        let mut inner = self.inner.write().await;
        let account = Account::from_new(AccountId::new(), chart_id, account);
        let attached = inner
            .chart_mut(chart_id)?
            .attach(account)
            .cloned()
            .map_err(StoreError::AccountMissing)?;
        inner.account_index.insert(attached.id, chart_id);
        Ok(attached)
    }

    async fn replace_account(
        &self,
        chart_id: ChartId,
        account: Account,
    ) -> Result<Account, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.chart_mut(chart_id)?.replace(account.clone()) {
            Ok(account)
        } else {
            Err(StoreError::AccountMissing(account.id))
        }
    }

    async fn set_retained_earnings_account(
        &self,
        chart_id: ChartId,
        account_id: Option<AccountId>,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let chart = inner.chart_mut(chart_id)?;
        if let Some(id) = account_id
            && chart.account(id).is_none()
        {
            return Err(StoreError::AccountMissing(id));
        }
        chart.retained_earnings_account = account_id;
        Ok(())
    }

    async fn insert_transaction(
        &self,
        chart_id: ChartId,
        transaction: NewTransaction,
    ) -> Result<Transaction, StoreError> {
        let mut inner = self.inner.write().await;
        inner.chart_mut(chart_id)?;

        let transaction = Transaction::from_new(TransactionId::new(), chart_id, transaction);
        let log = inner.transactions.entry(chart_id).or_default();
        let key = transaction.sort_key();
        let at = log.partition_point(|t| t.sort_key() <= key);
        log.insert(at, transaction.clone());
        Ok(transaction)
    }

    async fn find_transactions_in_range(
        &self,
        chart_id: ChartId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Transaction>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .log(chart_id)
            .iter()
            .filter(|t| from <= t.date && t.date <= to)
            .cloned()
            .collect())
    }

    async fn find_transactions_touching_account(
        &self,
        chart_id: ChartId,
        account_id: AccountId,
        up_to: DateTime<Utc>,
    ) -> Result<Vec<Transaction>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .log(chart_id)
            .iter()
            .take_while(|t| t.date <= up_to)
            .filter(|t| t.touches(account_id))
            .cloned()
            .collect())
    }

    async fn list_transactions(&self, chart_id: ChartId) -> Result<Vec<Transaction>, StoreError> {
        Ok(self.inner.read().await.log(chart_id).to_vec())
    }
}
