//! In-process record store for unit tests, with failure injection.

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use ledgerbook_shared::types::{AccountId, ChartId, TransactionId};

use crate::chart::validation::check_definition;
use crate::chart::{Account, AccountInput, ChartOfAccounts, NewAccount, NewChart, find_account};
use crate::ledger::{NewTransaction, Transaction};
use crate::store::{RecordStore, StoreError};

#[derive(Default)]
struct State {
    charts: Vec<ChartOfAccounts>,
    transactions: Vec<Transaction>,
    fail_all_lookups: bool,
    failing_accounts: HashSet<AccountId>,
    fail_writes: bool,
    fail_designations: bool,
}

#[derive(Default)]
pub(crate) struct MockStore {
    state: Mutex<State>,
}

impl MockStore {
    fn with<T>(&self, f: impl FnOnce(&mut State) -> T) -> T {
        let mut state = self.state.lock().unwrap();
        f(&mut state)
    }

    /// Creates a chart directly.
    pub(crate) fn chart(&self, name: &str) -> ChartOfAccounts {
        let chart = ChartOfAccounts::from_new(
            ChartId::new(),
            NewChart {
                name: name.into(),
                created_at: Utc::now(),
            },
        );
        self.with(|s| s.charts.push(chart.clone()));
        chart
    }

    pub(crate) fn chart_by_id(&self, id: ChartId) -> ChartOfAccounts {
        self.with(|s| s.charts.iter().find(|c| c.id == id).cloned().unwrap())
    }

    /// Attaches an account directly, skipping hierarchy rules.
    pub(crate) fn account(&self, chart_id: ChartId, number: &str, input: AccountInput) -> Account {
        let mut new = check_definition(&input).unwrap();
        new.number = number.into();
        self.attach(chart_id, new).unwrap()
    }

    pub(crate) fn transactions(&self) -> Vec<Transaction> {
        self.with(|s| s.transactions.clone())
    }

    pub(crate) fn fail_lookups(&self) {
        self.with(|s| s.fail_all_lookups = true);
    }

    pub(crate) fn fail_lookup_of(&self, id: AccountId) {
        self.with(|s| {
            s.failing_accounts.insert(id);
        });
    }

    pub(crate) fn fail_writes(&self) {
        self.with(|s| s.fail_writes = true);
    }

    pub(crate) fn fail_designations(&self) {
        self.with(|s| s.fail_designations = true);
    }

    fn attach(&self, chart_id: ChartId, new: NewAccount) -> Result<Account, StoreError> {
        self.with(|s| {
            if s.fail_writes {
                return Err(StoreError::Unavailable("writes disabled".into()));
            }
            let chart = s
                .charts
                .iter_mut()
                .find(|c| c.id == chart_id)
                .ok_or(StoreError::ChartMissing(chart_id))?;
            let account = Account::from_new(AccountId::new(), chart_id, new);
            chart
                .attach(account)
                .cloned()
                .map_err(StoreError::AccountMissing)
        })
    }

    fn ordered(&self, keep: impl Fn(&Transaction) -> bool) -> Vec<Transaction> {
        let mut found: Vec<_> = self.with(|s| {
            s.transactions
                .iter()
                .filter(|t| keep(t))
                .cloned()
                .collect()
        });
        found.sort_by_key(Transaction::sort_key);
        found
    }
}

impl RecordStore for MockStore {
    async fn find_account(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        // Yield so concurrent lookups genuinely interleave.
        tokio::task::yield_now().await;
        self.with(|s| {
            if s.fail_all_lookups || s.failing_accounts.contains(&id) {
                return Err(StoreError::Unavailable("lookup failed".into()));
            }
            Ok(find_account(&s.charts, id).cloned())
        })
    }

    async fn find_chart(&self, id: ChartId) -> Result<Option<ChartOfAccounts>, StoreError> {
        self.with(|s| Ok(s.charts.iter().find(|c| c.id == id).cloned()))
    }

    async fn list_charts(&self) -> Result<Vec<ChartOfAccounts>, StoreError> {
        self.with(|s| Ok(s.charts.clone()))
    }

    async fn insert_chart(&self, chart: NewChart) -> Result<ChartOfAccounts, StoreError> {
        let chart = ChartOfAccounts::from_new(ChartId::new(), chart);
        self.with(|s| {
            if s.fail_writes {
                return Err(StoreError::Unavailable("writes disabled".into()));
            }
            s.charts.push(chart.clone());
            Ok(chart)
        })
    }

    async fn attach_account(
        &self,
        chart_id: ChartId,
        account: NewAccount,
    ) -> Result<Account, StoreError> {
        self.attach(chart_id, account)
    }

    async fn replace_account(
        &self,
        chart_id: ChartId,
        account: Account,
    ) -> Result<Account, StoreError> {
        self.with(|s| {
            let chart = s
                .charts
                .iter_mut()
                .find(|c| c.id == chart_id)
                .ok_or(StoreError::ChartMissing(chart_id))?;
            if chart.replace(account.clone()) {
                Ok(account)
            } else {
                Err(StoreError::AccountMissing(account.id))
            }
        })
    }

    async fn set_retained_earnings_account(
        &self,
        chart_id: ChartId,
        account_id: Option<AccountId>,
    ) -> Result<(), StoreError> {
        self.with(|s| {
            if s.fail_designations {
                return Err(StoreError::Unavailable("designations disabled".into()));
            }
            let chart = s
                .charts
                .iter_mut()
                .find(|c| c.id == chart_id)
                .ok_or(StoreError::ChartMissing(chart_id))?;
            chart.retained_earnings_account = account_id;
            Ok(())
        })
    }

    async fn insert_transaction(
        &self,
        chart_id: ChartId,
        transaction: NewTransaction,
    ) -> Result<Transaction, StoreError> {
        let transaction = Transaction::from_new(TransactionId::new(), chart_id, transaction);
        self.with(|s| {
            if s.fail_writes {
                return Err(StoreError::Unavailable("writes disabled".into()));
            }
            s.transactions.push(transaction.clone());
            Ok(transaction)
        })
    }

    async fn find_transactions_in_range(
        &self,
        chart_id: ChartId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Transaction>, StoreError> {
        Ok(self.ordered(|t| t.chart_id == chart_id && t.date >= from && t.date <= to))
    }

    async fn find_transactions_touching_account(
        &self,
        chart_id: ChartId,
        account_id: AccountId,
        up_to: DateTime<Utc>,
    ) -> Result<Vec<Transaction>, StoreError> {
        Ok(self.ordered(|t| t.chart_id == chart_id && t.date <= up_to && t.touches(account_id)))
    }

    async fn list_transactions(&self, chart_id: ChartId) -> Result<Vec<Transaction>, StoreError> {
        Ok(self.ordered(|t| t.chart_id == chart_id))
    }
}
