//! Record store abstraction.
//!
//! The engine never persists anything itself. Charts, their embedded accounts
//! and the per-chart transaction log live behind [`RecordStore`], implemented
//! by the store crate.

mod error;

use chrono::{DateTime, Utc};
use ledgerbook_shared::types::{AccountId, ChartId};

pub use error::StoreError;

use crate::chart::{Account, ChartOfAccounts, NewAccount, NewChart};
use crate::ledger::{NewTransaction, Transaction};

/// Repository trait for chart, account and transaction persistence.
///
/// Transaction listings are ordered by `(date, timestamp)`. Writes are
/// single-record atomic; callers serialize writers per chart.
pub trait RecordStore: Send + Sync {
    /// Find an account by ID, in any chart.
    fn find_account(
        &self,
        id: AccountId,
    ) -> impl std::future::Future<Output = Result<Option<Account>, StoreError>> + Send;

    /// Find a chart of accounts by ID.
    fn find_chart(
        &self,
        id: ChartId,
    ) -> impl std::future::Future<Output = Result<Option<ChartOfAccounts>, StoreError>> + Send;

    /// List all charts of accounts in creation order.
    fn list_charts(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<ChartOfAccounts>, StoreError>> + Send;

    /// Store a new chart of accounts.
    fn insert_chart(
        &self,
        chart: NewChart,
    ) -> impl std::future::Future<Output = Result<ChartOfAccounts, StoreError>> + Send;

    /// Append an account to a chart, marking its parent synthetic in the same write.
    fn attach_account(
        &self,
        chart_id: ChartId,
        account: NewAccount,
    ) -> impl std::future::Future<Output = Result<Account, StoreError>> + Send;

    /// Overwrite a stored account.
    fn replace_account(
        &self,
        chart_id: ChartId,
        account: Account,
    ) -> impl std::future::Future<Output = Result<Account, StoreError>> + Send;

    /// Point the chart's retained earnings at an account, or clear it.
    fn set_retained_earnings_account(
        &self,
        chart_id: ChartId,
        account_id: Option<AccountId>,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Append a transaction to a chart's log.
    fn insert_transaction(
        &self,
        chart_id: ChartId,
        transaction: NewTransaction,
    ) -> impl std::future::Future<Output = Result<Transaction, StoreError>> + Send;

    /// Transactions dated within `[from, to]`, ordered.
    fn find_transactions_in_range(
        &self,
        chart_id: ChartId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<Vec<Transaction>, StoreError>> + Send;

    /// Transactions with an entry on the account, dated on or before `up_to`, ordered.
    fn find_transactions_touching_account(
        &self,
        chart_id: ChartId,
        account_id: AccountId,
        up_to: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<Vec<Transaction>, StoreError>> + Send;

    /// Every transaction of a chart, ordered.
    fn list_transactions(
        &self,
        chart_id: ChartId,
    ) -> impl std::future::Future<Output = Result<Vec<Transaction>, StoreError>> + Send;
}
