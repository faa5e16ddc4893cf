//! Demo chart of accounts for local development.
//!
//! Everything goes through the ledger service, so the seeded data obeys the
//! same rules as anything posted over HTTP.

use ledgerbook_core::chart::{AccountInput, ChartInput};
use ledgerbook_core::ledger::{EntryInput, LedgerError, LedgerService, TransactionInput};
use ledgerbook_core::store::RecordStore;
use ledgerbook_shared::types::{AccountId, ChartId};
use rust_decimal::Decimal;
use tracing::info;

/// Flags of a demo account: statement, normal balance and optional attribute.
#[derive(Clone, Copy)]
enum Kind {
    Asset,
    Liability,
    Equity,
    Revenue,
    Expense,
    Cost,
}

fn definition(number: &str, name: &str, kind: Kind, parent: Option<AccountId>) -> AccountInput {
    let (balance_sheet, debit) = match kind {
        Kind::Asset => (true, true),
        Kind::Liability | Kind::Equity => (true, false),
        Kind::Revenue => (false, false),
        Kind::Expense | Kind::Cost => (false, true),
    };
    AccountInput {
        number: Some(number.to_owned()),
        name: Some(name.to_owned()),
        balance_sheet: Some(balance_sheet),
        income_statement: Some(!balance_sheet),
        debit_balance: Some(debit),
        credit_balance: Some(!debit),
        operational: matches!(kind, Kind::Revenue),
        cost: matches!(kind, Kind::Cost),
        parent,
        ..AccountInput::default()
    }
}

fn posting(date: &str, memo: &str, debit: AccountId, credit: AccountId, cents: i64) -> TransactionInput {
    let entry = |account| EntryInput {
        account: Some(account),
        value: Some(Decimal::new(cents, 2)),
    };
    TransactionInput {
        date: Some(date.to_owned()),
        memo: Some(memo.to_owned()),
        debits: Some(vec![entry(debit)]),
        credits: Some(vec![entry(credit)]),
    }
}

/// Seeds a small demo chart with a handful of transactions.
///
/// # Errors
///
/// Returns any error raised by the ledger service.
pub async fn seed_demo<S: RecordStore>(ledger: &LedgerService<S>) -> Result<ChartId, LedgerError> {
    let chart = ledger
        .validate_and_store_chart(ChartInput {
            name: Some("Demo Company".to_owned()),
        })
        .await?;
    let id = chart.id;

    let attach = |input| ledger.validate_and_attach_account(id, input);

    let assets = attach(definition("1", "Assets", Kind::Asset, None)).await?;
    let cash = attach(definition("1.1", "Cash", Kind::Asset, Some(assets.id))).await?;
    let receivables = attach(definition("1.2", "Receivables", Kind::Asset, Some(assets.id))).await?;

    let liabilities = attach(definition("2", "Liabilities", Kind::Liability, None)).await?;
    let loans = attach(definition("2.1", "Loans", Kind::Liability, Some(liabilities.id))).await?;

    let equity = attach(definition("3", "Equity", Kind::Equity, None)).await?;
    let capital = attach(definition("3.1", "Capital", Kind::Equity, Some(equity.id))).await?;
    let mut retained = definition("3.2", "Retained earnings", Kind::Equity, Some(equity.id));
    retained.retained_earnings = Some(true);
    attach(retained).await?;

    let revenue = attach(definition("4", "Revenue", Kind::Revenue, None)).await?;
    let sales = attach(definition("4.1", "Sales", Kind::Revenue, Some(revenue.id))).await?;

    let expenses = attach(definition("5", "Expenses", Kind::Expense, None)).await?;
    let cost_of_sales = attach(definition("5.1", "Cost of sales", Kind::Cost, Some(expenses.id))).await?;

    let postings = [
        posting("2024-01-02", "Initial capital", cash.id, capital.id, 1_000_000),
        posting("2024-01-10", "Bank loan", cash.id, loans.id, 500_000),
        posting("2024-02-01", "Invoice 1001", receivables.id, sales.id, 250_000),
        posting("2024-02-03", "Supplier payment", cost_of_sales.id, cash.id, 120_000),
        posting("2024-02-20", "Invoice 1001 settled", cash.id, receivables.id, 250_000),
    ];
    for input in postings {
        ledger.validate_and_post_transaction(id, input).await?;
    }

    info!(chart_id = %id, "demo chart of accounts seeded");
    Ok(id)
}
