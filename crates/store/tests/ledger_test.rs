//! Integration tests for the ledger service over the in-memory store.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use ledgerbook_core::chart::{AccountInput, ChartInput, HierarchyStatus};
use ledgerbook_core::ledger::{EntryInput, EntryType, LedgerError, LedgerService, TransactionInput, ValidationError};
use ledgerbook_core::reports::{Counterpart, Period};
use ledgerbook_shared::types::{AccountId, ChartId};
use ledgerbook_store::{MemoryStore, seed_demo};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

type Service = LedgerService<MemoryStore>;

fn service() -> Arc<Service> {
    Arc::new(LedgerService::new(Arc::new(MemoryStore::new())))
}

fn balance_sheet_debit(number: &str, name: &str, parent: Option<AccountId>) -> AccountInput {
    AccountInput {
        number: Some(number.into()),
        name: Some(name.into()),
        balance_sheet: Some(true),
        debit_balance: Some(true),
        parent,
        ..AccountInput::default()
    }
}

fn entries(side: &[(AccountId, Decimal)]) -> Option<Vec<EntryInput>> {
    Some(
        side.iter()
            .map(|(account, value)| EntryInput {
                account: Some(*account),
                value: Some(*value),
            })
            .collect(),
    )
}

fn posting(date: &str, debits: &[(AccountId, Decimal)], credits: &[(AccountId, Decimal)]) -> TransactionInput {
    TransactionInput {
        date: Some(date.into()),
        memo: Some(format!("posting of {date}")),
        debits: entries(debits),
        credits: entries(credits),
    }
}

fn period(from: (i32, u32, u32), to: (i32, u32, u32)) -> Period {
    Period::new(
        Utc.with_ymd_and_hms(from.0, from.1, from.2, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(to.0, to.1, to.2, 23, 59, 59).unwrap(),
    )
    .unwrap()
}

async fn chart(service: &Service, name: &str) -> ChartId {
    service
        .validate_and_store_chart(ChartInput {
            name: Some(name.into()),
        })
        .await
        .unwrap()
        .id
}

// ============================================================================
// Hierarchy
// ============================================================================

#[tokio::test]
async fn test_child_inherits_and_mismatch_is_rejected() {
    let service = service();
    let chart_id = chart(&service, "C").await;

    let root = service
        .validate_and_attach_account(chart_id, balance_sheet_debit("1000", "Assets", None))
        .await
        .unwrap();
    let child = service
        .validate_and_attach_account(chart_id, balance_sheet_debit("1010", "Cash", Some(root.id)))
        .await
        .unwrap();
    assert_eq!(child.parent, Some(root.id));

    let income_child = |number: &str| AccountInput {
        balance_sheet: None,
        income_statement: Some(true),
        ..balance_sheet_debit(number, "Revenue", Some(root.id))
    };

    let err = service
        .validate_and_attach_account(chart_id, income_child("2010"))
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let err = service
        .validate_and_attach_account(chart_id, income_child("1020"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "financial statement must match parent");
    assert_eq!(err.http_status_code(), 400);

    let accounts = service.accounts(chart_id).await.unwrap();
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].status, HierarchyStatus::Synthetic);
}

#[tokio::test]
async fn test_parent_not_found_channel() {
    let service = service();
    let chart_id = chart(&service, "C").await;
    let err = service
        .validate_and_attach_account(chart_id, balance_sheet_debit("1010", "Cash", Some(AccountId::new())))
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::ParentNotFound(_)));
}

#[tokio::test]
async fn test_concurrent_children_all_flip_parent() {
    let service = service();
    let chart_id = chart(&service, "C").await;
    let root = service
        .validate_and_attach_account(chart_id, balance_sheet_debit("1", "Assets", None))
        .await
        .unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                service
                    .validate_and_attach_account(
                        chart_id,
                        balance_sheet_debit(&format!("1{}", i % 4), "Child", Some(root.id)),
                    )
                    .await
            })
        })
        .collect();

    let results = futures::future::join_all(handles).await;
    let accepted = results
        .into_iter()
        .map(|joined| joined.unwrap())
        .filter(Result::is_ok)
        .count();

    // Four distinct numbers, each accepted once.
    assert_eq!(accepted, 4);
    let chart = service.chart(chart_id).await.unwrap();
    assert_eq!(chart.accounts.len(), 5);
    assert_eq!(chart.account(root.id).unwrap().status, HierarchyStatus::Synthetic);
    assert_eq!(chart.children(root.id).count(), 4);
}

// ============================================================================
// Transactions & reports
// ============================================================================

#[tokio::test]
async fn test_unbalanced_transaction_rejected() {
    let service = service();
    let chart_id = chart(&service, "C").await;
    let cash = service
        .validate_and_attach_account(chart_id, balance_sheet_debit("1000", "Cash", None))
        .await
        .unwrap();
    let loans = service
        .validate_and_attach_account(chart_id, balance_sheet_debit("2000", "Loans", None))
        .await
        .unwrap();

    let err = service
        .validate_and_post_transaction(
            chart_id,
            posting("2024-01-05", &[(cash.id, dec!(100))], &[(loans.id, dec!(90))]),
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Validation(ValidationError::Unbalanced { .. })
    ));
    assert!(service.transactions(chart_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_ledger_signs_and_counterpart_many() {
    let service = service();
    let chart_id = chart(&service, "C").await;
    let cash = service
        .validate_and_attach_account(chart_id, balance_sheet_debit("1000", "Cash", None))
        .await
        .unwrap();
    let credit_normal = |number: &str, name: &str| AccountInput {
        debit_balance: None,
        credit_balance: Some(true),
        ..balance_sheet_debit(number, name, None)
    };
    let loans = service
        .validate_and_attach_account(chart_id, credit_normal("2000", "Loans"))
        .await
        .unwrap();
    let capital = service
        .validate_and_attach_account(chart_id, credit_normal("3000", "Capital"))
        .await
        .unwrap();

    for input in [
        posting("2024-01-05", &[(cash.id, dec!(50))], &[(loans.id, dec!(50))]),
        posting("2024-01-06", &[(loans.id, dec!(50))], &[(cash.id, dec!(50))]),
        posting(
            "2024-02-01",
            &[(cash.id, dec!(300))],
            &[(loans.id, dec!(100)), (capital.id, dec!(200))],
        ),
    ] {
        service
            .validate_and_post_transaction(chart_id, input)
            .await
            .unwrap();
    }

    let ledger = service
        .ledger(chart_id, cash.id, period((2024, 1, 1), (2024, 12, 31)))
        .await
        .unwrap();
    let balances: Vec<_> = ledger.rows.iter().map(|r| r.balance).collect();
    assert_eq!(balances, vec![dec!(50), dec!(0), dec!(300)]);
    assert_eq!(ledger.rows[1].entry_type, EntryType::Credit);
    assert_eq!(ledger.rows[2].counterpart, Counterpart::Many);
    assert_eq!(ledger.rows[2].counterpart.to_string(), "many");
    assert_eq!(ledger.closing_balance, dec!(300));

    // Opening balance for February equals everything before it.
    let february = service
        .ledger(chart_id, cash.id, period((2024, 2, 1), (2024, 2, 29)))
        .await
        .unwrap();
    assert_eq!(february.opening_balance, Decimal::ZERO);
    assert_eq!(february.rows.len(), 1);

    let loans_ledger = service
        .ledger(chart_id, loans.id, period((2024, 1, 1), (2024, 1, 31)))
        .await
        .unwrap();
    assert_eq!(
        loans_ledger.rows.iter().map(|r| r.balance).collect::<Vec<_>>(),
        vec![dec!(50), dec!(0)]
    );
    assert!(matches!(
        &loans_ledger.rows[0].counterpart,
        Counterpart::Account(a) if a.number == "1000"
    ));

    let journal = service
        .journal(chart_id, period((2024, 1, 1), (2024, 1, 31)))
        .await
        .unwrap();
    assert_eq!(journal.transactions.len(), 2);
    assert_eq!(journal.entries.len(), 4);
    assert_eq!(journal.entries[0].account.name, "Cash");
    assert_eq!(journal.entries[0].entry_type, EntryType::Debit);
}

#[tokio::test]
async fn test_transaction_against_synthetic_account_rejected() {
    let service = service();
    let chart_id = chart(&service, "C").await;
    let assets = service
        .validate_and_attach_account(chart_id, balance_sheet_debit("1", "Assets", None))
        .await
        .unwrap();
    let cash = service
        .validate_and_attach_account(chart_id, balance_sheet_debit("11", "Cash", Some(assets.id)))
        .await
        .unwrap();

    let err = service
        .validate_and_post_transaction(
            chart_id,
            posting("2024-01-05", &[(cash.id, dec!(10))], &[(assets.id, dec!(10))]),
        )
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "account must be analytic");
}

#[tokio::test]
async fn test_account_from_other_chart_rejected() {
    let service = service();
    let main = chart(&service, "Main").await;
    let other = chart(&service, "Other").await;
    let cash = service
        .validate_and_attach_account(main, balance_sheet_debit("1", "Cash", None))
        .await
        .unwrap();
    let foreign = service
        .validate_and_attach_account(other, balance_sheet_debit("1", "Cash", None))
        .await
        .unwrap();

    let err = service
        .validate_and_post_transaction(
            main,
            posting("2024-01-05", &[(cash.id, dec!(10))], &[(foreign.id, dec!(10))]),
        )
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "account must belong to the same chart of accounts");
}

// ============================================================================
// Demo seed
// ============================================================================

#[tokio::test]
async fn test_demo_seed_is_consistent() {
    let service = service();
    let chart_id = seed_demo(&*service).await.unwrap();

    let chart = service.chart(chart_id).await.unwrap();
    assert_eq!(chart.name, "Demo Company");
    let retained = chart.account_by_number("3.2").unwrap();
    assert_eq!(chart.retained_earnings_account, Some(retained.id));
    assert!(chart.account_by_number("1").unwrap().is_synthetic());

    let cash = chart.account_by_number("1.1").unwrap();
    let ledger = service
        .ledger(chart_id, cash.id, period((2024, 1, 1), (2024, 12, 31)))
        .await
        .unwrap();
    assert_eq!(ledger.closing_balance, dec!(16300.00));

    let journal = service
        .journal(chart_id, period((2024, 1, 1), (2024, 12, 31)))
        .await
        .unwrap();
    let debits: Decimal = journal
        .iter()
        .filter(|e| e.entry_type == EntryType::Debit)
        .map(|e| e.value)
        .sum();
    let credits: Decimal = journal
        .iter()
        .filter(|e| e.entry_type == EntryType::Credit)
        .map(|e| e.value)
        .sum();
    assert_eq!(debits, credits);
}
