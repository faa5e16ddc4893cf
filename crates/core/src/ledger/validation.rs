//! Transaction validation rules.
//!
//! Header rules (debits, credits, date, memo) run first. Entry rules then run
//! per entry, debits before credits, in submission order. Account lookups for
//! every entry are issued concurrently up front and gathered in position
//! order, so the reported failure is always the first one in that order.

use chrono::{DateTime, Utc};
use futures::future::join_all;
use ledgerbook_shared::types::ChartId;
use rust_decimal::Decimal;

use super::entry::{Entry, EntryInput, EntryType};
use super::error::{LedgerError, ValidationError};
use super::transaction::{NewTransaction, TransactionInput, parse_date};
use crate::chart::Account;
use crate::store::{RecordStore, StoreError};

/// Checks the rules that need no account: value present and positive, account present.
///
/// # Errors
///
/// Returns the first violated rule for the entry at `side`/`index`.
pub fn check_entry_shape(
    entry: &EntryInput,
    side: EntryType,
    index: usize,
) -> Result<(), ValidationError> {
    let value = entry
        .value
        .ok_or(ValidationError::ValueRequired { side, index })?;
    if value <= Decimal::ZERO {
        return Err(ValidationError::ValueNotPositive { side, index });
    }
    if entry.account.is_none() {
        return Err(ValidationError::AccountRequired { side, index });
    }
    Ok(())
}

/// Checks a resolved entry account against the transaction's chart.
///
/// # Errors
///
/// Returns `EntryAccountNotFound`, `AccountInOtherChart` or `AccountNotAnalytic`.
pub fn check_entry_account(
    account: Option<&Account>,
    chart_id: ChartId,
    side: EntryType,
    index: usize,
) -> Result<(), ValidationError> {
    let account = account.ok_or(ValidationError::EntryAccountNotFound { side, index })?;
    if account.chart_id != chart_id {
        return Err(ValidationError::AccountInOtherChart { side, index });
    }
    if !account.is_analytic() {
        return Err(ValidationError::AccountNotAnalytic { side, index });
    }
    Ok(())
}

/// Checks that both sides sum to the same amount, exactly.
///
/// # Errors
///
/// Returns `Unbalanced` carrying both totals.
pub fn check_balance(debits: &[Entry], credits: &[Entry]) -> Result<(), ValidationError> {
    let debit_total: Decimal = debits.iter().map(|e| e.value).sum();
    let credit_total: Decimal = credits.iter().map(|e| e.value).sum();
    if debit_total == credit_total {
        Ok(())
    } else {
        Err(ValidationError::Unbalanced {
            debits: debit_total,
            credits: credit_total,
        })
    }
}

/// Validates a transaction submitted for `chart_id`.
///
/// `timestamp` becomes the posting time of the transaction.
///
/// # Errors
///
/// Returns `LedgerError::Validation` for the first violated rule, or
/// `LedgerError::EntryLookup` when the store fails on the first entry whose
/// account lookup is reached.
pub async fn validate_transaction<S: RecordStore>(
    store: &S,
    chart_id: ChartId,
    input: &TransactionInput,
    timestamp: DateTime<Utc>,
) -> Result<NewTransaction, LedgerError> {
    if input.entries(EntryType::Debit).is_empty() {
        return Err(ValidationError::DebitRequired.into());
    }
    if input.entries(EntryType::Credit).is_empty() {
        return Err(ValidationError::CreditRequired.into());
    }
    let date = input
        .date
        .as_deref()
        .and_then(parse_date)
        .ok_or(ValidationError::DateRequired)?;
    let memo = input
        .memo
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or(ValidationError::MemoRequired)?
        .to_owned();

    let positions: Vec<(EntryType, usize, &EntryInput)> = EntryType::BOTH
        .into_iter()
        .flat_map(|side| {
            input
                .entries(side)
                .iter()
                .enumerate()
                .map(move |(index, entry)| (side, index, entry))
        })
        .collect();

    let ids: Vec<_> = positions
        .iter()
        .filter_map(|(_, _, entry)| entry.account)
        .collect();
    let mut lookups = join_all(ids.iter().map(|id| store.find_account(*id)))
        .await
        .into_iter();

    let mut debits = Vec::new();
    let mut credits = Vec::new();
    for (side, index, entry) in positions {
        // One lookup was issued per entry carrying an account, in this same order.
        let lookup: Option<Result<Option<Account>, StoreError>> =
            entry.account.and_then(|_| lookups.next());

        check_entry_shape(entry, side, index)?;
        let (Some(account_id), Some(value), Some(lookup)) = (entry.account, entry.value, lookup)
        else {
            continue;
        };
        let account = lookup.map_err(|source| LedgerError::EntryLookup {
            side,
            index,
            source,
        })?;
        check_entry_account(account.as_ref(), chart_id, side, index)?;

        let posted = Entry {
            account: account_id,
            value,
        };
        match side {
            EntryType::Debit => debits.push(posted),
            EntryType::Credit => credits.push(posted),
        }
    }

    check_balance(&debits, &credits)?;

    Ok(NewTransaction {
        date,
        memo,
        timestamp,
        debits,
        credits,
    })
}
