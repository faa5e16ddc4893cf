//! Chart and account validation rules.
//!
//! Rules run in a fixed order and the first failure wins. The pure checks
//! ([`check_definition`], [`check_unique_number`], [`check_parent`]) need no
//! I/O; [`validate_account`] strings them together with the parent lookup.

use chrono::{DateTime, Utc};
use ledgerbook_shared::types::{AccountId, ChartId};

use super::types::{
    Account, AccountClassification, AccountInput, ChartInput, ChartOfAccounts, NewAccount,
    NewChart, NormalBalance, StatementKind,
};
use crate::ledger::error::{LedgerError, ValidationError};
use crate::store::RecordStore;

/// An account definition that passed every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidAccount {
    /// Typed definition to store.
    pub account: NewAccount,
    /// Requested retained earnings designation, applied after the write.
    pub retained_earnings: Option<bool>,
}

/// Outcome of reading a pair of mutually exclusive flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Missing,
    Ambiguous,
    First,
    Second,
}

/// Absent counts as false once at least one of the pair is given.
fn exactly_one(first: Option<bool>, second: Option<bool>) -> Choice {
    if first.is_none() && second.is_none() {
        return Choice::Missing;
    }
    match (first.unwrap_or(false), second.unwrap_or(false)) {
        (true, false) => Choice::First,
        (false, true) => Choice::Second,
        _ => Choice::Ambiguous,
    }
}

fn required(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToOwned::to_owned)
}

/// Validates a chart definition.
///
/// # Errors
///
/// Returns `NameRequired` if the name is missing or blank.
pub fn validate_chart(input: &ChartInput, now: DateTime<Utc>) -> Result<NewChart, ValidationError> {
    let name = required(input.name.as_deref()).ok_or(ValidationError::NameRequired)?;
    Ok(NewChart {
        name,
        created_at: now,
    })
}

/// Checks the self-contained part of an account definition and types it.
///
/// # Errors
///
/// Returns the first violated rule: number, name, statement, normal balance,
/// then the single-attribute rule.
pub fn check_definition(input: &AccountInput) -> Result<NewAccount, ValidationError> {
    let number = required(input.number.as_deref()).ok_or(ValidationError::NumberRequired)?;
    let name = required(input.name.as_deref()).ok_or(ValidationError::NameRequired)?;

    let statement = match exactly_one(input.balance_sheet, input.income_statement) {
        Choice::Missing => return Err(ValidationError::StatementRequired),
        Choice::Ambiguous => return Err(ValidationError::StatementAmbiguous),
        Choice::First => StatementKind::BalanceSheet,
        Choice::Second => StatementKind::IncomeStatement,
    };

    let normal_balance = match exactly_one(input.debit_balance, input.credit_balance) {
        Choice::Missing => return Err(ValidationError::NormalBalanceRequired),
        Choice::Ambiguous => return Err(ValidationError::NormalBalanceAmbiguous),
        Choice::First => NormalBalance::Debit,
        Choice::Second => NormalBalance::Credit,
    };

    let attribute = match input.attributes().as_slice() {
        [] => None,
        [single] => Some(*single),
        _ => return Err(ValidationError::MultipleAttributes),
    };

    Ok(NewAccount {
        number,
        name,
        classification: AccountClassification {
            statement,
            normal_balance,
            attribute,
        },
        parent: input.parent,
    })
}

/// Checks that no other account of the chart uses `number`.
///
/// # Errors
///
/// Returns `DuplicateNumber` on a clash with any account other than `existing`.
pub fn check_unique_number(
    chart: &ChartOfAccounts,
    number: &str,
    existing: Option<AccountId>,
) -> Result<(), ValidationError> {
    match chart.account_by_number(number) {
        Some(other) if Some(other.id) != existing => Err(ValidationError::DuplicateNumber {
            number: number.to_owned(),
        }),
        _ => Ok(()),
    }
}

/// Checks a child definition against its resolved parent.
///
/// # Errors
///
/// Returns `ParentInOtherChart`, `NumberOutsideParent`, or the first
/// `InheritanceMismatch` in flag order.
pub fn check_parent(
    parent: &Account,
    chart_id: ChartId,
    child: &NewAccount,
) -> Result<(), ValidationError> {
    if parent.chart_id != chart_id {
        return Err(ValidationError::ParentInOtherChart);
    }
    if !child.number.starts_with(&parent.number) {
        return Err(ValidationError::NumberOutsideParent);
    }
    if let Some(flag) = parent
        .inherited_flags()
        .find(|flag| !child.classification.has_flag(*flag))
    {
        return Err(ValidationError::InheritanceMismatch { flag });
    }
    Ok(())
}

/// Validates an account definition for `chart`.
///
/// `existing` names the stored account on update so its own number does not
/// count as a duplicate.
///
/// # Errors
///
/// Returns `LedgerError::Validation` for rule violations, `ParentNotFound`
/// when the parent does not resolve, and `Store` when the lookup fails.
pub async fn validate_account<S: RecordStore>(
    store: &S,
    chart: &ChartOfAccounts,
    input: &AccountInput,
    existing: Option<AccountId>,
) -> Result<ValidAccount, LedgerError> {
    let account = check_definition(input)?;
    check_unique_number(chart, &account.number, existing)?;

    if let Some(parent_id) = account.parent {
        let parent = store
            .find_account(parent_id)
            .await?
            .ok_or(LedgerError::ParentNotFound(parent_id))?;
        check_parent(&parent, chart.id, &account)?;
    }

    Ok(ValidAccount {
        account,
        retained_earnings: input.retained_earnings,
    })
}
