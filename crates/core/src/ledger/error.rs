//! Ledger error types for validation, lookup and store failures.
//!
//! Rule violations are [`ValidationError`]s and carry the exact message shown
//! to callers. [`LedgerError`] wraps them together with the not-found outcomes
//! and system failures coming from the record store.

use ledgerbook_shared::types::{AccountId, ChartId};
use rust_decimal::Decimal;
use thiserror::Error;

use super::entry::EntryType;
use crate::chart::InheritableFlag;
use crate::store::StoreError;

/// A rule violated by a submitted chart, account, transaction or period.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    // ========== Chart & Account ==========
    /// Account number missing or blank.
    #[error("number required")]
    NumberRequired,

    /// Chart or account name missing or blank.
    #[error("name required")]
    NameRequired,

    /// Neither `balanceSheet` nor `incomeStatement` was given.
    #[error("financial statement required")]
    StatementRequired,

    /// `balanceSheet` and `incomeStatement` resolve to the same value.
    #[error("financial statement must be exactly one of balance sheet or income statement")]
    StatementAmbiguous,

    /// Neither `debitBalance` nor `creditBalance` was given.
    #[error("normal balance required")]
    NormalBalanceRequired,

    /// `debitBalance` and `creditBalance` resolve to the same value.
    #[error("normal balance must be exactly one of debit or credit")]
    NormalBalanceAmbiguous,

    /// More than one income statement attribute is set.
    #[error("only one income statement attribute allowed")]
    MultipleAttributes,

    /// Another account of the chart already uses the number.
    #[error("an account with number {number} already exists")]
    DuplicateNumber {
        /// The clashing number.
        number: String,
    },

    /// Parent resolved, but to an account of another chart.
    #[error("parent must belong to the same chart of accounts")]
    ParentInOtherChart,

    /// Child number does not extend the parent's number.
    #[error("number must start with parent's number")]
    NumberOutsideParent,

    /// Parent carries an inheritable flag the child lacks.
    #[error("{} must match parent", .flag.classification())]
    InheritanceMismatch {
        /// First missing flag, in check order.
        flag: InheritableFlag,
    },

    // ========== Transaction ==========
    /// Empty or missing debit list.
    #[error("at least one debit required")]
    DebitRequired,

    /// Empty or missing credit list.
    #[error("at least one credit required")]
    CreditRequired,

    /// Date missing or not parseable.
    #[error("date required")]
    DateRequired,

    /// Memo missing or blank.
    #[error("memo required")]
    MemoRequired,

    /// Entry without a value.
    #[error("value required")]
    ValueRequired {
        /// Side of the entry.
        side: EntryType,
        /// Position within that side.
        index: usize,
    },

    /// Entry value is zero or negative.
    #[error("value must be positive")]
    ValueNotPositive {
        /// Side of the entry.
        side: EntryType,
        /// Position within that side.
        index: usize,
    },

    /// Entry without an account.
    #[error("account required")]
    AccountRequired {
        /// Side of the entry.
        side: EntryType,
        /// Position within that side.
        index: usize,
    },

    /// Entry account does not resolve.
    #[error("account not found")]
    EntryAccountNotFound {
        /// Side of the entry.
        side: EntryType,
        /// Position within that side.
        index: usize,
    },

    /// Entry account belongs to another chart.
    #[error("account must belong to the same chart of accounts")]
    AccountInOtherChart {
        /// Side of the entry.
        side: EntryType,
        /// Position within that side.
        index: usize,
    },

    /// Entry account has children.
    #[error("account must be analytic")]
    AccountNotAnalytic {
        /// Side of the entry.
        side: EntryType,
        /// Position within that side.
        index: usize,
    },

    /// Debit and credit totals differ.
    #[error("debit/credit sums must match")]
    Unbalanced {
        /// Sum of debit values.
        debits: Decimal,
        /// Sum of credit values.
        credits: Decimal,
    },

    // ========== Period ==========
    /// Query window with `from` after `to`.
    #[error("'from' must not be after 'to'")]
    PeriodReversed,
}

impl ValidationError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NumberRequired => "NUMBER_REQUIRED",
            Self::NameRequired => "NAME_REQUIRED",
            Self::StatementRequired => "STATEMENT_REQUIRED",
            Self::StatementAmbiguous => "STATEMENT_AMBIGUOUS",
            Self::NormalBalanceRequired => "NORMAL_BALANCE_REQUIRED",
            Self::NormalBalanceAmbiguous => "NORMAL_BALANCE_AMBIGUOUS",
            Self::MultipleAttributes => "MULTIPLE_ATTRIBUTES",
            Self::DuplicateNumber { .. } => "DUPLICATE_NUMBER",
            Self::ParentInOtherChart => "PARENT_IN_OTHER_CHART",
            Self::NumberOutsideParent => "NUMBER_OUTSIDE_PARENT",
            Self::InheritanceMismatch { .. } => "INHERITANCE_MISMATCH",
            Self::DebitRequired => "DEBIT_REQUIRED",
            Self::CreditRequired => "CREDIT_REQUIRED",
            Self::DateRequired => "DATE_REQUIRED",
            Self::MemoRequired => "MEMO_REQUIRED",
            Self::ValueRequired { .. } => "VALUE_REQUIRED",
            Self::ValueNotPositive { .. } => "VALUE_NOT_POSITIVE",
            Self::AccountRequired { .. } => "ACCOUNT_REQUIRED",
            Self::EntryAccountNotFound { .. } => "ENTRY_ACCOUNT_NOT_FOUND",
            Self::AccountInOtherChart { .. } => "ACCOUNT_IN_OTHER_CHART",
            Self::AccountNotAnalytic { .. } => "ACCOUNT_NOT_ANALYTIC",
            Self::Unbalanced { .. } => "UNBALANCED_TRANSACTION",
            Self::PeriodReversed => "PERIOD_REVERSED",
        }
    }

    /// Side and position of the offending entry, for entry-level violations.
    #[must_use]
    pub fn entry_position(&self) -> Option<(EntryType, usize)> {
        match *self {
            Self::ValueRequired { side, index }
            | Self::ValueNotPositive { side, index }
            | Self::AccountRequired { side, index }
            | Self::EntryAccountNotFound { side, index }
            | Self::AccountInOtherChart { side, index }
            | Self::AccountNotAnalytic { side, index } => Some((side, index)),
            _ => None,
        }
    }
}

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A submitted definition broke a rule.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Chart of accounts not found.
    #[error("chart of accounts not found: {0}")]
    ChartNotFound(ChartId),

    /// Account not found.
    #[error("account not found: {0}")]
    AccountNotFound(AccountId),

    /// The parent named by an account definition does not resolve.
    #[error("parent account not found: {0}")]
    ParentNotFound(AccountId),

    /// Store lookup for one transaction entry failed.
    #[error("lookup failed for {side} entry {index}: {source}")]
    EntryLookup {
        /// Side of the entry.
        side: EntryType,
        /// Position within that side.
        index: usize,
        /// Underlying store failure.
        source: StoreError,
    },

    /// Record store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(err) => err.error_code(),
            Self::ChartNotFound(_) => "CHART_NOT_FOUND",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::ParentNotFound(_) => "PARENT_NOT_FOUND",
            Self::EntryLookup { source, .. } | Self::Store(source) => source.error_code(),
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - the submitted definition is at fault
            Self::Validation(_) | Self::ParentNotFound(_) => 400,

            // 404 Not Found
            Self::ChartNotFound(_) | Self::AccountNotFound(_) => 404,

            // 5xx - store failures
            Self::EntryLookup { source, .. } | Self::Store(source) => source.http_status_code(),
        }
    }

    /// Returns true for rule violations reported back to the caller verbatim.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true for failures of the record store.
    #[must_use]
    pub fn is_system(&self) -> bool {
        matches!(self, Self::EntryLookup { .. } | Self::Store(_))
    }
}
