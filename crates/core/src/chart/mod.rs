//! Chart of accounts: hierarchy model and account validation.
//!
//! - Typed account classification and hierarchy status
//! - Parent/child attachment with the analytic to synthetic flip
//! - Chart and account validation rules

pub mod hierarchy;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use hierarchy::find_account;
pub use types::{
    Account, AccountClassification, AccountInput, ChartInput, ChartOfAccounts, Classification,
    HierarchyStatus, IncomeStatementAttribute, InheritableFlag, NewAccount, NewChart,
    NormalBalance, StatementKind,
};
pub use validation::{ValidAccount, validate_account, validate_chart};
