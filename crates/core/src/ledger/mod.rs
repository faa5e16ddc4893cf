//! Double-entry bookkeeping logic.
//!
//! This module implements the core ledger functionality:
//! - Entries and the transaction aggregate
//! - Balance sign rules and running balances
//! - Transaction validation
//! - Error types for ledger operations
//! - Ledger service tying validation, the record store and reports together

pub mod balance;
pub mod entry;
pub mod error;
pub mod service;
pub mod transaction;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use balance::{RunningBalance, signed_contribution};
pub use entry::{Entry, EntryInput, EntryType};
pub use error::{LedgerError, ValidationError};
pub use service::LedgerService;
pub use transaction::{NewTransaction, Transaction, TransactionInput, parse_date};
pub use validation::validate_transaction;
