//! Core business logic for Ledgerbook.
//!
//! This crate contains the accounting engine with ZERO web or storage dependencies.
//! Persistence is reached only through the [`store::RecordStore`] trait.
//!
//! # Modules
//!
//! - `chart` - Chart of accounts hierarchy and account validation
//! - `ledger` - Double-entry transactions, balances and the ledger service
//! - `reports` - Journal and account ledger aggregation
//! - `store` - Record store abstraction

pub mod chart;
pub mod ledger;
pub mod reports;
pub mod store;

mod lenient;

#[cfg(test)]
mod testing;
