//! Shared types and configuration for Ledgerbook.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for charts, accounts and transactions
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
