//! Record store implementations for Ledgerbook.
//!
//! This crate provides:
//! - `MemoryStore`, an in-process [`RecordStore`](ledgerbook_core::store::RecordStore)
//! - Demo chart seeding for local development

pub mod memory;
pub mod seed;

pub use memory::MemoryStore;
pub use seed::seed_demo;
