//! Journal and account ledger reports.
//!
//! Pure aggregation over an ordered transaction log:
//! - Journal: entries flattened in chronological order
//! - Account ledger: running balance, opening/closing balance, counterparts

pub mod service;
pub mod types;


pub use service::{LedgerWalk, PendingLedgerRow, ReportService};
pub use types::*;
