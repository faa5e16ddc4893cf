//! Record store error types.

use ledgerbook_shared::types::{AccountId, ChartId};
use thiserror::Error;

/// Failures reported by a [`RecordStore`](super::RecordStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store cannot be reached.
    #[error("record store unavailable: {0}")]
    Unavailable(String),

    /// A write named a chart the store does not hold.
    #[error("chart of accounts {0} missing from store")]
    ChartMissing(ChartId),

    /// A write named an account the store does not hold.
    #[error("account {0} missing from store")]
    AccountMissing(AccountId),

    /// Any other store failure.
    #[error("record store error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "STORE_UNAVAILABLE",
            Self::ChartMissing(_) | Self::AccountMissing(_) => "STORE_MISSING_RECORD",
            Self::Internal(_) => "STORE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Unavailable(_) => 503,
            Self::ChartMissing(_) | Self::AccountMissing(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns true if retrying the operation may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}
