//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST routes for charts of accounts, accounts and transactions
//! - Journal and ledger report endpoints
//! - JSON error responses mapped from ledger errors and malformed bodies

pub mod error;
pub mod extract;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use ledgerbook_core::ledger::LedgerService;
use ledgerbook_store::MemoryStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Ledger service over the in-memory store.
    pub ledger: Arc<LedgerService<MemoryStore>>,
}

impl AppState {
    /// Wraps a store in a fresh ledger service.
    #[must_use]
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            ledger: Arc::new(LedgerService::new(store)),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    routes::api_routes()
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
