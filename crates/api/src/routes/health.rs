//! Health check endpoints.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use tracing::warn;

use crate::AppState;

/// Health check response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `healthy`, or `degraded` when the record store cannot be read.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Charts of accounts held by the store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_count: Option<usize>,
}

/// Health check handler. Reads the chart list to confirm the store answers.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let chart_count = match state.ledger.charts().await {
        Ok(charts) => Some(charts.len()),
        Err(err) => {
            warn!(error = %err, "health check could not read the record store");
            None
        }
    };
    Json(HealthResponse {
        status: if chart_count.is_some() { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        chart_count,
    })
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
