//! Transaction routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use ledgerbook_core::ledger::{Transaction, TransactionInput};
use ledgerbook_shared::types::ChartId;

use crate::{AppState, error::ApiError, extract::JsonBody};

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/charts-of-accounts/{chart_id}/transactions",
        get(list_transactions).post(post_transaction),
    )
}

/// GET `/charts-of-accounts/{chart_id}/transactions` - ordered by date, then posting time.
async fn list_transactions(
    State(state): State<AppState>,
    Path(chart_id): Path<ChartId>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    Ok(Json(state.ledger.transactions(chart_id).await?))
}

/// POST `/charts-of-accounts/{chart_id}/transactions`
async fn post_transaction(
    State(state): State<AppState>,
    Path(chart_id): Path<ChartId>,
    JsonBody(input): JsonBody<TransactionInput>,
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    let transaction = state
        .ledger
        .validate_and_post_transaction(chart_id, input)
        .await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}
