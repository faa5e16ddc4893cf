//! Chart of accounts routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use ledgerbook_core::chart::{ChartInput, ChartOfAccounts};
use ledgerbook_shared::types::{AccountId, ChartId};
use serde::Deserialize;

use crate::{AppState, error::ApiError, extract::JsonBody};

/// Creates the chart of accounts routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/charts-of-accounts", get(list_charts).post(create_chart))
        .route("/charts-of-accounts/{chart_id}", get(get_chart))
        .route(
            "/charts-of-accounts/{chart_id}/retained-earnings",
            put(designate_retained_earnings).delete(clear_retained_earnings),
        )
}

/// Request body for designating the retained earnings account.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetainedEarningsRequest {
    /// Account to designate.
    pub account_id: AccountId,
}

/// GET `/charts-of-accounts`
async fn list_charts(State(state): State<AppState>) -> Result<Json<Vec<ChartOfAccounts>>, ApiError> {
    Ok(Json(state.ledger.charts().await?))
}

/// POST `/charts-of-accounts`
async fn create_chart(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<ChartInput>,
) -> Result<(StatusCode, Json<ChartOfAccounts>), ApiError> {
    let chart = state.ledger.validate_and_store_chart(input).await?;
    Ok((StatusCode::CREATED, Json(chart)))
}

/// GET `/charts-of-accounts/{chart_id}`
async fn get_chart(
    State(state): State<AppState>,
    Path(chart_id): Path<ChartId>,
) -> Result<Json<ChartOfAccounts>, ApiError> {
    Ok(Json(state.ledger.chart(chart_id).await?))
}

/// PUT `/charts-of-accounts/{chart_id}/retained-earnings`
async fn designate_retained_earnings(
    State(state): State<AppState>,
    Path(chart_id): Path<ChartId>,
    JsonBody(request): JsonBody<RetainedEarningsRequest>,
) -> Result<Json<ChartOfAccounts>, ApiError> {
    state
        .ledger
        .designate_retained_earnings(chart_id, request.account_id)
        .await?;
    Ok(Json(state.ledger.chart(chart_id).await?))
}

/// DELETE `/charts-of-accounts/{chart_id}/retained-earnings`
async fn clear_retained_earnings(
    State(state): State<AppState>,
    Path(chart_id): Path<ChartId>,
) -> Result<StatusCode, ApiError> {
    state.ledger.clear_retained_earnings(chart_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
