//! Account routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use ledgerbook_core::chart::{Account, AccountInput};
use ledgerbook_shared::types::{AccountId, ChartId};

use crate::{AppState, error::ApiError, extract::JsonBody};

/// Creates the account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/charts-of-accounts/{chart_id}/accounts",
            get(list_accounts).post(attach_account),
        )
        .route(
            "/charts-of-accounts/{chart_id}/accounts/{account_id}",
            get(get_account).put(update_account),
        )
}

/// GET `/charts-of-accounts/{chart_id}/accounts`
async fn list_accounts(
    State(state): State<AppState>,
    Path(chart_id): Path<ChartId>,
) -> Result<Json<Vec<Account>>, ApiError> {
    Ok(Json(state.ledger.accounts(chart_id).await?))
}

/// POST `/charts-of-accounts/{chart_id}/accounts`
async fn attach_account(
    State(state): State<AppState>,
    Path(chart_id): Path<ChartId>,
    JsonBody(input): JsonBody<AccountInput>,
) -> Result<(StatusCode, Json<Account>), ApiError> {
    let account = state
        .ledger
        .validate_and_attach_account(chart_id, input)
        .await?;
    Ok((StatusCode::CREATED, Json(account)))
}

/// GET `/charts-of-accounts/{chart_id}/accounts/{account_id}`
async fn get_account(
    State(state): State<AppState>,
    Path((chart_id, account_id)): Path<(ChartId, AccountId)>,
) -> Result<Json<Account>, ApiError> {
    Ok(Json(state.ledger.account(chart_id, account_id).await?))
}

/// PUT `/charts-of-accounts/{chart_id}/accounts/{account_id}`
async fn update_account(
    State(state): State<AppState>,
    Path((chart_id, account_id)): Path<(ChartId, AccountId)>,
    JsonBody(input): JsonBody<AccountInput>,
) -> Result<Json<Account>, ApiError> {
    let account = state
        .ledger
        .validate_and_update_account(chart_id, account_id, input)
        .await?;
    Ok(Json(account))
}
