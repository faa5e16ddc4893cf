//! JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use ledgerbook_core::ledger::{LedgerError, ValidationError};
use serde_json::{Value, json};
use tracing::error;

/// Error returned by a handler.
#[derive(Debug)]
pub enum ApiError {
    /// The ledger service refused or failed the request.
    Ledger(LedgerError),
    /// A required query parameter was absent.
    MissingParameter(&'static str),
    /// A query parameter could not be parsed.
    InvalidParameter(&'static str),
    /// The request body is not a JSON document of the expected shape.
    InvalidBody(String),
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        Self::Ledger(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Ledger(err.into())
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Ledger(err) => StatusCode::from_u16(err.http_status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Self::MissingParameter(_) | Self::InvalidParameter(_) | Self::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }

    fn body(&self) -> Value {
        match self {
            Self::Ledger(err) if err.is_system() => {
                error!(error = %err, "record store failure");
                json!({
                    "error": err.error_code().to_ascii_lowercase(),
                    "message": "An error occurred"
                })
            }
            Self::Ledger(err) => {
                let mut body = json!({
                    "error": err.error_code().to_ascii_lowercase(),
                    "message": err.to_string()
                });
                if let Some((side, index)) = entry_position(err) {
                    body["side"] = json!(side);
                    body["index"] = json!(index);
                }
                body
            }
            Self::MissingParameter(name) => json!({
                "error": "missing_parameter",
                "message": format!("query parameter '{name}' is required")
            }),
            Self::InvalidParameter(name) => json!({
                "error": "invalid_parameter",
                "message": format!("query parameter '{name}' must be a date")
            }),
            Self::InvalidBody(message) => json!({
                "error": "invalid_body",
                "message": message
            }),
        }
    }
}

fn entry_position(err: &LedgerError) -> Option<(String, usize)> {
    match err {
        LedgerError::Validation(v) => v.entry_position(),
        _ => None,
    }
    .map(|(side, index)| (side.to_string(), index))
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}
