//! API route definitions.

use axum::{Json, Router, http::StatusCode, response::Response};
use axum::response::IntoResponse;
use serde_json::json;
use tracing::error;

use folio_core::LedgerError;

use crate::AppState;

pub mod accounts;
pub mod fiscal;
pub mod health;
pub mod notes;
pub mod reports;
pub mod vouchers;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(accounts::routes())
        .merge(vouchers::routes())
        .merge(fiscal::routes())
        .merge(reports::routes())
        .merge(notes::routes())
}

/// Maps a ledger error to its HTTP response.
pub(crate) fn error_response(err: &LedgerError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!(error = %err, "internal ledger error");
    }
    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string(),
            "retryable": err.is_retryable(),
        })),
    )
        .into_response()
}
