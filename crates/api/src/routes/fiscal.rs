//! Fiscal period routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;

use folio_shared::TenantId;

use crate::AppState;
use super::error_response;

/// Creates the fiscal period routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tenants/{tenant_id}/fiscal-periods", get(list_periods))
        .route(
            "/tenants/{tenant_id}/fiscal-periods/{year}/{month}/close",
            post(close_period),
        )
}

/// GET `/tenants/{tenant_id}/fiscal-periods` - List period records.
async fn list_periods(
    State(state): State<AppState>,
    Path(tenant_id): Path<TenantId>,
) -> impl IntoResponse {
    let periods = state.ledger.list_periods(tenant_id);
    Json(json!({ "periods": periods })).into_response()
}

/// POST `/tenants/{tenant_id}/fiscal-periods/{year}/{month}/close` - Close a
/// period. Irreversible; fails while drafts remain dated inside it.
async fn close_period(
    State(state): State<AppState>,
    Path((tenant_id, year, month)): Path<(TenantId, i32, u32)>,
) -> impl IntoResponse {
    match state.ledger.close_period(tenant_id, year, month).await {
        Ok(period) => Json(period).into_response(),
        Err(err) => error_response(&err),
    }
}
