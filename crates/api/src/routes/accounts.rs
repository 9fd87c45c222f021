//! Chart-of-accounts management routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use serde_json::json;

use folio_ledger::{AccountFilter, AccountUpdate, NewAccount};
use folio_shared::TenantId;

use crate::AppState;
use super::error_response;

/// Creates the account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tenants/{tenant_id}/accounts", get(list_accounts))
        .route("/tenants/{tenant_id}/accounts", post(create_account))
        .route("/tenants/{tenant_id}/accounts/import", post(import_chart))
        .route(
            "/tenants/{tenant_id}/accounts/import-default",
            post(import_default_chart),
        )
        .route("/tenants/{tenant_id}/accounts/{code}", get(get_account))
        .route("/tenants/{tenant_id}/accounts/{code}", patch(update_account))
        .route("/tenants/{tenant_id}/accounts/{code}", delete(delete_account))
        .route(
            "/tenants/{tenant_id}/accounts/{code}/deactivate",
            post(deactivate_account),
        )
}

/// GET `/tenants/{tenant_id}/accounts` - List accounts, active by default.
async fn list_accounts(
    State(state): State<AppState>,
    Path(tenant_id): Path<TenantId>,
    Query(filter): Query<AccountFilter>,
) -> impl IntoResponse {
    let accounts = state.ledger.list_accounts(tenant_id, filter);
    Json(json!({ "accounts": accounts })).into_response()
}

/// POST `/tenants/{tenant_id}/accounts` - Create one account.
async fn create_account(
    State(state): State<AppState>,
    Path(tenant_id): Path<TenantId>,
    Json(payload): Json<NewAccount>,
) -> impl IntoResponse {
    match state.ledger.create_account(tenant_id, payload) {
        Ok(account) => (StatusCode::CREATED, Json(account)).into_response(),
        Err(err) => error_response(&err),
    }
}

/// POST `/tenants/{tenant_id}/accounts/import` - Import a chart of accounts.
async fn import_chart(
    State(state): State<AppState>,
    Path(tenant_id): Path<TenantId>,
    Json(payload): Json<Vec<NewAccount>>,
) -> impl IntoResponse {
    match state.ledger.import_chart(tenant_id, payload) {
        Ok(created) => (StatusCode::CREATED, Json(json!({ "created": created }))).into_response(),
        Err(err) => error_response(&err),
    }
}

/// POST `/tenants/{tenant_id}/accounts/import-default` - Import the chart
/// configured at startup.
async fn import_default_chart(
    State(state): State<AppState>,
    Path(tenant_id): Path<TenantId>,
) -> impl IntoResponse {
    let chart = state.default_chart.as_ref().clone();
    match state.ledger.import_chart(tenant_id, chart) {
        Ok(created) => (StatusCode::CREATED, Json(json!({ "created": created }))).into_response(),
        Err(err) => error_response(&err),
    }
}

/// GET `/tenants/{tenant_id}/accounts/{code}` - Fetch one account.
async fn get_account(
    State(state): State<AppState>,
    Path((tenant_id, code)): Path<(TenantId, String)>,
) -> impl IntoResponse {
    match state.ledger.get_account(tenant_id, &code) {
        Ok(account) => Json(account).into_response(),
        Err(err) => error_response(&err),
    }
}

/// PATCH `/tenants/{tenant_id}/accounts/{code}` - Update editable fields.
async fn update_account(
    State(state): State<AppState>,
    Path((tenant_id, code)): Path<(TenantId, String)>,
    Json(payload): Json<AccountUpdate>,
) -> impl IntoResponse {
    match state.ledger.update_account(tenant_id, &code, payload) {
        Ok(account) => Json(account).into_response(),
        Err(err) => error_response(&err),
    }
}

/// POST `/tenants/{tenant_id}/accounts/{code}/deactivate` - Stop postings.
async fn deactivate_account(
    State(state): State<AppState>,
    Path((tenant_id, code)): Path<(TenantId, String)>,
) -> impl IntoResponse {
    match state.ledger.deactivate_account(tenant_id, &code) {
        Ok(account) => Json(account).into_response(),
        Err(err) => error_response(&err),
    }
}

/// DELETE `/tenants/{tenant_id}/accounts/{code}` - Delete an unused account.
async fn delete_account(
    State(state): State<AppState>,
    Path((tenant_id, code)): Path<(TenantId, String)>,
) -> impl IntoResponse {
    match state.ledger.delete_account(tenant_id, &code) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(&err),
    }
}
