//! Voucher posting and lifecycle routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use folio_core::{CreateVoucherRequest, VoucherLine, VoucherStatus, VoucherType};
use folio_ledger::VoucherFilter;
use folio_shared::{TenantId, VoucherId};

use crate::AppState;
use super::error_response;

/// Creates the voucher routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tenants/{tenant_id}/vouchers", get(list_vouchers))
        .route("/tenants/{tenant_id}/vouchers", post(post_voucher))
        .route("/tenants/{tenant_id}/vouchers/drafts", post(create_draft))
        .route("/tenants/{tenant_id}/vouchers/{id}", get(get_voucher))
        .route("/tenants/{tenant_id}/vouchers/{id}/post", post(post_draft))
        .route("/tenants/{tenant_id}/vouchers/{id}/void", post(void_voucher))
}

/// Request body for creating a voucher; the tenant comes from the path.
#[derive(Debug, Deserialize)]
pub struct VoucherPayload {
    /// Voucher type.
    #[serde(rename = "type")]
    pub voucher_type: VoucherType,
    /// Voucher date (YYYY-MM-DD).
    pub date: NaiveDate,
    /// Description.
    pub description: Option<String>,
    /// External reference.
    pub reference: Option<String>,
    /// Accounting lines.
    pub lines: Vec<VoucherLine>,
}

impl VoucherPayload {
    fn into_request(self, tenant_id: TenantId) -> CreateVoucherRequest {
        CreateVoucherRequest {
            tenant_id,
            voucher_type: self.voucher_type,
            date: self.date,
            description: self.description,
            reference: self.reference,
            lines: self.lines,
        }
    }
}

/// Query filter for listing vouchers.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Voucher type filter.
    #[serde(rename = "type")]
    pub voucher_type: Option<VoucherType>,
    /// Status filter.
    pub status: Option<VoucherStatus>,
    /// Earliest date.
    pub from: Option<NaiveDate>,
    /// Latest date.
    pub to: Option<NaiveDate>,
}

/// POST `/tenants/{tenant_id}/vouchers` - Validate and post a voucher.
async fn post_voucher(
    State(state): State<AppState>,
    Path(tenant_id): Path<TenantId>,
    Json(payload): Json<VoucherPayload>,
) -> impl IntoResponse {
    match state
        .ledger
        .post_voucher(payload.into_request(tenant_id))
        .await
    {
        Ok(voucher) => (StatusCode::CREATED, Json(voucher)).into_response(),
        Err(err) => error_response(&err),
    }
}

/// POST `/tenants/{tenant_id}/vouchers/drafts` - Store an unnumbered draft.
async fn create_draft(
    State(state): State<AppState>,
    Path(tenant_id): Path<TenantId>,
    Json(payload): Json<VoucherPayload>,
) -> impl IntoResponse {
    match state.ledger.create_draft(payload.into_request(tenant_id)) {
        Ok(voucher) => (StatusCode::CREATED, Json(voucher)).into_response(),
        Err(err) => error_response(&err),
    }
}

/// POST `/tenants/{tenant_id}/vouchers/{id}/post` - Post an existing draft.
async fn post_draft(
    State(state): State<AppState>,
    Path((tenant_id, id)): Path<(TenantId, VoucherId)>,
) -> impl IntoResponse {
    match state.ledger.post_draft(tenant_id, id).await {
        Ok(voucher) => Json(voucher).into_response(),
        Err(err) => error_response(&err),
    }
}

/// POST `/tenants/{tenant_id}/vouchers/{id}/void` - Void a posted voucher.
async fn void_voucher(
    State(state): State<AppState>,
    Path((tenant_id, id)): Path<(TenantId, VoucherId)>,
) -> impl IntoResponse {
    match state.ledger.void_voucher(tenant_id, id).await {
        Ok(voucher) => Json(voucher).into_response(),
        Err(err) => error_response(&err),
    }
}

/// GET `/tenants/{tenant_id}/vouchers/{id}` - Fetch one voucher.
async fn get_voucher(
    State(state): State<AppState>,
    Path((tenant_id, id)): Path<(TenantId, VoucherId)>,
) -> impl IntoResponse {
    match state.ledger.get_voucher(tenant_id, id) {
        Ok(voucher) => Json(voucher).into_response(),
        Err(err) => error_response(&err),
    }
}

/// GET `/tenants/{tenant_id}/vouchers` - List vouchers, newest first.
async fn list_vouchers(
    State(state): State<AppState>,
    Path(tenant_id): Path<TenantId>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let vouchers = state.ledger.list_vouchers(
        tenant_id,
        VoucherFilter {
            voucher_type: query.voucher_type,
            status: query.status,
            from: query.from,
            to: query.to,
        },
    );
    Json(json!({ "vouchers": vouchers })).into_response()
}
