//! Financial report routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDate;
use serde::Deserialize;

use folio_core::VoucherType;
use folio_shared::TenantId;

use crate::AppState;
use super::error_response;

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tenants/{tenant_id}/reports/journal", get(journal))
        .route(
            "/tenants/{tenant_id}/reports/ledger/{code}",
            get(general_ledger),
        )
        .route(
            "/tenants/{tenant_id}/reports/trial-balance",
            get(trial_balance),
        )
        .route(
            "/tenants/{tenant_id}/reports/balance-sheet",
            get(balance_sheet),
        )
        .route(
            "/tenants/{tenant_id}/reports/income-statement",
            get(income_statement),
        )
}

/// Date window for range reports.
#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    /// Start date, inclusive.
    pub from: NaiveDate,
    /// End date, inclusive.
    pub to: NaiveDate,
}

/// Journal query: a window plus an optional voucher type.
#[derive(Debug, Deserialize)]
pub struct JournalQuery {
    /// Start date, inclusive.
    pub from: NaiveDate,
    /// End date, inclusive.
    pub to: NaiveDate,
    /// Voucher type filter.
    #[serde(rename = "type")]
    pub voucher_type: Option<VoucherType>,
}

/// Cutoff date for point-in-time reports.
#[derive(Debug, Deserialize)]
pub struct AsOfQuery {
    /// Cutoff date, inclusive.
    pub as_of: NaiveDate,
}

/// GET `/tenants/{tenant_id}/reports/journal` - Chronological journal.
async fn journal(
    State(state): State<AppState>,
    Path(tenant_id): Path<TenantId>,
    Query(query): Query<JournalQuery>,
) -> impl IntoResponse {
    Json(
        state
            .ledger
            .journal(tenant_id, query.from, query.to, query.voucher_type),
    )
    .into_response()
}

/// GET `/tenants/{tenant_id}/reports/ledger/{code}` - One account's ledger.
async fn general_ledger(
    State(state): State<AppState>,
    Path((tenant_id, code)): Path<(TenantId, String)>,
    Query(query): Query<RangeQuery>,
) -> impl IntoResponse {
    match state
        .ledger
        .general_ledger(tenant_id, &code, query.from, query.to)
    {
        Ok(report) => Json(report).into_response(),
        Err(err) => error_response(&err),
    }
}

/// GET `/tenants/{tenant_id}/reports/trial-balance` - Trial balance.
async fn trial_balance(
    State(state): State<AppState>,
    Path(tenant_id): Path<TenantId>,
    Query(query): Query<RangeQuery>,
) -> impl IntoResponse {
    Json(state.ledger.trial_balance(tenant_id, query.from, query.to)).into_response()
}

/// GET `/tenants/{tenant_id}/reports/balance-sheet` - Balance sheet.
async fn balance_sheet(
    State(state): State<AppState>,
    Path(tenant_id): Path<TenantId>,
    Query(query): Query<AsOfQuery>,
) -> impl IntoResponse {
    Json(state.ledger.balance_sheet(tenant_id, query.as_of)).into_response()
}

/// GET `/tenants/{tenant_id}/reports/income-statement` - Income statement.
async fn income_statement(
    State(state): State<AppState>,
    Path(tenant_id): Path<TenantId>,
    Query(query): Query<RangeQuery>,
) -> impl IntoResponse {
    Json(
        state
            .ledger
            .income_statement(tenant_id, query.from, query.to),
    )
    .into_response()
}
