//! Credit/debit note routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use folio_core::NoteKind;
use folio_ledger::CreateNoteRequest;
use folio_shared::{NoteId, TenantId, VoucherId};

use crate::AppState;
use super::error_response;

/// Creates the note routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tenants/{tenant_id}/notes", get(list_notes))
        .route("/tenants/{tenant_id}/notes", post(create_note))
        .route("/tenants/{tenant_id}/notes/{id}", get(get_note))
        .route("/tenants/{tenant_id}/notes/{id}/approve", post(approve_note))
        .route("/tenants/{tenant_id}/notes/{id}/send", post(mark_sent))
}

/// Request body for creating a note.
#[derive(Debug, Deserialize)]
pub struct NotePayload {
    /// Credit or debit.
    pub kind: NoteKind,
    /// The posted sales invoice being reversed.
    pub original_voucher_id: VoucherId,
    /// Note date (YYYY-MM-DD).
    pub date: NaiveDate,
    /// Reason for the note.
    pub description: String,
}

/// POST `/tenants/{tenant_id}/notes` - Create a draft note.
async fn create_note(
    State(state): State<AppState>,
    Path(tenant_id): Path<TenantId>,
    Json(payload): Json<NotePayload>,
) -> impl IntoResponse {
    let request = CreateNoteRequest {
        kind: payload.kind,
        original_voucher_id: payload.original_voucher_id,
        date: payload.date,
        description: payload.description,
    };
    match state.ledger.create_note(tenant_id, request) {
        Ok(note) => (StatusCode::CREATED, Json(note)).into_response(),
        Err(err) => error_response(&err),
    }
}

/// POST `/tenants/{tenant_id}/notes/{id}/approve` - Approve a note,
/// posting its reversal voucher.
async fn approve_note(
    State(state): State<AppState>,
    Path((tenant_id, id)): Path<(TenantId, NoteId)>,
) -> impl IntoResponse {
    match state.ledger.approve_note(tenant_id, id).await {
        Ok(note) => Json(note).into_response(),
        Err(err) => error_response(&err),
    }
}

/// POST `/tenants/{tenant_id}/notes/{id}/send` - Mark an approved note as
/// sent to the tax authority.
async fn mark_sent(
    State(state): State<AppState>,
    Path((tenant_id, id)): Path<(TenantId, NoteId)>,
) -> impl IntoResponse {
    match state.ledger.mark_note_sent(tenant_id, id) {
        Ok(note) => Json(note).into_response(),
        Err(err) => error_response(&err),
    }
}

/// GET `/tenants/{tenant_id}/notes/{id}` - Fetch one note.
async fn get_note(
    State(state): State<AppState>,
    Path((tenant_id, id)): Path<(TenantId, NoteId)>,
) -> impl IntoResponse {
    match state.ledger.get_note(tenant_id, id) {
        Ok(note) => Json(note).into_response(),
        Err(err) => error_response(&err),
    }
}

/// GET `/tenants/{tenant_id}/notes` - List a tenant's notes.
async fn list_notes(
    State(state): State<AppState>,
    Path(tenant_id): Path<TenantId>,
) -> impl IntoResponse {
    Json(json!({ "notes": state.ledger.list_notes(tenant_id) })).into_response()
}
