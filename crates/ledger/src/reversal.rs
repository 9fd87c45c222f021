//! Credit and debit note workflow.
//!
//! A note reverses a posted sales invoice through a brand new voucher;
//! the original is never mutated. Only approval touches the ledger.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use dashmap::DashMap;
use tracing::info;

use folio_core::reversal::build_reversal_lines;
use folio_core::{
    CreateVoucherRequest, LedgerError, Note, NoteKind, NoteStatus, VoucherStatus, VoucherType,
};
use folio_shared::{NoteId, TenantId, VoucherId};

use crate::posting::VoucherPostingEngine;
use crate::store::LedgerEntryStore;

/// Payload for creating a reversal note.
#[derive(Debug, Clone)]
pub struct CreateNoteRequest {
    /// Credit or debit note.
    pub kind: NoteKind,
    /// The posted sales invoice being reversed.
    pub original_voucher_id: VoucherId,
    /// Date of the reversal voucher.
    pub date: NaiveDate,
    /// Description carried onto the reversal voucher.
    pub description: String,
}

/// Note store plus the approval workflow that posts reversals.
pub struct ReversalEngine {
    store: Arc<LedgerEntryStore>,
    posting: Arc<VoucherPostingEngine>,
    notes: DashMap<NoteId, Note>,
}

impl ReversalEngine {
    /// Creates an engine posting reversals through `posting`.
    #[must_use]
    pub fn new(store: Arc<LedgerEntryStore>, posting: Arc<VoucherPostingEngine>) -> Self {
        Self {
            store,
            posting,
            notes: DashMap::new(),
        }
    }

    /// Creates a draft note against a posted sales invoice. No ledger
    /// effect yet.
    ///
    /// # Errors
    ///
    /// [`LedgerError::VoucherNotFound`] for unknown originals,
    /// [`LedgerError::NoteSourceNotInvoice`] when the original is not a
    /// sales invoice and [`LedgerError::NotPosted`] when it is not posted.
    pub fn create_note(
        &self,
        tenant_id: TenantId,
        request: CreateNoteRequest,
    ) -> Result<Note, LedgerError> {
        let original = self.store.get(tenant_id, request.original_voucher_id)?;
        if original.voucher_type != VoucherType::SalesInvoice {
            return Err(LedgerError::NoteSourceNotInvoice(original.id));
        }
        if original.status != VoucherStatus::Posted {
            return Err(LedgerError::NotPosted(original.id));
        }
        let note = Note {
            id: NoteId::new(),
            tenant_id,
            kind: request.kind,
            original_voucher_id: original.id,
            date: request.date,
            description: request.description,
            status: NoteStatus::Draft,
            reversal_voucher_id: None,
            created_at: Utc::now(),
        };
        self.notes.insert(note.id, note.clone());
        Ok(note)
    }

    /// Approves a draft note, posting its reversal voucher.
    ///
    /// The reversal goes through the posting engine like any other
    /// voucher: it is numbered in the note type's sequence and rejected
    /// if the note's period has closed.
    ///
    /// # Errors
    ///
    /// [`LedgerError::NoteNotFound`],
    /// [`LedgerError::InvalidNoteTransition`] outside draft state, plus
    /// every posting error.
    pub async fn approve_note(
        &self,
        tenant_id: TenantId,
        note_id: NoteId,
    ) -> Result<Note, LedgerError> {
        let original = self
            .store
            .get(tenant_id, self.get_note(tenant_id, note_id)?.original_voucher_id)?;

        // Claim the note before posting so a concurrent approval of the
        // same note cannot post a second reversal.
        let note = {
            let mut entry = self
                .notes
                .get_mut(&note_id)
                .ok_or(LedgerError::NoteNotFound(note_id))?;
            if entry.tenant_id != tenant_id {
                return Err(LedgerError::NoteNotFound(note_id));
            }
            entry.status = entry.status.transition(NoteStatus::Approved)?;
            entry.clone()
        };

        let posted = self
            .posting
            .post(CreateVoucherRequest {
                tenant_id,
                voucher_type: note.kind.voucher_type(),
                date: note.date,
                description: Some(note.description.clone()),
                reference: original.display_number(),
                lines: build_reversal_lines(note.kind, &original.entries),
            })
            .await;
        let reversal = match posted {
            Ok(reversal) => reversal,
            Err(err) => {
                // Posting failed; release the claim so the note can be
                // approved again after the caller resolves the error. Only
                // an unchanged claim is released: a transition that raced
                // in during the await stands.
                if let Some(mut entry) = self.notes.get_mut(&note_id) {
                    if entry.status == NoteStatus::Approved && entry.reversal_voucher_id.is_none() {
                        entry.status = NoteStatus::Draft;
                    }
                }
                return Err(err);
            }
        };

        let mut entry = self
            .notes
            .get_mut(&note_id)
            .ok_or(LedgerError::NoteNotFound(note_id))?;
        entry.reversal_voucher_id = Some(reversal.id);
        let approved = entry.clone();
        drop(entry);

        info!(
            tenant_id = %tenant_id,
            note_id = %note_id,
            reversal_voucher_id = %reversal.id,
            "reversal note approved"
        );
        Ok(approved)
    }

    /// Marks an approved note as sent to the tax authority.
    ///
    /// # Errors
    ///
    /// [`LedgerError::NoteNotFound`] and
    /// [`LedgerError::InvalidNoteTransition`] outside approved state.
    pub fn mark_sent(&self, tenant_id: TenantId, note_id: NoteId) -> Result<Note, LedgerError> {
        let mut entry = self
            .notes
            .get_mut(&note_id)
            .ok_or(LedgerError::NoteNotFound(note_id))?;
        if entry.tenant_id != tenant_id {
            return Err(LedgerError::NoteNotFound(note_id));
        }
        entry.status = entry.status.transition(NoteStatus::SentToAuthority)?;
        Ok(entry.clone())
    }

    /// Fetches one note.
    ///
    /// # Errors
    ///
    /// [`LedgerError::NoteNotFound`] for unknown ids or foreign tenants.
    pub fn get_note(&self, tenant_id: TenantId, note_id: NoteId) -> Result<Note, LedgerError> {
        self.notes
            .get(&note_id)
            .filter(|note| note.tenant_id == tenant_id)
            .map(|note| note.clone())
            .ok_or(LedgerError::NoteNotFound(note_id))
    }

    /// Lists a tenant's notes, newest first.
    #[must_use]
    pub fn list_notes(&self, tenant_id: TenantId) -> Vec<Note> {
        let mut notes: Vec<Note> = self
            .notes
            .iter()
            .filter(|note| note.tenant_id == tenant_id)
            .map(|note| note.clone())
            .collect();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        notes
    }
}
