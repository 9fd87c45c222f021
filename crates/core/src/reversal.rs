//! Credit/debit note construction.
//!
//! A note is a document referencing a posted sales invoice. Approving a
//! note posts a brand-new voucher through the regular posting path; the
//! original invoice is never mutated. A credit note reverses the invoice's
//! ledger effect by swapping debit and credit sides; a debit note increases
//! the charge by re-applying the invoice's entries with sides preserved.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use folio_shared::types::{NoteId, TenantId, VoucherId};

use crate::error::LedgerError;
use crate::request::VoucherLine;
use crate::voucher::{Entry, VoucherType};

/// Kind of note document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    /// Credit note: reverses the invoice's ledger effect.
    Credit,
    /// Debit note: increases the invoice's charge.
    Debit,
}

impl NoteKind {
    /// The voucher type the note posts as.
    #[must_use]
    pub const fn voucher_type(self) -> VoucherType {
        match self {
            Self::Credit => VoucherType::CreditNote,
            Self::Debit => VoucherType::DebitNote,
        }
    }
}

/// Note document status.
///
/// Only the Draft -> Approved transition has ledger effects; marking the
/// note sent to the document authority is a flag for the external
/// submission collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteStatus {
    /// Note is being drafted; no ledger effect yet.
    Draft,
    /// Note is approved; the reversal voucher has been posted.
    Approved,
    /// Note has been handed to the external document authority.
    SentToAuthority,
}

impl NoteStatus {
    /// Validates a status transition.
    ///
    /// # Errors
    ///
    /// Returns `InvalidNoteTransition` for anything other than
    /// Draft -> Approved -> SentToAuthority.
    pub fn transition(self, to: Self) -> Result<Self, LedgerError> {
        match (self, to) {
            (Self::Draft, Self::Approved) | (Self::Approved, Self::SentToAuthority) => Ok(to),
            (from, to) => Err(LedgerError::InvalidNoteTransition { from, to }),
        }
    }
}

/// A credit/debit note document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier.
    pub id: NoteId,
    /// Tenant the note belongs to.
    pub tenant_id: TenantId,
    /// Credit or debit.
    pub kind: NoteKind,
    /// The posted sales invoice this note references.
    pub original_voucher_id: VoucherId,
    /// Note date (the reversal voucher is dated with it).
    pub date: NaiveDate,
    /// Description carried onto the reversal voucher.
    pub description: String,
    /// Current status.
    pub status: NoteStatus,
    /// The voucher posted on approval, if approved.
    pub reversal_voucher_id: Option<VoucherId>,
    /// When the note was created.
    pub created_at: DateTime<Utc>,
}

/// Builds the reversal voucher lines for a note from the original
/// invoice's entries.
///
/// Credit note: debit/credit swapped per line. Debit note: sides
/// preserved. Line ordering and third-party/cost-center references are
/// kept so the reversal nets precisely against the original.
#[must_use]
pub fn build_reversal_lines(kind: NoteKind, original_entries: &[Entry]) -> Vec<VoucherLine> {
    original_entries
        .iter()
        .map(|entry| {
            let (debit, credit) = match kind {
                NoteKind::Credit => (entry.credit, entry.debit),
                NoteKind::Debit => (entry.debit, entry.credit),
            };
            VoucherLine {
                account_code: entry.account_code.clone(),
                debit,
                credit,
                third_party: entry.third_party,
                cost_center: entry.cost_center,
                description: entry.description.clone(),
                tax_base: entry.tax_base,
                tax_value: entry.tax_value,
            }
        })
        .collect()
}
