//! Ledger error taxonomy.
//!
//! Every failure of a ledger operation maps to one of five kinds:
//! validation (caller can resubmit corrected input), state (caller must
//! choose a different action), reference (unknown key), contention
//! (retryable), internal. Report consistency problems are never errors;
//! they surface as diagnostic fields on the report itself.

use rust_decimal::Decimal;
use thiserror::Error;

use folio_shared::types::{NoteId, VoucherId};

use crate::period::PeriodKey;
use crate::reversal::NoteStatus;

/// Classification of a ledger error, driving caller recovery strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before any persistence; resubmit corrected input.
    Validation,
    /// The operation conflicts with the current lifecycle state.
    State,
    /// A referenced key does not exist.
    Reference,
    /// Lock contention; retry with backoff.
    Contention,
    /// Unexpected internal failure.
    Internal,
}

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Voucher must have at least 2 entries.
    #[error("Voucher must have at least 2 entries")]
    InsufficientEntries,

    /// Voucher is not balanced (debits != credits).
    #[error("Voucher is not balanced. Debit: {debit}, Credit: {credit}")]
    Unbalanced {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },

    /// Voucher has only one side (all debits or all credits).
    #[error("Voucher must have both debit and credit entries")]
    SingleSided,

    /// Line amount is negative, or both sides are zero.
    #[error("Line {line}: amounts must be non-negative and exactly one side non-zero")]
    InvalidAmount {
        /// 1-based line number.
        line: u32,
    },

    /// Line sets both a debit and a credit amount.
    #[error("Line {line}: exactly one of debit/credit may be non-zero")]
    BothSidesSet {
        /// 1-based line number.
        line: u32,
    },

    /// Line amount carries more precision than the ledger's minor unit.
    #[error("Line {line}: amount exceeds the ledger's minor-unit scale of {scale}")]
    ExcessPrecision {
        /// 1-based line number.
        line: u32,
        /// Configured minor-unit scale.
        scale: u32,
    },

    /// Account requires a third party and the line carries none.
    #[error("Line {line}: account {account} requires a third party")]
    MissingThirdParty {
        /// 1-based line number.
        line: u32,
        /// Account code.
        account: String,
    },

    /// Account requires a cost center and the line carries none.
    #[error("Line {line}: account {account} requires a cost center")]
    MissingCostCenter {
        /// 1-based line number.
        line: u32,
        /// Account code.
        account: String,
    },

    /// Account code does not fit the hierarchical prefix scheme.
    #[error("Invalid account code: {0}")]
    InvalidAccountCode(String),

    /// Account code already exists for the tenant.
    #[error("Account code already exists: {0}")]
    DuplicateCode(String),

    // ========== State Errors ==========
    /// Fiscal period is closed, no posting allowed.
    #[error("Fiscal period {period} is closed, no posting allowed")]
    PeriodClosed {
        /// The closed period.
        period: PeriodKey,
    },

    /// Fiscal period is already closed.
    #[error("Fiscal period {period} is already closed")]
    AlreadyClosed {
        /// The period.
        period: PeriodKey,
    },

    /// Draft vouchers remain dated inside the period being closed.
    #[error("Cannot close period {period}: {count} draft voucher(s) remain dated inside it")]
    DraftVouchersPending {
        /// The period.
        period: PeriodKey,
        /// Number of pending drafts.
        count: usize,
    },

    /// Only posted vouchers can be voided.
    #[error("Voucher {0} is not posted")]
    NotPosted(VoucherId),

    /// Voucher has already been voided.
    #[error("Voucher {0} is already voided")]
    AlreadyVoided(VoucherId),

    /// Operation requires a draft voucher.
    #[error("Voucher {0} is not a draft")]
    NotDraft(VoucherId),

    /// System accounts cannot be edited or deactivated.
    #[error("Account {0} is a system account and cannot be modified")]
    SystemAccountImmutable(String),

    /// Account is referenced by posted entries and cannot be deleted.
    #[error("Account {0} is referenced by ledger entries and cannot be deleted")]
    AccountInUse(String),

    /// Account is inactive and cannot be posted to.
    #[error("Account {0} is inactive")]
    AccountInactive(String),

    /// Note state machine rejects the transition.
    #[error("Invalid note transition from {from:?} to {to:?}")]
    InvalidNoteTransition {
        /// Current status.
        from: NoteStatus,
        /// Target status.
        to: NoteStatus,
    },

    /// Notes may only reference posted sales invoices.
    #[error("Voucher {0} is not a posted sales invoice")]
    NoteSourceNotInvoice(VoucherId),

    // ========== Reference Errors ==========
    /// Account not found.
    #[error("Account not found: {0}")]
    UnknownAccount(String),

    /// Parent account not found for the code being created.
    #[error("Parent account not found: {0}")]
    UnknownParentAccount(String),

    /// Voucher not found.
    #[error("Voucher not found: {0}")]
    VoucherNotFound(VoucherId),

    /// Note document not found.
    #[error("Note not found: {0}")]
    NoteNotFound(NoteId),

    // ========== Contention Errors ==========
    /// Lock acquisition timed out under contention.
    #[error("Ledger is busy, please retry")]
    Busy,

    // ========== Internal Errors ==========
    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LedgerError {
    /// Returns the taxonomy kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InsufficientEntries
            | Self::Unbalanced { .. }
            | Self::SingleSided
            | Self::InvalidAmount { .. }
            | Self::BothSidesSet { .. }
            | Self::ExcessPrecision { .. }
            | Self::MissingThirdParty { .. }
            | Self::MissingCostCenter { .. }
            | Self::InvalidAccountCode(_)
            | Self::DuplicateCode(_) => ErrorKind::Validation,

            Self::PeriodClosed { .. }
            | Self::AlreadyClosed { .. }
            | Self::DraftVouchersPending { .. }
            | Self::NotPosted(_)
            | Self::AlreadyVoided(_)
            | Self::NotDraft(_)
            | Self::SystemAccountImmutable(_)
            | Self::AccountInUse(_)
            | Self::AccountInactive(_)
            | Self::InvalidNoteTransition { .. }
            | Self::NoteSourceNotInvoice(_) => ErrorKind::State,

            Self::UnknownAccount(_)
            | Self::UnknownParentAccount(_)
            | Self::VoucherNotFound(_)
            | Self::NoteNotFound(_) => ErrorKind::Reference,

            Self::Busy => ErrorKind::Contention,

            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientEntries => "INSUFFICIENT_ENTRIES",
            Self::Unbalanced { .. } => "UNBALANCED_VOUCHER",
            Self::SingleSided => "SINGLE_SIDED",
            Self::InvalidAmount { .. } => "INVALID_AMOUNT",
            Self::BothSidesSet { .. } => "BOTH_SIDES_SET",
            Self::ExcessPrecision { .. } => "EXCESS_PRECISION",
            Self::MissingThirdParty { .. } => "MISSING_THIRD_PARTY",
            Self::MissingCostCenter { .. } => "MISSING_COST_CENTER",
            Self::InvalidAccountCode(_) => "INVALID_ACCOUNT_CODE",
            Self::DuplicateCode(_) => "DUPLICATE_CODE",
            Self::PeriodClosed { .. } => "PERIOD_CLOSED",
            Self::AlreadyClosed { .. } => "PERIOD_ALREADY_CLOSED",
            Self::DraftVouchersPending { .. } => "DRAFT_VOUCHERS_PENDING",
            Self::NotPosted(_) => "VOUCHER_NOT_POSTED",
            Self::AlreadyVoided(_) => "VOUCHER_ALREADY_VOIDED",
            Self::NotDraft(_) => "VOUCHER_NOT_DRAFT",
            Self::SystemAccountImmutable(_) => "SYSTEM_ACCOUNT_IMMUTABLE",
            Self::AccountInUse(_) => "ACCOUNT_IN_USE",
            Self::AccountInactive(_) => "ACCOUNT_INACTIVE",
            Self::InvalidNoteTransition { .. } => "INVALID_NOTE_TRANSITION",
            Self::NoteSourceNotInvoice(_) => "NOTE_SOURCE_NOT_INVOICE",
            Self::UnknownAccount(_) => "UNKNOWN_ACCOUNT",
            Self::UnknownParentAccount(_) => "UNKNOWN_PARENT_ACCOUNT",
            Self::VoucherNotFound(_) => "VOUCHER_NOT_FOUND",
            Self::NoteNotFound(_) => "NOTE_NOT_FOUND",
            Self::Busy => "BUSY",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::Validation => 400,
            ErrorKind::State => 422,
            ErrorKind::Reference => 404,
            ErrorKind::Contention => 409,
            ErrorKind::Internal => 500,
        }
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Contention)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_kinds() {
        assert_eq!(
            LedgerError::Unbalanced {
                debit: dec!(100),
                credit: dec!(50)
            }
            .kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            LedgerError::PeriodClosed {
                period: PeriodKey { year: 2025, month: 1 }
            }
            .kind(),
            ErrorKind::State
        );
        assert_eq!(
            LedgerError::UnknownAccount("9999".into()).kind(),
            ErrorKind::Reference
        );
        assert_eq!(LedgerError::Busy.kind(), ErrorKind::Contention);
        assert_eq!(
            LedgerError::Internal("oops".into()).kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(LedgerError::InsufficientEntries.http_status_code(), 400);
        assert_eq!(
            LedgerError::NotPosted(VoucherId::new()).http_status_code(),
            422
        );
        assert_eq!(
            LedgerError::VoucherNotFound(VoucherId::new()).http_status_code(),
            404
        );
        assert_eq!(LedgerError::Busy.http_status_code(), 409);
        assert_eq!(LedgerError::Internal(String::new()).http_status_code(), 500);
    }

    #[test]
    fn test_retryable() {
        assert!(LedgerError::Busy.is_retryable());
        assert!(!LedgerError::InsufficientEntries.is_retryable());
        assert!(!LedgerError::Internal(String::new()).is_retryable());
    }

    #[test]
    fn test_display() {
        let err = LedgerError::Unbalanced {
            debit: dec!(100.00),
            credit: dec!(50.00),
        };
        assert_eq!(
            err.to_string(),
            "Voucher is not balanced. Debit: 100.00, Credit: 50.00"
        );

        let err = LedgerError::DraftVouchersPending {
            period: PeriodKey { year: 2025, month: 1 },
            count: 3,
        };
        assert_eq!(
            err.to_string(),
            "Cannot close period 2025-01: 3 draft voucher(s) remain dated inside it"
        );
    }
}
