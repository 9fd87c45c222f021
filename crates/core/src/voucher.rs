//! Voucher and entry aggregates.
//!
//! A voucher is one accounting transaction document grouping two or more
//! balanced entries. Posted vouchers are immutable; the only way to undo a
//! posted voucher is an explicit compensating action (void or reversal).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use folio_shared::types::{CostCenterId, EntryId, TenantId, ThirdPartyId, VoucherId};

/// Voucher type classification.
///
/// The base types are posted directly by collaborators; the derived types
/// are produced by sales, payroll and supplier-document flows and by the
/// reversal engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoucherType {
    /// Cash/bank receipt.
    Receipt,
    /// Cash/bank payment.
    Payment,
    /// General journal entry.
    JournalEntry,
    /// Sales invoice posting.
    SalesInvoice,
    /// Credit note reversing a sales invoice.
    CreditNote,
    /// Debit note increasing a sales invoice charge.
    DebitNote,
    /// Support document for supplier purchases.
    SupportDocument,
}

impl VoucherType {
    /// All voucher types, for exhaustive iteration.
    pub const ALL: [Self; 7] = [
        Self::Receipt,
        Self::Payment,
        Self::JournalEntry,
        Self::SalesInvoice,
        Self::CreditNote,
        Self::DebitNote,
        Self::SupportDocument,
    ];

    /// Short prefix used when rendering voucher numbers (e.g. "RC-42").
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Receipt => "RC",
            Self::Payment => "CE",
            Self::JournalEntry => "CD",
            Self::SalesInvoice => "FV",
            Self::CreditNote => "NC",
            Self::DebitNote => "ND",
            Self::SupportDocument => "DS",
        }
    }
}

/// Voucher status.
///
/// Draft vouchers may be completed or abandoned; Posted and Void are
/// terminal apart from the explicit Posted -> Void compensation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoucherStatus {
    /// Voucher is being drafted and has no number yet.
    Draft,
    /// Voucher has been posted to the ledger (immutable).
    Posted,
    /// Voucher has been voided (immutable, excluded from balances).
    Void,
}

impl VoucherStatus {
    /// Returns true if the voucher can still be modified.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if entries of this voucher count toward balances.
    #[must_use]
    pub fn counts_in_balances(&self) -> bool {
        matches!(self, Self::Posted)
    }
}

/// One debit or credit line within a voucher.
///
/// Exactly one of `debit`/`credit` is non-zero, and amounts are
/// non-negative. Entries reference accounts and third parties by key only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    /// Unique identifier.
    pub id: EntryId,
    /// The voucher this entry belongs to.
    pub voucher_id: VoucherId,
    /// 1-based line number; defines report ordering within the voucher.
    pub line_no: u32,
    /// Account code this entry posts to.
    pub account_code: String,
    /// Third party, required when the account demands one.
    pub third_party: Option<ThirdPartyId>,
    /// Cost center, required when the account demands one.
    pub cost_center: Option<CostCenterId>,
    /// Line description.
    pub description: Option<String>,
    /// Debit amount (zero when `credit` is set).
    pub debit: Decimal,
    /// Credit amount (zero when `debit` is set).
    pub credit: Decimal,
    /// Optional tax base for reporting enrichment.
    pub tax_base: Option<Decimal>,
    /// Optional tax value for reporting enrichment.
    pub tax_value: Option<Decimal>,
}

impl Entry {
    /// Returns the signed amount (positive for debit, negative for credit).
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        self.debit - self.credit
    }
}

/// A financial voucher consisting of balanced ledger entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Voucher {
    /// Unique identifier.
    pub id: VoucherId,
    /// Tenant this voucher belongs to.
    pub tenant_id: TenantId,
    /// Voucher type.
    pub voucher_type: VoucherType,
    /// Voucher date (calendar date; period boundaries ignore time of day).
    pub date: NaiveDate,
    /// Sequential number, unique and gap-free per (tenant, type).
    /// Assigned at posting; drafts carry no number.
    pub number: Option<i64>,
    /// Voucher description.
    pub description: String,
    /// External reference (e.g. invoice number).
    pub reference: Option<String>,
    /// Current status.
    pub status: VoucherStatus,
    /// Fiscal year snapshot taken from `date`.
    pub fiscal_year: i32,
    /// Fiscal month snapshot taken from `date`.
    pub fiscal_month: u32,
    /// Ledger entries, ordered by line number.
    pub entries: Vec<Entry>,
    /// When the voucher was created.
    pub created_at: DateTime<Utc>,
    /// When the voucher was posted, if it has been.
    pub posted_at: Option<DateTime<Utc>>,
    /// When the voucher was voided, if it has been.
    pub voided_at: Option<DateTime<Utc>>,
}

impl Voucher {
    /// Total of the debit column.
    #[must_use]
    pub fn total_debit(&self) -> Decimal {
        self.entries.iter().map(|e| e.debit).sum()
    }

    /// Total of the credit column.
    #[must_use]
    pub fn total_credit(&self) -> Decimal {
        self.entries.iter().map(|e| e.credit).sum()
    }

    /// Rendered voucher number (e.g. "FV-17"), or `None` for drafts.
    #[must_use]
    pub fn display_number(&self) -> Option<String> {
        self.number
            .map(|n| format!("{}-{n}", self.voucher_type.prefix()))
    }
}
