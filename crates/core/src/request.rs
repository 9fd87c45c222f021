//! Inputs submitted by external collaborators.
//!
//! Sales, payroll and supplier-document modules submit voucher requests;
//! the posting engine validates them against the chart of accounts and the
//! fiscal period state before anything is persisted.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use folio_shared::types::{CostCenterId, TenantId, ThirdPartyId};

use crate::voucher::VoucherType;

/// One requested accounting line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoucherLine {
    /// Account code to post to.
    pub account_code: String,
    /// Debit amount (zero when crediting).
    #[serde(default)]
    pub debit: Decimal,
    /// Credit amount (zero when debiting).
    #[serde(default)]
    pub credit: Decimal,
    /// Third party, when the account requires one.
    pub third_party: Option<ThirdPartyId>,
    /// Cost center, when the account requires one.
    pub cost_center: Option<CostCenterId>,
    /// Line description.
    pub description: Option<String>,
    /// Optional tax base for reporting enrichment.
    pub tax_base: Option<Decimal>,
    /// Optional tax value for reporting enrichment.
    pub tax_value: Option<Decimal>,
}

impl VoucherLine {
    /// Builds a debit line.
    #[must_use]
    pub fn debit(account_code: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_code: account_code.into(),
            debit: amount,
            credit: Decimal::ZERO,
            third_party: None,
            cost_center: None,
            description: None,
            tax_base: None,
            tax_value: None,
        }
    }

    /// Builds a credit line.
    #[must_use]
    pub fn credit(account_code: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_code: account_code.into(),
            debit: Decimal::ZERO,
            credit: amount,
            third_party: None,
            cost_center: None,
            description: None,
            tax_base: None,
            tax_value: None,
        }
    }

    /// Attaches a third party.
    #[must_use]
    pub fn with_third_party(mut self, third_party: ThirdPartyId) -> Self {
        self.third_party = Some(third_party);
        self
    }

    /// Attaches a cost center.
    #[must_use]
    pub fn with_cost_center(mut self, cost_center: CostCenterId) -> Self {
        self.cost_center = Some(cost_center);
        self
    }
}

/// Request to create a voucher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVoucherRequest {
    /// Tenant the voucher belongs to.
    pub tenant_id: TenantId,
    /// Voucher type.
    pub voucher_type: VoucherType,
    /// Voucher date.
    pub date: NaiveDate,
    /// Description.
    pub description: Option<String>,
    /// External reference.
    pub reference: Option<String>,
    /// Requested lines (at least 2).
    pub lines: Vec<VoucherLine>,
}
