//! Balanced-voucher validation.
//!
//! Pure validation with no storage dependencies: account facts are injected
//! as a lookup closure so the same rules run against the live registry and
//! against test fixtures.

use rust_decimal::Decimal;

use folio_shared::types::amount::exceeds_scale;

use crate::error::LedgerError;
use crate::request::CreateVoucherRequest;

/// Account facts needed to validate one line.
#[derive(Debug, Clone)]
pub struct AccountRules {
    /// Account code.
    pub code: String,
    /// Whether the account accepts postings.
    pub is_active: bool,
    /// Whether entries must carry a third party.
    pub requires_third_party: bool,
    /// Whether entries must carry a cost center.
    pub requires_cost_center: bool,
}

/// Totals of a validated voucher request.
#[derive(Debug, Clone, Copy)]
pub struct VoucherTotals {
    /// Total debit amount.
    pub debit: Decimal,
    /// Total credit amount.
    pub credit: Decimal,
}

/// Validates a voucher request against the accounting invariants.
///
/// Checks, in order, failing fast per line:
/// 1. at least 2 lines;
/// 2. per line: non-negative amounts, exactly one side non-zero, precision
///    within the ledger's minor-unit scale;
/// 3. per line: account exists and is active (via `account_lookup`),
///    third-party/cost-center requirements satisfied;
/// 4. both sides present, and total debit equals total credit at full
///    precision - no rounding tolerance.
///
/// # Errors
///
/// Returns the first [`LedgerError`] encountered; nothing is persisted by
/// this function, so any error leaves no partial state.
pub fn validate_request<A>(
    request: &CreateVoucherRequest,
    minor_unit_scale: u32,
    account_lookup: A,
) -> Result<VoucherTotals, LedgerError>
where
    A: Fn(&str) -> Result<AccountRules, LedgerError>,
{
    if request.lines.len() < 2 {
        return Err(LedgerError::InsufficientEntries);
    }

    let mut total_debit = Decimal::ZERO;
    let mut total_credit = Decimal::ZERO;
    let mut has_debit = false;
    let mut has_credit = false;

    for (idx, line) in request.lines.iter().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let line_no = idx as u32 + 1;

        if line.debit < Decimal::ZERO || line.credit < Decimal::ZERO {
            return Err(LedgerError::InvalidAmount { line: line_no });
        }
        if !line.debit.is_zero() && !line.credit.is_zero() {
            return Err(LedgerError::BothSidesSet { line: line_no });
        }
        if line.debit.is_zero() && line.credit.is_zero() {
            return Err(LedgerError::InvalidAmount { line: line_no });
        }
        let amount = line.debit + line.credit;
        if exceeds_scale(amount, minor_unit_scale) {
            return Err(LedgerError::ExcessPrecision {
                line: line_no,
                scale: minor_unit_scale,
            });
        }

        let rules = account_lookup(&line.account_code)?;
        if !rules.is_active {
            return Err(LedgerError::AccountInactive(rules.code));
        }
        if rules.requires_third_party && line.third_party.is_none() {
            return Err(LedgerError::MissingThirdParty {
                line: line_no,
                account: rules.code,
            });
        }
        if rules.requires_cost_center && line.cost_center.is_none() {
            return Err(LedgerError::MissingCostCenter {
                line: line_no,
                account: rules.code,
            });
        }

        if line.debit.is_zero() {
            total_credit += line.credit;
            has_credit = true;
        } else {
            total_debit += line.debit;
            has_debit = true;
        }
    }

    if !has_debit || !has_credit {
        return Err(LedgerError::SingleSided);
    }

    if total_debit != total_credit {
        return Err(LedgerError::Unbalanced {
            debit: total_debit,
            credit: total_credit,
        });
    }

    Ok(VoucherTotals {
        debit: total_debit,
        credit: total_credit,
    })
}
