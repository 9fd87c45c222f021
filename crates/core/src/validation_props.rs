//! Property tests for voucher validation.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use folio_shared::types::TenantId;

use crate::error::LedgerError;
use crate::request::{CreateVoucherRequest, VoucherLine};
use crate::validation::{validate_request, AccountRules};
use crate::voucher::VoucherType;

fn permissive_lookup(code: &str) -> Result<AccountRules, LedgerError> {
    Ok(AccountRules {
        code: code.to_string(),
        is_active: true,
        requires_third_party: false,
        requires_cost_center: false,
    })
}

fn request(lines: Vec<VoucherLine>) -> CreateVoucherRequest {
    CreateVoucherRequest {
        tenant_id: TenantId::new(),
        voucher_type: VoucherType::JournalEntry,
        date: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
        description: None,
        reference: None,
        lines,
    }
}

/// Cent amounts up to 10^9 minor units, scaled to 2 decimals.
fn amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Balanced line sets: N debit amounts mirrored by the same amounts on
/// the credit side, in shuffled account order.
fn balanced_lines() -> impl Strategy<Value = Vec<VoucherLine>> {
    prop::collection::vec(amount(), 1..8).prop_map(|amounts| {
        let mut lines = Vec::with_capacity(amounts.len() * 2);
        for (i, amount) in amounts.iter().enumerate() {
            lines.push(VoucherLine::debit(format!("1105{i:02}"), *amount));
        }
        for (i, amount) in amounts.iter().enumerate() {
            lines.push(VoucherLine::credit(format!("4135{i:02}"), *amount));
        }
        lines
    })
}

proptest! {
    /// Every balanced request validates, and the returned totals are
    /// exactly equal.
    #[test]
    fn balanced_requests_validate(lines in balanced_lines()) {
        let totals = validate_request(&request(lines), 2, permissive_lookup).unwrap();
        prop_assert_eq!(totals.debit, totals.credit);
    }

    /// Perturbing any single line of a balanced set by a non-zero delta
    /// makes validation fail with an unbalance error.
    #[test]
    fn unbalanced_requests_are_rejected(
        lines in balanced_lines(),
        delta in 1i64..1_000_000,
        pick in any::<prop::sample::Index>(),
    ) {
        let mut lines = lines;
        let idx = pick.index(lines.len());
        let bump = Decimal::new(delta, 2);
        if lines[idx].debit.is_zero() {
            lines[idx].credit += bump;
        } else {
            lines[idx].debit += bump;
        }
        let err = validate_request(&request(lines), 2, permissive_lookup).unwrap_err();
        prop_assert!(matches!(err, LedgerError::Unbalanced { .. }), "got {err:?}");
    }

    /// A negative amount on any line fails before the balance check.
    #[test]
    fn negative_amounts_are_rejected(lines in balanced_lines(), pick in any::<prop::sample::Index>()) {
        let mut lines = lines;
        let idx = pick.index(lines.len());
        if lines[idx].debit.is_zero() {
            lines[idx].credit = -lines[idx].credit;
        } else {
            lines[idx].debit = -lines[idx].debit;
        }
        let err = validate_request(&request(lines), 2, permissive_lookup).unwrap_err();
        prop_assert!(matches!(err, LedgerError::InvalidAmount { .. }), "got {err:?}");
    }

    /// Amounts finer than the minor-unit scale are rejected regardless of
    /// whether the request balances.
    #[test]
    fn excess_precision_is_rejected(units in 1i64..1_000_000) {
        let amount = Decimal::new(units * 10 + 1, 3);
        let lines = vec![
            VoucherLine::debit("110505", amount),
            VoucherLine::credit("413505", amount),
        ];
        let err = validate_request(&request(lines), 2, permissive_lookup).unwrap_err();
        prop_assert!(matches!(err, LedgerError::ExcessPrecision { .. }), "got {err:?}");
    }

    /// Validation is a pure function of its inputs: repeated runs agree.
    #[test]
    fn validation_is_deterministic(lines in balanced_lines()) {
        let req = request(lines);
        let first = validate_request(&req, 2, permissive_lookup).unwrap();
        let second = validate_request(&req, 2, permissive_lookup).unwrap();
        prop_assert_eq!(first.debit, second.debit);
        prop_assert_eq!(first.credit, second.credit);
    }
}
