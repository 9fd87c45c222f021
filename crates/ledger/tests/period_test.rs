//! Fiscal period closing integration tests.

mod common;

use rust_decimal_macros::dec;

use common::{date, journal_request, seed_chart, test_ledger};
use folio_core::{LedgerError, PeriodStatus};
use folio_shared::TenantId;

#[tokio::test]
async fn test_close_then_post_rejected() {
    let ledger = test_ledger();
    let tenant = TenantId::new();
    seed_chart(&ledger, tenant);

    let closed = ledger.close_period(tenant, 2025, 1).await.unwrap();
    assert_eq!(closed.status, PeriodStatus::Closed);

    let err = ledger
        .post_voucher(journal_request(
            tenant,
            date(2025, 1, 20),
            "1105",
            "4135",
            dec!(100),
        ))
        .await
        .unwrap_err();
    assert!(
        matches!(&err, LedgerError::PeriodClosed { period } if period.to_string() == "2025-01")
    );
    assert_eq!(err.http_status_code(), 422);

    // The next month still accepts postings.
    ledger
        .post_voucher(journal_request(
            tenant,
            date(2025, 2, 1),
            "1105",
            "4135",
            dec!(100),
        ))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_close_is_irreversible() {
    let ledger = test_ledger();
    let tenant = TenantId::new();
    seed_chart(&ledger, tenant);

    ledger.close_period(tenant, 2025, 3).await.unwrap();
    let err = ledger.close_period(tenant, 2025, 3).await.unwrap_err();
    assert!(matches!(err, LedgerError::AlreadyClosed { .. }));
}

#[tokio::test]
async fn test_close_blocked_by_pending_drafts() {
    let ledger = test_ledger();
    let tenant = TenantId::new();
    seed_chart(&ledger, tenant);

    let draft = ledger
        .create_draft(journal_request(
            tenant,
            date(2025, 4, 10),
            "1105",
            "4135",
            dec!(50),
        ))
        .unwrap();

    let err = ledger.close_period(tenant, 2025, 4).await.unwrap_err();
    assert!(matches!(
        err,
        LedgerError::DraftVouchersPending { count: 1, .. }
    ));

    // Resolving the draft unblocks the close.
    ledger.post_draft(tenant, draft.id).await.unwrap();
    ledger.close_period(tenant, 2025, 4).await.unwrap();
}

#[tokio::test]
async fn test_void_in_closed_period_rejected() {
    let ledger = test_ledger();
    let tenant = TenantId::new();
    seed_chart(&ledger, tenant);

    let voucher = ledger
        .post_voucher(journal_request(
            tenant,
            date(2025, 5, 10),
            "1105",
            "4135",
            dec!(100),
        ))
        .await
        .unwrap();
    ledger.close_period(tenant, 2025, 5).await.unwrap();

    let err = ledger.void_voucher(tenant, voucher.id).await.unwrap_err();
    assert!(matches!(err, LedgerError::PeriodClosed { .. }));
}

#[tokio::test]
async fn test_closing_is_per_tenant() {
    let ledger = test_ledger();
    let first = TenantId::new();
    let second = TenantId::new();
    seed_chart(&ledger, first);
    seed_chart(&ledger, second);

    ledger.close_period(first, 2025, 6).await.unwrap();
    assert!(!ledger.is_period_open(first, date(2025, 6, 15)));
    assert!(ledger.is_period_open(second, date(2025, 6, 15)));

    let periods = ledger.list_periods(first);
    assert_eq!(periods.len(), 1);
    assert_eq!(periods[0].status, PeriodStatus::Closed);
}
