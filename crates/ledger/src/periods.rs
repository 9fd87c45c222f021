//! Fiscal period state and per-period serialization.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio::time::timeout;
use tracing::info;

use folio_core::{FiscalPeriod, LedgerError, PeriodKey, PeriodStatus};
use folio_shared::TenantId;

/// Fiscal period store plus the per-(tenant, period) mutexes that make
/// posting and closing mutually exclusive.
///
/// A period missing from the store has never seen a posting and counts as
/// open; the record is created lazily on first use.
#[derive(Debug)]
pub struct FiscalPeriodManager {
    periods: DashMap<(TenantId, PeriodKey), PeriodStatus>,
    locks: DashMap<(TenantId, PeriodKey), Arc<Mutex<()>>>,
    lock_timeout: Duration,
}

impl FiscalPeriodManager {
    /// Creates an empty manager with the given lock timeout.
    #[must_use]
    pub fn new(lock_timeout: Duration) -> Self {
        Self {
            periods: DashMap::new(),
            locks: DashMap::new(),
            lock_timeout,
        }
    }

    /// Acquires the period lock, held by posting while it assigns a
    /// period and by closing for its whole critical section.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Busy`] when the lock is not acquired within the
    /// configured timeout.
    pub async fn lock(
        &self,
        tenant_id: TenantId,
        key: PeriodKey,
    ) -> Result<OwnedMutexGuard<()>, LedgerError> {
        let mutex = self
            .locks
            .entry((tenant_id, key))
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        timeout(self.lock_timeout, mutex.lock_owned())
            .await
            .map_err(|_| LedgerError::Busy)
    }

    /// Creates the period record lazily as open and returns it.
    pub fn ensure_open(&self, tenant_id: TenantId, date: NaiveDate) -> FiscalPeriod {
        let key = PeriodKey::from_date(date);
        let status = *self
            .periods
            .entry((tenant_id, key))
            .or_insert(PeriodStatus::Open);
        FiscalPeriod {
            tenant_id,
            key,
            status,
        }
    }

    /// Current status of a period; never-touched periods are open.
    #[must_use]
    pub fn status(&self, tenant_id: TenantId, key: PeriodKey) -> PeriodStatus {
        self.periods
            .get(&(tenant_id, key))
            .map_or(PeriodStatus::Open, |entry| *entry.value())
    }

    /// Whether a voucher dated `date` may still be posted.
    #[must_use]
    pub fn is_open(&self, tenant_id: TenantId, date: NaiveDate) -> bool {
        self.status(tenant_id, PeriodKey::from_date(date))
            .allows_posting()
    }

    /// Marks a period closed. Callers hold the period lock and have
    /// verified there are no pending drafts; closing is irreversible.
    ///
    /// # Errors
    ///
    /// [`LedgerError::AlreadyClosed`] when the period is already closed.
    pub fn mark_closed(&self, tenant_id: TenantId, key: PeriodKey) -> Result<(), LedgerError> {
        let mut entry = self
            .periods
            .entry((tenant_id, key))
            .or_insert(PeriodStatus::Open);
        if *entry == PeriodStatus::Closed {
            return Err(LedgerError::AlreadyClosed {
                period: key,
            });
        }
        *entry = PeriodStatus::Closed;
        info!(tenant_id = %tenant_id, period = %key, "fiscal period closed");
        Ok(())
    }

    /// Lists a tenant's period records ordered by year and month.
    #[must_use]
    pub fn list(&self, tenant_id: TenantId) -> Vec<FiscalPeriod> {
        let mut periods: Vec<FiscalPeriod> = self
            .periods
            .iter()
            .filter(|entry| entry.key().0 == tenant_id)
            .map(|entry| FiscalPeriod {
                tenant_id,
                key: entry.key().1,
                status: *entry.value(),
            })
            .collect();
        periods.sort_by_key(|p| (p.key.year, p.key.month));
        periods
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[tokio::test]
    async fn test_untouched_period_is_open() {
        let manager = FiscalPeriodManager::new(Duration::from_millis(100));
        let tenant = TenantId::new();
        assert!(manager.is_open(tenant, date(2026, 1, 15)));
    }

    #[tokio::test]
    async fn test_close_is_terminal() {
        let manager = FiscalPeriodManager::new(Duration::from_millis(100));
        let tenant = TenantId::new();
        let key = PeriodKey::from_date(date(2026, 1, 15));
        manager.mark_closed(tenant, key).unwrap();
        assert!(!manager.is_open(tenant, date(2026, 1, 20)));
        let err = manager.mark_closed(tenant, key).unwrap_err();
        assert!(matches!(err, LedgerError::AlreadyClosed { .. }));
        // The neighboring month is unaffected.
        assert!(manager.is_open(tenant, date(2026, 2, 1)));
    }

    #[tokio::test]
    async fn test_lock_contention_reports_busy() {
        let manager = FiscalPeriodManager::new(Duration::from_millis(50));
        let tenant = TenantId::new();
        let key = PeriodKey::from_date(date(2026, 3, 1));
        let _held = manager.lock(tenant, key).await.unwrap();
        let err = manager.lock(tenant, key).await.unwrap_err();
        assert!(matches!(err, LedgerError::Busy));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_locks_are_per_period() {
        let manager = FiscalPeriodManager::new(Duration::from_millis(50));
        let tenant = TenantId::new();
        let _january = manager
            .lock(tenant, PeriodKey::from_date(date(2026, 1, 1)))
            .await
            .unwrap();
        // A different month locks independently.
        let _february = manager
            .lock(tenant, PeriodKey::from_date(date(2026, 2, 1)))
            .await
            .unwrap();
    }
}
