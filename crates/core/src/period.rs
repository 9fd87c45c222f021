//! Fiscal period types.
//!
//! A fiscal period is a year+month bucket. Periods are created lazily as
//! Open on the first posting into that month; closing is terminal, there is
//! no reopen operation.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use folio_shared::types::TenantId;

/// Key identifying a fiscal period within a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PeriodKey {
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
}

impl PeriodKey {
    /// Builds the period key containing a calendar date.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl std::fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Status of a fiscal period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodStatus {
    /// Period is open for posting.
    Open,
    /// Period is closed; no posting allowed, ever again.
    Closed,
}

impl PeriodStatus {
    /// Returns true if vouchers may be posted into the period.
    #[must_use]
    pub fn allows_posting(&self) -> bool {
        matches!(self, Self::Open)
    }
}

/// A fiscal period record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiscalPeriod {
    /// Tenant this period belongs to.
    pub tenant_id: TenantId,
    /// Year and month.
    pub key: PeriodKey,
    /// Current status.
    pub status: PeriodStatus,
}

impl FiscalPeriod {
    /// Returns true if the given date falls within this period.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        PeriodKey::from_date(date) == self.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_key_from_date() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let key = PeriodKey::from_date(date);
        assert_eq!(key, PeriodKey { year: 2025, month: 1 });
    }

    #[test]
    fn test_period_key_display() {
        assert_eq!(PeriodKey { year: 2025, month: 3 }.to_string(), "2025-03");
        assert_eq!(PeriodKey { year: 2025, month: 12 }.to_string(), "2025-12");
    }

    #[test]
    fn test_allows_posting() {
        assert!(PeriodStatus::Open.allows_posting());
        assert!(!PeriodStatus::Closed.allows_posting());
    }

    #[test]
    fn test_contains_date() {
        let period = FiscalPeriod {
            tenant_id: TenantId::new(),
            key: PeriodKey { year: 2025, month: 1 },
            status: PeriodStatus::Open,
        };
        assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()));
        assert!(!period.contains_date(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()));
    }
}
