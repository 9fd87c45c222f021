//! Committed voucher storage and the read contract reports rely on.

use chrono::NaiveDate;
use dashmap::DashMap;

use folio_core::{Entry, LedgerError, PeriodKey, Voucher, VoucherStatus, VoucherType};
use folio_shared::{TenantId, VoucherId};

/// Voucher header carried alongside each entry handed to reports.
#[derive(Debug, Clone)]
pub struct VoucherMeta {
    /// Voucher id.
    pub id: VoucherId,
    /// Voucher type.
    pub voucher_type: VoucherType,
    /// Voucher date.
    pub date: NaiveDate,
    /// Display number; absent for drafts.
    pub number: Option<String>,
    /// Whether the voucher has been voided.
    pub voided: bool,
}

impl VoucherMeta {
    fn of(voucher: &Voucher) -> Self {
        Self {
            id: voucher.id,
            voucher_type: voucher.voucher_type,
            date: voucher.date,
            number: voucher.display_number(),
            voided: voucher.status == VoucherStatus::Void,
        }
    }
}

/// Filter for listing vouchers.
#[derive(Debug, Clone, Copy, Default)]
pub struct VoucherFilter {
    /// Restrict to one voucher type.
    pub voucher_type: Option<VoucherType>,
    /// Restrict to one status.
    pub status: Option<VoucherStatus>,
    /// Earliest date, inclusive.
    pub from: Option<NaiveDate>,
    /// Latest date, inclusive.
    pub to: Option<NaiveDate>,
}

/// Append-mostly voucher store.
///
/// The posting engine is the only writer; every reader sees whole
/// vouchers, never a voucher with half its entries. Balance computations
/// only consume posted, non-void vouchers; the journal additionally sees
/// voided ones flagged for the audit trail.
#[derive(Debug, Default)]
pub struct LedgerEntryStore {
    vouchers: DashMap<VoucherId, Voucher>,
    by_tenant: DashMap<TenantId, Vec<VoucherId>>,
}

impl LedgerEntryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new voucher with all its entries.
    pub fn insert(&self, voucher: Voucher) {
        self.by_tenant
            .entry(voucher.tenant_id)
            .or_default()
            .push(voucher.id);
        self.vouchers.insert(voucher.id, voucher);
    }

    /// Applies a state change to one voucher under its shard lock.
    ///
    /// # Errors
    ///
    /// [`LedgerError::VoucherNotFound`] for unknown ids or a voucher
    /// belonging to another tenant; whatever `apply` returns otherwise.
    pub fn modify<F>(
        &self,
        tenant_id: TenantId,
        id: VoucherId,
        apply: F,
    ) -> Result<Voucher, LedgerError>
    where
        F: FnOnce(&mut Voucher) -> Result<(), LedgerError>,
    {
        let mut entry = self
            .vouchers
            .get_mut(&id)
            .ok_or(LedgerError::VoucherNotFound(id))?;
        if entry.tenant_id != tenant_id {
            return Err(LedgerError::VoucherNotFound(id));
        }
        apply(entry.value_mut())?;
        Ok(entry.clone())
    }

    /// Fetches one voucher.
    ///
    /// # Errors
    ///
    /// [`LedgerError::VoucherNotFound`] for unknown ids or foreign tenants.
    pub fn get(&self, tenant_id: TenantId, id: VoucherId) -> Result<Voucher, LedgerError> {
        self.vouchers
            .get(&id)
            .filter(|v| v.tenant_id == tenant_id)
            .map(|v| v.clone())
            .ok_or(LedgerError::VoucherNotFound(id))
    }

    /// Lists a tenant's vouchers, newest date first.
    #[must_use]
    pub fn list(&self, tenant_id: TenantId, filter: VoucherFilter) -> Vec<Voucher> {
        let mut vouchers: Vec<Voucher> = self
            .tenant_vouchers(tenant_id)
            .into_iter()
            .filter(|v| {
                filter.voucher_type.is_none_or(|t| v.voucher_type == t)
                    && filter.status.is_none_or(|s| v.status == s)
                    && filter.from.is_none_or(|from| v.date >= from)
                    && filter.to.is_none_or(|to| v.date <= to)
            })
            .collect();
        vouchers.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        vouchers
    }

    /// Entries of one account within a window, ordered by date, then
    /// voucher id, then line number. Posted non-void only.
    #[must_use]
    pub fn entries_for_account(
        &self,
        tenant_id: TenantId,
        code: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Vec<(VoucherMeta, Entry)> {
        self.account_entries(tenant_id, code, |date| date >= from && date <= to)
    }

    /// Entries of one account strictly before a date, for opening
    /// balances. Posted non-void only.
    #[must_use]
    pub fn entries_before(
        &self,
        tenant_id: TenantId,
        code: &str,
        date: NaiveDate,
    ) -> Vec<(VoucherMeta, Entry)> {
        self.account_entries(tenant_id, code, |d| d < date)
    }

    /// All entries of a tenant in a window, in journal order. Includes
    /// voided vouchers, flagged via [`VoucherMeta::voided`].
    #[must_use]
    pub fn entries_for_tenant(
        &self,
        tenant_id: TenantId,
        from: NaiveDate,
        to: NaiveDate,
        voucher_type: Option<VoucherType>,
    ) -> Vec<(VoucherMeta, Entry)> {
        let mut rows: Vec<(VoucherMeta, Entry)> = self
            .tenant_vouchers(tenant_id)
            .into_iter()
            .filter(|v| v.status != VoucherStatus::Draft)
            .filter(|v| v.date >= from && v.date <= to)
            .filter(|v| voucher_type.is_none_or(|t| v.voucher_type == t))
            .flat_map(|v| {
                let meta = VoucherMeta::of(&v);
                v.entries
                    .into_iter()
                    .map(move |entry| (meta.clone(), entry))
            })
            .collect();
        Self::sort_rows(&mut rows);
        rows
    }

    /// Number of draft vouchers dated inside a period. Closing calls this
    /// while holding the period lock.
    #[must_use]
    pub fn draft_count(&self, tenant_id: TenantId, period: PeriodKey) -> usize {
        self.tenant_vouchers(tenant_id)
            .iter()
            .filter(|v| v.status == VoucherStatus::Draft)
            .filter(|v| PeriodKey::from_date(v.date) == period)
            .count()
    }

    /// Whether any entry of any voucher references the account.
    #[must_use]
    pub fn account_referenced(&self, tenant_id: TenantId, code: &str) -> bool {
        self.tenant_vouchers(tenant_id)
            .iter()
            .any(|v| v.entries.iter().any(|e| e.account_code == code))
    }

    fn account_entries<P>(
        &self,
        tenant_id: TenantId,
        code: &str,
        in_range: P,
    ) -> Vec<(VoucherMeta, Entry)>
    where
        P: Fn(NaiveDate) -> bool,
    {
        let mut rows: Vec<(VoucherMeta, Entry)> = self
            .tenant_vouchers(tenant_id)
            .into_iter()
            .filter(|v| v.status.counts_in_balances())
            .filter(|v| in_range(v.date))
            .flat_map(|v| {
                let meta = VoucherMeta::of(&v);
                v.entries
                    .into_iter()
                    .filter(|entry| entry.account_code == code)
                    .map(move |entry| (meta.clone(), entry))
            })
            .collect();
        Self::sort_rows(&mut rows);
        rows
    }

    fn tenant_vouchers(&self, tenant_id: TenantId) -> Vec<Voucher> {
        let ids = self
            .by_tenant
            .get(&tenant_id)
            .map(|entry| entry.clone())
            .unwrap_or_default();
        ids.into_iter()
            .filter_map(|id| self.vouchers.get(&id).map(|v| v.clone()))
            .collect()
    }

    fn sort_rows(rows: &mut [(VoucherMeta, Entry)]) {
        rows.sort_by(|(am, ae), (bm, be)| {
            am.date
                .cmp(&bm.date)
                .then(am.id.cmp(&bm.id))
                .then(ae.line_no.cmp(&be.line_no))
        });
    }
}
