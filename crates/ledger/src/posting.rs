//! Voucher posting: validation, period check, numbering, commit.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::info;

use folio_core::validation::validate_request;
use folio_core::{
    CreateVoucherRequest, Entry, LedgerError, PeriodKey, Voucher, VoucherStatus, VoucherType,
};
use folio_shared::types::rescale;
use folio_shared::{EntryId, TenantId, VoucherId};

use crate::periods::FiscalPeriodManager;
use crate::registry::ChartOfAccountRegistry;
use crate::store::LedgerEntryStore;

/// Posting engine.
///
/// Posting is the only hot mutation path. Each (tenant, type) pair owns a
/// sequence counter behind its own mutex, so concurrent posts for the same
/// pair serialize on the counter while everything else proceeds in
/// parallel. The per-(tenant, period) lock shared with closing is held
/// across number assignment and commit, which keeps the sequence gap-free:
/// a number is taken and its voucher stored before the next post observes
/// the counter.
pub struct VoucherPostingEngine {
    registry: Arc<ChartOfAccountRegistry>,
    periods: Arc<FiscalPeriodManager>,
    store: Arc<LedgerEntryStore>,
    counters: DashMap<(TenantId, VoucherType), Arc<Mutex<i64>>>,
    lock_timeout: Duration,
    minor_unit_scale: u32,
}

impl VoucherPostingEngine {
    /// Creates an engine committing into `store` at the given amount scale.
    #[must_use]
    pub fn new(
        registry: Arc<ChartOfAccountRegistry>,
        periods: Arc<FiscalPeriodManager>,
        store: Arc<LedgerEntryStore>,
        lock_timeout: Duration,
        minor_unit_scale: u32,
    ) -> Self {
        Self {
            registry,
            periods,
            store,
            counters: DashMap::new(),
            lock_timeout,
            minor_unit_scale,
        }
    }

    /// Validates and posts a voucher in one atomic step.
    ///
    /// Nothing is stored until every check has passed, so any error leaves
    /// the ledger untouched.
    ///
    /// # Errors
    ///
    /// Validation errors from [`validate_request`],
    /// [`LedgerError::PeriodClosed`] for a closed target period, and
    /// [`LedgerError::Busy`] on lock contention.
    pub async fn post(&self, request: CreateVoucherRequest) -> Result<Voucher, LedgerError> {
        validate_request(&request, self.minor_unit_scale, |code| {
            self.registry.rules(request.tenant_id, code)
        })?;

        let tenant_id = request.tenant_id;
        let period = PeriodKey::from_date(request.date);
        let _period_guard = self.periods.lock(tenant_id, period).await?;
        if !self.periods.is_open(tenant_id, request.date) {
            return Err(LedgerError::PeriodClosed {
                period,
            });
        }
        self.periods.ensure_open(tenant_id, request.date);

        let counter = self.counter(tenant_id, request.voucher_type);
        let mut counter = timeout(self.lock_timeout, counter.lock_owned())
            .await
            .map_err(|_| LedgerError::Busy)?;
        let number = *counter + 1;

        let voucher = build_voucher(request, period, Some(number), self.minor_unit_scale);
        let id = voucher.id;
        let voucher_number = voucher.display_number();
        self.store.insert(voucher.clone());
        *counter = number;

        info!(
            tenant_id = %tenant_id,
            voucher_id = %id,
            number = voucher_number.as_deref().unwrap_or(""),
            "voucher posted"
        );
        Ok(voucher)
    }

    /// Stores a voucher as an unnumbered draft.
    ///
    /// Drafts pass the same structural and account validation as posted
    /// vouchers but skip the period check and take no sequence number;
    /// both happen when the draft is posted.
    ///
    /// # Errors
    ///
    /// Validation errors from [`validate_request`].
    pub fn create_draft(&self, request: CreateVoucherRequest) -> Result<Voucher, LedgerError> {
        validate_request(&request, self.minor_unit_scale, |code| {
            self.registry.rules(request.tenant_id, code)
        })?;
        let period = PeriodKey::from_date(request.date);
        let voucher = build_voucher(request, period, None, self.minor_unit_scale);
        self.store.insert(voucher.clone());
        Ok(voucher)
    }

    /// Posts an existing draft: re-validates against the current chart,
    /// checks the period and assigns the next number.
    ///
    /// # Errors
    ///
    /// [`LedgerError::NotDraft`] when the voucher is already posted or
    /// void, plus every error [`Self::post`] can return.
    pub async fn post_draft(
        &self,
        tenant_id: TenantId,
        id: VoucherId,
    ) -> Result<Voucher, LedgerError> {
        let draft = self.store.get(tenant_id, id)?;
        if draft.status != VoucherStatus::Draft {
            return Err(LedgerError::NotDraft(id));
        }
        // Accounts may have been deactivated since the draft was created.
        validate_request(&draft_request(&draft), self.minor_unit_scale, |code| {
            self.registry.rules(tenant_id, code)
        })?;

        let period = PeriodKey::from_date(draft.date);
        let _period_guard = self.periods.lock(tenant_id, period).await?;
        if !self.periods.is_open(tenant_id, draft.date) {
            return Err(LedgerError::PeriodClosed {
                period,
            });
        }
        self.periods.ensure_open(tenant_id, draft.date);

        let counter = self.counter(tenant_id, draft.voucher_type);
        let mut counter = timeout(self.lock_timeout, counter.lock_owned())
            .await
            .map_err(|_| LedgerError::Busy)?;
        let number = *counter + 1;

        let posted = self.store.modify(tenant_id, id, |voucher| {
            if voucher.status != VoucherStatus::Draft {
                return Err(LedgerError::NotDraft(voucher.id));
            }
            voucher.number = Some(number);
            voucher.status = VoucherStatus::Posted;
            voucher.posted_at = Some(Utc::now());
            Ok(())
        })?;
        *counter = number;

        info!(tenant_id = %tenant_id, voucher_id = %id, number, "draft posted");
        Ok(posted)
    }

    /// Voids a posted voucher.
    ///
    /// The voucher stays in the journal flagged as voided and drops out of
    /// every balance computation. Takes the period lock so a void cannot
    /// race the period's closing.
    ///
    /// # Errors
    ///
    /// [`LedgerError::NotPosted`] for drafts,
    /// [`LedgerError::AlreadyVoided`] for double voids and
    /// [`LedgerError::PeriodClosed`] when the voucher's period has closed.
    pub async fn void(&self, tenant_id: TenantId, id: VoucherId) -> Result<Voucher, LedgerError> {
        let voucher = self.store.get(tenant_id, id)?;
        let period = PeriodKey::from_date(voucher.date);
        let _period_guard = self.periods.lock(tenant_id, period).await?;
        if !self.periods.is_open(tenant_id, voucher.date) {
            return Err(LedgerError::PeriodClosed {
                period,
            });
        }

        let voided = self.store.modify(tenant_id, id, |voucher| {
            match voucher.status {
                VoucherStatus::Posted => {}
                VoucherStatus::Void => return Err(LedgerError::AlreadyVoided(voucher.id)),
                VoucherStatus::Draft => return Err(LedgerError::NotPosted(voucher.id)),
            }
            voucher.status = VoucherStatus::Void;
            voucher.voided_at = Some(Utc::now());
            Ok(())
        })?;

        info!(tenant_id = %tenant_id, voucher_id = %id, "voucher voided");
        Ok(voided)
    }

    fn counter(&self, tenant_id: TenantId, voucher_type: VoucherType) -> Arc<Mutex<i64>> {
        self.counters
            .entry((tenant_id, voucher_type))
            .or_insert_with(|| Arc::new(Mutex::new(0)))
            .clone()
    }
}

fn build_voucher(
    request: CreateVoucherRequest,
    period: PeriodKey,
    number: Option<i64>,
    scale: u32,
) -> Voucher {
    let id = VoucherId::new();
    let posted = number.is_some();
    let entries: Vec<Entry> = request
        .lines
        .into_iter()
        .enumerate()
        .map(|(idx, line)| Entry {
            id: EntryId::new(),
            voucher_id: id,
            #[allow(clippy::cast_possible_truncation)]
            line_no: idx as u32 + 1,
            account_code: line.account_code,
            third_party: line.third_party,
            cost_center: line.cost_center,
            description: line.description,
            // Validation already capped the precision; this only pads
            // trailing zeros so stored amounts share one scale.
            debit: rescale(line.debit, scale),
            credit: rescale(line.credit, scale),
            tax_base: line.tax_base,
            tax_value: line.tax_value,
        })
        .collect();
    Voucher {
        id,
        tenant_id: request.tenant_id,
        voucher_type: request.voucher_type,
        date: request.date,
        number,
        description: request.description.unwrap_or_default(),
        reference: request.reference,
        status: if posted {
            VoucherStatus::Posted
        } else {
            VoucherStatus::Draft
        },
        fiscal_year: period.year,
        fiscal_month: period.month,
        entries,
        created_at: Utc::now(),
        posted_at: posted.then(Utc::now),
        voided_at: None,
    }
}

fn draft_request(voucher: &Voucher) -> CreateVoucherRequest {
    CreateVoucherRequest {
        tenant_id: voucher.tenant_id,
        voucher_type: voucher.voucher_type,
        date: voucher.date,
        description: Some(voucher.description.clone()),
        reference: voucher.reference.clone(),
        lines: voucher
            .entries
            .iter()
            .map(|entry| folio_core::VoucherLine {
                account_code: entry.account_code.clone(),
                debit: entry.debit,
                credit: entry.credit,
                third_party: entry.third_party,
                cost_center: entry.cost_center,
                description: entry.description.clone(),
                tax_base: entry.tax_base,
                tax_value: entry.tax_value,
            })
            .collect(),
    }
}
