//! Concurrent ledger state for Folio.
//!
//! Holds the live multi-tenant arena of accounting records: the chart of
//! accounts, fiscal periods, committed vouchers with their entries, and
//! reversal notes. [`Ledger`] is the single entry point; it wires the
//! components together and is shared behind an [`Arc`] by every caller.

pub mod periods;
pub mod posting;
pub mod registry;
pub mod reports;
pub mod reversal;
pub mod store;

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;

use folio_core::reports::{
    BalanceSheetReport, GeneralLedgerReport, IncomeStatementReport, JournalReport,
    TrialBalanceReport,
};
use folio_core::{
    Account, CreateVoucherRequest, FiscalPeriod, LedgerError, Note, PeriodKey, PeriodStatus,
    Voucher, VoucherType,
};
use folio_shared::config::LedgerConfig;
use folio_shared::{NoteId, TenantId, VoucherId};

pub use periods::FiscalPeriodManager;
pub use posting::VoucherPostingEngine;
pub use registry::{AccountFilter, AccountUpdate, ChartOfAccountRegistry, NewAccount};
pub use reports::ReportGenerator;
pub use reversal::{CreateNoteRequest, ReversalEngine};
pub use store::{LedgerEntryStore, VoucherFilter, VoucherMeta};

/// The assembled accounting core.
pub struct Ledger {
    registry: Arc<ChartOfAccountRegistry>,
    periods: Arc<FiscalPeriodManager>,
    store: Arc<LedgerEntryStore>,
    posting: Arc<VoucherPostingEngine>,
    reversal: ReversalEngine,
    reports: ReportGenerator,
}

impl Ledger {
    /// Assembles a fresh, empty ledger from configuration.
    #[must_use]
    pub fn new(config: &LedgerConfig) -> Self {
        let lock_timeout = Duration::from_millis(config.lock_timeout_ms);
        let registry = Arc::new(ChartOfAccountRegistry::new());
        let periods = Arc::new(FiscalPeriodManager::new(lock_timeout));
        let store = Arc::new(LedgerEntryStore::new());
        let posting = Arc::new(VoucherPostingEngine::new(
            Arc::clone(&registry),
            Arc::clone(&periods),
            Arc::clone(&store),
            lock_timeout,
            config.minor_unit_scale,
        ));
        let reversal = ReversalEngine::new(Arc::clone(&store), Arc::clone(&posting));
        let reports = ReportGenerator::new(Arc::clone(&registry), Arc::clone(&store));
        Self {
            registry,
            periods,
            store,
            posting,
            reversal,
            reports,
        }
    }

    // --- Chart of accounts ---

    /// Creates one account.
    ///
    /// # Errors
    ///
    /// See [`ChartOfAccountRegistry::create`].
    pub fn create_account(
        &self,
        tenant_id: TenantId,
        new: NewAccount,
    ) -> Result<Account, LedgerError> {
        self.registry.create(tenant_id, new)
    }

    /// Imports a chart of accounts; returns the number created.
    ///
    /// # Errors
    ///
    /// See [`ChartOfAccountRegistry::import_chart`].
    pub fn import_chart(
        &self,
        tenant_id: TenantId,
        chart: Vec<NewAccount>,
    ) -> Result<usize, LedgerError> {
        self.registry.import_chart(tenant_id, chart)
    }

    /// Looks up one account by code.
    ///
    /// # Errors
    ///
    /// [`LedgerError::UnknownAccount`].
    pub fn get_account(&self, tenant_id: TenantId, code: &str) -> Result<Account, LedgerError> {
        self.registry.get(tenant_id, code)
    }

    /// Lists accounts ordered by code.
    #[must_use]
    pub fn list_accounts(&self, tenant_id: TenantId, filter: AccountFilter) -> Vec<Account> {
        self.registry.list(tenant_id, filter)
    }

    /// Updates an account's editable fields.
    ///
    /// # Errors
    ///
    /// See [`ChartOfAccountRegistry::update`].
    pub fn update_account(
        &self,
        tenant_id: TenantId,
        code: &str,
        update: AccountUpdate,
    ) -> Result<Account, LedgerError> {
        self.registry.update(tenant_id, code, update)
    }

    /// Deactivates an account.
    ///
    /// # Errors
    ///
    /// See [`ChartOfAccountRegistry::deactivate`].
    pub fn deactivate_account(
        &self,
        tenant_id: TenantId,
        code: &str,
    ) -> Result<Account, LedgerError> {
        self.registry.deactivate(tenant_id, code)
    }

    /// Deletes an account no entry has ever referenced.
    ///
    /// # Errors
    ///
    /// [`LedgerError::AccountInUse`] once any entry references the code;
    /// see [`ChartOfAccountRegistry::delete`] for the rest.
    pub fn delete_account(&self, tenant_id: TenantId, code: &str) -> Result<(), LedgerError> {
        let referenced = self.store.account_referenced(tenant_id, code);
        self.registry.delete(tenant_id, code, referenced)
    }

    // --- Vouchers ---

    /// Validates and posts a voucher.
    ///
    /// # Errors
    ///
    /// See [`VoucherPostingEngine::post`].
    pub async fn post_voucher(&self, request: CreateVoucherRequest) -> Result<Voucher, LedgerError> {
        self.posting.post(request).await
    }

    /// Stores a voucher as an unnumbered draft.
    ///
    /// # Errors
    ///
    /// See [`VoucherPostingEngine::create_draft`].
    pub fn create_draft(&self, request: CreateVoucherRequest) -> Result<Voucher, LedgerError> {
        self.posting.create_draft(request)
    }

    /// Posts an existing draft.
    ///
    /// # Errors
    ///
    /// See [`VoucherPostingEngine::post_draft`].
    pub async fn post_draft(
        &self,
        tenant_id: TenantId,
        id: VoucherId,
    ) -> Result<Voucher, LedgerError> {
        self.posting.post_draft(tenant_id, id).await
    }

    /// Voids a posted voucher.
    ///
    /// # Errors
    ///
    /// See [`VoucherPostingEngine::void`].
    pub async fn void_voucher(
        &self,
        tenant_id: TenantId,
        id: VoucherId,
    ) -> Result<Voucher, LedgerError> {
        self.posting.void(tenant_id, id).await
    }

    /// Fetches one voucher.
    ///
    /// # Errors
    ///
    /// [`LedgerError::VoucherNotFound`].
    pub fn get_voucher(&self, tenant_id: TenantId, id: VoucherId) -> Result<Voucher, LedgerError> {
        self.store.get(tenant_id, id)
    }

    /// Lists vouchers, newest date first.
    #[must_use]
    pub fn list_vouchers(&self, tenant_id: TenantId, filter: VoucherFilter) -> Vec<Voucher> {
        self.store.list(tenant_id, filter)
    }

    // --- Fiscal periods ---

    /// Closes a fiscal period. Irreversible.
    ///
    /// Takes the same per-period lock posting takes, so a close cannot
    /// race a post that is mid-flight for the same period.
    ///
    /// # Errors
    ///
    /// [`LedgerError::AlreadyClosed`],
    /// [`LedgerError::DraftVouchersPending`] while drafts remain dated
    /// inside the period, and [`LedgerError::Busy`] on lock contention.
    pub async fn close_period(
        &self,
        tenant_id: TenantId,
        year: i32,
        month: u32,
    ) -> Result<FiscalPeriod, LedgerError> {
        let key = PeriodKey { year, month };
        let _guard = self.periods.lock(tenant_id, key).await?;
        let drafts = self.store.draft_count(tenant_id, key);
        if drafts > 0 {
            return Err(LedgerError::DraftVouchersPending {
                period: key,
                count: drafts,
            });
        }
        self.periods.mark_closed(tenant_id, key)?;
        Ok(FiscalPeriod {
            tenant_id,
            key,
            status: PeriodStatus::Closed,
        })
    }

    /// Whether a voucher dated `date` may still be posted.
    #[must_use]
    pub fn is_period_open(&self, tenant_id: TenantId, date: NaiveDate) -> bool {
        self.periods.is_open(tenant_id, date)
    }

    /// Lists a tenant's period records.
    #[must_use]
    pub fn list_periods(&self, tenant_id: TenantId) -> Vec<FiscalPeriod> {
        self.periods.list(tenant_id)
    }

    // --- Reversal notes ---

    /// Creates a draft credit or debit note.
    ///
    /// # Errors
    ///
    /// See [`ReversalEngine::create_note`].
    pub fn create_note(
        &self,
        tenant_id: TenantId,
        request: CreateNoteRequest,
    ) -> Result<Note, LedgerError> {
        self.reversal.create_note(tenant_id, request)
    }

    /// Approves a note, posting its reversal voucher.
    ///
    /// # Errors
    ///
    /// See [`ReversalEngine::approve_note`].
    pub async fn approve_note(
        &self,
        tenant_id: TenantId,
        note_id: NoteId,
    ) -> Result<Note, LedgerError> {
        self.reversal.approve_note(tenant_id, note_id).await
    }

    /// Marks an approved note as sent to the tax authority.
    ///
    /// # Errors
    ///
    /// See [`ReversalEngine::mark_sent`].
    pub fn mark_note_sent(&self, tenant_id: TenantId, note_id: NoteId) -> Result<Note, LedgerError> {
        self.reversal.mark_sent(tenant_id, note_id)
    }

    /// Fetches one note.
    ///
    /// # Errors
    ///
    /// [`LedgerError::NoteNotFound`].
    pub fn get_note(&self, tenant_id: TenantId, note_id: NoteId) -> Result<Note, LedgerError> {
        self.reversal.get_note(tenant_id, note_id)
    }

    /// Lists a tenant's notes.
    #[must_use]
    pub fn list_notes(&self, tenant_id: TenantId) -> Vec<Note> {
        self.reversal.list_notes(tenant_id)
    }

    // --- Reports ---

    /// Journal of a window.
    #[must_use]
    pub fn journal(
        &self,
        tenant_id: TenantId,
        from: NaiveDate,
        to: NaiveDate,
        voucher_type: Option<VoucherType>,
    ) -> JournalReport {
        self.reports.journal(tenant_id, from, to, voucher_type)
    }

    /// General ledger of one account.
    ///
    /// # Errors
    ///
    /// [`LedgerError::UnknownAccount`].
    pub fn general_ledger(
        &self,
        tenant_id: TenantId,
        code: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<GeneralLedgerReport, LedgerError> {
        self.reports.general_ledger(tenant_id, code, from, to)
    }

    /// Trial balance over a window.
    #[must_use]
    pub fn trial_balance(
        &self,
        tenant_id: TenantId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> TrialBalanceReport {
        self.reports.trial_balance(tenant_id, from, to)
    }

    /// Balance sheet at a cutoff date.
    #[must_use]
    pub fn balance_sheet(&self, tenant_id: TenantId, as_of: NaiveDate) -> BalanceSheetReport {
        self.reports.balance_sheet(tenant_id, as_of)
    }

    /// Income statement over a window.
    #[must_use]
    pub fn income_statement(
        &self,
        tenant_id: TenantId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> IncomeStatementReport {
        self.reports.income_statement(tenant_id, from, to)
    }
}
