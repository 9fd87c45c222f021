//! Report generation over committed ledger data.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use folio_core::balance::net_movement;
use folio_core::reports::{
    AccountActivity, BalanceSheetReport, GeneralLedgerReport, IncomeStatementReport, JournalLine,
    JournalReport, LedgerEntryRow, ReportService, TrialBalanceReport,
};
use folio_core::{LedgerError, VoucherType};
use folio_shared::TenantId;

use crate::registry::ChartOfAccountRegistry;
use crate::store::LedgerEntryStore;

/// Assembles reports from the entry store and the chart of accounts.
///
/// Pure reads: every report runs concurrently with postings and sees data
/// as of its own pass over the store.
pub struct ReportGenerator {
    registry: Arc<ChartOfAccountRegistry>,
    store: Arc<LedgerEntryStore>,
}

impl ReportGenerator {
    /// Creates a generator reading from `store` and `registry`.
    #[must_use]
    pub fn new(registry: Arc<ChartOfAccountRegistry>, store: Arc<LedgerEntryStore>) -> Self {
        Self { registry, store }
    }

    /// Chronological journal of a window, voided vouchers flagged.
    #[must_use]
    pub fn journal(
        &self,
        tenant_id: TenantId,
        from: NaiveDate,
        to: NaiveDate,
        voucher_type: Option<VoucherType>,
    ) -> JournalReport {
        let lines = self
            .store
            .entries_for_tenant(tenant_id, from, to, voucher_type)
            .into_iter()
            .map(|(meta, entry)| JournalLine {
                voucher_id: meta.id,
                voucher_number: meta.number,
                voucher_type: meta.voucher_type,
                date: meta.date,
                line_no: entry.line_no,
                account_name: self.account_name(tenant_id, &entry.account_code),
                account_code: entry.account_code,
                description: entry.description,
                debit: entry.debit,
                credit: entry.credit,
                voided: meta.voided,
            })
            .collect();
        ReportService::journal(from, to, lines)
    }

    /// Ledger of one account with opening, running and closing balances.
    ///
    /// # Errors
    ///
    /// [`LedgerError::UnknownAccount`] when the code does not exist.
    pub fn general_ledger(
        &self,
        tenant_id: TenantId,
        code: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<GeneralLedgerReport, LedgerError> {
        let account = self.registry.get(tenant_id, code)?;
        let before: Vec<_> = self
            .store
            .entries_before(tenant_id, code, from)
            .into_iter()
            .map(|(_, entry)| entry)
            .collect();
        let opening = net_movement(account.nature, &before);
        let rows = self
            .store
            .entries_for_account(tenant_id, code, from, to)
            .into_iter()
            .map(|(meta, entry)| LedgerEntryRow {
                date: meta.date,
                voucher_number: meta.number,
                voucher_type: meta.voucher_type,
                line_no: entry.line_no,
                description: entry.description,
                debit: entry.debit,
                credit: entry.credit,
            })
            .collect();
        Ok(ReportService::general_ledger(
            account.code,
            account.name,
            account.nature,
            from,
            to,
            opening,
            rows,
        ))
    }

    /// Trial balance of all accounts with movement in the window.
    #[must_use]
    pub fn trial_balance(
        &self,
        tenant_id: TenantId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> TrialBalanceReport {
        ReportService::trial_balance(from, to, self.activity(tenant_id, from, to))
    }

    /// Balance sheet at a cutoff date over all movement since inception.
    #[must_use]
    pub fn balance_sheet(&self, tenant_id: TenantId, as_of: NaiveDate) -> BalanceSheetReport {
        ReportService::balance_sheet(as_of, self.activity(tenant_id, NaiveDate::MIN, as_of))
    }

    /// Income statement over a window.
    #[must_use]
    pub fn income_statement(
        &self,
        tenant_id: TenantId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> IncomeStatementReport {
        ReportService::income_statement(from, to, self.activity(tenant_id, from, to))
    }

    /// Sums posted non-void movement per account over a window, ordered
    /// by code. Accounts the window never touched are omitted.
    fn activity(&self, tenant_id: TenantId, from: NaiveDate, to: NaiveDate) -> Vec<AccountActivity> {
        let mut totals: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
        for (meta, entry) in self.store.entries_for_tenant(tenant_id, from, to, None) {
            if meta.voided {
                continue;
            }
            let slot = totals.entry(entry.account_code).or_default();
            slot.0 += entry.debit;
            slot.1 += entry.credit;
        }
        totals
            .into_iter()
            .filter_map(|(code, (debit, credit))| {
                let account = self.registry.get(tenant_id, &code).ok()?;
                Some(AccountActivity {
                    code: account.code,
                    name: account.name,
                    account_type: account.account_type,
                    nature: account.nature,
                    classification: account.classification,
                    total_debit: debit,
                    total_credit: credit,
                })
            })
            .collect()
    }

    fn account_name(&self, tenant_id: TenantId, code: &str) -> String {
        self.registry
            .get(tenant_id, code)
            .map_or_else(|_| code.to_string(), |account| account.name)
    }
}
