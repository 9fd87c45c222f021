//! Financial report computation.
//!
//! Pure calculations over committed ledger data: the journal, the general
//! ledger of one account, the trial balance, the balance sheet and the
//! income statement. Consistency violations (journal totals mismatch,
//! balance-sheet equation) are surfaced as diagnostic fields, never errors.

pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use service::ReportService;
pub use types::{
    AccountActivity, BalanceSheetReport, BalanceSheetRow, BalanceSheetSection,
    GeneralLedgerLine, GeneralLedgerReport, IncomeStatementReport, IncomeStatementSection, JournalLine,
    JournalReport, LedgerEntryRow, TrialBalanceReport, TrialBalanceRow,
};
