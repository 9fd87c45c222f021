//! Report input and output shapes.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::account::{AccountNature, AccountType, BalanceClassification};
use crate::voucher::VoucherType;
use folio_shared::VoucherId;

/// Aggregated movement of one account over a reporting window.
///
/// The storage layer produces one of these per account that had posted
/// activity; report computation never sees individual entries for the
/// aggregate reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountActivity {
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Normal balance side.
    pub nature: AccountNature,
    /// Balance-sheet / income-statement classification.
    pub classification: BalanceClassification,
    /// Sum of debit amounts in the window.
    pub total_debit: Decimal,
    /// Sum of credit amounts in the window.
    pub total_credit: Decimal,
}

impl AccountActivity {
    /// Net balance of the window, signed by the account's nature.
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.nature.balance_change(self.total_debit, self.total_credit)
    }
}

/// One entry line in the journal, carrying its voucher context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalLine {
    /// Owning voucher.
    pub voucher_id: VoucherId,
    /// Display number, e.g. `CE-42`; absent for drafts.
    pub voucher_number: Option<String>,
    /// Voucher type.
    pub voucher_type: VoucherType,
    /// Voucher date.
    pub date: NaiveDate,
    /// Position within the voucher, 1-based.
    pub line_no: u32,
    /// Account code the line hits.
    pub account_code: String,
    /// Account name at report time.
    pub account_name: String,
    /// Line description.
    pub description: Option<String>,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Voided vouchers stay in the journal for audit, flagged and
    /// excluded from the totals.
    pub voided: bool,
}

/// Chronological journal of all vouchers in a window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalReport {
    /// Window start, inclusive.
    pub from: NaiveDate,
    /// Window end, inclusive.
    pub to: NaiveDate,
    /// Entry lines in journal order.
    pub lines: Vec<JournalLine>,
    /// Total debits of non-voided lines.
    pub total_debit: Decimal,
    /// Total credits of non-voided lines.
    pub total_credit: Decimal,
    /// False when the committed data itself is out of balance. A posted
    /// ledger can only get here through a storage defect, so the report
    /// flags it instead of failing.
    pub is_consistent: bool,
    /// `total_debit - total_credit`.
    pub difference: Decimal,
}

/// One entry of a single account's ledger, before the running balance
/// is attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntryRow {
    /// Voucher date.
    pub date: NaiveDate,
    /// Display number of the voucher; absent for drafts.
    pub voucher_number: Option<String>,
    /// Voucher type.
    pub voucher_type: VoucherType,
    /// Position within the voucher, 1-based.
    pub line_no: u32,
    /// Line description.
    pub description: Option<String>,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
}

/// A ledger entry with its running balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralLedgerLine {
    /// The underlying entry.
    #[serde(flatten)]
    pub entry: LedgerEntryRow,
    /// Balance after applying this entry.
    pub balance: Decimal,
}

/// Single-account ledger: opening balance, movements, closing balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralLedgerReport {
    /// Account code.
    pub account_code: String,
    /// Account name.
    pub account_name: String,
    /// Normal balance side, controls the running-balance sign.
    pub nature: AccountNature,
    /// Window start, inclusive.
    pub from: NaiveDate,
    /// Window end, inclusive.
    pub to: NaiveDate,
    /// Balance accumulated before the window.
    pub opening_balance: Decimal,
    /// Movements inside the window with running balances.
    pub lines: Vec<GeneralLedgerLine>,
    /// Total debits of the window.
    pub total_debit: Decimal,
    /// Total credits of the window.
    pub total_credit: Decimal,
    /// Balance after the last movement.
    pub closing_balance: Decimal,
}

/// One account row of the trial balance. Exactly one of the balance
/// columns is non-zero (or both are zero).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Sum of debit amounts in the window.
    pub total_debit: Decimal,
    /// Sum of credit amounts in the window.
    pub total_credit: Decimal,
    /// Net balance when it falls on the debit side.
    pub debit_balance: Decimal,
    /// Net balance when it falls on the credit side.
    pub credit_balance: Decimal,
}

/// Trial balance over a window, one row per account with movement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceReport {
    /// Window start, inclusive.
    pub from: NaiveDate,
    /// Window end, inclusive.
    pub to: NaiveDate,
    /// Account rows ordered by code.
    pub rows: Vec<TrialBalanceRow>,
    /// Grand total of the debit movement column.
    pub total_debit: Decimal,
    /// Grand total of the credit movement column.
    pub total_credit: Decimal,
    /// Grand total of the debit balance column.
    pub total_debit_balance: Decimal,
    /// Grand total of the credit balance column.
    pub total_credit_balance: Decimal,
    /// True when debit and credit totals agree exactly.
    pub is_balanced: bool,
    /// `total_debit - total_credit`.
    pub difference: Decimal,
}

/// One account line of a balance-sheet or income-statement section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSheetRow {
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Nature-signed balance.
    pub balance: Decimal,
}

/// A titled grouping of balance-sheet rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSheetSection {
    /// Account rows ordered by code.
    pub rows: Vec<BalanceSheetRow>,
    /// Section total.
    pub total: Decimal,
}

/// Balance sheet as of a date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSheetReport {
    /// Report date; all movement up to and including it counts.
    pub as_of: NaiveDate,
    /// Current assets.
    pub current_assets: BalanceSheetSection,
    /// Non-current assets.
    pub non_current_assets: BalanceSheetSection,
    /// Current liabilities.
    pub current_liabilities: BalanceSheetSection,
    /// Non-current liabilities.
    pub non_current_liabilities: BalanceSheetSection,
    /// Equity accounts proper, excluding the period result.
    pub equity: BalanceSheetSection,
    /// Result of the period: uncommitted income minus expenses, reported
    /// as a synthetic equity row so the equation closes without a formal
    /// year-end closing voucher.
    pub period_result: Decimal,
    /// Current plus non-current assets.
    pub total_assets: Decimal,
    /// Current plus non-current liabilities.
    pub total_liabilities: Decimal,
    /// Equity total including the period result.
    pub total_equity: Decimal,
    /// True when assets equal liabilities plus equity exactly.
    pub is_balanced: bool,
    /// `total_assets - (total_liabilities + total_equity)`.
    pub difference: Decimal,
}

/// A titled grouping of income-statement rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeStatementSection {
    /// Account rows ordered by code.
    pub rows: Vec<BalanceSheetRow>,
    /// Section total.
    pub total: Decimal,
}

/// Income statement over a window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeStatementReport {
    /// Window start, inclusive.
    pub from: NaiveDate,
    /// Window end, inclusive.
    pub to: NaiveDate,
    /// Operational income.
    pub operational_income: IncomeStatementSection,
    /// Non-operational income.
    pub non_operational_income: IncomeStatementSection,
    /// Cost of sales.
    pub cost_of_sales: IncomeStatementSection,
    /// Operational income minus cost of sales.
    pub gross_profit: Decimal,
    /// Operational expenses.
    pub operational_expenses: IncomeStatementSection,
    /// Non-operational expenses.
    pub non_operational_expenses: IncomeStatementSection,
    /// Total income minus total costs and expenses.
    pub net_result: Decimal,
}
