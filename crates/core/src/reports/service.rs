//! Report assembly from committed ledger data.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::account::{AccountNature, AccountType, BalanceClassification};
use crate::balance::RunningBalance;

use super::types::{
    AccountActivity, BalanceSheetReport, BalanceSheetRow, BalanceSheetSection, GeneralLedgerLine,
    GeneralLedgerReport, IncomeStatementReport, IncomeStatementSection, JournalLine, JournalReport,
    LedgerEntryRow, TrialBalanceReport, TrialBalanceRow,
};

/// Pure report computation. The storage layer hands it pre-filtered,
/// pre-ordered rows; everything here is arithmetic and grouping.
pub struct ReportService;

impl ReportService {
    /// Chronological journal of a window. Voided vouchers are listed but
    /// excluded from the totals; the consistency flag compares the totals
    /// of the remaining lines.
    #[must_use]
    pub fn journal(from: NaiveDate, to: NaiveDate, lines: Vec<JournalLine>) -> JournalReport {
        let mut total_debit = Decimal::ZERO;
        let mut total_credit = Decimal::ZERO;
        for line in lines.iter().filter(|l| !l.voided) {
            total_debit += line.debit;
            total_credit += line.credit;
        }
        let difference = total_debit - total_credit;
        JournalReport {
            from,
            to,
            lines,
            total_debit,
            total_credit,
            is_consistent: difference.is_zero(),
            difference,
        }
    }

    /// Ledger of one account: opening balance, one running-balance line
    /// per entry, closing balance.
    #[must_use]
    pub fn general_ledger(
        account_code: String,
        account_name: String,
        nature: AccountNature,
        from: NaiveDate,
        to: NaiveDate,
        opening_balance: Decimal,
        rows: Vec<LedgerEntryRow>,
    ) -> GeneralLedgerReport {
        let mut balance = RunningBalance::opening(opening_balance);
        let mut total_debit = Decimal::ZERO;
        let mut total_credit = Decimal::ZERO;
        let mut lines = Vec::with_capacity(rows.len());
        for row in rows {
            total_debit += row.debit;
            total_credit += row.credit;
            balance = balance.advance(nature.balance_change(row.debit, row.credit));
            lines.push(GeneralLedgerLine {
                entry: row,
                balance: balance.current,
            });
        }
        GeneralLedgerReport {
            account_code,
            account_name,
            nature,
            from,
            to,
            opening_balance,
            lines,
            total_debit,
            total_credit,
            closing_balance: balance.current,
        }
    }

    /// Trial balance over a window. Each account's net lands in exactly
    /// one balance column: its natural side when the net is positive, the
    /// opposite side when movement pushed it negative.
    #[must_use]
    pub fn trial_balance(
        from: NaiveDate,
        to: NaiveDate,
        activity: Vec<AccountActivity>,
    ) -> TrialBalanceReport {
        let mut rows = Vec::with_capacity(activity.len());
        let mut total_debit = Decimal::ZERO;
        let mut total_credit = Decimal::ZERO;
        let mut total_debit_balance = Decimal::ZERO;
        let mut total_credit_balance = Decimal::ZERO;
        for account in activity {
            let net = account.net();
            let (debit_balance, credit_balance) = match (account.nature, net.is_sign_negative()) {
                (AccountNature::DebitNormal, false) | (AccountNature::CreditNormal, true) => {
                    (net.abs(), Decimal::ZERO)
                }
                (AccountNature::CreditNormal, false) | (AccountNature::DebitNormal, true) => {
                    (Decimal::ZERO, net.abs())
                }
            };
            total_debit += account.total_debit;
            total_credit += account.total_credit;
            total_debit_balance += debit_balance;
            total_credit_balance += credit_balance;
            rows.push(TrialBalanceRow {
                code: account.code,
                name: account.name,
                total_debit: account.total_debit,
                total_credit: account.total_credit,
                debit_balance,
                credit_balance,
            });
        }
        let difference = total_debit - total_credit;
        TrialBalanceReport {
            from,
            to,
            rows,
            total_debit,
            total_credit,
            total_debit_balance,
            total_credit_balance,
            is_balanced: difference.is_zero(),
            difference,
        }
    }

    /// Balance sheet at a cutoff date. Income and expense activity is
    /// collapsed into a synthetic period-result row inside equity so the
    /// accounting equation closes without a year-end closing voucher.
    #[must_use]
    pub fn balance_sheet(as_of: NaiveDate, activity: Vec<AccountActivity>) -> BalanceSheetReport {
        let mut current_assets = SectionBuilder::default();
        let mut non_current_assets = SectionBuilder::default();
        let mut current_liabilities = SectionBuilder::default();
        let mut non_current_liabilities = SectionBuilder::default();
        let mut equity = SectionBuilder::default();
        let mut period_result = Decimal::ZERO;

        for account in activity {
            let net = account.net();
            match account.classification {
                BalanceClassification::CurrentAsset => current_assets.push(&account, net),
                BalanceClassification::NonCurrentAsset => non_current_assets.push(&account, net),
                BalanceClassification::CurrentLiability => {
                    current_liabilities.push(&account, net);
                }
                BalanceClassification::NonCurrentLiability => {
                    non_current_liabilities.push(&account, net);
                }
                BalanceClassification::Equity => equity.push(&account, net),
                BalanceClassification::OperationalIncome
                | BalanceClassification::NonOperationalIncome => period_result += net,
                BalanceClassification::CostOfSales
                | BalanceClassification::OperationalExpense
                | BalanceClassification::NonOperationalExpense => period_result -= net,
            }
        }

        let total_assets = current_assets.total + non_current_assets.total;
        let total_liabilities = current_liabilities.total + non_current_liabilities.total;
        let total_equity = equity.total + period_result;
        let difference = total_assets - (total_liabilities + total_equity);
        BalanceSheetReport {
            as_of,
            current_assets: current_assets.build(),
            non_current_assets: non_current_assets.build(),
            current_liabilities: current_liabilities.build(),
            non_current_liabilities: non_current_liabilities.build(),
            equity: equity.build(),
            period_result,
            total_assets,
            total_liabilities,
            total_equity,
            is_balanced: difference.is_zero(),
            difference,
        }
    }

    /// Income statement over a window, grouped by result classification.
    #[must_use]
    pub fn income_statement(
        from: NaiveDate,
        to: NaiveDate,
        activity: Vec<AccountActivity>,
    ) -> IncomeStatementReport {
        let mut operational_income = SectionBuilder::default();
        let mut non_operational_income = SectionBuilder::default();
        let mut cost_of_sales = SectionBuilder::default();
        let mut operational_expenses = SectionBuilder::default();
        let mut non_operational_expenses = SectionBuilder::default();

        for account in activity {
            if !matches!(
                account.account_type,
                AccountType::Income | AccountType::Expense
            ) {
                continue;
            }
            let net = account.net();
            match account.classification {
                BalanceClassification::OperationalIncome => operational_income.push(&account, net),
                BalanceClassification::NonOperationalIncome => {
                    non_operational_income.push(&account, net);
                }
                BalanceClassification::CostOfSales => cost_of_sales.push(&account, net),
                BalanceClassification::OperationalExpense => {
                    operational_expenses.push(&account, net);
                }
                BalanceClassification::NonOperationalExpense => {
                    non_operational_expenses.push(&account, net);
                }
                _ => {}
            }
        }

        let gross_profit = operational_income.total - cost_of_sales.total;
        let net_result = operational_income.total + non_operational_income.total
            - cost_of_sales.total
            - operational_expenses.total
            - non_operational_expenses.total;
        IncomeStatementReport {
            from,
            to,
            operational_income: operational_income.build_result(),
            non_operational_income: non_operational_income.build_result(),
            cost_of_sales: cost_of_sales.build_result(),
            gross_profit,
            operational_expenses: operational_expenses.build_result(),
            non_operational_expenses: non_operational_expenses.build_result(),
            net_result,
        }
    }
}

#[derive(Default)]
struct SectionBuilder {
    rows: Vec<BalanceSheetRow>,
    total: Decimal,
}

impl SectionBuilder {
    fn push(&mut self, account: &AccountActivity, balance: Decimal) {
        self.total += balance;
        self.rows.push(BalanceSheetRow {
            code: account.code.clone(),
            name: account.name.clone(),
            balance,
        });
    }

    fn build(self) -> BalanceSheetSection {
        BalanceSheetSection {
            rows: self.rows,
            total: self.total,
        }
    }

    fn build_result(self) -> IncomeStatementSection {
        IncomeStatementSection {
            rows: self.rows,
            total: self.total,
        }
    }
}
