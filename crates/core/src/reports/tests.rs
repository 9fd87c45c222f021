use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::account::{AccountNature, AccountType, BalanceClassification};
use crate::voucher::VoucherType;
use folio_shared::VoucherId;

use super::types::{AccountActivity, JournalLine, LedgerEntryRow};
use super::ReportService;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
}

fn activity(
    code: &str,
    account_type: AccountType,
    classification: BalanceClassification,
    debit: Decimal,
    credit: Decimal,
) -> AccountActivity {
    AccountActivity {
        code: code.to_string(),
        name: format!("Account {code}"),
        account_type,
        nature: account_type.nature(),
        classification,
        total_debit: debit,
        total_credit: credit,
    }
}

/// A cash sale: cash (1105) debited, revenue (4135) credited.
fn cash_sale_activity() -> Vec<AccountActivity> {
    vec![
        activity(
            "110505",
            AccountType::Asset,
            BalanceClassification::CurrentAsset,
            dec!(1190000),
            dec!(0),
        ),
        activity(
            "413505",
            AccountType::Income,
            BalanceClassification::OperationalIncome,
            dec!(0),
            dec!(1190000),
        ),
    ]
}

#[test]
fn test_journal_totals_and_consistency() {
    let lines = vec![
        JournalLine {
            voucher_id: VoucherId::new(),
            voucher_number: Some("RC-1".to_string()),
            voucher_type: VoucherType::Receipt,
            date: date(5),
            line_no: 1,
            account_code: "110505".to_string(),
            account_name: "Caja general".to_string(),
            description: None,
            debit: dec!(500000),
            credit: dec!(0),
            voided: false,
        },
        JournalLine {
            voucher_id: VoucherId::new(),
            voucher_number: Some("RC-1".to_string()),
            voucher_type: VoucherType::Receipt,
            date: date(5),
            line_no: 2,
            account_code: "413505".to_string(),
            account_name: "Ingresos".to_string(),
            description: None,
            debit: dec!(0),
            credit: dec!(500000),
            voided: false,
        },
    ];
    let report = ReportService::journal(date(1), date(31), lines);
    assert_eq!(report.total_debit, dec!(500000));
    assert_eq!(report.total_credit, dec!(500000));
    assert!(report.is_consistent);
    assert_eq!(report.difference, Decimal::ZERO);
}

#[test]
fn test_journal_excludes_voided_from_totals() {
    let mut line = JournalLine {
        voucher_id: VoucherId::new(),
        voucher_number: Some("CD-9".to_string()),
        voucher_type: VoucherType::JournalEntry,
        date: date(10),
        line_no: 1,
        account_code: "110505".to_string(),
        account_name: "Caja general".to_string(),
        description: None,
        debit: dec!(100),
        credit: dec!(0),
        voided: true,
    };
    let voided_debit = line.clone();
    line.line_no = 2;
    line.debit = dec!(0);
    line.credit = dec!(100);
    let report = ReportService::journal(date(1), date(31), vec![voided_debit, line]);
    assert_eq!(report.lines.len(), 2);
    assert_eq!(report.total_debit, Decimal::ZERO);
    assert_eq!(report.total_credit, Decimal::ZERO);
    assert!(report.is_consistent);
}

#[test]
fn test_journal_flags_inconsistent_totals() {
    let line = JournalLine {
        voucher_id: VoucherId::new(),
        voucher_number: Some("CD-1".to_string()),
        voucher_type: VoucherType::JournalEntry,
        date: date(2),
        line_no: 1,
        account_code: "110505".to_string(),
        account_name: "Caja general".to_string(),
        description: None,
        debit: dec!(75),
        credit: dec!(0),
        voided: false,
    };
    let report = ReportService::journal(date(1), date(31), vec![line]);
    assert!(!report.is_consistent);
    assert_eq!(report.difference, dec!(75));
}

#[test]
fn test_general_ledger_running_balance() {
    let rows = vec![
        LedgerEntryRow {
            date: date(3),
            voucher_number: Some("RC-1".to_string()),
            voucher_type: VoucherType::Receipt,
            line_no: 1,
            description: None,
            debit: dec!(1000),
            credit: dec!(0),
        },
        LedgerEntryRow {
            date: date(7),
            voucher_number: Some("CE-1".to_string()),
            voucher_type: VoucherType::Payment,
            line_no: 2,
            description: None,
            debit: dec!(0),
            credit: dec!(400),
        },
    ];
    let report = ReportService::general_ledger(
        "110505".to_string(),
        "Caja general".to_string(),
        AccountNature::DebitNormal,
        date(1),
        date(31),
        dec!(250),
        rows,
    );
    assert_eq!(report.opening_balance, dec!(250));
    assert_eq!(report.lines[0].balance, dec!(1250));
    assert_eq!(report.lines[1].balance, dec!(850));
    assert_eq!(report.closing_balance, dec!(850));
    assert_eq!(report.total_debit, dec!(1000));
    assert_eq!(report.total_credit, dec!(400));
}

#[test]
fn test_general_ledger_credit_normal_direction() {
    let rows = vec![LedgerEntryRow {
        date: date(4),
        voucher_number: Some("FV-1".to_string()),
        voucher_type: VoucherType::SalesInvoice,
        line_no: 2,
        description: None,
        debit: dec!(0),
        credit: dec!(900),
    }];
    let report = ReportService::general_ledger(
        "413505".to_string(),
        "Ingresos".to_string(),
        AccountNature::CreditNormal,
        date(1),
        date(31),
        Decimal::ZERO,
        rows,
    );
    assert_eq!(report.closing_balance, dec!(900));
}

#[test]
fn test_trial_balance_natural_columns() {
    let report = ReportService::trial_balance(date(1), date(31), cash_sale_activity());
    let cash = &report.rows[0];
    assert_eq!(cash.debit_balance, dec!(1190000));
    assert_eq!(cash.credit_balance, Decimal::ZERO);
    let income = &report.rows[1];
    assert_eq!(income.debit_balance, Decimal::ZERO);
    assert_eq!(income.credit_balance, dec!(1190000));
    assert!(report.is_balanced);
    assert_eq!(report.total_debit_balance, report.total_credit_balance);
}

#[test]
fn test_trial_balance_negative_net_flips_column() {
    // Cash over-credited: a debit-normal account with a credit-side net.
    let report = ReportService::trial_balance(
        date(1),
        date(31),
        vec![activity(
            "110505",
            AccountType::Asset,
            BalanceClassification::CurrentAsset,
            dec!(100),
            dec!(300),
        )],
    );
    let cash = &report.rows[0];
    assert_eq!(cash.debit_balance, Decimal::ZERO);
    assert_eq!(cash.credit_balance, dec!(200));
    assert!(!report.is_balanced);
    assert_eq!(report.difference, dec!(-200));
}

#[test]
fn test_balance_sheet_period_result_closes_equation() {
    // Sale on credit plus a rent expense paid from cash.
    let activity = vec![
        activity(
            "130505",
            AccountType::Asset,
            BalanceClassification::CurrentAsset,
            dec!(1190000),
            dec!(0),
        ),
        activity(
            "110505",
            AccountType::Asset,
            BalanceClassification::CurrentAsset,
            dec!(0),
            dec!(200000),
        ),
        activity(
            "240805",
            AccountType::Liability,
            BalanceClassification::CurrentLiability,
            dec!(0),
            dec!(190000),
        ),
        activity(
            "413505",
            AccountType::Income,
            BalanceClassification::OperationalIncome,
            dec!(0),
            dec!(1000000),
        ),
        activity(
            "512010",
            AccountType::Expense,
            BalanceClassification::OperationalExpense,
            dec!(200000),
            dec!(0),
        ),
    ];
    let report = ReportService::balance_sheet(date(31), activity);
    assert_eq!(report.total_assets, dec!(990000));
    assert_eq!(report.total_liabilities, dec!(190000));
    assert_eq!(report.period_result, dec!(800000));
    assert_eq!(report.total_equity, dec!(800000));
    assert!(report.is_balanced);
    assert_eq!(report.difference, Decimal::ZERO);
}

#[test]
fn test_balance_sheet_sections_split_by_classification() {
    let activity = vec![
        activity(
            "110505",
            AccountType::Asset,
            BalanceClassification::CurrentAsset,
            dec!(500),
            dec!(0),
        ),
        activity(
            "152405",
            AccountType::Asset,
            BalanceClassification::NonCurrentAsset,
            dec!(2000),
            dec!(0),
        ),
        activity(
            "210505",
            AccountType::Liability,
            BalanceClassification::CurrentLiability,
            dec!(0),
            dec!(300),
        ),
        activity(
            "310505",
            AccountType::Equity,
            BalanceClassification::Equity,
            dec!(0),
            dec!(2200),
        ),
    ];
    let report = ReportService::balance_sheet(date(31), activity);
    assert_eq!(report.current_assets.total, dec!(500));
    assert_eq!(report.non_current_assets.total, dec!(2000));
    assert_eq!(report.current_liabilities.total, dec!(300));
    assert_eq!(report.equity.total, dec!(2200));
    assert_eq!(report.period_result, Decimal::ZERO);
    assert!(report.is_balanced);
}

#[test]
fn test_income_statement_gross_profit_and_net_result() {
    let activity = vec![
        activity(
            "413505",
            AccountType::Income,
            BalanceClassification::OperationalIncome,
            dec!(0),
            dec!(1000000),
        ),
        activity(
            "421005",
            AccountType::Income,
            BalanceClassification::NonOperationalIncome,
            dec!(0),
            dec!(50000),
        ),
        activity(
            "613505",
            AccountType::Expense,
            BalanceClassification::CostOfSales,
            dec!(400000),
            dec!(0),
        ),
        activity(
            "512010",
            AccountType::Expense,
            BalanceClassification::OperationalExpense,
            dec!(150000),
            dec!(0),
        ),
        activity(
            "530505",
            AccountType::Expense,
            BalanceClassification::NonOperationalExpense,
            dec!(20000),
            dec!(0),
        ),
    ];
    let report = ReportService::income_statement(date(1), date(31), activity);
    assert_eq!(report.operational_income.total, dec!(1000000));
    assert_eq!(report.gross_profit, dec!(600000));
    assert_eq!(report.net_result, dec!(480000));
}

#[test]
fn test_income_statement_ignores_balance_sheet_accounts() {
    let activity = vec![
        activity(
            "110505",
            AccountType::Asset,
            BalanceClassification::CurrentAsset,
            dec!(999),
            dec!(0),
        ),
        activity(
            "413505",
            AccountType::Income,
            BalanceClassification::OperationalIncome,
            dec!(0),
            dec!(100),
        ),
    ];
    let report = ReportService::income_statement(date(1), date(31), activity);
    assert_eq!(report.operational_income.rows.len(), 1);
    assert_eq!(report.net_result, dec!(100));
}
