//! Shared fixtures for ledger integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use folio_core::{AccountType, CreateVoucherRequest, VoucherLine, VoucherType};
use folio_ledger::{Ledger, NewAccount};
use folio_shared::TenantId;
use folio_shared::config::LedgerConfig;

pub fn test_ledger() -> Arc<Ledger> {
    Arc::new(Ledger::new(&LedgerConfig::default()))
}

pub fn test_ledger_with_timeout(lock_timeout_ms: u64) -> Arc<Ledger> {
    Arc::new(Ledger::new(&LedgerConfig {
        lock_timeout_ms,
        ..LedgerConfig::default()
    }))
}

/// Minimal PUC-style chart covering every account the tests post to.
pub fn seed_chart(ledger: &Ledger, tenant: TenantId) {
    let accounts: &[(&str, &str, AccountType)] = &[
        ("1", "Activo", AccountType::Asset),
        ("11", "Disponible", AccountType::Asset),
        ("1105", "Caja", AccountType::Asset),
        ("110505", "Caja general", AccountType::Asset),
        ("13", "Deudores", AccountType::Asset),
        ("1305", "Clientes", AccountType::Asset),
        ("130505", "Clientes nacionales", AccountType::Asset),
        ("2", "Pasivo", AccountType::Liability),
        ("24", "Impuestos por pagar", AccountType::Liability),
        ("2408", "IVA", AccountType::Liability),
        ("240805", "IVA generado", AccountType::Liability),
        ("3", "Patrimonio", AccountType::Equity),
        ("31", "Capital social", AccountType::Equity),
        ("3105", "Capital suscrito", AccountType::Equity),
        ("310505", "Capital autorizado", AccountType::Equity),
        ("4", "Ingresos", AccountType::Income),
        ("41", "Operacionales", AccountType::Income),
        ("4135", "Comercio al por mayor", AccountType::Income),
        ("413505", "Venta de mercancias", AccountType::Income),
        ("5", "Gastos", AccountType::Expense),
        ("51", "Operacionales de administracion", AccountType::Expense),
        ("5120", "Arrendamientos", AccountType::Expense),
        ("512010", "Construcciones y edificaciones", AccountType::Expense),
        ("6", "Costos de ventas", AccountType::Expense),
        ("61", "Costo de ventas", AccountType::Expense),
        ("6135", "Comercio al por mayor", AccountType::Expense),
        ("613505", "Costo de mercancias", AccountType::Expense),
    ];
    for (code, name, account_type) in accounts {
        ledger
            .create_account(
                tenant,
                NewAccount {
                    code: (*code).to_string(),
                    name: (*name).to_string(),
                    account_type: *account_type,
                    requires_third_party: false,
                    requires_cost_center: false,
                    is_system: false,
                    classification: None,
                },
            )
            .unwrap();
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Two-line journal entry debiting one account and crediting another.
pub fn journal_request(
    tenant: TenantId,
    on: NaiveDate,
    debit_code: &str,
    credit_code: &str,
    amount: Decimal,
) -> CreateVoucherRequest {
    CreateVoucherRequest {
        tenant_id: tenant,
        voucher_type: VoucherType::JournalEntry,
        date: on,
        description: Some("test entry".to_string()),
        reference: None,
        lines: vec![
            VoucherLine::debit(debit_code, amount),
            VoucherLine::credit(credit_code, amount),
        ],
    }
}

/// Sales invoice: receivable against revenue plus output tax.
pub fn invoice_request(
    tenant: TenantId,
    on: NaiveDate,
    net: Decimal,
    tax: Decimal,
) -> CreateVoucherRequest {
    CreateVoucherRequest {
        tenant_id: tenant,
        voucher_type: VoucherType::SalesInvoice,
        date: on,
        description: Some("sales invoice".to_string()),
        reference: Some("INV-TEST".to_string()),
        lines: vec![
            VoucherLine::debit("130505", net + tax),
            VoucherLine::credit("413505", net),
            VoucherLine::credit("240805", tax),
        ],
    }
}
