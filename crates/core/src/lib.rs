//! Core accounting logic for Folio.
//!
//! This crate contains pure business logic with ZERO web or storage
//! dependencies. All domain types, validation rules, and report calculations
//! live here.
//!
//! # Modules
//!
//! - `account` - Chart-of-accounts types and the hierarchical code scheme
//! - `voucher` - Voucher and entry aggregates with status rules
//! - `period` - Fiscal period keys and open/closed state
//! - `request` - Inputs submitted by external collaborators
//! - `validation` - Balanced-voucher validation
//! - `balance` - Nature-aware balance math and running balances
//! - `reports` - Journal, general ledger, trial balance, balance sheet,
//!   income statement computation
//! - `reversal` - Credit/debit note construction and state machine
//! - `error` - The ledger error taxonomy

pub mod account;
pub mod balance;
pub mod error;
pub mod period;
pub mod request;
pub mod reports;
pub mod reversal;
pub mod validation;
pub mod voucher;

#[cfg(test)]
mod validation_props;

pub use account::{Account, AccountNature, AccountType, BalanceClassification};
pub use balance::RunningBalance;
pub use error::{ErrorKind, LedgerError};
pub use period::{FiscalPeriod, PeriodKey, PeriodStatus};
pub use request::{CreateVoucherRequest, VoucherLine};
pub use reversal::{Note, NoteKind, NoteStatus};
pub use validation::{AccountRules, VoucherTotals, validate_request};
pub use voucher::{Entry, Voucher, VoucherStatus, VoucherType};
