//! Chart-of-accounts domain types.
//!
//! Account codes follow a hierarchical prefix scheme: a 1-digit class, a
//! 2-digit group, a 4-digit account, and a 6-digit subaccount. Every
//! non-root code's parent is its prefix at the previous length, and the
//! parent's level is exactly one less than the child's.

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Account type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Asset account (class 1).
    Asset,
    /// Liability account (class 2).
    Liability,
    /// Equity account (class 3).
    Equity,
    /// Income account (class 4).
    Income,
    /// Expense account (classes 5 and 6).
    Expense,
}

impl AccountType {
    /// Returns the balance nature of this account type.
    ///
    /// Assets and expenses increase with debits; liabilities, equity and
    /// income increase with credits.
    #[must_use]
    pub const fn nature(self) -> AccountNature {
        match self {
            Self::Asset | Self::Expense => AccountNature::DebitNormal,
            Self::Liability | Self::Equity | Self::Income => AccountNature::CreditNormal,
        }
    }
}

/// Balance nature: which side increases the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountNature {
    /// Debit entries increase the balance (assets, expenses).
    DebitNormal,
    /// Credit entries increase the balance (liabilities, equity, income).
    CreditNormal,
}

impl AccountNature {
    /// Calculates the signed balance change of an entry for this nature.
    #[must_use]
    pub fn balance_change(
        self,
        debit: rust_decimal::Decimal,
        credit: rust_decimal::Decimal,
    ) -> rust_decimal::Decimal {
        match self {
            Self::DebitNormal => debit - credit,
            Self::CreditNormal => credit - debit,
        }
    }
}

/// Report classification of an account.
///
/// Drives balance-sheet current/non-current partitioning and income
/// statement sectioning. Defaulted from the code's 2-digit group prefix,
/// overridable per account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceClassification {
    /// Cash, receivables, inventory - realizable within the cycle.
    CurrentAsset,
    /// Property, intangibles, long-term investments.
    NonCurrentAsset,
    /// Obligations due within the cycle.
    CurrentLiability,
    /// Long-term obligations.
    NonCurrentLiability,
    /// Capital, reserves, results.
    Equity,
    /// Revenue from the main activity.
    OperationalIncome,
    /// Financial and other income.
    NonOperationalIncome,
    /// Cost of goods/services sold.
    CostOfSales,
    /// Administration and selling expenses.
    OperationalExpense,
    /// Financial and extraordinary expenses.
    NonOperationalExpense,
}

impl BalanceClassification {
    /// Derives the default classification from the account type and the
    /// code's group prefix.
    #[must_use]
    pub fn default_for(account_type: AccountType, code: &str) -> Self {
        let group: u32 = code.get(0..2).and_then(|g| g.parse().ok()).unwrap_or(0);
        match account_type {
            AccountType::Asset => {
                if (11..=14).contains(&group) {
                    Self::CurrentAsset
                } else {
                    Self::NonCurrentAsset
                }
            }
            AccountType::Liability => {
                if (21..=26).contains(&group) {
                    Self::CurrentLiability
                } else {
                    Self::NonCurrentLiability
                }
            }
            AccountType::Equity => Self::Equity,
            AccountType::Income => {
                if group == 41 {
                    Self::OperationalIncome
                } else {
                    Self::NonOperationalIncome
                }
            }
            AccountType::Expense => {
                if code.starts_with('6') || code.starts_with('7') {
                    Self::CostOfSales
                } else if (51..=52).contains(&group) {
                    Self::OperationalExpense
                } else {
                    Self::NonOperationalExpense
                }
            }
        }
    }
}

/// A chart-of-accounts entry.
///
/// Accounts are shared reference data: vouchers and entries look them up by
/// code and never own them. Accounts referenced by any entry are deactivated,
/// never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Hierarchical account code, unique per tenant.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Balance nature, fixed at creation.
    pub nature: AccountNature,
    /// Hierarchy level (1 = class, 2 = group, 3 = account, 4 = subaccount).
    pub level: u8,
    /// Parent code; `None` for level-1 classes.
    pub parent_code: Option<String>,
    /// Entries on this account must carry a third-party id.
    pub requires_third_party: bool,
    /// Entries on this account must carry a cost-center id.
    pub requires_cost_center: bool,
    /// System accounts cannot be edited or deactivated.
    pub is_system: bool,
    /// Inactive accounts reject new postings.
    pub is_active: bool,
    /// Report classification.
    pub classification: BalanceClassification,
}

/// Valid code lengths, indexed by level - 1.
const LEVEL_LENGTHS: [usize; 4] = [1, 2, 4, 6];

/// Returns the hierarchy level for a code, or an error when the code does
/// not fit the prefix scheme.
pub fn code_level(code: &str) -> Result<u8, LedgerError> {
    if !code.is_empty() && code.chars().all(|c| c.is_ascii_digit()) {
        if let Some(idx) = LEVEL_LENGTHS.iter().position(|&len| len == code.len()) {
            #[allow(clippy::cast_possible_truncation)]
            return Ok(idx as u8 + 1);
        }
    }
    Err(LedgerError::InvalidAccountCode(code.to_string()))
}

/// Returns the parent code for a code, or `None` for level-1 classes.
pub fn parent_code(code: &str) -> Result<Option<String>, LedgerError> {
    let level = code_level(code)?;
    if level == 1 {
        return Ok(None);
    }
    let parent_len = LEVEL_LENGTHS[usize::from(level) - 2];
    Ok(code.get(0..parent_len).map(ToString::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_nature_by_type() {
        assert_eq!(AccountType::Asset.nature(), AccountNature::DebitNormal);
        assert_eq!(AccountType::Expense.nature(), AccountNature::DebitNormal);
        assert_eq!(AccountType::Liability.nature(), AccountNature::CreditNormal);
        assert_eq!(AccountType::Equity.nature(), AccountNature::CreditNormal);
        assert_eq!(AccountType::Income.nature(), AccountNature::CreditNormal);
    }

    #[test]
    fn test_balance_change() {
        assert_eq!(
            AccountNature::DebitNormal.balance_change(dec!(100), dec!(30)),
            dec!(70)
        );
        assert_eq!(
            AccountNature::CreditNormal.balance_change(dec!(30), dec!(100)),
            dec!(70)
        );
        assert_eq!(
            AccountNature::DebitNormal.balance_change(dec!(0), dec!(50)),
            dec!(-50)
        );
    }

    #[rstest]
    #[case("1", 1)]
    #[case("11", 2)]
    #[case("1105", 3)]
    #[case("110505", 4)]
    fn test_code_level(#[case] code: &str, #[case] level: u8) {
        assert_eq!(code_level(code).unwrap(), level);
    }

    #[rstest]
    #[case("")]
    #[case("110")] // 3 digits is not a valid length
    #[case("11055")] // nor 5
    #[case("1105050")] // nor 7
    #[case("11a5")]
    fn test_code_level_rejects(#[case] code: &str) {
        assert!(matches!(
            code_level(code),
            Err(LedgerError::InvalidAccountCode(_))
        ));
    }

    #[rstest]
    #[case("1", None)]
    #[case("11", Some("1"))]
    #[case("1105", Some("11"))]
    #[case("110505", Some("1105"))]
    fn test_parent_code(#[case] code: &str, #[case] parent: Option<&str>) {
        assert_eq!(
            parent_code(code).unwrap(),
            parent.map(ToString::to_string)
        );
    }

    #[rstest]
    #[case(AccountType::Asset, "1105", BalanceClassification::CurrentAsset)]
    #[case(AccountType::Asset, "1524", BalanceClassification::NonCurrentAsset)]
    #[case(AccountType::Liability, "2205", BalanceClassification::CurrentLiability)]
    #[case(AccountType::Liability, "2705", BalanceClassification::NonCurrentLiability)]
    #[case(AccountType::Equity, "3115", BalanceClassification::Equity)]
    #[case(AccountType::Income, "4135", BalanceClassification::OperationalIncome)]
    #[case(AccountType::Income, "4210", BalanceClassification::NonOperationalIncome)]
    #[case(AccountType::Expense, "6135", BalanceClassification::CostOfSales)]
    #[case(AccountType::Expense, "5105", BalanceClassification::OperationalExpense)]
    #[case(AccountType::Expense, "5305", BalanceClassification::NonOperationalExpense)]
    fn test_default_classification(
        #[case] account_type: AccountType,
        #[case] code: &str,
        #[case] expected: BalanceClassification,
    ) {
        assert_eq!(
            BalanceClassification::default_for(account_type, code),
            expected
        );
    }
}
