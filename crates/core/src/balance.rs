//! Nature-aware balance math.
//!
//! Debit-normal accounts grow with debits (assets, expenses); credit-normal
//! accounts grow with credits (liabilities, equity, income). The general
//! ledger computes opening/running/closing balances from these rules.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::account::AccountNature;
use crate::voucher::Entry;

/// Running balance state while walking an account's entries in order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RunningBalance {
    /// Balance before the current entry.
    pub previous: Decimal,
    /// Balance after the current entry.
    pub current: Decimal,
}

impl RunningBalance {
    /// Starts a balance walk from an opening balance.
    #[must_use]
    pub const fn opening(balance: Decimal) -> Self {
        Self {
            previous: balance,
            current: balance,
        }
    }

    /// Advances the balance with one entry's change.
    #[must_use]
    pub fn advance(self, change: Decimal) -> Self {
        Self {
            previous: self.current,
            current: self.current + change,
        }
    }
}

/// Sums the net movement of a slice of entries for the given nature.
///
/// Used for opening balances: net of all entries strictly before a date.
#[must_use]
pub fn net_movement(nature: AccountNature, entries: &[Entry]) -> Decimal {
    entries
        .iter()
        .map(|e| nature.balance_change(e.debit, e.credit))
        .sum()
}
