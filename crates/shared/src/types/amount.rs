//! Fixed-point amount helpers.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All monetary fields carry `rust_decimal::Decimal` with a configurable
//! minor-unit scale (default 2). Debit/credit comparisons are exact, with
//! no rounding tolerance.

use rust_decimal::Decimal;

/// Default minor-unit scale for ledger amounts (2 = cents).
pub const DEFAULT_MINOR_UNIT_SCALE: u32 = 2;

/// Returns true if `amount` carries more fractional digits than the
/// ledger's minor-unit scale allows.
#[must_use]
pub fn exceeds_scale(amount: Decimal, minor_unit_scale: u32) -> bool {
    amount.normalize().scale() > minor_unit_scale
}

/// Rescales an amount to the ledger's minor-unit scale without changing
/// its value. Callers must have checked [`exceeds_scale`] first; this only
/// pads trailing zeros for display consistency.
#[must_use]
pub fn rescale(amount: Decimal, minor_unit_scale: u32) -> Decimal {
    let mut out = amount;
    out.rescale(minor_unit_scale);
    out
}
