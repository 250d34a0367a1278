//! Pricing
//!
//! Amounts are whole Chilean pesos (CLP has no minor unit), tax included.

use rusty_money::{Money, iso::Currency};

use crate::cart::CartLine;

/// Store currency.
pub fn currency() -> &'static Currency {
    rusty_money::iso::CLP
}

/// Wrap a peso amount as [`Money`] for display.
pub fn to_money(pesos: u64) -> Money<'static, Currency> {
    Money::from_minor(i64::try_from(pesos).unwrap_or(i64::MAX), currency())
}

/// Price of `quantity` units, saturating at `u64::MAX`.
pub fn line_total(unit_price: u64, quantity: u32) -> u64 {
    unit_price.saturating_mul(u64::from(quantity))
}

/// Sum of `unit_price × quantity` across lines.
pub fn total_price(lines: &[CartLine]) -> u64 {
    lines.iter().fold(0, |total, line| {
        total.saturating_add(line_total(line.unit_price, line.quantity))
    })
}
