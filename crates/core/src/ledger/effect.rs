//! Voucher effect resolution.
//!
//! Sign convention: debit is positive and credit is negative for every
//! account, regardless of its natural side. Callers invert for payables or
//! liability-side presentation.
//!
//! | Voucher  | Party leg | Line legs |
//! |----------|-----------|-----------|
//! | Sales    | Dr        | Cr        |
//! | Purchase | Cr        | Dr        |
//! | Receipt  | Cr        | Dr        |
//! | Payment  | Dr        | Cr        |
//! | Contra   | Cr        | Dr        |
//! | Journal  | none      | none      |

use bahi_shared::types::{ItemId, LedgerId, saturating_sum};
use rust_decimal::Decimal;

use crate::voucher::{Voucher, VoucherType};

/// Signed effect of a voucher on one account.
///
/// A ledger that is both the party and a line target receives both effects.
/// Journal vouchers contribute zero.
#[must_use]
pub fn effect(voucher: &Voucher, account_id: LedgerId) -> Decimal {
    let Some((primary, secondary)) = voucher.voucher_type.leg_sides() else {
        return Decimal::ZERO;
    };

    let mut total = Decimal::ZERO;
    if voucher.party_ledger_id == account_id {
        total = total.saturating_add(primary.signed(voucher.total_amount));
    }
    for line in &voucher.items {
        if line.ledger_id() == Some(account_id) {
            total = total.saturating_add(secondary.signed(line.amount));
        }
    }
    total
}

/// Signed quantity effect of a voucher on one inventory item.
///
/// Purchase lines add stock, Sales lines remove it; other types do not move stock.
#[must_use]
pub fn stock_effect(voucher: &Voucher, item_id: ItemId) -> Decimal {
    let moved = saturating_sum(
        voucher
            .items
            .iter()
            .filter(|line| line.item_id() == Some(item_id))
            .map(|line| line.quantity),
    );

    match voucher.voucher_type {
        VoucherType::Purchase => moved,
        VoucherType::Sales => -moved,
        _ => Decimal::ZERO,
    }
}
