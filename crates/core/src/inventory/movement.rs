//! Keeps the item master in step with the voucher journal.
//!
//! Live stock on an item is the quantity after every saved voucher. Stores
//! post a voucher's movements when it is saved and reverse them when it is
//! replaced or deleted, which is what lets a stock statement reconstruct a
//! period opening by backing movements out of live stock.

use super::types::InventoryItem;
use crate::ledger::stock_effect;
use crate::voucher::Voucher;

/// Applies a voucher's stock movements to the items it touches.
pub fn post_movements(items: &mut [InventoryItem], voucher: &Voucher) {
    for item in items.iter_mut() {
        let change = stock_effect(voucher, item.id);
        if !change.is_zero() {
            item.adjust_stock(change);
        }
    }
}

/// Undoes [`post_movements`] for the same voucher.
pub fn reverse_movements(items: &mut [InventoryItem], voucher: &Voucher) {
    for item in items.iter_mut() {
        let change = stock_effect(voucher, item.id);
        if !change.is_zero() {
            item.adjust_stock(-change);
        }
    }
}
