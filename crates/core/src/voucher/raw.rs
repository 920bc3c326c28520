//! Loosely-typed voucher documents as written by the voucher-entry forms.
//!
//! Form documents carry a bare `itemId` on each line that may name an
//! inventory item, a sales/purchase ledger, or a cash/bank ledger. Resolution
//! into [`SecondaryLegTarget`] happens once, here, using the voucher type and
//! the set of known inventory items.

use bahi_shared::types::{ItemId, LedgerId, VoucherId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::{SecondaryLegTarget, Voucher, VoucherLine, VoucherType};

/// Voucher line with an unresolved target.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVoucherLine {
    /// Item, ledger, or cash/bank id.
    pub item_id: Uuid,
    /// Quantity.
    #[serde(default)]
    pub quantity: Decimal,
    /// Rate.
    #[serde(default)]
    pub rate: Decimal,
    /// Amount.
    pub amount: Decimal,
}

/// Voucher document with unresolved lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVoucher {
    /// Unique identifier.
    pub id: VoucherId,
    /// Voucher type.
    #[serde(rename = "type")]
    pub voucher_type: VoucherType,
    /// Transaction date.
    pub date: NaiveDate,
    /// Reference number.
    #[serde(default)]
    pub reference_no: String,
    /// Party ledger.
    pub party_ledger_id: LedgerId,
    /// Lines.
    #[serde(default)]
    pub items: Vec<RawVoucherLine>,
    /// Total amount.
    pub total_amount: Decimal,
    /// Narration.
    #[serde(default)]
    pub narration: String,
}

impl RawVoucherLine {
    /// Resolves the line target.
    ///
    /// Only Sales/Purchase lines can reference stock, and only when the id is
    /// a known inventory item; everything else is a ledger.
    pub fn resolve<F>(self, voucher_type: VoucherType, is_item: F) -> VoucherLine
    where
        F: Fn(ItemId) -> bool,
    {
        let as_item = ItemId::from_uuid(self.item_id);
        let target = if voucher_type.carries_stock() && is_item(as_item) {
            SecondaryLegTarget::Inventory(as_item)
        } else {
            SecondaryLegTarget::Ledger(LedgerId::from_uuid(self.item_id))
        };

        VoucherLine {
            target,
            quantity: self.quantity,
            rate: self.rate,
            amount: self.amount,
        }
    }
}

impl RawVoucher {
    /// Resolves every line and returns the typed voucher.
    pub fn resolve<F>(self, is_item: F) -> Voucher
    where
        F: Fn(ItemId) -> bool,
    {
        let voucher_type = self.voucher_type;
        let items = self
            .items
            .into_iter()
            .map(|line| line.resolve(voucher_type, &is_item))
            .collect();

        Voucher {
            id: self.id,
            voucher_type,
            date: self.date,
            reference_no: self.reference_no,
            party_ledger_id: self.party_ledger_id,
            items,
            total_amount: self.total_amount,
            narration: self.narration,
        }
    }
}
