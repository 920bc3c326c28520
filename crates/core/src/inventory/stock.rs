//! Stock ledger replay: the quantity-domain sibling of the ledger statement.

use bahi_shared::types::{ItemId, LedgerId, VoucherId, saturating_sum};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::InventoryItem;
use crate::ledger::{ordered, stock_effect};
use crate::period::DateRange;
use crate::reports::ReportError;
use crate::voucher::{Voucher, VoucherType};

/// Where the opening quantity of a stock statement comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningStock {
    /// The live master-stock figure, regardless of the period start.
    ///
    /// This is an approximation: it is only a true opening when no stock
    /// moved on or after the period start.
    #[default]
    Live,
    /// Live stock with every movement dated on or after the period start
    /// backed out.
    Reconstructed,
}

impl std::str::FromStr for OpeningStock {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "live" => Ok(Self::Live),
            "reconstructed" => Ok(Self::Reconstructed),
            _ => Err(ReportError::UnknownOpeningStock(s.to_string())),
        }
    }
}

/// One voucher moving the item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLine {
    /// Source voucher.
    pub voucher_id: VoucherId,
    /// Voucher date.
    pub date: NaiveDate,
    /// Voucher type.
    pub voucher_type: VoucherType,
    /// Reference number.
    pub reference_no: String,
    /// Party name, or the voucher type when unknown.
    pub particulars: String,
    /// Quantity received.
    pub inward: Decimal,
    /// Quantity issued.
    pub outward: Decimal,
    /// Quantity on hand after this voucher.
    pub balance: Decimal,
}

/// Stock movement of one item over one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockStatement {
    /// Item.
    pub item_id: ItemId,
    /// Item name.
    pub name: String,
    /// SKU.
    pub sku: String,
    /// Unit of measure.
    pub unit: String,
    /// Statement window.
    pub period: DateRange,
    /// How the opening quantity was derived.
    pub opening_basis: OpeningStock,
    /// Opening quantity.
    pub opening_quantity: Decimal,
    /// Movements in date order.
    pub lines: Vec<StockLine>,
    /// Total received.
    pub total_inward: Decimal,
    /// Total issued.
    pub total_outward: Decimal,
    /// Closing quantity.
    pub closing_quantity: Decimal,
}

/// Builds the stock statement of `item` over `period`.
pub fn stock_statement<'n, N>(
    item: &InventoryItem,
    vouchers: &[Voucher],
    period: DateRange,
    opening_basis: OpeningStock,
    name_of: N,
) -> StockStatement
where
    N: Fn(LedgerId) -> Option<&'n str>,
{
    let live = item.total_quantity();
    let opening_quantity = match opening_basis {
        OpeningStock::Live => live,
        OpeningStock::Reconstructed => {
            let moved_since = saturating_sum(
                vouchers
                    .iter()
                    .filter(|v| v.date >= period.start)
                    .map(|v| stock_effect(v, item.id)),
            );
            live.saturating_sub(moved_since)
        }
    };

    let mut balance = opening_quantity;
    let mut total_inward = Decimal::ZERO;
    let mut total_outward = Decimal::ZERO;
    let mut lines = Vec::new();

    for voucher in ordered(vouchers, |v| period.contains(v.date) && v.moves_item(item.id)) {
        let change = stock_effect(voucher, item.id);
        let (inward, outward) = match voucher.voucher_type {
            VoucherType::Purchase => (change, Decimal::ZERO),
            VoucherType::Sales => (Decimal::ZERO, -change),
            _ => continue,
        };

        total_inward = total_inward.saturating_add(inward);
        total_outward = total_outward.saturating_add(outward);
        balance = balance.saturating_add(change);

        lines.push(StockLine {
            voucher_id: voucher.id,
            date: voucher.date,
            voucher_type: voucher.voucher_type,
            reference_no: voucher.reference_no.clone(),
            particulars: name_of(voucher.party_ledger_id)
                .map_or_else(|| voucher.voucher_type.label().to_string(), str::to_string),
            inward,
            outward,
            balance,
        });
    }

    StockStatement {
        item_id: item.id,
        name: item.name.clone(),
        sku: item.sku.clone(),
        unit: item.unit.clone(),
        period,
        opening_basis,
        opening_quantity,
        lines,
        total_inward,
        total_outward,
        closing_quantity: balance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voucher::VoucherLine;
    use bahi_shared::types::GodownId;
    use chrono::Days;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, day).unwrap()
    }

    fn movement(voucher_type: VoucherType, date: NaiveDate, item: ItemId, qty: Decimal) -> Voucher {
        Voucher::new(
            voucher_type,
            date,
            LedgerId::new(),
            vec![VoucherLine::inventory(item, qty, dec!(10))],
        )
    }

    #[test]
    fn test_live_opening_and_running_balance() {
        let item = InventoryItem::new("Widget", "pcs", dec!(10)).with_stock(GodownId::new(), dec!(50));
        let vouchers = vec![
            movement(VoucherType::Sales, d(9), item.id, dec!(5)),
            movement(VoucherType::Purchase, d(3), item.id, dec!(20)),
            movement(VoucherType::Purchase, d(25), item.id, dec!(99)),
        ];

        let st = stock_statement(&item, &vouchers, DateRange::new(d(1), d(15)), OpeningStock::Live, |_| None);

        assert_eq!(st.opening_quantity, dec!(50));
        assert_eq!(st.lines.len(), 2);
        assert_eq!(st.lines[0].inward, dec!(20));
        assert_eq!(st.lines[0].balance, dec!(70));
        assert_eq!(st.lines[1].outward, dec!(5));
        assert_eq!(st.lines[1].balance, dec!(65));
        assert_eq!(st.lines[1].particulars, "Sales");
        assert_eq!(st.total_inward, dec!(20));
        assert_eq!(st.total_outward, dec!(5));
        assert_eq!(st.closing_quantity, dec!(65));
    }

    #[test]
    fn test_reconstructed_opening_backs_out_later_movements() {
        // Live stock 114 already reflects every voucher below.
        let item = InventoryItem::new("Widget", "pcs", dec!(10)).with_stock(GodownId::new(), dec!(114));
        let vouchers = vec![
            movement(VoucherType::Purchase, d(3), item.id, dec!(20)),
            movement(VoucherType::Sales, d(9), item.id, dec!(5)),
            movement(VoucherType::Purchase, d(25), item.id, dec!(99)),
        ];

        let st = stock_statement(
            &item,
            &vouchers,
            DateRange::new(d(1), d(15)),
            OpeningStock::Reconstructed,
            |_| None,
        );

        assert_eq!(st.opening_quantity, dec!(0));
        assert_eq!(st.closing_quantity, dec!(15));
        assert_eq!(st.opening_basis, OpeningStock::Reconstructed);
    }

    #[test]
    fn test_other_items_and_money_vouchers_are_ignored() {
        let item = InventoryItem::new("Widget", "pcs", dec!(10));
        let mut receipt = Voucher::new(
            VoucherType::Receipt,
            d(2),
            LedgerId::new(),
            vec![VoucherLine::ledger(LedgerId::new(), dec!(100))],
        );
        receipt.narration = "cash".into();
        let vouchers = vec![
            receipt,
            movement(VoucherType::Sales, d(4), ItemId::new(), dec!(3)),
        ];

        let st = stock_statement(
            &item,
            &vouchers,
            DateRange::new(d(1), d(1) + Days::new(30)),
            OpeningStock::Live,
            |_| None,
        );
        assert!(st.lines.is_empty());
        assert_eq!(st.closing_quantity, st.opening_quantity);
    }

    #[test]
    fn test_opening_stock_from_str() {
        assert_eq!(OpeningStock::from_str("LIVE").unwrap(), OpeningStock::Live);
        assert_eq!(
            OpeningStock::from_str("reconstructed").unwrap(),
            OpeningStock::Reconstructed
        );
        assert!(OpeningStock::from_str("fifo").is_err());
    }
}
