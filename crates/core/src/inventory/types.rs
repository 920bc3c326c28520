//! Inventory item documents.

use std::collections::BTreeMap;

use bahi_shared::types::{GodownId, ItemId, saturating_sum};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Godown that receives movements for an item with no stock locations yet.
pub const MAIN_GODOWN: GodownId = GodownId::from_uuid(Uuid::nil());

/// A stocked item with per-godown quantities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    /// Unique identifier.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Stock keeping unit.
    #[serde(default)]
    pub sku: String,
    /// Unit of measure.
    #[serde(default)]
    pub unit: String,
    /// Purchase price per unit, used for closing stock valuation.
    #[serde(default)]
    pub purchase_price: Decimal,
    /// Quantity on hand per godown.
    #[serde(default)]
    pub stock: BTreeMap<GodownId, Decimal>,
}

impl InventoryItem {
    /// Creates an item with no stock.
    #[must_use]
    pub fn new(name: impl Into<String>, unit: impl Into<String>, purchase_price: Decimal) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            sku: String::new(),
            unit: unit.into(),
            purchase_price,
            stock: BTreeMap::new(),
        }
    }

    /// Sets the quantity held in one godown.
    #[must_use]
    pub fn with_stock(mut self, godown: GodownId, quantity: Decimal) -> Self {
        self.stock.insert(godown, quantity);
        self
    }

    /// Godown that voucher movements land in: the lowest-keyed godown the
    /// item already has, or [`MAIN_GODOWN`].
    #[must_use]
    pub fn primary_godown(&self) -> GodownId {
        self.stock.keys().next().copied().unwrap_or(MAIN_GODOWN)
    }

    /// Adds a signed quantity to the primary godown.
    pub fn adjust_stock(&mut self, quantity: Decimal) {
        let godown = self.primary_godown();
        let held = self.stock.entry(godown).or_default();
        *held = held.saturating_add(quantity);
    }

    /// Quantity across all godowns.
    #[must_use]
    pub fn total_quantity(&self) -> Decimal {
        saturating_sum(self.stock.values().copied())
    }

    /// Value of stock on hand at purchase price.
    #[must_use]
    pub fn stock_value(&self) -> Decimal {
        self.total_quantity().saturating_mul(self.purchase_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_stock_value_sums_godowns() {
        let item = InventoryItem::new("Steel Rod 12mm", "kg", dec!(62.50))
            .with_stock(GodownId::new(), dec!(100))
            .with_stock(GodownId::new(), dec!(40));
        assert_eq!(item.total_quantity(), dec!(140));
        assert_eq!(item.stock_value(), dec!(8750.00));
    }

    #[test]
    fn test_stock_value_saturates() {
        let item = InventoryItem::new("Gold Bar", "pcs", Decimal::MAX)
            .with_stock(GodownId::new(), Decimal::MAX)
            .with_stock(GodownId::new(), dec!(2));
        assert_eq!(item.total_quantity(), Decimal::MAX);
        assert_eq!(item.stock_value(), Decimal::MAX);
    }

    #[test]
    fn test_adjust_stock_uses_primary_godown() {
        let mut empty = InventoryItem::new("Cement", "bag", dec!(380));
        empty.adjust_stock(dec!(-4));
        assert_eq!(empty.stock.get(&MAIN_GODOWN), Some(&dec!(-4)));

        let low = GodownId::from_uuid(Uuid::from_u128(1));
        let high = GodownId::from_uuid(Uuid::from_u128(2));
        let mut item = InventoryItem::new("Steel Rod 12mm", "kg", dec!(62.50))
            .with_stock(high, dec!(10))
            .with_stock(low, dec!(5));
        item.adjust_stock(dec!(20));
        assert_eq!(item.stock[&low], dec!(25));
        assert_eq!(item.stock[&high], dec!(10));
    }

    #[test]
    fn test_item_without_stock_is_worth_nothing() {
        let item = InventoryItem::new("Cement", "bag", dec!(380));
        assert_eq!(item.stock_value(), Decimal::ZERO);
    }

    #[test]
    fn test_stock_map_serializes_with_godown_keys() {
        let godown = GodownId::new();
        let item = InventoryItem::new("Cement", "bag", dec!(380)).with_stock(godown, dec!(5));
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["stock"][godown.to_string()], "5");
        let back: InventoryItem = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
    }
}
