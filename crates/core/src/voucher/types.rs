//! Voucher domain types.

use bahi_shared::types::{BalanceSide, ItemId, LedgerId, VoucherId, saturating_sum};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of business transaction a voucher records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoucherType {
    /// Sale to a debtor.
    Sales,
    /// Purchase from a creditor.
    Purchase,
    /// Money received from a party into cash/bank.
    Receipt,
    /// Money paid to a party out of cash/bank.
    Payment,
    /// Journal entry.
    Journal,
    /// Transfer between cash and bank accounts.
    Contra,
}

impl VoucherType {
    /// All voucher types.
    pub const ALL: [Self; 6] = [
        Self::Sales,
        Self::Purchase,
        Self::Receipt,
        Self::Payment,
        Self::Journal,
        Self::Contra,
    ];

    /// Sides of the primary (party) leg and the secondary (line) legs.
    ///
    /// Journal vouchers have no defined posting and return `None`.
    #[must_use]
    pub const fn leg_sides(self) -> Option<(BalanceSide, BalanceSide)> {
        match self {
            Self::Sales | Self::Payment => Some((BalanceSide::Dr, BalanceSide::Cr)),
            Self::Purchase | Self::Receipt | Self::Contra => {
                Some((BalanceSide::Cr, BalanceSide::Dr))
            }
            Self::Journal => None,
        }
    }

    /// Returns true if lines of this voucher type may reference inventory items.
    #[must_use]
    pub const fn carries_stock(self) -> bool {
        matches!(self, Self::Sales | Self::Purchase)
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sales => "Sales",
            Self::Purchase => "Purchase",
            Self::Receipt => "Receipt",
            Self::Payment => "Payment",
            Self::Journal => "Journal",
            Self::Contra => "Contra",
        }
    }
}

impl std::fmt::Display for VoucherType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for VoucherType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown voucher type: {s}"))
    }
}

/// What a voucher line points at.
///
/// Sales/Purchase lines point at a sales/purchase ledger or an inventory item.
/// Receipt/Payment/Contra lines point at the cash or bank ledger that moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum SecondaryLegTarget {
    /// A ledger account.
    Ledger(LedgerId),
    /// An inventory item.
    Inventory(ItemId),
}

/// One secondary leg of a voucher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherLine {
    /// Ledger or item the line posts to.
    pub target: SecondaryLegTarget,
    /// Quantity (zero for pure money lines).
    #[serde(default)]
    pub quantity: Decimal,
    /// Rate per unit (zero for pure money lines).
    #[serde(default)]
    pub rate: Decimal,
    /// Line amount.
    pub amount: Decimal,
}

impl VoucherLine {
    /// Creates a money line against a ledger.
    #[must_use]
    pub fn ledger(ledger_id: LedgerId, amount: Decimal) -> Self {
        Self {
            target: SecondaryLegTarget::Ledger(ledger_id),
            quantity: Decimal::ZERO,
            rate: Decimal::ZERO,
            amount,
        }
    }

    /// Creates a stock line; the amount is `quantity × rate`.
    #[must_use]
    pub fn inventory(item_id: ItemId, quantity: Decimal, rate: Decimal) -> Self {
        Self {
            target: SecondaryLegTarget::Inventory(item_id),
            quantity,
            rate,
            amount: quantity.saturating_mul(rate),
        }
    }

    /// Ledger this line posts to, if any.
    #[must_use]
    pub const fn ledger_id(&self) -> Option<LedgerId> {
        match self.target {
            SecondaryLegTarget::Ledger(id) => Some(id),
            SecondaryLegTarget::Inventory(_) => None,
        }
    }

    /// Inventory item this line moves, if any.
    #[must_use]
    pub const fn item_id(&self) -> Option<ItemId> {
        match self.target {
            SecondaryLegTarget::Inventory(id) => Some(id),
            SecondaryLegTarget::Ledger(_) => None,
        }
    }
}

/// A recorded business transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voucher {
    /// Unique identifier.
    pub id: VoucherId,
    /// Voucher type.
    #[serde(rename = "type")]
    pub voucher_type: VoucherType,
    /// Transaction date.
    pub date: NaiveDate,
    /// Reference / invoice number.
    #[serde(default)]
    pub reference_no: String,
    /// Primary leg: debtor, creditor, or transfer source.
    pub party_ledger_id: LedgerId,
    /// Secondary legs.
    #[serde(default)]
    pub items: Vec<VoucherLine>,
    /// Amount of the primary leg.
    pub total_amount: Decimal,
    /// Free-text narration.
    #[serde(default)]
    pub narration: String,
}

impl Voucher {
    /// Creates a voucher whose total is the sum of its line amounts.
    #[must_use]
    pub fn new(
        voucher_type: VoucherType,
        date: NaiveDate,
        party_ledger_id: LedgerId,
        items: Vec<VoucherLine>,
    ) -> Self {
        let total_amount = saturating_sum(items.iter().map(|line| line.amount));
        Self {
            id: VoucherId::new(),
            voucher_type,
            date,
            reference_no: String::new(),
            party_ledger_id,
            items,
            total_amount,
            narration: String::new(),
        }
    }

    /// Sets the reference number.
    #[must_use]
    pub fn with_reference(mut self, reference_no: impl Into<String>) -> Self {
        self.reference_no = reference_no.into();
        self
    }

    /// Sets the narration.
    #[must_use]
    pub fn with_narration(mut self, narration: impl Into<String>) -> Self {
        self.narration = narration.into();
        self
    }

    /// Ledgers the lines post to, in line order.
    pub fn line_ledgers(&self) -> impl Iterator<Item = LedgerId> + '_ {
        self.items.iter().filter_map(VoucherLine::ledger_id)
    }

    /// Returns true if the ledger is the party or a line target.
    #[must_use]
    pub fn involves(&self, ledger_id: LedgerId) -> bool {
        self.party_ledger_id == ledger_id || self.line_ledgers().any(|id| id == ledger_id)
    }

    /// Returns true if any line moves the item.
    #[must_use]
    pub fn moves_item(&self, item_id: ItemId) -> bool {
        self.items.iter().any(|line| line.item_id() == Some(item_id))
    }
}
