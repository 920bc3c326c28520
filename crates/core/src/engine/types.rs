//! Engine input and summary types.

use bahi_shared::types::{DrCrAmount, LedgerId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::chart::AccountGroup;
use crate::inventory::InventoryItem;
use crate::ledger::Ledger;
use crate::voucher::Voucher;

/// Business header printed on statements and reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessProfile {
    /// Registered business name.
    pub company_name: String,
    /// Postal address.
    pub address: String,
    /// State, used for GST place of supply.
    pub state: String,
    /// GSTIN of the business.
    pub gstin: String,
    /// Contact phone.
    pub phone: String,
    /// Contact email.
    pub email: String,
}

/// Every document the engine reads, owned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Books {
    /// Business header.
    pub profile: BusinessProfile,
    /// Chart of accounts.
    pub ledgers: Vec<Ledger>,
    /// Voucher journal in entry order.
    pub vouchers: Vec<Voucher>,
    /// Inventory master.
    pub items: Vec<InventoryItem>,
}

impl Books {
    /// Borrows the three collections.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            ledgers: &self.ledgers,
            vouchers: &self.vouchers,
            items: &self.items,
        }
    }
}

/// Borrowed view of the ledgers, vouchers and items taken at one instant.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    /// Chart of accounts.
    pub ledgers: &'a [Ledger],
    /// Voucher journal.
    pub vouchers: &'a [Voucher],
    /// Inventory master.
    pub items: &'a [InventoryItem],
}

/// Closing balance of one ledger for the ledger list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerBalanceSummary {
    /// Ledger.
    pub ledger_id: LedgerId,
    /// Ledger code.
    pub code: String,
    /// Ledger name.
    pub name: String,
    /// Ledger group.
    pub group: AccountGroup,
    /// Signed balance.
    pub balance: Decimal,
    /// Balance with its Dr/Cr label.
    pub label: DrCrAmount,
}
