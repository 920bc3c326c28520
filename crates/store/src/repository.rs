//! Store abstraction.

use std::future::Future;

use bahi_core::engine::{Books, BusinessProfile};
use bahi_core::inventory::InventoryItem;
use bahi_core::ledger::Ledger;
use bahi_core::voucher::Voucher;
use bahi_shared::types::{ItemId, LedgerId, VoucherId};

use crate::error::StoreError;

/// Persistence for ledgers, vouchers, inventory items and the business profile.
///
/// Every read returns complete collections. Filtering happens in the replay
/// engine, never in the store.
pub trait DocumentStore: Send + Sync {
    /// All ledgers in insertion order.
    fn get_all_ledgers(&self) -> impl Future<Output = Result<Vec<Ledger>, StoreError>> + Send;

    /// Inserts or replaces a ledger by id.
    ///
    /// Fails if another ledger already uses the same code.
    fn save_ledger(&self, ledger: Ledger) -> impl Future<Output = Result<Ledger, StoreError>> + Send;

    /// Removes a ledger. Returns false if it did not exist.
    fn delete_ledger(&self, id: LedgerId) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// All vouchers in insertion order.
    fn get_all_vouchers(&self) -> impl Future<Output = Result<Vec<Voucher>, StoreError>> + Send;

    /// Inserts or replaces a voucher by id.
    fn save_voucher(
        &self,
        voucher: Voucher,
    ) -> impl Future<Output = Result<Voucher, StoreError>> + Send;

    /// Hard-deletes a voucher. Returns false if it did not exist.
    fn delete_voucher(&self, id: VoucherId)
    -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// All inventory items.
    fn get_all_items(&self) -> impl Future<Output = Result<Vec<InventoryItem>, StoreError>> + Send;

    /// Inserts or replaces an inventory item by id.
    fn save_item(
        &self,
        item: InventoryItem,
    ) -> impl Future<Output = Result<InventoryItem, StoreError>> + Send;

    /// Removes an inventory item. Returns false if it did not exist.
    fn delete_item(&self, id: ItemId) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Business header.
    fn get_business_profile(
        &self,
    ) -> impl Future<Output = Result<BusinessProfile, StoreError>> + Send;

    /// Replaces the business header.
    fn save_business_profile(
        &self,
        profile: BusinessProfile,
    ) -> impl Future<Output = Result<BusinessProfile, StoreError>> + Send;

    /// Every collection from one consistent read.
    fn snapshot(&self) -> impl Future<Output = Result<Books, StoreError>> + Send;
}
