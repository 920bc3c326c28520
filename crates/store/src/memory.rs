//! In-memory document store.

use bahi_core::engine::{Books, BusinessProfile};
use bahi_core::inventory::{InventoryItem, post_movements, reverse_movements};
use bahi_core::ledger::Ledger;
use bahi_core::voucher::Voucher;
use bahi_shared::types::{ItemId, LedgerId, VoucherId};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::repository::DocumentStore;

/// Store holding every collection behind one lock, so a snapshot never mixes
/// collections from before and after a write.
#[derive(Debug, Default)]
pub struct MemoryStore {
    books: RwLock<Books>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `books`.
    #[must_use]
    pub fn with_books(books: Books) -> Self {
        Self {
            books: RwLock::new(books),
        }
    }

    /// Replaces everything held by the store.
    pub async fn replace(&self, books: Books) {
        *self.books.write().await = books;
    }
}

fn upsert<T, F>(collection: &mut Vec<T>, doc: T, same: F)
where
    F: Fn(&T) -> bool,
{
    match collection.iter().position(|existing| same(existing)) {
        Some(index) => collection[index] = doc,
        None => collection.push(doc),
    }
}

fn remove<T, F>(collection: &mut Vec<T>, same: F) -> bool
where
    F: Fn(&T) -> bool,
{
    let before = collection.len();
    collection.retain(|doc| !same(doc));
    collection.len() != before
}

impl DocumentStore for MemoryStore {
    async fn get_all_ledgers(&self) -> Result<Vec<Ledger>, StoreError> {
        Ok(self.books.read().await.ledgers.clone())
    }

    async fn save_ledger(&self, ledger: Ledger) -> Result<Ledger, StoreError> {
        let mut books = self.books.write().await;
        let code_taken = !ledger.code.is_empty()
            && books
                .ledgers
                .iter()
                .any(|l| l.id != ledger.id && l.code.eq_ignore_ascii_case(&ledger.code));
        if code_taken {
            return Err(StoreError::DuplicateCode(ledger.code));
        }

        let id = ledger.id;
        upsert(&mut books.ledgers, ledger.clone(), |l| l.id == id);
        tracing::debug!(ledger_id = %id, code = %ledger.code, "saved ledger");
        Ok(ledger)
    }

    async fn delete_ledger(&self, id: LedgerId) -> Result<bool, StoreError> {
        let mut books = self.books.write().await;
        let vouchers = books.vouchers.iter().filter(|v| v.involves(id)).count();
        if vouchers > 0 {
            return Err(StoreError::LedgerInUse {
                ledger_id: id,
                vouchers,
            });
        }

        let removed = remove(&mut books.ledgers, |l| l.id == id);
        tracing::debug!(ledger_id = %id, removed, "deleted ledger");
        Ok(removed)
    }

    async fn get_all_vouchers(&self) -> Result<Vec<Voucher>, StoreError> {
        Ok(self.books.read().await.vouchers.clone())
    }

    async fn save_voucher(&self, voucher: Voucher) -> Result<Voucher, StoreError> {
        let mut guard = self.books.write().await;
        let books = &mut *guard;
        let id = voucher.id;

        if let Some(previous) = books.vouchers.iter().find(|v| v.id == id) {
            reverse_movements(&mut books.items, previous);
        }
        post_movements(&mut books.items, &voucher);
        upsert(&mut books.vouchers, voucher.clone(), |v| v.id == id);

        tracing::debug!(voucher_id = %id, voucher_type = %voucher.voucher_type, "saved voucher");
        Ok(voucher)
    }

    async fn delete_voucher(&self, id: VoucherId) -> Result<bool, StoreError> {
        let mut guard = self.books.write().await;
        let books = &mut *guard;

        let Some(index) = books.vouchers.iter().position(|v| v.id == id) else {
            tracing::debug!(voucher_id = %id, removed = false, "deleted voucher");
            return Ok(false);
        };
        let voucher = books.vouchers.remove(index);
        reverse_movements(&mut books.items, &voucher);

        tracing::debug!(voucher_id = %id, removed = true, "deleted voucher");
        Ok(true)
    }

    async fn get_all_items(&self) -> Result<Vec<InventoryItem>, StoreError> {
        Ok(self.books.read().await.items.clone())
    }

    async fn save_item(&self, item: InventoryItem) -> Result<InventoryItem, StoreError> {
        let id = item.id;
        upsert(&mut self.books.write().await.items, item.clone(), |i| i.id == id);
        tracing::debug!(item_id = %id, "saved item");
        Ok(item)
    }

    async fn delete_item(&self, id: ItemId) -> Result<bool, StoreError> {
        let removed = remove(&mut self.books.write().await.items, |i| i.id == id);
        tracing::debug!(item_id = %id, removed, "deleted item");
        Ok(removed)
    }

    async fn get_business_profile(&self) -> Result<BusinessProfile, StoreError> {
        Ok(self.books.read().await.profile.clone())
    }

    async fn save_business_profile(
        &self,
        profile: BusinessProfile,
    ) -> Result<BusinessProfile, StoreError> {
        self.books.write().await.profile = profile.clone();
        Ok(profile)
    }

    async fn snapshot(&self) -> Result<Books, StoreError> {
        Ok(self.books.read().await.clone())
    }
}
