//! JSON snapshot file store.
//!
//! Reads and writes go to a [`MemoryStore`]. The whole book set is written
//! back to disk as one JSON document, either after every mutation or when
//! [`JsonFileStore::flush`] is called.

use std::path::{Path, PathBuf};

use bahi_core::engine::{Books, BusinessProfile};
use bahi_core::inventory::InventoryItem;
use bahi_core::ledger::Ledger;
use bahi_core::voucher::Voucher;
use bahi_shared::config::StoreConfig;
use bahi_shared::types::{ItemId, LedgerId, VoucherId};
use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::import::import_books;
use crate::memory::MemoryStore;
use crate::repository::DocumentStore;

/// Memory store backed by an optional JSON snapshot file.
#[derive(Debug)]
pub struct JsonFileStore {
    inner: MemoryStore,
    path: Option<PathBuf>,
    persist_on_write: bool,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Opens the store described by `config`.
    ///
    /// A missing snapshot file starts empty books; the file is created on the
    /// first write. Without a path the store never touches the disk.
    pub async fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        let books = match &config.snapshot_path {
            Some(path) => load(path).await?,
            None => Books::default(),
        };

        tracing::info!(
            path = ?config.snapshot_path,
            ledgers = books.ledgers.len(),
            vouchers = books.vouchers.len(),
            items = books.items.len(),
            "opened document store"
        );

        Ok(Self {
            inner: MemoryStore::with_books(books),
            path: config.snapshot_path.clone(),
            persist_on_write: config.persist_on_write,
            write_lock: Mutex::new(()),
        })
    }

    /// Snapshot file path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Writes the current books to the snapshot file.
    ///
    /// The file is replaced atomically through a sibling temp file.
    pub async fn flush(&self) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let _guard = self.write_lock.lock().await;
        let books = self.inner.snapshot().await?;
        let bytes = serde_json::to_vec_pretty(&books)?;

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|source| io_error(dir, source))?;
        }
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|source| io_error(&tmp, source))?;
        tokio::fs::rename(&tmp, path)
            .await
            .map_err(|source| io_error(path, source))?;

        tracing::debug!(path = %path.display(), bytes = bytes.len(), "persisted snapshot");
        Ok(())
    }

    /// Swaps in a whole book set, persisting it when configured to.
    pub async fn replace(&self, books: Books) -> Result<(), StoreError> {
        self.inner.replace(books).await;
        self.after_write().await
    }

    async fn after_write(&self) -> Result<(), StoreError> {
        if self.persist_on_write {
            self.flush().await?;
        }
        Ok(())
    }
}

async fn load(path: &Path) -> Result<Books, StoreError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => import_books(&bytes),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "snapshot file not found, starting empty");
            Ok(Books::default())
        }
        Err(source) => Err(io_error(path, source)),
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl DocumentStore for JsonFileStore {
    async fn get_all_ledgers(&self) -> Result<Vec<Ledger>, StoreError> {
        self.inner.get_all_ledgers().await
    }

    async fn save_ledger(&self, ledger: Ledger) -> Result<Ledger, StoreError> {
        let saved = self.inner.save_ledger(ledger).await?;
        self.after_write().await?;
        Ok(saved)
    }

    async fn delete_ledger(&self, id: LedgerId) -> Result<bool, StoreError> {
        let removed = self.inner.delete_ledger(id).await?;
        if removed {
            self.after_write().await?;
        }
        Ok(removed)
    }

    async fn get_all_vouchers(&self) -> Result<Vec<Voucher>, StoreError> {
        self.inner.get_all_vouchers().await
    }

    async fn save_voucher(&self, voucher: Voucher) -> Result<Voucher, StoreError> {
        let saved = self.inner.save_voucher(voucher).await?;
        self.after_write().await?;
        Ok(saved)
    }

    async fn delete_voucher(&self, id: VoucherId) -> Result<bool, StoreError> {
        let removed = self.inner.delete_voucher(id).await?;
        if removed {
            self.after_write().await?;
        }
        Ok(removed)
    }

    async fn get_all_items(&self) -> Result<Vec<InventoryItem>, StoreError> {
        self.inner.get_all_items().await
    }

    async fn save_item(&self, item: InventoryItem) -> Result<InventoryItem, StoreError> {
        let saved = self.inner.save_item(item).await?;
        self.after_write().await?;
        Ok(saved)
    }

    async fn delete_item(&self, id: ItemId) -> Result<bool, StoreError> {
        let removed = self.inner.delete_item(id).await?;
        if removed {
            self.after_write().await?;
        }
        Ok(removed)
    }

    async fn get_business_profile(&self) -> Result<BusinessProfile, StoreError> {
        self.inner.get_business_profile().await
    }

    async fn save_business_profile(
        &self,
        profile: BusinessProfile,
    ) -> Result<BusinessProfile, StoreError> {
        let saved = self.inner.save_business_profile(profile).await?;
        self.after_write().await?;
        Ok(saved)
    }

    async fn snapshot(&self) -> Result<Books, StoreError> {
        self.inner.snapshot().await
    }
}
