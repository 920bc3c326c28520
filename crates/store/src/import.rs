//! Import of books whose voucher lines carry a bare `itemId`.

use std::collections::HashSet;

use bahi_core::engine::{Books, BusinessProfile};
use bahi_core::inventory::InventoryItem;
use bahi_core::ledger::Ledger;
use bahi_core::voucher::RawVoucher;
use bahi_shared::types::ItemId;
use serde::Deserialize;

use crate::error::StoreError;

/// Books as exported by the voucher-entry forms.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyBooks {
    /// Business header.
    pub profile: BusinessProfile,
    /// Chart of accounts.
    pub ledgers: Vec<Ledger>,
    /// Vouchers with unresolved lines.
    pub vouchers: Vec<RawVoucher>,
    /// Inventory master.
    pub items: Vec<InventoryItem>,
}

impl LegacyBooks {
    /// Resolves every voucher line against the item master.
    #[must_use]
    pub fn resolve(self) -> Books {
        let known: HashSet<ItemId> = self.items.iter().map(|i| i.id).collect();
        let vouchers = self
            .vouchers
            .into_iter()
            .map(|raw| raw.resolve(|id| known.contains(&id)))
            .collect();

        Books {
            profile: self.profile,
            ledgers: self.ledgers,
            vouchers,
            items: self.items,
        }
    }
}

/// Parses a snapshot in either the typed or the legacy layout.
pub fn import_books(bytes: &[u8]) -> Result<Books, StoreError> {
    match serde_json::from_slice::<Books>(bytes) {
        Ok(books) => Ok(books),
        Err(typed_err) => {
            let Ok(legacy) = serde_json::from_slice::<LegacyBooks>(bytes) else {
                return Err(typed_err.into());
            };
            tracing::info!(
                vouchers = legacy.vouchers.len(),
                "resolving legacy voucher lines"
            );
            Ok(legacy.resolve())
        }
    }
}
