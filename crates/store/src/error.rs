//! Store error types.

use std::path::PathBuf;

use bahi_shared::AppError;
use bahi_shared::types::LedgerId;

/// Error types for store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Ledger code already used by another ledger.
    #[error("Ledger code '{0}' already exists")]
    DuplicateCode(String),

    /// Ledger is still referenced by vouchers.
    #[error("Cannot delete ledger {ledger_id}: referenced by {vouchers} vouchers")]
    LedgerInUse {
        /// Ledger.
        ledger_id: LedgerId,
        /// Number of vouchers referencing it.
        vouchers: usize,
    },

    /// Snapshot file could not be read or written.
    #[error("Snapshot I/O error on {path}: {source}")]
    Io {
        /// Snapshot path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Snapshot file is not valid JSON for the books.
    #[error("Snapshot format error: {0}")]
    Format(#[from] serde_json::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateCode(_) | StoreError::LedgerInUse { .. } => {
                Self::Conflict(err.to_string())
            }
            StoreError::Io { .. } | StoreError::Format(_) => Self::Store(err.to_string()),
        }
    }
}
