//! Document store for Bahi.
//!
//! This crate provides:
//! - The [`DocumentStore`] abstraction the HTTP layer reads and writes through
//! - An in-memory store with snapshot-consistent reads
//! - A JSON snapshot file store layered on top of it
//! - Import of voucher documents with unresolved line targets

pub mod error;
pub mod import;
pub mod json_file;
pub mod memory;
pub mod repository;

pub use error::StoreError;
pub use import::{LegacyBooks, import_books};
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use repository::DocumentStore;
