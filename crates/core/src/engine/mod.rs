//! Report entry points over one consistent snapshot of the books.

pub mod service;
pub mod types;


pub use service::ReplayEngine;
pub use types::{Books, BusinessProfile, LedgerBalanceSummary, Snapshot};
