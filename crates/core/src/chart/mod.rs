//! Chart of accounts classification.
//!
//! Maps a ledger's group label to its accounting nature and normal balance
//! side. Groups outside the fixed enumeration are kept as
//! [`AccountGroup::Unclassified`] and skipped by every aggregation.

pub mod group;

pub use group::{AccountGroup, Nature};
