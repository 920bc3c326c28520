//! Outstanding-balance aging.
//!
//! An account's outstanding balance is spread over its bills, newest bill
//! first, into four age buckets. Whatever the bills cannot absorb is treated as
//! older than 90 days.

pub mod allocation;
pub mod types;


pub use allocation::{Bill, age, allocate, collect_bills};
pub use types::{AgingBucket, AgingBuckets, AgingReport, AgingRequest, AgingRow, Perspective};
