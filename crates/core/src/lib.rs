//! Accounting replay engine for Bahi.
//!
//! This crate contains pure business logic with ZERO web or store dependencies.
//! Balances are never stored: every statement and report replays the voucher
//! journal from the ledgers' opening balances.
//!
//! # Modules
//!
//! - `chart` - Account groups, their nature and normal balance side
//! - `voucher` - Vouchers and their typed secondary legs
//! - `ledger` - Posting effects, balance replay and ledger statements
//! - `aging` - Receivable/payable aging buckets
//! - `reports` - Trial balance, profit & loss and balance sheet
//! - `inventory` - Items and stock statements
//! - `engine` - Entry points over one snapshot of the books

pub mod aging;
pub mod chart;
pub mod engine;
pub mod inventory;
pub mod ledger;
pub mod period;
pub mod reports;
pub mod voucher;
