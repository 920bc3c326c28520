//! Ledgers and balance replay.
//!
//! This module implements the money side of the replay engine:
//! - Ledger (account) documents
//! - Voucher effect resolution (signed debit/credit effect per account)
//! - Balance replay over a date-ordered voucher sequence
//! - Bounded-period ledger statements

pub mod balance;
pub mod effect;
pub mod statement;
pub mod types;

#[cfg(test)]
mod statement_props;

pub use balance::{Cutoff, RunningBalance, TrailEntry, ordered, replay, trail};
pub use effect::{effect, stock_effect};
pub use statement::{LedgerStatement, StatementLine, statement};
pub use types::{Ledger, PortalCredentials};
