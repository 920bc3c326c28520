//! Vouchers: the append-only journal the engine replays.
//!
//! A voucher stores one primary leg (the party ledger) and one or more
//! secondary legs (its lines). Its debit/credit effect is never stored; the
//! resolver in [`crate::ledger::effect`] derives it at read time.

pub mod raw;
pub mod types;

pub use raw::{RawVoucher, RawVoucherLine};
pub use types::{SecondaryLegTarget, Voucher, VoucherLine, VoucherType};
