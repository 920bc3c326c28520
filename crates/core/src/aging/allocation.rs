//! Most-recent-bill-first allocation of an outstanding balance.

use bahi_shared::types::{LedgerId, VoucherId, saturating_sum};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{AgingBucket, AgingBuckets, Perspective};
use crate::voucher::Voucher;

/// A bill that can absorb part of an outstanding balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    /// Source voucher.
    pub voucher_id: VoucherId,
    /// Bill date.
    pub date: NaiveDate,
    /// Bill amount.
    pub amount: Decimal,
}

/// Bills raised against `account_id` on or before `as_of`, newest first.
///
/// The party leg is billed at the voucher total; a line leg at the sum of the
/// account's line amounts. Bills of the same date keep their input order.
pub fn collect_bills(
    vouchers: &[Voucher],
    account_id: LedgerId,
    as_of: NaiveDate,
    perspective: Perspective,
) -> Vec<Bill> {
    let bill_types = perspective.bill_types();
    let mut bills: Vec<Bill> = vouchers
        .iter()
        .filter(|v| v.date <= as_of && bill_types.contains(&v.voucher_type))
        .filter_map(|v| {
            let amount = if v.party_ledger_id == account_id {
                v.total_amount
            } else {
                saturating_sum(
                    v.items
                        .iter()
                        .filter(|line| line.ledger_id() == Some(account_id))
                        .map(|line| line.amount),
                )
            };
            (amount > Decimal::ZERO).then_some(Bill {
                voucher_id: v.id,
                date: v.date,
                amount,
            })
        })
        .collect();

    bills.sort_by(|a, b| b.date.cmp(&a.date));
    bills
}

/// Spreads `outstanding` over `bills` in the given order.
///
/// Each bill absorbs at most its own amount into the bucket of its age; the
/// residue lands in the oldest bucket.
pub fn allocate(outstanding: Decimal, bills: &[Bill], as_of: NaiveDate) -> AgingBuckets {
    let mut buckets = AgingBuckets::default();
    let mut remaining = outstanding;

    for bill in bills {
        if remaining <= Decimal::ZERO {
            break;
        }
        let taken = remaining.min(bill.amount);
        let days = (as_of - bill.date).num_days();
        buckets.add(AgingBucket::for_days(days), taken);
        remaining -= taken;
    }

    if remaining > Decimal::ZERO {
        buckets.add(AgingBucket::Over90, remaining);
    }
    buckets
}

/// Ages an account's closing balance.
///
/// Returns `None` when nothing is outstanding from this perspective.
pub fn age(
    closing_balance: Decimal,
    vouchers: &[Voucher],
    account_id: LedgerId,
    as_of: NaiveDate,
    perspective: Perspective,
) -> Option<AgingBuckets> {
    let outstanding = perspective.outstanding(closing_balance);
    if outstanding <= Decimal::ZERO {
        return None;
    }

    let bills = collect_bills(vouchers, account_id, as_of, perspective);
    Some(allocate(outstanding, &bills, as_of))
}
