//! Balance replay.
//!
//! Balances are never stored. Every query seeds the ledger's opening balance
//! and folds voucher effects over the full history in ascending date order.
//! Vouchers sharing a date keep their input order (stable sort).

use bahi_shared::types::{BalanceSide, LedgerId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::effect::effect;
use crate::voucher::Voucher;

/// Which vouchers a replay folds in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "date", rename_all = "snake_case")]
pub enum Cutoff {
    /// Vouchers dated on or before the date (balance "as of").
    OnOrBefore(NaiveDate),
    /// Vouchers dated strictly before the date (opening of a period).
    Before(NaiveDate),
    /// Every voucher.
    Unbounded,
}

impl Cutoff {
    /// Returns true if a voucher on this date is folded in.
    #[must_use]
    pub fn admits(self, date: NaiveDate) -> bool {
        match self {
            Self::OnOrBefore(limit) => date <= limit,
            Self::Before(limit) => date < limit,
            Self::Unbounded => true,
        }
    }
}

/// Running balance around one replayed voucher.
///
/// - `sequence`: position in the replay, 0 for the opening seed
/// - `previous_balance`: balance before this voucher
/// - `current_balance`: balance after this voucher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningBalance {
    /// Position in the replay (0 = opening).
    pub sequence: usize,
    /// Balance before this step.
    pub previous_balance: Decimal,
    /// Balance after this step.
    pub current_balance: Decimal,
}

impl RunningBalance {
    /// The seed of a replay.
    #[must_use]
    pub fn opening(balance: Decimal) -> Self {
        Self {
            sequence: 0,
            previous_balance: balance,
            current_balance: balance,
        }
    }

    /// The step after `previous`.
    ///
    /// current_balance[N] = current_balance[N-1] + change
    #[must_use]
    pub fn next_entry(previous: &Self, balance_change: Decimal) -> Self {
        Self {
            sequence: previous.sequence + 1,
            previous_balance: previous.current_balance,
            current_balance: previous.current_balance.saturating_add(balance_change),
        }
    }
}

/// One voucher in a replay trail.
#[derive(Debug, Clone, Copy)]
pub struct TrailEntry<'a> {
    /// The voucher.
    pub voucher: &'a Voucher,
    /// Its signed effect on the account.
    pub effect: Decimal,
    /// Running balance around it.
    pub balance: RunningBalance,
}

/// Vouchers accepted by `keep`, sorted ascending by date. Ties keep input order.
pub fn ordered<'a, F>(vouchers: &'a [Voucher], keep: F) -> Vec<&'a Voucher>
where
    F: Fn(&Voucher) -> bool,
{
    let mut selected: Vec<&Voucher> = vouchers.iter().filter(|&v| keep(v)).collect();
    selected.sort_by_key(|v| v.date);
    selected
}

/// Replays an account's balance.
///
/// Seeds `+opening_amount` for Dr and `-opening_amount` for Cr, then adds the
/// effect of every voucher admitted by `cutoff`.
#[must_use]
pub fn replay(
    account_id: LedgerId,
    opening_amount: Decimal,
    opening_side: BalanceSide,
    vouchers: &[Voucher],
    cutoff: Cutoff,
) -> Decimal {
    ordered(vouchers, |v| cutoff.admits(v.date))
        .into_iter()
        .fold(opening_side.signed(opening_amount), |balance, v| {
            balance.saturating_add(effect(v, account_id))
        })
}

/// Replays an account and keeps every step, starting from a signed opening.
pub fn trail<'a, F>(
    account_id: LedgerId,
    opening: Decimal,
    vouchers: &'a [Voucher],
    keep: F,
) -> Vec<TrailEntry<'a>>
where
    F: Fn(&Voucher) -> bool,
{
    let mut running = RunningBalance::opening(opening);
    ordered(vouchers, keep)
        .into_iter()
        .map(|voucher| {
            let change = effect(voucher, account_id);
            running = RunningBalance::next_entry(&running, change);
            TrailEntry {
                voucher,
                effect: change,
                balance: running,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voucher::{VoucherLine, VoucherType};
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn sale(party: LedgerId, date: NaiveDate, amount: Decimal) -> Voucher {
        let mut v = Voucher::new(VoucherType::Sales, date, party, vec![]);
        v.total_amount = amount;
        v
    }

    fn receipt(party: LedgerId, cash: LedgerId, date: NaiveDate, amount: Decimal) -> Voucher {
        Voucher::new(
            VoucherType::Receipt,
            date,
            party,
            vec![VoucherLine::ledger(cash, amount)],
        )
    }

    #[test]
    fn test_cutoff_admits() {
        assert!(Cutoff::OnOrBefore(day(10)).admits(day(10)));
        assert!(!Cutoff::OnOrBefore(day(10)).admits(day(11)));
        assert!(!Cutoff::Before(day(10)).admits(day(10)));
        assert!(Cutoff::Before(day(10)).admits(day(9)));
        assert!(Cutoff::Unbounded.admits(day(30)));
    }

    #[test]
    fn test_replay_seeds_opening_side() {
        let acct = LedgerId::new();
        assert_eq!(
            replay(acct, dec!(1000), BalanceSide::Dr, &[], Cutoff::Unbounded),
            dec!(1000)
        );
        assert_eq!(
            replay(acct, dec!(1000), BalanceSide::Cr, &[], Cutoff::Unbounded),
            dec!(-1000)
        );
    }

    #[test]
    fn test_replay_respects_cutoff() {
        let acme = LedgerId::new();
        let cash = LedgerId::new();
        let vouchers = vec![
            receipt(acme, cash, day(11), dec!(3000)),
            sale(acme, day(1), dec!(5000)),
        ];

        let before = replay(acme, dec!(1000), BalanceSide::Dr, &vouchers, Cutoff::Before(day(1)));
        assert_eq!(before, dec!(1000));

        let mid = replay(acme, dec!(1000), BalanceSide::Dr, &vouchers, Cutoff::OnOrBefore(day(5)));
        assert_eq!(mid, dec!(6000));

        let end = replay(acme, dec!(1000), BalanceSide::Dr, &vouchers, Cutoff::Unbounded);
        assert_eq!(end, dec!(3000));
    }

    #[test]
    fn test_ordered_is_stable_on_ties() {
        let acme = LedgerId::new();
        let first = sale(acme, day(3), dec!(1)).with_reference("first");
        let second = sale(acme, day(3), dec!(2)).with_reference("second");
        let earlier = sale(acme, day(2), dec!(3)).with_reference("earlier");
        let vouchers = vec![first, second, earlier];

        let refs: Vec<&str> = ordered(&vouchers, |_| true)
            .iter()
            .map(|v| v.reference_no.as_str())
            .collect();
        assert_eq!(refs, vec!["earlier", "first", "second"]);
    }

    #[test]
    fn test_trail_tracks_previous_and_current() {
        let acme = LedgerId::new();
        let cash = LedgerId::new();
        let vouchers = vec![
            sale(acme, day(1), dec!(5000)),
            receipt(acme, cash, day(11), dec!(3000)),
        ];

        let steps = trail(acme, dec!(1000), &vouchers, |_| true);
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].balance.sequence, 1);
        assert_eq!(steps[0].balance.previous_balance, dec!(1000));
        assert_eq!(steps[0].balance.current_balance, dec!(6000));
        assert_eq!(steps[1].effect, dec!(-3000));
        assert_eq!(steps[1].balance.previous_balance, dec!(6000));
        assert_eq!(steps[1].balance.current_balance, dec!(3000));
    }

    #[test]
    fn test_replay_saturates_on_huge_amounts() {
        let acme = LedgerId::new();
        let vouchers = vec![
            sale(acme, day(1), Decimal::MAX),
            sale(acme, day(2), Decimal::MAX),
        ];

        let balance = replay(acme, dec!(0), BalanceSide::Dr, &vouchers, Cutoff::Unbounded);
        assert_eq!(balance, Decimal::MAX);

        let steps = trail(acme, Decimal::MAX, &vouchers, |_| true);
        assert_eq!(steps[1].balance.current_balance, Decimal::MAX);
    }

    fn amount_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Replaying the same inputs twice gives the same balance.
        #[test]
        fn prop_replay_is_deterministic(
            amounts in prop::collection::vec((amount_strategy(), 1u32..28, any::<bool>()), 0..30),
            opening in amount_strategy(),
        ) {
            let acct = LedgerId::new();
            let cash = LedgerId::new();
            let vouchers: Vec<Voucher> = amounts
                .iter()
                .map(|(amount, d, is_sale)| {
                    if *is_sale {
                        sale(acct, day(*d), *amount)
                    } else {
                        receipt(acct, cash, day(*d), *amount)
                    }
                })
                .collect();

            let first = replay(acct, opening, BalanceSide::Dr, &vouchers, Cutoff::OnOrBefore(day(20)));
            let second = replay(acct, opening, BalanceSide::Dr, &vouchers, Cutoff::OnOrBefore(day(20)));
            prop_assert_eq!(first, second);
        }

        /// The final trail balance equals the opening plus every effect, and
        /// matches a plain replay.
        #[test]
        fn prop_trail_ends_at_replay(
            amounts in prop::collection::vec((amount_strategy(), 1u32..28), 1..20),
        ) {
            let acct = LedgerId::new();
            let vouchers: Vec<Voucher> = amounts
                .iter()
                .map(|(amount, d)| sale(acct, day(*d), *amount))
                .collect();

            let steps = trail(acct, Decimal::ZERO, &vouchers, |_| true);
            let total: Decimal = amounts.iter().map(|(a, _)| *a).sum();
            let last = steps.last().map(|s| s.balance.current_balance);

            prop_assert_eq!(last, Some(total));
            prop_assert_eq!(
                replay(acct, Decimal::ZERO, BalanceSide::Dr, &vouchers, Cutoff::Unbounded),
                total
            );
            prop_assert_eq!(steps.len(), vouchers.len());
        }
    }
}
