//! Property-based tests for ledger statements.
//!
//! - Additivity: closing = opening + Σdebit − Σcredit
//! - Opening continuity: a period's opening equals the previous period's closing
//! - Line balances chain from the opening

use bahi_shared::types::{BalanceSide, LedgerId};
use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::statement::statement;
use super::types::Ledger;
use crate::chart::AccountGroup;
use crate::period::DateRange;
use crate::voucher::{Voucher, VoucherLine, VoucherType};

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

/// Strategy to generate positive decimal amounts (0.01 to 100,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn voucher_type_strategy() -> impl Strategy<Value = VoucherType> {
    prop_oneof![
        Just(VoucherType::Sales),
        Just(VoucherType::Purchase),
        Just(VoucherType::Receipt),
        Just(VoucherType::Payment),
        Just(VoucherType::Journal),
        Just(VoucherType::Contra),
    ]
}

/// (type, day offset, amount, account is party?)
fn voucher_spec() -> impl Strategy<Value = (VoucherType, u64, Decimal, bool)> {
    (voucher_type_strategy(), 0u64..120, positive_amount(), any::<bool>())
}

fn build(account: LedgerId, specs: &[(VoucherType, u64, Decimal, bool)]) -> Vec<Voucher> {
    specs
        .iter()
        .map(|(voucher_type, offset, amount, is_party)| {
            let other = LedgerId::new();
            let (party, line) = if *is_party { (account, other) } else { (other, account) };
            Voucher::new(
                *voucher_type,
                base_date() + Days::new(*offset),
                party,
                vec![VoucherLine::ledger(line, *amount)],
            )
        })
        .collect()
}

fn opening_side() -> impl Strategy<Value = BalanceSide> {
    prop_oneof![Just(BalanceSide::Dr), Just(BalanceSide::Cr)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// closing == opening + Σdebit − Σcredit for every statement.
    #[test]
    fn prop_statement_is_additive(
        specs in prop::collection::vec(voucher_spec(), 0..40),
        opening in positive_amount(),
        side in opening_side(),
        start in 0u64..60,
        len in 0u64..60,
    ) {
        let ledger = Ledger::new("L", "Ledger", AccountGroup::SundryDebtors).with_opening(opening, side);
        let vouchers = build(ledger.id, &specs);
        let period = DateRange::new(base_date() + Days::new(start), base_date() + Days::new(start + len));

        let st = statement(&ledger, &vouchers, period, |_| None);
        let debits: Decimal = st.lines.iter().map(|l| l.debit).sum();
        let credits: Decimal = st.lines.iter().map(|l| l.credit).sum();

        prop_assert_eq!(st.closing_balance, st.opening_balance + debits - credits);
        prop_assert_eq!(st.total_debit, debits);
        prop_assert_eq!(st.total_credit, credits);
    }

    /// statement(start = D2).opening == statement(end = D1).closing when D1 is the day before D2.
    #[test]
    fn prop_opening_continuity(
        specs in prop::collection::vec(voucher_spec(), 0..40),
        opening in positive_amount(),
        side in opening_side(),
        split in 1u64..119,
    ) {
        let ledger = Ledger::new("L", "Ledger", AccountGroup::BankAccounts).with_opening(opening, side);
        let vouchers = build(ledger.id, &specs);

        let second = DateRange::new(base_date() + Days::new(split), base_date() + Days::new(150));
        let first = DateRange::new(base_date(), base_date() + Days::new(split - 1));

        let earlier = statement(&ledger, &vouchers, first, |_| None);
        let later = statement(&ledger, &vouchers, second, |_| None);

        prop_assert_eq!(later.opening_balance, earlier.closing_balance);
    }

    /// Each line's balance is the previous line's balance plus its debit minus its credit.
    #[test]
    fn prop_line_balances_chain(
        specs in prop::collection::vec(voucher_spec(), 1..40),
        opening in positive_amount(),
    ) {
        let ledger = Ledger::new("L", "Ledger", AccountGroup::SundryCreditors)
            .with_opening(opening, BalanceSide::Cr);
        let vouchers = build(ledger.id, &specs);
        let period = DateRange::new(base_date(), base_date() + Days::new(200));

        let st = statement(&ledger, &vouchers, period, |_| None);
        let mut running = st.opening_balance;
        for line in &st.lines {
            prop_assert!(line.debit.is_zero() || line.credit.is_zero());
            running = running + line.debit - line.credit;
            prop_assert_eq!(line.balance, running);
        }
        prop_assert_eq!(running, st.closing_balance);
    }
}
