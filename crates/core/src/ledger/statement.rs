//! Bounded-period ledger statements.

use bahi_shared::types::{DrCrAmount, LedgerId, VoucherId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::balance::{Cutoff, replay, trail};
use super::types::Ledger;
use crate::chart::AccountGroup;
use crate::period::DateRange;
use crate::voucher::{Voucher, VoucherType};

/// One dated line of a ledger statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementLine {
    /// Source voucher.
    pub voucher_id: VoucherId,
    /// Voucher date.
    pub date: NaiveDate,
    /// Voucher type.
    pub voucher_type: VoucherType,
    /// Reference number.
    pub reference_no: String,
    /// Counter-account description.
    pub particulars: String,
    /// Narration.
    pub narration: String,
    /// Debit amount (zero when the effect is a credit).
    pub debit: Decimal,
    /// Credit amount (zero when the effect is a debit).
    pub credit: Decimal,
    /// Signed running balance after this line.
    pub balance: Decimal,
    /// Running balance with its Dr/Cr label.
    pub balance_label: DrCrAmount,
}

/// Opening, dated lines and closing for one account over one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerStatement {
    /// Ledger.
    pub ledger_id: LedgerId,
    /// Ledger code.
    pub code: String,
    /// Ledger name.
    pub name: String,
    /// Ledger group.
    pub group: AccountGroup,
    /// Statement window.
    pub period: DateRange,
    /// Signed balance before the window.
    pub opening_balance: Decimal,
    /// Opening with its Dr/Cr label.
    pub opening: DrCrAmount,
    /// One line per voucher in the window that touches the account.
    pub lines: Vec<StatementLine>,
    /// Sum of the debit column.
    pub total_debit: Decimal,
    /// Sum of the credit column.
    pub total_credit: Decimal,
    /// Signed balance at the end of the window.
    pub closing_balance: Decimal,
    /// Closing with its Dr/Cr label.
    pub closing: DrCrAmount,
}

/// Builds the statement of `account` over `period`.
///
/// `name_of` resolves ledger names for the particulars column; unknown ledgers
/// fall back to the voucher type.
pub fn statement<'n, N>(
    account: &Ledger,
    vouchers: &[Voucher],
    period: DateRange,
    name_of: N,
) -> LedgerStatement
where
    N: Fn(LedgerId) -> Option<&'n str>,
{
    let opening_balance = replay(
        account.id,
        account.opening_balance,
        account.opening_balance_type,
        vouchers,
        Cutoff::Before(period.start),
    );

    let steps = trail(account.id, opening_balance, vouchers, |v| {
        period.contains(v.date)
    });

    let mut total_debit = Decimal::ZERO;
    let mut total_credit = Decimal::ZERO;
    let mut closing_balance = opening_balance;
    let mut lines = Vec::with_capacity(steps.len());

    for step in steps {
        closing_balance = step.balance.current_balance;
        if step.effect.is_zero() {
            continue;
        }

        let (debit, credit) = split(step.effect);
        total_debit = total_debit.saturating_add(debit);
        total_credit = total_credit.saturating_add(credit);

        let voucher = step.voucher;
        lines.push(StatementLine {
            voucher_id: voucher.id,
            date: voucher.date,
            voucher_type: voucher.voucher_type,
            reference_no: voucher.reference_no.clone(),
            particulars: particulars(voucher, account.id, &name_of),
            narration: voucher.narration.clone(),
            debit,
            credit,
            balance: closing_balance,
            balance_label: DrCrAmount::from_signed(closing_balance),
        });
    }

    LedgerStatement {
        ledger_id: account.id,
        code: account.code.clone(),
        name: account.name.clone(),
        group: account.group.clone(),
        period,
        opening_balance,
        opening: DrCrAmount::from_signed(opening_balance),
        lines,
        total_debit,
        total_credit,
        closing_balance,
        closing: DrCrAmount::from_signed(closing_balance),
    }
}

/// Splits a signed effect into (debit, credit) columns.
fn split(effect: Decimal) -> (Decimal, Decimal) {
    if effect.is_sign_positive() {
        (effect, Decimal::ZERO)
    } else {
        (Decimal::ZERO, -effect)
    }
}

/// Names the other side of the voucher as seen from `account_id`.
fn particulars<'n, N>(voucher: &Voucher, account_id: LedgerId, name_of: &N) -> String
where
    N: Fn(LedgerId) -> Option<&'n str>,
{
    let counterparts: Vec<&str> = if voucher.party_ledger_id == account_id {
        voucher
            .line_ledgers()
            .filter(|id| *id != account_id)
            .filter_map(name_of)
            .collect()
    } else {
        name_of(voucher.party_ledger_id).into_iter().collect()
    };

    if counterparts.is_empty() {
        voucher.voucher_type.label().to_string()
    } else {
        counterparts.join(", ")
    }
}
