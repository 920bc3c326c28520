//! Report generation service.

use bahi_shared::types::{BALANCE_EPSILON, is_material, saturating_sum};
use chrono::NaiveDate;
use rayon::prelude::*;
use rust_decimal::Decimal;

use super::types::{
    AccountBalance, BalanceSheetReport, ProfitAndLossReport, ReportLine, ReportSection,
    TrialBalanceReport, TrialBalanceRow, TrialBalanceTotals,
};
use crate::chart::Nature;
use crate::inventory::InventoryItem;
use crate::ledger::{Cutoff, Ledger, replay};
use crate::period::DateRange;
use crate::voucher::Voucher;

/// Label of the synthetic profit line on the balance sheet.
pub const NET_PROFIT_LABEL: &str = "Net Profit/(Loss)";
/// Label of the synthetic closing stock line on the balance sheet.
pub const CLOSING_STOCK_LABEL: &str = "Closing Stock";

/// Service for generating financial reports.
pub struct ReportService;

impl ReportService {
    /// Replays every classified ledger to `as_of`, in ledger order.
    ///
    /// Unclassified ledgers and balances within the reporting epsilon of zero
    /// are dropped.
    #[must_use]
    pub fn account_balances(
        ledgers: &[Ledger],
        vouchers: &[Voucher],
        as_of: NaiveDate,
    ) -> Vec<AccountBalance> {
        ledgers
            .par_iter()
            .filter_map(|ledger| {
                let nature = ledger.group.nature()?;
                let balance = replay(
                    ledger.id,
                    ledger.opening_balance,
                    ledger.opening_balance_type,
                    vouchers,
                    Cutoff::OnOrBefore(as_of),
                );
                is_material(balance).then(|| AccountBalance {
                    ledger_id: ledger.id,
                    code: ledger.code.clone(),
                    name: ledger.name.clone(),
                    group: ledger.group.clone(),
                    nature,
                    balance,
                })
            })
            .collect()
    }

    /// Value of all stock on hand at purchase price.
    #[must_use]
    pub fn closing_stock_value(items: &[InventoryItem]) -> Decimal {
        saturating_sum(items.iter().map(InventoryItem::stock_value))
    }

    /// Generates a trial balance.
    ///
    /// Positive balances go to the debit column, negative to the credit column.
    #[must_use]
    pub fn generate_trial_balance(
        balances: &[AccountBalance],
        period: DateRange,
    ) -> TrialBalanceReport {
        let rows: Vec<TrialBalanceRow> = balances
            .iter()
            .map(|a| TrialBalanceRow {
                ledger_id: a.ledger_id,
                code: a.code.clone(),
                name: a.name.clone(),
                group: a.group.clone(),
                debit: a.balance.max(Decimal::ZERO),
                credit: (-a.balance).max(Decimal::ZERO),
            })
            .collect();

        let total_debit = saturating_sum(rows.iter().map(|r| r.debit));
        let total_credit = saturating_sum(rows.iter().map(|r| r.credit));
        let difference = total_debit.saturating_sub(total_credit);

        TrialBalanceReport {
            period,
            rows,
            totals: TrialBalanceTotals {
                total_debit,
                total_credit,
                difference,
                is_balanced: difference.abs() <= BALANCE_EPSILON,
            },
        }
    }

    /// Generates a profit & loss statement.
    #[must_use]
    pub fn generate_profit_and_loss(
        balances: &[AccountBalance],
        closing_stock: Decimal,
        period: DateRange,
    ) -> ProfitAndLossReport {
        let mut income = ReportSection::default();
        let mut expense = ReportSection::default();

        for account in balances {
            match account.nature {
                Nature::Income => income.push(Self::absolute_line(account)),
                Nature::Expense => expense.push(Self::absolute_line(account)),
                Nature::Asset | Nature::Liability | Nature::Equity => {}
            }
        }

        let net_profit = income.total.saturating_add(closing_stock).saturating_sub(expense.total);

        ProfitAndLossReport {
            period,
            income,
            expense,
            closing_stock,
            net_profit,
        }
    }

    /// Generates a balance sheet.
    ///
    /// The net profit is recomputed from the same balances and posted to the
    /// liability side as `-net_profit`; closing stock is posted to the asset side.
    #[must_use]
    pub fn generate_balance_sheet(
        balances: &[AccountBalance],
        closing_stock: Decimal,
        as_of: NaiveDate,
    ) -> BalanceSheetReport {
        let net_profit = Self::generate_profit_and_loss(
            balances,
            closing_stock,
            DateRange::new(as_of, as_of),
        )
        .net_profit;

        let mut liabilities = ReportSection::default();
        let mut assets = ReportSection::default();

        for account in balances {
            match account.nature {
                Nature::Liability | Nature::Equity => liabilities.push(Self::signed_line(account)),
                Nature::Asset => assets.push(Self::signed_line(account)),
                Nature::Income | Nature::Expense => {}
            }
        }

        liabilities.push(ReportLine::synthetic(NET_PROFIT_LABEL, -net_profit));
        assets.push(ReportLine::synthetic(CLOSING_STOCK_LABEL, closing_stock));

        BalanceSheetReport {
            as_of,
            liabilities,
            assets,
            net_profit,
            closing_stock,
        }
    }

    fn signed_line(account: &AccountBalance) -> ReportLine {
        ReportLine {
            ledger_id: Some(account.ledger_id),
            code: account.code.clone(),
            name: account.name.clone(),
            group: Some(account.group.clone()),
            amount: account.balance,
        }
    }

    fn absolute_line(account: &AccountBalance) -> ReportLine {
        ReportLine {
            amount: account.balance.abs(),
            ..Self::signed_line(account)
        }
    }
}
