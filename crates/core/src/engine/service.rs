//! Replay engine.
//!
//! Every call replays the full voucher history held by the snapshot. Nothing
//! is cached between calls and nothing is mutated.

use std::collections::HashMap;

use bahi_shared::types::{DrCrAmount, ItemId, LedgerId};
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::{LedgerBalanceSummary, Snapshot};
use crate::aging::{AgingBuckets, AgingReport, AgingRequest, AgingRow, age};
use crate::chart::AccountGroup;
use crate::inventory::{InventoryItem, OpeningStock, StockStatement, stock_statement};
use crate::ledger::{Cutoff, Ledger, LedgerStatement, replay, statement};
use crate::period::DateRange;
use crate::reports::{FinancialReport, ReportKind, ReportService};

/// Builds statements and reports from a [`Snapshot`].
pub struct ReplayEngine<'a> {
    snapshot: Snapshot<'a>,
    names: HashMap<LedgerId, &'a str>,
}

impl<'a> ReplayEngine<'a> {
    /// Creates an engine over `snapshot`.
    #[must_use]
    pub fn new(snapshot: Snapshot<'a>) -> Self {
        let names = snapshot
            .ledgers
            .iter()
            .map(|l| (l.id, l.name.as_str()))
            .collect();
        Self { snapshot, names }
    }

    /// Looks up a ledger.
    #[must_use]
    pub fn ledger(&self, ledger_id: LedgerId) -> Option<&'a Ledger> {
        self.snapshot.ledgers.iter().find(|l| l.id == ledger_id)
    }

    /// Looks up an inventory item.
    #[must_use]
    pub fn item(&self, item_id: ItemId) -> Option<&'a InventoryItem> {
        self.snapshot.items.iter().find(|i| i.id == item_id)
    }

    fn name_of(&self, ledger_id: LedgerId) -> Option<&'a str> {
        self.names.get(&ledger_id).copied()
    }

    fn closing_balance(&self, ledger: &Ledger, as_of: NaiveDate) -> Decimal {
        replay(
            ledger.id,
            ledger.opening_balance,
            ledger.opening_balance_type,
            self.snapshot.vouchers,
            Cutoff::OnOrBefore(as_of),
        )
    }

    /// Statement of one ledger, or `None` if the ledger does not exist.
    #[must_use]
    pub fn generate_statement(
        &self,
        ledger_id: LedgerId,
        range: DateRange,
    ) -> Option<LedgerStatement> {
        let Some(ledger) = self.ledger(ledger_id) else {
            tracing::debug!(%ledger_id, "statement requested for unknown ledger");
            return None;
        };

        let result = statement(ledger, self.snapshot.vouchers, range, |id| self.name_of(id));
        tracing::debug!(
            %ledger_id,
            start = %range.start,
            end = %range.end,
            lines = result.lines.len(),
            closing = %result.closing_balance,
            "generated ledger statement"
        );
        Some(result)
    }

    /// Statements of every ledger in `group`, in ledger order.
    #[must_use]
    pub fn generate_group_statement(
        &self,
        group: &AccountGroup,
        range: DateRange,
    ) -> Vec<LedgerStatement> {
        let statements: Vec<LedgerStatement> = self
            .snapshot
            .ledgers
            .iter()
            .filter(|l| &l.group == group)
            .map(|l| statement(l, self.snapshot.vouchers, range, |id| self.name_of(id)))
            .collect();
        tracing::debug!(%group, ledgers = statements.len(), "generated group statement");
        statements
    }

    /// Aging of every ledger in the requested group with something outstanding.
    #[must_use]
    pub fn generate_aging_report(&self, request: &AgingRequest) -> AgingReport {
        let group = request.effective_group();
        let mut totals = AgingBuckets::default();
        let mut rows = Vec::new();

        for ledger in self.snapshot.ledgers.iter().filter(|l| l.group == group) {
            let closing = self.closing_balance(ledger, request.as_of);
            let Some(buckets) = age(
                closing,
                self.snapshot.vouchers,
                ledger.id,
                request.as_of,
                request.perspective,
            ) else {
                continue;
            };

            totals.absorb(&buckets);
            rows.push(AgingRow {
                ledger_id: ledger.id,
                code: ledger.code.clone(),
                name: ledger.name.clone(),
                outstanding: request.perspective.outstanding(closing),
                buckets,
            });
        }

        let total_outstanding = totals.total();
        tracing::debug!(
            perspective = %request.perspective,
            %group,
            as_of = %request.as_of,
            rows = rows.len(),
            total = %total_outstanding,
            "generated aging report"
        );

        AgingReport {
            perspective: request.perspective,
            group,
            as_of: request.as_of,
            rows,
            totals,
            total_outstanding,
        }
    }

    /// Trial balance, P&L or balance sheet with balances as of `range.end`.
    #[must_use]
    pub fn generate_financial_report(&self, kind: ReportKind, range: DateRange) -> FinancialReport {
        let balances =
            ReportService::account_balances(self.snapshot.ledgers, self.snapshot.vouchers, range.end);
        tracing::debug!(%kind, accounts = balances.len(), as_of = %range.end, "balance pass complete");

        match kind {
            ReportKind::TrialBalance => {
                let report = ReportService::generate_trial_balance(&balances, range);
                if !report.totals.is_balanced {
                    tracing::warn!(
                        difference = %report.totals.difference,
                        "trial balance columns disagree"
                    );
                }
                FinancialReport::TrialBalance(report)
            }
            ReportKind::ProfitAndLoss => {
                let closing_stock = ReportService::closing_stock_value(self.snapshot.items);
                FinancialReport::ProfitAndLoss(ReportService::generate_profit_and_loss(
                    &balances,
                    closing_stock,
                    range,
                ))
            }
            ReportKind::BalanceSheet => {
                let closing_stock = ReportService::closing_stock_value(self.snapshot.items);
                FinancialReport::BalanceSheet(ReportService::generate_balance_sheet(
                    &balances,
                    closing_stock,
                    range.end,
                ))
            }
        }
    }

    /// Stock statement of one item, or `None` if the item does not exist.
    #[must_use]
    pub fn generate_stock_statement(
        &self,
        item_id: ItemId,
        range: DateRange,
        opening: OpeningStock,
    ) -> Option<StockStatement> {
        let item = self.item(item_id)?;
        let result = stock_statement(item, self.snapshot.vouchers, range, opening, |id| {
            self.name_of(id)
        });
        tracing::debug!(
            %item_id,
            ?opening,
            lines = result.lines.len(),
            closing = %result.closing_quantity,
            "generated stock statement"
        );
        Some(result)
    }

    /// Balance of every ledger as of `as_of`, in ledger order.
    #[must_use]
    pub fn ledger_balances(&self, as_of: NaiveDate) -> Vec<LedgerBalanceSummary> {
        self.snapshot
            .ledgers
            .iter()
            .map(|ledger| {
                let balance = self.closing_balance(ledger, as_of);
                LedgerBalanceSummary {
                    ledger_id: ledger.id,
                    code: ledger.code.clone(),
                    name: ledger.name.clone(),
                    group: ledger.group.clone(),
                    balance,
                    label: DrCrAmount::from_signed(balance),
                }
            })
            .collect()
    }
}
