//! Report data types.

use bahi_shared::types::LedgerId;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ReportError;
use crate::chart::{AccountGroup, Nature};
use crate::period::DateRange;

/// Which financial statement to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportKind {
    /// Trial balance.
    #[serde(rename = "tb")]
    TrialBalance,
    /// Profit & loss.
    #[serde(rename = "pl")]
    ProfitAndLoss,
    /// Balance sheet.
    #[serde(rename = "bs")]
    BalanceSheet,
}

impl ReportKind {
    /// Short code used in URLs.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::TrialBalance => "tb",
            Self::ProfitAndLoss => "pl",
            Self::BalanceSheet => "bs",
        }
    }
}

impl std::str::FromStr for ReportKind {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tb" | "trial_balance" | "trial-balance" => Ok(Self::TrialBalance),
            "pl" | "profit_and_loss" | "profit-and-loss" => Ok(Self::ProfitAndLoss),
            "bs" | "balance_sheet" | "balance-sheet" => Ok(Self::BalanceSheet),
            _ => Err(ReportError::UnknownReportKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Closing balance of one classified account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    /// Ledger.
    pub ledger_id: LedgerId,
    /// Ledger code.
    pub code: String,
    /// Ledger name.
    pub name: String,
    /// Ledger group.
    pub group: AccountGroup,
    /// Nature of the group.
    pub nature: Nature,
    /// Signed balance (Dr positive).
    pub balance: Decimal,
}

/// One row of the trial balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    /// Ledger.
    pub ledger_id: LedgerId,
    /// Ledger code.
    pub code: String,
    /// Ledger name.
    pub name: String,
    /// Ledger group.
    pub group: AccountGroup,
    /// Debit column.
    pub debit: Decimal,
    /// Credit column.
    pub credit: Decimal,
}

/// Trial balance totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceTotals {
    /// Total debit.
    pub total_debit: Decimal,
    /// Total credit.
    pub total_credit: Decimal,
    /// Debit minus credit.
    pub difference: Decimal,
    /// Whether the columns agree within the reporting epsilon.
    pub is_balanced: bool,
}

/// Trial balance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceReport {
    /// Reporting window; balances are taken as of its end.
    pub period: DateRange,
    /// One row per account with a material balance.
    pub rows: Vec<TrialBalanceRow>,
    /// Totals.
    pub totals: TrialBalanceTotals,
}

/// One line of a P&L or balance sheet section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLine {
    /// Ledger, absent for synthetic lines.
    pub ledger_id: Option<LedgerId>,
    /// Ledger code, empty for synthetic lines.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Ledger group, absent for synthetic lines.
    pub group: Option<AccountGroup>,
    /// Line amount.
    pub amount: Decimal,
}

impl ReportLine {
    /// A line that does not come from a ledger.
    #[must_use]
    pub fn synthetic(name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            ledger_id: None,
            code: String::new(),
            name: name.into(),
            group: None,
            amount,
        }
    }
}

/// Lines and their total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSection {
    /// Section total.
    pub total: Decimal,
    /// Lines in ledger order.
    pub lines: Vec<ReportLine>,
}

impl ReportSection {
    /// Appends a line and adds its amount to the total.
    pub fn push(&mut self, line: ReportLine) {
        self.total = self.total.saturating_add(line.amount);
        self.lines.push(line);
    }
}

/// Profit & loss report.
///
/// Income and expense lines carry absolute balances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitAndLossReport {
    /// Reporting window; balances are taken as of its end.
    pub period: DateRange,
    /// Sales Accounts, Direct Incomes, Indirect Incomes.
    pub income: ReportSection,
    /// Purchase Accounts, Direct Expenses, Indirect Expenses.
    pub expense: ReportSection,
    /// Closing stock value, credited to the income side.
    pub closing_stock: Decimal,
    /// `(income + closing stock) - expense`.
    pub net_profit: Decimal,
}

/// Balance sheet report.
///
/// Lines carry signed balances: liabilities are negative, assets positive.
/// Each side is totalled on its own and the two totals are not required to
/// agree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheetReport {
    /// Balances are taken as of this date.
    pub as_of: NaiveDate,
    /// Capital, loans, current liabilities, creditors and the net profit line.
    pub liabilities: ReportSection,
    /// Fixed assets, current assets, bank, cash, debtors, stock and closing stock.
    pub assets: ReportSection,
    /// Net profit carried from the P&L.
    pub net_profit: Decimal,
    /// Closing stock value.
    pub closing_stock: Decimal,
}

/// Any of the three financial statements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "report")]
pub enum FinancialReport {
    /// Trial balance.
    #[serde(rename = "tb")]
    TrialBalance(TrialBalanceReport),
    /// Profit & loss.
    #[serde(rename = "pl")]
    ProfitAndLoss(ProfitAndLossReport),
    /// Balance sheet.
    #[serde(rename = "bs")]
    BalanceSheet(BalanceSheetReport),
}

impl FinancialReport {
    /// Kind of this report.
    #[must_use]
    pub const fn kind(&self) -> ReportKind {
        match self {
            Self::TrialBalance(_) => ReportKind::TrialBalance,
            Self::ProfitAndLoss(_) => ReportKind::ProfitAndLoss,
            Self::BalanceSheet(_) => ReportKind::BalanceSheet,
        }
    }
}
