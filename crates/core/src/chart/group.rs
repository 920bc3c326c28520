//! Account groups and their accounting nature.

use bahi_shared::types::BalanceSide;
use serde::{Deserialize, Serialize};

/// Accounting nature of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nature {
    /// Resources owned (cash, bank, debtors, stock, fixed assets).
    Asset,
    /// Amounts owed to others.
    Liability,
    /// Owner's capital.
    Equity,
    /// Sales and other income.
    Income,
    /// Purchases and other expenses.
    Expense,
}

impl Nature {
    /// Side on which balances of this nature normally sit.
    ///
    /// Asset/Expense are debit-normal; Liability/Equity/Income are credit-normal.
    #[must_use]
    pub const fn normal_side(self) -> BalanceSide {
        match self {
            Self::Asset | Self::Expense => BalanceSide::Dr,
            Self::Liability | Self::Equity | Self::Income => BalanceSide::Cr,
        }
    }
}

/// Chart of accounts group of a ledger.
///
/// Serialized as its display label ("Sundry Debtors", "Loans (Liability)", ...).
/// Any other label deserializes to `Unclassified` instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AccountGroup {
    /// Bank Accounts.
    BankAccounts,
    /// Cash-in-Hand.
    CashInHand,
    /// Sundry Debtors (customers).
    SundryDebtors,
    /// Sundry Creditors (vendors).
    SundryCreditors,
    /// Purchase Accounts.
    PurchaseAccounts,
    /// Sales Accounts.
    SalesAccounts,
    /// Direct Expenses.
    DirectExpenses,
    /// Indirect Expenses.
    IndirectExpenses,
    /// Direct Incomes.
    DirectIncomes,
    /// Indirect Incomes.
    IndirectIncomes,
    /// Capital Account.
    CapitalAccount,
    /// Loans (Liability).
    LoansLiability,
    /// Fixed Assets.
    FixedAssets,
    /// Current Assets.
    CurrentAssets,
    /// Current Liabilities.
    CurrentLiabilities,
    /// Stock-in-Hand.
    StockInHand,
    /// A label outside the chart. Carries the original text.
    Unclassified(String),
}

impl AccountGroup {
    /// Every classified group, in chart order.
    pub const ALL: [Self; 16] = [
        Self::BankAccounts,
        Self::CashInHand,
        Self::SundryDebtors,
        Self::SundryCreditors,
        Self::PurchaseAccounts,
        Self::SalesAccounts,
        Self::DirectExpenses,
        Self::IndirectExpenses,
        Self::DirectIncomes,
        Self::IndirectIncomes,
        Self::CapitalAccount,
        Self::LoansLiability,
        Self::FixedAssets,
        Self::CurrentAssets,
        Self::CurrentLiabilities,
        Self::StockInHand,
    ];

    /// Display label as stored on the ledger document.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::BankAccounts => "Bank Accounts",
            Self::CashInHand => "Cash-in-Hand",
            Self::SundryDebtors => "Sundry Debtors",
            Self::SundryCreditors => "Sundry Creditors",
            Self::PurchaseAccounts => "Purchase Accounts",
            Self::SalesAccounts => "Sales Accounts",
            Self::DirectExpenses => "Direct Expenses",
            Self::IndirectExpenses => "Indirect Expenses",
            Self::DirectIncomes => "Direct Incomes",
            Self::IndirectIncomes => "Indirect Incomes",
            Self::CapitalAccount => "Capital Account",
            Self::LoansLiability => "Loans (Liability)",
            Self::FixedAssets => "Fixed Assets",
            Self::CurrentAssets => "Current Assets",
            Self::CurrentLiabilities => "Current Liabilities",
            Self::StockInHand => "Stock-in-Hand",
            Self::Unclassified(label) => label,
        }
    }

    /// Parses a group label. Matching ignores case and surrounding whitespace.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let wanted = label.trim();
        Self::ALL
            .into_iter()
            .find(|group| group.label().eq_ignore_ascii_case(wanted))
            .unwrap_or_else(|| Self::Unclassified(label.to_string()))
    }

    /// Accounting nature, or `None` for an unclassified group.
    #[must_use]
    pub fn nature(&self) -> Option<Nature> {
        match self {
            Self::BankAccounts
            | Self::CashInHand
            | Self::SundryDebtors
            | Self::FixedAssets
            | Self::CurrentAssets
            | Self::StockInHand => Some(Nature::Asset),
            Self::SundryCreditors | Self::LoansLiability | Self::CurrentLiabilities => {
                Some(Nature::Liability)
            }
            Self::CapitalAccount => Some(Nature::Equity),
            Self::SalesAccounts | Self::DirectIncomes | Self::IndirectIncomes => {
                Some(Nature::Income)
            }
            Self::PurchaseAccounts | Self::DirectExpenses | Self::IndirectExpenses => {
                Some(Nature::Expense)
            }
            Self::Unclassified(_) => None,
        }
    }

    /// Normal balance side, or `None` for an unclassified group.
    #[must_use]
    pub fn normal_side(&self) -> Option<BalanceSide> {
        self.nature().map(Nature::normal_side)
    }

    /// Returns true if the group belongs to the chart.
    #[must_use]
    pub fn is_classified(&self) -> bool {
        !matches!(self, Self::Unclassified(_))
    }
}

impl From<String> for AccountGroup {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<AccountGroup> for String {
    fn from(group: AccountGroup) -> Self {
        match group {
            AccountGroup::Unclassified(label) => label,
            other => other.label().to_string(),
        }
    }
}

impl std::fmt::Display for AccountGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for AccountGroup {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_label(s))
    }
}
