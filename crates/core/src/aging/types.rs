//! Aging data types.

use bahi_shared::types::{LedgerId, saturating_sum};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::chart::AccountGroup;
use crate::reports::ReportError;
use crate::voucher::VoucherType;

/// Which side of the books is being aged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Perspective {
    /// Amounts customers owe us (Dr balances are outstanding).
    #[default]
    Receivable,
    /// Amounts we owe vendors (Cr balances are outstanding).
    Payable,
}

impl Perspective {
    /// Outstanding amount for a signed closing balance.
    #[must_use]
    pub fn outstanding(self, closing_balance: Decimal) -> Decimal {
        match self {
            Self::Receivable => closing_balance,
            Self::Payable => -closing_balance,
        }
    }

    /// Voucher types that raise a bill from this perspective.
    #[must_use]
    pub const fn bill_types(self) -> [VoucherType; 2] {
        match self {
            Self::Receivable => [VoucherType::Sales, VoucherType::Journal],
            Self::Payable => [VoucherType::Purchase, VoucherType::Journal],
        }
    }

    /// Group aged when the request names none.
    #[must_use]
    pub const fn default_group(self) -> AccountGroup {
        match self {
            Self::Receivable => AccountGroup::SundryDebtors,
            Self::Payable => AccountGroup::SundryCreditors,
        }
    }
}

impl std::fmt::Display for Perspective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Receivable => write!(f, "receivable"),
            Self::Payable => write!(f, "payable"),
        }
    }
}

impl std::str::FromStr for Perspective {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "receivable" | "receivables" => Ok(Self::Receivable),
            "payable" | "payables" => Ok(Self::Payable),
            _ => Err(ReportError::UnknownPerspective(s.to_string())),
        }
    }
}

/// Age bucket of a bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgingBucket {
    /// 0 to 30 days.
    #[serde(rename = "0-30")]
    Days0To30,
    /// 31 to 60 days.
    #[serde(rename = "31-60")]
    Days31To60,
    /// 61 to 90 days.
    #[serde(rename = "61-90")]
    Days61To90,
    /// More than 90 days.
    #[serde(rename = ">90")]
    Over90,
}

impl AgingBucket {
    /// Bucket for a bill `days` old.
    ///
    /// Bills dated after the as-of date (negative age) fall into the first bucket.
    #[must_use]
    pub const fn for_days(days: i64) -> Self {
        match days {
            ..=30 => Self::Days0To30,
            31..=60 => Self::Days31To60,
            61..=90 => Self::Days61To90,
            _ => Self::Over90,
        }
    }
}

/// Outstanding amount split by age.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingBuckets {
    /// 0 to 30 days.
    #[serde(rename = "0-30")]
    pub days_0_30: Decimal,
    /// 31 to 60 days.
    #[serde(rename = "31-60")]
    pub days_31_60: Decimal,
    /// 61 to 90 days.
    #[serde(rename = "61-90")]
    pub days_61_90: Decimal,
    /// More than 90 days.
    #[serde(rename = ">90")]
    pub over_90: Decimal,
}

impl AgingBuckets {
    /// Adds `amount` to one bucket.
    pub fn add(&mut self, bucket: AgingBucket, amount: Decimal) {
        match bucket {
            AgingBucket::Days0To30 => self.days_0_30 = self.days_0_30.saturating_add(amount),
            AgingBucket::Days31To60 => self.days_31_60 = self.days_31_60.saturating_add(amount),
            AgingBucket::Days61To90 => self.days_61_90 = self.days_61_90.saturating_add(amount),
            AgingBucket::Over90 => self.over_90 = self.over_90.saturating_add(amount),
        }
    }

    /// Sum of all buckets.
    #[must_use]
    pub fn total(&self) -> Decimal {
        saturating_sum([self.days_0_30, self.days_31_60, self.days_61_90, self.over_90])
    }

    /// Adds every bucket of `other`.
    pub fn absorb(&mut self, other: &Self) {
        self.days_0_30 = self.days_0_30.saturating_add(other.days_0_30);
        self.days_31_60 = self.days_31_60.saturating_add(other.days_31_60);
        self.days_61_90 = self.days_61_90.saturating_add(other.days_61_90);
        self.over_90 = self.over_90.saturating_add(other.over_90);
    }
}

/// What to age.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingRequest {
    /// Receivable or payable.
    pub perspective: Perspective,
    /// Date the ages are measured from.
    pub as_of: NaiveDate,
    /// Group to age; the perspective's default group when absent.
    pub group: Option<AccountGroup>,
}

impl AgingRequest {
    /// Ages the perspective's default group.
    #[must_use]
    pub const fn new(perspective: Perspective, as_of: NaiveDate) -> Self {
        Self {
            perspective,
            as_of,
            group: None,
        }
    }

    /// Group the request covers.
    #[must_use]
    pub fn effective_group(&self) -> AccountGroup {
        self.group
            .clone()
            .unwrap_or_else(|| self.perspective.default_group())
    }
}

/// Aging of one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingRow {
    /// Ledger.
    pub ledger_id: LedgerId,
    /// Ledger code.
    pub code: String,
    /// Ledger name.
    pub name: String,
    /// Outstanding amount (positive).
    pub outstanding: Decimal,
    /// Outstanding split by age.
    pub buckets: AgingBuckets,
}

/// Aging of every account in a group with something outstanding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingReport {
    /// Receivable or payable.
    pub perspective: Perspective,
    /// Group aged.
    pub group: AccountGroup,
    /// Date the ages are measured from.
    pub as_of: NaiveDate,
    /// One row per account with a positive outstanding.
    pub rows: Vec<AgingRow>,
    /// Column totals.
    pub totals: AgingBuckets,
    /// Total outstanding.
    pub total_outstanding: Decimal,
}
