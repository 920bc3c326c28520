//! Dr/Cr balance sides with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every balance in the system is a signed `rust_decimal::Decimal` where
//! debit is positive and credit is negative, regardless of the account's
//! natural side. This module converts between that signed form and the
//! "amount + Dr/Cr label" form shown to users.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Balances whose magnitude does not exceed this are treated as zero in reports.
pub const BALANCE_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Largest magnitude accepted for a single amount, rate or quantity.
///
/// Engine arithmetic saturates rather than panicking, but inputs past this
/// bound are rejected at the edges so saturation never shows in real books.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Side of a balance or an opening balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BalanceSide {
    /// Debit.
    Dr,
    /// Credit.
    Cr,
}

impl BalanceSide {
    /// Applies the sign convention: Dr amounts are positive, Cr amounts negative.
    #[must_use]
    pub fn signed(self, amount: Decimal) -> Decimal {
        match self {
            Self::Dr => amount,
            Self::Cr => -amount,
        }
    }

    /// Side of a signed balance. Zero is labelled Dr.
    #[must_use]
    pub fn of(balance: Decimal) -> Self {
        if balance.is_sign_negative() && !balance.is_zero() {
            Self::Cr
        } else {
            Self::Dr
        }
    }
}

impl std::fmt::Display for BalanceSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dr => write!(f, "Dr"),
            Self::Cr => write!(f, "Cr"),
        }
    }
}

impl std::str::FromStr for BalanceSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dr" | "debit" => Ok(Self::Dr),
            "cr" | "credit" => Ok(Self::Cr),
            _ => Err(format!("Unknown balance side: {s}")),
        }
    }
}

/// A balance presented as an absolute amount with its Dr/Cr label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrCrAmount {
    /// Absolute amount.
    pub amount: Decimal,
    /// Side label.
    pub side: BalanceSide,
}

impl DrCrAmount {
    /// Presents a signed balance.
    #[must_use]
    pub fn from_signed(balance: Decimal) -> Self {
        Self {
            amount: balance.abs(),
            side: BalanceSide::of(balance),
        }
    }
}

impl std::fmt::Display for DrCrAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} {}", self.amount, self.side)
    }
}

/// Returns true if the balance is large enough to appear in a report.
#[must_use]
pub fn is_material(balance: Decimal) -> bool {
    balance.abs() > BALANCE_EPSILON
}

/// Returns true if the value's magnitude is at most [`MAX_AMOUNT`].
#[must_use]
pub fn within_limit(value: Decimal) -> bool {
    value.abs() <= MAX_AMOUNT
}

/// Sums values, clamping at `Decimal::MAX`/`Decimal::MIN` instead of overflowing.
pub fn saturating_sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values.into_iter().fold(Decimal::ZERO, Decimal::saturating_add)
}
