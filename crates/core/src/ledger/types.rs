//! Ledger (account) documents.

use bahi_shared::types::{BalanceSide, LedgerId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::chart::AccountGroup;

/// Login for the partner portal, where a party can view its own statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalCredentials {
    /// Portal username.
    pub username: String,
    /// Access code issued to the party.
    pub access_code: String,
}

/// A named balance-bearing account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    /// Unique identifier.
    pub id: LedgerId,
    /// Short code.
    #[serde(default)]
    pub code: String,
    /// Display name.
    pub name: String,
    /// Chart of accounts group.
    pub group: AccountGroup,
    /// Opening balance amount (never negative; the side carries the sign).
    #[serde(default)]
    pub opening_balance: Decimal,
    /// Side of the opening balance.
    pub opening_balance_type: BalanceSide,
    /// GSTIN of the party, if registered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gstin: Option<String>,
    /// Partner portal login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portal_credentials: Option<PortalCredentials>,
}

impl Ledger {
    /// Creates a ledger with a zero Dr opening balance.
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>, group: AccountGroup) -> Self {
        Self {
            id: LedgerId::new(),
            code: code.into(),
            name: name.into(),
            group,
            opening_balance: Decimal::ZERO,
            opening_balance_type: BalanceSide::Dr,
            gstin: None,
            portal_credentials: None,
        }
    }

    /// Sets the opening balance.
    #[must_use]
    pub fn with_opening(mut self, amount: Decimal, side: BalanceSide) -> Self {
        self.opening_balance = amount;
        self.opening_balance_type = side;
        self
    }

    /// Opening balance in signed form (Dr positive, Cr negative).
    #[must_use]
    pub fn signed_opening(&self) -> Decimal {
        self.opening_balance_type.signed(self.opening_balance)
    }
}
