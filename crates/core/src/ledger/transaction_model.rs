//! Transaction domain models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kinds of account-level (cash) transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountTransactionKind {
    Deposit,
    Removal,
    Interest,
    Dividends,
    Fees,
    Taxes,
    Buy,
    Sell,
    TransferIn,
    TransferOut,
}

/// Cash movement on an account.
///
/// `amount` is carried in the smallest currency unit and is always
/// non-negative; the kind determines the direction of the movement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountTransaction {
    pub date: NaiveDate,
    pub kind: AccountTransactionKind,
    pub amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_id: Option<String>,
}

impl AccountTransaction {
    pub fn new(date: NaiveDate, kind: AccountTransactionKind, amount: i64) -> Self {
        Self {
            date,
            kind,
            amount,
            security_id: None,
        }
    }

    /// Attach the security this cash movement settles (dividends, taxes on a
    /// position, buy/sell legs).
    pub fn with_security(mut self, security_id: impl Into<String>) -> Self {
        self.security_id = Some(security_id.into());
        self
    }
}

/// Kinds of portfolio-level (security) transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PortfolioTransactionKind {
    Buy,
    Sell,
    TransferIn,
    TransferOut,
    DeliveryInbound,
    DeliveryOutbound,
}

/// Security movement in a portfolio.
///
/// `amount` is the gross monetary value of the movement in the smallest
/// currency unit; `shares` the number of shares moved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioTransaction {
    pub date: NaiveDate,
    pub kind: PortfolioTransactionKind,
    pub security_id: String,
    pub shares: i64,
    pub amount: i64,
    #[serde(default)]
    pub fee: i64,
}

impl PortfolioTransaction {
    pub fn new(
        date: NaiveDate,
        kind: PortfolioTransactionKind,
        security_id: impl Into<String>,
        shares: i64,
        amount: i64,
    ) -> Self {
        Self {
            date,
            kind,
            security_id: security_id.into(),
            shares,
            amount,
            fee: 0,
        }
    }
}
