//! Ledger domain models.
//!
//! The ledger is the read-only input of every calculation: a `Client` owning
//! accounts, portfolios, securities and user-defined categories. Engines
//! never mutate it; a calculation is a pure function of a ledger snapshot
//! and a date interval.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ledger::transaction_model::{AccountTransaction, PortfolioTransaction};

/// Asset classes a security can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetClass {
    Cash,
    Equity,
    Debt,
    RealEstate,
    Commodity,
}

impl std::fmt::Display for AssetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AssetClass::Cash => "Cash",
            AssetClass::Equity => "Equity",
            AssetClass::Debt => "Debt",
            AssetClass::RealEstate => "Real Estate",
            AssetClass::Commodity => "Commodity",
        };
        f.write_str(label)
    }
}

/// Historical quote of a security, in the smallest currency unit per share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityPrice {
    pub date: NaiveDate,
    pub value: i64,
}

/// Domain model representing a security in the system
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Security {
    pub id: String,
    pub name: String,
    pub asset_class: AssetClass,
    /// Price history, kept sorted by date.
    #[serde(default)]
    pub prices: Vec<SecurityPrice>,
}

impl Security {
    pub fn new(name: impl Into<String>, asset_class: AssetClass) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            asset_class,
            prices: Vec::new(),
        }
    }

    /// Record a quote, replacing an existing quote on the same date.
    pub fn add_price(&mut self, date: NaiveDate, value: i64) {
        match self.prices.binary_search_by_key(&date, |p| p.date) {
            Ok(pos) => self.prices[pos].value = value,
            Err(pos) => self.prices.insert(pos, SecurityPrice { date, value }),
        }
    }

    /// Latest quote on or before `date`, if any exists yet.
    pub fn price_on_or_before(&self, date: NaiveDate) -> Option<i64> {
        self.prices
            .iter()
            .take_while(|p| p.date <= date)
            .last()
            .map(|p| p.value)
    }
}

/// Domain model representing an account in the system
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub currency: String,
    #[serde(default)]
    pub transactions: Vec<AccountTransaction>,
}

impl Account {
    pub fn new(name: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            currency: currency.into(),
            transactions: Vec::new(),
        }
    }

    pub fn add_transaction(&mut self, transaction: AccountTransaction) {
        self.transactions.push(transaction);
    }
}

/// Domain model representing a portfolio in the system
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub transactions: Vec<PortfolioTransaction>,
}

impl Portfolio {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            transactions: Vec::new(),
        }
    }

    pub fn add_transaction(&mut self, transaction: PortfolioTransaction) {
        self.transactions.push(transaction);
    }
}

/// A named subset of accounts and securities used as an aggregation scope.
///
/// Degenerate categories (one account, one security) are how account- and
/// investment-level indices are expressed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub account_ids: Vec<String>,
    #[serde(default)]
    pub security_ids: Vec<String>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            account_ids: Vec::new(),
            security_ids: Vec::new(),
        }
    }

    pub fn add_account(&mut self, account_id: impl Into<String>) {
        self.account_ids.push(account_id.into());
    }

    pub fn add_security(&mut self, security_id: impl Into<String>) {
        self.security_ids.push(security_id.into());
    }

    pub fn contains_account(&self, account_id: &str) -> bool {
        self.account_ids.iter().any(|id| id == account_id)
    }

    pub fn contains_security(&self, security_id: &str) -> bool {
        self.security_ids.iter().any(|id| id == security_id)
    }
}

/// Monthly consumer-price-index level. The level is scaled by 10^2, so
/// 106.30 is stored as 10630.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumerPriceIndex {
    pub year: i32,
    pub month: u32,
    pub index: i64,
}

/// User configuration carried by the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSettings {
    pub base_currency: String,
    /// When false, taxes count as withdrawals in the virtual-share engine
    /// instead of as performance.
    pub taxes_are_performance_relevant: bool,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_currency: "USD".to_string(),
            taxes_are_performance_relevant: true,
        }
    }
}

/// Root aggregate of the ledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(default)]
    pub settings: ClientSettings,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub portfolios: Vec<Portfolio>,
    #[serde(default)]
    pub securities: Vec<Security>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub consumer_price_index: Vec<ConsumerPriceIndex>,
}

impl Client {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account(&self, account_id: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == account_id)
    }

    pub fn portfolio(&self, portfolio_id: &str) -> Option<&Portfolio> {
        self.portfolios.iter().find(|p| p.id == portfolio_id)
    }

    pub fn security(&self, security_id: &str) -> Option<&Security> {
        self.securities.iter().find(|s| s.id == security_id)
    }
}
