//! The slice of the ledger a calculation runs over.

use std::collections::HashSet;

use crate::ledger::{Account, AccountTransaction, Category, Client, Portfolio, PortfolioTransaction};

/// A calculation scope: the accounts and portfolios whose transactions feed
/// the engines, with an optional security filter for category-shaped scopes.
pub(crate) struct ScopeView<'a> {
    accounts: Vec<&'a Account>,
    portfolios: Vec<&'a Portfolio>,
    security_filter: Option<HashSet<&'a str>>,
}

impl<'a> ScopeView<'a> {
    /// The whole client: every account, every portfolio, every security.
    pub(crate) fn client(client: &'a Client) -> Self {
        Self {
            accounts: client.accounts.iter().collect(),
            portfolios: client.portfolios.iter().collect(),
            security_filter: None,
        }
    }

    /// A category's accounts plus, across all portfolios, the transactions
    /// touching its securities.
    pub(crate) fn category(client: &'a Client, category: &'a Category) -> Self {
        Self {
            accounts: client
                .accounts
                .iter()
                .filter(|a| category.contains_account(&a.id))
                .collect(),
            portfolios: client.portfolios.iter().collect(),
            security_filter: Some(category.security_ids.iter().map(String::as_str).collect()),
        }
    }

    /// A single portfolio's holdings, without account cash.
    pub(crate) fn portfolio(portfolio: &'a Portfolio) -> Self {
        Self {
            accounts: Vec::new(),
            portfolios: vec![portfolio],
            security_filter: None,
        }
    }

    pub(crate) fn account_transactions(&self) -> impl Iterator<Item = &'a AccountTransaction> + '_ {
        self.accounts.iter().flat_map(|a| a.transactions.iter())
    }

    pub(crate) fn portfolio_transactions(
        &self,
    ) -> impl Iterator<Item = &'a PortfolioTransaction> + '_ {
        let filter = self.security_filter.as_ref();
        self.portfolios
            .iter()
            .flat_map(|p| p.transactions.iter())
            .filter(move |t| filter.map_or(true, |f| f.contains(t.security_id.as_str())))
    }
}
