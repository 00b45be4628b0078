//! Ledger-backed valuation provider.
//!
//! Derives a scope's valuation directly from the ledger: cash balances from
//! the signed effect of account transactions, holdings from cumulative share
//! movements priced at the latest quote on or before the valuation date.

use std::collections::HashMap;

use chrono::NaiveDate;
use log::debug;

use crate::ledger::{
    Account, AccountTransaction, AccountTransactionKind, Category, Client, Portfolio,
    PortfolioTransaction, PortfolioTransactionKind,
};
use crate::snapshot::snapshot_traits::SnapshotValuationTrait;

/// Default `SnapshotValuationTrait` implementation working off the ledger
/// alone. Positions without a quote yet are valued at zero.
#[derive(Debug, Clone, Default)]
pub struct LedgerSnapshotService;

impl LedgerSnapshotService {
    pub fn new() -> Self {
        Self
    }

    fn cash_effect(transaction: &AccountTransaction) -> i64 {
        use AccountTransactionKind::*;
        match transaction.kind {
            Deposit | Interest | Dividends | Sell | TransferIn => transaction.amount,
            Removal | Fees | Taxes | Buy | TransferOut => -transaction.amount,
        }
    }

    fn share_effect(transaction: &PortfolioTransaction) -> i64 {
        use PortfolioTransactionKind::*;
        match transaction.kind {
            Buy | DeliveryInbound | TransferIn => transaction.shares,
            Sell | DeliveryOutbound | TransferOut => -transaction.shares,
        }
    }

    fn cash_balance(account: &Account, date: NaiveDate) -> i64 {
        account
            .transactions
            .iter()
            .filter(|t| t.date <= date)
            .map(Self::cash_effect)
            .sum()
    }

    /// Market value of the holdings accumulated by `portfolios` up to and
    /// including `date`, optionally restricted to a set of securities.
    fn holdings_value<'a>(
        client: &Client,
        portfolios: impl IntoIterator<Item = &'a Portfolio>,
        security_filter: Option<&[String]>,
        date: NaiveDate,
    ) -> i64 {
        let mut shares_by_security: HashMap<&str, i64> = HashMap::new();
        for portfolio in portfolios {
            for transaction in &portfolio.transactions {
                if transaction.date > date {
                    continue;
                }
                if let Some(filter) = security_filter {
                    if !filter.iter().any(|id| *id == transaction.security_id) {
                        continue;
                    }
                }
                *shares_by_security
                    .entry(transaction.security_id.as_str())
                    .or_insert(0) += Self::share_effect(transaction);
            }
        }

        let mut total = 0i64;
        for (security_id, shares) in shares_by_security {
            if shares == 0 {
                continue;
            }
            let Some(security) = client.security(security_id) else {
                debug!("Security {} not in ledger; position skipped", security_id);
                continue;
            };
            match security.price_on_or_before(date) {
                Some(price) => total += shares * price,
                None => {
                    debug!(
                        "No quote for {} on or before {}; position valued at zero",
                        security.name, date
                    );
                }
            }
        }
        total
    }
}

impl SnapshotValuationTrait for LedgerSnapshotService {
    fn valuation(&self, client: &Client, date: NaiveDate) -> i64 {
        let cash: i64 = client
            .accounts
            .iter()
            .map(|a| Self::cash_balance(a, date))
            .sum();
        cash + Self::holdings_value(client, &client.portfolios, None, date)
    }

    fn category_valuation(&self, client: &Client, category: &Category, date: NaiveDate) -> i64 {
        let cash: i64 = client
            .accounts
            .iter()
            .filter(|a| category.contains_account(&a.id))
            .map(|a| Self::cash_balance(a, date))
            .sum();
        cash + Self::holdings_value(
            client,
            &client.portfolios,
            Some(&category.security_ids),
            date,
        )
    }

    fn portfolio_valuation(&self, client: &Client, portfolio: &Portfolio, date: NaiveDate) -> i64 {
        Self::holdings_value(client, std::iter::once(portfolio), None, date)
    }
}
