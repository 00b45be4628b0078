//! Valuation provider contract.

use chrono::NaiveDate;

use crate::ledger::{Category, Client, Portfolio};

/// Total valuation of a scope as of a date, in the smallest currency unit.
///
/// Implementations must be pure and deterministic given the ledger state as
/// of that date, and must include every transaction dated on or before it.
/// Engines call this once per day of the reporting interval, so the cost of
/// one call dominates long intervals.
pub trait SnapshotValuationTrait: Send + Sync {
    /// Valuation of the whole client: cash across all accounts plus the
    /// market value of all holdings.
    fn valuation(&self, client: &Client, date: NaiveDate) -> i64;

    /// Valuation restricted to a category's accounts and securities.
    fn category_valuation(&self, client: &Client, category: &Category, date: NaiveDate) -> i64;

    /// Market value of a single portfolio's holdings (no account cash).
    fn portfolio_valuation(&self, client: &Client, portfolio: &Portfolio, date: NaiveDate) -> i64;
}
