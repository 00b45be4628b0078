//! Day-bucketed aggregation of transaction contributions.
//!
//! Both engines scan the same two transaction sources with different sign
//! and inclusion rules per kind. The bucketing walk lives here once; each
//! engine supplies its own per-kind contribution policy.

use chrono::NaiveDate;

use crate::ledger::{AccountTransaction, PortfolioTransaction};
use crate::performance::reporting_period::DateInterval;

/// Anything carrying a transaction date.
pub(crate) trait Dated {
    fn transaction_date(&self) -> NaiveDate;
}

impl Dated for AccountTransaction {
    fn transaction_date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for PortfolioTransaction {
    fn transaction_date(&self) -> NaiveDate {
        self.date
    }
}

/// Add each transaction's signed contribution to the day bucket it falls
/// into. Transactions outside the interval are ignored; `contribution`
/// decides sign and inclusion per transaction kind.
pub(crate) fn add_daily_contributions<'a, T, I, F>(
    buckets: &mut [i64],
    interval: &DateInterval,
    transactions: I,
    contribution: F,
) where
    T: Dated + 'a,
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> i64,
{
    for transaction in transactions {
        let Some(offset) = interval.day_offset(transaction.transaction_date()) else {
            continue;
        };
        let value = contribution(transaction);
        if value != 0 {
            buckets[offset] += value;
        }
    }
}

/// Turn per-day contributions into a running cumulative series, in place.
pub(crate) fn accumulate_in_place(series: &mut [i64]) {
    for index in 1..series.len() {
        series[index] += series[index - 1];
    }
}
