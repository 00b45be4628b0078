//! Virtual-share (net-asset-value) performance index.
//!
//! Models the scope as a synthetic fund with a unit price starting at 1.0.
//! External cash buys or redeems units at the *previous* day's unit price,
//! which keeps the timing and size of cash flows out of the measured
//! performance. This yields a true time-weighted return.
//!
//! Unlike the cash-flow-adjusted index, `delta` here is an absolute
//! difference of unit prices, not a fraction.

use chrono::NaiveDate;

use crate::constants::BASE_UNIT_PRICE;
use crate::ledger::{
    AccountTransaction, AccountTransactionKind, PortfolioTransaction, PortfolioTransactionKind,
};
use crate::performance::flow_collector::add_daily_contributions;
use crate::performance::performance_model::{DeltaUnit, PerformanceIndex, WarningCollector};
use crate::performance::reporting_period::DateInterval;
use crate::performance::scope::ScopeView;

fn account_unit_flow(transaction: &AccountTransaction, taxes_are_performance_relevant: bool) -> i64 {
    match transaction.kind {
        AccountTransactionKind::Deposit | AccountTransactionKind::TransferIn => transaction.amount,
        AccountTransactionKind::Removal | AccountTransactionKind::TransferOut => {
            -transaction.amount
        }
        // taxes deplete units like a removal when they are not considered
        // part of performance
        AccountTransactionKind::Taxes if !taxes_are_performance_relevant => -transaction.amount,
        _ => 0,
    }
}

fn portfolio_unit_flow(transaction: &PortfolioTransaction) -> i64 {
    match transaction.kind {
        PortfolioTransactionKind::DeliveryInbound | PortfolioTransactionKind::TransferIn => {
            transaction.amount
        }
        PortfolioTransactionKind::DeliveryOutbound | PortfolioTransactionKind::TransferOut => {
            -transaction.amount
        }
        _ => 0,
    }
}

/// Compute the virtual-share index for `view` over `interval`.
pub(crate) fn calculate<V>(
    view: &ScopeView<'_>,
    interval: DateInterval,
    taxes_are_performance_relevant: bool,
    valuation: V,
    warnings: &mut WarningCollector,
) -> PerformanceIndex
where
    V: Fn(NaiveDate) -> i64,
{
    let size = interval.day_count();
    let dates = interval.days();

    let mut flows = vec![0i64; size];
    add_daily_contributions(&mut flows, &interval, view.account_transactions(), |t| {
        account_unit_flow(t, taxes_are_performance_relevant)
    });
    add_daily_contributions(
        &mut flows,
        &interval,
        view.portfolio_transactions(),
        portfolio_unit_flow,
    );

    let mut totals = vec![0i64; size];
    let mut delta = vec![0f64; size];
    let mut accumulated = vec![0f64; size];

    totals[0] = valuation(dates[0]);
    let mut unit_price = BASE_UNIT_PRICE;
    let mut units = totals[0] as f64 / unit_price;

    for index in 1..size {
        let previous_price = unit_price;

        // external cash converts to units at yesterday's price
        units += flows[index] as f64 / previous_price;

        let total = valuation(dates[index]);
        totals[index] = total;

        if units != 0.0 {
            unit_price = total as f64 / units;
        } else {
            // no units left to price; keep yesterday's price
            warnings.push(
                dates[index],
                total,
                format!(
                    "No units outstanding on {}; carrying forward the previous unit price",
                    dates[index]
                ),
            );
        }

        delta[index] = unit_price - previous_price;
        accumulated[index] = unit_price - BASE_UNIT_PRICE;
    }

    PerformanceIndex::new(
        interval,
        DeltaUnit::NavUnits,
        dates,
        totals,
        flows,
        delta,
        accumulated,
    )
}
