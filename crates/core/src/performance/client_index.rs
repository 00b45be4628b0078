//! Cash-flow-adjusted performance index.
//!
//! The daily return nets the valuation change against the day's external
//! cash flow; the cumulative series is a money-weighted ratio anchored to
//! the starting value plus capital committed through buys, net of sale
//! proceeds. The two series are deliberately independent and may diverge.

use chrono::NaiveDate;
use log::debug;

use crate::ledger::{
    AccountTransaction, AccountTransactionKind, PortfolioTransaction, PortfolioTransactionKind,
};
use crate::performance::flow_collector::{accumulate_in_place, add_daily_contributions};
use crate::performance::performance_model::{DeltaUnit, PerformanceIndex, WarningCollector};
use crate::performance::reporting_period::DateInterval;
use crate::performance::scope::ScopeView;

/// Per-kind signed-contribution rules for one cash-flow calculation.
pub(crate) struct CashFlowPolicy {
    pub(crate) account_transferal: fn(&AccountTransaction) -> i64,
    pub(crate) portfolio_transferal: fn(&PortfolioTransaction) -> i64,
    pub(crate) portfolio_buy: fn(&PortfolioTransaction) -> i64,
    pub(crate) portfolio_sale: fn(&PortfolioTransaction) -> i64,
}

/// Whole-client policy: deposits/removals and security deliveries are the
/// external flows. Transfers net out inside the scope and are excluded.
pub(crate) fn client_policy() -> CashFlowPolicy {
    CashFlowPolicy {
        account_transferal: |t| match t.kind {
            AccountTransactionKind::Deposit => t.amount,
            AccountTransactionKind::Removal => -t.amount,
            _ => 0,
        },
        portfolio_transferal: |t| match t.kind {
            PortfolioTransactionKind::DeliveryInbound => t.amount,
            PortfolioTransactionKind::DeliveryOutbound => -t.amount,
            _ => 0,
        },
        portfolio_buy: |t| match t.kind {
            PortfolioTransactionKind::Buy | PortfolioTransactionKind::DeliveryInbound => t.amount,
            _ => 0,
        },
        portfolio_sale: |t| match t.kind {
            PortfolioTransactionKind::Sell | PortfolioTransactionKind::DeliveryOutbound => t.amount,
            _ => 0,
        },
    }
}

/// Policy for category-shaped scopes. Transfers cross the scope boundary
/// here and count as external flows, as do the cash and security legs of
/// buys and sells: cash paid out of an in-scope account leaves the scope,
/// a security bought into scope enters it. When a category contains both
/// legs of a trade the two contributions cancel.
pub(crate) fn scoped_policy() -> CashFlowPolicy {
    CashFlowPolicy {
        account_transferal: |t| match t.kind {
            AccountTransactionKind::Deposit
            | AccountTransactionKind::TransferIn
            | AccountTransactionKind::Sell => t.amount,
            AccountTransactionKind::Removal
            | AccountTransactionKind::TransferOut
            | AccountTransactionKind::Buy => -t.amount,
            _ => 0,
        },
        portfolio_transferal: |t| match t.kind {
            PortfolioTransactionKind::DeliveryInbound
            | PortfolioTransactionKind::TransferIn
            | PortfolioTransactionKind::Buy => t.amount,
            PortfolioTransactionKind::DeliveryOutbound
            | PortfolioTransactionKind::TransferOut
            | PortfolioTransactionKind::Sell => -t.amount,
        },
        portfolio_buy: |t| match t.kind {
            PortfolioTransactionKind::Buy
            | PortfolioTransactionKind::DeliveryInbound
            | PortfolioTransactionKind::TransferIn => t.amount,
            _ => 0,
        },
        portfolio_sale: |t| match t.kind {
            PortfolioTransactionKind::Sell
            | PortfolioTransactionKind::DeliveryOutbound
            | PortfolioTransactionKind::TransferOut => t.amount,
            _ => 0,
        },
    }
}

/// Compute the cash-flow-adjusted index for `view` over `interval`.
///
/// `valuation` is consulted once per day and must include every transaction
/// up to and including that day.
pub(crate) fn calculate<V>(
    view: &ScopeView<'_>,
    interval: DateInterval,
    policy: &CashFlowPolicy,
    valuation: V,
    warnings: &mut WarningCollector,
) -> PerformanceIndex
where
    V: Fn(NaiveDate) -> i64,
{
    let size = interval.day_count();
    let dates = interval.days();

    let mut transferals = vec![0i64; size];
    add_daily_contributions(
        &mut transferals,
        &interval,
        view.account_transactions(),
        policy.account_transferal,
    );
    add_daily_contributions(
        &mut transferals,
        &interval,
        view.portfolio_transactions(),
        policy.portfolio_transferal,
    );

    let mut buys = vec![0i64; size];
    add_daily_contributions(
        &mut buys,
        &interval,
        view.portfolio_transactions(),
        policy.portfolio_buy,
    );
    accumulate_in_place(&mut buys);

    let mut sales = vec![0i64; size];
    add_daily_contributions(
        &mut sales,
        &interval,
        view.portfolio_transactions(),
        policy.portfolio_sale,
    );
    accumulate_in_place(&mut sales);

    let mut totals = vec![0i64; size];
    let mut delta = vec![0f64; size];
    let mut accumulated = vec![0f64; size];

    // day zero is the reference value
    totals[0] = valuation(dates[0]);
    let mut previous = totals[0];

    for index in 1..size {
        let total = valuation(dates[index]);
        totals[index] = total;

        let raw_gain = total - transferals[index] - previous;

        if previous == 0 {
            // no basis to measure against; attribute to the day's flow if any
            if raw_gain != 0 {
                if transferals[index] != 0 {
                    delta[index] = raw_gain as f64 / transferals[index] as f64;
                } else {
                    debug!(
                        "Unattributable gain of {} on {}: zero basis and zero flow",
                        raw_gain, dates[index]
                    );
                    warnings.push(
                        dates[index],
                        raw_gain,
                        format!(
                            "Gain/loss of {} on {} cannot be attributed: no assets and no transferals",
                            raw_gain, dates[index]
                        ),
                    );
                }
            }
        } else {
            delta[index] = raw_gain as f64 / previous as f64;
        }

        let divisor = totals[0] + buys[index];
        if divisor != 0 {
            accumulated[index] = (totals[index] + sales[index]) as f64 / divisor as f64 - 1.0;
        }

        previous = total;
    }

    PerformanceIndex::new(
        interval,
        DeltaUnit::Fraction,
        dates,
        totals,
        transferals,
        delta,
        accumulated,
    )
}
