//! Indices derived from an already-computed client index.
//!
//! Security and inflation benchmarks reuse the client index's date axis
//! instead of recomputing snapshots, so derived series are always identical
//! in length and alignment to their source.

use chrono::Datelike;

use crate::ledger::{Client, ConsumerPriceIndex, Security};
use crate::performance::performance_model::{DeltaUnit, PerformanceIndex, WarningCollector};

/// Daily and rebased cumulative returns of an integer level series.
/// Days before the first nonzero level carry zero returns.
fn rebased_returns(totals: &[i64]) -> (Vec<f64>, Vec<f64>) {
    let size = totals.len();
    let mut delta = vec![0f64; size];
    let mut accumulated = vec![0f64; size];

    for index in 1..size {
        if totals[index - 1] != 0 {
            delta[index] = totals[index] as f64 / totals[index - 1] as f64 - 1.0;
        }
    }

    if let Some(anchor) = totals.iter().position(|t| *t != 0) {
        let base = totals[anchor] as f64;
        for index in anchor..size {
            accumulated[index] = totals[index] as f64 / base - 1.0;
        }
    }

    (delta, accumulated)
}

/// Security benchmark on the client index's axis: the level is the latest
/// quote on or before each day, rebased at the first quoted day.
pub(crate) fn calculate_security(
    client_index: &PerformanceIndex,
    security: &Security,
    warnings: &mut WarningCollector,
) -> PerformanceIndex {
    let dates = client_index.dates().to_vec();
    let totals: Vec<i64> = dates
        .iter()
        .map(|d| security.price_on_or_before(*d).unwrap_or(0))
        .collect();

    if totals.iter().all(|t| *t == 0) {
        warnings.push(
            client_index.interval().start(),
            0,
            format!(
                "No quotes for {} within the reporting period",
                security.name
            ),
        );
    }

    let (delta, accumulated) = rebased_returns(&totals);
    let size = totals.len();

    PerformanceIndex::new(
        client_index.interval(),
        DeltaUnit::Fraction,
        dates,
        totals,
        vec![0; size],
        delta,
        accumulated,
    )
}

/// Latest CPI level published for a month at or before `date`'s month.
fn level_on_or_before(entries: &[ConsumerPriceIndex], date: chrono::NaiveDate) -> Option<i64> {
    entries
        .iter()
        .filter(|e| (e.year, e.month) <= (date.year(), date.month()))
        .max_by_key(|e| (e.year, e.month))
        .map(|e| e.index)
}

/// Inflation benchmark on the client index's axis, from the ledger's
/// monthly consumer-price-index levels.
pub(crate) fn calculate_consumer_price_index(
    client_index: &PerformanceIndex,
    client: &Client,
    warnings: &mut WarningCollector,
) -> PerformanceIndex {
    let dates = client_index.dates().to_vec();
    let totals: Vec<i64> = dates
        .iter()
        .map(|d| level_on_or_before(&client.consumer_price_index, *d).unwrap_or(0))
        .collect();

    if totals.iter().all(|t| *t == 0) {
        warnings.push(
            client_index.interval().start(),
            0,
            "No consumer price index data within the reporting period".to_string(),
        );
    }

    let (delta, accumulated) = rebased_returns(&totals);
    let size = totals.len();

    PerformanceIndex::new(
        client_index.interval(),
        DeltaUnit::Fraction,
        dates,
        totals,
        vec![0; size],
        delta,
        accumulated,
    )
}
