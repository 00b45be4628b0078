//! Performance index result container and calculation warnings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::performance::reporting_period::DateInterval;

/// Semantic unit of an index's `delta` series.
///
/// The cash-flow-adjusted index reports daily returns as fractions; the
/// virtual-share index reports absolute unit-price differences. Consumers
/// must not mix the two, so every index carries its unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeltaUnit {
    /// `delta[i]` is a fractional day-over-day return.
    Fraction,
    /// `delta[i]` is an absolute difference of NAV unit prices.
    NavUnits,
}

/// Diagnostic condition raised during a calculation. Warnings never abort a
/// calculation; the day in question receives a defined fallback value.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationWarning {
    pub date: NaiveDate,
    pub value: i64,
    pub message: String,
}

/// Ordered, append-only collector of calculation warnings. The engines only
/// ever append; surfacing the content is the caller's concern.
#[derive(Debug, Default)]
pub struct WarningCollector {
    warnings: Vec<CalculationWarning>,
}

impl WarningCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, date: NaiveDate, value: i64, message: impl Into<String>) {
        self.warnings.push(CalculationWarning {
            date,
            value,
            message: message.into(),
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &CalculationWarning> {
        self.warnings.iter()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn into_inner(self) -> Vec<CalculationWarning> {
        self.warnings
    }
}

/// A fully computed performance index: five parallel daily series over a
/// closed reporting interval. Immutable once built.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceIndex {
    interval: DateInterval,
    delta_unit: DeltaUnit,
    dates: Vec<NaiveDate>,
    totals: Vec<i64>,
    transferals: Vec<i64>,
    delta: Vec<f64>,
    accumulated: Vec<f64>,
}

impl PerformanceIndex {
    pub(crate) fn new(
        interval: DateInterval,
        delta_unit: DeltaUnit,
        dates: Vec<NaiveDate>,
        totals: Vec<i64>,
        transferals: Vec<i64>,
        delta: Vec<f64>,
        accumulated: Vec<f64>,
    ) -> Self {
        debug_assert_eq!(dates.len(), interval.day_count());
        debug_assert_eq!(totals.len(), dates.len());
        debug_assert_eq!(transferals.len(), dates.len());
        debug_assert_eq!(delta.len(), dates.len());
        debug_assert_eq!(accumulated.len(), dates.len());
        debug_assert_eq!(dates.first().copied(), Some(interval.start()));
        debug_assert_eq!(dates.last().copied(), Some(interval.end()));
        Self {
            interval,
            delta_unit,
            dates,
            totals,
            transferals,
            delta,
            accumulated,
        }
    }

    pub fn interval(&self) -> DateInterval {
        self.interval
    }

    pub fn delta_unit(&self) -> DeltaUnit {
        self.delta_unit
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Absolute valuation per day, in the smallest currency unit.
    pub fn totals(&self) -> &[i64] {
        &self.totals
    }

    /// Net external cash flow attributed to each day. The exact inclusion
    /// rules are engine-specific.
    pub fn transferals(&self) -> &[i64] {
        &self.transferals
    }

    /// Day-over-day change, in the unit reported by `delta_unit`.
    pub fn delta(&self) -> &[f64] {
        &self.delta
    }

    /// Cumulative return since day zero.
    pub fn accumulated(&self) -> &[f64] {
        &self.accumulated
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// First day with a nonzero valuation, scanning from day zero.
    pub fn first_data_point(&self) -> Option<NaiveDate> {
        self.totals
            .iter()
            .zip(&self.dates)
            .find(|(total, _)| **total != 0)
            .map(|(_, date)| *date)
    }
}
