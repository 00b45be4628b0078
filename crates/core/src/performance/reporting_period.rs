//! Reporting periods and their resolution to closed date intervals.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};
use crate::utils::time_utils::get_days_between;

/// A closed calendar interval `[start, end]`. Construction rejects
/// `end < start` before any series is allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateInterval {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateInterval {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(ValidationError::InvalidPeriod(format!(
                "end date {} precedes start date {}",
                end, start
            ))
            .into());
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the interval, both endpoints included.
    pub fn day_count(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    /// Every day of the interval in order, starting at `start`.
    pub fn days(&self) -> Vec<NaiveDate> {
        get_days_between(self.start, self.end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Zero-based day offset of `date` within the interval.
    pub fn day_offset(&self, date: NaiveDate) -> Option<usize> {
        if !self.contains(date) {
            return None;
        }
        Some((date - self.start).num_days() as usize)
    }
}

/// A user-facing reporting period, resolved against a reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReportingPeriod {
    LastDays(u32),
    LastMonths(u32),
    LastYears(u32),
    YearToDate,
    Year(i32),
    Since(NaiveDate),
    FromTo(NaiveDate, NaiveDate),
}

impl ReportingPeriod {
    /// Resolve against the local calendar date.
    pub fn resolve(&self) -> Result<DateInterval> {
        self.resolve_as_of(chrono::Local::now().date_naive())
    }

    /// Resolve against an explicit reference day (deterministic).
    pub fn resolve_as_of(&self, today: NaiveDate) -> Result<DateInterval> {
        match *self {
            ReportingPeriod::LastDays(days) => {
                let start = today - chrono::Duration::days(i64::from(days));
                DateInterval::new(start, today)
            }
            ReportingPeriod::LastMonths(months) => {
                let start = today.checked_sub_months(Months::new(months)).ok_or_else(|| {
                    ValidationError::InvalidPeriod(format!("{} months before {}", months, today))
                })?;
                DateInterval::new(start, today)
            }
            ReportingPeriod::LastYears(years) => {
                let start = today
                    .checked_sub_months(Months::new(years * 12))
                    .ok_or_else(|| {
                        ValidationError::InvalidPeriod(format!("{} years before {}", years, today))
                    })?;
                DateInterval::new(start, today)
            }
            ReportingPeriod::YearToDate => {
                let start = first_of_year(today.year())?;
                DateInterval::new(start, today)
            }
            ReportingPeriod::Year(year) => {
                let start = first_of_year(year)?;
                let end = NaiveDate::from_ymd_opt(year, 12, 31).ok_or_else(|| {
                    ValidationError::InvalidPeriod(format!("year {} out of range", year))
                })?;
                DateInterval::new(start, end)
            }
            ReportingPeriod::Since(start) => DateInterval::new(start, today),
            ReportingPeriod::FromTo(start, end) => DateInterval::new(start, end),
        }
    }
}

fn first_of_year(year: i32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| ValidationError::InvalidPeriod(format!("year {} out of range", year)).into())
}
