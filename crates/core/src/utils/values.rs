//! Rendering of dates, amounts and percentages for export.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::constants::{MONEY_DECIMAL_PLACES, PERCENT_DISPLAY_PRECISION};

/// Locale-aware rendering seam for exported values. The engine only ever
/// hands over raw values; how they read is the caller's concern.
pub trait ValueFormatter {
    /// Header labels for the five export columns, in column order.
    fn column_labels(&self) -> [String; 5];

    fn date(&self, date: NaiveDate) -> String;

    /// Render an amount given in the smallest currency unit.
    fn amount(&self, amount: i64) -> String;

    /// Render a fractional value as a percentage.
    fn percent(&self, value: f64) -> String;
}

/// English default: ISO dates, two-decimal amounts and percentages.
#[derive(Debug, Clone, Default)]
pub struct DefaultValueFormatter;

impl ValueFormatter for DefaultValueFormatter {
    fn column_labels(&self) -> [String; 5] {
        [
            "Date",
            "Value",
            "Transferals",
            "Delta%",
            "CumulativePerformance%",
        ]
        .map(String::from)
    }

    fn date(&self, date: NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    fn amount(&self, amount: i64) -> String {
        Decimal::new(amount, MONEY_DECIMAL_PLACES).to_string()
    }

    fn percent(&self, value: f64) -> String {
        format!("{:.*}", PERCENT_DISPLAY_PRECISION, value * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn amounts_render_in_major_units() {
        let formatter = DefaultValueFormatter;
        assert_eq!(formatter.amount(123_456), dec!(1234.56).to_string());
        assert_eq!(formatter.amount(0), "0.00");
        assert_eq!(formatter.amount(-50), "-0.50");
    }

    #[test]
    fn percentages_render_with_two_decimals() {
        let formatter = DefaultValueFormatter;
        assert_eq!(formatter.percent(0.0), "0.00");
        assert_eq!(formatter.percent(0.01), "1.00");
        assert_eq!(formatter.percent(-0.1234), "-12.34");
    }

    #[test]
    fn dates_render_iso() {
        let formatter = DefaultValueFormatter;
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(formatter.date(date), "2024-03-05");
    }
}
