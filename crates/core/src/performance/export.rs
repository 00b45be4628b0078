//! Delimiter-separated export of a performance index.

use std::path::Path;

use csv::{QuoteStyle, WriterBuilder};

use crate::errors::{ExportError, Result};
use crate::performance::performance_model::PerformanceIndex;
use crate::utils::values::ValueFormatter;

impl PerformanceIndex {
    /// Write the index as a semicolon-separated table: one header row, one
    /// data row per day in date order, fields rendered by `formatter` and
    /// never quoted.
    ///
    /// Failures surface as [`crate::Error::Export`]; the in-memory index is
    /// unaffected either way.
    pub fn export_to(&self, path: impl AsRef<Path>, formatter: &dyn ValueFormatter) -> Result<()> {
        let mut writer = WriterBuilder::new()
            .delimiter(b';')
            .quote_style(QuoteStyle::Never)
            .from_path(path)
            .map_err(ExportError::from)?;

        writer
            .write_record(formatter.column_labels())
            .map_err(ExportError::from)?;

        for index in 0..self.len() {
            writer
                .write_record([
                    formatter.date(self.dates()[index]),
                    formatter.amount(self.totals()[index]),
                    formatter.amount(self.transferals()[index]),
                    formatter.percent(self.delta()[index]),
                    formatter.percent(self.accumulated()[index]),
                ])
                .map_err(ExportError::from)?;
        }

        writer.flush().map_err(ExportError::Io)?;
        Ok(())
    }
}
