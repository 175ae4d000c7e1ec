//! A lazy wrapper over flattened hourly archive data.

use crate::archive_data::error::ArchiveDataError;
use chrono::{DateTime, Utc};
use polars::prelude::{col, lit, CsvWriter, DataFrame, Expr, LazyFrame, SerWriter};
use std::fs::File;
use std::path::Path;

/// A Polars `LazyFrame` holding one flattened hourly response.
///
/// The frame has a `date` column of UTC instants followed by one `f64` column
/// per requested variable, in request order. Rows are in axis order; nothing
/// is sorted or deduplicated.
///
/// Instances come from [`crate::OpenMeteo::hourly`]. The wrapped frame is
/// public, so any Polars operation is available; the methods here cover the
/// common cases.
#[derive(Clone)]
pub struct HourlyLazyFrame {
    /// The underlying Polars LazyFrame.
    pub frame: LazyFrame,
}

impl HourlyLazyFrame {
    /// Wraps an existing `LazyFrame` with the expected schema.
    pub fn new(frame: LazyFrame) -> Self {
        Self { frame }
    }

    /// Applies an arbitrary Polars predicate, lazily.
    ///
    /// ```no_run
    /// # use openmeteo_archive::{ArchiveRequest, HourlyVariable, LatLon, OpenMeteo};
    /// use polars::prelude::{col, lit};
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = OpenMeteo::new().await?;
    /// # let request = ArchiveRequest::rolling_days(
    /// #     LatLon(30.0444, 31.2357), 30, vec![HourlyVariable::Temperature2m], "Africa/Cairo");
    /// let hourly = client.hourly(&request).await?;
    /// let hot = hourly.filter(col("temperature_2m").gt(lit(35.0f64)));
    /// println!("{}", hot.frame.collect()?);
    /// # Ok(())
    /// # }
    /// ```
    pub fn filter(&self, predicate: Expr) -> HourlyLazyFrame {
        HourlyLazyFrame::new(self.frame.clone().filter(predicate))
    }

    /// Keeps only rows whose instant lies in `[start, end]` (inclusive).
    ///
    /// The `date` column is timezone-naive UTC internally, so the bounds are
    /// compared through their naive UTC representation.
    pub fn get_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> HourlyLazyFrame {
        self.filter(
            col("date")
                .gt_eq(lit(start.naive_utc()))
                .and(col("date").lt_eq(lit(end.naive_utc()))),
        )
    }

    /// Collects the frame and writes it as a comma-separated table.
    ///
    /// The output has a header row (`date,<variable>,...`), no index column,
    /// and floats encoded with enough precision to round-trip exactly.
    /// Returns the collected frame so callers can inspect what was written.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveDataError::CsvWriteIo`] if the file cannot be
    /// created, [`ArchiveDataError::CsvWritePolars`] if encoding fails, and
    /// [`ArchiveDataError::DataFrameProcessing`] if collecting the lazy
    /// frame fails.
    pub fn write_csv(&self, path: &Path) -> Result<DataFrame, ArchiveDataError> {
        let mut df = self.frame.clone().collect()?;
        let file = File::create(path)
            .map_err(|e| ArchiveDataError::CsvWriteIo(path.to_path_buf(), e))?;
        CsvWriter::new(file)
            .include_header(true)
            .finish(&mut df)
            .map_err(|e| ArchiveDataError::CsvWritePolars(path.to_path_buf(), e))?;
        Ok(df)
    }
}
