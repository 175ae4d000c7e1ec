//! The decoded shape of one hourly archive response.

use crate::types::hourly_variable::HourlyVariable;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

/// One decoded hourly response: a sampling axis plus per-variable arrays.
///
/// The axis is described by `start` (inclusive), `end` (exclusive) and
/// `interval_seconds`, exactly as the API reports its coverage. The value
/// arrays are keyed by API variable name rather than by position, so a
/// response that reorders variables still decodes correctly.
///
/// Values are `None` where the archive has no measurement (JSON `null`).
#[derive(Debug, Clone, PartialEq)]
pub struct HourlySeries {
    /// Latitude of the grid cell the API actually sampled.
    pub latitude: f64,
    /// Longitude of the grid cell the API actually sampled.
    pub longitude: f64,
    /// Elevation of the grid cell, meters above sea level.
    pub elevation: f64,
    /// Resolved IANA timezone name.
    pub timezone: String,
    /// Timezone abbreviation, e.g. `EET`.
    pub timezone_abbreviation: String,
    /// Offset of the resolved timezone from GMT, in seconds.
    pub utc_offset_seconds: i64,
    /// First sampled instant (inclusive).
    pub start: DateTime<Utc>,
    /// End of the sampled range (exclusive).
    pub end: DateTime<Utc>,
    /// Sampling step, in seconds. Always positive.
    pub interval_seconds: i64,
    /// Per-variable value arrays, keyed by API name.
    pub values: HashMap<String, Vec<Option<f64>>>,
}

impl HourlySeries {
    /// Number of instants on the sampling axis, `(end - start) / interval`.
    pub fn len(&self) -> usize {
        if self.interval_seconds <= 0 {
            return 0;
        }
        let span = (self.end - self.start).num_seconds();
        usize::try_from(span / self.interval_seconds).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Generates the timestamp axis: `start`, stepping by the reported
    /// interval, stopping strictly before `end`.
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use openmeteo_archive::HourlySeries;
    /// use std::collections::HashMap;
    ///
    /// let series = HourlySeries {
    ///     latitude: 0.0,
    ///     longitude: 0.0,
    ///     elevation: 0.0,
    ///     timezone: "GMT".to_string(),
    ///     timezone_abbreviation: "GMT".to_string(),
    ///     utc_offset_seconds: 0,
    ///     start: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    ///     end: Utc.with_ymd_and_hms(2024, 1, 1, 3, 0, 0).unwrap(),
    ///     interval_seconds: 3600,
    ///     values: HashMap::new(),
    /// };
    ///
    /// let axis = series.time_axis();
    /// assert_eq!(axis.len(), 3);
    /// assert_eq!(axis[2], Utc.with_ymd_and_hms(2024, 1, 1, 2, 0, 0).unwrap());
    /// ```
    pub fn time_axis(&self) -> Vec<DateTime<Utc>> {
        if self.interval_seconds <= 0 {
            return Vec::new();
        }
        let step = Duration::seconds(self.interval_seconds);
        let mut axis = Vec::with_capacity(self.len());
        let mut instant = self.start;
        while instant < self.end {
            axis.push(instant);
            instant += step;
        }
        axis
    }

    /// The value array for `variable`, if the response carried it.
    pub fn variable(&self, variable: HourlyVariable) -> Option<&[Option<f64>]> {
        self.values.get(variable.api_name()).map(Vec::as_slice)
    }
}
