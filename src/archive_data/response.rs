//! Wire-format structs for the archive endpoint and their conversion into
//! [`HourlySeries`].
//!
//! The API is queried with `timeformat=unixtime`, so the hourly block carries
//! the time axis as epoch seconds. Per-variable arrays are captured by name
//! through `serde(flatten)`; nothing downstream depends on the order the API
//! happened to serialize them in.

use crate::archive_data::error::ArchiveDataError;
use crate::types::hourly_series::HourlySeries;
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use std::collections::HashMap;

/// Assumed sampling step when the axis has a single sample.
const DEFAULT_INTERVAL_SECONDS: i64 = 3600;

#[derive(Debug, Deserialize)]
pub(crate) struct ArchiveResponse {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub elevation: f64,
    pub utc_offset_seconds: i64,
    pub timezone: String,
    pub timezone_abbreviation: String,
    pub hourly: HourlyBlock,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HourlyBlock {
    pub time: Vec<i64>,
    #[serde(flatten)]
    pub values: HashMap<String, Vec<Option<f64>>>,
}

impl ArchiveResponse {
    /// Derives the sampling axis (start inclusive, end exclusive, interval)
    /// from the reported time array and moves the value arrays across.
    ///
    /// The reported axis is authoritative: the request's nominal date range
    /// plays no part here.
    pub(crate) fn into_series(self) -> Result<HourlySeries, ArchiveDataError> {
        let time = &self.hourly.time;
        let first = *time.first().ok_or(ArchiveDataError::EmptyTimeAxis)?;
        let last = *time.last().ok_or(ArchiveDataError::EmptyTimeAxis)?;
        let interval_seconds = match time.get(1) {
            Some(second) => second - first,
            None => DEFAULT_INTERVAL_SECONDS,
        };
        if interval_seconds <= 0 {
            return Err(ArchiveDataError::NonPositiveInterval(interval_seconds));
        }

        let end_seconds = last + interval_seconds;
        let implied = usize::try_from((end_seconds - first) / interval_seconds)
            .map_err(|_| ArchiveDataError::InvalidTimestamp(end_seconds))?;
        if implied != time.len() {
            return Err(ArchiveDataError::AxisLengthMismatch {
                expected: implied,
                found: time.len(),
            });
        }

        Ok(HourlySeries {
            latitude: self.latitude,
            longitude: self.longitude,
            elevation: self.elevation,
            timezone: self.timezone,
            timezone_abbreviation: self.timezone_abbreviation,
            utc_offset_seconds: self.utc_offset_seconds,
            start: timestamp(first)?,
            end: timestamp(end_seconds)?,
            interval_seconds,
            values: self.hourly.values,
        })
    }
}

fn timestamp(seconds: i64) -> Result<DateTime<Utc>, ArchiveDataError> {
    Utc.timestamp_opt(seconds, 0)
        .single()
        .ok_or(ArchiveDataError::InvalidTimestamp(seconds))
}

#[cfg(test)]
mod tests {
    use super::ArchiveResponse;
    use crate::archive_data::error::ArchiveDataError;
    use chrono::{TimeZone, Utc};

    const SAMPLE: &str = r#"{
        "latitude": 30.0,
        "longitude": 31.25,
        "generationtime_ms": 0.35,
        "utc_offset_seconds": 7200,
        "timezone": "Africa/Cairo",
        "timezone_abbreviation": "EET",
        "elevation": 23.0,
        "hourly_units": { "time": "unixtime", "temperature_2m": "°C" },
        "hourly": {
            "time": [1704067200, 1704070800, 1704074400],
            "temperature_2m": [12.3, null, 14.1],
            "rain": [0.0, 0.2, 0.0]
        }
    }"#;

    #[test]
    fn decodes_axis_and_name_keyed_values() {
        let response: ArchiveResponse = serde_json::from_str(SAMPLE).unwrap();
        let series = response.into_series().unwrap();

        assert_eq!(series.start, Utc.timestamp_opt(1_704_067_200, 0).unwrap());
        assert_eq!(series.end, Utc.timestamp_opt(1_704_078_000, 0).unwrap());
        assert_eq!(series.interval_seconds, 3600);
        assert_eq!(series.len(), 3);
        assert_eq!(series.timezone, "Africa/Cairo");
        assert_eq!(series.utc_offset_seconds, 7200);

        assert_eq!(
            series.values.get("temperature_2m").map(Vec::as_slice),
            Some([Some(12.3), None, Some(14.1)].as_slice())
        );
        assert_eq!(
            series.values.get("rain").map(Vec::as_slice),
            Some([Some(0.0), Some(0.2), Some(0.0)].as_slice())
        );
    }

    #[test]
    fn single_sample_axis_assumes_hourly_interval() {
        let response: ArchiveResponse = serde_json::from_str(
            r#"{
                "latitude": 0.0, "longitude": 0.0, "utc_offset_seconds": 0,
                "timezone": "GMT", "timezone_abbreviation": "GMT",
                "hourly": { "time": [3600] }
            }"#,
        )
        .unwrap();
        let series = response.into_series().unwrap();

        assert_eq!(series.interval_seconds, 3600);
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn empty_time_axis_is_fatal() {
        let response: ArchiveResponse = serde_json::from_str(
            r#"{
                "latitude": 0.0, "longitude": 0.0, "utc_offset_seconds": 0,
                "timezone": "GMT", "timezone_abbreviation": "GMT",
                "hourly": { "time": [] }
            }"#,
        )
        .unwrap();

        assert!(matches!(
            response.into_series(),
            Err(ArchiveDataError::EmptyTimeAxis)
        ));
    }

    #[test]
    fn decreasing_time_axis_is_fatal() {
        let response: ArchiveResponse = serde_json::from_str(
            r#"{
                "latitude": 0.0, "longitude": 0.0, "utc_offset_seconds": 0,
                "timezone": "GMT", "timezone_abbreviation": "GMT",
                "hourly": { "time": [7200, 3600] }
            }"#,
        )
        .unwrap();

        assert!(matches!(
            response.into_series(),
            Err(ArchiveDataError::NonPositiveInterval(-3600))
        ));
    }

    #[test]
    fn gappy_time_axis_is_fatal() {
        let response: ArchiveResponse = serde_json::from_str(
            r#"{
                "latitude": 0.0, "longitude": 0.0, "utc_offset_seconds": 0,
                "timezone": "GMT", "timezone_abbreviation": "GMT",
                "hourly": { "time": [0, 3600, 14400] }
            }"#,
        )
        .unwrap();

        assert!(matches!(
            response.into_series(),
            Err(ArchiveDataError::AxisLengthMismatch {
                expected: 5,
                found: 3
            })
        ));
    }
}
