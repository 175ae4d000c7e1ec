//! The immutable request descriptor consumed by [`crate::OpenMeteo::hourly`].

use crate::open_meteo::LatLon;
use crate::types::hourly_variable::HourlyVariable;
use bon::Builder;
use chrono::{Duration, NaiveDate, Utc};

/// Describes one request against the archive endpoint.
///
/// The descriptor is a plain immutable value: build it once, hand it to the
/// client, and reuse or discard it. Coordinates and dates are passed through
/// to the API without validation; the archive is authoritative for what it
/// actually covers.
///
/// The order of `hourly` is significant: it becomes the column order of the
/// flattened output table.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use openmeteo_archive::{ArchiveRequest, HourlyVariable, LatLon};
///
/// let request = ArchiveRequest::builder()
///     .location(LatLon(52.52, 13.40))
///     .start_date(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap())
///     .end_date(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap())
///     .hourly(vec![HourlyVariable::Temperature2m, HourlyVariable::Rain])
///     .timezone("Europe/Berlin")
///     .build();
///
/// assert_eq!(request.hourly.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct ArchiveRequest {
    /// Geographical coordinate to sample.
    pub location: LatLon,
    /// First day of the requested window (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the requested window (inclusive).
    pub end_date: NaiveDate,
    /// Variables to request, in output column order.
    pub hourly: Vec<HourlyVariable>,
    /// IANA timezone identifier sent to the API.
    #[builder(into, default = String::from("GMT"))]
    pub timezone: String,
}

impl ArchiveRequest {
    /// Builds a request for a rolling window of `days` days ending today.
    ///
    /// The window is exactly `days` times 24 hours, not calendar-aware, so a
    /// three-year lookback of `3 * 365` days drifts by the number of leap
    /// days it spans.
    ///
    /// ```
    /// use openmeteo_archive::{ArchiveRequest, HourlyVariable, LatLon};
    ///
    /// let request = ArchiveRequest::rolling_days(
    ///     LatLon(30.0444, 31.2357),
    ///     3 * 365,
    ///     HourlyVariable::all().to_vec(),
    ///     "Africa/Cairo",
    /// );
    /// assert_eq!(request.end_date - request.start_date, chrono::Duration::days(1095));
    /// ```
    pub fn rolling_days(
        location: LatLon,
        days: i64,
        hourly: Vec<HourlyVariable>,
        timezone: impl Into<String>,
    ) -> Self {
        let end_date = Utc::now().date_naive();
        let start_date = end_date - Duration::days(days);
        Self {
            location,
            start_date,
            end_date,
            hourly,
            timezone: timezone.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ArchiveRequest;
    use crate::open_meteo::LatLon;
    use crate::types::hourly_variable::HourlyVariable;
    use chrono::{Duration, NaiveDate, Utc};

    #[test]
    fn rolling_days_spans_exactly_the_requested_days() {
        let request = ArchiveRequest::rolling_days(
            LatLon(30.0444, 31.2357),
            3 * 365,
            HourlyVariable::all().to_vec(),
            "Africa/Cairo",
        );

        assert_eq!(request.end_date, Utc::now().date_naive());
        assert_eq!(request.end_date - request.start_date, Duration::days(1095));
        assert_eq!(request.hourly.len(), 30);
        assert_eq!(request.timezone, "Africa/Cairo");
    }

    #[test]
    fn builder_defaults_timezone_to_gmt() {
        let request = ArchiveRequest::builder()
            .location(LatLon(0.0, 0.0))
            .start_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
            .end_date(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap())
            .hourly(vec![HourlyVariable::Rain])
            .build();

        assert_eq!(request.timezone, "GMT");
    }

    #[test]
    fn variable_order_is_preserved() {
        let hourly = vec![
            HourlyVariable::SnowDepth,
            HourlyVariable::Temperature2m,
            HourlyVariable::CloudCover,
        ];
        let request = ArchiveRequest::builder()
            .location(LatLon(1.0, 2.0))
            .start_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
            .end_date(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap())
            .hourly(hourly.clone())
            .build();

        assert_eq!(request.hourly, hourly);
    }
}
