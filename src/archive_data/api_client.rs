//! HTTP transport against the archive endpoint, with retry as configuration.

use crate::archive_data::error::ArchiveDataError;
use crate::archive_data::response::ArchiveResponse;
use crate::types::archive_request::ArchiveRequest;
use crate::types::hourly_series::HourlySeries;
use crate::types::hourly_variable::HourlyVariable;
use log::{info, warn};
use reqwest::Client;
use std::time::Duration;

const ARCHIVE_ENDPOINT: &str = "https://archive-api.open-meteo.com/v1/archive";

/// Retry behavior of the transport, expressed as data.
///
/// A request that fails with a transient error (connect/timeout, HTTP 5xx,
/// HTTP 429) is attempted up to `max_attempts` times. Attempt `n` (counting
/// from zero) sleeps `backoff_factor * 2^n` seconds before the next try, so
/// the default policy waits 0.2 s, 0.4 s, 0.8 s and 1.6 s between its five
/// attempts. Once attempts are exhausted the last error is returned and the
/// run aborts; there is no partial-result path.
///
/// # Examples
///
/// ```
/// use openmeteo_archive::RetryPolicy;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.max_attempts, 5);
/// assert_eq!(policy.backoff_factor, 0.2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first.
    pub max_attempts: u32,
    /// Base of the exponential backoff curve, in seconds.
    pub backoff_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            backoff_factor: 0.2,
        }
    }
}

impl RetryPolicy {
    pub(crate) fn backoff_delay(&self, attempt: u32) -> Duration {
        let attempt = i32::try_from(attempt).unwrap_or(i32::MAX);
        Duration::from_secs_f64(self.backoff_factor * 2f64.powi(attempt))
    }
}

pub(crate) struct ApiClient {
    http: Client,
    endpoint: String,
    retry: RetryPolicy,
}

impl ApiClient {
    pub fn new(retry: RetryPolicy) -> Self {
        Self {
            http: Client::new(),
            endpoint: ARCHIVE_ENDPOINT.to_string(),
            retry,
        }
    }

    /// Canonical query parameters for an hourly archive request.
    ///
    /// Also the identity of the request for cache keying: two requests with
    /// equal parameter lists hit the same cache entry.
    pub fn query_params(request: &ArchiveRequest) -> Vec<(&'static str, String)> {
        let hourly = request
            .hourly
            .iter()
            .copied()
            .map(HourlyVariable::api_name)
            .collect::<Vec<_>>()
            .join(",");
        vec![
            ("latitude", request.location.0.to_string()),
            ("longitude", request.location.1.to_string()),
            ("start_date", request.start_date.to_string()),
            ("end_date", request.end_date.to_string()),
            ("hourly", hourly),
            ("timezone", request.timezone.clone()),
            ("format", "json".to_string()),
            ("timeformat", "unixtime".to_string()),
        ]
    }

    /// Performs the request, retrying per the configured [`RetryPolicy`],
    /// and decodes the body into an [`HourlySeries`].
    pub async fn fetch_hourly(
        &self,
        request: &ArchiveRequest,
    ) -> Result<HourlySeries, ArchiveDataError> {
        let params = Self::query_params(request);
        let mut attempt = 0;
        loop {
            match self.fetch_once(&params).await {
                Ok(series) => return Ok(series),
                Err(e) if e.is_retryable() && attempt + 1 < self.retry.max_attempts => {
                    let delay = self.retry.backoff_delay(attempt);
                    warn!(
                        "Archive request attempt {} failed ({}), retrying in {:.1} s",
                        attempt + 1,
                        e,
                        delay.as_secs_f64()
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn fetch_once(
        &self,
        params: &[(&'static str, String)],
    ) -> Result<HourlySeries, ArchiveDataError> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(params)
            .send()
            .await
            .map_err(|e| ArchiveDataError::NetworkRequest(self.endpoint.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", self.endpoint, e);
                return Err(if let Some(status) = e.status() {
                    ArchiveDataError::HttpStatus {
                        url: self.endpoint.clone(),
                        status,
                        source: e,
                    }
                } else {
                    ArchiveDataError::NetworkRequest(self.endpoint.clone(), e)
                });
            }
        };

        let body = response
            .bytes()
            .await
            .map_err(|e| ArchiveDataError::ResponseBody {
                url: self.endpoint.clone(),
                source: e,
            })?;
        let decoded: ArchiveResponse =
            serde_json::from_slice(&body).map_err(|e| ArchiveDataError::ResponseDecode {
                url: self.endpoint.clone(),
                source: e,
            })?;
        let series = decoded.into_series()?;

        info!(
            "Fetched {} hourly samples for {}°N {}°E, elevation {} m, timezone {} {} (GMT{:+} s)",
            series.len(),
            series.latitude,
            series.longitude,
            series.elevation,
            series.timezone,
            series.timezone_abbreviation,
            series.utc_offset_seconds,
        );
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiClient, RetryPolicy};
    use crate::open_meteo::LatLon;
    use crate::types::archive_request::ArchiveRequest;
    use crate::types::hourly_variable::HourlyVariable;
    use chrono::NaiveDate;
    use std::time::Duration;

    #[test]
    fn backoff_follows_the_documented_curve() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.backoff_delay(0), Duration::from_millis(200));
        assert_eq!(policy.backoff_delay(1), Duration::from_millis(400));
        assert_eq!(policy.backoff_delay(2), Duration::from_millis(800));
        assert_eq!(policy.backoff_delay(3), Duration::from_millis(1600));
    }

    #[test]
    fn query_params_match_the_request() {
        let request = ArchiveRequest::builder()
            .location(LatLon(30.0444, 31.2357))
            .start_date(NaiveDate::from_ymd_opt(2021, 8, 10).unwrap())
            .end_date(NaiveDate::from_ymd_opt(2024, 8, 9).unwrap())
            .hourly(vec![
                HourlyVariable::Temperature2m,
                HourlyVariable::RelativeHumidity2m,
                HourlyVariable::DewPoint2m,
            ])
            .timezone("Africa/Cairo")
            .build();

        let params = ApiClient::query_params(&request);

        assert_eq!(
            params,
            vec![
                ("latitude", "30.0444".to_string()),
                ("longitude", "31.2357".to_string()),
                ("start_date", "2021-08-10".to_string()),
                ("end_date", "2024-08-09".to_string()),
                (
                    "hourly",
                    "temperature_2m,relative_humidity_2m,dew_point_2m".to_string()
                ),
                ("timezone", "Africa/Cairo".to_string()),
                ("format", "json".to_string()),
                ("timeformat", "unixtime".to_string()),
            ]
        );
    }
}
