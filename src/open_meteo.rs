//! This module provides the main entry point for fetching historical weather
//! data from the Open-Meteo archive API. Build an [`ArchiveRequest`]
//! describing the location, date window and variables, then hand it to
//! [`OpenMeteo::hourly`].

use crate::archive_data::api_client::{ApiClient, RetryPolicy};
use crate::archive_data::frame_fetcher::FrameFetcher;
use crate::error::OpenMeteoError;
use crate::types::archive_request::ArchiveRequest;
use crate::types::hourly_frame::HourlyLazyFrame;
use crate::utils::{ensure_cache_dir_exists, get_cache_dir};
use bon::bon;
use std::path::PathBuf;
use std::time::Duration;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second
/// (index 1). Both values are represented as `f64`.
///
/// # Examples
///
/// ```
/// use openmeteo_archive::LatLon;
///
/// let cairo = LatLon(30.0444, 31.2357);
/// assert_eq!(cairo.0, 30.0444); // Latitude
/// assert_eq!(cairo.1, 31.2357); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

/// The client for the Open-Meteo historical archive.
///
/// One instance owns the HTTP transport (with its retry policy) and the
/// response cache. Fetched responses are flattened into one row per hourly
/// timestamp, persisted as Parquet under the cache directory, and returned as
/// Polars `LazyFrame`s; repeating a request is served from the cache without
/// touching the network.
///
/// Create an instance with [`OpenMeteo::new()`] for default behavior, or
/// [`OpenMeteo::configured()`] to override the cache location, the retry
/// policy, or the cache TTL.
///
/// # Examples
///
/// ```rust
/// # use openmeteo_archive::{OpenMeteo, OpenMeteoError};
/// # async fn run() -> Result<(), OpenMeteoError> {
/// let client = OpenMeteo::new().await?;
/// // Now you can fetch hourly archive data through the client.
/// # Ok(())
/// # }
/// ```
pub struct OpenMeteo {
    fetcher: FrameFetcher,
}

#[bon]
impl OpenMeteo {
    /// Creates a client using the default cache directory and retry policy.
    ///
    /// The default cache directory is determined using the `dirs` crate,
    /// typically under the user's cache directory (e.g.
    /// `~/.cache/openmeteo_archive_cache` on Linux). The cache never
    /// expires, matching the archive's append-only nature: a day once
    /// published does not change.
    ///
    /// # Errors
    ///
    /// Returns [`OpenMeteoError::CacheDirResolution`] if the default cache
    /// directory cannot be determined, and
    /// [`OpenMeteoError::CacheDirCreation`] if it cannot be created.
    pub async fn new() -> Result<Self, OpenMeteoError> {
        Self::configured().call().await
    }

    /// Creates a client with a specified cache directory.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use openmeteo_archive::{OpenMeteo, OpenMeteoError};
    /// # use std::path::Path;
    /// # async fn run() -> Result<(), OpenMeteoError> {
    /// let cache_path = Path::new("/tmp/archive-cache").to_path_buf();
    /// let client = OpenMeteo::with_cache_folder(cache_path).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn with_cache_folder(cache_folder: PathBuf) -> Result<Self, OpenMeteoError> {
        Self::configured().cache_folder(cache_folder).call().await
    }

    /// Creates a client with explicit policy configuration.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.cache_folder(PathBuf)`: Optional. Where to persist flattened
    ///   responses. Defaults to the system cache directory.
    /// * `.retry_policy(RetryPolicy)`: Optional. Transport retry behavior.
    ///   Defaults to 5 attempts with a 0.2 s backoff factor.
    /// * `.cache_ttl(Duration)`: Optional. Maximum age of a cached response
    ///   before it is refetched. Defaults to no expiry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use openmeteo_archive::{OpenMeteo, OpenMeteoError, RetryPolicy};
    /// # use std::time::Duration;
    /// # async fn run() -> Result<(), OpenMeteoError> {
    /// let client = OpenMeteo::configured()
    ///     .retry_policy(RetryPolicy { max_attempts: 3, backoff_factor: 0.5 })
    ///     .cache_ttl(Duration::from_secs(24 * 3600))
    ///     .call()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn configured(
        cache_folder: Option<PathBuf>,
        retry_policy: Option<RetryPolicy>,
        cache_ttl: Option<Duration>,
    ) -> Result<Self, OpenMeteoError> {
        let cache_folder = match cache_folder {
            Some(folder) => folder,
            None => get_cache_dir().map_err(OpenMeteoError::CacheDirResolution)?,
        };
        ensure_cache_dir_exists(&cache_folder)
            .await
            .map_err(|e| OpenMeteoError::CacheDirCreation(cache_folder.clone(), e))?;

        let api = ApiClient::new(retry_policy.unwrap_or_default());
        Ok(Self {
            fetcher: FrameFetcher::new(&cache_folder, api, cache_ttl),
        })
    }

    /// Fetches hourly archive data for one request.
    ///
    /// Exactly one blocking network call is made on a cache miss; on a cache
    /// hit the data comes straight from disk. The returned
    /// [`HourlyLazyFrame`] has a `date` column of UTC instants plus one
    /// column per requested variable, in request order.
    ///
    /// # Errors
    ///
    /// Any transport failure (after the retry policy is exhausted), malformed
    /// response, or cache I/O failure is returned as
    /// [`OpenMeteoError::ArchiveData`]; there is no partial result.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use openmeteo_archive::{ArchiveRequest, HourlyVariable, LatLon, OpenMeteo};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = OpenMeteo::new().await?;
    /// let request = ArchiveRequest::rolling_days(
    ///     LatLon(30.0444, 31.2357),
    ///     3 * 365,
    ///     HourlyVariable::all().to_vec(),
    ///     "Africa/Cairo",
    /// );
    ///
    /// let df = client.hourly(&request).await?.frame.collect()?;
    /// assert_eq!(df.width(), 31); // date + 30 variables
    /// # Ok(())
    /// # }
    /// ```
    pub async fn hourly(&self, request: &ArchiveRequest) -> Result<HourlyLazyFrame, OpenMeteoError> {
        let frame = self.fetcher.get_cache_lazyframe(request).await?;
        Ok(HourlyLazyFrame::new(frame))
    }
}
