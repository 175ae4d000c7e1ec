use polars::error::PolarsError;
use std::path::PathBuf;
use std::time::SystemTimeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveDataError {
    #[error("Failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to read metadata for cache file '{0}'")]
    CacheMetadataRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to calculate age of cache file '{0}'")]
    CacheAgeCalculation(PathBuf, #[source] SystemTimeError),

    #[error("Failed to delete stale cache file '{0}'")]
    CacheDeletion(PathBuf, #[source] std::io::Error),

    // Errors during parquet writing (inside blocking task)
    #[error("I/O error writing parquet cache file '{0}'")]
    ParquetWriteIo(PathBuf, #[source] std::io::Error),
    #[error("Encoding error writing parquet cache file '{0}'")]
    ParquetWritePolars(PathBuf, #[source] PolarsError),

    #[error("Failed to scan parquet cache file '{0}'")]
    ParquetScan(PathBuf, #[source] PolarsError),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read response body from {url}")]
    ResponseBody {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to decode archive response from {url}")]
    ResponseDecode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Archive response contains an empty hourly time axis")]
    EmptyTimeAxis,

    #[error("Archive response reports a non-positive sampling interval of {0} s")]
    NonPositiveInterval(i64),

    #[error("Archive response time value {0} is not a representable instant")]
    InvalidTimestamp(i64),

    #[error("Hourly time axis has {found} entries but start/end/interval imply {expected}")]
    AxisLengthMismatch { expected: usize, found: usize },

    #[error("Requested variable '{0}' is missing from the archive response")]
    MissingVariable(&'static str),

    #[error("Variable '{variable}' has {found} values but the time axis has {expected}")]
    LengthMismatch {
        variable: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("I/O error writing CSV output '{0}'")]
    CsvWriteIo(PathBuf, #[source] std::io::Error),

    #[error("Encoding error writing CSV output '{0}'")]
    CsvWritePolars(PathBuf, #[source] PolarsError),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}

impl ArchiveDataError {
    /// Whether the retry collaborator should attempt the request again.
    ///
    /// Transport failures and server-side statuses (5xx, 429) are transient;
    /// everything else, a malformed response in particular, is not.
    pub(crate) fn is_retryable(&self) -> bool {
        match self {
            ArchiveDataError::NetworkRequest(_, _) | ArchiveDataError::ResponseBody { .. } => true,
            ArchiveDataError::HttpStatus { status, .. } => {
                status.is_server_error() || *status == reqwest::StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }
}
