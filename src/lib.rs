//! Client for the Open-Meteo historical weather archive.
//!
//! This crate downloads hourly meteorological variables from the
//! [Open-Meteo archive API](https://open-meteo.com/en/docs/historical-weather-api)
//! and exposes them as Polars `LazyFrame`s. Responses are flattened into one
//! row per hourly timestamp and cached on disk as Parquet, so repeating a
//! request never re-hits the network.
//!
//! ```no_run
//! use openmeteo_archive::{ArchiveRequest, HourlyVariable, LatLon, OpenMeteo, OpenMeteoError};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), OpenMeteoError> {
//! let client = OpenMeteo::new().await?;
//! let request = ArchiveRequest::rolling_days(
//!     LatLon(30.0444, 31.2357),
//!     3 * 365,
//!     HourlyVariable::all().to_vec(),
//!     "Africa/Cairo",
//! );
//! let df = client.hourly(&request).await?.frame.collect()?;
//! println!("{df}");
//! # Ok(())
//! # }
//! ```

mod archive_data;
mod error;
mod open_meteo;
mod types;
mod utils;

pub use error::OpenMeteoError;
pub use open_meteo::*;

pub use archive_data::api_client::RetryPolicy;
pub use archive_data::error::ArchiveDataError;

pub use types::archive_request::*;
pub use types::hourly_frame::*;
pub use types::hourly_series::*;
pub use types::hourly_variable::*;
