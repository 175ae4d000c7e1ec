//! Downloads three years of hourly weather history for Cairo and writes it
//! to a CSV file next to the working directory.

use log::info;
use openmeteo_archive::{ArchiveRequest, HourlyVariable, LatLon, OpenMeteo, OpenMeteoError};
use std::path::Path;

/// Cairo city center.
const CAIRO: LatLon = LatLon(30.0444, 31.2357);
const CAIRO_TIMEZONE: &str = "Africa/Cairo";
/// Three years of 24-hour days, not calendar-aware.
const LOOKBACK_DAYS: i64 = 3 * 365;
const OUTPUT_PATH: &str = "cairo_historical_weather_3_years.csv";

#[tokio::main]
async fn main() -> Result<(), OpenMeteoError> {
    env_logger::init();

    let client = OpenMeteo::new().await?;
    let request = ArchiveRequest::rolling_days(
        CAIRO,
        LOOKBACK_DAYS,
        HourlyVariable::all().to_vec(),
        CAIRO_TIMEZONE,
    );
    info!(
        "Requesting hourly archive data for {:?} from {} to {}",
        CAIRO, request.start_date, request.end_date
    );

    let hourly = client.hourly(&request).await?;
    let frame = hourly.write_csv(Path::new(OUTPUT_PATH))?;

    println!(
        "Wrote {} rows x {} columns to {}",
        frame.height(),
        frame.width(),
        OUTPUT_PATH
    );
    println!("{frame}");
    Ok(())
}
