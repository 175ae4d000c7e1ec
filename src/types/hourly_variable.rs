//! The hourly meteorological variables exposed by the Open-Meteo archive API.

use std::fmt;

/// An hourly variable that can be requested from the archive endpoint.
///
/// Each variant maps to one `hourly=` query-parameter name and to one column
/// of the flattened output table. [`HourlyVariable::all`] returns every
/// variable in the order the archive API documents them, which is also the
/// column order used by the `cairo-history` binary.
///
/// # Examples
///
/// ```
/// use openmeteo_archive::HourlyVariable;
///
/// assert_eq!(HourlyVariable::Temperature2m.api_name(), "temperature_2m");
/// assert_eq!(HourlyVariable::all().len(), 30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HourlyVariable {
    /// Air temperature at 2 meters above ground.
    Temperature2m,
    /// Relative humidity at 2 meters above ground.
    RelativeHumidity2m,
    /// Dew point at 2 meters above ground.
    DewPoint2m,
    /// Perceived ("feels like") temperature.
    ApparentTemperature,
    /// Total precipitation (rain, showers, snow) sum.
    Precipitation,
    Rain,
    Snowfall,
    SnowDepth,
    /// WMO weather interpretation code.
    WeatherCode,
    /// Atmospheric pressure reduced to mean sea level.
    PressureMsl,
    SurfacePressure,
    /// Total cloud cover as an area fraction.
    CloudCover,
    CloudCoverLow,
    CloudCoverMid,
    CloudCoverHigh,
    /// FAO-56 reference evapotranspiration.
    Et0FaoEvapotranspiration,
    VapourPressureDeficit,
    WindSpeed10m,
    WindSpeed100m,
    WindDirection10m,
    WindDirection100m,
    WindGusts10m,
    SoilTemperature0To7cm,
    SoilTemperature7To28cm,
    SoilTemperature28To100cm,
    SoilTemperature100To255cm,
    SoilMoisture0To7cm,
    SoilMoisture7To28cm,
    SoilMoisture28To100cm,
    SoilMoisture100To255cm,
}

impl HourlyVariable {
    /// The name used on the wire and as the output column header.
    pub const fn api_name(self) -> &'static str {
        match self {
            HourlyVariable::Temperature2m => "temperature_2m",
            HourlyVariable::RelativeHumidity2m => "relative_humidity_2m",
            HourlyVariable::DewPoint2m => "dew_point_2m",
            HourlyVariable::ApparentTemperature => "apparent_temperature",
            HourlyVariable::Precipitation => "precipitation",
            HourlyVariable::Rain => "rain",
            HourlyVariable::Snowfall => "snowfall",
            HourlyVariable::SnowDepth => "snow_depth",
            HourlyVariable::WeatherCode => "weather_code",
            HourlyVariable::PressureMsl => "pressure_msl",
            HourlyVariable::SurfacePressure => "surface_pressure",
            HourlyVariable::CloudCover => "cloud_cover",
            HourlyVariable::CloudCoverLow => "cloud_cover_low",
            HourlyVariable::CloudCoverMid => "cloud_cover_mid",
            HourlyVariable::CloudCoverHigh => "cloud_cover_high",
            HourlyVariable::Et0FaoEvapotranspiration => "et0_fao_evapotranspiration",
            HourlyVariable::VapourPressureDeficit => "vapour_pressure_deficit",
            HourlyVariable::WindSpeed10m => "wind_speed_10m",
            HourlyVariable::WindSpeed100m => "wind_speed_100m",
            HourlyVariable::WindDirection10m => "wind_direction_10m",
            HourlyVariable::WindDirection100m => "wind_direction_100m",
            HourlyVariable::WindGusts10m => "wind_gusts_10m",
            HourlyVariable::SoilTemperature0To7cm => "soil_temperature_0_to_7cm",
            HourlyVariable::SoilTemperature7To28cm => "soil_temperature_7_to_28cm",
            HourlyVariable::SoilTemperature28To100cm => "soil_temperature_28_to_100cm",
            HourlyVariable::SoilTemperature100To255cm => "soil_temperature_100_to_255cm",
            HourlyVariable::SoilMoisture0To7cm => "soil_moisture_0_to_7cm",
            HourlyVariable::SoilMoisture7To28cm => "soil_moisture_7_to_28cm",
            HourlyVariable::SoilMoisture28To100cm => "soil_moisture_28_to_100cm",
            HourlyVariable::SoilMoisture100To255cm => "soil_moisture_100_to_255cm",
        }
    }

    /// Every archive variable, in the order the API documents them.
    pub const fn all() -> [HourlyVariable; 30] {
        [
            HourlyVariable::Temperature2m,
            HourlyVariable::RelativeHumidity2m,
            HourlyVariable::DewPoint2m,
            HourlyVariable::ApparentTemperature,
            HourlyVariable::Precipitation,
            HourlyVariable::Rain,
            HourlyVariable::Snowfall,
            HourlyVariable::SnowDepth,
            HourlyVariable::WeatherCode,
            HourlyVariable::PressureMsl,
            HourlyVariable::SurfacePressure,
            HourlyVariable::CloudCover,
            HourlyVariable::CloudCoverLow,
            HourlyVariable::CloudCoverMid,
            HourlyVariable::CloudCoverHigh,
            HourlyVariable::Et0FaoEvapotranspiration,
            HourlyVariable::VapourPressureDeficit,
            HourlyVariable::WindSpeed10m,
            HourlyVariable::WindSpeed100m,
            HourlyVariable::WindDirection10m,
            HourlyVariable::WindDirection100m,
            HourlyVariable::WindGusts10m,
            HourlyVariable::SoilTemperature0To7cm,
            HourlyVariable::SoilTemperature7To28cm,
            HourlyVariable::SoilTemperature28To100cm,
            HourlyVariable::SoilTemperature100To255cm,
            HourlyVariable::SoilMoisture0To7cm,
            HourlyVariable::SoilMoisture7To28cm,
            HourlyVariable::SoilMoisture28To100cm,
            HourlyVariable::SoilMoisture100To255cm,
        ]
    }
}

/// Formats the variable as its API name.
///
/// ```
/// use openmeteo_archive::HourlyVariable;
///
/// assert_eq!(HourlyVariable::SnowDepth.to_string(), "snow_depth");
/// ```
impl fmt::Display for HourlyVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.api_name())
    }
}
