//! Flattening of a decoded [`HourlySeries`] into a row-oriented DataFrame.

use crate::archive_data::error::ArchiveDataError;
use crate::types::hourly_series::HourlySeries;
use crate::types::hourly_variable::HourlyVariable;
use polars::prelude::*;

/// Builds the flat table: a `date` column generated from the series' sampling
/// axis, then one column per requested variable, in request order.
///
/// Row count equals the axis length; rows stay in axis order. A variable
/// whose array length disagrees with the axis is a fatal
/// [`ArchiveDataError::LengthMismatch`], never truncated or padded, since it
/// means the response violated its own axis contract.
pub(crate) fn flatten_hourly(
    series: &HourlySeries,
    variables: &[HourlyVariable],
) -> Result<DataFrame, ArchiveDataError> {
    let axis = series.time_axis();

    let millis: Vec<i64> = axis.iter().map(|t| t.timestamp_millis()).collect();
    let date = Int64Chunked::from_vec("date".into(), millis)
        .into_datetime(TimeUnit::Milliseconds, None)
        .into_series()
        .into_column();

    let mut columns = Vec::with_capacity(variables.len() + 1);
    columns.push(date);

    for variable in variables {
        let name = variable.api_name();
        let values = series
            .variable(*variable)
            .ok_or(ArchiveDataError::MissingVariable(name))?;
        if values.len() != axis.len() {
            return Err(ArchiveDataError::LengthMismatch {
                variable: name,
                expected: axis.len(),
                found: values.len(),
            });
        }
        columns.push(Series::new(name.into(), values).into_column());
    }

    Ok(DataFrame::new(columns)?)
}

#[cfg(test)]
mod tests {
    use super::flatten_hourly;
    use crate::archive_data::error::ArchiveDataError;
    use crate::types::hourly_series::HourlySeries;
    use crate::types::hourly_variable::HourlyVariable;
    use chrono::{TimeZone, Utc};
    use polars::prelude::DataType;
    use std::collections::HashMap;

    fn series_with(values: HashMap<String, Vec<Option<f64>>>) -> HourlySeries {
        HourlySeries {
            latitude: 30.0444,
            longitude: 31.2357,
            elevation: 23.0,
            timezone: "Africa/Cairo".to_string(),
            timezone_abbreviation: "EET".to_string(),
            utc_offset_seconds: 7200,
            start: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 1, 1, 3, 0, 0).unwrap(),
            interval_seconds: 3600,
            values,
        }
    }

    #[test]
    fn one_row_per_timestamp_one_column_per_variable() {
        let mut values = HashMap::new();
        values.insert("temperature_2m".to_string(), vec![Some(1.0), Some(2.0), Some(3.0)]);
        values.insert("rain".to_string(), vec![Some(0.0), None, Some(0.4)]);

        let df = flatten_hourly(
            &series_with(values),
            &[HourlyVariable::Temperature2m, HourlyVariable::Rain],
        )
        .unwrap();

        assert_eq!(df.shape(), (3, 3));
    }

    #[test]
    fn column_order_follows_the_request_not_the_response() {
        let mut values = HashMap::new();
        values.insert("temperature_2m".to_string(), vec![Some(1.0); 3]);
        values.insert("rain".to_string(), vec![Some(0.0); 3]);
        values.insert("snow_depth".to_string(), vec![Some(0.0); 3]);

        let df = flatten_hourly(
            &series_with(values),
            &[
                HourlyVariable::SnowDepth,
                HourlyVariable::Temperature2m,
                HourlyVariable::Rain,
            ],
        )
        .unwrap();

        assert_eq!(
            df.get_column_names(),
            ["date", "snow_depth", "temperature_2m", "rain"]
        );
    }

    #[test]
    fn rows_follow_the_axis_order() {
        let mut values = HashMap::new();
        values.insert("rain".to_string(), vec![Some(0.1), Some(0.2), Some(0.3)]);

        let df = flatten_hourly(&series_with(values), &[HourlyVariable::Rain]).unwrap();

        let dates: Vec<Option<i64>> = df
            .column("date")
            .unwrap()
            .cast(&DataType::Int64)
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .collect();
        let expected: Vec<Option<i64>> = (0..3)
            .map(|h| {
                Some(
                    Utc.with_ymd_and_hms(2024, 1, 1, h, 0, 0)
                        .unwrap()
                        .timestamp_millis(),
                )
            })
            .collect();
        assert_eq!(dates, expected);
    }

    #[test]
    fn short_variable_array_is_fatal() {
        let mut values = HashMap::new();
        values.insert("rain".to_string(), vec![Some(0.1), Some(0.2)]);

        let result = flatten_hourly(&series_with(values), &[HourlyVariable::Rain]);

        assert!(matches!(
            result,
            Err(ArchiveDataError::LengthMismatch {
                variable: "rain",
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn missing_variable_is_fatal() {
        let result = flatten_hourly(
            &series_with(HashMap::new()),
            &[HourlyVariable::Temperature2m],
        );

        assert!(matches!(
            result,
            Err(ArchiveDataError::MissingVariable("temperature_2m"))
        ));
    }

    #[test]
    fn empty_variable_list_yields_date_only_table() {
        let df = flatten_hourly(&series_with(HashMap::new()), &[]).unwrap();

        assert_eq!(df.shape(), (3, 1));
        assert_eq!(df.get_column_names(), ["date"]);
    }
}
