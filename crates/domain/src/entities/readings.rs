//! Per-cycle weather readings
//!
//! Two independently sourced inputs and the fused output. Readings are built
//! fresh for every refresh cycle and discarded once fused; nothing here is
//! persisted or shared between cycles.
//!
//! Every metric is an `Option<f64>`: a missing or unparseable value is
//! absent, never zero.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value_objects::{LengthUnit, SpeedUnit};

/// Current conditions as reported by OpenWeather (metric units)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Air temperature in Celsius
    pub temperature: Option<f64>,
    /// Apparent temperature in Celsius
    pub feels_like: Option<f64>,
    /// Relative humidity percentage
    pub humidity: Option<f64>,
    /// Wind speed in metres per second
    pub wind_speed_ms: Option<f64>,
    /// Sea-level pressure in hPa
    pub pressure: Option<f64>,
    /// Cloud cover percentage
    pub cloud_cover: Option<f64>,
    /// Visibility in metres
    pub visibility_m: Option<f64>,
    /// Rain over the last hour, or the last three hours when that is all
    /// the provider reports, in mm
    pub rainfall_mm: Option<f64>,
}

/// Metrics requested from the Open-Meteo hourly series
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HourlyMetric {
    /// Temperature at 2 m, Celsius
    Temperature,
    /// Relative humidity at 2 m, percent
    RelativeHumidity,
    /// Precipitation over the preceding hour, mm
    Precipitation,
    /// Pressure at mean sea level, hPa
    PressureMsl,
    /// Visibility, unit declared by the provider
    Visibility,
    /// Wind speed at 10 m, unit declared by the provider
    WindSpeed,
    /// Total cloud cover, percent
    CloudCover,
}

impl HourlyMetric {
    /// Every metric, in request order
    pub const ALL: [Self; 7] = [
        Self::Temperature,
        Self::RelativeHumidity,
        Self::Precipitation,
        Self::PressureMsl,
        Self::Visibility,
        Self::WindSpeed,
        Self::CloudCover,
    ];

    /// Open-Meteo variable name
    #[must_use]
    pub const fn api_name(self) -> &'static str {
        match self {
            Self::Temperature => "temperature_2m",
            Self::RelativeHumidity => "relative_humidity_2m",
            Self::Precipitation => "precipitation",
            Self::PressureMsl => "pressure_msl",
            Self::Visibility => "visibility",
            Self::WindSpeed => "wind_speed_10m",
            Self::CloudCover => "cloud_cover",
        }
    }
}

/// The `current_weather` block Open-Meteo returns next to the series
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentSnapshot {
    /// Temperature in Celsius
    pub temperature: Option<f64>,
    /// Wind speed in the series' wind unit
    pub wind_speed: Option<f64>,
}

/// Hourly time series as reported by Open-Meteo
///
/// `time` and each metric's values are parallel sequences. A metric that the
/// provider did not return is simply missing from the series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlySeries {
    /// Hour-resolution local timestamps (`YYYY-MM-DDTHH:MM`)
    pub time: Vec<String>,
    values: BTreeMap<HourlyMetric, Vec<Option<f64>>>,
    /// Declared visibility unit
    pub visibility_unit: LengthUnit,
    /// Declared wind speed unit
    pub wind_speed_unit: SpeedUnit,
    /// Offset of the location's local time from UTC
    pub utc_offset_seconds: Option<i32>,
    /// Duplicate current snapshot, if requested
    pub current: Option<CurrentSnapshot>,
}

impl HourlySeries {
    /// Create a series over the given timestamps with no metrics
    #[must_use]
    pub fn new(time: Vec<String>) -> Self {
        Self {
            time,
            ..Self::default()
        }
    }

    /// Add or replace a metric's values
    #[must_use]
    pub fn with_metric(mut self, metric: HourlyMetric, values: Vec<Option<f64>>) -> Self {
        self.insert_metric(metric, values);
        self
    }

    /// Add or replace a metric's values in place
    pub fn insert_metric(&mut self, metric: HourlyMetric, values: Vec<Option<f64>>) {
        self.values.insert(metric, values);
    }

    /// Set the declared units
    #[must_use]
    pub fn with_units(mut self, visibility: LengthUnit, wind_speed: SpeedUnit) -> Self {
        self.visibility_unit = visibility;
        self.wind_speed_unit = wind_speed;
        self
    }

    /// Set the location's UTC offset
    #[must_use]
    pub fn with_utc_offset(mut self, seconds: i32) -> Self {
        self.utc_offset_seconds = Some(seconds);
        self
    }

    /// Attach the current snapshot
    #[must_use]
    pub fn with_current(mut self, current: CurrentSnapshot) -> Self {
        self.current = Some(current);
        self
    }

    /// Raw values for a metric, `None` if the provider did not return it
    #[must_use]
    pub fn values(&self, metric: HourlyMetric) -> Option<&[Option<f64>]> {
        self.values.get(&metric).map(Vec::as_slice)
    }

    /// Metrics present in this series
    pub fn metrics(&self) -> impl Iterator<Item = HourlyMetric> + '_ {
        self.values.keys().copied()
    }
}

/// One coherent reading produced from both sources
///
/// Rainfall is the only field that is always a number: "no data" and
/// "no rain" both read as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FusedReading {
    /// Temperature in Celsius
    pub temperature: Option<f64>,
    /// Apparent temperature in Celsius
    pub feels_like: Option<f64>,
    /// Relative humidity percentage
    pub humidity: Option<f64>,
    /// Wind speed in km/h
    pub wind_speed_kmh: Option<f64>,
    /// Visibility in km
    pub visibility_km: Option<f64>,
    /// Pressure in hPa
    pub pressure: Option<f64>,
    /// Cloud cover percentage
    pub cloud_cover: Option<f64>,
    /// Rainfall in mm
    pub rainfall_mm: f64,
    /// OpenWeather air quality index (1..=5)
    pub aqi: Option<u8>,
}

impl FusedReading {
    /// Reading for a cycle in which no source answered
    #[must_use]
    pub const fn unavailable() -> Self {
        Self {
            temperature: None,
            feels_like: None,
            humidity: None,
            wind_speed_kmh: None,
            visibility_km: None,
            pressure: None,
            cloud_cover: None,
            rainfall_mm: 0.0,
            aqi: None,
        }
    }

    /// Whether every optional field is absent
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        self.temperature.is_none()
            && self.feels_like.is_none()
            && self.humidity.is_none()
            && self.wind_speed_kmh.is_none()
            && self.visibility_km.is_none()
            && self.pressure.is_none()
            && self.cloud_cover.is_none()
            && self.aqi.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_without_metric_returns_none() {
        let series = HourlySeries::new(vec!["2025-01-01T10:00".to_string()]);
        assert!(series.values(HourlyMetric::Temperature).is_none());
        assert_eq!(series.metrics().count(), 0);
    }

    #[test]
    fn test_series_with_metric_exposes_values() {
        let series = HourlySeries::new(vec!["2025-01-01T10:00".to_string()])
            .with_metric(HourlyMetric::Temperature, vec![Some(20.0)]);
        assert_eq!(
            series.values(HourlyMetric::Temperature),
            Some(&[Some(20.0)][..])
        );
        assert_eq!(
            series.metrics().collect::<Vec<_>>(),
            vec![HourlyMetric::Temperature]
        );
    }

    #[test]
    fn test_series_builders_set_metadata() {
        let series = HourlySeries::default()
            .with_units(LengthUnit::Kilometres, SpeedUnit::MetresPerSecond)
            .with_utc_offset(19_800)
            .with_current(CurrentSnapshot {
                temperature: Some(27.5),
                wind_speed: None,
            });
        assert_eq!(series.visibility_unit, LengthUnit::Kilometres);
        assert_eq!(series.wind_speed_unit, SpeedUnit::MetresPerSecond);
        assert_eq!(series.utc_offset_seconds, Some(19_800));
        assert_eq!(series.current.and_then(|c| c.temperature), Some(27.5));
    }

    #[test]
    fn test_metric_api_names_are_unique() {
        let mut names: Vec<_> = HourlyMetric::ALL.iter().map(|m| m.api_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), HourlyMetric::ALL.len());
    }

    #[test]
    fn test_unavailable_reading_has_zero_rain() {
        let reading = FusedReading::unavailable();
        assert!(reading.is_unavailable());
        assert!(reading.rainfall_mm.abs() < f64::EPSILON);
    }

    #[test]
    fn test_reading_with_one_value_is_available() {
        let reading = FusedReading {
            humidity: Some(80.0),
            ..FusedReading::unavailable()
        };
        assert!(!reading.is_unavailable());
    }

    #[test]
    fn test_fused_reading_serializes_absent_as_null() {
        let json = serde_json::to_value(FusedReading::unavailable()).expect("serialize");
        assert!(json["temperature"].is_null());
        assert_eq!(json["rainfall_mm"], 0.0);
    }
}
