//! The fusion engine
//!
//! Turns whatever arrived in a refresh cycle into one [`FusedReading`].

use chrono::{DateTime, Utc};

use super::{
    combine::{combine, combine_rain},
    normalize::{finite, visibility_m_to_km, visibility_to_km, wind_ms_to_kmh, wind_to_kmh},
};
use crate::entities::{CurrentConditions, FusedReading, HourlyMetric, HourlySeries};

/// Open-Meteo values for the reference hour, in display units
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct HourlyPick {
    temperature: Option<f64>,
    humidity: Option<f64>,
    precipitation: Option<f64>,
    pressure: Option<f64>,
    visibility_km: Option<f64>,
    wind_speed_kmh: Option<f64>,
    cloud_cover: Option<f64>,
}

impl HourlyPick {
    fn from_series(series: &HourlySeries, now: DateTime<Utc>) -> Self {
        let reference = series.local_reference(now);
        let value = |metric| series.value_at(metric, reference);
        let snapshot = series.current.unwrap_or_default();

        let wind = value(HourlyMetric::WindSpeed).or_else(|| finite(snapshot.wind_speed));

        Self {
            temperature: value(HourlyMetric::Temperature).or_else(|| finite(snapshot.temperature)),
            humidity: value(HourlyMetric::RelativeHumidity),
            precipitation: value(HourlyMetric::Precipitation),
            pressure: value(HourlyMetric::PressureMsl),
            visibility_km: visibility_to_km(value(HourlyMetric::Visibility), series.visibility_unit),
            wind_speed_kmh: wind_to_kmh(wind, series.wind_speed_unit),
            cloud_cover: value(HourlyMetric::CloudCover),
        }
    }
}

/// Fuse one cycle's inputs into a single reading
///
/// Each metric is combined independently, so a gap in one source only
/// affects the metrics that source was the sole provider of. Feels-like has
/// no Open-Meteo counterpart and is paired with its air temperature. With
/// neither source present the result is [`FusedReading::unavailable`], AQI
/// included.
#[must_use]
pub fn fuse(
    conditions: Option<&CurrentConditions>,
    hourly: Option<&HourlySeries>,
    aqi: Option<u8>,
    now: DateTime<Utc>,
) -> FusedReading {
    if conditions.is_none() && hourly.is_none() {
        return FusedReading::unavailable();
    }

    let a = conditions.cloned().unwrap_or_default();
    let b = hourly.map(|series| HourlyPick::from_series(series, now)).unwrap_or_default();

    FusedReading {
        temperature: combine(a.temperature, b.temperature),
        feels_like: combine(a.feels_like, b.temperature),
        humidity: combine(a.humidity, b.humidity),
        wind_speed_kmh: combine(wind_ms_to_kmh(a.wind_speed_ms), b.wind_speed_kmh),
        visibility_km: combine(visibility_m_to_km(a.visibility_m), b.visibility_km),
        pressure: combine(a.pressure, b.pressure),
        cloud_cover: combine(a.cloud_cover, b.cloud_cover),
        rainfall_mm: combine_rain(a.rainfall_mm, b.precipitation),
        aqi,
    }
}
