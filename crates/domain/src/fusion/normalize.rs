//! Unit normalization
//!
//! Converts provider units into display units: km/h for wind, km for
//! visibility. Everything rounds to one decimal, rainfall to two.

use crate::value_objects::{LengthUnit, SpeedUnit};

/// Round half away from zero to `decimals` places
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

/// Round to one decimal place
#[must_use]
pub fn round1(value: f64) -> f64 {
    round_to(value, 1)
}

/// Round to two decimal places
#[must_use]
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// Drop non-finite values
#[must_use]
pub fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// OpenWeather wind speed (m/s) to km/h
#[must_use]
pub fn wind_ms_to_kmh(value: Option<f64>) -> Option<f64> {
    wind_to_kmh(value, SpeedUnit::MetresPerSecond)
}

/// OpenWeather visibility (m) to km
#[must_use]
pub fn visibility_m_to_km(value: Option<f64>) -> Option<f64> {
    visibility_to_km(value, LengthUnit::Metres)
}

/// Wind speed in a declared unit to km/h
#[must_use]
pub fn wind_to_kmh(value: Option<f64>, unit: SpeedUnit) -> Option<f64> {
    finite(value).map(|v| round1(unit.to_kmh(v)))
}

/// Visibility in a declared unit to km
#[must_use]
pub fn visibility_to_km(value: Option<f64>, unit: LengthUnit) -> Option<f64> {
    finite(value).map(|v| round1(unit.to_km(v)))
}
