//! Short-range forecast outlook
//!
//! Current conditions followed by the next few three-hour forecast blocks,
//! all in display units.

use serde::{Deserialize, Serialize};

use super::readings::CurrentConditions;
use crate::fusion::normalize;

/// Number of upcoming blocks shown by default
pub const DEFAULT_OUTLOOK_BLOCKS: usize = 3;

/// One column of the outlook table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastBlock {
    /// Column heading, e.g. "Now" or "2025-11-08 15:00"
    pub label: String,
    /// Condition description, e.g. "light rain"
    pub condition: Option<String>,
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
    /// Rain in mm, 0 when none was reported
    pub rainfall_mm: f64,
}

impl ForecastBlock {
    /// Build a block from raw provider conditions
    #[must_use]
    pub fn from_conditions(
        label: impl Into<String>,
        condition: Option<String>,
        conditions: &CurrentConditions,
    ) -> Self {
        Self {
            label: label.into(),
            condition,
            temperature: conditions.temperature.map(normalize::round1),
            feels_like: conditions.feels_like.map(normalize::round1),
            humidity: conditions.humidity.map(normalize::round1),
            wind_speed_kmh: normalize::wind_ms_to_kmh(conditions.wind_speed_ms),
            visibility_km: normalize::visibility_m_to_km(conditions.visibility_m),
            rainfall_mm: conditions.rainfall_mm.map_or(0.0, normalize::round2),
        }
    }
}

/// Current conditions plus upcoming blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outlook {
    /// The "now" column
    pub current: ForecastBlock,
    /// Upcoming blocks in chronological order
    pub upcoming: Vec<ForecastBlock>,
}

impl Outlook {
    /// Create an outlook, keeping at most `limit` upcoming blocks
    #[must_use]
    pub fn new(current: ForecastBlock, mut upcoming: Vec<ForecastBlock>, limit: usize) -> Self {
        upcoming.truncate(limit);
        Self { current, upcoming }
    }

    /// All columns, current first
    pub fn columns(&self) -> impl Iterator<Item = &ForecastBlock> {
        std::iter::once(&self.current).chain(self.upcoming.iter())
    }
}
