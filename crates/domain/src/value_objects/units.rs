//! Measurement units declared by the providers
//!
//! Only metric units are understood.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::errors::DomainError;

/// Unit of a wind speed series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedUnit {
    /// Kilometres per hour (Open-Meteo default)
    #[default]
    KilometresPerHour,
    /// Metres per second (OpenWeather metric)
    MetresPerSecond,
}

impl SpeedUnit {
    /// Convert a value in this unit to km/h, unrounded
    #[must_use]
    pub fn to_kmh(self, value: f64) -> f64 {
        match self {
            Self::KilometresPerHour => value,
            Self::MetresPerSecond => value * 3.6,
        }
    }

    /// Unit label as the providers write it
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::KilometresPerHour => "km/h",
            Self::MetresPerSecond => "m/s",
        }
    }
}

impl FromStr for SpeedUnit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "km/h" | "kmh" | "kph" => Ok(Self::KilometresPerHour),
            "m/s" | "ms" => Ok(Self::MetresPerSecond),
            other => Err(DomainError::UnsupportedUnit(other.to_string())),
        }
    }
}

impl fmt::Display for SpeedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Unit of a distance series (visibility)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthUnit {
    /// Metres (both providers' default for visibility)
    #[default]
    Metres,
    /// Kilometres
    Kilometres,
}

impl LengthUnit {
    /// Convert a value in this unit to kilometres, unrounded
    #[must_use]
    pub fn to_km(self, value: f64) -> f64 {
        match self {
            Self::Metres => value / 1000.0,
            Self::Kilometres => value,
        }
    }

    /// Unit label as the providers write it
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Metres => "m",
            Self::Kilometres => "km",
        }
    }
}

impl FromStr for LengthUnit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "metre" | "meter" | "metres" | "meters" => Ok(Self::Metres),
            "km" | "kilometre" | "kilometer" | "kilometres" | "kilometers" => {
                Ok(Self::Kilometres)
            },
            other => Err(DomainError::UnsupportedUnit(other.to_string())),
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
