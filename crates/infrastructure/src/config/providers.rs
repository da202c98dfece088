//! Location and provider configuration

use domain::{DomainError, GeoLocation};
use integration_weather::{OpenMeteoConfig, OpenWeatherConfig};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==============================
// Location
// ==============================

/// Geographic location configuration (latitude/longitude pair)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Latitude (-90.0 to 90.0)
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    /// Longitude (-180.0 to 180.0)
    #[serde(default = "default_longitude")]
    pub longitude: f64,
}

const fn default_latitude() -> f64 {
    10.9081
}

const fn default_longitude() -> f64 {
    76.2296
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            latitude: default_latitude(),
            longitude: default_longitude(),
        }
    }
}

impl LocationConfig {
    /// Convert to domain `GeoLocation` value object
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` when either value is out of range.
    pub fn to_geo_location(&self) -> Result<GeoLocation, DomainError> {
        GeoLocation::new(self.latitude, self.longitude)
    }
}

// ==============================
// OpenWeather
// ==============================

/// OpenWeather configuration
///
/// Without an API key the current-conditions, air quality and outlook
/// sources are left unconfigured.
#[derive(Clone, Serialize, Deserialize)]
pub struct OpenWeatherAppConfig {
    /// API key (secret, never serialized)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// API base URL
    #[serde(default = "default_openweather_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Upcoming 3-hour blocks shown in the outlook
    #[serde(default = "default_forecast_blocks")]
    pub forecast_blocks: u8,
}

impl fmt::Debug for OpenWeatherAppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherAppConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("forecast_blocks", &self.forecast_blocks)
            .finish()
    }
}

fn default_openweather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

const fn default_timeout() -> u64 {
    10
}

const fn default_forecast_blocks() -> u8 {
    3
}

impl Default for OpenWeatherAppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openweather_base_url(),
            timeout_secs: default_timeout(),
            forecast_blocks: default_forecast_blocks(),
        }
    }
}

impl OpenWeatherAppConfig {
    /// Whether a non-blank API key is present
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().trim().is_empty())
    }

    /// Client configuration, `None` without an API key
    #[must_use]
    pub fn to_client_config(&self) -> Option<OpenWeatherConfig> {
        if !self.has_api_key() {
            return None;
        }
        self.api_key.as_ref().map(|key| OpenWeatherConfig {
            api_key: key.expose_secret().trim().to_string(),
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
        })
    }
}

// ==============================
// Open-Meteo
// ==============================

/// Open-Meteo configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenMeteoAppConfig {
    /// Set to false to skip the hourly source
    #[serde(default = "super::default_true")]
    pub enabled: bool,

    /// API base URL
    #[serde(default = "default_open_meteo_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Days of hourly data to request (1-16)
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,
}

fn default_open_meteo_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

const fn default_forecast_days() -> u8 {
    1
}

impl Default for OpenMeteoAppConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: default_open_meteo_base_url(),
            timeout_secs: default_timeout(),
            forecast_days: default_forecast_days(),
        }
    }
}

impl OpenMeteoAppConfig {
    /// Client configuration, `None` when disabled
    #[must_use]
    pub fn to_client_config(&self) -> Option<OpenMeteoConfig> {
        self.enabled.then(|| OpenMeteoConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
            forecast_days: self.forecast_days,
        })
    }
}
