//! Application configuration
//!
//! Split into focused sub-modules:
//! - `providers`: location, OpenWeather and Open-Meteo settings
//! - `refresh`: the watch loop's schedule
//! - `logging`: log filter and format
//!
//! Sources are layered: built-in defaults, then `config.toml` (or an explicit
//! path), then `WEATHERFUSE_*` environment variables with `__` between
//! nested keys, e.g. `WEATHERFUSE_OPENWEATHER__API_KEY`.

mod logging;
mod providers;
mod refresh;

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

pub use logging::{LogFormat, LoggingConfig};
pub use providers::{LocationConfig, OpenMeteoAppConfig, OpenWeatherAppConfig};
pub use refresh::RefreshConfig;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "WEATHERFUSE";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// `WEATHERFUSE_*` variables, `__` between nested keys
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Forecast location
    #[serde(default)]
    pub location: LocationConfig,

    /// OpenWeather (current conditions, air quality, outlook)
    #[serde(default)]
    pub openweather: OpenWeatherAppConfig,

    /// Open-Meteo (hourly series)
    #[serde(default)]
    pub open_meteo: OpenMeteoAppConfig,

    /// Refresh schedule for the watch loop
    #[serde(default)]
    pub refresh: RefreshConfig,

    /// Logging
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from an explicit file, or `config.toml` if `None`
    ///
    /// An explicit file must exist; the implicit `config.toml` is optional.
    pub fn load_from(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::load_with_env(path, environment())
    }

    fn load_with_env(
        path: Option<&Path>,
        env: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let builder = config::Config::builder()
            .add_source(file)
            // Override with environment variables (e.g., WEATHERFUSE_LOCATION__LATITUDE)
            .add_source(env);

        let config: Self = builder.build()?.try_deserialize()?;
        debug!(
            latitude = config.location.latitude,
            longitude = config.location.longitude,
            openweather_key = config.openweather.has_api_key(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Replace the OpenWeather key when one is given
    #[must_use]
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.openweather.api_key = Some(key.into());
        }
        self
    }

    /// Check values the type system cannot
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        self.location
            .to_geo_location()
            .map_err(|e| config::ConfigError::Message(format!("location: {e}")))?;
        self.refresh.validate().map_err(config::ConfigError::Message)?;
        if self.openweather.forecast_blocks == 0 {
            return Err(config::ConfigError::Message(
                "openweather.forecast_blocks must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Effective configuration as TOML, secrets omitted
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
