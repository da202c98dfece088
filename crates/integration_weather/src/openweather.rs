//! OpenWeather client
//!
//! Current conditions, air pollution and the 3-hour forecast, all in metric
//! units. Every request needs an API key.

use std::fmt;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, instrument};

use crate::{
    error::{WeatherError, validate_coordinates},
    models::{AirPollutionPayload, ConditionsPayload, ConditionsReport, ForecastPayload},
};

/// OpenWeather configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct OpenWeatherConfig {
    /// API key (`appid`)
    #[serde(default, skip_serializing)]
    pub api_key: String,

    /// API base URL (default: <https://api.openweathermap.org/data/2.5>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl fmt::Debug for OpenWeatherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

const fn default_timeout() -> u64 {
    10
}

impl Default for OpenWeatherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Client for the current-conditions source
#[async_trait]
pub trait ConditionsClient: Send + Sync {
    /// Current conditions at a location
    async fn get_current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ConditionsReport, WeatherError>;

    /// Air quality index (1-5) at a location, `None` if not reported
    async fn get_air_quality(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<u8>, WeatherError>;

    /// Upcoming 3-hour forecast blocks
    async fn get_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        blocks: u8,
    ) -> Result<Vec<ConditionsReport>, WeatherError>;
}

/// OpenWeather HTTP client implementation
pub struct OpenWeatherClient {
    client: Client,
    config: OpenWeatherConfig,
}

impl fmt::Debug for OpenWeatherClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl OpenWeatherClient {
    /// Create a new OpenWeather client
    ///
    /// # Errors
    ///
    /// Returns `MissingApiKey` if the key is blank, or an error if the HTTP
    /// client cannot be initialized.
    pub fn new(config: OpenWeatherConfig) -> Result<Self, WeatherError> {
        if config.api_key.trim().is_empty() {
            return Err(WeatherError::MissingApiKey("OpenWeather"));
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// GET `{base_url}/{endpoint}` and decode the JSON body
    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{endpoint}", self.config.base_url);
        debug!(url = %url, "Fetching OpenWeather data");

        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("appid", self.config.api_key.as_str())])
            .send()
            .await
            .map_err(|e| WeatherError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::from_status(status));
        }

        response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))
    }

    fn location_query(latitude: f64, longitude: f64) -> Vec<(&'static str, String)> {
        vec![
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
        ]
    }
}

#[async_trait]
impl ConditionsClient for OpenWeatherClient {
    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude))]
    async fn get_current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ConditionsReport, WeatherError> {
        validate_coordinates(latitude, longitude)?;

        let mut query = Self::location_query(latitude, longitude);
        query.push(("units", "metric".to_string()));

        let payload: ConditionsPayload = self.fetch("weather", &query).await?;
        Ok(payload.into())
    }

    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude))]
    async fn get_air_quality(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<u8>, WeatherError> {
        validate_coordinates(latitude, longitude)?;

        let query = Self::location_query(latitude, longitude);
        let payload: AirPollutionPayload = self.fetch("air_pollution", &query).await?;
        Ok(payload.aqi())
    }

    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude, blocks = %blocks))]
    async fn get_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        blocks: u8,
    ) -> Result<Vec<ConditionsReport>, WeatherError> {
        validate_coordinates(latitude, longitude)?;

        let mut query = Self::location_query(latitude, longitude);
        query.push(("units", "metric".to_string()));
        query.push(("cnt", blocks.max(1).to_string()));

        let payload: ForecastPayload = self.fetch("forecast", &query).await?;
        Ok(payload.list.into_iter().map(ConditionsReport::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> OpenWeatherConfig {
        OpenWeatherConfig {
            api_key: "test-key".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = OpenWeatherConfig::default();
        assert_eq!(config.base_url, "https://api.openweathermap.org/data/2.5");
        assert_eq!(config.timeout_secs, 10);
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn test_blank_key_is_rejected() {
        let result = OpenWeatherClient::new(OpenWeatherConfig {
            api_key: "   ".to_string(),
            ..Default::default()
        });
        assert!(matches!(result, Err(WeatherError::MissingApiKey(_))));
    }

    #[test]
    fn test_client_creation() {
        assert!(OpenWeatherClient::new(config()).is_ok());
    }

    #[test]
    fn test_debug_redacts_key() {
        let client = OpenWeatherClient::new(config()).expect("client");
        let debug = format!("{client:?}");
        assert!(!debug.contains("test-key"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_key_is_never_serialized() {
        let json = serde_json::to_string(&config()).expect("serialize");
        assert!(!json.contains("test-key"));
        assert!(!json.contains("api_key"));
    }
}
