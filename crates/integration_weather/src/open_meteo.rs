//! Open-Meteo client
//!
//! Fetches the hourly series for one location. No API key is required.

use async_trait::async_trait;
use domain::entities::{HourlyMetric, HourlySeries};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    error::{WeatherError, validate_coordinates},
    models::HourlyPayload,
};

/// Open-Meteo configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenMeteoConfig {
    /// API base URL (default: <https://api.open-meteo.com/v1>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Number of forecast days in the hourly series (1-16, default: 1)
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,
}

fn default_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

const fn default_timeout() -> u64 {
    10
}

const fn default_forecast_days() -> u8 {
    1
}

impl Default for OpenMeteoConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            forecast_days: default_forecast_days(),
        }
    }
}

/// Client for the hourly forecast source
#[async_trait]
pub trait HourlyForecastClient: Send + Sync {
    /// Get the hourly series for a location
    async fn get_hourly(&self, latitude: f64, longitude: f64)
    -> Result<HourlySeries, WeatherError>;
}

/// Open-Meteo HTTP client implementation
#[derive(Debug)]
pub struct OpenMeteoClient {
    client: Client,
    config: OpenMeteoConfig,
}

impl OpenMeteoClient {
    /// Create a new Open-Meteo client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: OpenMeteoConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Comma-separated hourly variable list
    fn hourly_variables() -> String {
        HourlyMetric::ALL
            .iter()
            .map(|metric| metric.api_name())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Query parameters for the hourly request
    fn query(&self, latitude: f64, longitude: f64) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("current_weather", "true".to_string()),
            ("hourly", Self::hourly_variables()),
            ("timezone", "auto".to_string()),
            (
                "forecast_days",
                self.config.forecast_days.clamp(1, 16).to_string(),
            ),
        ]
    }
}

#[async_trait]
impl HourlyForecastClient for OpenMeteoClient {
    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude))]
    async fn get_hourly(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<HourlySeries, WeatherError> {
        validate_coordinates(latitude, longitude)?;

        let url = format!("{}/forecast", self.config.base_url);
        debug!(url = %url, "Fetching hourly forecast");

        let response = self
            .client
            .get(&url)
            .query(&self.query(latitude, longitude))
            .send()
            .await
            .map_err(|e| WeatherError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::from_status(status));
        }

        let payload: HourlyPayload = response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))?;

        let series = HourlySeries::from(payload);
        debug!(
            hours = series.time.len(),
            metrics = series.metrics().count(),
            "Hourly forecast received"
        );
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = OpenMeteoConfig::default();
        assert_eq!(config.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.forecast_days, 1);
    }

    #[test]
    fn test_hourly_variables() {
        let vars = OpenMeteoClient::hourly_variables();
        assert_eq!(
            vars,
            "temperature_2m,relative_humidity_2m,precipitation,pressure_msl,visibility,\
             wind_speed_10m,cloud_cover"
        );
    }

    #[test]
    fn test_query_clamps_days() {
        let client = OpenMeteoClient::new(OpenMeteoConfig {
            forecast_days: 20,
            ..Default::default()
        })
        .expect("client creation should succeed");

        let query = client.query(13.08, 80.27);
        assert!(query.contains(&("forecast_days", "16".to_string())));
        assert!(query.contains(&("latitude", "13.08".to_string())));
        assert!(query.contains(&("timezone", "auto".to_string())));
    }

    #[test]
    fn test_client_creation() {
        assert!(OpenMeteoClient::new(OpenMeteoConfig::default()).is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config: OpenMeteoConfig =
            serde_json::from_str(r#"{"base_url":"https://custom.api.com"}"#)
                .expect("should deserialize");
        assert_eq!(config.base_url, "https://custom.api.com");
        assert_eq!(config.timeout_secs, 10);
    }
}
