//! Open-Meteo adapter - hourly series

use std::sync::Arc;

use application::{error::ApplicationError, ports::HourlyForecastPort};
use async_trait::async_trait;
use domain::{entities::HourlySeries, value_objects::GeoLocation};
use integration_weather::{HourlyForecastClient, OpenMeteoClient, OpenMeteoConfig};
use tracing::{debug, instrument};

use super::map_weather_error;

/// Adapter over the Open-Meteo client
pub struct OpenMeteoAdapter {
    client: Arc<dyn HourlyForecastClient>,
}

impl std::fmt::Debug for OpenMeteoAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenMeteoAdapter")
            .field("client", &"HourlyForecastClient")
            .finish()
    }
}

impl OpenMeteoAdapter {
    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: OpenMeteoConfig) -> Result<Self, ApplicationError> {
        let client =
            OpenMeteoClient::new(config).map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self::with_client(Arc::new(client)))
    }

    /// Create an adapter over any hourly client
    #[must_use]
    pub fn with_client(client: Arc<dyn HourlyForecastClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HourlyForecastPort for OpenMeteoAdapter {
    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude()))]
    async fn get_hourly_series(
        &self,
        location: &GeoLocation,
    ) -> Result<HourlySeries, ApplicationError> {
        let series = self
            .client
            .get_hourly(location.latitude(), location.longitude())
            .await
            .map_err(map_weather_error)?;

        debug!(
            hours = series.time.len(),
            metrics = series.metrics().count(),
            "Retrieved hourly series"
        );
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use domain::entities::HourlyMetric;
    use integration_weather::WeatherError;

    use super::*;

    struct StubClient {
        healthy: bool,
    }

    #[async_trait]
    impl HourlyForecastClient for StubClient {
        async fn get_hourly(&self, _: f64, _: f64) -> Result<HourlySeries, WeatherError> {
            if self.healthy {
                Ok(HourlySeries::new(vec!["2025-11-08T15:00".to_string()])
                    .with_metric(HourlyMetric::Temperature, vec![Some(27.0)]))
            } else {
                Err(WeatherError::ServiceUnavailable("HTTP 503".into()))
            }
        }
    }

    fn location() -> GeoLocation {
        GeoLocation::new(10.9081, 76.2296).unwrap()
    }

    #[test]
    fn with_config_creates_adapter() {
        assert!(OpenMeteoAdapter::with_config(OpenMeteoConfig::default()).is_ok());
    }

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<OpenMeteoAdapter>();
    }

    #[tokio::test]
    async fn hourly_series_passes_through() {
        let adapter = OpenMeteoAdapter::with_client(Arc::new(StubClient { healthy: true }));
        let series = adapter.get_hourly_series(&location()).await.unwrap();
        assert_eq!(series.time.len(), 1);
    }

    #[tokio::test]
    async fn hourly_errors_are_external_service() {
        let adapter = OpenMeteoAdapter::with_client(Arc::new(StubClient { healthy: false }));
        let err = adapter.get_hourly_series(&location()).await.unwrap_err();
        assert!(matches!(err, ApplicationError::ExternalService(_)));
    }
}
