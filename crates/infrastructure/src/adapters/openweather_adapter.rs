//! OpenWeather adapter - current conditions, air quality and the outlook

use std::sync::Arc;

use application::{
    error::ApplicationError,
    ports::{AirQualityPort, CurrentConditionsPort, ForecastOutlookPort},
};
use async_trait::async_trait;
use domain::{
    entities::{CurrentConditions, ForecastBlock},
    value_objects::GeoLocation,
};
use integration_weather::{
    ConditionsClient, ConditionsReport, OpenWeatherClient, OpenWeatherConfig, WeatherError,
};
use tracing::{debug, instrument};

use super::map_weather_error;

/// Label of the current-conditions column
const CURRENT_LABEL: &str = "Now";

/// Hours covered by one OpenWeather forecast block
const BLOCK_HOURS: usize = 3;

/// Adapter over the OpenWeather client
pub struct OpenWeatherAdapter {
    client: Arc<dyn ConditionsClient>,
}

impl std::fmt::Debug for OpenWeatherAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherAdapter")
            .field("client", &"ConditionsClient")
            .finish()
    }
}

impl OpenWeatherAdapter {
    /// Create an adapter with an HTTP client for the given configuration
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the API key is blank, or `Internal` if the
    /// HTTP client fails to initialize.
    pub fn new(config: OpenWeatherConfig) -> Result<Self, ApplicationError> {
        let client = OpenWeatherClient::new(config).map_err(|e| match e {
            e @ WeatherError::MissingApiKey(_) => map_weather_error(e),
            e => ApplicationError::Internal(e.to_string()),
        })?;
        Ok(Self::with_client(Arc::new(client)))
    }

    /// Create an adapter over any conditions client
    #[must_use]
    pub fn with_client(client: Arc<dyn ConditionsClient>) -> Self {
        Self { client }
    }

    /// Column label for a forecast block
    ///
    /// `dt_txt` reads `YYYY-MM-DD HH:MM:SS`; the seconds are dropped. Blocks
    /// without a timestamp are labelled by their offset from now.
    fn block_label(report: &ConditionsReport, position: usize) -> String {
        match report.forecast_time.as_deref().map(str::trim) {
            Some(time) if !time.is_empty() => time.get(..16).unwrap_or(time).to_string(),
            _ => format!("+{}h", (position + 1) * BLOCK_HOURS),
        }
    }

    fn to_block(label: String, report: ConditionsReport) -> ForecastBlock {
        ForecastBlock::from_conditions(label, report.description, &report.conditions)
    }
}

#[async_trait]
impl CurrentConditionsPort for OpenWeatherAdapter {
    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude()))]
    async fn get_current_conditions(
        &self,
        location: &GeoLocation,
    ) -> Result<CurrentConditions, ApplicationError> {
        let report = self
            .client
            .get_current(location.latitude(), location.longitude())
            .await
            .map_err(map_weather_error)?;

        debug!(
            temperature = ?report.conditions.temperature,
            humidity = ?report.conditions.humidity,
            "Retrieved current conditions"
        );
        Ok(report.conditions)
    }
}

#[async_trait]
impl AirQualityPort for OpenWeatherAdapter {
    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude()))]
    async fn get_air_quality(
        &self,
        location: &GeoLocation,
    ) -> Result<Option<u8>, ApplicationError> {
        let aqi = self
            .client
            .get_air_quality(location.latitude(), location.longitude())
            .await
            .map_err(map_weather_error)?;

        debug!(aqi = ?aqi, "Retrieved air quality");
        Ok(aqi)
    }
}

#[async_trait]
impl ForecastOutlookPort for OpenWeatherAdapter {
    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude()))]
    async fn get_current_block(
        &self,
        location: &GeoLocation,
    ) -> Result<ForecastBlock, ApplicationError> {
        let report = self
            .client
            .get_current(location.latitude(), location.longitude())
            .await
            .map_err(map_weather_error)?;

        Ok(Self::to_block(CURRENT_LABEL.to_string(), report))
    }

    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude(), count))]
    async fn get_forecast_blocks(
        &self,
        location: &GeoLocation,
        count: usize,
    ) -> Result<Vec<ForecastBlock>, ApplicationError> {
        let requested = u8::try_from(count).unwrap_or(u8::MAX);
        let reports = self
            .client
            .get_forecast(location.latitude(), location.longitude(), requested)
            .await
            .map_err(map_weather_error)?;

        debug!(blocks = reports.len(), "Retrieved forecast blocks");
        Ok(reports
            .into_iter()
            .take(count)
            .enumerate()
            .map(|(i, report)| {
                let label = Self::block_label(&report, i);
                Self::to_block(label, report)
            })
            .collect())
    }
}
