//! Service wiring
//!
//! Builds application services from configuration. A source without the
//! configuration it needs is left out of the snapshot service and reported
//! as unconfigured rather than failing startup.

use std::sync::Arc;

use application::{
    error::ApplicationError,
    ports::{AirQualityPort, CurrentConditionsPort, ForecastOutlookPort},
    services::{OutlookService, SnapshotService},
};
use tracing::{info, warn};

use crate::{
    adapters::{OpenMeteoAdapter, OpenWeatherAdapter},
    config::AppConfig,
};

/// Snapshot service over every configured source
///
/// # Errors
///
/// Returns an error if the location is invalid or an HTTP client cannot be
/// initialized.
pub fn build_snapshot_service(config: &AppConfig) -> Result<SnapshotService, ApplicationError> {
    let location = config.location.to_geo_location()?;
    let mut service = SnapshotService::new(location);

    match config.openweather.to_client_config() {
        Some(client_config) => {
            let adapter = Arc::new(OpenWeatherAdapter::new(client_config)?);
            service = service
                .with_conditions(Arc::clone(&adapter) as Arc<dyn CurrentConditionsPort>)
                .with_air_quality(adapter as Arc<dyn AirQualityPort>);
        },
        None => warn!("No OpenWeather API key, current conditions and AQI are disabled"),
    }

    match config.open_meteo.to_client_config() {
        Some(client_config) => {
            service = service.with_hourly(Arc::new(OpenMeteoAdapter::with_config(client_config)?));
        },
        None => info!("Open-Meteo disabled by configuration"),
    }

    Ok(service)
}

/// Outlook service over OpenWeather
///
/// `blocks` overrides the configured number of forecast blocks.
///
/// # Errors
///
/// Returns `Configuration` without an OpenWeather API key, and an error if
/// the location is invalid or the HTTP client cannot be initialized.
pub fn build_outlook_service(
    config: &AppConfig,
    blocks: Option<u8>,
) -> Result<OutlookService, ApplicationError> {
    let location = config.location.to_geo_location()?;
    let client_config = config.openweather.to_client_config().ok_or_else(|| {
        ApplicationError::Configuration("the outlook needs an OpenWeather API key".into())
    })?;
    let port: Arc<dyn ForecastOutlookPort> = Arc::new(OpenWeatherAdapter::new(client_config)?);
    let blocks = blocks.unwrap_or(config.openweather.forecast_blocks);

    Ok(OutlookService::new(location, port).with_blocks(usize::from(blocks)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key() -> AppConfig {
        AppConfig::default().with_api_key(Some("test-key".into()))
    }

    #[test]
    fn snapshot_service_without_key_has_hourly_only() {
        let service = build_snapshot_service(&AppConfig::default()).unwrap();
        let debug = format!("{service:?}");
        assert!(debug.contains("has_conditions: false"));
        assert!(debug.contains("has_hourly: true"));
        assert!(debug.contains("has_air_quality: false"));
    }

    #[test]
    fn snapshot_service_with_key_has_every_source() {
        let service = build_snapshot_service(&config_with_key()).unwrap();
        let debug = format!("{service:?}");
        assert!(debug.contains("has_conditions: true"));
        assert!(debug.contains("has_air_quality: true"));
    }

    #[test]
    fn snapshot_service_with_open_meteo_disabled() {
        let mut config = config_with_key();
        config.open_meteo.enabled = false;
        let service = build_snapshot_service(&config).unwrap();
        assert!(format!("{service:?}").contains("has_hourly: false"));
    }

    #[test]
    fn invalid_location_is_rejected() {
        let mut config = AppConfig::default();
        config.location.latitude = 120.0;
        let result = build_snapshot_service(&config);
        assert!(matches!(result, Err(ApplicationError::Domain(_))));
    }

    #[test]
    fn outlook_requires_api_key() {
        let result = build_outlook_service(&AppConfig::default(), None);
        assert!(matches!(result, Err(ApplicationError::Configuration(_))));
    }

    #[test]
    fn outlook_block_override() {
        let service = build_outlook_service(&config_with_key(), Some(5)).unwrap();
        assert!(format!("{service:?}").contains("blocks: 5"));
    }
}
