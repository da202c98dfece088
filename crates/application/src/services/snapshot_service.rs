//! Snapshot service
//!
//! Runs one refresh cycle: asks every configured source at once, tolerates
//! individual failures, and fuses whatever arrived.

use std::{fmt, sync::Arc};

use chrono::{DateTime, Utc};
use domain::{fusion::fuse, value_objects::GeoLocation};
use tracing::{debug, info, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{
        AirQualityPort, CurrentConditionsPort, HourlyForecastPort, SnapshotRenderPort,
        SourceReport, SourceStatus, WeatherSnapshot,
    },
};

/// Settle one source's outcome into its value and status
fn settle<T>(
    source: &'static str,
    outcome: Option<Result<T, ApplicationError>>,
) -> (Option<T>, SourceStatus) {
    match outcome {
        None => (None, SourceStatus::Unconfigured),
        Some(Ok(value)) => (Some(value), SourceStatus::Available),
        Some(Err(e)) => {
            warn!(source, error = %e, "Weather source failed, continuing without it");
            (None, SourceStatus::Failed)
        },
    }
}

/// Fetches all sources concurrently and fuses them into a snapshot
pub struct SnapshotService {
    location: GeoLocation,
    conditions: Option<Arc<dyn CurrentConditionsPort>>,
    hourly: Option<Arc<dyn HourlyForecastPort>>,
    air_quality: Option<Arc<dyn AirQualityPort>>,
}

impl fmt::Debug for SnapshotService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotService")
            .field("location", &self.location)
            .field("has_conditions", &self.conditions.is_some())
            .field("has_hourly", &self.hourly.is_some())
            .field("has_air_quality", &self.air_quality.is_some())
            .finish()
    }
}

impl SnapshotService {
    /// Create a service for one location with no sources attached
    #[must_use]
    pub const fn new(location: GeoLocation) -> Self {
        Self {
            location,
            conditions: None,
            hourly: None,
            air_quality: None,
        }
    }

    /// Attach the current-conditions source
    #[must_use]
    pub fn with_conditions(mut self, port: Arc<dyn CurrentConditionsPort>) -> Self {
        self.conditions = Some(port);
        self
    }

    /// Attach the hourly forecast source
    #[must_use]
    pub fn with_hourly(mut self, port: Arc<dyn HourlyForecastPort>) -> Self {
        self.hourly = Some(port);
        self
    }

    /// Attach the air quality source
    #[must_use]
    pub fn with_air_quality(mut self, port: Arc<dyn AirQualityPort>) -> Self {
        self.air_quality = Some(port);
        self
    }

    /// Location this service reports on
    #[must_use]
    pub const fn location(&self) -> &GeoLocation {
        &self.location
    }

    /// Run one cycle now
    pub async fn refresh(&self) -> WeatherSnapshot {
        self.refresh_at(Utc::now()).await
    }

    /// Run one cycle with an explicit clock
    ///
    /// Never fails: a source that errors is logged and left out, and with
    /// no sources at all the snapshot carries an all-absent reading.
    #[instrument(skip(self), fields(location = %self.location))]
    pub async fn refresh_at(&self, now: DateTime<Utc>) -> WeatherSnapshot {
        let location = &self.location;

        let (conditions, hourly, air_quality) = tokio::join!(
            async {
                match &self.conditions {
                    Some(port) => Some(port.get_current_conditions(location).await),
                    None => None,
                }
            },
            async {
                match &self.hourly {
                    Some(port) => Some(port.get_hourly_series(location).await),
                    None => None,
                }
            },
            async {
                match &self.air_quality {
                    Some(port) => Some(port.get_air_quality(location).await),
                    None => None,
                }
            },
        );

        let (conditions, openweather) = settle("openweather", conditions);
        let (hourly, open_meteo) = settle("open_meteo", hourly);
        let (aqi, air_quality) = settle("air_quality", air_quality);

        let sources = SourceReport {
            openweather,
            open_meteo,
            air_quality,
        };
        let reading = fuse(conditions.as_ref(), hourly.as_ref(), aqi.flatten(), now);

        if reading.is_unavailable() {
            warn!("No weather source answered, snapshot is empty");
        } else {
            debug!(
                available = sources.available_count(),
                temperature = ?reading.temperature,
                aqi = ?reading.aqi,
                "Snapshot fused"
            );
        }

        WeatherSnapshot::new(reading, sources, now)
    }

    /// Run one cycle and hand the snapshot to a renderer
    ///
    /// # Errors
    ///
    /// Returns the renderer's error; fetching itself cannot fail.
    pub async fn refresh_and_render(
        &self,
        renderer: &dyn SnapshotRenderPort,
    ) -> Result<WeatherSnapshot, ApplicationError> {
        let snapshot = self.refresh().await;
        renderer.render(&snapshot).await?;
        info!(
            available = snapshot.sources.available_count(),
            "Snapshot rendered"
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use domain::entities::{CurrentConditions, FusedReading, HourlyMetric, HourlySeries};

    use super::*;
    use crate::ports::{
        MockAirQualityPort, MockCurrentConditionsPort, MockHourlyForecastPort,
        MockSnapshotRenderPort,
    };

    fn location() -> GeoLocation {
        GeoLocation::new(13.08, 80.27).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 11, 10, 0).unwrap()
    }

    fn conditions_port(temperature: f64) -> MockCurrentConditionsPort {
        let mut mock = MockCurrentConditionsPort::new();
        mock.expect_get_current_conditions().returning(move |_| {
            Ok(CurrentConditions {
                temperature: Some(temperature),
                wind_speed_ms: Some(5.0),
                ..CurrentConditions::default()
            })
        });
        mock
    }

    fn hourly_port(temperature: f64) -> MockHourlyForecastPort {
        let mut mock = MockHourlyForecastPort::new();
        mock.expect_get_hourly_series().returning(move |_| {
            Ok(HourlySeries::new(vec!["2025-01-01T11:00".to_string()])
                .with_utc_offset(0)
                .with_metric(HourlyMetric::Temperature, vec![Some(temperature)]))
        });
        mock
    }

    fn aqi_port(aqi: Option<u8>) -> MockAirQualityPort {
        let mut mock = MockAirQualityPort::new();
        mock.expect_get_air_quality().returning(move |_| Ok(aqi));
        mock
    }

    #[tokio::test]
    async fn test_all_sources_fused() {
        let service = SnapshotService::new(location())
            .with_conditions(Arc::new(conditions_port(30.0)))
            .with_hourly(Arc::new(hourly_port(28.0)))
            .with_air_quality(Arc::new(aqi_port(Some(2))));

        let snapshot = service.refresh_at(now()).await;

        assert_eq!(snapshot.reading.temperature, Some(29.0));
        assert_eq!(snapshot.reading.wind_speed_kmh, Some(18.0));
        assert_eq!(snapshot.reading.aqi, Some(2));
        assert_eq!(snapshot.air_quality.label, "Fair");
        assert_eq!(snapshot.sources.available_count(), 3);
        assert_eq!(snapshot.generated_at, now());
    }

    #[tokio::test]
    async fn test_failed_source_is_tolerated() {
        let mut failing = MockCurrentConditionsPort::new();
        failing
            .expect_get_current_conditions()
            .returning(|_| Err(ApplicationError::ExternalService("timeout".into())));

        let service = SnapshotService::new(location())
            .with_conditions(Arc::new(failing))
            .with_hourly(Arc::new(hourly_port(28.0)));

        let snapshot = service.refresh_at(now()).await;

        assert_eq!(snapshot.reading.temperature, Some(28.0));
        assert_eq!(snapshot.sources.openweather, SourceStatus::Failed);
        assert_eq!(snapshot.sources.open_meteo, SourceStatus::Available);
        assert_eq!(snapshot.sources.air_quality, SourceStatus::Unconfigured);
    }

    #[tokio::test]
    async fn test_total_failure_is_unavailable() {
        let mut conditions = MockCurrentConditionsPort::new();
        conditions
            .expect_get_current_conditions()
            .returning(|_| Err(ApplicationError::RateLimited));
        let mut hourly = MockHourlyForecastPort::new();
        hourly
            .expect_get_hourly_series()
            .returning(|_| Err(ApplicationError::ExternalService("down".into())));

        let service = SnapshotService::new(location())
            .with_conditions(Arc::new(conditions))
            .with_hourly(Arc::new(hourly))
            .with_air_quality(Arc::new(aqi_port(Some(3))));

        let snapshot = service.refresh_at(now()).await;

        assert_eq!(snapshot.reading, FusedReading::unavailable());
        assert!(!snapshot.air_quality.is_known());
        assert_eq!(snapshot.sources.air_quality, SourceStatus::Available);
    }

    #[tokio::test]
    async fn test_no_sources_configured() {
        let service = SnapshotService::new(location());
        let snapshot = service.refresh_at(now()).await;

        assert!(snapshot.reading.is_unavailable());
        assert_eq!(snapshot.sources.available_count(), 0);
        assert_eq!(snapshot.sources.openweather, SourceStatus::Unconfigured);
    }

    #[tokio::test]
    async fn test_air_quality_failure_leaves_reading_intact() {
        let mut aqi = MockAirQualityPort::new();
        aqi.expect_get_air_quality()
            .returning(|_| Err(ApplicationError::ExternalService("502".into())));

        let service = SnapshotService::new(location())
            .with_conditions(Arc::new(conditions_port(30.0)))
            .with_air_quality(Arc::new(aqi));

        let snapshot = service.refresh_at(now()).await;

        assert_eq!(snapshot.reading.temperature, Some(30.0));
        assert_eq!(snapshot.reading.aqi, None);
        assert_eq!(snapshot.air_quality.label, "Unknown");
    }

    #[tokio::test]
    async fn test_refresh_and_render_passes_snapshot() {
        let mut renderer = MockSnapshotRenderPort::new();
        renderer
            .expect_render()
            .withf(|snapshot| snapshot.reading.temperature == Some(30.0))
            .times(1)
            .returning(|_| Ok(()));

        let service =
            SnapshotService::new(location()).with_conditions(Arc::new(conditions_port(30.0)));

        let result = service.refresh_and_render(&renderer).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_render_error_propagates() {
        let mut renderer = MockSnapshotRenderPort::new();
        renderer
            .expect_render()
            .returning(|_| Err(ApplicationError::Internal("broken pipe".into())));

        let service = SnapshotService::new(location());
        let result = service.refresh_and_render(&renderer).await;
        assert!(matches!(result, Err(ApplicationError::Internal(_))));
    }

    #[test]
    fn test_debug_lists_attached_sources() {
        let service = SnapshotService::new(location()).with_air_quality(Arc::new(aqi_port(None)));
        let debug = format!("{service:?}");
        assert!(debug.contains("has_air_quality: true"));
        assert!(debug.contains("has_conditions: false"));
    }
}
