//! Snapshot rendering port
//!
//! The fused snapshot is the only thing that leaves the application layer.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{entities::FusedReading, value_objects::AqiDescriptor};
#[cfg(test)]
use mockall::automock;
use serde::Serialize;

use crate::error::ApplicationError;

/// Outcome of one source in a refresh cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceStatus {
    /// The source answered and its reading was used
    Available,
    /// The source was asked but failed
    Failed,
    /// No adapter configured for the source
    Unconfigured,
}

impl SourceStatus {
    /// Lower-case name as used in logs and output
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Failed => "failed",
            Self::Unconfigured => "unconfigured",
        }
    }
}

/// Per-source outcome of a refresh cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceReport {
    /// OpenWeather current conditions
    pub openweather: SourceStatus,
    /// Open-Meteo hourly series
    pub open_meteo: SourceStatus,
    /// OpenWeather air pollution
    pub air_quality: SourceStatus,
}

impl SourceReport {
    /// Number of sources that answered
    #[must_use]
    pub fn available_count(&self) -> usize {
        [self.openweather, self.open_meteo, self.air_quality]
            .into_iter()
            .filter(|status| *status == SourceStatus::Available)
            .count()
    }
}

/// Result of one refresh cycle
#[derive(Debug, Clone, Serialize)]
pub struct WeatherSnapshot {
    /// Fused reading
    pub reading: FusedReading,
    /// AQI label and color for the reading's index
    pub air_quality: AqiDescriptor,
    /// Which sources contributed
    pub sources: SourceReport,
    /// When the cycle ran
    pub generated_at: DateTime<Utc>,
}

impl WeatherSnapshot {
    /// Assemble a snapshot, classifying the reading's AQI
    #[must_use]
    pub fn new(reading: FusedReading, sources: SourceReport, generated_at: DateTime<Utc>) -> Self {
        Self {
            air_quality: AqiDescriptor::classify(reading.aqi),
            reading,
            sources,
            generated_at,
        }
    }
}

/// Port for presenting a snapshot downstream
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SnapshotRenderPort: Send + Sync {
    /// Present one snapshot
    async fn render(&self, snapshot: &WeatherSnapshot) -> Result<(), ApplicationError>;
}

#[cfg(test)]
mod tests {
    use domain::value_objects::AqiLevel;

    use super::*;

    fn report(status: SourceStatus) -> SourceReport {
        SourceReport {
            openweather: status,
            open_meteo: status,
            air_quality: status,
        }
    }

    #[test]
    fn test_snapshot_classifies_aqi() {
        let reading = FusedReading {
            aqi: Some(4),
            ..FusedReading::unavailable()
        };
        let snapshot = WeatherSnapshot::new(reading, report(SourceStatus::Available), Utc::now());
        assert_eq!(snapshot.air_quality.level, Some(AqiLevel::Poor));
    }

    #[test]
    fn test_available_count() {
        let mut sources = report(SourceStatus::Failed);
        assert_eq!(sources.available_count(), 0);
        sources.open_meteo = SourceStatus::Available;
        assert_eq!(sources.available_count(), 1);
    }

    #[test]
    fn test_snapshot_serialization() {
        let snapshot = WeatherSnapshot::new(
            FusedReading::unavailable(),
            report(SourceStatus::Unconfigured),
            Utc::now(),
        );
        let json = serde_json::to_value(&snapshot).expect("serialize");
        assert_eq!(json["sources"]["openweather"], "unconfigured");
        assert_eq!(json["air_quality"]["label"], "Unknown");
        assert!(json["reading"]["temperature"].is_null());
    }
}
