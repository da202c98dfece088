//! Infrastructure layer - Adapters for external systems
//!
//! Implements the application ports over the weather clients, and carries
//! configuration, logging setup and the refresh scheduler.

pub mod adapters;
pub mod config;
pub mod scheduler;
pub mod telemetry;
pub mod wiring;

pub use adapters::*;
pub use config::{
    AppConfig, LocationConfig, LogFormat, LoggingConfig, OpenMeteoAppConfig,
    OpenWeatherAppConfig, RefreshConfig,
};
pub use scheduler::{RefreshScheduler, RefreshStats, SchedulerError, TickOutcome};
pub use telemetry::{TelemetryError, init_tracing};
pub use wiring::{build_outlook_service, build_snapshot_service};
