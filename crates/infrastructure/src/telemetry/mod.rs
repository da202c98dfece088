//! Telemetry - structured logging via `tracing`

mod subscriber;

pub use subscriber::{TelemetryError, init_tracing};
