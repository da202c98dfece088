//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod outlook_port;
mod render_port;
mod weather_port;

#[cfg(test)]
pub use outlook_port::MockForecastOutlookPort;
pub use outlook_port::ForecastOutlookPort;
#[cfg(test)]
pub use render_port::MockSnapshotRenderPort;
pub use render_port::{SnapshotRenderPort, SourceReport, SourceStatus, WeatherSnapshot};
#[cfg(test)]
pub use weather_port::{MockAirQualityPort, MockCurrentConditionsPort, MockHourlyForecastPort};
pub use weather_port::{AirQualityPort, CurrentConditionsPort, HourlyForecastPort};
