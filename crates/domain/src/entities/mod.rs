//! Domain entities - per-cycle readings and the outlook table

mod outlook;
mod readings;

pub use outlook::{DEFAULT_OUTLOOK_BLOCKS, ForecastBlock, Outlook};
pub use readings::{CurrentConditions, CurrentSnapshot, FusedReading, HourlyMetric, HourlySeries};
