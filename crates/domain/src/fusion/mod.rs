//! Data fusion
//!
//! Pure, synchronous functions that merge an OpenWeather reading and an
//! Open-Meteo hourly series into one [`FusedReading`](crate::entities::FusedReading).

mod combine;
mod engine;
mod hourly;
pub mod normalize;

pub use combine::{combine, combine_rain};
pub use engine::fuse;
pub use hourly::{parse_timestamp, select_hourly};
