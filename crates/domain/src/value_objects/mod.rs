//! Value Objects - Immutable, identity-less domain primitives

mod air_quality;
mod geo_location;
mod units;

pub use air_quality::{AqiDescriptor, AqiLevel};
pub use geo_location::GeoLocation;
pub use units::{LengthUnit, SpeedUnit};
