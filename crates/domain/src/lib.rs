//! Domain layer for WeatherFuse
//!
//! Readings, value objects and the fusion engine that merges two weather
//! providers into one snapshot. Everything here is pure and synchronous.

pub mod entities;
pub mod errors;
pub mod fusion;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use fusion::{combine, combine_rain, fuse};
pub use value_objects::*;
