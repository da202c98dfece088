//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Coordinates outside the valid latitude/longitude range
    #[error("Invalid coordinates: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// Unrecognized measurement unit label
    #[error("Unsupported unit: {0}")]
    UnsupportedUnit(String),
}

impl DomainError {
    /// Create an invalid coordinates error
    #[must_use]
    pub const fn invalid_coordinates(latitude: f64, longitude: f64) -> Self {
        Self::InvalidCoordinates {
            latitude,
            longitude,
        }
    }
}
