//! Weather client errors

use thiserror::Error;

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid coordinates provided
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// The provider needs an API key and none was configured
    #[error("No API key configured for {0}")]
    MissingApiKey(&'static str),

    /// The provider rejected the API key
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

impl WeatherError {
    /// Map a non-success HTTP status to an error
    pub(crate) fn from_status(status: reqwest::StatusCode) -> Self {
        match status {
            reqwest::StatusCode::TOO_MANY_REQUESTS => Self::RateLimitExceeded,
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                Self::Unauthorized(format!("HTTP {status}"))
            },
            s if s.is_server_error() => Self::ServiceUnavailable(format!("HTTP {status}")),
            _ => Self::RequestFailed(format!("HTTP {status}")),
        }
    }
}

/// Reject coordinates outside the valid range before any request is made
pub(crate) fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), WeatherError> {
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(WeatherError::InvalidCoordinates);
    }
    Ok(())
}
