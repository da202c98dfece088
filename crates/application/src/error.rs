//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Credentials rejected by a provider
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Operation not possible in the current state
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
