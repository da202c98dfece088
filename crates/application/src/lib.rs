//! Application layer - Use cases and orchestration
//!
//! Defines the ports the weather sources and renderers plug into, and the
//! services that run a refresh cycle over them.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
