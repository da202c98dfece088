//! Infrastructure adapters
//!
//! Adapters connect application ports to the provider clients.

mod open_meteo_adapter;
mod openweather_adapter;

use application::error::ApplicationError;
use integration_weather::WeatherError;

pub use open_meteo_adapter::OpenMeteoAdapter;
pub use openweather_adapter::OpenWeatherAdapter;

/// Map a provider client error to an application error
pub(crate) fn map_weather_error(err: WeatherError) -> ApplicationError {
    match err {
        WeatherError::ConnectionFailed(e)
        | WeatherError::RequestFailed(e)
        | WeatherError::ServiceUnavailable(e) => ApplicationError::ExternalService(e),
        WeatherError::ParseError(e) => {
            ApplicationError::ExternalService(format!("malformed response: {e}"))
        },
        WeatherError::InvalidCoordinates => {
            ApplicationError::InvalidOperation("Invalid coordinates".into())
        },
        WeatherError::MissingApiKey(provider) => {
            ApplicationError::Configuration(format!("{provider} API key is not set"))
        },
        WeatherError::Unauthorized(e) => ApplicationError::NotAuthorized(e),
        WeatherError::RateLimitExceeded => ApplicationError::RateLimited,
    }
}
