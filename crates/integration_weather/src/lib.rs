//! Weather provider integrations
//!
//! HTTP clients for OpenWeather (<https://openweathermap.org>) and Open-Meteo
//! (<https://open-meteo.com>). Responses are decoded leniently into domain
//! readings; transport and status failures surface as [`WeatherError`].

mod error;
pub mod lenient;
mod models;
pub mod open_meteo;
pub mod openweather;

pub use error::WeatherError;
pub use models::ConditionsReport;
pub use open_meteo::{HourlyForecastClient, OpenMeteoClient, OpenMeteoConfig};
pub use openweather::{ConditionsClient, OpenWeatherClient, OpenWeatherConfig};
