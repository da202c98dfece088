//! Weather source ports
//!
//! One port per upstream reading. Each is optional for the snapshot
//! service; an unconfigured source simply contributes nothing.

use async_trait::async_trait;
use domain::{
    entities::{CurrentConditions, HourlySeries},
    value_objects::GeoLocation,
};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for current conditions (OpenWeather)
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CurrentConditionsPort: Send + Sync {
    /// Current conditions in provider units
    async fn get_current_conditions(
        &self,
        location: &GeoLocation,
    ) -> Result<CurrentConditions, ApplicationError>;
}

/// Port for the hourly forecast series (Open-Meteo)
#[cfg_attr(test, automock)]
#[async_trait]
pub trait HourlyForecastPort: Send + Sync {
    /// Hourly series around now for the location
    async fn get_hourly_series(
        &self,
        location: &GeoLocation,
    ) -> Result<HourlySeries, ApplicationError>;
}

/// Port for the air quality index (OpenWeather)
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AirQualityPort: Send + Sync {
    /// AQI on the 1-5 scale, `None` if the provider had no value
    async fn get_air_quality(&self, location: &GeoLocation)
    -> Result<Option<u8>, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(
        _: &dyn CurrentConditionsPort,
        _: &dyn HourlyForecastPort,
        _: &dyn AirQualityPort,
    ) {
    }

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn CurrentConditionsPort>();
        assert_send_sync::<dyn HourlyForecastPort>();
        assert_send_sync::<dyn AirQualityPort>();
    }
}
