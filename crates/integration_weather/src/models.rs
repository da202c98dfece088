//! Provider payloads
//!
//! Wire types for the OpenWeather and Open-Meteo responses and their
//! conversion into domain readings. Every field decodes leniently, so a
//! malformed field only blanks that field.

use domain::{
    entities::{CurrentConditions, CurrentSnapshot, HourlyMetric, HourlySeries},
    value_objects::{LengthUnit, SpeedUnit},
};
use serde::{Deserialize, Serialize};

use crate::lenient;

/// One OpenWeather observation or forecast block, ready for fusion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionsReport {
    /// Raw metric values in provider units
    pub conditions: CurrentConditions,
    /// First condition description, e.g. "light rain"
    pub description: Option<String>,
    /// Block start time (`dt_txt`), only set on forecast blocks
    pub forecast_time: Option<String>,
}

// ============================================================================
// OpenWeather
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct MainBlock {
    #[serde(default, deserialize_with = "lenient::number")]
    temp: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    feels_like: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    humidity: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pressure: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct WindBlock {
    #[serde(default, deserialize_with = "lenient::number")]
    speed: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct CloudsBlock {
    #[serde(default, deserialize_with = "lenient::number")]
    all: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct RainBlock {
    #[serde(rename = "1h", default, deserialize_with = "lenient::number")]
    last_hour: Option<f64>,
    #[serde(rename = "3h", default, deserialize_with = "lenient::number")]
    last_three_hours: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct DescriptionBlock {
    #[serde(default)]
    description: Option<String>,
}

/// `/weather` response, also the shape of each `/forecast` list entry
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ConditionsPayload {
    #[serde(default, deserialize_with = "lenient::tolerant")]
    main: MainBlock,
    #[serde(default, deserialize_with = "lenient::tolerant")]
    wind: WindBlock,
    #[serde(default, deserialize_with = "lenient::tolerant")]
    clouds: CloudsBlock,
    #[serde(default, deserialize_with = "lenient::number")]
    visibility: Option<f64>,
    #[serde(default, deserialize_with = "lenient::tolerant")]
    rain: Option<RainBlock>,
    #[serde(default, deserialize_with = "lenient::tolerant")]
    weather: Vec<DescriptionBlock>,
    #[serde(default, deserialize_with = "lenient::tolerant")]
    dt_txt: Option<String>,
}

impl ConditionsPayload {
    /// No `rain` object means no rain was observed
    fn rainfall(&self) -> Option<f64> {
        match &self.rain {
            None => Some(0.0),
            Some(rain) => rain.last_hour.or(rain.last_three_hours),
        }
    }
}

impl From<ConditionsPayload> for ConditionsReport {
    fn from(payload: ConditionsPayload) -> Self {
        let rainfall_mm = payload.rainfall();
        Self {
            conditions: CurrentConditions {
                temperature: payload.main.temp,
                feels_like: payload.main.feels_like,
                humidity: payload.main.humidity,
                wind_speed_ms: payload.wind.speed,
                pressure: payload.main.pressure,
                cloud_cover: payload.clouds.all,
                visibility_m: payload.visibility,
                rainfall_mm,
            },
            description: payload
                .weather
                .into_iter()
                .next()
                .and_then(|w| w.description),
            forecast_time: payload.dt_txt,
        }
    }
}

/// `/forecast` response
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ForecastPayload {
    #[serde(default, deserialize_with = "lenient::tolerant")]
    pub list: Vec<ConditionsPayload>,
}

#[derive(Debug, Default, Deserialize)]
struct AirMain {
    #[serde(default, deserialize_with = "lenient::index")]
    aqi: Option<u8>,
}

#[derive(Debug, Default, Deserialize)]
struct AirEntry {
    #[serde(default, deserialize_with = "lenient::tolerant")]
    main: AirMain,
}

/// `/air_pollution` response
#[derive(Debug, Default, Deserialize)]
pub(crate) struct AirPollutionPayload {
    #[serde(default, deserialize_with = "lenient::tolerant")]
    list: Vec<AirEntry>,
}

impl AirPollutionPayload {
    /// AQI of the first list entry
    pub fn aqi(&self) -> Option<u8> {
        self.list.first().and_then(|entry| entry.main.aqi)
    }
}

// ============================================================================
// Open-Meteo
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct HourlyBlock {
    #[serde(default, deserialize_with = "lenient::strings")]
    time: Vec<String>,
    #[serde(default, deserialize_with = "lenient::numbers")]
    temperature_2m: Option<Vec<Option<f64>>>,
    #[serde(
        default,
        alias = "relativehumidity_2m",
        deserialize_with = "lenient::numbers"
    )]
    relative_humidity_2m: Option<Vec<Option<f64>>>,
    #[serde(default, deserialize_with = "lenient::numbers")]
    precipitation: Option<Vec<Option<f64>>>,
    #[serde(default, deserialize_with = "lenient::numbers")]
    pressure_msl: Option<Vec<Option<f64>>>,
    #[serde(default, deserialize_with = "lenient::numbers")]
    visibility: Option<Vec<Option<f64>>>,
    #[serde(default, alias = "windspeed_10m", deserialize_with = "lenient::numbers")]
    wind_speed_10m: Option<Vec<Option<f64>>>,
    #[serde(default, alias = "cloudcover", deserialize_with = "lenient::numbers")]
    cloud_cover: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Default, Deserialize)]
struct HourlyUnits {
    #[serde(default, deserialize_with = "lenient::tolerant")]
    visibility: Option<String>,
    #[serde(default, alias = "windspeed_10m", deserialize_with = "lenient::tolerant")]
    wind_speed_10m: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct CurrentWeatherBlock {
    #[serde(default, deserialize_with = "lenient::number")]
    temperature: Option<f64>,
    #[serde(default, alias = "wind_speed", deserialize_with = "lenient::number")]
    windspeed: Option<f64>,
}

/// `/forecast` response from Open-Meteo
#[derive(Debug, Default, Deserialize)]
pub(crate) struct HourlyPayload {
    #[serde(default, deserialize_with = "lenient::tolerant")]
    utc_offset_seconds: Option<i32>,
    #[serde(default, deserialize_with = "lenient::tolerant")]
    hourly: HourlyBlock,
    #[serde(default, deserialize_with = "lenient::tolerant")]
    hourly_units: HourlyUnits,
    #[serde(default, deserialize_with = "lenient::tolerant")]
    current_weather: Option<CurrentWeatherBlock>,
}

impl From<HourlyPayload> for HourlySeries {
    fn from(payload: HourlyPayload) -> Self {
        let HourlyPayload {
            utc_offset_seconds,
            hourly,
            hourly_units,
            current_weather,
        } = payload;

        // Unknown or missing units fall back to Open-Meteo's documented defaults
        let visibility_unit = hourly_units
            .visibility
            .and_then(|unit| unit.parse::<LengthUnit>().ok())
            .unwrap_or_default();
        let wind_speed_unit = hourly_units
            .wind_speed_10m
            .and_then(|unit| unit.parse::<SpeedUnit>().ok())
            .unwrap_or_default();

        let metrics = [
            (HourlyMetric::Temperature, hourly.temperature_2m),
            (HourlyMetric::RelativeHumidity, hourly.relative_humidity_2m),
            (HourlyMetric::Precipitation, hourly.precipitation),
            (HourlyMetric::PressureMsl, hourly.pressure_msl),
            (HourlyMetric::Visibility, hourly.visibility),
            (HourlyMetric::WindSpeed, hourly.wind_speed_10m),
            (HourlyMetric::CloudCover, hourly.cloud_cover),
        ];

        let mut series =
            Self::new(hourly.time).with_units(visibility_unit, wind_speed_unit);
        for (metric, values) in metrics {
            if let Some(values) = values {
                series.insert_metric(metric, values);
            }
        }
        series.utc_offset_seconds = utc_offset_seconds;
        series.current = current_weather.map(|current| CurrentSnapshot {
            temperature: current.temperature,
            wind_speed: current.windspeed,
        });
        series
    }
}
