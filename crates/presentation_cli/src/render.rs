//! Snapshot and outlook renderers
//!
//! Text output mirrors a dashboard: one `label: value unit` line per metric
//! with `--` for absent values. JSON output is one document per line so a
//! `watch` session can be piped into a line-oriented consumer.

use std::io::{self, Write};

use application::{
    error::ApplicationError,
    ports::{SnapshotRenderPort, WeatherSnapshot},
};
use async_trait::async_trait;
use chrono::Local;
use domain::{
    entities::{ForecastBlock, Outlook},
    value_objects::AqiDescriptor,
};
use parking_lot::Mutex;

/// Placeholder for an absent value
pub const PLACEHOLDER: &str = "--";

fn value_or_placeholder(value: Option<f64>, unit: &str) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| format!("{v} {unit}"))
}

/// AQI line, `AQI n (Label)` or `AQI --`
#[must_use]
pub fn format_aqi_line(aqi: Option<u8>) -> String {
    match aqi {
        Some(index) => format!("AQI {index} ({})", AqiDescriptor::classify(Some(index)).label),
        None => format!("AQI {PLACEHOLDER}"),
    }
}

/// Text body for one snapshot
#[must_use]
pub fn format_snapshot(snapshot: &WeatherSnapshot) -> String {
    let r = &snapshot.reading;
    let rows = [
        ("Temperature", value_or_placeholder(r.temperature, "°C")),
        ("Feels like", value_or_placeholder(r.feels_like, "°C")),
        ("Humidity", value_or_placeholder(r.humidity, "%")),
        ("Wind", value_or_placeholder(r.wind_speed_kmh, "km/h")),
        ("Visibility", value_or_placeholder(r.visibility_km, "km")),
        ("Pressure", value_or_placeholder(r.pressure, "hPa")),
        ("Clouds", value_or_placeholder(r.cloud_cover, "%")),
        ("Rain", format!("{} mm", r.rainfall_mm)),
    ];

    let s = &snapshot.sources;
    let mut lines: Vec<String> = rows
        .into_iter()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect();
    lines.push(format_aqi_line(r.aqi));
    lines.push(format!(
        "Sources: openweather {}, open_meteo {}, air_quality {}",
        s.openweather.as_str(),
        s.open_meteo.as_str(),
        s.air_quality.as_str()
    ));
    lines.push(format!(
        "Updated: {}",
        snapshot.generated_at.with_timezone(&Local).format("%H:%M:%S")
    ));
    join_lines(&lines)
}

fn join_lines(lines: &[String]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Text table for an outlook, one column per block
#[must_use]
pub fn format_outlook(outlook: &Outlook) -> String {
    type Cell = fn(&ForecastBlock) -> String;
    let rows: [(&str, Cell); 8] = [
        ("Time", |b| b.label.clone()),
        ("Condition", |b| {
            b.condition.clone().unwrap_or_else(|| PLACEHOLDER.to_string())
        }),
        ("Temp", |b| value_or_placeholder(b.temperature, "°C")),
        ("Feels", |b| value_or_placeholder(b.feels_like, "°C")),
        ("Humidity", |b| value_or_placeholder(b.humidity, "%")),
        ("Wind", |b| value_or_placeholder(b.wind_speed_kmh, "km/h")),
        ("Visibility", |b| value_or_placeholder(b.visibility_km, "km")),
        ("Rain", |b| format!("{} mm", b.rainfall_mm)),
    ];

    let columns: Vec<&ForecastBlock> = outlook.columns().collect();
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|(_, cell)| columns.iter().map(|b| cell(b)).collect())
        .collect();
    let label_width = rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns.len())
        .map(|c| {
            cells
                .iter()
                .map(|row| row[c].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let lines: Vec<String> = rows
        .iter()
        .zip(&cells)
        .map(|((label, _), row)| {
            let line: String = row
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("  {cell:<width$}"))
                .collect();
            format!("{label:<label_width$}{line}").trim_end().to_string()
        })
        .collect();
    join_lines(&lines)
}

/// Descriptor line for an AQI index
#[must_use]
pub fn format_aqi_descriptor(index: u8) -> String {
    let descriptor = AqiDescriptor::classify(Some(index));
    format!("AQI {index}: {} ({})", descriptor.label, descriptor.color)
}

fn io_error(e: &io::Error) -> ApplicationError {
    ApplicationError::Internal(format!("failed to write output: {e}"))
}

/// Writes human-readable snapshots
pub struct ConsoleRenderer {
    out: Mutex<Box<dyn Write + Send>>,
}

impl std::fmt::Debug for ConsoleRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleRenderer").finish_non_exhaustive()
    }
}

impl ConsoleRenderer {
    /// Render to stdout
    #[must_use]
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Render to any writer
    #[must_use]
    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(writer)),
        }
    }
}

#[async_trait]
impl SnapshotRenderPort for ConsoleRenderer {
    async fn render(&self, snapshot: &WeatherSnapshot) -> Result<(), ApplicationError> {
        let body = format_snapshot(snapshot);
        let mut out = self.out.lock();
        writeln!(out, "{body}").map_err(|e| io_error(&e))?;
        out.flush().map_err(|e| io_error(&e))
    }
}

/// Writes one JSON snapshot per line
pub struct JsonRenderer {
    out: Mutex<Box<dyn Write + Send>>,
}

impl std::fmt::Debug for JsonRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonRenderer").finish_non_exhaustive()
    }
}

impl JsonRenderer {
    /// Render to stdout
    #[must_use]
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Render to any writer
    #[must_use]
    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(writer)),
        }
    }
}

#[async_trait]
impl SnapshotRenderPort for JsonRenderer {
    async fn render(&self, snapshot: &WeatherSnapshot) -> Result<(), ApplicationError> {
        let line = serde_json::to_string(snapshot)
            .map_err(|e| ApplicationError::Internal(format!("failed to encode snapshot: {e}")))?;
        let mut out = self.out.lock();
        writeln!(out, "{line}").map_err(|e| io_error(&e))?;
        out.flush().map_err(|e| io_error(&e))
    }
}
