//! WeatherFuse CLI
//!
//! Fused weather readings from OpenWeather and Open-Meteo.

use clap::Parser;
use presentation_cli::{Cli, app};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::run(Cli::parse()).await
}
