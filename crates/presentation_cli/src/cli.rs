//! Command-line arguments

use std::{fmt, path::PathBuf};

use clap::{Parser, Subcommand, ValueEnum};

/// WeatherFuse CLI
#[derive(Debug, Parser)]
#[command(name = "weatherfuse")]
#[command(author, version, about = "Fused OpenWeather and Open-Meteo readings", long_about = None)]
pub struct Cli {
    /// Verbosity level (overrides the configured log filter)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (default: ./config.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// OpenWeather API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run one refresh cycle and print the fused reading
    Snapshot {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Refresh on the configured schedule until Ctrl-C
    Watch {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Cron expression overriding the configured schedule
        #[arg(long)]
        cron: Option<String>,
    },

    /// Print current conditions and the next forecast blocks
    Outlook {
        /// Number of 3-hour blocks (default from configuration)
        #[arg(short, long)]
        blocks: Option<u8>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Describe an air quality index (1-5)
    Aqi {
        /// OpenWeather AQI value
        index: u8,
    },

    /// Print the effective configuration as TOML (secrets omitted)
    Config,
}

/// Output format for readings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON document per line
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Log filter for a `-v` count, `None` to keep the configured filter
#[must_use]
pub const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_filter_verbosity_zero_keeps_config() {
        assert_eq!(log_filter_from_verbosity(0), None);
    }

    #[test]
    fn log_filter_verbosity_levels() {
        assert_eq!(log_filter_from_verbosity(1), Some("info"));
        assert_eq!(log_filter_from_verbosity(2), Some("debug"));
        assert_eq!(log_filter_from_verbosity(3), Some("trace"));
        assert_eq!(log_filter_from_verbosity(10), Some("trace"));
    }

    #[test]
    fn output_format_display() {
        assert_eq!(OutputFormat::Text.to_string(), "text");
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
