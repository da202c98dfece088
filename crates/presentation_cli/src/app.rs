//! Command execution
//!
//! Loads configuration, wires the services and runs one subcommand.

#![allow(clippy::print_stdout)]

use std::sync::Arc;

use anyhow::Context;
use application::{ports::SnapshotRenderPort, services::SnapshotService};
use infrastructure::{
    AppConfig, RefreshScheduler, build_outlook_service, build_snapshot_service, init_tracing,
};
use tracing::{info, warn};

use crate::{
    cli::{Cli, Commands, OutputFormat, log_filter_from_verbosity},
    render::{ConsoleRenderer, JsonRenderer, format_aqi_descriptor, format_outlook},
};

/// Load and validate configuration, applying command-line overrides
///
/// # Errors
///
/// Fails if the file cannot be read or a value is invalid.
pub fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::load_from(cli.config.as_deref())
        .context("failed to load configuration")?
        .with_api_key(cli.api_key.clone());
    if let Some(filter) = log_filter_from_verbosity(cli.verbose) {
        config.logging.filter = filter.to_string();
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// Renderer for an output format, writing to stdout
#[must_use]
pub fn renderer(format: OutputFormat) -> Arc<dyn SnapshotRenderPort> {
    match format {
        OutputFormat::Text => Arc::new(ConsoleRenderer::stdout()),
        OutputFormat::Json => Arc::new(JsonRenderer::stdout()),
    }
}

/// Run the parsed command line
///
/// # Errors
///
/// Returns configuration, wiring, rendering and scheduler errors.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    init_tracing(&config.logging)?;

    match cli.command {
        Commands::Snapshot { format } => {
            let service = build_snapshot_service(&config)?;
            service.refresh_and_render(renderer(format).as_ref()).await?;
        },

        Commands::Watch { format, cron } => {
            let service = build_snapshot_service(&config)?;
            let cron = cron.unwrap_or_else(|| config.refresh.cron.clone());
            watch(service, renderer(format), &cron, config.refresh.run_on_start).await?;
        },

        Commands::Outlook { blocks, format } => {
            let service = build_outlook_service(&config, blocks)?;
            let outlook = service.get_outlook().await?;
            match format {
                OutputFormat::Text => print!("{}", format_outlook(&outlook)),
                OutputFormat::Json => println!("{}", serde_json::to_string(&outlook)?),
            }
        },

        Commands::Aqi { index } => println!("{}", format_aqi_descriptor(index)),

        Commands::Config => print!("{}", config.to_toml()?),
    }

    Ok(())
}

/// Refresh on a cron schedule until Ctrl-C
async fn watch(
    service: SnapshotService,
    renderer: Arc<dyn SnapshotRenderPort>,
    cron: &str,
    run_on_start: bool,
) -> anyhow::Result<()> {
    let scheduler = RefreshScheduler::new(cron).await?;
    let service = Arc::new(service);

    scheduler
        .schedule(move || {
            let service = Arc::clone(&service);
            let renderer = Arc::clone(&renderer);
            async move {
                service
                    .refresh_and_render(renderer.as_ref())
                    .await
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            }
        })
        .await?;

    if run_on_start {
        scheduler.run_now().await?;
    }
    scheduler.start().await?;
    info!(cron, next_run = ?scheduler.next_run(), "Watching, press Ctrl-C to stop");

    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C, stopping");
    }

    scheduler.stop().await?;
    let stats = scheduler.stats();
    info!(
        succeeded = stats.success_count,
        failed = stats.failure_count,
        skipped = stats.skipped_count,
        avg_duration_ms = stats.avg_duration_ms,
        "Watch stopped"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn load_config_applies_overrides() {
        let file = write_config("[location]\nlatitude = 13.08\nlongitude = 80.27\n");
        let path = file.path().to_str().unwrap();
        let config =
            load_config(&cli(&["weatherfuse", "-vv", "--config", path, "--api-key", "k", "config"]))
                .unwrap();

        assert!((config.location.latitude - 13.08).abs() < f64::EPSILON);
        assert!(config.openweather.has_api_key());
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn load_config_rejects_invalid_cron() {
        let file = write_config("[refresh]\ncron = \"not a cron\"\n");
        let path = file.path().to_str().unwrap();
        let result = load_config(&cli(&["weatherfuse", "--config", path, "config"]));
        assert!(result.is_err());
    }

    #[test]
    fn load_config_requires_explicit_file() {
        let result = load_config(&cli(&[
            "weatherfuse",
            "--config",
            "/nonexistent/weatherfuse.toml",
            "config",
        ]));
        assert!(result.is_err());
    }
}
