use std::path::PathBuf;

use aerosight::{AeroSightConfig, telemetry, web};
use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

/// Command-line arguments for the AeroSight server
#[derive(Parser, Debug)]
#[command(name = "aerosight")]
#[command(about = "Simulated hyperlocal air quality forecast dashboard service")]
#[command(version)]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long, env = "AEROSIGHT_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on (overrides the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = AeroSightConfig::load_from_path(args.config.clone())
        .context("Failed to load configuration")?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    telemetry::init(&config.logging, args.verbose)?;

    info!(
        version = aerosight::VERSION,
        horizon_hours = config.forecast.horizon_hours,
        timezone = %config.forecast.timezone,
        "Starting AeroSight"
    );
    if let Some(path) = &args.config {
        info!("Using config from: {}", path.display());
    }

    web::run(&config).await
}
