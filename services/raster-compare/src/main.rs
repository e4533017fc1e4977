//! Raster comparison CLI.
//!
//! Compares a fine-resolution reference raster against coarser predictions
//! and writes confusion statistics and NRMSE tables.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use raster_compare::{run, Analysis, CompareConfig};
use raster_io::GeoTiffStore;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "raster-compare")]
#[command(about = "Compare reference rasters against coarser predictions")]
struct Args {
    /// Configuration file path (defaults are used when omitted)
    #[arg(short, long, env = "COMPARE_CONFIG")]
    config: Option<PathBuf>,

    /// Analyses to run
    #[arg(short, long, value_enum, default_value_t = Analysis::All)]
    analysis: Analysis,

    /// Override the output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);
    if args.json_logs {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    info!(analysis = ?args.analysis, "Starting raster comparison");

    // Load configuration
    let mut config = match &args.config {
        Some(path) => CompareConfig::from_yaml(path)?,
        None => CompareConfig::default(),
    };
    config.apply_env_overrides()?;
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }
    config.validate()?;
    info!(
        output_dir = %config.output_dir.display(),
        predictions = config.inundation.prediction_paths.len(),
        datasets = config.nrmse.datasets.len(),
        "Loaded configuration"
    );

    let summary = run(&config, args.analysis, &GeoTiffStore)?;

    if summary.skipped > 0 {
        warn!(skipped = summary.skipped, "Some sources were skipped");
    }
    info!(rows = summary.rows, "Comparison complete");

    Ok(())
}
