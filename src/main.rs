//! weather-insights - aggregate weather observations from CSV
//!
//! Loads a CSV of (city, date, temperature_fahrenheit) rows and reports
//! per-city maxima and averages, the hottest city per date, cities with
//! a wide temperature range, and the overall average.
//!
//! Exit codes:
//!   0 - Finished, including runs that failed on bad input data; the
//!       failure is reported as a single `Error: ...` line on stderr
//!   1 - Invalid command-line arguments

mod analysis;
mod cli;
mod config;
mod error;
mod loader;
mod models;
mod report;

use analysis::{process_weather_data, Aggregator, SilentProgress};
use anyhow::{Context, Result};
use cli::Args;
use config::{Config, CONFIG_FILE_NAME};
use models::InsightsReport;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        if let Err(e) = handle_init_config() {
            eprintln!("Error: {:#}", e);
        }
        return;
    }

    init_logging(&args);

    debug!("weather-insights v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(&args) {
        debug!("Weather processing failed: {:#}", e);
        eprintln!("Error: {:#}", e);
    }
}

/// Handle --init-config: generate a default .weather-insights.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        anyhow::bail!(
            "{} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
    }

    std::fs::write(path, Config::default_toml())
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("Created {} with default settings.", CONFIG_FILE_NAME);
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Logs go to stderr so stdout carries only the report. `RUST_LOG`
/// takes precedence over the verbosity flags.
fn init_logging(args: &Args) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level().as_str().to_lowercase()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Load data, aggregate it and emit the report.
fn run(args: &Args) -> Result<()> {
    let mut config = load_config(args)?;
    config.merge_with_args(args);

    let input = &config.input.path;
    let threshold = config.analysis.fluctuation_threshold;
    info!("Processing weather data from {}...", input.display());

    let insights = if args.quiet {
        Aggregator::with_observer(threshold, SilentProgress).process_file(input)?
    } else {
        process_weather_data(input, threshold)?
    };

    info!(
        "Aggregated {} cities across {} dates",
        insights.highest_temperature_by_city.len(),
        insights.highest_temperature_by_date.len()
    );

    let report = InsightsReport::new(input.display().to_string(), threshold, insights);
    let output = report::render(&report, config.report.format)?;
    report::write_output(&output, config.report.output.as_deref())?;

    if let Some(ref path) = config.report.output {
        info!("Report saved to {}", path.display());
    }

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE_NAME);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {:#}", e);
            Ok(Config::default())
        }
    }
}
