//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// weather-insights - summarize weather observations from a CSV file
///
/// Reads rows of (city, date, temperature_fahrenheit) and reports the
/// hottest reading per city, the hottest city per date, per-city and
/// overall averages, and cities with a wide temperature range.
///
/// Examples:
///   weather-insights
///   weather-insights --input observations.csv --threshold 25
///   weather-insights --format markdown --output insights.md
///   weather-insights --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// CSV file with city, date and temperature_fahrenheit columns
    ///
    /// Defaults to the path from .weather-insights.toml, else data.csv.
    #[arg(short, long, value_name = "FILE", env = "WEATHER_INSIGHTS_INPUT")]
    pub input: Option<PathBuf>,

    /// Temperature range (max - min) above which a city is flagged
    ///
    /// A city whose range equals the threshold is not flagged.
    #[arg(short, long, value_name = "DEGREES", allow_negative_numbers = true)]
    pub threshold: Option<f64>,

    /// Output format (json, markdown)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Write the report to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .weather-insights.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .weather-insights.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    clap::ValueEnum,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented JSON (default)
    #[default]
    Json,
    /// Markdown tables
    Markdown,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if let Some(threshold) = self.threshold {
            if threshold.is_nan() {
                return Err("Threshold must be a number".to_string());
            }
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref input) = self.input {
            if input.as_os_str().is_empty() {
                return Err("Input path must not be empty".to_string());
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            input: Some(PathBuf::from("data.csv")),
            threshold: None,
            format: None,
            output: None,
            config: None,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "weather-insights",
            "--input",
            "obs.csv",
            "--threshold",
            "12.5",
            "--format",
            "markdown",
        ])
        .unwrap();

        assert_eq!(args.input, Some(PathBuf::from("obs.csv")));
        assert_eq!(args.threshold, Some(12.5));
        assert_eq!(args.format, Some(OutputFormat::Markdown));
    }

    #[test]
    fn test_negative_threshold_parses() {
        let args = Args::try_parse_from(["weather-insights", "-t", "-5"]).unwrap();
        assert_eq!(args.threshold, Some(-5.0));
    }

    #[test]
    fn test_validation_nan_threshold() {
        let mut args = make_args();
        args.threshold = Some(f64::NAN);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
