//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.weather-insights.toml` files.

use crate::analysis::DEFAULT_FLUCTUATION_THRESHOLD;
use crate::cli::OutputFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".weather-insights.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Input settings.
    #[serde(default)]
    pub input: InputConfig,

    /// Analysis settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Where observations are read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// CSV file to process.
    #[serde(default = "default_input_path")]
    pub path: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: default_input_path(),
        }
    }
}

fn default_input_path() -> PathBuf {
    PathBuf::from("data.csv")
}

/// Aggregation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Range (max - min) above which a city is flagged.
    #[serde(default = "default_threshold")]
    pub fluctuation_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            fluctuation_threshold: default_threshold(),
        }
    }
}

fn default_threshold() -> f64 {
    DEFAULT_FLUCTUATION_THRESHOLD
}

/// Report rendering settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Output format.
    #[serde(default)]
    pub format: OutputFormat,

    /// Output file; stdout when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load configuration from `dir`.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence, but only when explicitly given.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref input) = args.input {
            self.input.path = input.clone();
        }

        if let Some(threshold) = args.threshold {
            self.analysis.fluctuation_threshold = threshold;
        }

        if let Some(format) = args.format {
            self.report.format = format;
        }

        if let Some(ref output) = args.output {
            self.report.output = Some(output.clone());
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use clap::Parser;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.input.path, PathBuf::from("data.csv"));
        assert_eq!(config.analysis.fluctuation_threshold, 30.0);
        assert_eq!(config.report.format, OutputFormat::Json);
        assert!(config.report.output.is_none());
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[input]
path = "observations/2024.csv"

[analysis]
fluctuation_threshold = 22.5

[report]
format = "markdown"
output = "insights.md"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.input.path, PathBuf::from("observations/2024.csv"));
        assert_eq!(config.analysis.fluctuation_threshold, 22.5);
        assert_eq!(config.report.format, OutputFormat::Markdown);
        assert_eq!(config.report.output, Some(PathBuf::from("insights.md")));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("[analysis]\n").unwrap();
        assert_eq!(config.analysis.fluctuation_threshold, 30.0);
        assert_eq!(config.input.path, PathBuf::from("data.csv"));
    }

    #[test]
    fn test_merge_with_args() {
        let mut config: Config = toml::from_str(
            "[analysis]\nfluctuation_threshold = 10.0\n[report]\nformat = \"markdown\"\n",
        )
        .unwrap();

        let args = Args::try_parse_from(["weather-insights", "--input", "other.csv"]).unwrap();
        config.merge_with_args(&args);

        // Only explicitly passed flags override the file.
        assert_eq!(config.input.path, PathBuf::from("other.csv"));
        assert_eq!(config.analysis.fluctuation_threshold, 10.0);
        assert_eq!(config.report.format, OutputFormat::Markdown);

        let args = Args::try_parse_from(["weather-insights", "-t", "5", "--format", "json"]).unwrap();
        config.merge_with_args(&args);
        assert_eq!(config.analysis.fluctuation_threshold, 5.0);
        assert_eq!(config.report.format, OutputFormat::Json);
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from_dir(dir.path()).unwrap().is_none());

        std::fs::write(dir.path().join(CONFIG_FILE_NAME), Config::default_toml()).unwrap();
        let config = Config::load_from_dir(dir.path()).unwrap().unwrap();
        assert_eq!(config.analysis.fluctuation_threshold, 30.0);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[input]"));
        assert!(toml_str.contains("[analysis]"));
        assert!(toml_str.contains("[report]"));
    }
}
