//! Report generation.
//!
//! Renders [`WeatherInsights`] as indented JSON or as a Markdown
//! document, and writes the result to a file or stdout.

use crate::cli::OutputFormat;
use crate::models::{InsightsReport, ReportMetadata, WeatherInsights};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Generate a JSON report containing only the insights.
pub fn generate_json_report(insights: &WeatherInsights) -> Result<String> {
    serde_json::to_string_pretty(insights).map_err(Into::into)
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &InsightsReport) -> String {
    let mut output = String::new();

    output.push_str("# Weather Insights\n\n");
    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_overview_section(&report.insights));
    output.push_str(&generate_city_section(&report.insights));
    output.push_str(&generate_date_section(&report.insights));
    output.push_str(&generate_fluctuation_section(
        &report.insights.cities_with_high_fluctuation,
        report.metadata.fluctuation_threshold,
    ));

    output
}

/// Render `report` in `format`.
pub fn render(report: &InsightsReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => generate_json_report(&report.insights),
        OutputFormat::Markdown => Ok(generate_markdown_report(report)),
    }
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Source:** `{}`\n", metadata.source));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Cities:** {}\n", metadata.cities));
    section.push_str(&format!("- **Dates:** {}\n", metadata.dates));
    section.push_str(&format!(
        "- **Fluctuation Threshold:** {:.1}°F\n",
        metadata.fluctuation_threshold
    ));
    section.push('\n');

    section
}

fn generate_overview_section(insights: &WeatherInsights) -> String {
    format!(
        "## Overview\n\nAverage temperature across all observations: **{:.1}°F**\n\n",
        insights.average_temperature
    )
}

/// Per-city maximum and average, one row per city.
fn generate_city_section(insights: &WeatherInsights) -> String {
    let mut section = String::new();

    section.push_str("## Cities\n\n");
    section.push_str("| City | Highest (°F) | Average (°F) |\n");
    section.push_str("|:---|---:|---:|\n");

    for (city, max) in &insights.highest_temperature_by_city {
        let average = insights
            .city_averages
            .get(city)
            .map(|avg| format!("{:.1}", avg))
            .unwrap_or_else(|| "-".to_string());
        section.push_str(&format!("| {} | {:.1} | {} |\n", city, max, average));
    }
    section.push('\n');

    section
}

fn generate_date_section(insights: &WeatherInsights) -> String {
    let mut section = String::new();

    section.push_str("## Hottest City by Date\n\n");
    section.push_str("| Date | City |\n");
    section.push_str("|:---|:---|\n");

    for (date, city) in &insights.highest_temperature_by_date {
        section.push_str(&format!("| {} | {} |\n", date, city));
    }
    section.push('\n');

    section
}

fn generate_fluctuation_section(cities: &[String], threshold: f64) -> String {
    let mut section = String::new();

    section.push_str("## High Fluctuation Cities\n\n");

    if cities.is_empty() {
        section.push_str(&format!(
            "No city has a temperature range above {:.1}°F.\n\n",
            threshold
        ));
        return section;
    }

    section.push_str(&format!(
        "Cities with a temperature range above {:.1}°F:\n\n",
        threshold
    ));
    for city in cities {
        section.push_str(&format!("- {}\n", city));
    }
    section.push('\n');

    section
}

/// Write rendered output to `path`, or to stdout when `path` is `None`.
pub fn write_output(content: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            file.write_all(content.as_bytes())
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content).context("Failed to write report to stdout")?;
        }
    }

    Ok(())
}
