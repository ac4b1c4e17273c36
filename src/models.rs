//! Data models for weather insights.
//!
//! This module contains the input observation record, the aggregated
//! result record, and the report wrapper used for rendering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single weather reading loaded from the source CSV.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// City identifier (non-empty).
    pub city: String,
    /// Calendar date, kept verbatim as the grouping key.
    pub date: String,
    /// Measured temperature in degrees Fahrenheit.
    pub temperature_fahrenheit: f64,
}

impl Observation {
    #[cfg(test)]
    pub fn new(city: &str, date: &str, temperature_fahrenheit: f64) -> Self {
        Self {
            city: city.to_string(),
            date: date.to_string(),
            temperature_fahrenheit,
        }
    }
}

/// Observations loaded from one source file, in file order.
pub type Dataset = Vec<Observation>;

/// The five derived views computed over a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherInsights {
    /// City -> maximum temperature.
    pub highest_temperature_by_city: BTreeMap<String, f64>,
    /// Date -> city holding the maximum temperature on that date.
    pub highest_temperature_by_date: BTreeMap<String, String>,
    /// Cities whose temperature range exceeds the threshold, sorted.
    pub cities_with_high_fluctuation: Vec<String>,
    /// City -> mean temperature, rounded to one decimal.
    pub city_averages: BTreeMap<String, f64>,
    /// Mean temperature over every observation, rounded to one decimal.
    pub average_temperature: f64,
}

/// Metadata describing how a set of insights was produced.
#[derive(Debug, Clone)]
pub struct ReportMetadata {
    /// Path of the CSV the insights were computed from.
    pub source: String,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Number of distinct cities.
    pub cities: usize,
    /// Number of distinct dates.
    pub dates: usize,
    /// Fluctuation threshold used.
    pub fluctuation_threshold: f64,
}

/// Insights together with their metadata, ready for rendering.
#[derive(Debug, Clone)]
pub struct InsightsReport {
    pub metadata: ReportMetadata,
    pub insights: WeatherInsights,
}

impl InsightsReport {
    /// Build a report stamped with the current time.
    pub fn new(
        source: impl Into<String>,
        fluctuation_threshold: f64,
        insights: WeatherInsights,
    ) -> Self {
        let metadata = ReportMetadata {
            source: source.into(),
            generated_at: Utc::now(),
            cities: insights.highest_temperature_by_city.len(),
            dates: insights.highest_temperature_by_date.len(),
            fluctuation_threshold,
        };

        Self { metadata, insights }
    }
}
