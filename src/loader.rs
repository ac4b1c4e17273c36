//! CSV loading for weather observations.
//!
//! Reads a headed CSV file into an in-memory [`Dataset`]. Only the
//! `city`, `date` and `temperature_fahrenheit` columns are required;
//! anything else in the file is ignored.

use crate::error::WeatherError;
use crate::models::{Dataset, Observation};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// Columns every input file must provide.
pub const REQUIRED_COLUMNS: [&str; 3] = ["city", "date", "temperature_fahrenheit"];

/// Temperature cells treated as a missing reading (case-insensitive).
const MISSING_VALUES: [&str; 5] = ["", "nan", "na", "n/a", "null"];

/// One CSV row before the temperature is parsed.
#[derive(Debug, Deserialize)]
struct RawObservation {
    city: String,
    date: String,
    temperature_fahrenheit: String,
}

/// Load all observations from the CSV file at `path`.
///
/// Rows with a missing temperature are skipped. A header-only file
/// yields an empty dataset; rejecting it is left to the aggregation step.
pub fn load_observations(path: &Path) -> Result<Dataset, WeatherError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| WeatherError::from_csv(path, e))?;

    let headers = reader
        .headers()
        .map_err(|e| WeatherError::from_csv(path, e))?
        .clone();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(WeatherError::MalformedData(format!(
            "{} has no header row",
            path.display()
        )));
    }

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(WeatherError::MalformedData(format!(
                "missing required column '{}'",
                column
            )));
        }
    }

    let mut observations = Vec::new();
    let mut rows = 0usize;

    for result in reader.records() {
        let record = result.map_err(|e| WeatherError::from_csv(path, e))?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        rows += 1;

        let raw: RawObservation = record
            .deserialize(Some(&headers))
            .map_err(|e| WeatherError::MalformedData(format!("line {}: {}", line, e)))?;

        match parse_observation(raw, line)? {
            Some(observation) => observations.push(observation),
            None => warn!("Skipping line {}: missing temperature", line),
        }
    }

    if rows > 0 && observations.is_empty() {
        return Err(WeatherError::MalformedData(format!(
            "{} has no rows with a temperature reading",
            path.display()
        )));
    }

    debug!(
        "Loaded {} of {} rows from {}",
        observations.len(),
        rows,
        path.display()
    );

    Ok(observations)
}

/// Turn a raw row into an observation, or `None` when the reading is missing.
fn parse_observation(raw: RawObservation, line: u64) -> Result<Option<Observation>, WeatherError> {
    let cell = raw.temperature_fahrenheit.as_str();
    if MISSING_VALUES.iter().any(|m| cell.eq_ignore_ascii_case(m)) {
        return Ok(None);
    }

    if raw.city.is_empty() {
        return Err(WeatherError::Processing(format!(
            "line {}: city is empty",
            line
        )));
    }

    let temperature_fahrenheit: f64 = cell.parse().map_err(|_| {
        WeatherError::Processing(format!(
            "line {}: cannot parse temperature '{}'",
            line, cell
        ))
    })?;

    if !temperature_fahrenheit.is_finite() {
        return Err(WeatherError::Processing(format!(
            "line {}: temperature '{}' is not a finite number",
            line, cell
        )));
    }

    Ok(Some(Observation {
        city: raw.city,
        date: raw.date,
        temperature_fahrenheit,
    }))
}
