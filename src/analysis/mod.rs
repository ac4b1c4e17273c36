//! Weather data analysis.
//!
//! [`process_weather_data`] is the one-shot entry point: load a CSV,
//! run every reduction in [`aggregator`], and return the combined
//! [`WeatherInsights`].

pub mod aggregator;
pub mod progress;

pub use progress::{LogProgress, ProgressObserver, SilentProgress, Stage};

use crate::error::WeatherError;
use crate::loader::load_observations;
use crate::models::{Observation, WeatherInsights};
use std::path::Path;
use tracing::debug;

/// Range above which a city is flagged when no threshold is configured.
pub const DEFAULT_FLUCTUATION_THRESHOLD: f64 = 30.0;

/// Computes [`WeatherInsights`] over an in-memory dataset.
#[derive(Debug, Clone)]
pub struct Aggregator<O: ProgressObserver = LogProgress> {
    fluctuation_threshold: f64,
    observer: O,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(DEFAULT_FLUCTUATION_THRESHOLD)
    }
}

impl Aggregator {
    /// Create an aggregator that reports progress through `tracing`.
    pub fn new(fluctuation_threshold: f64) -> Self {
        Self::with_observer(fluctuation_threshold, LogProgress)
    }
}

impl<O: ProgressObserver> Aggregator<O> {
    /// Create an aggregator with a custom progress observer.
    pub fn with_observer(fluctuation_threshold: f64, observer: O) -> Self {
        Self {
            fluctuation_threshold,
            observer,
        }
    }

    /// Run all five reductions over `observations`.
    pub fn run(&self, observations: &[Observation]) -> Result<WeatherInsights, WeatherError> {
        if observations.is_empty() {
            return Err(WeatherError::EmptyDataset);
        }

        if self.fluctuation_threshold.is_nan() {
            return Err(WeatherError::Processing(
                "fluctuation threshold must be a number".to_string(),
            ));
        }

        debug!(
            "Aggregating {} observations (threshold {})",
            observations.len(),
            self.fluctuation_threshold
        );

        self.observer.on_stage(Stage::HighestByCity);
        let highest_temperature_by_city = aggregator::max_temperature_by_city(observations);

        self.observer.on_stage(Stage::HighFluctuation);
        let cities_with_high_fluctuation =
            aggregator::high_fluctuation_cities(observations, self.fluctuation_threshold);

        self.observer.on_stage(Stage::CityAverages);
        let city_averages = aggregator::average_by_city(observations);

        self.observer.on_stage(Stage::OverallAverage);
        let average_temperature = aggregator::overall_average(observations)
            .ok_or(WeatherError::EmptyDataset)?;

        self.observer.on_stage(Stage::HighestByDate);
        let highest_temperature_by_date = aggregator::top_city_by_date(observations);

        Ok(WeatherInsights {
            highest_temperature_by_city,
            highest_temperature_by_date,
            cities_with_high_fluctuation,
            city_averages,
            average_temperature,
        })
    }

    /// Load the CSV at `path` and aggregate it.
    pub fn process_file(&self, path: &Path) -> Result<WeatherInsights, WeatherError> {
        self.observer.on_stage(Stage::Loading);
        let observations = load_observations(path)?;
        self.run(&observations)
    }
}

/// Load weather observations from `path` and compute insights using
/// `fluctuation_threshold`.
pub fn process_weather_data(
    path: &Path,
    fluctuation_threshold: f64,
) -> Result<WeatherInsights, WeatherError> {
    Aggregator::new(fluctuation_threshold).process_file(path)
}
