//! Grouped reductions over weather observations.
//!
//! Every reduction is a single accumulation pass into a map keyed by the
//! group key, followed by a finalize pass over that map. None of them
//! depend on each other, so they can run in any order.

use crate::models::Observation;
use std::collections::BTreeMap;

/// Running statistics for one city.
#[derive(Debug, Clone, PartialEq)]
pub struct CityStats {
    pub min: f64,
    pub max: f64,
    pub readings: Vec<f64>,
}

impl CityStats {
    fn new(reading: f64) -> Self {
        Self {
            min: reading,
            max: reading,
            readings: vec![reading],
        }
    }

    fn add_reading(&mut self, reading: f64) {
        if reading < self.min {
            self.min = reading;
        }
        if reading > self.max {
            self.max = reading;
        }
        self.readings.push(reading);
    }

    pub fn count(&self) -> usize {
        self.readings.len()
    }

    /// Arithmetic mean of the readings seen so far.
    pub fn mean(&self) -> f64 {
        ordered_sum(&self.readings) / self.count() as f64
    }

    /// Difference between the highest and lowest reading.
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

/// Sum that yields the same bits for any permutation of `values`.
///
/// Readings are summed in ascending order with Neumaier compensation.
pub fn ordered_sum(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mut sum = 0.0_f64;
    let mut compensation = 0.0_f64;
    for value in sorted {
        let t = sum + value;
        if sum.abs() >= value.abs() {
            compensation += (sum - t) + value;
        } else {
            compensation += (value - t) + sum;
        }
        sum = t;
    }

    sum + compensation
}

/// Round to one decimal place, halves away from zero.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Accumulate min/max and readings per city.
pub fn group_by_city(observations: &[Observation]) -> BTreeMap<String, CityStats> {
    let mut grouped: BTreeMap<String, CityStats> = BTreeMap::new();

    for obs in observations {
        let reading = obs.temperature_fahrenheit;
        match grouped.get_mut(&obs.city) {
            Some(stats) => stats.add_reading(reading),
            None => {
                grouped.insert(obs.city.clone(), CityStats::new(reading));
            }
        }
    }

    grouped
}

/// Maximum temperature observed in each city.
pub fn max_temperature_by_city(observations: &[Observation]) -> BTreeMap<String, f64> {
    group_by_city(observations)
        .into_iter()
        .map(|(city, stats)| (city, stats.max))
        .collect()
}

/// City holding the maximum temperature on each date.
///
/// When several rows share a date's maximum, the first one in input
/// order wins.
pub fn top_city_by_date(observations: &[Observation]) -> BTreeMap<String, String> {
    let mut leaders: BTreeMap<&str, &Observation> = BTreeMap::new();

    for obs in observations {
        let leader = leaders.entry(obs.date.as_str()).or_insert(obs);
        if obs.temperature_fahrenheit > leader.temperature_fahrenheit {
            *leader = obs;
        }
    }

    leaders
        .into_iter()
        .map(|(date, obs)| (date.to_string(), obs.city.clone()))
        .collect()
}

/// Mean temperature per city, rounded to one decimal.
pub fn average_by_city(observations: &[Observation]) -> BTreeMap<String, f64> {
    group_by_city(observations)
        .into_iter()
        .map(|(city, stats)| (city, round1(stats.mean())))
        .collect()
}

/// Cities whose temperature range is strictly greater than `threshold`,
/// sorted ascending by name.
pub fn high_fluctuation_cities(observations: &[Observation], threshold: f64) -> Vec<String> {
    // BTreeMap iteration is already byte-wise ascending.
    group_by_city(observations)
        .into_iter()
        .filter(|(_, stats)| stats.range() > threshold)
        .map(|(city, _)| city)
        .collect()
}

/// Mean temperature over every observation, rounded to one decimal.
///
/// Returns `None` for an empty slice.
pub fn overall_average(observations: &[Observation]) -> Option<f64> {
    if observations.is_empty() {
        return None;
    }

    let readings: Vec<f64> = observations.iter().map(|o| o.temperature_fahrenheit).collect();
    Some(round1(ordered_sum(&readings) / readings.len() as f64))
}
