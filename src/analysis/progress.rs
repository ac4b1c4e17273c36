//! Progress notifications for the aggregation pipeline.

use std::fmt;
use tracing::info;

/// A stage of the pipeline, announced before it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Loading,
    HighestByCity,
    HighFluctuation,
    CityAverages,
    OverallAverage,
    HighestByDate,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Loading => write!(f, "Loading weather data"),
            Stage::HighestByCity => write!(f, "Getting highest temperature by city"),
            Stage::HighFluctuation => write!(f, "Getting cities with high temperature fluctuation"),
            Stage::CityAverages => write!(f, "Getting average temperature by city"),
            Stage::OverallAverage => write!(f, "Getting overall average temperature"),
            Stage::HighestByDate => write!(f, "Getting highest temperature by date"),
        }
    }
}

/// Receives a notification before each pipeline stage.
pub trait ProgressObserver {
    fn on_stage(&self, stage: Stage);
}

/// Reports stages through `tracing` at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl ProgressObserver for LogProgress {
    fn on_stage(&self, stage: Stage) {
        info!("{}...", stage);
    }
}

/// Discards all notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgress;

impl ProgressObserver for SilentProgress {
    fn on_stage(&self, _stage: Stage) {}
}
