//! Error types for loading and aggregating weather data.

use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while loading or aggregating a weather dataset.
///
/// None of these are retryable: the input has to change before a
/// second attempt can succeed.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The data file is missing or cannot be read.
    #[error("Weather data file not found or unreadable: {}", path.display())]
    DataSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but holds no usable table.
    #[error("Malformed weather data: {0}")]
    MalformedData(String),

    /// The table parsed but contains zero observations.
    #[error("Empty dataset provided")]
    EmptyDataset,

    /// Any other failure while computing aggregates.
    #[error("Error processing weather data: {0}")]
    Processing(String),
}

impl WeatherError {
    /// Wrap a CSV reader error, routing I/O failures to `DataSource`.
    pub fn from_csv(path: &std::path::Path, err: csv::Error) -> Self {
        if !err.is_io_error() {
            return WeatherError::MalformedData(err.to_string());
        }

        match err.into_kind() {
            csv::ErrorKind::Io(source) => WeatherError::DataSource {
                path: path.to_path_buf(),
                source,
            },
            other => WeatherError::MalformedData(format!("{:?}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = WeatherError::DataSource {
            path: PathBuf::from("missing.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert!(err.to_string().contains("missing.csv"));

        assert_eq!(WeatherError::EmptyDataset.to_string(), "Empty dataset provided");
        assert_eq!(
            WeatherError::Processing("bad threshold".to_string()).to_string(),
            "Error processing weather data: bad threshold"
        );
    }
}
