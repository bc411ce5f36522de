// crates/timeline-marks-core/src/error.rs

use polars::error::PolarsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("column {column} row {row} is not numeric: {value}")]
    NonNumericValue {
        column: String,
        row: usize,
        value: String,
    },

    #[error("percentile aggregation failed for column {column}: {source}")]
    Aggregation {
        column: String,
        #[source]
        source: PolarsError,
    },

    #[error("entries column {column} holds a malformed payload: {source}")]
    MalformedEntries {
        column: String,
        #[source]
        source: EntryPayloadError,
    },

    #[error("Polars operation failed: {0}")]
    Polars(#[from] PolarsError),
}

#[derive(Error, Debug)]
pub enum EntryPayloadError {
    #[error("JSON decoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON array or a string holding one, found {kind}")]
    UnsupportedCell { kind: &'static str },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("TOML configuration error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON configuration error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("percentile {0} is not one of 0.25, 0.5, 0.75, 0.95")]
    UnsupportedPercentile(f64),
}

pub type Result<T> = std::result::Result<T, TransformError>;
