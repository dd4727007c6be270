//! Error types for the analysis core.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Raised when a bar sequence violates the ordering contract of `PriceSeries`.
#[derive(Debug, Error, PartialEq)]
pub enum SeriesError {
    #[error("bars must be strictly ascending by datetime: {previous} is followed by {next}")]
    Unordered {
        previous: DateTime<Utc>,
        next: DateTime<Utc>,
    },
}

/// Caller contract violations detected by the level engine.
#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    #[error("price series is empty")]
    EmptySeries,

    #[error(transparent)]
    Series(#[from] SeriesError),
}
