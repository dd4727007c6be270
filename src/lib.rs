//! Levelscope: technical indicators and support/resistance detection for
//! daily equity bars.

pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod services;
pub mod signals;

pub use error::{AnalysisError, SeriesError};
pub use indicators::structure::{analyze, detect_levels, LevelParams};
pub use models::{AnalysisOutput, PriceBar, PriceSeries, SupportResistanceResult};
