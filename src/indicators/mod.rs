pub mod calculator;

pub mod momentum;
pub mod structure;
pub mod trend;
pub mod volatility;

pub use calculator::{calculate_indicators, WARMUP_BARS};
