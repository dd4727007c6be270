//! Trend indicators: moving averages, BIAS

pub mod bias;
pub mod ma;

pub use bias::*;
pub use ma::*;
