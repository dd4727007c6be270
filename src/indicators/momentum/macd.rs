//! MACD (Moving Average Convergence Divergence) indicator

use crate::common::math;

/// MACD line, signal line and histogram, one entry per bar.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

/// Calculate MACD for every bar
///
/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal) of MACD
/// Histogram = MACD - Signal
///
/// EMAs are seeded with the first value, so all three lines are defined from
/// the first bar onwards.
pub fn calculate_macd(closes: &[f64], fast_span: u32, slow_span: u32, signal_span: u32) -> MacdSeries {
    let fast = math::ema_series(closes, fast_span as usize);
    let slow = math::ema_series(closes, slow_span as usize);

    let macd: Vec<f64> = fast.iter().zip(slow.iter()).map(|(f, s)| f - s).collect();
    let signal = math::ema_series(&macd, signal_span as usize);
    let histogram = macd.iter().zip(signal.iter()).map(|(m, s)| m - s).collect();

    MacdSeries {
        macd,
        signal,
        histogram,
    }
}

/// Calculate MACD with default spans (12, 26, 9)
pub fn calculate_macd_default(closes: &[f64]) -> MacdSeries {
    calculate_macd(closes, 12, 26, 9)
}
