//! Simple moving averages over closing prices

use crate::common::math;

/// Windows carried on every `PriceSeries` row.
pub const MA_WINDOWS: [u32; 4] = [5, 10, 20, 30];

/// Calculate a simple moving average of closes for one window
pub fn calculate_ma(closes: &[f64], window: u32) -> Vec<Option<f64>> {
    math::rolling_mean(closes, window as usize)
}

/// Calculate moving averages for several windows at once
pub fn calculate_mas(closes: &[f64], windows: &[u32]) -> Vec<(u32, Vec<Option<f64>>)> {
    windows
        .iter()
        .map(|&window| (window, calculate_ma(closes, window)))
        .collect()
}
