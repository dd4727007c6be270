//! KDJ stochastic oscillator

use crate::common::math;

#[derive(Debug, Clone, PartialEq)]
pub struct KdjSeries {
    pub rsv: Vec<Option<f64>>,
    pub k: Vec<Option<f64>>,
    pub d: Vec<Option<f64>>,
    pub j: Vec<Option<f64>>,
}

/// Calculate KDJ for every bar
///
/// RSV = (Close - LLV(low, n)) / (HHV(high, n) - LLV(low, n)) * 100
/// K = SMA(RSV, 3), D = SMA(K, 3), J = 3K - 2D
///
/// RSV is undefined when the high/low window has zero width.
pub fn calculate_kdj(highs: &[f64], lows: &[f64], closes: &[f64], period: u32) -> KdjSeries {
    let lowest = math::rolling_min(lows, period as usize);
    let highest = math::rolling_max(highs, period as usize);

    let rsv: Vec<Option<f64>> = closes
        .iter()
        .zip(lowest.iter().zip(highest.iter()))
        .map(|(&close, (&low, &high))| {
            let (low, high) = (low?, high?);
            let width = high - low;
            if width == 0.0 {
                None
            } else {
                Some((close - low) / width * 100.0)
            }
        })
        .collect();

    let k = math::rolling_mean_opt(&rsv, 3);
    let d = math::rolling_mean_opt(&k, 3);
    let j = k
        .iter()
        .zip(d.iter())
        .map(|(k, d)| Some(3.0 * (*k)? - 2.0 * (*d)?))
        .collect();

    KdjSeries { rsv, k, d, j }
}

/// Calculate KDJ with default period (9)
pub fn calculate_kdj_default(highs: &[f64], lows: &[f64], closes: &[f64]) -> KdjSeries {
    calculate_kdj(highs, lows, closes, 9)
}
