//! Bollinger Bands indicator

use crate::common::math;

#[derive(Debug, Clone, PartialEq)]
pub struct BollingerSeries {
    pub middle: Vec<Option<f64>>,
    pub upper: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// Calculate Bollinger Bands for every bar
///
/// Middle Band = SMA(period)
/// Upper Band = Middle + (std_dev * sample standard deviation)
/// Lower Band = Middle - (std_dev * sample standard deviation)
pub fn calculate_bollinger_bands(closes: &[f64], period: u32, std_dev: f64) -> BollingerSeries {
    let middle = math::rolling_mean(closes, period as usize);
    let std = math::rolling_std(closes, period as usize);

    let band = |sign: f64| -> Vec<Option<f64>> {
        middle
            .iter()
            .zip(std.iter())
            .map(|(m, s)| Some((*m)? + sign * std_dev * (*s)?))
            .collect()
    };
    let upper = band(1.0);
    let lower = band(-1.0);

    BollingerSeries {
        middle,
        upper,
        lower,
    }
}

/// Calculate Bollinger Bands with default parameters (20 SMA, 2σ)
pub fn calculate_bollinger_bands_default(closes: &[f64]) -> BollingerSeries {
    calculate_bollinger_bands(closes, 20, 2.0)
}
