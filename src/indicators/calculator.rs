//! Builds the full indicator row set for a bar history.

use crate::indicators::momentum::{calculate_kdj_default, calculate_macd_default, calculate_rsi_default};
use crate::indicators::trend::{calculate_bias, calculate_mas, MA_WINDOWS};
use crate::indicators::volatility::calculate_bollinger_bands_default;
use crate::models::indicators::{IndicatorValues, PriceBar};

/// Bars of leading history callers fetch ahead of the analysis window so
/// the longest rolling window (MA30) is populated when it starts.
pub const WARMUP_BARS: usize = 30;

/// Compute every indicator column for `bars`.
///
/// Pure and deterministic: row `i` depends only on `bars[..=i]`.
pub fn calculate_indicators(bars: &[PriceBar]) -> Vec<IndicatorValues> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
    let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();

    // One column per entry of MA_WINDOWS, in the same order: 5, 10, 20, 30.
    let mas: Vec<Vec<Option<f64>>> = calculate_mas(&closes, &MA_WINDOWS)
        .into_iter()
        .map(|(_, ma)| ma)
        .collect();
    let biases: Vec<Vec<Option<f64>>> = mas.iter().map(|ma| calculate_bias(&closes, ma)).collect();

    let bollinger = calculate_bollinger_bands_default(&closes);
    let rsi = calculate_rsi_default(&closes);
    let macd = calculate_macd_default(&closes);
    let kdj = calculate_kdj_default(&highs, &lows, &closes);

    (0..bars.len())
        .map(|i| IndicatorValues {
            ma5: mas[0][i],
            ma10: mas[1][i],
            ma20: mas[2][i],
            ma30: mas[3][i],
            bias5: biases[0][i],
            bias10: biases[1][i],
            bias20: biases[2][i],
            bias30: biases[3][i],
            bb_middle: bollinger.middle[i],
            bb_upper: bollinger.upper[i],
            bb_lower: bollinger.lower[i],
            rsi: rsi[i],
            macd: Some(macd.macd[i]),
            signal: Some(macd.signal[i]),
            macd_hist: Some(macd.histogram[i]),
            rsv: kdj.rsv[i],
            k: kdj.k[i],
            d: kdj.d[i],
            j: kdj.j[i],
        })
        .collect()
}
