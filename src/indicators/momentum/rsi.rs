//! RSI (Relative Strength Index) indicator

use crate::common::math;

/// Calculate RSI for every bar
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = mean gain / mean loss over the last `period` close-to-close changes
///
/// Bar 0 has no prior close and counts as a zero change, so the first defined
/// value is at index `period - 1`. A zero mean loss leaves the value undefined.
pub fn calculate_rsi(closes: &[f64], period: u32) -> Vec<Option<f64>> {
    if closes.is_empty() {
        return Vec::new();
    }

    let mut gains = Vec::with_capacity(closes.len());
    let mut losses = Vec::with_capacity(closes.len());
    gains.push(0.0);
    losses.push(0.0);
    for pair in closes.windows(2) {
        let change = pair[1] - pair[0];
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
    }

    let avg_gain = math::rolling_mean(&gains, period as usize);
    let avg_loss = math::rolling_mean(&losses, period as usize);

    avg_gain
        .into_iter()
        .zip(avg_loss)
        .map(|(gain, loss)| match (gain, loss) {
            (Some(gain), Some(loss)) if loss != 0.0 => {
                let rs = gain / loss;
                Some(100.0 - (100.0 / (1.0 + rs)))
            }
            _ => None,
        })
        .collect()
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(closes: &[f64]) -> Vec<Option<f64>> {
    calculate_rsi(closes, 14)
}
