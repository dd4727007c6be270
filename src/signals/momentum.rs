//! RSI, BIAS and MACD signals

use crate::models::IndicatorValues;
use crate::signals::categories::{Signal, SignalCategory, SignalDirection};

/// `(window, threshold %)` pairs beyond which BIAS counts as stretched.
pub const BIAS_THRESHOLDS: [(u32, f64); 3] = [(5, 6.0), (10, 8.0), (20, 10.0)];

pub fn rsi_signal(row: &IndicatorValues) -> Option<Signal> {
    let rsi = row.rsi?;
    Some(if rsi > 70.0 {
        Signal::new(
            SignalCategory::Momentum,
            SignalDirection::Overbought,
            format!("RSI overbought ({:.1}), pullback risk", rsi),
        )
    } else if rsi < 30.0 {
        Signal::new(
            SignalCategory::Momentum,
            SignalDirection::Oversold,
            format!("RSI oversold ({:.1}), watch for a rebound", rsi),
        )
    } else {
        Signal::new(
            SignalCategory::Momentum,
            SignalDirection::Neutral,
            format!("RSI neutral ({:.1})", rsi),
        )
    })
}

/// Per-window BIAS zones plus a combined reading when every window agrees.
pub fn bias_signals(row: &IndicatorValues) -> Vec<Signal> {
    let mut signals = Vec::new();
    let mut readings = Vec::new();

    for (window, threshold) in BIAS_THRESHOLDS {
        let Some(bias) = row.bias(window) else {
            continue;
        };
        readings.push((bias, threshold));
        let direction = if bias > threshold {
            SignalDirection::Overbought
        } else if bias < -threshold {
            SignalDirection::Oversold
        } else {
            SignalDirection::Neutral
        };
        signals.push(Signal::new(
            SignalCategory::Momentum,
            direction,
            format!("BIAS{} at {:.2}%", window, bias),
        ));
    }

    if readings.len() == BIAS_THRESHOLDS.len() {
        if readings.iter().all(|(b, t)| b.abs() > *t) {
            let (first, _) = readings[0];
            signals.push(if first > 0.0 {
                Signal::new(
                    SignalCategory::Momentum,
                    SignalDirection::Overbought,
                    "All BIAS windows stretched high, heavy pullback pressure",
                )
            } else {
                Signal::new(
                    SignalCategory::Momentum,
                    SignalDirection::Oversold,
                    "All BIAS windows stretched low, room for a rebound",
                )
            });
        } else if readings.iter().all(|(b, t)| b.abs() < *t) {
            signals.push(Signal::new(
                SignalCategory::Momentum,
                SignalDirection::Neutral,
                "All BIAS windows within normal range",
            ));
        }
    }

    signals
}

/// MACD alignment and whether the histogram is widening versus the prior bar.
pub fn macd_signal(row: &IndicatorValues, previous: Option<&IndicatorValues>) -> Option<Signal> {
    let (macd, signal, hist) = (row.macd?, row.signal?, row.macd_hist?);
    let prev_hist = previous.and_then(|p| p.macd_hist);

    Some(if macd > signal {
        let description = match prev_hist {
            Some(prev) if hist > prev => "MACD bullish with expanding histogram",
            Some(_) => "MACD bullish but momentum fading",
            None => "MACD bullish",
        };
        Signal::new(SignalCategory::Momentum, SignalDirection::Bullish, description)
    } else {
        let description = match prev_hist {
            Some(prev) if hist < prev => "MACD bearish with expanding histogram",
            Some(_) => "MACD bearish but selling easing",
            None => "MACD bearish",
        };
        Signal::new(SignalCategory::Momentum, SignalDirection::Bearish, description)
    })
}
