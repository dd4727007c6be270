//! Moving-average and Bollinger band signals

use crate::models::{IndicatorValues, PriceBar};
use crate::signals::categories::{Signal, SignalCategory, SignalDirection};

/// Trend signals for the latest bar. Comparisons with an undefined
/// indicator are skipped.
pub fn trend_signals(bar: &PriceBar, row: &IndicatorValues) -> Vec<Signal> {
    let mut signals = Vec::new();
    let close = bar.close;

    if let Some(ma20) = row.ma20 {
        signals.push(if close > ma20 {
            Signal::new(SignalCategory::Trend, SignalDirection::Bullish, "Price above MA20")
        } else {
            Signal::new(SignalCategory::Trend, SignalDirection::Bearish, "Price below MA20")
        });
    }

    if let (Some(ma5), Some(ma20)) = (row.ma5, row.ma20) {
        signals.push(if ma5 > ma20 {
            Signal::new(SignalCategory::Trend, SignalDirection::Bullish, "MA5 above MA20")
        } else {
            Signal::new(SignalCategory::Trend, SignalDirection::Bearish, "MA5 below MA20")
        });
    }

    if let (Some(ma5), Some(ma10)) = (row.ma5, row.ma10) {
        if ma5 > ma10 {
            let note = if close > ma5 { ", price holding above MA5" } else { "" };
            signals.push(Signal::new(
                SignalCategory::Trend,
                SignalDirection::Bullish,
                format!("Short term: MA5 above MA10{}", note),
            ));
        } else {
            let note = if close < ma5 { ", price below MA5" } else { "" };
            signals.push(Signal::new(
                SignalCategory::Trend,
                SignalDirection::Bearish,
                format!("Short term: MA5 below MA10{}", note),
            ));
        }
    }

    if let (Some(ma20), Some(ma30)) = (row.ma20, row.ma30) {
        if ma20 > ma30 {
            let note = if close > ma20 { ", price holding above MA20" } else { "" };
            signals.push(Signal::new(
                SignalCategory::Trend,
                SignalDirection::Bullish,
                format!("Medium term: MA20 above MA30{}", note),
            ));
        } else {
            let note = if close < ma20 { ", price below MA20" } else { "" };
            signals.push(Signal::new(
                SignalCategory::Trend,
                SignalDirection::Bearish,
                format!("Medium term: MA20 below MA30{}", note),
            ));
        }
    }

    if let (Some(upper), Some(lower)) = (row.bb_upper, row.bb_lower) {
        if close > upper {
            signals.push(Signal::new(
                SignalCategory::Volatility,
                SignalDirection::Overbought,
                "Price above upper Bollinger band",
            ));
        } else if close < lower {
            signals.push(Signal::new(
                SignalCategory::Volatility,
                SignalDirection::Oversold,
                "Price below lower Bollinger band",
            ));
        } else if close > (upper + lower) / 2.0 {
            signals.push(Signal::new(
                SignalCategory::Volatility,
                SignalDirection::Bullish,
                "Price in upper half of Bollinger bands",
            ));
        } else {
            signals.push(Signal::new(
                SignalCategory::Volatility,
                SignalDirection::Bearish,
                "Price in lower half of Bollinger bands",
            ));
        }
    }

    signals
}
