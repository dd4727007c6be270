//! Collects every signal for an analysed series.

use serde::Serialize;

use crate::models::AnalysisOutput;
use crate::signals::categories::Signal;
use crate::signals::levels::{level_report, LevelReport};
use crate::signals::momentum::{bias_signals, macd_signal, rsi_signal};
use crate::signals::trend::trend_signals;
use crate::signals::volume::{volume_price_signal, VolumePriceSignal};

#[derive(Debug, Clone, Serialize)]
pub struct MarketSignals {
    pub signals: Vec<Signal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_price: Option<VolumePriceSignal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub levels: Option<LevelReport>,
}

pub struct SignalEngine;

impl SignalEngine {
    /// Evaluate the latest bar of `output`. An empty series yields no signals.
    pub fn evaluate(output: &AnalysisOutput) -> MarketSignals {
        let series = &output.series;
        let (Some(bar), Some(row)) = (series.last_bar(), series.last_indicators()) else {
            return MarketSignals {
                signals: Vec::new(),
                volume_price: None,
                levels: None,
            };
        };
        let rows = series.indicators();
        let previous = rows.len().checked_sub(2).map(|i| &rows[i]);

        let mut signals = trend_signals(bar, row);
        signals.extend(rsi_signal(row));
        signals.extend(bias_signals(row));
        signals.extend(macd_signal(row, previous));

        MarketSignals {
            signals,
            volume_price: volume_price_signal(series.bars()),
            levels: Some(level_report(bar.close, &output.levels)),
        }
    }
}
