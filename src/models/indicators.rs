use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One daily OHLCV record as delivered by the market data layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub datetime: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    /// Turnover value traded during the bar.
    pub amount: f64,
}

impl PriceBar {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        amount: f64,
        datetime: DateTime<Utc>,
    ) -> Self {
        Self {
            datetime,
            open,
            high,
            low,
            close,
            volume,
            amount,
        }
    }
}

/// Derived indicator columns for a single row of a `PriceSeries`.
///
/// `None` means the rolling window has not filled yet (or the value is
/// mathematically undefined) and must be read as "no signal".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorValues {
    pub ma5: Option<f64>,
    pub ma10: Option<f64>,
    pub ma20: Option<f64>,
    pub ma30: Option<f64>,
    pub bias5: Option<f64>,
    pub bias10: Option<f64>,
    pub bias20: Option<f64>,
    pub bias30: Option<f64>,
    pub bb_middle: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_lower: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub signal: Option<f64>,
    pub macd_hist: Option<f64>,
    pub rsv: Option<f64>,
    pub k: Option<f64>,
    pub d: Option<f64>,
    pub j: Option<f64>,
}

impl IndicatorValues {
    /// Moving average for one of the supported windows (5, 10, 20, 30).
    pub fn ma(&self, window: u32) -> Option<f64> {
        match window {
            5 => self.ma5,
            10 => self.ma10,
            20 => self.ma20,
            30 => self.ma30,
            _ => None,
        }
    }

    pub fn bias(&self, window: u32) -> Option<f64> {
        match window {
            5 => self.bias5,
            10 => self.bias10,
            20 => self.bias20,
            30 => self.bias30,
            _ => None,
        }
    }
}

/// A bar together with its indicator row, as exposed to API consumers.
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorRow<'a> {
    #[serde(flatten)]
    pub bar: &'a PriceBar,
    #[serde(flatten)]
    pub indicators: &'a IndicatorValues,
}
