//! Ordered bar history with its derived indicator columns.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::SeriesError;
use crate::indicators::calculate_indicators;
use crate::models::indicators::{IndicatorRow, IndicatorValues, PriceBar};

/// Bars sorted strictly ascending by datetime, annotated with indicators.
///
/// Indicator rows are computed once at construction and depend only on the
/// bars up to and including their own index, so truncating the front of the
/// series (see [`PriceSeries::since`]) never changes a surviving row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
    indicators: Vec<IndicatorValues>,
}

impl PriceSeries {
    pub fn new(bars: Vec<PriceBar>) -> Result<Self, SeriesError> {
        for pair in bars.windows(2) {
            if pair[1].datetime <= pair[0].datetime {
                return Err(SeriesError::Unordered {
                    previous: pair[0].datetime,
                    next: pair[1].datetime,
                });
            }
        }
        let indicators = calculate_indicators(&bars);
        Ok(Self { bars, indicators })
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn indicators(&self) -> &[IndicatorValues] {
        &self.indicators
    }

    pub fn last_bar(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    pub fn last_indicators(&self) -> Option<&IndicatorValues> {
        self.indicators.last()
    }

    /// Close of the most recent bar.
    pub fn current_close(&self) -> Option<f64> {
        self.bars.last().map(|b| b.close)
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }

    /// `(min close, max close)` over the whole series.
    pub fn close_range(&self) -> Option<(f64, f64)> {
        let mut iter = self.bars.iter().map(|b| b.close);
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), c| (lo.min(c), hi.max(c))))
    }

    /// Drop the warm-up prefix: keeps rows at or after `start`, together with
    /// the indicator values that were computed using the dropped history.
    pub fn since(&self, start: DateTime<Utc>) -> Self {
        let offset = self.bars.partition_point(|b| b.datetime < start);
        Self {
            bars: self.bars[offset..].to_vec(),
            indicators: self.indicators[offset..].to_vec(),
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = IndicatorRow<'_>> {
        self.bars
            .iter()
            .zip(self.indicators.iter())
            .map(|(bar, indicators)| IndicatorRow { bar, indicators })
    }
}
