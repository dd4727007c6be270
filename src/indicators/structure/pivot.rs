//! Classic pivot point levels

use serde::Serialize;

use crate::indicators::structure::LevelParams;
use crate::models::{LevelCandidate, LevelSource, PriceSeries, SideCandidates};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PivotPoints {
    pub pivot: f64,
    pub r1: f64,
    pub r2: f64,
    pub s1: f64,
    pub s2: f64,
}

/// Calculate classic pivot points
///
/// P = (H + L + C) / 3
/// R1 = 2P - L, R2 = P + (H - L)
/// S1 = 2P - H, S2 = P - (H - L)
pub fn calculate_pivot_points(high: f64, low: f64, close: f64) -> PivotPoints {
    let pivot = (high + low + close) / 3.0;
    let range = high - low;
    PivotPoints {
        pivot,
        r1: 2.0 * pivot - low,
        r2: pivot + range,
        s1: 2.0 * pivot - high,
        s2: pivot - range,
    }
}

/// Pivot candidates from the highest high, lowest low and last close of the
/// most recent `window` bars. Always two per side on a non-empty series.
pub fn pivot_candidates(series: &PriceSeries, params: &LevelParams) -> SideCandidates {
    let bars = series.bars();
    let Some(last) = bars.last() else {
        return SideCandidates::default();
    };

    let recent = &bars[bars.len().saturating_sub(params.window.max(1))..];
    let high = recent.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
    let low = recent.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
    let points = calculate_pivot_points(high, low, last.close);

    SideCandidates {
        supports: vec![
            LevelCandidate::new(points.s2, LevelSource::Pivot),
            LevelCandidate::new(points.s1, LevelSource::Pivot),
        ],
        resistances: vec![
            LevelCandidate::new(points.r1, LevelSource::Pivot),
            LevelCandidate::new(points.r2, LevelSource::Pivot),
        ],
    }
}
