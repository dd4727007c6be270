//! Williams fractal extremes

use crate::indicators::structure::LevelParams;
use crate::models::{LevelCandidate, LevelSource, PriceSeries, SideCandidates};

/// Top fractal: high strictly above every high in the `window` bars on each
/// side. Bottom fractal: low strictly below every low in the same
/// neighbourhood. Bars closer than `window` to either end are never
/// considered.
pub fn fractal_indices(series: &PriceSeries, window: usize) -> (Vec<usize>, Vec<usize>) {
    let bars = series.bars();
    let mut tops = Vec::new();
    let mut bottoms = Vec::new();
    if window == 0 || bars.len() <= 2 * window {
        return (tops, bottoms);
    }

    for i in window..bars.len() - window {
        let neighbours = bars[i - window..i].iter().chain(&bars[i + 1..=i + window]);
        let (mut is_top, mut is_bottom) = (true, true);
        for other in neighbours {
            is_top &= bars[i].high > other.high;
            is_bottom &= bars[i].low < other.low;
            if !is_top && !is_bottom {
                break;
            }
        }
        if is_top {
            tops.push(i);
        }
        if is_bottom {
            bottoms.push(i);
        }
    }
    (tops, bottoms)
}

/// Fractal lows become support candidates, fractal highs resistance
/// candidates.
pub fn fractal_candidates(series: &PriceSeries, params: &LevelParams) -> SideCandidates {
    let (tops, bottoms) = fractal_indices(series, params.window);
    let bars = series.bars();
    SideCandidates {
        supports: bottoms
            .into_iter()
            .map(|i| LevelCandidate::new(bars[i].low, LevelSource::Fractal))
            .collect(),
        resistances: tops
            .into_iter()
            .map(|i| LevelCandidate::new(bars[i].high, LevelSource::Fractal))
            .collect(),
    }
}
