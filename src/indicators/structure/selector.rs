//! Picks the actionable levels around the current close.

use crate::indicators::structure::LevelParams;
use crate::models::{ConsensusLevel, SupportResistanceResult};

/// Keep the levels nearest to `current_close` on each side.
///
/// Levels within `proximity_fraction` of the close range (`max close - min
/// close`) of the current close are treated as "at the price" and dropped.
/// Supports must then lie strictly below the close and resistances strictly
/// above it; each side keeps its `max_levels` nearest entries, ordered
/// ascending by price.
pub fn select_levels(
    supports: Vec<ConsensusLevel>,
    resistances: Vec<ConsensusLevel>,
    current_close: f64,
    close_range: f64,
    params: &LevelParams,
) -> SupportResistanceResult {
    let band = close_range.abs() * params.proximity_fraction;

    let mut supports: Vec<ConsensusLevel> = supports
        .into_iter()
        .filter(|l| l.price < current_close - band && l.price < current_close)
        .collect();
    let mut resistances: Vec<ConsensusLevel> = resistances
        .into_iter()
        .filter(|l| l.price > current_close + band && l.price > current_close)
        .collect();

    supports.sort_by(|a, b| a.price.total_cmp(&b.price));
    resistances.sort_by(|a, b| a.price.total_cmp(&b.price));

    let skip = supports.len().saturating_sub(params.max_levels);
    supports.drain(..skip);
    resistances.truncate(params.max_levels);

    SupportResistanceResult {
        supports,
        resistances,
    }
}
