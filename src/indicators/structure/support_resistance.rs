//! Support and resistance level detection
//!
//! Candidates from pivot points, the volume profile and fractal extremes
//! are clustered per side, each cluster is scored against the full series,
//! and the levels nearest to the current close are selected.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AnalysisError;
use crate::indicators::structure::cluster::cluster_levels;
use crate::indicators::structure::fractal::fractal_candidates;
use crate::indicators::structure::pivot::pivot_candidates;
use crate::indicators::structure::selector::select_levels;
use crate::indicators::structure::strength::score_level_detailed;
use crate::indicators::structure::volume_profile::volume_profile_candidates;
use crate::models::{
    AnalysisOutput, ConsensusLevel, LevelCandidate, LevelSide, PriceBar, PriceSeries,
    SideCandidates, SupportResistanceResult,
};

/// Tuning knobs for level detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelParams {
    /// Fractal half-window and pivot lookback, in bars.
    pub window: usize,
    /// Relative distance under which a candidate joins a cluster.
    pub price_threshold: f64,
    /// Minimum members for a cluster to become a level.
    pub touch_count: usize,
    pub volume_bins: usize,
    /// Share of volume bins (by volume rank) kept as candidates.
    pub volume_top_fraction: f64,
    /// Levels kept per side after selection.
    pub max_levels: usize,
    /// Share of the close range around the current close that is excluded.
    pub proximity_fraction: f64,
}

impl Default for LevelParams {
    fn default() -> Self {
        Self {
            window: 20,
            price_threshold: 0.02,
            touch_count: 2,
            volume_bins: 100,
            volume_top_fraction: 0.2,
            max_levels: 3,
            proximity_fraction: 0.01,
        }
    }
}

/// A candidate generator: a pure function of the series.
pub type CandidateGenerator = fn(&PriceSeries, &LevelParams) -> SideCandidates;

/// Generators run, in order, for every detection.
pub const GENERATORS: [(&str, CandidateGenerator); 3] = [
    ("pivot", pivot_candidates),
    ("volume_profile", volume_profile_candidates),
    ("fractal", fractal_candidates),
];

/// Run every generator and concatenate their output.
pub fn collect_candidates(series: &PriceSeries, params: &LevelParams) -> SideCandidates {
    let mut all = SideCandidates::default();
    for (name, generate) in GENERATORS {
        let found = generate(series, params);
        debug!(
            generator = name,
            supports = found.supports.len(),
            resistances = found.resistances.len(),
            "level candidates generated"
        );
        all.extend(found);
    }
    all
}

/// Cluster one side's candidates and score every surviving cluster.
pub fn consensus_levels(
    candidates: &[LevelCandidate],
    series: &PriceSeries,
    params: &LevelParams,
    side: LevelSide,
) -> Vec<ConsensusLevel> {
    cluster_levels(candidates, params.price_threshold, params.touch_count)
        .into_iter()
        .map(|cluster| {
            let price = cluster.mean_price();
            let score = score_level_detailed(price, series);
            debug!(
                side = ?side,
                price,
                members = cluster.len(),
                volume = score.volume,
                turnover = score.turnover,
                bounce = score.bounce,
                failed_breakouts = score.failed_breakouts,
                recency = score.recency,
                history = score.history,
                indicators = score.indicators,
                total = score.total,
                "level scored"
            );
            ConsensusLevel {
                price,
                strength: score.total,
                sources: cluster.sources(),
            }
        })
        .collect()
}

/// Detect the support and resistance levels of an enriched series.
///
/// Fails only on an empty series; every other degenerate input yields
/// empty level lists.
pub fn detect_levels(
    series: &PriceSeries,
    params: &LevelParams,
) -> Result<SupportResistanceResult, AnalysisError> {
    let (Some(current_close), Some((min_close, max_close))) =
        (series.current_close(), series.close_range())
    else {
        return Err(AnalysisError::EmptySeries);
    };

    let candidates = collect_candidates(series, params);
    let supports = consensus_levels(&candidates.supports, series, params, LevelSide::Support);
    let resistances =
        consensus_levels(&candidates.resistances, series, params, LevelSide::Resistance);

    let result = select_levels(
        supports,
        resistances,
        current_close,
        max_close - min_close,
        params,
    );

    debug!(
        current_close,
        supports = ?result.support_levels(),
        resistances = ?result.resistance_levels(),
        "support/resistance levels selected"
    );
    Ok(result)
}

/// Build the enriched series from raw bars and attach its levels.
pub fn analyze(bars: Vec<PriceBar>, params: &LevelParams) -> Result<AnalysisOutput, AnalysisError> {
    let series = PriceSeries::new(bars)?;
    let levels = detect_levels(&series, params)?;
    Ok(AnalysisOutput { series, levels })
}

/// Detect levels with default parameters (window 20, 2% threshold, 2 touches)
pub fn detect_levels_default(series: &PriceSeries) -> Result<SupportResistanceResult, AnalysisError> {
    detect_levels(series, &LevelParams::default())
}
