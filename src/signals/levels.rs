//! Support/resistance report relative to the current close

use serde::{Deserialize, Serialize};

use crate::models::{ConsensusLevel, LevelSide, LevelSource, SupportResistanceResult};
use crate::signals::scoring::{distance_pct, StrengthGrade};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceZone {
    High,
    Middle,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDetail {
    pub side: LevelSide,
    pub price: f64,
    pub strength: f64,
    pub grade: StrengthGrade,
    pub distance_pct: f64,
    pub sources: Vec<LevelSource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelReport {
    pub current_price: f64,
    /// Nearest first (descending price).
    pub supports: Vec<LevelDetail>,
    /// Nearest first (ascending price).
    pub resistances: Vec<LevelDetail>,
    /// Position of the close inside `[lowest support, highest resistance]`, in percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<PriceZone>,
}

pub fn level_report(current_price: f64, levels: &SupportResistanceResult) -> LevelReport {
    let detail = |level: &ConsensusLevel, side: LevelSide| LevelDetail {
        side,
        price: level.price,
        strength: level.strength,
        grade: StrengthGrade::from_score(level.strength),
        distance_pct: distance_pct(current_price, level.price),
        sources: level.sources.clone(),
    };

    let supports: Vec<LevelDetail> = levels
        .supports
        .iter()
        .rev()
        .filter(|l| l.price < current_price)
        .map(|l| detail(l, LevelSide::Support))
        .collect();
    let resistances: Vec<LevelDetail> = levels
        .resistances
        .iter()
        .filter(|l| l.price > current_price)
        .map(|l| detail(l, LevelSide::Resistance))
        .collect();

    let lowest = levels.supports.iter().map(|l| l.price).reduce(f64::min);
    let highest = levels.resistances.iter().map(|l| l.price).reduce(f64::max);
    let position_pct = match (lowest, highest) {
        (Some(low), Some(high)) if high > low => Some((current_price - low) / (high - low) * 100.0),
        _ => None,
    };
    let zone = position_pct.map(|p| {
        if p > 80.0 {
            PriceZone::High
        } else if p < 20.0 {
            PriceZone::Low
        } else {
            PriceZone::Middle
        }
    });

    LevelReport {
        current_price,
        supports,
        resistances,
        position_pct,
        zone,
    }
}
