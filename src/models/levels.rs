use serde::{Deserialize, Serialize};

use crate::models::series::PriceSeries;

/// Heuristic that proposed a level. Used for labelling only, never scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelSource {
    Pivot,
    VolumeProfile,
    Fractal,
}

impl LevelSource {
    pub fn label(&self) -> &'static str {
        match self {
            LevelSource::Pivot => "pivot points",
            LevelSource::VolumeProfile => "volume profile",
            LevelSource::Fractal => "fractal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelSide {
    Support,
    Resistance,
}

/// A raw price proposed by one generator before clustering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelCandidate {
    pub price: f64,
    pub source: LevelSource,
}

impl LevelCandidate {
    pub fn new(price: f64, source: LevelSource) -> Self {
        Self { price, source }
    }
}

/// Candidates from one generator pass, split by side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SideCandidates {
    pub supports: Vec<LevelCandidate>,
    pub resistances: Vec<LevelCandidate>,
}

impl SideCandidates {
    pub fn extend(&mut self, other: SideCandidates) {
        self.supports.extend(other.supports);
        self.resistances.extend(other.resistances);
    }

    pub fn side(&self, side: LevelSide) -> &[LevelCandidate] {
        match side {
            LevelSide::Support => &self.supports,
            LevelSide::Resistance => &self.resistances,
        }
    }
}

/// A clustered level with its 0-100 strength score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusLevel {
    pub price: f64,
    pub strength: f64,
    /// Distinct generators that contributed members, in declaration order.
    pub sources: Vec<LevelSource>,
}

/// Selected levels around the current close.
///
/// Both lists are ordered ascending by price; supports sit strictly below
/// the close and resistances strictly above it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportResistanceResult {
    pub supports: Vec<ConsensusLevel>,
    pub resistances: Vec<ConsensusLevel>,
}

impl SupportResistanceResult {
    pub fn support_levels(&self) -> Vec<f64> {
        self.supports.iter().map(|l| l.price).collect()
    }

    pub fn resistance_levels(&self) -> Vec<f64> {
        self.resistances.iter().map(|l| l.price).collect()
    }

    pub fn support_strengths(&self) -> Vec<f64> {
        self.supports.iter().map(|l| l.strength).collect()
    }

    pub fn resistance_strengths(&self) -> Vec<f64> {
        self.resistances.iter().map(|l| l.strength).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.supports.is_empty() && self.resistances.is_empty()
    }
}

/// Enriched series plus the level side-output computed from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisOutput {
    pub series: PriceSeries,
    pub levels: SupportResistanceResult,
}
