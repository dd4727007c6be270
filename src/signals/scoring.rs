//! Strength grading for scored levels

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthGrade {
    VeryWeak,
    Weak,
    Moderate,
    Strong,
    VeryStrong,
}

impl StrengthGrade {
    /// Grade a 0-100 strength score in bands of 20 points.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            StrengthGrade::VeryStrong
        } else if score >= 60.0 {
            StrengthGrade::Strong
        } else if score >= 40.0 {
            StrengthGrade::Moderate
        } else if score >= 20.0 {
            StrengthGrade::Weak
        } else {
            StrengthGrade::VeryWeak
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StrengthGrade::VeryWeak => "very weak",
            StrengthGrade::Weak => "weak",
            StrengthGrade::Moderate => "moderate",
            StrengthGrade::Strong => "strong",
            StrengthGrade::VeryStrong => "very strong",
        }
    }
}

/// Percentage distance of `level` from `price`, always non-negative.
pub fn distance_pct(price: f64, level: f64) -> f64 {
    if price == 0.0 {
        return 0.0;
    }
    ((price - level) / price).abs() * 100.0
}
