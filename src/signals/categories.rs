//! Signal categories and directions

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalCategory {
    Trend,
    Momentum,
    Volatility,
    Volume,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalDirection {
    Bullish,
    Bearish,
    Overbought,
    Oversold,
    Neutral,
}

/// One observation about the latest bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub category: SignalCategory,
    pub direction: SignalDirection,
    pub description: String,
}

impl Signal {
    pub fn new(category: SignalCategory, direction: SignalDirection, description: impl Into<String>) -> Self {
        Self {
            category,
            direction,
            description: description.into(),
        }
    }
}
