//! Volume/price relationship of the latest bar

use serde::{Deserialize, Serialize};

use crate::models::PriceBar;

/// Bars in the trailing volume average.
pub const VOLUME_AVERAGE_BARS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeState {
    Surge,
    Expanded,
    Mild,
    Steady,
    Shrinking,
}

impl VolumeState {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > 4.0 {
            VolumeState::Surge
        } else if ratio > 2.0 {
            VolumeState::Expanded
        } else if ratio > 1.2 {
            VolumeState::Mild
        } else if ratio < 0.8 {
            VolumeState::Shrinking
        } else {
            VolumeState::Steady
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumePriceSignal {
    /// Latest volume over the trailing average (latest bar included).
    pub volume_ratio: f64,
    /// Close-to-close change of the latest bar, as a fraction.
    pub price_change: f64,
    pub state: VolumeState,
    pub description: String,
}

/// Classify the latest bar. Needs at least `VOLUME_AVERAGE_BARS` bars and a
/// non-zero average volume.
pub fn volume_price_signal(bars: &[PriceBar]) -> Option<VolumePriceSignal> {
    if bars.len() < VOLUME_AVERAGE_BARS.max(2) {
        return None;
    }
    let latest = &bars[bars.len() - 1];
    let previous = &bars[bars.len() - 2];

    let average = bars[bars.len() - VOLUME_AVERAGE_BARS..]
        .iter()
        .map(|b| b.volume)
        .sum::<f64>()
        / VOLUME_AVERAGE_BARS as f64;
    if average <= 0.0 || previous.close == 0.0 {
        return None;
    }

    let volume_ratio = latest.volume / average;
    let price_change = (latest.close - previous.close) / previous.close;
    let state = VolumeState::from_ratio(volume_ratio);
    let rising = price_change > 0.0;

    let description = match (state, rising) {
        (VolumeState::Surge, true) => "Heavy volume rally, buyers in control",
        (VolumeState::Surge, false) => "Heavy volume sell-off, strong selling pressure",
        (VolumeState::Expanded, true) => "Volume confirms the advance",
        (VolumeState::Expanded, false) => "Rising volume on the decline",
        (VolumeState::Mild, true) => "Slightly higher volume on the advance",
        (VolumeState::Mild, false) => "Slightly higher volume on the decline",
        (VolumeState::Shrinking, true) => "Advance on thin volume, weak momentum",
        (VolumeState::Shrinking, false) => "Decline on thin volume, selling may ease",
        (VolumeState::Steady, _) => "Volume flat, market undecided",
    };

    Some(VolumePriceSignal {
        volume_ratio,
        price_change,
        state,
        description: description.to_string(),
    })
}
