//! Volume profile: traded volume distributed over close-price bins

use std::cmp::Ordering;

use serde::Serialize;

use crate::indicators::structure::LevelParams;
use crate::models::{LevelCandidate, LevelSource, PriceSeries, SideCandidates};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VolumeBin {
    /// Lower edge of the bin.
    pub price: f64,
    pub volume: f64,
}

/// Split `[min close, max close]` into `num_bins` equal-width bins and sum the
/// volume of every bar into the bin holding its close. The maximum close
/// falls into the last bin.
///
/// Returns an empty profile when the close range has zero width.
pub fn calculate_volume_profile(series: &PriceSeries, num_bins: usize) -> Vec<VolumeBin> {
    let Some((min, max)) = series.close_range() else {
        return Vec::new();
    };
    let range = max - min;
    if num_bins == 0 || range <= 0.0 {
        return Vec::new();
    }

    let bin_size = range / num_bins as f64;
    let mut bins: Vec<VolumeBin> = (0..num_bins)
        .map(|i| VolumeBin {
            price: min + i as f64 * bin_size,
            volume: 0.0,
        })
        .collect();

    for bar in series.bars() {
        let idx = (((bar.close - min) / bin_size).floor() as usize).min(num_bins - 1);
        bins[idx].volume += bar.volume;
    }

    bins
}

/// Candidates from the heaviest bins.
///
/// Bins are ranked by volume share and exactly the top `volume_top_fraction`
/// of them are kept. When fewer bins traded than that, zero-volume bins fill
/// the remainder in ascending price order. Kept bins below the current close
/// are supports, above it resistances.
pub fn volume_profile_candidates(series: &PriceSeries, params: &LevelParams) -> SideCandidates {
    let Some(current_close) = series.current_close() else {
        return SideCandidates::default();
    };

    let mut profile = calculate_volume_profile(series, params.volume_bins);
    let total_volume: f64 = profile.iter().map(|b| b.volume).sum();
    if total_volume <= 0.0 {
        return SideCandidates::default();
    }

    // Stable sort: equal-volume bins keep ascending price order.
    profile.sort_by(|a, b| b.volume.partial_cmp(&a.volume).unwrap_or(Ordering::Equal));
    let keep = (profile.len() as f64 * params.volume_top_fraction) as usize;

    let mut heavy: Vec<(f64, f64)> = profile
        .into_iter()
        .take(keep)
        .map(|b| (b.price, b.volume / total_volume))
        .collect();
    heavy.sort_by(|a, b| a.0.total_cmp(&b.0));

    tracing::trace!(
        bins = heavy.len(),
        empty = heavy.iter().filter(|(_, share)| *share == 0.0).count(),
        "volume profile heavy bins"
    );

    let mut candidates = SideCandidates::default();
    for (price, _share) in heavy {
        if price < current_close {
            candidates
                .supports
                .push(LevelCandidate::new(price, LevelSource::VolumeProfile));
        } else if price > current_close {
            candidates
                .resistances
                .push(LevelCandidate::new(price, LevelSource::VolumeProfile));
        }
    }
    candidates
}
