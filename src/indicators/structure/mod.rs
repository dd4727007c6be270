//! Market structure: support/resistance detection

pub mod cluster;
pub mod fractal;
pub mod pivot;
pub mod selector;
pub mod strength;
pub mod support_resistance;
pub mod volume_profile;

pub use cluster::{cluster_levels, PriceCluster};
pub use fractal::{fractal_candidates, fractal_indices};
pub use pivot::{calculate_pivot_points, pivot_candidates, PivotPoints};
pub use selector::select_levels;
pub use strength::{score_level, score_level_detailed, LevelScore};
pub use support_resistance::*;
pub use volume_profile::{calculate_volume_profile, volume_profile_candidates, VolumeBin};
