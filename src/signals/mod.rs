//! Structured market signals derived from an analysed series and from
//! sector histories.

pub mod categories;
pub mod engine;
pub mod levels;
pub mod momentum;
pub mod scoring;
pub mod sectors;
pub mod trend;
pub mod volume;

pub use categories::*;
pub use engine::{MarketSignals, SignalEngine};
pub use levels::{level_report, LevelDetail, LevelReport, PriceZone};
pub use scoring::*;
pub use sectors::{daily_changes, rank_hot_sectors, rank_hot_sectors_with, DAILY_LEADERS};
pub use volume::{volume_price_signal, VolumePriceSignal, VolumeState};
