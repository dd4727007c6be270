//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod levels;
pub mod market;
pub mod series;

pub use indicators::{IndicatorRow, IndicatorValues, PriceBar};
pub use levels::{
    AnalysisOutput, ConsensusLevel, LevelCandidate, LevelSide, LevelSource, SideCandidates,
    SupportResistanceResult,
};
pub use market::{
    Breadth, IndexQuote, MarketOverview, SectorBoard, SectorConstituent, SectorDailyChange,
    SectorKind, SectorQuote, SectorRanking, SectorStocks,
};
pub use series::PriceSeries;
