//! Market-wide quote provider interface.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::models::{IndexQuote, SectorConstituent, SectorKind, SectorQuote};
use crate::services::market_data::MarketDataError;

/// Benchmarks shown in the overview, as `market.code` ids: SSE Composite,
/// SZSE Component, ChiNext, STAR 50, SSE 50, CSI 300, CSI 500, CSI 1000.
pub const MAJOR_INDICES: [&str; 8] = [
    "1.000001", "0.399001", "0.399006", "1.000688", "1.000016", "1.000300", "1.000905", "1.000852",
];

#[async_trait]
pub trait MarketOverviewProvider: Send + Sync {
    /// Latest quotes for `secids`, in the order given. Unknown ids are skipped.
    async fn get_index_quotes(&self, secids: &[&str]) -> Result<Vec<IndexQuote>, MarketDataError>;

    /// Every board of `kind`, in provider order.
    async fn get_sector_quotes(&self, kind: SectorKind) -> Result<Vec<SectorQuote>, MarketDataError>;

    /// Stocks belonging to board `sector` (e.g. `BK0475`).
    async fn get_sector_constituents(
        &self,
        sector: &str,
    ) -> Result<Vec<SectorConstituent>, MarketDataError>;
}

/// Serves quotes from memory. A board kind that was never loaded behaves
/// like an unreachable upstream.
#[derive(Debug, Clone, Default)]
pub struct StaticMarketOverviewProvider {
    indices: Vec<IndexQuote>,
    boards: HashMap<SectorKind, Vec<SectorQuote>>,
    constituents: HashMap<String, Vec<SectorConstituent>>,
}

impl StaticMarketOverviewProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indices(mut self, indices: Vec<IndexQuote>) -> Self {
        self.indices = indices;
        self
    }

    pub fn with_board(mut self, kind: SectorKind, sectors: Vec<SectorQuote>) -> Self {
        self.boards.insert(kind, sectors);
        self
    }

    pub fn with_constituents(
        mut self,
        sector: impl Into<String>,
        stocks: Vec<SectorConstituent>,
    ) -> Self {
        self.constituents.insert(sector.into(), stocks);
        self
    }
}

#[async_trait]
impl MarketOverviewProvider for StaticMarketOverviewProvider {
    async fn get_index_quotes(&self, secids: &[&str]) -> Result<Vec<IndexQuote>, MarketDataError> {
        Ok(secids
            .iter()
            .filter_map(|secid| {
                let code = secid.rsplit('.').next().unwrap_or(secid);
                self.indices.iter().find(|q| q.code == code).cloned()
            })
            .collect())
    }

    async fn get_sector_quotes(&self, kind: SectorKind) -> Result<Vec<SectorQuote>, MarketDataError> {
        self.boards
            .get(&kind)
            .cloned()
            .ok_or(MarketDataError::Status(503))
    }

    async fn get_sector_constituents(
        &self,
        sector: &str,
    ) -> Result<Vec<SectorConstituent>, MarketDataError> {
        self.constituents
            .get(sector)
            .cloned()
            .ok_or_else(|| MarketDataError::UnknownSymbol(sector.to_string()))
    }
}
