//! Market data provider interface.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::models::PriceBar;

#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("market data request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("market data provider returned HTTP {0}")]
    Status(u16),

    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("malformed market data: {0}")]
    Malformed(String),
}

impl MarketDataError {
    /// Transport failures and server-side errors are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            MarketDataError::Request(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            MarketDataError::Status(code) => *code >= 500,
            MarketDataError::UnknownSymbol(_) | MarketDataError::Malformed(_) => false,
        }
    }
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Daily bars for `symbol` with `start <= date <= end`, ascending.
    async fn get_daily_bars(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceBar>, MarketDataError>;
}

/// Serves bars from memory. Used for tests, demos and replaying snapshots.
#[derive(Debug, Clone, Default)]
pub struct StaticMarketDataProvider {
    bars: HashMap<String, Vec<PriceBar>>,
}

impl StaticMarketDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bars(mut self, symbol: impl Into<String>, bars: Vec<PriceBar>) -> Self {
        self.bars.insert(symbol.into(), bars);
        self
    }
}

#[async_trait]
impl MarketDataProvider for StaticMarketDataProvider {
    async fn get_daily_bars(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceBar>, MarketDataError> {
        let bars = self
            .bars
            .get(symbol)
            .ok_or_else(|| MarketDataError::UnknownSymbol(symbol.to_string()))?;
        Ok(bars
            .iter()
            .filter(|b| {
                let date = b.datetime.date_naive();
                date >= start && date <= end
            })
            .cloned()
            .collect())
    }
}
