//! Fetch, analyse and cache a symbol's level analysis for a date range.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Days, NaiveDate};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::error::AnalysisError;
use crate::indicators::structure::{analyze, LevelParams};
use crate::indicators::WARMUP_BARS;
use crate::models::AnalysisOutput;
use crate::services::cache::TtlCache;
use crate::services::market_data::{MarketDataError, MarketDataProvider};

/// Calendar days requested per warm-up bar, covering weekends and holidays.
const CALENDAR_DAYS_PER_BAR: u64 = 2;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("start date {start} is after end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("no price data for {symbol} between {start} and {end}")]
    NoData {
        symbol: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error(transparent)]
    MarketData(#[from] MarketDataError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnalysisKey {
    pub symbol: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Analysis for the requested window. `output.series` starts at `start`;
/// its indicators and levels were computed with the warm-up history.
#[derive(Debug, Clone, Serialize)]
pub struct StockAnalysis {
    pub symbol: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(flatten)]
    pub output: AnalysisOutput,
}

pub type AnalysisCache = dyn TtlCache<AnalysisKey, Arc<StockAnalysis>>;

pub struct StockAnalyzer {
    provider: Arc<dyn MarketDataProvider>,
    cache: Arc<AnalysisCache>,
    params: LevelParams,
    warmup_bars: usize,
    ttl: Duration,
}

impl StockAnalyzer {
    pub fn new(provider: Arc<dyn MarketDataProvider>, cache: Arc<AnalysisCache>) -> Self {
        Self {
            provider,
            cache,
            params: LevelParams::default(),
            warmup_bars: WARMUP_BARS,
            ttl: Duration::from_secs(12 * 60 * 60),
        }
    }

    pub fn with_params(mut self, params: LevelParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_warmup_bars(mut self, warmup_bars: usize) -> Self {
        self.warmup_bars = warmup_bars;
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn params(&self) -> &LevelParams {
        &self.params
    }

    /// Analyse `symbol` over `[start, end]`, serving from the cache when a
    /// live entry exists.
    pub async fn analyze(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Arc<StockAnalysis>, ServiceError> {
        if start > end {
            return Err(ServiceError::InvalidRange { start, end });
        }

        let key = AnalysisKey {
            symbol: symbol.to_string(),
            start,
            end,
        };
        if let Some(hit) = self.cache.get(&key) {
            debug!(symbol, %start, %end, "analysis cache hit");
            return Ok(hit);
        }

        let fetch_start = start
            .checked_sub_days(Days::new(self.warmup_bars as u64 * CALENDAR_DAYS_PER_BAR))
            .unwrap_or(NaiveDate::MIN);
        let bars = self.provider.get_daily_bars(symbol, fetch_start, end).await?;
        let no_data = || ServiceError::NoData {
            symbol: symbol.to_string(),
            start,
            end,
        };
        if bars.is_empty() {
            return Err(no_data());
        }
        info!(symbol, bars = bars.len(), %fetch_start, %end, "price history fetched");

        let full = analyze(bars, &self.params)?;
        let window_start = start
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc())
            .ok_or_else(no_data)?;
        let series = full.series.since(window_start);
        if series.is_empty() {
            return Err(no_data());
        }

        info!(
            symbol,
            rows = series.len(),
            supports = ?full.levels.support_levels(),
            resistances = ?full.levels.resistance_levels(),
            "analysis complete"
        );

        let analysis = Arc::new(StockAnalysis {
            symbol: symbol.to_string(),
            start,
            end,
            output: AnalysisOutput {
                series,
                levels: full.levels,
            },
        });
        self.cache.insert(key, analysis.clone(), self.ttl);
        Ok(analysis)
    }
}
