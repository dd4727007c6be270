//! Cached market overview, sector boards, hot-sector rankings and board
//! constituents.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Days, NaiveDate, Utc};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::models::{MarketOverview, SectorBoard, SectorKind, SectorRanking, SectorStocks};
use crate::services::analyzer::ServiceError;
use crate::services::cache::{InMemoryTtlCache, TtlCache};
use crate::services::market_data::{MarketDataError, MarketDataProvider};
use crate::services::market_overview::{MarketOverviewProvider, MAJOR_INDICES};
use crate::signals::sectors::{daily_changes, rank_hot_sectors};

/// Extra calendar days fetched before the ranking window so its first day
/// has a prior close.
const HISTORY_PADDING_DAYS: u64 = 10;
/// Longest accepted ranking window, in calendar days.
pub const MAX_HOT_SECTOR_DAYS: u32 = 365;

pub type HotSectorsKey = (NaiveDate, u32, usize);

pub struct MarketService {
    quotes: Arc<dyn MarketOverviewProvider>,
    bars: Arc<dyn MarketDataProvider>,
    overview_cache: InMemoryTtlCache<(), Arc<MarketOverview>>,
    board_cache: InMemoryTtlCache<SectorKind, Arc<SectorBoard>>,
    hot_cache: InMemoryTtlCache<HotSectorsKey, Arc<Vec<SectorRanking>>>,
    stocks_cache: InMemoryTtlCache<String, Arc<SectorStocks>>,
    overview_ttl: Duration,
    sector_ttl: Duration,
    max_concurrent_requests: usize,
}

impl MarketService {
    pub fn new(quotes: Arc<dyn MarketOverviewProvider>, bars: Arc<dyn MarketDataProvider>) -> Self {
        Self {
            quotes,
            bars,
            overview_cache: InMemoryTtlCache::new(),
            board_cache: InMemoryTtlCache::new(),
            hot_cache: InMemoryTtlCache::new(),
            stocks_cache: InMemoryTtlCache::new(),
            overview_ttl: Duration::from_secs(4 * 60 * 60),
            sector_ttl: Duration::from_secs(12 * 60 * 60),
            max_concurrent_requests: 8,
        }
    }

    /// TTL of the index overview and sector boards.
    pub fn with_overview_ttl(mut self, ttl: Duration) -> Self {
        self.overview_ttl = ttl;
        self
    }

    /// TTL of hot-sector rankings and board constituents.
    pub fn with_sector_ttl(mut self, ttl: Duration) -> Self {
        self.sector_ttl = ttl;
        self
    }

    pub fn with_max_concurrent_requests(mut self, limit: usize) -> Self {
        self.max_concurrent_requests = limit.max(1);
        self
    }

    /// Major index quotes plus both board families. A failing board is
    /// logged and left out; a failing index request fails the overview.
    pub async fn overview(&self) -> Result<Arc<MarketOverview>, ServiceError> {
        if let Some(hit) = self.overview_cache.get(&()) {
            debug!("market overview cache hit");
            return Ok(hit);
        }

        let indices = self.quotes.get_index_quotes(&MAJOR_INDICES).await?;
        let industries = self.optional_board(SectorKind::Industry).await;
        let concepts = self.optional_board(SectorKind::Concept).await;
        info!(
            indices = indices.len(),
            industries = industries.as_ref().map(|b| b.sectors.len()),
            concepts = concepts.as_ref().map(|b| b.sectors.len()),
            "market overview fetched"
        );

        let overview = Arc::new(MarketOverview {
            indices,
            industries,
            concepts,
        });
        self.overview_cache
            .insert((), overview.clone(), self.overview_ttl);
        Ok(overview)
    }

    /// Every board of `kind`, strongest first.
    pub async fn sector_board(&self, kind: SectorKind) -> Result<Arc<SectorBoard>, ServiceError> {
        if let Some(hit) = self.board_cache.get(&kind) {
            return Ok(hit);
        }
        let sectors = self.quotes.get_sector_quotes(kind).await?;
        let board = Arc::new(SectorBoard::new(kind, sectors));
        self.board_cache.insert(kind, board.clone(), self.overview_ttl);
        Ok(board)
    }

    async fn optional_board(&self, kind: SectorKind) -> Option<SectorBoard> {
        match self.sector_board(kind).await {
            Ok(board) => Some(board.as_ref().clone()),
            Err(e) => {
                warn!(?kind, error = %e, "sector board unavailable");
                None
            }
        }
    }

    /// Hot industry sectors over the `days` calendar days up to today.
    pub async fn hot_sectors(
        &self,
        days: u32,
        top_n: usize,
    ) -> Result<Arc<Vec<SectorRanking>>, ServiceError> {
        self.hot_sectors_until(Utc::now().date_naive(), days, top_n).await
    }

    /// Hot industry sectors over the `days` calendar days up to `end`.
    ///
    /// Every industry board's daily history is fetched with at most
    /// `max_concurrent_requests` requests in flight. Boards whose history
    /// cannot be fetched are skipped; if all of them fail the last error is
    /// returned.
    pub async fn hot_sectors_until(
        &self,
        end: NaiveDate,
        days: u32,
        top_n: usize,
    ) -> Result<Arc<Vec<SectorRanking>>, ServiceError> {
        if days == 0 || days > MAX_HOT_SECTOR_DAYS {
            return Err(ServiceError::InvalidQuery(format!(
                "days must be between 1 and {MAX_HOT_SECTOR_DAYS}, got {days}"
            )));
        }
        if top_n == 0 {
            return Err(ServiceError::InvalidQuery("top_n must be at least 1".to_string()));
        }

        let key = (end, days, top_n);
        if let Some(hit) = self.hot_cache.get(&key) {
            debug!(%end, days, top_n, "hot sectors cache hit");
            return Ok(hit);
        }

        let board = self.sector_board(SectorKind::Industry).await?;
        let start = end
            .checked_sub_days(Days::new(u64::from(days) + HISTORY_PADDING_DAYS))
            .unwrap_or(NaiveDate::MIN);

        let permits = Arc::new(Semaphore::new(self.max_concurrent_requests));
        let mut tasks = JoinSet::new();
        for sector in &board.sectors {
            let bars = Arc::clone(&self.bars);
            let permits = Arc::clone(&permits);
            let (code, name) = (sector.code.clone(), sector.name.clone());
            tasks.spawn(async move {
                let _permit = permits.acquire_owned().await.ok();
                let result = bars.get_daily_bars(&code, start, end).await;
                (code, name, result)
            });
        }

        let mut history = Vec::new();
        let (mut fetched, mut last_error): (usize, Option<MarketDataError>) = (0, None);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((code, name, Ok(bars))) => {
                    fetched += 1;
                    history.extend(daily_changes(&code, &name, &bars));
                }
                Ok((code, _, Err(e))) => {
                    warn!(sector = %code, error = %e, "sector history unavailable");
                    last_error = Some(e);
                }
                Err(e) => warn!(error = %e, "sector history task failed"),
            }
        }
        if fetched == 0 {
            if let Some(e) = last_error {
                return Err(e.into());
            }
        }

        let rankings = Arc::new(rank_hot_sectors(&history, days, top_n));
        info!(
            sectors = board.sectors.len(),
            fetched,
            ranked = rankings.len(),
            %start,
            %end,
            "hot sectors computed"
        );
        self.hot_cache.insert(key, rankings.clone(), self.sector_ttl);
        Ok(rankings)
    }

    /// Constituents of board `sector`, strongest first.
    pub async fn sector_stocks(&self, sector: &str) -> Result<Arc<SectorStocks>, ServiceError> {
        let key = sector.to_string();
        if let Some(hit) = self.stocks_cache.get(&key) {
            return Ok(hit);
        }
        let stocks = self.quotes.get_sector_constituents(sector).await?;
        let stocks = Arc::new(SectorStocks::new(sector, stocks));
        debug!(sector, stocks = stocks.stocks.len(), "sector constituents fetched");
        self.stocks_cache.insert(key, stocks.clone(), self.sector_ttl);
        Ok(stocks)
    }
}
