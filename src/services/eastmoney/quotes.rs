use std::time::Duration;

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use reqwest::Client;
use tracing::{debug, warn};

use crate::models::{IndexQuote, SectorConstituent, SectorKind, SectorQuote};
use crate::services::eastmoney::response::{QuoteListData, QuoteListResponse, QuoteRow};
use crate::services::market_data::MarketDataError;
use crate::services::market_overview::MarketOverviewProvider;

pub const DEFAULT_QUOTE_BASE_URL: &str = "https://push2.eastmoney.com";

const ULIST_PATH: &str = "/api/qt/ulist.np/get";
const CLIST_PATH: &str = "/api/qt/clist/get";
const PAGE_SIZE: &str = "1000";

const INDEX_FIELDS: &str = "f2,f3,f4,f5,f6,f12,f13,f14";
const BOARD_FIELDS: &str = "f2,f3,f4,f8,f12,f14,f20,f104,f105,f128,f136";
const STOCK_FIELDS: &str = "f2,f3,f4,f5,f6,f8,f12,f14";

/// Spot quotes for indices, sector boards and board constituents.
pub struct EastmoneyQuoteProvider {
    client: Client,
    base_url: String,
    backoff: ExponentialBuilder,
}

impl EastmoneyQuoteProvider {
    pub fn new(base_url: impl Into<String>) -> Result<Self, MarketDataError> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            backoff: ExponentialBuilder::default()
                .with_min_delay(Duration::from_millis(500))
                .with_max_times(3),
        })
    }

    pub fn with_backoff(mut self, backoff: ExponentialBuilder) -> Self {
        self.backoff = backoff;
        self
    }

    async fn fetch_once(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Option<QuoteListData>, MarketDataError> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketDataError::Status(status.as_u16()));
        }

        let body = response.json::<QuoteListResponse>().await?;
        debug!(
            path,
            rc = body.rc,
            rows = body.data.as_ref().map(|d| d.diff.len()).unwrap_or(0),
            total = ?body.data.as_ref().and_then(|d| d.total),
            "quote list received"
        );
        Ok(body.data)
    }

    /// Rows of a quote list, retried like the kline requests. `None` when
    /// the upstream answers with `data: null`.
    async fn fetch_rows(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Option<Vec<QuoteRow>>, MarketDataError> {
        let data = (|| async { self.fetch_once(path, query).await })
            .retry(self.backoff.clone())
            .when(|e: &MarketDataError| e.is_retryable())
            .notify(|e: &MarketDataError, delay: Duration| {
                warn!(path, error = %e, delay_ms = delay.as_millis() as u64, "retrying quote request");
            })
            .await?;
        Ok(data.map(|d| d.diff))
    }
}

#[async_trait]
impl MarketOverviewProvider for EastmoneyQuoteProvider {
    async fn get_index_quotes(&self, secids: &[&str]) -> Result<Vec<IndexQuote>, MarketDataError> {
        let joined = secids.join(",");
        let query = [
            ("fltt", "2"),
            ("invt", "2"),
            ("secids", joined.as_str()),
            ("fields", INDEX_FIELDS),
        ];
        let rows = self
            .fetch_rows(ULIST_PATH, &query)
            .await?
            .ok_or_else(|| MarketDataError::Malformed("index quote list is empty".to_string()))?;

        Ok(rows
            .into_iter()
            .map(|row| IndexQuote {
                code: row.code,
                name: row.name,
                price: row.price,
                change: row.change,
                change_pct: row.change_pct,
                volume: row.volume,
                amount: row.amount,
            })
            .collect())
    }

    async fn get_sector_quotes(&self, kind: SectorKind) -> Result<Vec<SectorQuote>, MarketDataError> {
        let query = [
            ("pn", "1"),
            ("pz", PAGE_SIZE),
            ("po", "1"),
            ("np", "1"),
            ("fltt", "2"),
            ("invt", "2"),
            ("fid", "f3"),
            ("fs", board_filter(kind)),
            ("fields", BOARD_FIELDS),
        ];
        let rows = self
            .fetch_rows(CLIST_PATH, &query)
            .await?
            .ok_or_else(|| MarketDataError::Malformed(format!("{kind:?} board list is empty")))?;

        Ok(rows
            .into_iter()
            .map(|row| SectorQuote {
                code: row.code,
                name: row.name,
                price: row.price,
                change_pct: row.change_pct,
                turnover_rate: row.turnover_rate,
                market_cap: row.market_cap,
                advancers: row.advancers.map(|n| n as u32),
                decliners: row.decliners.map(|n| n as u32),
                leader: row.leader,
                leader_change_pct: row.leader_change_pct,
            })
            .collect())
    }

    async fn get_sector_constituents(
        &self,
        sector: &str,
    ) -> Result<Vec<SectorConstituent>, MarketDataError> {
        if !is_board_code(sector) {
            return Err(MarketDataError::UnknownSymbol(sector.to_string()));
        }
        let filter = format!("b:{sector} f:!50");
        let query = [
            ("pn", "1"),
            ("pz", PAGE_SIZE),
            ("po", "1"),
            ("np", "1"),
            ("fltt", "2"),
            ("invt", "2"),
            ("fid", "f3"),
            ("fs", filter.as_str()),
            ("fields", STOCK_FIELDS),
        ];
        let rows = self
            .fetch_rows(CLIST_PATH, &query)
            .await?
            .ok_or_else(|| MarketDataError::UnknownSymbol(sector.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|row| SectorConstituent {
                code: row.code,
                name: row.name,
                price: row.price,
                change_pct: row.change_pct,
                change: row.change,
                volume: row.volume,
                amount: row.amount,
                turnover_rate: row.turnover_rate,
            })
            .collect())
    }
}

fn board_filter(kind: SectorKind) -> &'static str {
    match kind {
        SectorKind::Industry => "m:90 t:2 f:!50",
        SectorKind::Concept => "m:90 t:3 f:!50",
    }
}

/// Board codes look like `BK0475`.
pub fn is_board_code(code: &str) -> bool {
    code.len() > 2 && code.starts_with("BK") && code[2..].chars().all(|c| c.is_ascii_digit())
}
