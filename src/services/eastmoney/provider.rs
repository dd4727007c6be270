use std::time::Duration;

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use chrono::NaiveDate;
use reqwest::Client;
use tracing::{debug, warn};

use crate::models::PriceBar;
use crate::services::eastmoney::quotes::is_board_code;
use crate::services::eastmoney::response::{parse_kline, KlineResponse};
use crate::services::market_data::{MarketDataError, MarketDataProvider};

pub const DEFAULT_BASE_URL: &str = "https://push2his.eastmoney.com";

const KLINE_PATH: &str = "/api/qt/stock/kline/get";

/// Daily bars with forward-adjusted prices from Eastmoney.
pub struct EastmoneyProvider {
    client: Client,
    base_url: String,
    backoff: ExponentialBuilder,
}

impl EastmoneyProvider {
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
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceBar>, MarketDataError> {
        let secid = secid(symbol)?;
        let beg = start.format("%Y%m%d").to_string();
        let end = end.format("%Y%m%d").to_string();
        let query = [
            ("secid", secid.as_str()),
            ("fields1", "f1,f2,f3,f4,f5,f6"),
            ("fields2", "f51,f52,f53,f54,f55,f56,f57,f58,f59,f60,f61"),
            ("klt", "101"),
            ("fqt", "1"),
            ("beg", beg.as_str()),
            ("end", end.as_str()),
        ];

        let response = self
            .client
            .get(format!("{}{}", self.base_url, KLINE_PATH))
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketDataError::Status(status.as_u16()));
        }

        let body = response.json::<KlineResponse>().await?;
        let Some(data) = body.data else {
            return Err(MarketDataError::UnknownSymbol(symbol.to_string()));
        };
        debug!(
            symbol,
            code = %data.code,
            rc = body.rc,
            rows = data.klines.len(),
            "kline response received"
        );

        let mut bars = data
            .klines
            .iter()
            .map(|line| parse_kline(line))
            .collect::<Result<Vec<_>, _>>()?;
        bars.sort_by_key(|b| b.datetime);
        bars.dedup_by_key(|b| b.datetime);
        Ok(bars)
    }
}

#[async_trait]
impl MarketDataProvider for EastmoneyProvider {
    async fn get_daily_bars(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceBar>, MarketDataError> {
        (|| async { self.fetch_once(symbol, start, end).await })
            .retry(self.backoff.clone())
            .when(|e: &MarketDataError| e.is_retryable())
            .notify(|e: &MarketDataError, delay: Duration| {
                warn!(symbol, error = %e, delay_ms = delay.as_millis() as u64, "retrying market data request");
            })
            .await
    }
}

/// Map a six-digit A-share code to Eastmoney's `market.code` identifier.
///
/// Codes already carrying a market prefix (`1.600519`) pass through.
/// Shanghai listings (6xx/9xx) are market 1, Shenzhen and Beijing market 0,
/// sector boards (`BK0475`) market 90.
pub fn secid(symbol: &str) -> Result<String, MarketDataError> {
    let symbol = symbol.trim();
    if symbol.contains('.') {
        return Ok(symbol.to_string());
    }
    if is_board_code(symbol) {
        return Ok(format!("90.{symbol}"));
    }
    if symbol.len() != 6 || !symbol.chars().all(|c| c.is_ascii_digit()) {
        return Err(MarketDataError::UnknownSymbol(symbol.to_string()));
    }
    let market = match symbol.as_bytes()[0] {
        b'5' | b'6' | b'9' => 1,
        _ => 0,
    };
    Ok(format!("{market}.{symbol}"))
}
