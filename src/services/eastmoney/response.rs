//! Wire format of the Eastmoney kline and quote-list endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use crate::models::PriceBar;
use crate::services::market_data::MarketDataError;

#[derive(Debug, Deserialize)]
pub struct KlineResponse {
    #[serde(default)]
    pub rc: i64,
    pub data: Option<KlineData>,
}

#[derive(Debug, Deserialize)]
pub struct KlineData {
    pub code: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub klines: Vec<String>,
}

/// Parse one `date,open,close,high,low,volume,amount,...` row.
pub fn parse_kline(line: &str) -> Result<PriceBar, MarketDataError> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < 7 {
        return Err(MarketDataError::Malformed(format!(
            "expected at least 7 fields, got {}: {line}",
            fields.len()
        )));
    }

    let date = NaiveDate::parse_from_str(fields[0], "%Y-%m-%d")
        .map_err(|e| MarketDataError::Malformed(format!("bad date {:?}: {e}", fields[0])))?;
    let datetime = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| MarketDataError::Malformed(format!("bad date {:?}", fields[0])))?
        .and_utc();

    let number = |idx: usize| -> Result<f64, MarketDataError> {
        fields[idx].trim().parse::<f64>().map_err(|_| {
            MarketDataError::Malformed(format!("bad number {:?} in {line}", fields[idx]))
        })
    };

    Ok(PriceBar {
        datetime,
        open: number(1)?,
        close: number(2)?,
        high: number(3)?,
        low: number(4)?,
        volume: number(5)?,
        amount: number(6)?,
    })
}

/// Envelope shared by the `ulist.np` and `clist` quote endpoints (`np=1`).
#[derive(Debug, Deserialize)]
pub struct QuoteListResponse {
    #[serde(default)]
    pub rc: i64,
    pub data: Option<QuoteListData>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteListData {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub diff: Vec<QuoteRow>,
}

/// One row of a quote list. Field names are Eastmoney's `fNN` column ids;
/// suspended or missing values arrive as `"-"` and map to `None`.
#[derive(Debug, Deserialize)]
pub struct QuoteRow {
    #[serde(rename = "f12")]
    pub code: String,
    #[serde(rename = "f14", default)]
    pub name: String,
    #[serde(rename = "f2", default, deserialize_with = "lenient_f64")]
    pub price: Option<f64>,
    #[serde(rename = "f3", default, deserialize_with = "lenient_f64")]
    pub change_pct: Option<f64>,
    #[serde(rename = "f4", default, deserialize_with = "lenient_f64")]
    pub change: Option<f64>,
    #[serde(rename = "f5", default, deserialize_with = "lenient_f64")]
    pub volume: Option<f64>,
    #[serde(rename = "f6", default, deserialize_with = "lenient_f64")]
    pub amount: Option<f64>,
    #[serde(rename = "f8", default, deserialize_with = "lenient_f64")]
    pub turnover_rate: Option<f64>,
    #[serde(rename = "f20", default, deserialize_with = "lenient_f64")]
    pub market_cap: Option<f64>,
    #[serde(rename = "f104", default, deserialize_with = "lenient_f64")]
    pub advancers: Option<f64>,
    #[serde(rename = "f105", default, deserialize_with = "lenient_f64")]
    pub decliners: Option<f64>,
    #[serde(rename = "f128", default, deserialize_with = "lenient_text")]
    pub leader: Option<String>,
    #[serde(rename = "f136", default, deserialize_with = "lenient_f64")]
    pub leader_change_pct: Option<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(NumberOrText::Number(v)) => Some(v),
        Some(NumberOrText::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(NumberOrText::Text(s)) if !s.trim().is_empty() && s.trim() != "-" => Some(s),
        Some(NumberOrText::Number(v)) => Some(v.to_string()),
        _ => None,
    })
}
