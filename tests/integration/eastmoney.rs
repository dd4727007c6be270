//! Integration tests for the Eastmoney market data and quote providers

use std::time::Duration;

use backon::ExponentialBuilder;
use chrono::NaiveDate;
use levelscope::models::SectorKind;
use levelscope::services::{
    EastmoneyProvider, EastmoneyQuoteProvider, MarketDataError, MarketDataProvider,
    MarketOverviewProvider,
};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KLINE_PATH: &str = "/api/qt/stock/kline/get";
const ULIST_PATH: &str = "/api/qt/ulist.np/get";
const CLIST_PATH: &str = "/api/qt/clist/get";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn provider(server: &MockServer) -> EastmoneyProvider {
    EastmoneyProvider::new(server.uri())
        .expect("build provider")
        .with_backoff(
            ExponentialBuilder::default()
                .with_min_delay(Duration::from_millis(1))
                .with_max_times(3),
        )
}

fn quote_provider(server: &MockServer) -> EastmoneyQuoteProvider {
    EastmoneyQuoteProvider::new(server.uri())
        .expect("build quote provider")
        .with_backoff(
            ExponentialBuilder::default()
                .with_min_delay(Duration::from_millis(1))
                .with_max_times(3),
        )
}

fn kline_body() -> serde_json::Value {
    json!({
        "rc": 0,
        "data": {
            "code": "600519",
            "name": "Kweichow Moutai",
            "klines": [
                "2024-01-03,1690.00,1685.00,1700.00,1680.00,20000,3370000000.00,1.2,-0.3,-5.0,0.16",
                "2024-01-02,1700.00,1690.00,1710.00,1685.00,25000,4225000000.00,1.5,-0.6,-10.0,0.20"
            ]
        }
    })
}

#[tokio::test]
async fn daily_bars_are_parsed_and_sorted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(KLINE_PATH))
        .and(query_param("secid", "1.600519"))
        .and(query_param("klt", "101"))
        .and(query_param("fqt", "1"))
        .and(query_param("beg", "20240101"))
        .and(query_param("end", "20240131"))
        .respond_with(ResponseTemplate::new(200).set_body_json(kline_body()))
        .expect(1)
        .mount(&server)
        .await;

    let bars = provider(&server)
        .get_daily_bars("600519", date(2024, 1, 1), date(2024, 1, 31))
        .await
        .unwrap();

    assert_eq!(bars.len(), 2);
    assert_eq!(bars[0].datetime.date_naive(), date(2024, 1, 2));
    assert_eq!(bars[0].open, 1700.0);
    assert_eq!(bars[0].close, 1690.0);
    assert_eq!(bars[1].high, 1700.0);
    assert_eq!(bars[1].volume, 20000.0);
}

#[tokio::test]
async fn server_errors_are_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(KLINE_PATH))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(KLINE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(kline_body()))
        .expect(1)
        .mount(&server)
        .await;

    let bars = provider(&server)
        .get_daily_bars("600519", date(2024, 1, 1), date(2024, 1, 31))
        .await
        .unwrap();
    assert_eq!(bars.len(), 2);
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(KLINE_PATH))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let err = provider(&server)
        .get_daily_bars("000001", date(2024, 1, 1), date(2024, 1, 31))
        .await
        .unwrap_err();
    assert!(matches!(err, MarketDataError::Status(404)));
}

#[tokio::test]
async fn missing_data_means_unknown_symbol() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(KLINE_PATH))
        .and(query_param("secid", "0.000999"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "rc": 0, "data": null })))
        .mount(&server)
        .await;

    let err = provider(&server)
        .get_daily_bars("000999", date(2024, 1, 1), date(2024, 1, 31))
        .await
        .unwrap_err();
    assert!(matches!(err, MarketDataError::UnknownSymbol(_)));
}

#[tokio::test]
async fn malformed_rows_are_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(KLINE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rc": 0,
            "data": { "code": "600519", "klines": ["2024-01-02,abc"] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = provider(&server)
        .get_daily_bars("600519", date(2024, 1, 1), date(2024, 1, 31))
        .await
        .unwrap_err();
    assert!(matches!(err, MarketDataError::Malformed(_)));
}

#[tokio::test]
async fn board_klines_use_market_ninety() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(KLINE_PATH))
        .and(query_param("secid", "90.BK0475"))
        .respond_with(ResponseTemplate::new(200).set_body_json(kline_body()))
        .expect(1)
        .mount(&server)
        .await;

    let bars = provider(&server)
        .get_daily_bars("BK0475", date(2024, 1, 1), date(2024, 1, 31))
        .await
        .unwrap();
    assert_eq!(bars.len(), 2);
}

#[tokio::test]
async fn index_quotes_are_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ULIST_PATH))
        .and(query_param("secids", "1.000001,0.399006"))
        .and(query_param("fltt", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rc": 0,
            "data": {
                "total": 2,
                "diff": [
                    { "f2": 3050.12, "f3": 0.85, "f4": 25.7, "f5": 310000000, "f6": 4.1e11,
                      "f12": "000001", "f13": 1, "f14": "SSE Composite" },
                    { "f2": "-", "f3": "-", "f4": "-", "f5": "-", "f6": "-",
                      "f12": "399006", "f13": 0, "f14": "ChiNext" }
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let quotes = quote_provider(&server)
        .get_index_quotes(&["1.000001", "0.399006"])
        .await
        .unwrap();

    assert_eq!(quotes.len(), 2);
    assert_eq!(quotes[0].code, "000001");
    assert_eq!(quotes[0].price, Some(3050.12));
    assert_eq!(quotes[0].change_pct, Some(0.85));
    assert_eq!(quotes[1].name, "ChiNext");
    assert_eq!(quotes[1].price, None);
    assert_eq!(quotes[1].amount, None);
}

#[tokio::test]
async fn industry_board_uses_board_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CLIST_PATH))
        .and(query_param("fs", "m:90 t:2 f:!50"))
        .and(query_param("fid", "f3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rc": 0,
            "data": {
                "total": 2,
                "diff": [
                    { "f2": 1520.3, "f3": 3.1, "f8": 2.4, "f12": "BK1036", "f14": "Semiconductors",
                      "f20": 3.2e12, "f104": 120, "f105": 8, "f128": "SMIC", "f136": 10.01 },
                    { "f2": 880.0, "f3": -0.4, "f8": "-", "f12": "BK0475", "f14": "Banks",
                      "f20": "-", "f104": 12, "f105": 30, "f128": "-", "f136": "-" }
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let sectors = quote_provider(&server)
        .get_sector_quotes(SectorKind::Industry)
        .await
        .unwrap();

    assert_eq!(sectors.len(), 2);
    assert_eq!(sectors[0].code, "BK1036");
    assert_eq!(sectors[0].advancers, Some(120));
    assert_eq!(sectors[0].decliners, Some(8));
    assert_eq!(sectors[0].leader.as_deref(), Some("SMIC"));
    assert_eq!(sectors[1].turnover_rate, None);
    assert_eq!(sectors[1].leader, None);
    assert_eq!(sectors[1].leader_change_pct, None);
}

#[tokio::test]
async fn quote_lists_retry_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CLIST_PATH))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(CLIST_PATH))
        .and(query_param("fs", "m:90 t:3 f:!50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rc": 0,
            "data": { "total": 1, "diff": [ { "f3": 1.0, "f12": "BK0800", "f14": "Robotics" } ] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let sectors = quote_provider(&server)
        .get_sector_quotes(SectorKind::Concept)
        .await
        .unwrap();
    assert_eq!(sectors.len(), 1);
    assert_eq!(sectors[0].name, "Robotics");
}

#[tokio::test]
async fn constituents_filter_by_board() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CLIST_PATH))
        .and(query_param("fs", "b:BK0475 f:!50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rc": 0,
            "data": {
                "total": 2,
                "diff": [
                    { "f2": 10.2, "f3": 1.2, "f4": 0.12, "f5": 900000, "f6": 9.2e8, "f8": 0.3,
                      "f12": "600036", "f14": "China Merchants Bank" },
                    { "f2": "-", "f3": "-", "f4": "-", "f5": "-", "f6": "-", "f8": "-",
                      "f12": "601988", "f14": "Bank of China" }
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let stocks = quote_provider(&server)
        .get_sector_constituents("BK0475")
        .await
        .unwrap();
    assert_eq!(stocks.len(), 2);
    assert_eq!(stocks[0].change_pct, Some(1.2));
    assert_eq!(stocks[0].turnover_rate, Some(0.3));
    assert_eq!(stocks[1].price, None);
}

#[tokio::test]
async fn unknown_board_has_no_constituents() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CLIST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "rc": 0, "data": null })))
        .expect(1)
        .mount(&server)
        .await;

    let err = quote_provider(&server)
        .get_sector_constituents("BK9999")
        .await
        .unwrap_err();
    assert!(matches!(err, MarketDataError::UnknownSymbol(code) if code == "BK9999"));
}

#[tokio::test]
async fn non_board_codes_are_rejected_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = quote_provider(&server)
        .get_sector_constituents("600519")
        .await
        .unwrap_err();
    assert!(matches!(err, MarketDataError::UnknownSymbol(_)));
}
