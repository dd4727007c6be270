//! Integration tests for the API Server


use serde_json::Value;

use test_utils::{TestApiServer, SYMBOL};

#[tokio::test]
async fn health_endpoint_reports_healthy_status() {
    let app = TestApiServer::new();
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_u64().is_some());
    assert_eq!(body["service"], "levelscope");
}

#[tokio::test]
async fn levels_endpoint_returns_double_bottom() {
    let app = TestApiServer::new();
    let response = app
        .server
        .get(&format!("/api/stocks/{SYMBOL}/levels"))
        .add_query_param("start", "2023-03-01")
        .add_query_param("end", "2023-12-31")
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["symbol"], SYMBOL);
    let current = body["current_price"].as_f64().unwrap();
    assert!((current - 10.985).abs() < 1e-9);

    let supports = body["support_levels"].as_array().unwrap();
    let strengths = body["support_strengths"].as_array().unwrap();
    assert_eq!(supports.len(), strengths.len());
    let bottom = supports[0].as_f64().unwrap();
    assert!((bottom - 10.0).abs() / 10.0 < 0.005);
    assert!(strengths[0].as_f64().unwrap() >= 40.0);

    for level in body["resistance_levels"].as_array().unwrap() {
        assert!(level.as_f64().unwrap() > current);
    }
    assert_eq!(body["report"]["supports"][0]["side"], "support");
}

#[tokio::test]
async fn analysis_endpoint_returns_trimmed_rows() {
    let app = TestApiServer::new();
    let response = app
        .server
        .get(&format!("/api/stocks/{SYMBOL}/analysis"))
        .add_query_param("start", "2023-03-01")
        .add_query_param("end", "2023-12-31")
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 242);
    assert!(rows[0]["datetime"].as_str().unwrap().starts_with("2023-03-01"));
    assert!(rows[0]["ma30"].as_f64().is_some());
    assert!(!body["signals"]["signals"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_symbol_is_not_found() {
    let app = TestApiServer::new();
    let response = app
        .server
        .get("/api/stocks/999999/levels")
        .add_query_param("start", "2023-03-01")
        .add_query_param("end", "2023-12-31")
        .await;
    assert_eq!(response.status_code(), 404);

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("999999"));
}

#[tokio::test]
async fn inverted_range_is_bad_request() {
    let app = TestApiServer::new();
    let response = app
        .server
        .get(&format!("/api/stocks/{SYMBOL}/levels"))
        .add_query_param("start", "2023-06-01")
        .add_query_param("end", "2023-03-01")
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn malformed_date_is_bad_request() {
    let app = TestApiServer::new();
    let response = app
        .server
        .get(&format!("/api/stocks/{SYMBOL}/levels"))
        .add_query_param("start", "2023-13-45")
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn empty_window_is_not_found() {
    let app = TestApiServer::new();
    let response = app
        .server
        .get(&format!("/api/stocks/{SYMBOL}/levels"))
        .add_query_param("start", "2030-01-01")
        .add_query_param("end", "2030-02-01")
        .await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn market_overview_omits_unavailable_boards() {
    let app = TestApiServer::new();
    let response = app.server.get("/api/market/overview").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["indices"][0]["code"], "000001");
    assert_eq!(body["industries"]["kind"], "industry");
    assert_eq!(body["industries"]["sectors"][0]["code"], "BK0001");
    assert_eq!(body["industries"]["breadth"]["up"], 2);
    assert!(body.get("concepts").is_none());
}

#[tokio::test]
async fn unavailable_board_is_bad_gateway() {
    let app = TestApiServer::new();
    let response = app
        .server
        .get("/api/market/sectors")
        .add_query_param("kind", "concept")
        .await;
    assert_eq!(response.status_code(), 502);
}

#[tokio::test]
async fn hot_sectors_rank_industry_boards() {
    let app = TestApiServer::new();
    let response = app
        .server
        .get("/api/market/sectors/hot")
        .add_query_param("days", "10")
        .add_query_param("top_n", "2")
        .add_query_param("end", "2023-01-07")
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["end"], "2023-01-07");
    let sectors = body["sectors"].as_array().unwrap();
    assert_eq!(sectors.len(), 2);
    assert_eq!(sectors[0]["code"], "BK0001");
    assert_eq!(sectors[0]["appearances"], 5);
    assert_eq!(sectors[0]["rank"], 1);
    assert_eq!(sectors[1]["code"], "BK0003");
    assert_eq!(sectors[0]["history"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn hot_sectors_reject_empty_window() {
    let app = TestApiServer::new();
    let response = app
        .server
        .get("/api/market/sectors/hot")
        .add_query_param("days", "0")
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn sector_stocks_by_board_code() {
    let app = TestApiServer::new();
    let response = app.server.get("/api/market/sectors/BK0001/stocks").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["sector"], "BK0001");
    assert_eq!(body["stocks"][0]["name"], "SMIC");

    let missing = app.server.get("/api/market/sectors/BK9999/stocks").await;
    assert_eq!(missing.status_code(), 404);
}
