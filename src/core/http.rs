//! HTTP endpoint server using Axum

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, Level};

use crate::models::{ConsensusLevel, IndicatorRow, SectorKind, SectorRanking};
use crate::services::{MarketDataError, MarketService, ServiceError, StockAnalyzer};
use crate::signals::{level_report, LevelReport, MarketSignals, SignalEngine};

/// Default lookback when a request omits `start`.
const DEFAULT_RANGE_DAYS: u64 = 365;
/// Hot-sector window and list length when a request omits them.
const DEFAULT_HOT_DAYS: u32 = 10;
const DEFAULT_HOT_TOP_N: usize = 10;

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<StockAnalyzer>,
    pub market: Arc<MarketService>,
    pub start_time: Arc<Instant>,
}

impl AppState {
    pub fn new(analyzer: Arc<StockAnalyzer>, market: Arc<MarketService>) -> Self {
        Self {
            analyzer,
            market,
            start_time: Arc::new(Instant::now()),
        }
    }
}

/// JSON error body with an HTTP status.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let status = match &err {
            ServiceError::InvalidRange { .. } | ServiceError::InvalidQuery(_) => {
                StatusCode::BAD_REQUEST
            }
            ServiceError::NoData { .. } => StatusCode::NOT_FOUND,
            ServiceError::MarketData(MarketDataError::UnknownSymbol(_)) => StatusCode::NOT_FOUND,
            ServiceError::MarketData(_) => StatusCode::BAD_GATEWAY,
            ServiceError::Analysis(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(error = %err, "request failed");
        }
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl DateRangeQuery {
    fn resolve(&self) -> (NaiveDate, NaiveDate) {
        let end = self.end.unwrap_or_else(|| Utc::now().date_naive());
        let start = self.start.unwrap_or_else(|| {
            end.checked_sub_days(Days::new(DEFAULT_RANGE_DAYS))
                .unwrap_or(end)
        });
        (start, end)
    }
}

#[derive(Debug, Deserialize)]
pub struct SectorBoardQuery {
    #[serde(default)]
    kind: SectorKind,
}

#[derive(Debug, Deserialize)]
pub struct HotSectorsQuery {
    days: Option<u32>,
    top_n: Option<usize>,
    end: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct HotSectorsResponse<'a> {
    end: NaiveDate,
    days: u32,
    top_n: usize,
    sectors: &'a [SectorRanking],
}

#[derive(Debug, Serialize)]
pub struct LevelsResponse {
    symbol: String,
    start: NaiveDate,
    end: NaiveDate,
    current_price: f64,
    support_levels: Vec<f64>,
    resistance_levels: Vec<f64>,
    support_strengths: Vec<f64>,
    resistance_strengths: Vec<f64>,
    supports: Vec<ConsensusLevel>,
    resistances: Vec<ConsensusLevel>,
    report: LevelReport,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse<'a> {
    symbol: &'a str,
    start: NaiveDate,
    end: NaiveDate,
    rows: Vec<IndicatorRow<'a>>,
    signals: MarketSignals,
}

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "uptime_seconds": state.start_time.elapsed().as_secs(),
        "service": "levelscope"
    }))
}

pub async fn levels_handler(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(range): Query<DateRangeQuery>,
) -> Result<Json<LevelsResponse>, ApiError> {
    let (start, end) = range.resolve();
    let analysis = state.analyzer.analyze(&symbol, start, end).await?;
    let output = &analysis.output;
    let current_price = output
        .series
        .current_close()
        .ok_or_else(|| ApiError::new(StatusCode::NOT_FOUND, "no bars in range"))?;

    Ok(Json(LevelsResponse {
        symbol: analysis.symbol.clone(),
        start: analysis.start,
        end: analysis.end,
        current_price,
        support_levels: output.levels.support_levels(),
        resistance_levels: output.levels.resistance_levels(),
        support_strengths: output.levels.support_strengths(),
        resistance_strengths: output.levels.resistance_strengths(),
        supports: output.levels.supports.clone(),
        resistances: output.levels.resistances.clone(),
        report: level_report(current_price, &output.levels),
    }))
}

pub async fn analysis_handler(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(range): Query<DateRangeQuery>,
) -> Result<Response, ApiError> {
    let (start, end) = range.resolve();
    let analysis = state.analyzer.analyze(&symbol, start, end).await?;
    let body = AnalysisResponse {
        symbol: &analysis.symbol,
        start: analysis.start,
        end: analysis.end,
        rows: analysis.output.series.rows().collect(),
        signals: SignalEngine::evaluate(&analysis.output),
    };
    Ok(Json(body).into_response())
}

pub async fn market_overview_handler(State(state): State<AppState>) -> Result<Response, ApiError> {
    let overview = state.market.overview().await?;
    Ok(Json(overview.as_ref()).into_response())
}

pub async fn sector_board_handler(
    State(state): State<AppState>,
    Query(query): Query<SectorBoardQuery>,
) -> Result<Response, ApiError> {
    let board = state.market.sector_board(query.kind).await?;
    Ok(Json(board.as_ref()).into_response())
}

pub async fn hot_sectors_handler(
    State(state): State<AppState>,
    Query(query): Query<HotSectorsQuery>,
) -> Result<Response, ApiError> {
    let end = query.end.unwrap_or_else(|| Utc::now().date_naive());
    let days = query.days.unwrap_or(DEFAULT_HOT_DAYS);
    let top_n = query.top_n.unwrap_or(DEFAULT_HOT_TOP_N);
    let rankings = state.market.hot_sectors_until(end, days, top_n).await?;
    let body = HotSectorsResponse {
        end,
        days,
        top_n,
        sectors: &rankings,
    };
    Ok(Json(body).into_response())
}

pub async fn sector_stocks_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Response, ApiError> {
    let stocks = state.market.sector_stocks(&code).await?;
    Ok(Json(stocks.as_ref()).into_response())
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/stocks/{symbol}/levels", get(levels_handler))
        .route("/api/stocks/{symbol}/analysis", get(analysis_handler))
        .route("/api/market/overview", get(market_overview_handler))
        .route("/api/market/sectors", get(sector_board_handler))
        .route("/api/market/sectors/hot", get(hot_sectors_handler))
        .route("/api/market/sectors/{code}/stocks", get(sector_stocks_handler))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!(port, "HTTP server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
