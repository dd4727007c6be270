//! Levelscope API Server
//!
//! Serves indicator and support/resistance analysis for A-share symbols
//! over HTTP, plus the index overview and sector rankings. Results are
//! cached in-process.

use std::sync::Arc;

use dotenvy::dotenv;
use levelscope::config::Config;
use levelscope::core::http::{start_server, AppState};
use levelscope::logging;
use levelscope::services::{
    EastmoneyProvider, EastmoneyQuoteProvider, InMemoryTtlCache, MarketService, StockAnalyzer,
};
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = Config::from_env()?;
    info!("Starting Levelscope API Server");
    info!(environment = %config.environment, "Environment");
    info!(port = config.port, "HTTP Server: http://0.0.0.0:{}", config.port);
    info!(
        base_url = %config.market_data_base_url,
        cache_ttl_secs = config.cache_ttl.as_secs(),
        warmup_bars = config.warmup_bars,
        "Market data"
    );
    info!(
        base_url = %config.quote_base_url,
        overview_ttl_secs = config.overview_cache_ttl.as_secs(),
        sector_ttl_secs = config.sector_cache_ttl.as_secs(),
        "Market overview"
    );

    let provider = Arc::new(EastmoneyProvider::new(config.market_data_base_url.clone())?);
    let analyzer = StockAnalyzer::new(provider.clone(), Arc::new(InMemoryTtlCache::new()))
        .with_params(config.levels.clone())
        .with_warmup_bars(config.warmup_bars)
        .with_ttl(config.cache_ttl);
    let quotes = EastmoneyQuoteProvider::new(config.quote_base_url.clone())?;
    let market = MarketService::new(Arc::new(quotes), provider)
        .with_overview_ttl(config.overview_cache_ttl)
        .with_sector_ttl(config.sector_cache_ttl);
    let state = AppState::new(Arc::new(analyzer), Arc::new(market));

    let port = config.port;
    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(state, port).await {
            error!(error = %e, "HTTP server error");
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
