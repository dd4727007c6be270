use std::sync::Arc;

use chrono::{Days, NaiveDate, Utc};
use clap::Parser;
use dotenvy::dotenv;
use levelscope::config::Config;
use levelscope::logging;
use levelscope::models::{MarketOverview, SectorRanking};
use levelscope::services::{
    EastmoneyProvider, EastmoneyQuoteProvider, InMemoryTtlCache, MarketService, StockAnalysis,
    StockAnalyzer,
};
use levelscope::signals::{MarketSignals, SignalEngine};

/// Print indicator signals and support/resistance levels for one symbol,
/// or the market overview with hot sectors.
#[derive(Debug, Parser)]
#[command(name = "levelscope", version)]
struct Args {
    /// Six-digit A-share code, e.g. 600519
    #[arg(short, long, required_unless_present = "overview")]
    symbol: Option<String>,

    /// Show index quotes and hot industry sectors instead of a symbol report
    #[arg(long, conflicts_with = "symbol")]
    overview: bool,

    /// Lookback in calendar days for hot sectors
    #[arg(long, default_value_t = 10)]
    days: u32,

    /// Number of hot sectors to list
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// First day of the analysis window (YYYY-MM-DD), defaults to one year ago
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Last day of the analysis window (YYYY-MM-DD), defaults to today
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let args = Args::parse();
    let config = Config::from_env()?;

    if args.overview {
        return run_overview(&config, &args).await;
    }
    let symbol = args.symbol.as_deref().ok_or("--symbol is required")?;

    let end = args.end.unwrap_or_else(|| Utc::now().date_naive());
    let start = args
        .start
        .unwrap_or_else(|| end.checked_sub_days(Days::new(365)).unwrap_or(end));

    let provider = EastmoneyProvider::new(config.market_data_base_url.clone())?;
    let analyzer = StockAnalyzer::new(Arc::new(provider), Arc::new(InMemoryTtlCache::new()))
        .with_params(config.levels.clone())
        .with_warmup_bars(config.warmup_bars);

    let analysis = analyzer.analyze(symbol, start, end).await?;
    let signals = SignalEngine::evaluate(&analysis.output);

    if args.json {
        let body = serde_json::json!({
            "symbol": analysis.symbol,
            "levels": analysis.output.levels,
            "signals": signals,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        print_report(&analysis, &signals);
    }
    Ok(())
}

async fn run_overview(config: &Config, args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let quotes = EastmoneyQuoteProvider::new(config.quote_base_url.clone())?;
    let bars = EastmoneyProvider::new(config.market_data_base_url.clone())?;
    let market = MarketService::new(Arc::new(quotes), Arc::new(bars));

    let overview = market.overview().await?;
    let hot = market.hot_sectors(args.days, args.top).await?;

    if args.json {
        let body = serde_json::json!({
            "overview": overview.as_ref(),
            "hot_sectors": hot.as_ref(),
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        print_overview(&overview, &hot, args.days);
    }
    Ok(())
}

fn print_overview(overview: &MarketOverview, hot: &[SectorRanking], days: u32) {
    println!("Indices:");
    for index in &overview.indices {
        println!(
            "  {:<10} {:>10} {:>8}",
            index.name,
            fmt_opt(index.price, ""),
            fmt_opt(index.change_pct, "%"),
        );
    }

    for board in [&overview.industries, &overview.concepts].into_iter().flatten() {
        let b = board.breadth;
        println!(
            "{:?} boards: {} up, {} down, {} flat of {}",
            board.kind, b.up, b.down, b.flat, b.total
        );
        for sector in board.sectors.iter().take(5) {
            println!("  {:<12} {:>8}", sector.name, fmt_opt(sector.change_pct, "%"));
        }
    }

    println!("Hot sectors over {days} days:");
    for sector in hot {
        println!(
            "  #{:<3} {:<12} {} days in the top list, avg {:+.2}%",
            sector.rank, sector.name, sector.appearances, sector.average_change_pct
        );
    }
}

fn fmt_opt(value: Option<f64>, unit: &str) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}{unit}"))
}

fn print_report(analysis: &StockAnalysis, signals: &MarketSignals) {
    println!("{} ({} to {})", analysis.symbol, analysis.start, analysis.end);

    if let Some(report) = &signals.levels {
        println!("  Current price: {:.2}", report.current_price);
        println!("  Supports:");
        for level in &report.supports {
            println!(
                "    {:.2} | {:.1}% below | strength {:.0} ({}) | {}",
                level.price,
                level.distance_pct,
                level.strength,
                level.grade.label(),
                sources_label(&level.sources),
            );
        }
        println!("  Resistances:");
        for level in &report.resistances {
            println!(
                "    {:.2} | {:.1}% above | strength {:.0} ({}) | {}",
                level.price,
                level.distance_pct,
                level.strength,
                level.grade.label(),
                sources_label(&level.sources),
            );
        }
        if let (Some(position), Some(zone)) = (report.position_pct, report.zone) {
            println!("  Position in level band: {:.1}% ({:?})", position, zone);
        }
    }

    println!("  Signals:");
    for (i, signal) in signals.signals.iter().enumerate() {
        println!("    {}. [{:?}] {}", i + 1, signal.direction, signal.description);
    }
    if let Some(vp) = &signals.volume_price {
        println!(
            "  Volume: {:.2}x 5-day average, {:+.2}% on the day. {}",
            vp.volume_ratio,
            vp.price_change * 100.0,
            vp.description
        );
    }
}

fn sources_label(sources: &[levelscope::models::LevelSource]) -> String {
    sources
        .iter()
        .map(|s| s.label())
        .collect::<Vec<_>>()
        .join(" + ")
}
