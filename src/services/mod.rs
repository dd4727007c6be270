//! Collaborators around the analysis core: data fetching, caching and
//! request orchestration.

pub mod analyzer;
pub mod cache;
pub mod eastmoney;
pub mod market;
pub mod market_data;
pub mod market_overview;

pub use analyzer::{AnalysisCache, AnalysisKey, ServiceError, StockAnalysis, StockAnalyzer};
pub use cache::{InMemoryTtlCache, TtlCache};
pub use eastmoney::{EastmoneyProvider, EastmoneyQuoteProvider};
pub use market::{MarketService, MAX_HOT_SECTOR_DAYS};
pub use market_data::{MarketDataError, MarketDataProvider, StaticMarketDataProvider};
pub use market_overview::{MarketOverviewProvider, StaticMarketOverviewProvider, MAJOR_INDICES};
