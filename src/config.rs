//! Environment-driven configuration.
//!
//! Every setting is optional; unset variables fall back to defaults and
//! malformed values are reported instead of silently ignored.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::indicators::structure::LevelParams;
use crate::indicators::WARMUP_BARS;
use crate::services::eastmoney::{DEFAULT_BASE_URL, DEFAULT_QUOTE_BASE_URL};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {name}")]
    Invalid { name: String, value: String },
}

/// Deployment environment name, from `APP_ENV` (default `sandbox`).
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub environment: String,
    pub market_data_base_url: String,
    pub quote_base_url: String,
    pub cache_ttl: Duration,
    pub overview_cache_ttl: Duration,
    pub sector_cache_ttl: Duration,
    pub warmup_bars: usize,
    pub levels: LevelParams,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            environment: "sandbox".to_string(),
            market_data_base_url: DEFAULT_BASE_URL.to_string(),
            quote_base_url: DEFAULT_QUOTE_BASE_URL.to_string(),
            cache_ttl: Duration::from_secs(12 * 60 * 60),
            overview_cache_ttl: Duration::from_secs(4 * 60 * 60),
            sector_cache_ttl: Duration::from_secs(12 * 60 * 60),
            warmup_bars: WARMUP_BARS,
            levels: LevelParams::default(),
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let levels = LevelParams {
            window: parse_or(&lookup, "LEVEL_WINDOW", defaults.levels.window)?,
            price_threshold: parse_or(
                &lookup,
                "LEVEL_PRICE_THRESHOLD",
                defaults.levels.price_threshold,
            )?,
            touch_count: parse_or(&lookup, "LEVEL_TOUCH_COUNT", defaults.levels.touch_count)?,
            ..defaults.levels.clone()
        };

        Ok(Self {
            port: parse_or(&lookup, "PORT", defaults.port)?,
            environment: lookup("APP_ENV").unwrap_or(defaults.environment),
            market_data_base_url: lookup("MARKET_DATA_BASE_URL")
                .unwrap_or(defaults.market_data_base_url),
            quote_base_url: lookup("QUOTE_BASE_URL").unwrap_or(defaults.quote_base_url),
            cache_ttl: Duration::from_secs(parse_or(
                &lookup,
                "CACHE_TTL_SECONDS",
                defaults.cache_ttl.as_secs(),
            )?),
            overview_cache_ttl: Duration::from_secs(parse_or(
                &lookup,
                "OVERVIEW_CACHE_TTL_SECONDS",
                defaults.overview_cache_ttl.as_secs(),
            )?),
            sector_cache_ttl: Duration::from_secs(parse_or(
                &lookup,
                "SECTOR_CACHE_TTL_SECONDS",
                defaults.sector_cache_ttl.as_secs(),
            )?),
            warmup_bars: parse_or(&lookup, "WARMUP_BARS", defaults.warmup_bars)?,
            levels,
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name: name.to_string(),
            value: raw,
        }),
    }
}
