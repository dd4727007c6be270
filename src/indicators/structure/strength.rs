//! Reliability score (0-100) for a consensus level.
//!
//! The total is a sum of independently capped sub-scores:
//!
//! | factor               | cap |
//! |----------------------|-----|
//! | volume concentration | 20  |
//! | turnover share       | 15  |
//! | bounce magnitude     | 20  |
//! | failed breakouts     | 15  |
//! | recent touches       | 12  |
//! | level age            | 8   |
//! | indicator agreement  | 10  |

use serde::Serialize;

use crate::common::math::round2;
use crate::models::PriceSeries;

/// Relative half-width of the band around a level that counts as a touch.
pub const TOUCH_TOLERANCE: f64 = 0.005;
/// Bars considered "recent" for the recency factor.
pub const RECENT_BARS: usize = 20;

const VOLUME_CAP: f64 = 20.0;
const TURNOVER_CAP: f64 = 15.0;
const BOUNCE_CAP: f64 = 20.0;
const BREAKOUT_CAP: f64 = 15.0;
const RECENCY_CAP: f64 = 12.0;
const HISTORY_CAP: f64 = 8.0;
const INDICATOR_CAP: f64 = 10.0;

/// Per-factor breakdown of a level's strength.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelScore {
    pub volume: f64,
    pub turnover: f64,
    pub bounce: f64,
    pub failed_breakouts: f64,
    pub recency: f64,
    pub history: f64,
    pub indicators: f64,
    pub total: f64,
}

/// Score `price` against the whole series. Returns 0 for an empty series.
pub fn score_level(price: f64, series: &PriceSeries) -> f64 {
    score_level_detailed(price, series).total
}

pub fn score_level_detailed(price: f64, series: &PriceSeries) -> LevelScore {
    let bars = series.bars();
    let band = (price * TOUCH_TOLERANCE).abs();
    let touches = |value: f64| (value - price).abs() <= band;

    // Volume and turnover concentration around the level.
    let (mut volume_near, mut volume_total) = (0.0, 0.0);
    let (mut amount_near, mut amount_total) = (0.0, 0.0);
    for bar in bars {
        volume_total += bar.volume;
        amount_total += bar.amount;
        if touches(bar.close) {
            volume_near += bar.volume;
            amount_near += bar.amount;
        }
    }
    let volume = capped(share(volume_near, volume_total) * 200.0, VOLUME_CAP);
    let turnover = capped(share(amount_near, amount_total) * 150.0, TURNOVER_CAP);

    // Rebound off the level and rejected breakouts. Both need a following
    // bar; the first bar has no prior context and is skipped.
    let mut bounces = Vec::new();
    let mut failed = 0usize;
    for i in 1..bars.len().saturating_sub(1) {
        let (bar, next) = (&bars[i], &bars[i + 1]);
        if !touches(bar.low) {
            continue;
        }
        if bar.low != 0.0 {
            bounces.push((next.high - bar.low) / bar.low);
        }
        if bar.close > price && next.close < price {
            failed += 1;
        }
    }
    let avg_bounce = if bounces.is_empty() {
        0.0
    } else {
        bounces.iter().sum::<f64>() / bounces.len() as f64
    };
    let bounce = capped(avg_bounce * 400.0, BOUNCE_CAP);
    let failed_breakouts = capped(failed as f64 * 3.0, BREAKOUT_CAP);

    // Time decay.
    let recent_touches = bars
        .iter()
        .skip(bars.len().saturating_sub(RECENT_BARS))
        .filter(|b| touches(b.close))
        .count();
    let recency = capped(recent_touches as f64 * 3.0, RECENCY_CAP);

    let history = match bars.iter().position(|b| touches(b.close)) {
        Some(first) => {
            let age = (bars.len() - first) as f64 / bars.len() as f64;
            capped(age * HISTORY_CAP, HISTORY_CAP)
        }
        None => 0.0,
    };

    let indicators = indicator_confirmation(price, series);

    let total = round2(
        volume + turnover + bounce + failed_breakouts + recency + history + indicators,
    );

    LevelScore {
        volume,
        turnover,
        bounce,
        failed_breakouts,
        recency,
        history,
        indicators,
        total,
    }
}

/// RSI, MACD and Bollinger agreement with the level's role, read from the
/// last row. Undefined indicator values contribute nothing.
fn indicator_confirmation(price: f64, series: &PriceSeries) -> f64 {
    let (Some(close), Some(row)) = (series.current_close(), series.last_indicators()) else {
        return 0.0;
    };
    let is_support = price < close;
    let is_resistance = price > close;
    let mut score = 0.0;

    if let Some(rsi) = row.rsi {
        if (is_support && rsi < 30.0) || (is_resistance && rsi > 70.0) {
            score += 3.0;
        }
    }

    if let (Some(macd), Some(signal)) = (row.macd, row.signal) {
        if (is_support && macd > signal) || (is_resistance && macd < signal) {
            score += 3.0;
        }
    }

    if price != 0.0 {
        let near = |band: Option<f64>| band.is_some_and(|b| ((price - b) / price).abs() < 0.02);
        if (is_support && near(row.bb_lower)) || (is_resistance && near(row.bb_upper)) {
            score += 4.0;
        }
    }

    capped(score, INDICATOR_CAP)
}

fn share(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        part / total
    } else {
        0.0
    }
}

fn capped(value: f64, cap: f64) -> f64 {
    value.clamp(0.0, cap)
}
