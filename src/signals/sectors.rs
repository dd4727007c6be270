//! Hot-sector ranking over a recent window of daily changes

use std::collections::{BTreeMap, HashMap};

use chrono::{Days, NaiveDate};

use crate::models::{PriceBar, SectorDailyChange, SectorRanking};

/// Sectors that count as leaders on each trading day.
pub const DAILY_LEADERS: usize = 10;

/// Close-to-close percentage changes of one sector. The first bar has no
/// prior close and yields no entry.
pub fn daily_changes(code: &str, name: &str, bars: &[PriceBar]) -> Vec<SectorDailyChange> {
    bars.windows(2)
        .filter(|pair| pair[0].close != 0.0)
        .map(|pair| SectorDailyChange {
            date: pair[1].datetime.date_naive(),
            code: code.to_string(),
            name: name.to_string(),
            change_pct: (pair[1].close - pair[0].close) / pair[0].close * 100.0,
        })
        .collect()
}

/// Rank sectors by how often they led the market over the last `days`
/// calendar days, counting the `DAILY_LEADERS` strongest per day.
pub fn rank_hot_sectors(history: &[SectorDailyChange], days: u32, top_n: usize) -> Vec<SectorRanking> {
    rank_hot_sectors_with(history, days, DAILY_LEADERS, top_n)
}

/// Rank sectors by daily leadership.
///
/// The window is `[latest date - days, latest date]`. On every day the
/// `per_day` strongest sectors each score one appearance. The `top_n`
/// sectors with most appearances are kept, ties broken by the higher
/// average change over the window. Ranks follow appearances only, so tied
/// sectors share the best rank.
pub fn rank_hot_sectors_with(
    history: &[SectorDailyChange],
    days: u32,
    per_day: usize,
    top_n: usize,
) -> Vec<SectorRanking> {
    let Some(latest) = history.iter().map(|c| c.date).max() else {
        return Vec::new();
    };
    let cutoff = latest
        .checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN);
    let window: Vec<&SectorDailyChange> = history.iter().filter(|c| c.date >= cutoff).collect();

    let mut by_date: BTreeMap<NaiveDate, Vec<&SectorDailyChange>> = BTreeMap::new();
    let mut by_sector: HashMap<&str, Vec<&SectorDailyChange>> = HashMap::new();
    for change in &window {
        by_date.entry(change.date).or_default().push(change);
        by_sector.entry(change.code.as_str()).or_default().push(change);
    }

    let mut appearances: HashMap<&str, usize> = HashMap::new();
    for (_, mut day) in by_date {
        day.sort_by(|a, b| {
            b.change_pct
                .total_cmp(&a.change_pct)
                .then_with(|| a.code.cmp(&b.code))
        });
        for leader in day.into_iter().take(per_day) {
            *appearances.entry(leader.code.as_str()).or_default() += 1;
        }
    }

    let mut rankings: Vec<SectorRanking> = appearances
        .into_iter()
        .filter_map(|(code, count)| {
            let mut changes = by_sector.remove(code)?;
            changes.sort_by_key(|c| c.date);
            let average = changes.iter().map(|c| c.change_pct).sum::<f64>() / changes.len() as f64;
            Some(SectorRanking {
                code: code.to_string(),
                name: changes.last().map(|c| c.name.clone()).unwrap_or_default(),
                appearances: count,
                rank: 0,
                average_change_pct: average,
                history: changes.into_iter().cloned().collect(),
            })
        })
        .collect();

    rankings.sort_by(|a, b| {
        b.appearances
            .cmp(&a.appearances)
            .then_with(|| b.average_change_pct.total_cmp(&a.average_change_pct))
            .then_with(|| a.code.cmp(&b.code))
    });
    rankings.truncate(top_n);

    let mut previous: Option<(usize, usize)> = None;
    for (i, ranking) in rankings.iter_mut().enumerate() {
        ranking.rank = match previous {
            Some((count, rank)) if count == ranking.appearances => rank,
            _ => i + 1,
        };
        previous = Some((ranking.appearances, ranking.rank));
    }

    tracing::debug!(
        days,
        sectors = rankings.len(),
        from = %cutoff,
        to = %latest,
        "hot sectors ranked"
    );
    rankings
}
