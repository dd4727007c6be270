//! Unit tests for hot-sector ranking

use chrono::NaiveDate;
use levelscope::models::SectorDailyChange;
use levelscope::signals::{daily_changes, rank_hot_sectors, rank_hot_sectors_with, DAILY_LEADERS};

use crate::fixtures::series_from_closes;

fn date(offset: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1 + offset).unwrap()
}

fn change(day: u32, code: &str, change_pct: f64) -> SectorDailyChange {
    SectorDailyChange {
        date: date(day),
        code: code.to_string(),
        name: format!("Sector {code}"),
        change_pct,
    }
}

/// Four days, four sectors; with two leaders per day A leads three times,
/// B and C twice, D once.
fn history() -> Vec<SectorDailyChange> {
    let days = [
        [3.0, 2.0, 1.0, -1.0],
        [1.0, -2.0, 4.0, 0.0],
        [2.0, 5.0, -1.0, 0.0],
        [-1.0, 1.0, 2.0, 3.0],
    ];
    days.iter()
        .enumerate()
        .flat_map(|(day, changes)| {
            ["A", "B", "C", "D"]
                .into_iter()
                .zip(changes)
                .map(move |(code, pct)| change(day as u32, code, *pct))
        })
        .collect()
}

#[test]
fn test_appearances_and_shared_ranks() {
    let rankings = rank_hot_sectors_with(&history(), 10, 2, 10);
    let codes: Vec<&str> = rankings.iter().map(|r| r.code.as_str()).collect();
    let counts: Vec<usize> = rankings.iter().map(|r| r.appearances).collect();
    let ranks: Vec<usize> = rankings.iter().map(|r| r.rank).collect();

    assert_eq!(codes, vec!["A", "B", "C", "D"]);
    assert_eq!(counts, vec![3, 2, 2, 1]);
    assert_eq!(ranks, vec![1, 2, 2, 4]);
    assert!((rankings[0].average_change_pct - 1.25).abs() < 1e-9);
    assert!((rankings[1].average_change_pct - 1.5).abs() < 1e-9);
}

#[test]
fn test_top_n_truncates_after_ordering() {
    let rankings = rank_hot_sectors_with(&history(), 10, 2, 2);
    assert_eq!(rankings.len(), 2);
    assert_eq!(rankings[1].code, "B");
    assert_eq!(rankings[1].rank, 2);
}

#[test]
fn test_window_counts_back_from_latest_day() {
    // Only days 2 and 3 remain: every sector leads once, average decides.
    let rankings = rank_hot_sectors_with(&history(), 1, 2, 10);
    let codes: Vec<&str> = rankings.iter().map(|r| r.code.as_str()).collect();

    assert_eq!(codes, vec!["B", "D", "A", "C"]);
    assert!(rankings.iter().all(|r| r.appearances == 1 && r.rank == 1));
    assert!(rankings.iter().all(|r| r.history.len() == 2));
    assert_eq!(rankings[0].history[0].date, date(2));
}

#[test]
fn test_history_is_date_ordered() {
    let mut shuffled = history();
    shuffled.reverse();
    let rankings = rank_hot_sectors(&shuffled, 10, 1);

    assert_eq!(rankings.len(), 1);
    let dates: Vec<NaiveDate> = rankings[0].history.iter().map(|c| c.date).collect();
    assert_eq!(dates, vec![date(0), date(1), date(2), date(3)]);
    assert_eq!(rankings[0].name, format!("Sector {}", rankings[0].code));
}

#[test]
fn test_every_sector_leads_when_list_is_short() {
    assert_eq!(DAILY_LEADERS, 10);
    let rankings = rank_hot_sectors(&history(), 10, 10);
    assert_eq!(rankings.len(), 4);
    assert!(rankings.iter().all(|r| r.appearances == 4 && r.rank == 1));
}

#[test]
fn test_empty_history_has_no_rankings() {
    assert!(rank_hot_sectors(&[], 10, 10).is_empty());
}

#[test]
fn test_daily_changes_from_closes() {
    let series = series_from_closes(&[10.0, 11.0, 9.9]);
    let changes = daily_changes("BK0001", "Banks", series.bars());

    assert_eq!(changes.len(), 2);
    assert_eq!(changes[0].date, series.bars()[1].datetime.date_naive());
    assert!((changes[0].change_pct - 10.0).abs() < 1e-9);
    assert!((changes[1].change_pct + 10.0).abs() < 1e-9);
    assert_eq!(changes[1].name, "Banks");
    assert!(daily_changes("BK0001", "Banks", &series.bars()[..1]).is_empty());
}
