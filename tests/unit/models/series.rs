//! Unit tests for PriceSeries

use levelscope::error::SeriesError;
use levelscope::models::PriceSeries;

use crate::fixtures::{bar, day, wave_bars};

#[test]
fn test_rejects_unordered_bars() {
    let bars = vec![bar(1, 10.0, 10.5, 9.5, 10.0, 100.0), bar(0, 10.0, 10.5, 9.5, 10.0, 100.0)];
    assert_eq!(
        PriceSeries::new(bars),
        Err(SeriesError::Unordered {
            previous: day(1),
            next: day(0),
        })
    );
}

#[test]
fn test_rejects_duplicate_timestamps() {
    let bars = vec![bar(3, 10.0, 10.5, 9.5, 10.0, 100.0), bar(3, 11.0, 11.5, 10.5, 11.0, 100.0)];
    assert!(PriceSeries::new(bars).is_err());
}

#[test]
fn test_empty_series_is_valid() {
    let series = PriceSeries::new(Vec::new()).unwrap();
    assert!(series.is_empty());
    assert_eq!(series.current_close(), None);
    assert_eq!(series.close_range(), None);
}

#[test]
fn test_close_range_and_current_close() {
    let series = crate::fixtures::series_from_closes(&[10.0, 12.0, 9.0, 11.0]);
    assert_eq!(series.close_range(), Some((9.0, 12.0)));
    assert_eq!(series.current_close(), Some(11.0));
    assert_eq!(series.closes(), vec![10.0, 12.0, 9.0, 11.0]);
}

#[test]
fn test_since_keeps_warmup_indicators() {
    let series = PriceSeries::new(wave_bars(90, 13.0, 2.0, 0.01)).unwrap();
    let trimmed = series.since(day(40));

    assert_eq!(trimmed.len(), 50);
    assert_eq!(trimmed.bars()[0].datetime, day(40));
    assert_eq!(trimmed.indicators(), &series.indicators()[40..]);
    assert!(trimmed.indicators()[0].ma30.is_some());
}

#[test]
fn test_since_past_the_end_is_empty() {
    let series = PriceSeries::new(wave_bars(10, 5.0, 1.0, 0.0)).unwrap();
    assert!(series.since(day(50)).is_empty());
    assert_eq!(series.since(day(0)).len(), 10);
}

#[test]
fn test_rows_flatten_bar_and_indicators() {
    let series = PriceSeries::new(wave_bars(35, 7.0, 1.0, 0.0)).unwrap();
    let row = series.rows().last().unwrap();
    let json = serde_json::to_value(&row).unwrap();
    assert!(json.get("close").is_some());
    assert!(json.get("ma30").is_some());
    assert!(json.get("macd_hist").is_some());
}
