//! Unit tests for rolling-window helpers

use levelscope::common::math::{
    ema_series, rolling_max, rolling_mean, rolling_mean_opt, rolling_min, rolling_std, round2,
};

#[test]
fn test_rolling_mean_warms_up_at_window_minus_one() {
    let out = rolling_mean(&[1.0, 2.0, 3.0, 4.0], 3);
    assert_eq!(out, vec![None, None, Some(2.0), Some(3.0)]);
}

#[test]
fn test_rolling_std_uses_sample_denominator() {
    let out = rolling_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0], 8);
    let std = out[7].unwrap();
    assert!((std - 2.138_089_935).abs() < 1e-6);
}

#[test]
fn test_rolling_extremes() {
    let values = [3.0, 1.0, 4.0, 1.5, 5.0];
    assert_eq!(rolling_min(&values, 3), vec![None, None, Some(1.0), Some(1.0), Some(1.5)]);
    assert_eq!(rolling_max(&values, 3), vec![None, None, Some(4.0), Some(4.0), Some(5.0)]);
}

#[test]
fn test_rolling_mean_opt_propagates_gaps() {
    let out = rolling_mean_opt(&[None, Some(1.0), Some(3.0), Some(5.0)], 2);
    assert_eq!(out, vec![None, None, Some(2.0), Some(4.0)]);
}

#[test]
fn test_zero_window_is_undefined() {
    assert_eq!(rolling_mean(&[1.0, 2.0], 0), vec![None, None]);
}

#[test]
fn test_ema_is_seeded_with_first_value() {
    let out = ema_series(&[10.0, 20.0], 3);
    assert_eq!(out[0], 10.0);
    assert!((out[1] - 15.0).abs() < 1e-12);
}

#[test]
fn test_round2() {
    assert_eq!(round2(12.3456), 12.35);
    assert_eq!(round2(0.0), 0.0);
}
