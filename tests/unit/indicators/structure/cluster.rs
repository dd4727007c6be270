//! Unit tests for candidate clustering and level selection

use levelscope::indicators::structure::{cluster_levels, select_levels, LevelParams};
use levelscope::models::{ConsensusLevel, LevelCandidate, LevelSource};

fn candidate(price: f64, source: LevelSource) -> LevelCandidate {
    LevelCandidate::new(price, source)
}

fn level(price: f64) -> ConsensusLevel {
    ConsensusLevel {
        price,
        strength: 50.0,
        sources: vec![LevelSource::Pivot],
    }
}

fn summary(candidates: &[LevelCandidate]) -> Vec<(f64, usize, Vec<LevelSource>)> {
    cluster_levels(candidates, 0.02, 2)
        .iter()
        .map(|c| (c.mean_price(), c.len(), c.sources()))
        .collect()
}

#[test]
fn test_nearby_candidates_merge() {
    let candidates = vec![
        candidate(10.00, LevelSource::Fractal),
        candidate(10.02, LevelSource::Fractal),
        candidate(10.05, LevelSource::VolumeProfile),
        candidate(12.00, LevelSource::Pivot),
    ];
    let clusters = cluster_levels(&candidates, 0.02, 2);

    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].len(), 3);
    assert!((clusters[0].mean_price() - 10.023_333_333).abs() < 1e-6);
    assert_eq!(
        clusters[0].sources(),
        vec![LevelSource::VolumeProfile, LevelSource::Fractal]
    );
}

#[test]
fn test_threshold_is_strict() {
    let candidates = vec![
        candidate(100.0, LevelSource::Pivot),
        candidate(102.0, LevelSource::Fractal),
    ];
    assert!(cluster_levels(&candidates, 0.02, 2).is_empty());
    assert_eq!(cluster_levels(&candidates, 0.021, 2).len(), 1);
}

#[test]
fn test_singletons_are_dropped() {
    let candidates = vec![
        candidate(5.0, LevelSource::Pivot),
        candidate(8.0, LevelSource::Pivot),
    ];
    assert!(cluster_levels(&candidates, 0.02, 2).is_empty());
    assert_eq!(cluster_levels(&candidates, 0.02, 1).len(), 2);
    assert!(cluster_levels(&[], 0.02, 1).is_empty());
}

#[test]
fn test_clustering_ignores_input_order() {
    let candidates = vec![
        candidate(20.0, LevelSource::Pivot),
        candidate(20.3, LevelSource::Fractal),
        candidate(9.9, LevelSource::VolumeProfile),
        candidate(10.1, LevelSource::Fractal),
        candidate(15.0, LevelSource::Pivot),
        candidate(10.0, LevelSource::Pivot),
    ];
    let expected = summary(&candidates);

    let mut reversed = candidates.clone();
    reversed.reverse();
    assert_eq!(summary(&reversed), expected);

    let mut rotated = candidates.clone();
    rotated.rotate_left(2);
    assert_eq!(summary(&rotated), expected);
    assert_eq!(expected.len(), 2);
}

#[test]
fn test_selection_excludes_levels_at_the_price() {
    let params = LevelParams::default();
    let result = select_levels(
        vec![level(10.0), level(9.97), level(9.9)],
        vec![level(10.04), level(10.2)],
        10.0,
        5.0,
        &params,
    );
    assert_eq!(result.support_levels(), vec![9.9]);
    assert_eq!(result.resistance_levels(), vec![10.2]);
}

#[test]
fn test_selection_keeps_nearest_levels_ascending() {
    let params = LevelParams::default();
    let result = select_levels(
        vec![level(9.9), level(9.0), level(9.8), level(9.5)],
        vec![level(12.0), level(10.5), level(11.0), level(10.2)],
        10.0,
        0.0,
        &params,
    );
    assert_eq!(result.support_levels(), vec![9.5, 9.8, 9.9]);
    assert_eq!(result.resistance_levels(), vec![10.2, 10.5, 11.0]);
}

#[test]
fn test_selection_drops_wrong_side() {
    let params = LevelParams::default();
    let result = select_levels(vec![level(11.0)], vec![level(9.0)], 10.0, 1.0, &params);
    assert!(result.is_empty());
}
