//! Greedy relative-distance clustering of level candidates

use crate::models::{LevelCandidate, LevelSource};

/// Candidates merged into one consensus group.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceCluster {
    members: Vec<LevelCandidate>,
    sum: f64,
}

impl PriceCluster {
    fn new(first: LevelCandidate) -> Self {
        Self {
            sum: first.price,
            members: vec![first],
        }
    }

    fn push(&mut self, candidate: LevelCandidate) {
        self.sum += candidate.price;
        self.members.push(candidate);
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[LevelCandidate] {
        &self.members
    }

    /// Arithmetic mean of member prices.
    pub fn mean_price(&self) -> f64 {
        self.sum / self.members.len() as f64
    }

    /// Distinct contributing generators, ordered by `LevelSource`.
    pub fn sources(&self) -> Vec<LevelSource> {
        let mut sources: Vec<LevelSource> = self.members.iter().map(|m| m.source).collect();
        sources.sort();
        sources.dedup();
        sources
    }

    fn accepts(&self, price: f64, threshold: f64) -> bool {
        let mean = self.mean_price();
        if mean == 0.0 {
            return price == 0.0;
        }
        ((price - mean) / mean).abs() < threshold
    }
}

/// Cluster candidates for one side.
///
/// Candidates are sorted ascending by price, then each joins the first
/// existing cluster whose running mean lies within `threshold` relative
/// distance, or opens a new one. Clusters with fewer than `min_members`
/// members are discarded. Result order follows cluster creation, i.e.
/// ascending by first member price.
pub fn cluster_levels(
    candidates: &[LevelCandidate],
    threshold: f64,
    min_members: usize,
) -> Vec<PriceCluster> {
    let mut sorted = candidates.to_vec();
    sorted.sort_by(|a, b| a.price.total_cmp(&b.price));

    let mut clusters: Vec<PriceCluster> = Vec::new();
    for candidate in sorted {
        match clusters
            .iter_mut()
            .find(|c| c.accepts(candidate.price, threshold))
        {
            Some(cluster) => cluster.push(candidate),
            None => clusters.push(PriceCluster::new(candidate)),
        }
    }

    clusters.retain(|c| c.len() >= min_members);
    clusters
}
