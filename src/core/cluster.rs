use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::bio::sequence::{Label, Sequence};

/// Share of a cluster's membership carrying one label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelStat {
    pub label: Label,
    pub fraction: f64,
    pub count: usize,
}

/// One K-Means cluster: a centroid, the corpus indices of its current
/// members, and a log of past centroid snapshots used for the convergence
/// check.
///
/// Members are indices into the corpus owned by the orchestrator; a cluster
/// never owns sequences.
#[derive(Debug, Clone, Default)]
pub struct Cluster {
    centroid: Vec<f64>,
    members: Vec<usize>,
    history: Vec<String>,
}

impl Cluster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cluster with a preset centroid.
    pub fn with_centroid(centroid: Vec<f64>) -> Self {
        Self {
            centroid,
            ..Self::default()
        }
    }

    /// Seed the centroid with `dimension` values drawn from `rng`, each an
    /// integer in `[0, dimension)`.
    pub fn seed<R: Rng>(&mut self, dimension: usize, rng: &mut R) {
        if dimension == 0 {
            self.centroid.clear();
            return;
        }
        self.centroid = (0..dimension)
            .map(|_| rng.gen_range(0..dimension) as f64)
            .collect();
    }

    pub fn centroid(&self) -> &[f64] {
        &self.centroid
    }

    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn add_member(&mut self, index: usize) {
        self.members.push(index);
    }

    pub fn clear_members(&mut self) {
        self.members.clear();
    }

    /// Set each centroid dimension to the mean of the member feature vectors.
    /// An empty cluster keeps its previous centroid.
    pub fn recompute_centroid(&mut self, corpus: &[Sequence]) {
        if self.members.is_empty() {
            return;
        }
        let dimension = corpus[self.members[0]].features().len();
        let count = self.members.len() as f64;
        self.centroid = (0..dimension)
            .map(|i| {
                let total: f64 = self
                    .members
                    .iter()
                    .map(|&m| corpus[m].features()[i] as f64)
                    .sum();
                total / count
            })
            .collect();
    }

    /// Append the current centroid's snapshot to the history log. Called
    /// before `recompute_centroid` so the last entry is always the previous
    /// round's centroid.
    pub fn record_centroid(&mut self) {
        self.history.push(snapshot(&self.centroid));
    }

    /// True when the centroid is unchanged from the most recent snapshot;
    /// false while the history is empty.
    pub fn has_converged(&self) -> bool {
        match self.history.last() {
            Some(previous) => *previous == snapshot(&self.centroid),
            None => false,
        }
    }

    /// Per-label membership share, one entry per label in reporting order.
    /// Fractions are rounded to two decimals and are 0 for an empty cluster.
    pub fn membership_stats(&self, corpus: &[Sequence]) -> Vec<LabelStat> {
        let total = self.members.len();
        Label::ALL
            .iter()
            .map(|&label| {
                let count = self
                    .members
                    .iter()
                    .filter(|&&m| corpus[m].label == label)
                    .count();
                let fraction = if total == 0 {
                    0.0
                } else {
                    round2(count as f64 / total as f64)
                };
                LabelStat {
                    label,
                    fraction,
                    count,
                }
            })
            .collect()
    }
}

/// Canonical textual form of a centroid, compared verbatim for convergence.
fn snapshot(centroid: &[f64]) -> String {
    format!("{:?}", centroid)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
