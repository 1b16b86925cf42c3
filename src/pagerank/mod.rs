//! PageRank algorithms
//!
//! This module provides standard and personalized PageRank implementations
//! over [`CsrGraph`]. Both share one power iteration:
//!
//! ```text
//! next = d * (score · M + dangling_mass * p) + (1 - d) * p
//! ```
//!
//! where `M` is the row-normalized transition matrix and `p` the teleport
//! distribution. Iteration stops once the L1 change drops below
//! `node_count * threshold` (see [`WalkSettings`]).

pub mod personalized;
pub mod standard;

use crate::graph::csr::CsrGraph;
use rustc_hash::FxHashMap;

/// Result of a PageRank computation
#[derive(Debug, Clone)]
pub struct PageRankResult {
    /// Scores for each node (indexed by node ID)
    pub scores: Vec<f64>,
    /// Number of iterations performed
    pub iterations: usize,
    /// Final convergence delta
    pub delta: f64,
    /// Whether the algorithm converged
    pub converged: bool,
}

impl PageRankResult {
    /// Create a new PageRank result
    pub fn new(scores: Vec<f64>, iterations: usize, delta: f64, converged: bool) -> Self {
        Self {
            scores,
            iterations,
            delta,
            converged,
        }
    }

    /// Get top N nodes by score; ties keep node order
    pub fn top_n(&self, n: usize) -> Vec<(u32, f64)> {
        let mut indexed: Vec<_> = self
            .scores
            .iter()
            .enumerate()
            .map(|(i, &s)| (i as u32, s))
            .collect();
        indexed.sort_by(|a, b| b.1.total_cmp(&a.1));
        indexed.truncate(n);
        indexed
    }

    /// Get the score for a specific node
    pub fn score(&self, node: u32) -> f64 {
        self.scores.get(node as usize).copied().unwrap_or(0.0)
    }

    /// Scores keyed by node label
    pub fn by_label(&self, graph: &CsrGraph) -> FxHashMap<String, f64> {
        graph
            .labels
            .iter()
            .cloned()
            .zip(self.scores.iter().copied())
            .collect()
    }
}

/// Teleport vector from label weights.
///
/// Nodes whose label is missing from `weights` get 0.
pub fn personalization_from_labels(graph: &CsrGraph, weights: &FxHashMap<String, f64>) -> Vec<f64> {
    graph
        .labels
        .iter()
        .map(|label| weights.get(label).copied().unwrap_or(0.0))
        .collect()
}

/// Damping, iteration cap and tolerance of a walk.
///
/// Defaults follow the usual networkx settings: damping 0.85, at most 100
/// iterations, per-node tolerance `1e-4`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkSettings {
    /// Probability of following an edge rather than teleporting
    pub damping: f64,
    pub max_iterations: usize,
    /// Per-node tolerance; the walk stops once the L1 change is below
    /// `node_count * threshold`
    pub threshold: f64,
}

impl Default for WalkSettings {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            threshold: 1e-4,
        }
    }
}

/// Normalize a teleport vector; an empty or all-zero vector becomes uniform
fn normalize_teleport(personalization: Option<&[f64]>, n: usize) -> Vec<f64> {
    let uniform = vec![1.0 / n as f64; n];
    let Some(raw) = personalization else {
        return uniform;
    };
    if raw.len() != n {
        tracing::debug!(
            expected = n,
            actual = raw.len(),
            "personalization length mismatch, using uniform teleport"
        );
        return uniform;
    }

    let clean: Vec<f64> = raw
        .iter()
        .map(|&v| if v.is_finite() && v > 0.0 { v } else { 0.0 })
        .collect();
    let sum: f64 = clean.iter().sum();
    if sum > 0.0 {
        clean.into_iter().map(|v| v / sum).collect()
    } else {
        uniform
    }
}

/// Power iteration shared by both walks.
///
/// Dangling nodes hand their mass to the teleport distribution.
fn power_iteration(
    graph: &CsrGraph,
    teleport: &[f64],
    weighted: bool,
    settings: &WalkSettings,
) -> PageRankResult {
    let n = graph.num_nodes;
    if n == 0 {
        return PageRankResult::new(vec![], 0, 0.0, true);
    }

    let d = settings.damping;
    let outflow = graph.outflow(weighted);
    let sinks: Vec<usize> = (0..n).filter(|&i| outflow[i] == 0.0).collect();
    let tolerance = n as f64 * settings.threshold;

    let mut current = vec![1.0 / n as f64; n];
    let mut next = vec![0.0; n];
    let mut delta = f64::MAX;

    for iteration in 1..=settings.max_iterations {
        let sink_mass: f64 = sinks.iter().map(|&s| current[s]).sum();
        for (slot, &p) in next.iter_mut().zip(teleport) {
            *slot = d * sink_mass * p + (1.0 - d) * p;
        }

        for (node, (&mass, &out)) in current.iter().zip(&outflow).enumerate() {
            if out == 0.0 {
                continue;
            }
            for (target, weight) in graph.neighbors(node as u32) {
                let w = if weighted { weight } else { 1.0 };
                next[target as usize] += d * mass * w / out;
            }
        }

        delta = current.iter().zip(&next).map(|(a, b)| (a - b).abs()).sum();
        std::mem::swap(&mut current, &mut next);

        if delta < tolerance {
            return PageRankResult::new(current, iteration, delta, true);
        }
    }

    tracing::warn!(
        iterations = settings.max_iterations,
        delta,
        nodes = n,
        "PageRank did not converge, using last iterate"
    );
    PageRankResult::new(current, settings.max_iterations, delta, false)
}
