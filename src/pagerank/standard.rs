//! PageRank with uniform teleportation
//!
//! The walk behind TextRank, SingleRank, TopicRank and MultipartiteRank.

use super::{normalize_teleport, power_iteration, PageRankResult, WalkSettings};
use crate::graph::csr::CsrGraph;

/// Uniform-teleport walk over a word, topic or candidate graph
#[derive(Debug, Clone)]
pub struct StandardPageRank {
    settings: WalkSettings,
    /// Follow edges in proportion to their weight; otherwise every
    /// out-edge is equally likely
    pub weighted: bool,
}

impl Default for StandardPageRank {
    fn default() -> Self {
        Self {
            settings: WalkSettings::default(),
            weighted: true,
        }
    }
}

impl StandardPageRank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.settings.damping = damping;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.settings.max_iterations = max_iterations;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.settings.threshold = threshold;
        self
    }

    /// Toggle weight-proportional transitions
    pub fn with_weighted(mut self, weighted: bool) -> Self {
        self.weighted = weighted;
        self
    }

    /// Score every node. A walk that hits the iteration cap still returns
    /// its last iterate, flagged `converged == false`.
    pub fn run(&self, graph: &CsrGraph) -> PageRankResult {
        let teleport = normalize_teleport(None, graph.num_nodes);
        power_iteration(graph, &teleport, self.weighted, &self.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::GraphBuilder;

    fn graph_of(edges: &[(&str, &str, f64)], directed: bool) -> CsrGraph {
        let mut builder = if directed {
            GraphBuilder::new_directed()
        } else {
            GraphBuilder::new()
        };
        for &(from, to, weight) in edges {
            let a = builder.get_or_create_node(from);
            let b = builder.get_or_create_node(to);
            builder.increment_edge(a, b, weight);
        }
        CsrGraph::from_builder(&builder)
    }

    /// "rank" co-occurs with three other words
    fn hub() -> CsrGraph {
        graph_of(
            &[("rank", "graph", 1.0), ("rank", "word", 1.0), ("rank", "walk", 1.0)],
            false,
        )
    }

    #[test]
    fn test_cycle_is_uniform() {
        let result = StandardPageRank::new().run(&graph_of(
            &[("a", "b", 1.0), ("b", "c", 1.0), ("c", "a", 1.0)],
            false,
        ));

        assert!(result.converged);
        for score in &result.scores {
            assert!((score - 1.0 / 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_hub_word_ranks_first() {
        let result = StandardPageRank::new().run(&hub());

        assert!(result.converged);
        assert_eq!(result.top_n(1)[0].0, 0);
        let sum: f64 = result.scores.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_isolated_word_keeps_teleport_mass() {
        let mut builder = GraphBuilder::new();
        let a = builder.get_or_create_node("graph");
        let b = builder.get_or_create_node("rank");
        builder.get_or_create_node("lonely");
        builder.increment_edge(a, b, 1.0);

        let result = StandardPageRank::new().run(&CsrGraph::from_builder(&builder));
        let sum: f64 = result.scores.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
        assert!(result.scores[2] > 0.0);
        assert!(result.scores[2] < result.scores[0]);
    }

    #[test]
    fn test_cooccurrence_counts_only_matter_when_weighted() {
        let graph = graph_of(&[("rank", "graph", 5.0), ("rank", "walk", 1.0)], false);

        let weighted = StandardPageRank::new().run(&graph);
        assert!(weighted.scores[1] > weighted.scores[2]);

        let unweighted = StandardPageRank::new().with_weighted(false).run(&graph);
        assert!((unweighted.scores[1] - unweighted.scores[2]).abs() < 1e-12);
    }

    #[test]
    fn test_empty_graph() {
        let result = StandardPageRank::new().run(&CsrGraph::default());

        assert!(result.converged);
        assert!(result.scores.is_empty());
    }

    #[test]
    fn test_iteration_cap_returns_last_iterate() {
        let result = StandardPageRank::new()
            .with_max_iterations(1)
            .with_threshold(0.0)
            .run(&hub());

        assert_eq!(result.iterations, 1);
        assert!(!result.converged);
        assert_eq!(result.scores.len(), 4);
    }

    #[test]
    fn test_higher_damping_sharpens_the_hub() {
        let graph = hub();
        let low = StandardPageRank::new().with_damping(0.5).run(&graph);
        let high = StandardPageRank::new().with_damping(0.95).run(&graph);

        assert!(high.scores[0] - high.scores[1] > low.scores[0] - low.scores[1]);
    }

    #[test]
    fn test_directed_walk_follows_out_edges() {
        let graph = graph_of(
            &[("a", "b", 1.0), ("c", "b", 1.0), ("b", "a", 1.0)],
            true,
        );

        let result = StandardPageRank::new().run(&graph);
        assert_eq!(result.top_n(1)[0].0, 1);
    }
}
