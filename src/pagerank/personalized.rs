//! PageRank with a biased teleport distribution
//!
//! PositionRank teleports to each word in proportion to the inverse of its
//! positions in the document. Dangling nodes spread their mass the same way.

use super::{normalize_teleport, power_iteration, PageRankResult, WalkSettings};
use crate::graph::csr::CsrGraph;

/// Walk that teleports along a personalization vector
#[derive(Debug, Clone)]
pub struct PersonalizedPageRank {
    settings: WalkSettings,
    /// Follow edges in proportion to their weight
    pub weighted: bool,
    personalization: Option<Vec<f64>>,
}

impl Default for PersonalizedPageRank {
    fn default() -> Self {
        Self {
            settings: WalkSettings::default(),
            weighted: true,
            personalization: None,
        }
    }
}

impl PersonalizedPageRank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weighted(mut self, weighted: bool) -> Self {
        self.weighted = weighted;
        self
    }

    /// Teleport weight per node id, normalized before the walk.
    ///
    /// Non-positive or non-finite entries count as 0. A vector of the wrong
    /// length, or one without positive mass, falls back to uniform.
    pub fn with_personalization(mut self, personalization: Vec<f64>) -> Self {
        self.personalization = Some(personalization);
        self
    }

    pub fn run(&self, graph: &CsrGraph) -> PageRankResult {
        let teleport = normalize_teleport(self.personalization.as_deref(), graph.num_nodes);
        power_iteration(graph, &teleport, self.weighted, &self.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::GraphBuilder;
    use crate::pagerank::standard::StandardPageRank;

    /// graph - based - ranking - words
    fn chain() -> CsrGraph {
        let mut builder = GraphBuilder::new();
        let ids: Vec<u32> = ["graph", "based", "ranking", "words"]
            .iter()
            .map(|w| builder.get_or_create_node(w))
            .collect();
        for pair in ids.windows(2) {
            builder.increment_edge(pair[0], pair[1], 1.0);
        }
        CsrGraph::from_builder(&builder)
    }

    #[test]
    fn test_bias_favours_first_word() {
        let graph = chain();

        let uniform = StandardPageRank::new().run(&graph);
        let biased = PersonalizedPageRank::new()
            .with_personalization(vec![1.0, 0.0, 0.0, 0.0])
            .run(&graph);

        assert!(biased.converged);
        assert!(biased.scores[0] > uniform.scores[0]);
        assert!(biased.scores[3] < uniform.scores[3]);
    }

    #[test]
    fn test_no_personalization_matches_standard() {
        let graph = chain();

        let standard = StandardPageRank::new().run(&graph);
        let personalized = PersonalizedPageRank::new().run(&graph);

        for (a, b) in standard.scores.iter().zip(&personalized.scores) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_degenerate_personalization_falls_back_to_uniform() {
        let graph = chain();
        let uniform = PersonalizedPageRank::new().run(&graph);

        for personalization in [vec![0.0; 4], vec![-1.0, f64::NAN, 0.0, 0.0], vec![1.0; 3]] {
            let result = PersonalizedPageRank::new()
                .with_personalization(personalization)
                .run(&graph);
            assert_eq!(uniform.scores, result.scores);
        }
    }

    #[test]
    fn test_inverse_position_bias_sums_to_one() {
        let result = PersonalizedPageRank::new()
            .with_personalization(vec![1.0, 1.0 / 2.0, 1.0 / 3.0, 1.0 / 4.0])
            .run(&chain());

        let sum: f64 = result.scores.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
        assert!(result.scores[0] > result.scores[3]);
    }

    #[test]
    fn test_dangling_mass_follows_personalization() {
        let mut builder = GraphBuilder::new();
        let a = builder.get_or_create_node("a");
        let b = builder.get_or_create_node("b");
        builder.get_or_create_node("isolated");
        builder.increment_edge(a, b, 1.0);
        let graph = CsrGraph::from_builder(&builder);

        let result = PersonalizedPageRank::new()
            .with_personalization(vec![1.0, 0.0, 0.0])
            .run(&graph);

        // the isolated node never receives teleport mass
        assert!(result.scores[2] < 1e-3);
        assert!(result.scores[0] > result.scores[1]);
    }
}
