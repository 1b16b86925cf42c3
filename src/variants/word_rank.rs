//! Word-graph ranking shared by TextRank, SingleRank and PositionRank
//!
//! The three variants differ only in window size, edge weighting and
//! whether the walk is biased towards early words; [`WordGraphRanker`]
//! captures those choices and turns loaded sentences into word weights.

use crate::errors::{KeyrankError, Result};
use crate::graph::csr::CsrGraph;
use crate::graph::word_graph::{build_word_graph, inverse_position_sums, EdgeWeighting};
use crate::pagerank::personalized::PersonalizedPageRank;
use crate::pagerank::standard::StandardPageRank;
use crate::pagerank::{personalization_from_labels, PageRankResult};
use crate::types::Sentence;
use rustc_hash::{FxHashMap, FxHashSet};

/// Word graph construction and random walk settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordGraphRanker {
    /// Co-occurrence window in tokens
    pub window_size: usize,
    /// Edge weighting policy; `Unweighted` also ignores weights in the walk
    pub weighting: EdgeWeighting,
    /// Bias teleportation towards early words
    pub position_biased: bool,
}

impl WordGraphRanker {
    /// Create a ranker without position bias
    pub fn new(window_size: usize, weighting: EdgeWeighting) -> Self {
        Self {
            window_size,
            weighting,
            position_biased: false,
        }
    }

    /// Builder method: bias the walk by inverse word positions
    pub fn with_position_bias(mut self, position_biased: bool) -> Self {
        self.position_biased = position_biased;
        self
    }

    /// Build the word graph and run the walk
    pub fn rank(
        &self,
        sentences: &[Sentence],
        valid_pos_tags: &FxHashSet<String>,
    ) -> (CsrGraph, PageRankResult) {
        let builder = build_word_graph(sentences, valid_pos_tags, self.window_size, self.weighting);
        let graph = CsrGraph::from_builder(&builder);

        if graph.is_empty() {
            tracing::warn!("word graph is empty, no candidate can be weighted above zero");
        }

        let weighted = self.weighting == EdgeWeighting::CoOccurrence;
        let result = if self.position_biased {
            let positions = inverse_position_sums(sentences, valid_pos_tags);
            PersonalizedPageRank::new()
                .with_weighted(weighted)
                .with_personalization(personalization_from_labels(&graph, &positions))
                .run(&graph)
        } else {
            StandardPageRank::new().with_weighted(weighted).run(&graph)
        };

        tracing::debug!(
            nodes = graph.num_nodes,
            edges = graph.num_edges(),
            iterations = result.iterations,
            converged = result.converged,
            "ranked words"
        );
        (graph, result)
    }

    /// Random-walk weight of every node word
    pub fn word_weights(
        &self,
        sentences: &[Sentence],
        valid_pos_tags: &FxHashSet<String>,
    ) -> FxHashMap<String, f64> {
        let (graph, result) = self.rank(sentences, valid_pos_tags);
        result.by_label(&graph)
    }
}

/// Highest-weighted words of the graph, `floor(node_count * fraction)` of
/// them; ties keep node order
pub fn top_words(graph: &CsrGraph, result: &PageRankResult, fraction: f64) -> FxHashSet<String> {
    let keep = (graph.num_nodes as f64 * fraction).floor() as usize;
    result
        .top_n(keep)
        .into_iter()
        .map(|(node, _)| graph.label(node).to_string())
        .collect()
}

/// Check a co-occurrence window size
pub(crate) fn validate_window_size(window_size: usize) -> Result<()> {
    if window_size < 2 {
        return Err(KeyrankError::invalid_config(format!(
            "window_size must be >= 2, got {}",
            window_size
        )));
    }
    Ok(())
}
