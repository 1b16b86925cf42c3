//! MultipartiteRank variant
//!
//! MultipartiteRank (Boudin, 2018) keeps every candidate as a node but only
//! links candidates of different topics, giving a directed multipartite
//! graph. Edges pointing at the earliest member of each topic are then
//! boosted with the weights its topic siblings would have received, so the
//! walk gathers on topic representatives near the start of the document.

use super::topic_rank::validate_threshold;
use crate::clustering::cluster_topics;
use crate::errors::{KeyrankError, Result};
use crate::extractor::{Extractor, KeyphraseModel, SelectionOptions};
use crate::graph::csr::CsrGraph;
use crate::graph::topic_graph::{
    adjust_multipartite_weights, build_multipartite_graph, select_representative,
};
use crate::pagerank::standard::StandardPageRank;
use crate::phrase::FilterOptions;
use crate::types::{DistanceMetric, ExtractorConfig, LinkageMethod, TopicHeuristic};
use serde::{Deserialize, Serialize};

/// Weighting options for [`MultipartiteRank`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultipartiteRankOptions {
    /// Distance threshold for cutting the dendrogram (default: 0.74)
    pub threshold: f64,
    pub metric: DistanceMetric,
    pub linkage: LinkageMethod,
    pub heuristic: TopicHeuristic,
    /// Strength of the representative boost (default: 1.1, 0 disables it)
    pub alpha: f64,
}

impl Default for MultipartiteRankOptions {
    fn default() -> Self {
        Self {
            threshold: 0.74,
            metric: DistanceMetric::default(),
            linkage: LinkageMethod::default(),
            heuristic: TopicHeuristic::default(),
            alpha: 1.1,
        }
    }
}

impl MultipartiteRankOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_linkage(mut self, linkage: LinkageMethod) -> Self {
        self.linkage = linkage;
        self
    }

    pub fn with_heuristic(mut self, heuristic: TopicHeuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.threshold)?;
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(KeyrankError::invalid_config(format!(
                "alpha must be a finite value >= 0, got {}",
                self.alpha
            )));
        }
        Ok(())
    }
}

/// MultipartiteRank implementation
#[derive(Debug)]
pub struct MultipartiteRank {
    extractor: Extractor,
    topics: Vec<Vec<String>>,
}

impl Default for MultipartiteRank {
    fn default() -> Self {
        Self::new()
    }
}

impl MultipartiteRank {
    /// Create a MultipartiteRank extractor with default config
    pub fn new() -> Self {
        Self::with_extractor(Extractor::from_valid_config(ExtractorConfig::default()))
    }

    /// Create with custom config
    pub fn with_config(config: ExtractorConfig) -> Result<Self> {
        Ok(Self::with_extractor(Extractor::new(config)?))
    }

    /// Create around an existing extractor
    pub fn with_extractor(extractor: Extractor) -> Self {
        Self {
            extractor,
            topics: Vec::new(),
        }
    }

    /// Topics found by the last weighting
    pub fn topics(&self) -> &[Vec<String>] {
        &self.topics
    }
}

impl KeyphraseModel for MultipartiteRank {
    type Options = MultipartiteRankOptions;

    fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    fn extractor_mut(&mut self) -> &mut Extractor {
        &mut self.extractor
    }

    fn default_selection(&self) -> SelectionOptions {
        SelectionOptions::longest_pos_sequences().with_filter(FilterOptions::default())
    }

    fn weight_candidates(&mut self, options: &MultipartiteRankOptions) -> Result<()> {
        options.validate()?;

        self.extractor.candidates_mut().clear_weights();
        self.topics.clear();

        if self.extractor.candidates().is_empty() {
            tracing::warn!("no candidates to cluster into topics");
            return Ok(());
        }

        self.topics = cluster_topics(
            self.extractor.candidates(),
            options.threshold,
            options.metric,
            options.linkage,
        );

        let candidates = self.extractor.candidates();
        let mut builder = build_multipartite_graph(candidates, &self.topics);
        adjust_multipartite_weights(&mut builder, candidates, &self.topics, options.alpha);
        let graph = CsrGraph::from_builder(&builder);
        let result = StandardPageRank::new().run(&graph);
        let scores = result.by_label(&graph);

        let candidates = self.extractor.candidates_mut();
        for topic in &self.topics {
            let Some(representative) = select_representative(candidates, topic, options.heuristic)
            else {
                continue;
            };
            let weight = scores.get(representative.as_str()).copied().unwrap_or(0.0);
            if let Some(candidate) = candidates.get_mut(representative) {
                candidate.set_weight(weight);
            }
        }

        tracing::debug!(
            topics = self.topics.len(),
            nodes = graph.num_nodes,
            iterations = result.iterations,
            converged = result.converged,
            "ranked multipartite graph"
        );
        Ok(())
    }
}
