//! TopicRank variant
//!
//! TopicRank (Bougouin et al., 2013) groups candidates that share words into
//! topics with hierarchical agglomerative clustering, ranks the topics on a
//! complete graph weighted by the proximity of their occurrences, and hands
//! each topic's score to a single representative candidate.

use crate::clustering::cluster_topics;
use crate::errors::{KeyrankError, Result};
use crate::extractor::{Extractor, KeyphraseModel, SelectionOptions};
use crate::graph::csr::CsrGraph;
use crate::graph::topic_graph::{build_topic_graph, select_representative};
use crate::pagerank::standard::StandardPageRank;
use crate::phrase::FilterOptions;
use crate::types::{DistanceMetric, ExtractorConfig, LinkageMethod, TopicHeuristic};
use serde::{Deserialize, Serialize};

/// Weighting options for [`TopicRank`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopicRankOptions {
    /// Distance threshold for cutting the dendrogram (default: 0.74)
    pub threshold: f64,
    /// Distance between candidate word vectors
    pub metric: DistanceMetric,
    /// Linkage rule of the clustering
    pub linkage: LinkageMethod,
    /// Which member represents its topic
    pub heuristic: TopicHeuristic,
}

impl Default for TopicRankOptions {
    fn default() -> Self {
        Self {
            threshold: 0.74,
            metric: DistanceMetric::default(),
            linkage: LinkageMethod::default(),
            heuristic: TopicHeuristic::default(),
        }
    }
}

impl TopicRankOptions {
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

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.threshold)
    }
}

pub(crate) fn validate_threshold(threshold: f64) -> Result<()> {
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(KeyrankError::invalid_config(format!(
            "threshold must be a finite value >= 0, got {}",
            threshold
        )));
    }
    Ok(())
}

/// TopicRank implementation
#[derive(Debug)]
pub struct TopicRank {
    extractor: Extractor,
    topics: Vec<Vec<String>>,
}

impl Default for TopicRank {
    fn default() -> Self {
        Self::new()
    }
}

impl TopicRank {
    /// Create a TopicRank extractor with default config
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

    /// Topics found by the last weighting, each listing canonical forms
    pub fn topics(&self) -> &[Vec<String>] {
        &self.topics
    }
}

impl KeyphraseModel for TopicRank {
    type Options = TopicRankOptions;

    fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    fn extractor_mut(&mut self) -> &mut Extractor {
        &mut self.extractor
    }

    fn default_selection(&self) -> SelectionOptions {
        SelectionOptions::longest_pos_sequences().with_filter(FilterOptions::default())
    }

    fn weight_candidates(&mut self, options: &TopicRankOptions) -> Result<()> {
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

        let builder = build_topic_graph(self.extractor.candidates(), &self.topics);
        let graph = CsrGraph::from_builder(&builder);
        let result = StandardPageRank::new().run(&graph);

        let candidates = self.extractor.candidates_mut();
        for (i, topic) in self.topics.iter().enumerate() {
            let Some(representative) = select_representative(candidates, topic, options.heuristic)
            else {
                continue;
            };
            let weight = result.score(i as u32);
            if let Some(candidate) = candidates.get_mut(representative) {
                candidate.set_weight(weight);
            }
        }

        tracing::debug!(
            topics = self.topics.len(),
            iterations = result.iterations,
            converged = result.converged,
            "ranked topics"
        );
        Ok(())
    }
}
