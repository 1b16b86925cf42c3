//! PositionRank variant
//!
//! PositionRank (Florescu & Caragea, 2017) biases the random walk towards
//! words that appear early in the document. Each word's teleport weight is
//! the sum of `1 / (position + 1)` over all of its occurrences, so frequent
//! words near the start get the strongest pull.
//!
//! Candidates are noun-phrase chunks of at most three words.

use super::word_rank::{validate_window_size, WordGraphRanker};
use crate::errors::Result;
use crate::extractor::{Extractor, KeyphraseModel, SelectionOptions};
use crate::graph::word_graph::EdgeWeighting;
use crate::phrase::FilterOptions;
use crate::types::ExtractorConfig;
use serde::{Deserialize, Serialize};

/// Tags kept in the word graph, with and without the ezafe marker
pub const POSITION_RANK_POS_TAGS: [&str; 4] = ["NOUN", "NOUN,EZ", "ADJ", "ADJ,EZ"];

/// Longest chunk kept as a candidate
pub const MAXIMUM_WORD_NUMBER: usize = 3;

/// Weighting options for [`PositionRank`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionRankOptions {
    /// Co-occurrence window in tokens (default: 10)
    pub window_size: usize,
    /// Divide candidate weights by their length
    pub normalize_weights: bool,
}

impl Default for PositionRankOptions {
    fn default() -> Self {
        Self {
            window_size: 10,
            normalize_weights: false,
        }
    }
}

impl PositionRankOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn with_normalize_weights(mut self, normalize_weights: bool) -> Self {
        self.normalize_weights = normalize_weights;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_window_size(self.window_size)
    }
}

/// PositionRank implementation
#[derive(Debug)]
pub struct PositionRank {
    extractor: Extractor,
}

impl Default for PositionRank {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionRank {
    /// Create a new PositionRank extractor over nouns and adjectives,
    /// ezafe forms included
    pub fn new() -> Self {
        Self {
            extractor: Extractor::from_valid_config(Self::default_config()),
        }
    }

    /// Create with custom config
    pub fn with_config(config: ExtractorConfig) -> Result<Self> {
        Ok(Self {
            extractor: Extractor::new(config)?,
        })
    }

    /// Create around an existing extractor
    pub fn with_extractor(extractor: Extractor) -> Self {
        Self { extractor }
    }

    /// Config used by [`PositionRank::new`]
    pub fn default_config() -> ExtractorConfig {
        ExtractorConfig::default().with_valid_pos_tags(POSITION_RANK_POS_TAGS)
    }
}

impl KeyphraseModel for PositionRank {
    type Options = PositionRankOptions;

    fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    fn extractor_mut(&mut self) -> &mut Extractor {
        &mut self.extractor
    }

    fn default_selection(&self) -> SelectionOptions {
        SelectionOptions::grammar(None)
            .with_filter(FilterOptions::maximum_length_only(MAXIMUM_WORD_NUMBER))
    }

    fn weight_candidates(&mut self, options: &PositionRankOptions) -> Result<()> {
        options.validate()?;

        let weights = WordGraphRanker::new(options.window_size, EdgeWeighting::CoOccurrence)
            .with_position_bias(true)
            .word_weights(self.extractor.sentences(), self.extractor.valid_pos_tags());
        self.extractor
            .weight_by_words(&weights, options.normalize_weights, false);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sentence;

    fn model_for(sentences: Vec<Sentence>) -> PositionRank {
        let mut model = PositionRank::new();
        model.load_sentences(sentences);
        let selection = model.default_selection();
        model.select_candidates(&selection).unwrap();
        model
    }

    #[test]
    fn test_default_config_tags() {
        let model = PositionRank::new();
        let tags = model.extractor().valid_pos_tags();
        assert_eq!(tags.len(), 4);
        assert!(tags.contains("NOUN,EZ"));
        assert!(tags.contains("ADJ,EZ"));
    }

    #[test]
    fn test_long_chunks_are_dropped() {
        let model = model_for(vec![
            Sentence::from_tagged([
                ("a", "NOUN,EZ"),
                ("b", "NOUN,EZ"),
                ("c", "ADJ,EZ"),
                ("d", "ADJ,EZ"),
                ("is", "VERB"),
            ]),
            Sentence::from_tagged([("e", "NOUN,EZ"), ("f", "ADJ,EZ"), ("is", "VERB")]),
        ]);

        assert_eq!(model.candidates().keys(), vec!["e f"]);
    }

    #[test]
    fn test_early_phrase_outranks_late_twin() {
        // with a window of 10 every pair of words co-occurs once, so only
        // the position bias separates them
        let mut model = model_for(vec![
            Sentence::from_tagged([("a", "NOUN,EZ"), ("b", "ADJ,EZ"), ("is", "VERB")]),
            Sentence::from_tagged([("c", "NOUN,EZ"), ("d", "ADJ,EZ"), ("is", "VERB")]),
        ]);
        model
            .weight_candidates(&PositionRankOptions::default())
            .unwrap();

        let best = model.get_n_best(2, false, true);
        assert_eq!(best.len(), 2);
        assert_eq!(best[0].0, "a b");
        assert_eq!(best[1].0, "c d");
        assert!(best[0].1 > best[1].1);
    }

    #[test]
    fn test_weights_have_no_position_offset() {
        let mut model = model_for(vec![
            Sentence::from_tagged([("a", "NOUN,EZ"), ("b", "ADJ,EZ"), ("is", "VERB")]),
            Sentence::from_tagged([("c", "NOUN,EZ"), ("d", "ADJ,EZ"), ("is", "VERB")]),
        ]);
        model
            .weight_candidates(&PositionRankOptions::default())
            .unwrap();

        let total: f64 = model.candidates().iter().map(|c| c.weight).sum();
        // the four words carry all of the probability mass
        assert!((total - 1.0).abs() < 1e-6);
    }
}
