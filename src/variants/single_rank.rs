//! SingleRank variant
//!
//! SingleRank (Wan & Xiao, 2008) extends TextRank with two modifications:
//! 1. **Weighted edges**: co-occurrence counts inside a 10-token window are
//!    used as edge weights.
//! 2. **Cross-sentence windowing**: the window ignores sentence boundaries,
//!    so words at the end of one sentence can co-occur with words at the
//!    start of the next.
//!
//! Candidates are the longest runs of valid tags, weighted by the sum of
//! their word scores.

use super::word_rank::{validate_window_size, WordGraphRanker};
use crate::errors::Result;
use crate::extractor::{Extractor, KeyphraseModel, SelectionOptions};
use crate::graph::word_graph::EdgeWeighting;
use crate::types::ExtractorConfig;
use serde::{Deserialize, Serialize};

/// Weighting options for [`SingleRank`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SingleRankOptions {
    /// Co-occurrence window in tokens (default: 10)
    pub window_size: usize,
    /// Divide candidate weights by their length
    pub normalize_weights: bool,
}

impl Default for SingleRankOptions {
    fn default() -> Self {
        Self {
            window_size: 10,
            normalize_weights: false,
        }
    }
}

impl SingleRankOptions {
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

/// SingleRank implementation
#[derive(Debug)]
pub struct SingleRank {
    extractor: Extractor,
}

impl Default for SingleRank {
    fn default() -> Self {
        Self::new()
    }
}

impl SingleRank {
    /// Create a new SingleRank extractor with default config
    pub fn new() -> Self {
        Self {
            extractor: Extractor::from_valid_config(ExtractorConfig::default()),
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
}

impl KeyphraseModel for SingleRank {
    type Options = SingleRankOptions;

    fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    fn extractor_mut(&mut self) -> &mut Extractor {
        &mut self.extractor
    }

    fn default_selection(&self) -> SelectionOptions {
        SelectionOptions::longest_pos_sequences()
    }

    fn weight_candidates(&mut self, options: &SingleRankOptions) -> Result<()> {
        options.validate()?;

        let weights = WordGraphRanker::new(options.window_size, EdgeWeighting::CoOccurrence)
            .word_weights(self.extractor.sentences(), self.extractor.valid_pos_tags());
        self.extractor
            .weight_by_words(&weights, options.normalize_weights, true);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::KeyrankError;
    use crate::types::Sentence;

    fn doc() -> Vec<Sentence> {
        vec![
            Sentence::from_tagged([
                ("efficient", "ADJ"),
                ("keyphrase", "NOUN"),
                ("extraction", "NOUN"),
                ("needs", "VERB"),
                ("graphs", "NOUN"),
            ]),
            Sentence::from_tagged([
                ("keyphrase", "NOUN"),
                ("extraction", "NOUN"),
                ("ranks", "VERB"),
                ("phrases", "NOUN"),
            ]),
        ]
    }

    fn weighted(options: &SingleRankOptions) -> SingleRank {
        let mut model = SingleRank::new();
        model.load_sentences(doc());
        model.select_candidates(&SelectionOptions::default()).unwrap();
        model.weight_candidates(options).unwrap();
        model
    }

    #[test]
    fn test_longest_candidate_wins_without_normalization() {
        let model = weighted(&SingleRankOptions::default());
        let best = model.get_n_best(3, false, true);

        assert_eq!(best[0].0, "efficient keyphrase extraction");
        assert!(best.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn test_normalized_weights_are_averages() {
        let plain = weighted(&SingleRankOptions::default());
        let averaged = weighted(&SingleRankOptions::new().with_normalize_weights(true));

        let sum = plain.candidates().get("keyphrase extraction").unwrap().weight;
        let mean = averaged.candidates().get("keyphrase extraction").unwrap().weight;
        // the position tie-breaker is added after the division
        assert!((sum / 2.0 - mean).abs() < 1e-6);
    }

    #[test]
    fn test_huge_window_matches_document_window() {
        let huge = weighted(&SingleRankOptions::new().with_window_size(usize::MAX));
        let document = weighted(&SingleRankOptions::new().with_window_size(9));

        assert_eq!(
            huge.get_n_best(5, false, true),
            document.get_n_best(5, false, true)
        );
    }

    #[test]
    fn test_rejects_small_window() {
        let mut model = SingleRank::new();
        model.load_sentences(doc());
        let err = model
            .weight_candidates(&SingleRankOptions::new().with_window_size(0))
            .unwrap_err();
        assert!(matches!(err, KeyrankError::InvalidConfig { .. }));
    }
}
