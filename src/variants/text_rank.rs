//! TextRank variant
//!
//! TextRank (Mihalcea & Tarau, 2004) ranks words with an unweighted random
//! walk over a co-occurrence graph built with a window of 2 tokens.
//! Candidates are scored by the sum of their word weights. Optionally the
//! top T% of words are also joined into keyword runs that become extra
//! candidates, as in the original paper.

use super::word_rank::{top_words, validate_window_size, WordGraphRanker};
use crate::errors::{KeyrankError, Result};
use crate::extractor::{Extractor, KeyphraseModel, SelectionOptions};
use crate::graph::word_graph::EdgeWeighting;
use crate::types::ExtractorConfig;
use serde::{Deserialize, Serialize};

/// Weighting options for [`TextRank`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextRankOptions {
    /// Co-occurrence window in tokens (default: 2)
    pub window_size: usize,
    /// Fraction of top-ranked words joined into extra candidates
    pub top_t_percent: Option<f64>,
    /// Divide candidate weights by their length
    pub normalize_weights: bool,
}

impl Default for TextRankOptions {
    fn default() -> Self {
        Self {
            window_size: 2,
            top_t_percent: None,
            normalize_weights: false,
        }
    }
}

impl TextRankOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the window size
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Builder method: set the top-T fraction
    pub fn with_top_t_percent(mut self, top_t_percent: f64) -> Self {
        self.top_t_percent = Some(top_t_percent);
        self
    }

    /// Builder method: normalize weights by length
    pub fn with_normalize_weights(mut self, normalize_weights: bool) -> Self {
        self.normalize_weights = normalize_weights;
        self
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        validate_window_size(self.window_size)?;
        if let Some(t) = self.top_t_percent {
            if !(t > 0.0 && t <= 1.0) {
                return Err(KeyrankError::invalid_config(format!(
                    "top_t_percent must be in (0, 1], got {}",
                    t
                )));
            }
        }
        Ok(())
    }
}

/// TextRank keyphrase extractor
#[derive(Debug)]
pub struct TextRank {
    extractor: Extractor,
}

impl Default for TextRank {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRank {
    /// Create a TextRank extractor with default config (nouns and adjectives)
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

impl KeyphraseModel for TextRank {
    type Options = TextRankOptions;

    fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    fn extractor_mut(&mut self) -> &mut Extractor {
        &mut self.extractor
    }

    fn default_selection(&self) -> SelectionOptions {
        SelectionOptions::longest_pos_sequences()
    }

    fn weight_candidates(&mut self, options: &TextRankOptions) -> Result<()> {
        options.validate()?;

        let ranker = WordGraphRanker::new(options.window_size, EdgeWeighting::Unweighted);
        let (graph, result) = ranker.rank(
            self.extractor.sentences(),
            self.extractor.valid_pos_tags(),
        );

        if let Some(fraction) = options.top_t_percent {
            let keywords = top_words(&graph, &result, fraction);
            tracing::debug!(keywords = keywords.len(), fraction, "selecting top keyword runs");
            self.extractor.select_keyword_sequences(&keywords);
        }

        let weights = result.by_label(&graph);
        self.extractor
            .weight_by_words(&weights, options.normalize_weights, true);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sentence;

    fn doc() -> Vec<Sentence> {
        vec![
            Sentence::from_tagged([
                ("graph", "NOUN"),
                ("based", "ADJ"),
                ("ranking", "NOUN"),
                ("is", "VERB"),
                ("fast", "ADJ"),
            ]),
            Sentence::from_tagged([
                ("ranking", "NOUN"),
                ("graph", "NOUN"),
                ("nodes", "NOUN"),
                ("is", "VERB"),
                ("simple", "ADJ"),
            ]),
        ]
    }

    #[test]
    fn test_default_options() {
        let options = TextRankOptions::default();
        assert_eq!(options.window_size, 2);
        assert!(options.top_t_percent.is_none());
        assert!(options.validate().is_ok());
        assert!(TextRankOptions::new().with_top_t_percent(1.5).validate().is_err());
        assert!(TextRankOptions::new().with_window_size(1).validate().is_err());
    }

    #[test]
    fn test_weights_every_candidate() {
        let mut model = TextRank::new();
        model.load_sentences(doc());
        model.select_candidates(&SelectionOptions::default()).unwrap();
        model.weight_candidates(&TextRankOptions::default()).unwrap();

        assert!(model.candidates().iter().all(|c| c.weighted && c.weight > 0.0));
        let best = model.get_n_best(1, false, true);
        assert_eq!(best[0].0, "graph based ranking");
    }

    #[test]
    fn test_top_t_percent_adds_keyword_runs() {
        let mut model = TextRank::new();
        model.load_sentences(doc());
        model.select_candidates(&SelectionOptions::default()).unwrap();
        let before = model.candidates().len();

        model
            .weight_candidates(&TextRankOptions::new().with_top_t_percent(0.34))
            .unwrap();

        // 6 nodes * 0.34 = 2 keywords: "graph" and "ranking"
        assert_eq!(model.candidates().len(), before + 3);
        assert!(model.candidates().get("graph").is_some());
        assert!(model.candidates().get("ranking").is_some());
        assert!(model.candidates().get("ranking graph").is_some());
    }

    #[test]
    fn test_weighting_is_repeatable() {
        let mut model = TextRank::new();
        model.load_sentences(doc());
        model.select_candidates(&SelectionOptions::default()).unwrap();

        model.weight_candidates(&TextRankOptions::default()).unwrap();
        let first = model.get_n_best(5, false, true);
        model.weight_candidates(&TextRankOptions::default()).unwrap();
        assert_eq!(first, model.get_n_best(5, false, true));
    }
}
