//! Shared extractor core
//!
//! [`Extractor`] owns everything a ranking run needs besides the graph: the
//! configuration, the stopword filter, the text processor, the loaded
//! sentences and the candidate set. Variants wrap one and implement
//! [`KeyphraseModel`], which supplies loading, selection and best-N output
//! on top of the variant's own weighting step.

use crate::errors::Result;
use crate::nlp::reader::{read_file, read_input, TextProcessor};
use crate::nlp::stopwords::StopwordFilter;
use crate::nlp::tagged::TaggedTextProcessor;
use crate::phrase::filter::{filter_candidates, FilterOptions};
use crate::phrase::grammar::{select_with_grammar, ChunkGrammar};
use crate::phrase::selection::{select_longest_keyword_sequences, select_longest_pos_sequences};
use crate::types::{Candidate, CandidateSet, ExtractorConfig, Sentence, WordNormalization};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// Selection Options
// ============================================================================

/// How candidate occurrences are found in the sentences
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// Longest runs of valid POS tags
    #[default]
    LongestPosSequences,
    /// Noun-phrase chunks of a tag grammar (`None` uses the default grammar)
    Grammar(Option<String>),
}

/// Candidate selection settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionOptions {
    /// Selection strategy
    pub strategy: SelectionStrategy,
    /// Filters applied after selection
    pub filter: Option<FilterOptions>,
}

impl SelectionOptions {
    /// Longest POS runs, unfiltered
    pub fn longest_pos_sequences() -> Self {
        Self::default()
    }

    /// Grammar chunks, unfiltered
    pub fn grammar(grammar: Option<String>) -> Self {
        Self {
            strategy: SelectionStrategy::Grammar(grammar),
            filter: None,
        }
    }

    /// Builder method: filter candidates after selection
    pub fn with_filter(mut self, filter: FilterOptions) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Builder method: keep every selected candidate
    pub fn without_filter(mut self) -> Self {
        self.filter = None;
        self
    }

    /// Parse options from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

// ============================================================================
// Extractor
// ============================================================================

/// State shared by every keyphrase model
pub struct Extractor {
    config: ExtractorConfig,
    stopwords: StopwordFilter,
    processor: Box<dyn TextProcessor>,
    sentences: Vec<Sentence>,
    candidates: CandidateSet,
}

impl std::fmt::Debug for Extractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extractor")
            .field("config", &self.config)
            .field("sentences", &self.sentences.len())
            .field("candidates", &self.candidates.len())
            .finish_non_exhaustive()
    }
}

impl Extractor {
    /// Create an extractor reading `word/TAG` text.
    ///
    /// The stopword list is the configured language's list plus the extra
    /// stopwords and every punctuation mark.
    pub fn new(config: ExtractorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    /// Build from a configuration known to be valid
    pub(crate) fn from_valid_config(config: ExtractorConfig) -> Self {
        let mut stopwords = StopwordFilter::new(&config.language).with_punctuation();
        stopwords.add_stopwords(&config.extra_stopwords);

        Self {
            config,
            stopwords,
            processor: Box::new(TaggedTextProcessor::new()),
            sentences: Vec::new(),
            candidates: CandidateSet::new(),
        }
    }

    /// Builder method: use another text processor
    pub fn with_processor<P: TextProcessor + 'static>(mut self, processor: P) -> Self {
        self.processor = Box::new(processor);
        self
    }

    /// Builder method: replace the stopword filter
    pub fn with_stopwords(mut self, stopwords: StopwordFilter) -> Self {
        self.stopwords = stopwords;
        self
    }

    /// Construction-time configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// POS tags of words that become graph nodes
    pub fn valid_pos_tags(&self) -> &FxHashSet<String> {
        &self.config.valid_pos_tags
    }

    /// Stopword filter used by candidate filtering
    pub fn stopwords(&self) -> &StopwordFilter {
        &self.stopwords
    }

    /// Loaded sentences
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// Current candidates
    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    /// Current candidates, mutably
    pub fn candidates_mut(&mut self) -> &mut CandidateSet {
        &mut self.candidates
    }

    /// Load raw text, or the file it names, through the text processor.
    ///
    /// Replaces the loaded document and drops any previous candidates.
    pub fn load_text(&mut self, input: &str, normalization: WordNormalization) -> Result<()> {
        let text = read_input(input)?;
        let sentences = self.processor.process(&text, normalization)?;
        self.load_sentences(sentences);
        Ok(())
    }

    /// Load a text file through the text processor
    pub fn load_file(
        &mut self,
        path: impl AsRef<Path>,
        normalization: WordNormalization,
    ) -> Result<()> {
        let text = read_file(path)?;
        let sentences = self.processor.process(&text, normalization)?;
        self.load_sentences(sentences);
        Ok(())
    }

    /// Load already processed sentences
    pub fn load_sentences(&mut self, sentences: Vec<Sentence>) {
        tracing::debug!(
            sentences = sentences.len(),
            tokens = sentences.iter().map(Sentence::len).sum::<usize>(),
            "loaded document"
        );
        self.sentences = sentences;
        self.candidates.clear();
    }

    /// Replace the candidate set with a fresh selection
    pub fn select_candidates(&mut self, options: &SelectionOptions) -> Result<()> {
        self.candidates.clear();

        match &options.strategy {
            SelectionStrategy::LongestPosSequences => select_longest_pos_sequences(
                &self.sentences,
                &self.config.valid_pos_tags,
                &mut self.candidates,
            ),
            SelectionStrategy::Grammar(grammar) => {
                let grammar = match grammar {
                    Some(text) => ChunkGrammar::new(text)?,
                    None => ChunkGrammar::default_grammar()?,
                };
                select_with_grammar(&self.sentences, &grammar, &mut self.candidates);
            }
        }

        tracing::debug!(
            candidates = self.candidates.len(),
            strategy = ?options.strategy,
            "selected candidates"
        );

        if let Some(filter) = &options.filter {
            filter_candidates(&mut self.candidates, filter, &self.stopwords);
        }
        Ok(())
    }

    /// Add the longest runs of the given keywords to the candidate set
    pub fn select_keyword_sequences(&mut self, keywords: &FxHashSet<String>) {
        select_longest_keyword_sequences(&self.sentences, keywords, &mut self.candidates);
    }

    /// Weigh every candidate by the summed weights of its words.
    ///
    /// Words without a weight count as 0. With `normalize` the sum is divided
    /// by the candidate length; with `position_adjustment` the first offset
    /// scaled by `1e-8` is added to break ties.
    pub fn weight_by_words(
        &mut self,
        word_weights: &FxHashMap<String, f64>,
        normalize: bool,
        position_adjustment: bool,
    ) {
        for candidate in self.candidates.iter_mut() {
            let mut weight: f64 = candidate
                .normalized_words
                .iter()
                .map(|w| word_weights.get(w).copied().unwrap_or(0.0))
                .sum();
            if normalize && candidate.length() > 0 {
                weight /= candidate.length() as f64;
            }
            if position_adjustment {
                weight += candidate.first_offset() as f64 * 1e-8;
            }
            candidate.set_weight(weight);
        }
    }

    /// The `n` highest-weighted candidates as `(phrase, weight)` pairs.
    ///
    /// Only weighted candidates are ranked; ties keep candidate-set order.
    /// With `remove_redundants`, a candidate whose words occur contiguously
    /// inside an already selected one is skipped. `normalized` picks the
    /// canonical form over the first occurrence's surface words.
    pub fn get_n_best(
        &self,
        n: usize,
        remove_redundants: bool,
        normalized: bool,
    ) -> Vec<(String, f64)> {
        let mut ranked: Vec<_> = self.candidates.iter().filter(|c| c.weighted).collect();
        ranked.sort_by(|a, b| b.weight.total_cmp(&a.weight));

        let mut selected: Vec<&Candidate> = Vec::with_capacity(n.min(ranked.len()));
        for candidate in ranked {
            if selected.len() >= n {
                break;
            }
            if remove_redundants
                && selected
                    .iter()
                    .any(|s| contains_sequence(&s.normalized_words, &candidate.normalized_words))
            {
                continue;
            }
            selected.push(candidate);
        }

        let best: Vec<(String, f64)> = selected
            .into_iter()
            .map(|c| {
                let phrase = if normalized {
                    c.canonical_form()
                } else {
                    c.first_words().join(" ")
                };
                (phrase, c.weight)
            })
            .collect();

        if best.len() < n {
            tracing::warn!(
                requested = n,
                given = best.len(),
                "Not enough candidates to choose from"
            );
        }
        best
    }

    /// Drop the loaded document and its candidates
    pub fn reset(&mut self) {
        self.sentences.clear();
        self.candidates.clear();
    }
}

/// Whether `needle` occurs as a contiguous run inside `haystack`
fn contains_sequence(haystack: &[String], needle: &[String]) -> bool {
    !needle.is_empty()
        && needle.len() <= haystack.len()
        && haystack.windows(needle.len()).any(|w| w == needle)
}

// ============================================================================
// Keyphrase Model
// ============================================================================

/// A ranking model built on an [`Extractor`].
///
/// Implementors provide access to their extractor, their default selection
/// and the weighting step; loading, selection and best-N output are shared.
pub trait KeyphraseModel {
    /// Options of the weighting step
    type Options: Default;

    /// The shared extractor state
    fn extractor(&self) -> &Extractor;

    /// The shared extractor state, mutably
    fn extractor_mut(&mut self) -> &mut Extractor;

    /// Selection used when none is given
    fn default_selection(&self) -> SelectionOptions;

    /// Build the graph, run the random walk and weigh the candidates.
    ///
    /// Every call starts from a fresh graph.
    fn weight_candidates(&mut self, options: &Self::Options) -> Result<()>;

    /// Load raw text or a file path
    fn load_text(&mut self, input: &str, normalization: WordNormalization) -> Result<()> {
        self.extractor_mut().load_text(input, normalization)
    }

    /// Load a text file
    fn load_file(&mut self, path: impl AsRef<Path>, normalization: WordNormalization) -> Result<()>
    where
        Self: Sized,
    {
        self.extractor_mut().load_file(path, normalization)
    }

    /// Load already processed sentences
    fn load_sentences(&mut self, sentences: Vec<Sentence>) {
        self.extractor_mut().load_sentences(sentences);
    }

    /// Select candidates, then filter them
    fn select_candidates(&mut self, options: &SelectionOptions) -> Result<()> {
        self.extractor_mut().select_candidates(options)
    }

    /// The `n` best candidates
    fn get_n_best(&self, n: usize, remove_redundants: bool, normalized: bool) -> Vec<(String, f64)> {
        self.extractor().get_n_best(n, remove_redundants, normalized)
    }

    /// Current candidates
    fn candidates(&self) -> &CandidateSet {
        self.extractor().candidates()
    }

    /// Loaded sentences
    fn sentences(&self) -> &[Sentence] {
        self.extractor().sentences()
    }

    /// Drop the loaded document and its candidates
    fn reset(&mut self) {
        self.extractor_mut().reset();
    }

    /// Run the whole pipeline with default options
    fn extract(&mut self, input: &str, n: usize) -> Result<Vec<(String, f64)>> {
        self.load_text(input, WordNormalization::default())?;
        let selection = self.default_selection();
        self.select_candidates(&selection)?;
        self.weight_candidates(&Self::Options::default())?;
        Ok(self.get_n_best(n, false, false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::KeyrankError;

    const TEXT: &str = "\
random/ADJ walks/NOUN/walk on/ADP word/NOUN graphs/NOUN/graph
word/NOUN graphs/NOUN/graph rank/VERB keyphrases/NOUN/keyphrase";

    fn extractor() -> Extractor {
        Extractor::new(ExtractorConfig::default().with_language("none")).unwrap()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = ExtractorConfig::default().with_valid_pos_tags(Vec::<String>::new());
        assert!(matches!(
            Extractor::new(config),
            Err(KeyrankError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_load_and_select() {
        let mut ex = extractor();
        ex.load_text(TEXT, WordNormalization::Stemming).unwrap();
        assert_eq!(ex.sentences().len(), 2);

        ex.select_candidates(&SelectionOptions::longest_pos_sequences())
            .unwrap();
        assert_eq!(
            ex.candidates().keys(),
            vec!["random walk", "word graph", "keyphrase"]
        );
        assert_eq!(ex.candidates().get("word graph").unwrap().offsets, vec![3, 5]);
    }

    #[test]
    fn test_select_replaces_previous_candidates() {
        let mut ex = extractor();
        ex.load_text(TEXT, WordNormalization::Stemming).unwrap();
        let options = SelectionOptions::longest_pos_sequences();
        ex.select_candidates(&options).unwrap();
        ex.select_candidates(&options).unwrap();
        assert_eq!(ex.candidates().get("word graph").unwrap().frequency(), 2);
    }

    #[test]
    fn test_invalid_grammar_is_an_error() {
        let mut ex = extractor();
        ex.load_text(TEXT, WordNormalization::Stemming).unwrap();
        let err = ex
            .select_candidates(&SelectionOptions::grammar(Some("{<NOUN>}".to_string())))
            .unwrap_err();
        assert!(matches!(err, KeyrankError::InvalidGrammar { .. }));
    }

    #[test]
    fn test_filter_after_selection() {
        let mut ex = extractor();
        ex.load_text(TEXT, WordNormalization::Stemming).unwrap();
        let options = SelectionOptions::longest_pos_sequences()
            .with_filter(FilterOptions::maximum_length_only(1));
        ex.select_candidates(&options).unwrap();
        assert_eq!(ex.candidates().keys(), vec!["keyphrase"]);
    }

    #[test]
    fn test_weight_by_words() {
        let mut ex = extractor();
        ex.load_text(TEXT, WordNormalization::Stemming).unwrap();
        ex.select_candidates(&SelectionOptions::default()).unwrap();

        let mut weights = FxHashMap::default();
        weights.insert("word".to_string(), 0.2);
        weights.insert("graph".to_string(), 0.4);

        ex.weight_by_words(&weights, true, false);
        let c = ex.candidates().get("word graph").unwrap();
        assert!((c.weight - 0.3).abs() < 1e-12);
        assert!(c.weighted);
        assert_eq!(ex.candidates().get("keyphrase").unwrap().weight, 0.0);

        ex.weight_by_words(&weights, false, true);
        let c = ex.candidates().get("word graph").unwrap();
        assert!((c.weight - (0.6 + 3e-8)).abs() < 1e-12);
    }

    #[test]
    fn test_get_n_best_orders_and_formats() {
        let mut ex = extractor();
        ex.load_text(TEXT, WordNormalization::Stemming).unwrap();
        ex.select_candidates(&SelectionOptions::default()).unwrap();

        let mut weights = FxHashMap::default();
        weights.insert("walk".to_string(), 0.5);
        weights.insert("graph".to_string(), 0.5);
        ex.weight_by_words(&weights, false, false);

        let best = ex.get_n_best(2, false, false);
        // equal weights keep candidate order
        assert_eq!(
            best,
            vec![("random walks".to_string(), 0.5), ("word graphs".to_string(), 0.5)]
        );

        let normalized = ex.get_n_best(10, false, true);
        assert_eq!(normalized.len(), 3);
        assert_eq!(normalized[2].0, "keyphrase");
    }

    #[test]
    fn test_unweighted_candidates_are_skipped() {
        let mut ex = extractor();
        ex.load_text(TEXT, WordNormalization::Stemming).unwrap();
        ex.select_candidates(&SelectionOptions::default()).unwrap();
        ex.candidates_mut()
            .get_mut("keyphrase")
            .unwrap()
            .set_weight(1.0);

        assert_eq!(ex.get_n_best(5, false, true), vec![("keyphrase".to_string(), 1.0)]);
    }

    #[test]
    fn test_remove_redundants() {
        let mut ex = extractor();
        let s = Sentence::from_tagged([("word", "NOUN"), ("graph", "NOUN")]);
        let t = Sentence::from_tagged([("graph", "NOUN"), ("of", "ADP"), ("words", "NOUN")]);
        ex.load_sentences(vec![s, t]);
        ex.select_candidates(&SelectionOptions::default()).unwrap();

        let mut weights = FxHashMap::default();
        weights.insert("word".to_string(), 0.3);
        weights.insert("graph".to_string(), 0.2);
        weights.insert("words".to_string(), 0.1);
        ex.weight_by_words(&weights, false, false);

        let best = ex.get_n_best(3, true, true);
        let phrases: Vec<_> = best.iter().map(|(p, _)| p.as_str()).collect();
        // "graph" is inside "word graph"; "words" is not a whole-word match
        assert_eq!(phrases, vec!["word graph", "words"]);
    }

    #[test]
    fn test_contains_sequence() {
        let hay = strings(&["a", "b", "c"]);
        assert!(contains_sequence(&hay, &strings(&["b", "c"])));
        assert!(!contains_sequence(&hay, &strings(&["a", "c"])));
        assert!(!contains_sequence(&hay, &strings(&["a", "b", "c", "d"])));
    }

    #[test]
    fn test_reset() {
        let mut ex = extractor();
        ex.load_text(TEXT, WordNormalization::Stemming).unwrap();
        ex.select_candidates(&SelectionOptions::default()).unwrap();
        ex.reset();
        assert!(ex.sentences().is_empty());
        assert!(ex.candidates().is_empty());
    }

    #[test]
    fn test_selection_options_from_json() {
        let options = SelectionOptions::from_json(
            r#"{"strategy": {"grammar": null}, "filter": {"maximum_length": 3}}"#,
        )
        .unwrap();
        assert_eq!(options.strategy, SelectionStrategy::Grammar(None));
        assert_eq!(options.filter.unwrap().maximum_length, Some(3));
    }
}
