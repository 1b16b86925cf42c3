//! Core types for keyrank
//!
//! This module defines the text model shared by every ranking variant:
//! processed sentences, keyphrase candidates and the insertion-ordered
//! candidate store, plus the option enums and the extractor configuration.

use crate::errors::{KeyrankError, Result};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

// ============================================================================
// Sentence
// ============================================================================

/// A processed sentence: parallel sequences of surface words, POS tags and
/// normalized (stemmed, lemmatized or surface) words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// Surface tokens
    pub words: Vec<String>,
    /// Part-of-speech tag per token
    pub pos_tags: Vec<String>,
    /// Normalized form per token
    pub normalized_words: Vec<String>,
}

impl Sentence {
    /// Create a sentence, checking that the three sequences line up
    pub fn new(
        words: Vec<String>,
        pos_tags: Vec<String>,
        normalized_words: Vec<String>,
    ) -> Result<Self> {
        if words.len() != pos_tags.len() || words.len() != normalized_words.len() {
            return Err(KeyrankError::invalid_input(format!(
                "sentence has {} words, {} tags and {} normalized words",
                words.len(),
                pos_tags.len(),
                normalized_words.len()
            )));
        }
        Ok(Self {
            words,
            pos_tags,
            normalized_words,
        })
    }

    /// Build a sentence from `(word, tag)` pairs, using the surface words as
    /// normalized forms
    pub fn from_tagged<'a, I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut sentence = Self {
            words: Vec::new(),
            pos_tags: Vec::new(),
            normalized_words: Vec::new(),
        };
        for (word, tag) in tokens {
            sentence.words.push(word.to_string());
            sentence.pos_tags.push(tag.to_string());
            sentence.normalized_words.push(word.to_string());
        }
        sentence
    }

    /// Number of tokens in the sentence
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the sentence has no tokens
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

// ============================================================================
// Candidate
// ============================================================================

/// A distinct keyphrase type identified by its canonical form.
///
/// Occurrences are stored as three parallel lists; `offsets` holds the
/// document-wide index of the first token of each occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Surface words of each occurrence
    pub all_words: Vec<Vec<String>>,
    /// POS tags of each occurrence
    pub all_pos_tags: Vec<Vec<String>>,
    /// Document offset of each occurrence
    pub offsets: Vec<usize>,
    /// Normalized words shared by every occurrence
    pub normalized_words: Vec<String>,
    /// Weight assigned by the ranking step
    pub weight: f64,
    /// Whether the ranking step assigned a weight
    pub weighted: bool,
}

impl Candidate {
    fn new(normalized_words: Vec<String>) -> Self {
        Self {
            all_words: Vec::new(),
            all_pos_tags: Vec::new(),
            offsets: Vec::new(),
            normalized_words,
            weight: 0.0,
            weighted: false,
        }
    }

    /// Length of the candidate in words
    pub fn length(&self) -> usize {
        self.normalized_words.len()
    }

    /// Normalized words joined by a single space
    pub fn canonical_form(&self) -> String {
        self.normalized_words.join(" ")
    }

    /// Offset of the first occurrence
    pub fn first_offset(&self) -> usize {
        self.offsets.first().copied().unwrap_or(0)
    }

    /// Surface words of the first occurrence
    pub fn first_words(&self) -> &[String] {
        self.all_words.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// POS tags of the first occurrence
    pub fn first_pos_tags(&self) -> &[String] {
        self.all_pos_tags.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of occurrences in the document
    pub fn frequency(&self) -> usize {
        self.offsets.len()
    }

    /// Assign the ranking weight
    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
        self.weighted = true;
    }

    fn clear_weight(&mut self) {
        self.weight = 0.0;
        self.weighted = false;
    }
}

// ============================================================================
// Candidate Set
// ============================================================================

/// Insertion-ordered map from canonical form to candidate.
///
/// Iteration follows first insertion, which is also the tie-break order of
/// the best-N selection.
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    entries: Vec<Candidate>,
    index: FxHashMap<String, usize>,
}

impl CandidateSet {
    /// Create an empty candidate set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence, creating the candidate on first sight
    pub fn add_occurrence(
        &mut self,
        words: &[String],
        pos_tags: &[String],
        offset: usize,
        normalized_words: &[String],
    ) {
        let key = normalized_words.join(" ");
        let idx = match self.index.get(&key) {
            Some(&idx) => idx,
            None => {
                let idx = self.entries.len();
                self.entries.push(Candidate::new(normalized_words.to_vec()));
                self.index.insert(key, idx);
                idx
            }
        };

        let candidate = &mut self.entries[idx];
        candidate.all_words.push(words.to_vec());
        candidate.all_pos_tags.push(pos_tags.to_vec());
        candidate.offsets.push(offset);
    }

    /// Look up a candidate by canonical form
    pub fn get(&self, canonical_form: &str) -> Option<&Candidate> {
        self.index.get(canonical_form).map(|&i| &self.entries[i])
    }

    /// Look up a candidate mutably by canonical form
    pub fn get_mut(&mut self, canonical_form: &str) -> Option<&mut Candidate> {
        match self.index.get(canonical_form) {
            Some(&i) => self.entries.get_mut(i),
            None => None,
        }
    }

    /// Iterate candidates in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.entries.iter()
    }

    /// Iterate candidates mutably in insertion order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Candidate> {
        self.entries.iter_mut()
    }

    /// Canonical forms in insertion order
    pub fn keys(&self) -> Vec<String> {
        self.entries.iter().map(Candidate::canonical_form).collect()
    }

    /// Keep only candidates matching the predicate.
    ///
    /// Survivors are collected in one pass and the index is rebuilt, so
    /// insertion order is preserved.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&Candidate) -> bool,
    {
        let survivors: Vec<Candidate> = std::mem::take(&mut self.entries)
            .into_iter()
            .filter(|c| keep(c))
            .collect();

        self.index.clear();
        for (i, candidate) in survivors.iter().enumerate() {
            self.index.insert(candidate.canonical_form(), i);
        }
        self.entries = survivors;
    }

    /// Reset every weight to the unweighted state
    pub fn clear_weights(&mut self) {
        self.entries.iter_mut().for_each(Candidate::clear_weight);
    }

    /// Number of candidates
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every candidate
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }
}

// ============================================================================
// Word Normalization
// ============================================================================

/// How the text processor fills the normalized word sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordNormalization {
    /// Stems (default)
    #[default]
    Stemming,
    /// Lemmas
    Lemmatization,
    /// Surface words unchanged
    None,
}

impl WordNormalization {
    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "lemmatization" | "lemma" | "lemmas" => WordNormalization::Lemmatization,
            "none" | "surface" | "off" => WordNormalization::None,
            _ => WordNormalization::Stemming,
        }
    }
}

impl std::str::FromStr for WordNormalization {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Ok(WordNormalization::parse(value))
    }
}

// ============================================================================
// Topic Options
// ============================================================================

/// Which member of a topic receives the topic's weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicHeuristic {
    /// The member occurring first in the document
    #[default]
    FirstOccurring,
    /// The member with most occurrences, earliest first on ties
    Frequent,
}

impl TopicHeuristic {
    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "frequent" | "most_frequent" => TopicHeuristic::Frequent,
            _ => TopicHeuristic::FirstOccurring,
        }
    }
}

impl std::str::FromStr for TopicHeuristic {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Ok(TopicHeuristic::parse(value))
    }
}

/// Linkage rule of the agglomerative clustering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkageMethod {
    /// Minimum pairwise distance
    Single,
    /// Maximum pairwise distance
    Complete,
    /// Mean pairwise distance (default)
    #[default]
    Average,
}

impl LinkageMethod {
    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "single" | "min" => LinkageMethod::Single,
            "complete" | "max" => LinkageMethod::Complete,
            _ => LinkageMethod::Average,
        }
    }
}

impl std::str::FromStr for LinkageMethod {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Ok(LinkageMethod::parse(value))
    }
}

/// Pairwise dissimilarity between candidate vectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Jaccard distance over presence vectors (default)
    #[default]
    Jaccard,
    /// Euclidean distance over count vectors
    Euclidean,
    /// Euclidean distance scaled by per-dimension variance
    StandardizedEuclidean,
}

impl DistanceMetric {
    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "euclidean" => DistanceMetric::Euclidean,
            "seuclidean" | "standardized_euclidean" | "standardized-euclidean" => {
                DistanceMetric::StandardizedEuclidean
            }
            _ => DistanceMetric::Jaccard,
        }
    }
}

impl std::str::FromStr for DistanceMetric {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Ok(DistanceMetric::parse(value))
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Construction-time configuration shared by every extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// POS tags a candidate word may carry
    pub valid_pos_tags: FxHashSet<String>,
    /// Language of the built-in stopword list
    pub language: String,
    /// Stopwords added to the built-in list
    pub extra_stopwords: Vec<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            valid_pos_tags: ["NOUN", "ADJ"].iter().map(|t| t.to_string()).collect(),
            language: "fa".to_string(),
            extra_stopwords: Vec::new(),
        }
    }
}

impl ExtractorConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.valid_pos_tags.is_empty() {
            return Err(KeyrankError::invalid_config(
                "valid_pos_tags must not be empty",
            ));
        }

        if self.valid_pos_tags.iter().any(|t| t.trim().is_empty()) {
            return Err(KeyrankError::invalid_config(
                "valid_pos_tags must not contain blank tags",
            ));
        }

        Ok(())
    }

    /// Builder method: set valid POS tags
    pub fn with_valid_pos_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.valid_pos_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method: set stopword language
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Builder method: add stopwords
    pub fn with_extra_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_stopwords.extend(words.into_iter().map(Into::into));
        self
    }
}
