//! Candidate filtering
//!
//! Each predicate looks at the first occurrence of a candidate only; a
//! candidate failing any of them is removed entirely.

use crate::nlp::stopwords::{is_alphanumeric, is_punctuation_only, StopwordFilter};
use crate::types::{Candidate, CandidateSet};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Which filters to apply after candidate selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    /// Drop candidates containing a stopword
    pub use_stopwords: bool,
    /// Drop candidates carrying any of these POS tags
    pub invalid_pos_tags: FxHashSet<String>,
    /// Drop candidates containing a punctuation-only word
    pub drop_punctuation: bool,
    /// Minimum number of characters over all words
    pub minimum_characters: Option<usize>,
    /// Minimum number of characters of every word
    pub minimum_word_characters: Option<usize>,
    /// Maximum length in words
    pub maximum_length: Option<usize>,
    /// Drop words with characters that are neither alphanumeric nor valid marks
    pub alphanumeric_only: bool,
    /// Whitespace-separated marks allowed inside words
    pub valid_punctuation_marks: String,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            use_stopwords: true,
            invalid_pos_tags: FxHashSet::default(),
            drop_punctuation: true,
            minimum_characters: Some(3),
            minimum_word_characters: Some(2),
            maximum_length: Some(5),
            alphanumeric_only: true,
            valid_punctuation_marks: "-".to_string(),
        }
    }
}

impl FilterOptions {
    /// Create options with the default filters
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that only bound the candidate length
    pub fn maximum_length_only(maximum_length: usize) -> Self {
        Self {
            use_stopwords: false,
            invalid_pos_tags: FxHashSet::default(),
            drop_punctuation: false,
            minimum_characters: None,
            minimum_word_characters: None,
            maximum_length: Some(maximum_length),
            alphanumeric_only: false,
            valid_punctuation_marks: String::new(),
        }
    }

    /// Builder method: toggle stopword filtering
    pub fn with_stopwords(mut self, use_stopwords: bool) -> Self {
        self.use_stopwords = use_stopwords;
        self
    }

    /// Builder method: set blacklisted POS tags
    pub fn with_invalid_pos_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.invalid_pos_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method: set minimum characters
    pub fn with_minimum_characters(mut self, minimum: Option<usize>) -> Self {
        self.minimum_characters = minimum;
        self
    }

    /// Builder method: set minimum word characters
    pub fn with_minimum_word_characters(mut self, minimum: Option<usize>) -> Self {
        self.minimum_word_characters = minimum;
        self
    }

    /// Builder method: set maximum length
    pub fn with_maximum_length(mut self, maximum: Option<usize>) -> Self {
        self.maximum_length = maximum;
        self
    }

    /// Builder method: toggle the alphanumeric filter
    pub fn with_alphanumeric_only(mut self, alphanumeric_only: bool) -> Self {
        self.alphanumeric_only = alphanumeric_only;
        self
    }

    /// Builder method: set valid punctuation marks
    pub fn with_valid_punctuation_marks(mut self, marks: impl Into<String>) -> Self {
        self.valid_punctuation_marks = marks.into();
        self
    }

    /// Whether a candidate survives every enabled filter
    pub fn accepts(&self, candidate: &Candidate, stopwords: &StopwordFilter) -> bool {
        let words = candidate.first_words();

        if self.use_stopwords && words.iter().any(|w| stopwords.is_stopword(w)) {
            return false;
        }

        if candidate
            .first_pos_tags()
            .iter()
            .any(|t| self.invalid_pos_tags.contains(t))
        {
            return false;
        }

        if self.drop_punctuation && words.iter().any(|w| is_punctuation_only(w)) {
            return false;
        }

        if let Some(minimum) = self.minimum_characters {
            let total: usize = words.iter().map(|w| w.chars().count()).sum();
            if total < minimum {
                return false;
            }
        }

        if let Some(minimum) = self.minimum_word_characters {
            if words.iter().any(|w| w.chars().count() < minimum) {
                return false;
            }
        }

        if let Some(maximum) = self.maximum_length {
            if candidate.length() > maximum {
                return false;
            }
        }

        if self.alphanumeric_only
            && !words
                .iter()
                .all(|w| is_alphanumeric(w, &self.valid_punctuation_marks))
        {
            return false;
        }

        true
    }
}

/// Remove every candidate rejected by `options`
pub fn filter_candidates(
    candidates: &mut CandidateSet,
    options: &FilterOptions,
    stopwords: &StopwordFilter,
) {
    let before = candidates.len();
    candidates.retain(|c| options.accepts(c, stopwords));
    tracing::debug!(
        before,
        after = candidates.len(),
        "filtered candidates"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn add(set: &mut CandidateSet, words: &[&str], tags: &[&str], offset: usize) {
        let w = strings(words);
        set.add_occurrence(&w, &strings(tags), offset, &w);
    }

    fn survivors(options: &FilterOptions, stopwords: &StopwordFilter) -> Vec<String> {
        let mut set = CandidateSet::new();
        add(&mut set, &["keyphrase", "extraction"], &["NOUN", "NOUN"], 0);
        add(&mut set, &["the", "graph"], &["DET", "NOUN"], 3);
        add(&mut set, &["ab"], &["NOUN"], 6);
        add(&mut set, &["x", "ray"], &["NOUN", "NOUN"], 8);
        add(&mut set, &["!!"], &["PUNCT"], 10);
        add(&mut set, &["state-of-the-art"], &["ADJ"], 12);
        add(&mut set, &["c++"], &["NOUN"], 14);
        add(&mut set, &["a", "b", "c", "d", "e", "f"], &["NOUN"; 6], 16);
        filter_candidates(&mut set, options, stopwords);
        set.keys()
    }

    #[test]
    fn test_default_filters() {
        let stopwords = StopwordFilter::from_list(&["the"]);
        assert_eq!(
            survivors(&FilterOptions::default(), &stopwords),
            vec!["keyphrase extraction", "state-of-the-art"]
        );
    }

    #[test]
    fn test_maximum_length_only() {
        let stopwords = StopwordFilter::from_list(&["the"]);
        let kept = survivors(&FilterOptions::maximum_length_only(1), &stopwords);
        assert_eq!(kept, vec!["ab", "!!", "state-of-the-art", "c++"]);
    }

    #[test]
    fn test_invalid_pos_tags() {
        let options = FilterOptions::maximum_length_only(10).with_invalid_pos_tags(["DET", "PUNCT"]);
        let kept = survivors(&options, &StopwordFilter::empty());
        assert!(!kept.contains(&"the graph".to_string()));
        assert!(!kept.contains(&"!!".to_string()));
        assert!(kept.contains(&"x ray".to_string()));
    }

    #[test]
    fn test_valid_marks_extend_alphanumeric() {
        let options = FilterOptions::default().with_valid_punctuation_marks("- +");
        let kept = survivors(&options, &StopwordFilter::empty());
        assert!(kept.contains(&"c++".to_string()));
        assert!(kept.contains(&"the graph".to_string()));
    }

    #[test]
    fn test_only_first_occurrence_is_checked() {
        let mut set = CandidateSet::new();
        let norm = strings(&["graph"]);
        set.add_occurrence(&strings(&["graph"]), &strings(&["NOUN"]), 0, &norm);
        set.add_occurrence(&strings(&["g"]), &strings(&["NOUN"]), 5, &norm);
        filter_candidates(&mut set, &FilterOptions::default(), &StopwordFilter::empty());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_characters_counted_not_bytes() {
        let mut set = CandidateSet::new();
        // two Persian letters are four bytes
        add(&mut set, &["با"], &["NOUN"], 0);
        let options = FilterOptions::default().with_minimum_characters(Some(3));
        filter_candidates(&mut set, &options, &StopwordFilter::empty());
        assert!(set.is_empty());
    }
}
