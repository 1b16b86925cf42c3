//! Longest-sequence candidate selection
//!
//! Every maximal run of consecutive tokens whose key (POS tag or normalized
//! word) belongs to a valid set becomes one candidate occurrence. Runs never
//! cross sentence boundaries; a run reaching the end of a sentence is
//! flushed there.

use crate::types::{CandidateSet, Sentence};
use rustc_hash::FxHashSet;

/// Which token sequence the valid set is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceKey {
    /// Part-of-speech tags
    PosTags,
    /// Normalized words
    NormalizedWords,
}

impl SequenceKey {
    fn values<'a>(&self, sentence: &'a Sentence) -> &'a [String] {
        match self {
            SequenceKey::PosTags => &sentence.pos_tags,
            SequenceKey::NormalizedWords => &sentence.normalized_words,
        }
    }
}

/// Add one occurrence spanning `first..=last` of `sentence`
pub(crate) fn add_span(
    candidates: &mut CandidateSet,
    sentence: &Sentence,
    first: usize,
    last: usize,
    offset_shift: usize,
) {
    candidates.add_occurrence(
        &sentence.words[first..=last],
        &sentence.pos_tags[first..=last],
        offset_shift + first,
        &sentence.normalized_words[first..=last],
    );
}

/// Select the longest runs of valid values
pub fn select_longest_sequences(
    sentences: &[Sentence],
    key: SequenceKey,
    valid_values: &FxHashSet<String>,
    candidates: &mut CandidateSet,
) {
    let mut offset_shift = 0;

    for sentence in sentences {
        let mut run_start: Option<usize> = None;

        for (j, value) in key.values(sentence).iter().enumerate() {
            if valid_values.contains(value) {
                run_start.get_or_insert(j);
            } else if let Some(first) = run_start.take() {
                add_span(candidates, sentence, first, j - 1, offset_shift);
            }
        }

        if let Some(first) = run_start {
            add_span(candidates, sentence, first, sentence.len() - 1, offset_shift);
        }

        offset_shift += sentence.len();
    }
}

/// Select the longest runs of valid POS tags
pub fn select_longest_pos_sequences(
    sentences: &[Sentence],
    valid_pos_tags: &FxHashSet<String>,
    candidates: &mut CandidateSet,
) {
    select_longest_sequences(sentences, SequenceKey::PosTags, valid_pos_tags, candidates);
}

/// Select the longest runs of keywords (normalized words)
pub fn select_longest_keyword_sequences(
    sentences: &[Sentence],
    keywords: &FxHashSet<String>,
    candidates: &mut CandidateSet,
) {
    select_longest_sequences(sentences, SequenceKey::NormalizedWords, keywords, candidates);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> FxHashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn sentences() -> Vec<Sentence> {
        vec![
            Sentence::from_tagged([
                ("random", "ADJ"),
                ("walk", "NOUN"),
                ("on", "ADP"),
                ("word", "NOUN"),
                ("graph", "NOUN"),
            ]),
            Sentence::from_tagged([("the", "DET"), ("word", "NOUN"), ("graph", "NOUN")]),
        ]
    }

    #[test]
    fn test_longest_pos_runs() {
        let mut candidates = CandidateSet::new();
        select_longest_pos_sequences(&sentences(), &set(&["NOUN", "ADJ"]), &mut candidates);

        assert_eq!(candidates.keys(), vec!["random walk", "word graph"]);
        assert_eq!(candidates.get("random walk").unwrap().offsets, vec![0]);
        assert_eq!(candidates.get("word graph").unwrap().offsets, vec![3, 6]);
    }

    #[test]
    fn test_run_flushed_at_sentence_end() {
        let mut candidates = CandidateSet::new();
        let s = vec![
            Sentence::from_tagged([("alpha", "NOUN")]),
            Sentence::from_tagged([("beta", "NOUN")]),
        ];
        select_longest_pos_sequences(&s, &set(&["NOUN"]), &mut candidates);

        // no run may span the sentence boundary
        assert_eq!(candidates.keys(), vec!["alpha", "beta"]);
        assert_eq!(candidates.get("beta").unwrap().offsets, vec![1]);
    }

    #[test]
    fn test_keyword_runs() {
        let mut candidates = CandidateSet::new();
        select_longest_keyword_sequences(&sentences(), &set(&["walk", "graph"]), &mut candidates);

        assert_eq!(candidates.keys(), vec!["walk", "graph"]);
        assert_eq!(candidates.get("graph").unwrap().offsets, vec![4, 7]);
    }

    #[test]
    fn test_empty_valid_set_selects_nothing() {
        let mut candidates = CandidateSet::new();
        select_longest_pos_sequences(&sentences(), &FxHashSet::default(), &mut candidates);
        assert!(candidates.is_empty());
    }
}
