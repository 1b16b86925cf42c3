//! Word co-occurrence graphs
//!
//! Nodes are normalized words whose POS tag is valid. The document is
//! flattened into one token sequence, so windows cross sentence boundaries.

use super::builder::GraphBuilder;
use crate::types::Sentence;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// How co-occurrences translate into edge weights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeWeighting {
    /// Edge presence only (weight 1)
    Unweighted,
    /// One unit of weight per co-occurrence
    #[default]
    CoOccurrence,
}

/// Flatten sentences into `(normalized word, is valid)` pairs
fn flatten<'a>(
    sentences: &'a [Sentence],
    valid_pos_tags: &FxHashSet<String>,
) -> Vec<(&'a str, bool)> {
    sentences
        .iter()
        .flat_map(|s| {
            s.normalized_words
                .iter()
                .zip(&s.pos_tags)
                .map(|(w, t)| (w.as_str(), valid_pos_tags.contains(t)))
        })
        .collect()
}

/// Build the co-occurrence graph over valid words.
///
/// A valid word at position `i` is linked to every valid, different word at
/// positions `i+1 .. i+window_size` (exclusive). Every valid word gets a node,
/// even when it ends up isolated.
pub fn build_word_graph(
    sentences: &[Sentence],
    valid_pos_tags: &FxHashSet<String>,
    window_size: usize,
    weighting: EdgeWeighting,
) -> GraphBuilder {
    let tokens = flatten(sentences, valid_pos_tags);
    let mut builder = GraphBuilder::new();

    for &(word, valid) in &tokens {
        if valid {
            builder.get_or_create_node(word);
        }
    }

    for (i, &(word, valid)) in tokens.iter().enumerate() {
        if !valid {
            continue;
        }
        let end = i.saturating_add(window_size).min(tokens.len());
        for &(other, other_valid) in tokens.iter().take(end).skip(i + 1) {
            if !other_valid || other == word {
                continue;
            }
            // Both nodes exist from the first pass
            let (Some(a), Some(b)) = (builder.get_node_id(word), builder.get_node_id(other))
            else {
                continue;
            };
            match weighting {
                EdgeWeighting::Unweighted => builder.set_edge(a, b, 1.0),
                EdgeWeighting::CoOccurrence => builder.increment_edge(a, b, 1.0),
            }
        }
    }

    tracing::debug!(
        nodes = builder.node_count(),
        edges = builder.edge_count(),
        window_size,
        "built word graph"
    );
    builder
}

/// Sum of `1 / (position + 1)` over every occurrence of each valid word.
///
/// Positions are document-wide token indices.
pub fn inverse_position_sums(
    sentences: &[Sentence],
    valid_pos_tags: &FxHashSet<String>,
) -> FxHashMap<String, f64> {
    let mut sums: FxHashMap<String, f64> = FxHashMap::default();
    for (position, (word, valid)) in flatten(sentences, valid_pos_tags).into_iter().enumerate() {
        if valid {
            *sums.entry(word.to_string()).or_insert(0.0) += 1.0 / (position as f64 + 1.0);
        }
    }
    sums
}
