//! # keyrank
//!
//! Graph-based keyphrase extraction.
//!
//! This library ranks candidate phrases of an analysed document with
//! random walks over word or topic graphs. Five variants are provided:
//! TextRank, SingleRank, PositionRank, TopicRank and MultipartiteRank.
//!
//! ## Features
//!
//! - **Pluggable analysis**: tokenization, tagging and stemming come from a
//!   [`TextProcessor`](nlp::TextProcessor); tagged text and JSON readers ship
//!   with the crate
//! - **Chunk grammars**: regular-expression grammars over POS tags select
//!   noun phrases, with ezafe-aware defaults for Persian
//! - **Deterministic**: identical input and options give identical rankings
//!
//! ## Example
//!
//! ```
//! use keyrank::{KeyphraseModel, SingleRank};
//!
//! let text = "fast/ADJ graph/NOUN ranking/NOUN/rank helps/VERB\n\
//!             graph/NOUN ranking/NOUN/rank is/VERB simple/ADJ";
//! let mut model = SingleRank::new();
//! let best = model.extract(text, 2).unwrap();
//! assert_eq!(best.len(), 2);
//! ```

pub mod clustering;
pub mod errors;
pub mod extractor;
pub mod graph;
pub mod nlp;
pub mod pagerank;
pub mod phrase;
pub mod types;
pub mod variants;

// Re-export commonly used types
pub use errors::{KeyrankError, Result};
pub use types::{
    Candidate, CandidateSet, DistanceMetric, ExtractorConfig, LinkageMethod, Sentence,
    TopicHeuristic, WordNormalization,
};

// Re-export main functionality
pub use extractor::{Extractor, KeyphraseModel, SelectionOptions, SelectionStrategy};
pub use graph::{builder::GraphBuilder, csr::CsrGraph, word_graph::EdgeWeighting};
pub use nlp::{JsonProcessor, StopwordFilter, TaggedTextProcessor, TextProcessor};
pub use pagerank::{
    personalized::PersonalizedPageRank, standard::StandardPageRank, PageRankResult,
};
pub use phrase::{ChunkGrammar, FilterOptions};
pub use variants::{
    extract_keyphrases, MultipartiteRank, MultipartiteRankOptions, PositionRank,
    PositionRankOptions, SingleRank, SingleRankOptions, TextRank, TextRankOptions, TopicRank,
    TopicRankOptions, Variant,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
