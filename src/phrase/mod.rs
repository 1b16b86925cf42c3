//! Candidate selection and filtering
//!
//! Candidates are selected either as longest runs of valid values or as
//! noun-phrase chunks of a tag grammar, then pruned by [`FilterOptions`].

pub mod filter;
pub mod grammar;
pub mod selection;

pub use filter::{filter_candidates, FilterOptions};
pub use grammar::{select_with_grammar, ChunkGrammar, DEFAULT_GRAMMAR};
pub use selection::{
    select_longest_keyword_sequences, select_longest_pos_sequences, SequenceKey,
};
