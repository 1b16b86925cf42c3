//! Text processing collaborators
//!
//! Tokenization, tagging and stemming happen outside this crate. The
//! `TextProcessor` trait is the seam where an analyser plugs in; the
//! processors here consume text that has already been analysed.

pub mod json;
pub mod reader;
pub mod stopwords;
pub mod tagged;

pub use json::JsonProcessor;
pub use reader::{read_file, read_input, TextProcessor};
pub use stopwords::StopwordFilter;
pub use tagged::TaggedTextProcessor;
