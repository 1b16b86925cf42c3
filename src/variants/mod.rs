//! Keyphrase ranking variants
//!
//! Each variant wraps the shared [`Extractor`](crate::extractor::Extractor)
//! and supplies its own selection defaults and weighting:
//! - TextRank: unweighted word graph, window of 2
//! - SingleRank: co-occurrence weighted word graph, window of 10
//! - PositionRank: SingleRank graph with a walk biased towards early words
//! - TopicRank: clustered candidates ranked on a complete topic graph
//! - MultipartiteRank: candidates ranked on a directed multipartite graph

pub mod multipartite_rank;
pub mod position_rank;
pub mod single_rank;
pub mod text_rank;
pub mod topic_rank;
pub mod word_rank;

use crate::errors::Result;
use crate::extractor::KeyphraseModel;
use serde::{Deserialize, Serialize};

pub use multipartite_rank::{MultipartiteRank, MultipartiteRankOptions};
pub use position_rank::{PositionRank, PositionRankOptions};
pub use single_rank::{SingleRank, SingleRankOptions};
pub use text_rank::{TextRank, TextRankOptions};
pub use topic_rank::{TopicRank, TopicRankOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    #[default]
    TextRank,
    SingleRank,
    PositionRank,
    TopicRank,
    MultipartiteRank,
}

impl Variant {
    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "textrank" | "text_rank" | "base" => Variant::TextRank,
            "single_rank" | "singlerank" | "single" => Variant::SingleRank,
            "position_rank" | "positionrank" | "position" => Variant::PositionRank,
            "topic_rank" | "topicrank" | "topic" => Variant::TopicRank,
            "multipartite_rank" | "multipartiterank" | "multipartite" => {
                Variant::MultipartiteRank
            }
            _ => Variant::TextRank,
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Variant::TextRank => "TextRank",
            Variant::SingleRank => "SingleRank",
            Variant::PositionRank => "PositionRank",
            Variant::TopicRank => "TopicRank",
            Variant::MultipartiteRank => "MultipartiteRank",
        }
    }
}

impl std::str::FromStr for Variant {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Variant::parse(value))
    }
}

/// Extract the `n` best keyphrases from tagged text with a variant's defaults
pub fn extract_keyphrases(variant: Variant, input: &str, n: usize) -> Result<Vec<(String, f64)>> {
    match variant {
        Variant::TextRank => TextRank::new().extract(input, n),
        Variant::SingleRank => SingleRank::new().extract(input, n),
        Variant::PositionRank => PositionRank::new().extract(input, n),
        Variant::TopicRank => TopicRank::new().extract(input, n),
        Variant::MultipartiteRank => MultipartiteRank::new().extract(input, n),
    }
}
