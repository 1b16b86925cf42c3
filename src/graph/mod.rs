//! Graph construction and representation
//!
//! This module provides a mutable builder for incremental construction, the
//! CSR form consumed by PageRank, and the word, topic and multipartite graph
//! constructions used by the ranking variants.

pub mod builder;
pub mod csr;
pub mod topic_graph;
pub mod word_graph;

pub use builder::GraphBuilder;
pub use csr::CsrGraph;
pub use word_graph::EdgeWeighting;
