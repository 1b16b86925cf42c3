//! Graph builder with efficient edge handling
//!
//! This module provides a mutable graph builder that uses FxHashMap
//! for O(1) edge lookups during construction. Node ids follow first
//! insertion order.

use rustc_hash::FxHashMap;

/// A node in the graph builder
#[derive(Debug, Clone)]
pub struct BuilderNode {
    /// The label for this node (a word, topic index or canonical form)
    pub label: String,
    /// Adjacency list: target node ID -> edge weight
    pub edges: FxHashMap<u32, f64>,
}

impl BuilderNode {
    /// Create a new node
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            edges: FxHashMap::default(),
        }
    }
}

/// A mutable graph builder optimized for incremental construction
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    /// Maps label -> node ID
    label_to_id: FxHashMap<String, u32>,
    /// Node storage
    nodes: Vec<BuilderNode>,
    /// Whether edges are one-way
    directed: bool,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    /// Create a new empty undirected graph builder
    pub fn new() -> Self {
        Self {
            label_to_id: FxHashMap::default(),
            nodes: Vec::new(),
            directed: false,
        }
    }

    /// Create a new empty directed graph builder
    pub fn new_directed() -> Self {
        Self {
            directed: true,
            ..Self::new()
        }
    }

    /// Create an undirected graph builder with pre-allocated capacity
    pub fn with_capacity(node_capacity: usize) -> Self {
        Self {
            label_to_id: FxHashMap::with_capacity_and_hasher(node_capacity, Default::default()),
            nodes: Vec::with_capacity(node_capacity),
            directed: false,
        }
    }

    /// Whether edges are one-way
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Get or create a node for the given label, returning its ID
    pub fn get_or_create_node(&mut self, label: &str) -> u32 {
        if let Some(&id) = self.label_to_id.get(label) {
            return id;
        }

        let id = self.nodes.len() as u32;
        self.label_to_id.insert(label.to_string(), id);
        self.nodes.push(BuilderNode::new(label));
        id
    }

    /// Increment the edge weight between two nodes
    ///
    /// If the edge doesn't exist, it's created with the given weight.
    /// If it exists, the weight is added to the existing weight.
    /// Undirected builders update both directions.
    pub fn increment_edge(&mut self, from: u32, to: u32, weight: f64) {
        if from == to {
            return; // No self-loops
        }

        if let Some(node) = self.nodes.get_mut(from as usize) {
            *node.edges.entry(to).or_insert(0.0) += weight;
        }
        if !self.directed {
            if let Some(node) = self.nodes.get_mut(to as usize) {
                *node.edges.entry(from).or_insert(0.0) += weight;
            }
        }
    }

    /// Set the edge weight between two nodes (binary/unweighted mode)
    ///
    /// If the edge doesn't exist, it's created with the given weight.
    /// If it exists, the weight is NOT modified (edge already exists).
    pub fn set_edge(&mut self, from: u32, to: u32, weight: f64) {
        if from == to {
            return; // No self-loops
        }

        if let Some(node) = self.nodes.get_mut(from as usize) {
            node.edges.entry(to).or_insert(weight);
        }
        if !self.directed {
            if let Some(node) = self.nodes.get_mut(to as usize) {
                node.edges.entry(from).or_insert(weight);
            }
        }
    }

    /// Weight of the edge `from -> to`, if present
    pub fn edge_weight(&self, from: u32, to: u32) -> Option<f64> {
        self.nodes
            .get(from as usize)
            .and_then(|n| n.edges.get(&to).copied())
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the total number of edges (undirected edges counted once)
    pub fn edge_count(&self) -> usize {
        let entries = self.nodes.iter().map(|n| n.edges.len()).sum::<usize>();
        if self.directed {
            entries
        } else {
            entries / 2
        }
    }

    /// Get a node by ID
    pub fn get_node(&self, id: u32) -> Option<&BuilderNode> {
        self.nodes.get(id as usize)
    }

    /// Get a node ID by label
    pub fn get_node_id(&self, label: &str) -> Option<u32> {
        self.label_to_id.get(label).copied()
    }

    /// Get the label for a node ID
    pub fn get_label(&self, id: u32) -> Option<&str> {
        self.nodes.get(id as usize).map(|n| n.label.as_str())
    }

    /// Iterate over all nodes
    pub fn nodes(&self) -> impl Iterator<Item = (u32, &BuilderNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (i as u32, n))
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
