//! Frozen adjacency for the random walk
//!
//! A [`GraphBuilder`] is flattened once per ranking run into row-compressed
//! arrays: the out-edges of node `i` live at `offsets[i]..offsets[i + 1]`.

use super::builder::GraphBuilder;

/// Read-only word, topic or candidate graph in compressed row form
#[derive(Debug, Clone)]
pub struct CsrGraph {
    /// Number of nodes
    pub num_nodes: usize,
    /// Node labels, indexed by node id
    pub labels: Vec<String>,
    offsets: Vec<usize>,
    targets: Vec<u32>,
    weights: Vec<f64>,
}

impl CsrGraph {
    /// Freeze a builder. Out-edges are ordered by target id so every walk
    /// visits them in the same order.
    pub fn from_builder(builder: &GraphBuilder) -> Self {
        let mut graph = Self {
            num_nodes: builder.node_count(),
            labels: Vec::with_capacity(builder.node_count()),
            offsets: vec![0],
            targets: Vec::new(),
            weights: Vec::new(),
        };

        for (_, node) in builder.nodes() {
            graph.labels.push(node.label.clone());

            let mut edges: Vec<(u32, f64)> = node.edges.iter().map(|(&t, &w)| (t, w)).collect();
            edges.sort_unstable_by_key(|&(target, _)| target);
            for (target, weight) in edges {
                graph.targets.push(target);
                graph.weights.push(weight);
            }
            graph.offsets.push(graph.targets.len());
        }

        graph
    }

    /// Out-edges of a node as `(target, weight)`
    pub fn neighbors(&self, node: u32) -> impl Iterator<Item = (u32, f64)> + '_ {
        let row = self.offsets[node as usize]..self.offsets[node as usize + 1];
        self.targets[row.clone()]
            .iter()
            .copied()
            .zip(self.weights[row].iter().copied())
    }

    /// Number of out-edges of a node
    pub fn degree(&self, node: u32) -> usize {
        self.offsets[node as usize + 1] - self.offsets[node as usize]
    }

    /// Mass each node sends along its out-edges: summed edge weights, or the
    /// out-degree when weights are ignored. Zero marks a dangling node.
    pub fn outflow(&self, weighted: bool) -> Vec<f64> {
        (0..self.num_nodes as u32)
            .map(|node| {
                if weighted {
                    self.neighbors(node).map(|(_, w)| w).sum()
                } else {
                    self.degree(node) as f64
                }
            })
            .collect()
    }

    /// Label of a node
    pub fn label(&self, node: u32) -> &str {
        &self.labels[node as usize]
    }

    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }

    /// Stored directed edges; an undirected edge counts twice
    pub fn num_edges(&self) -> usize {
        self.targets.len()
    }
}

impl Default for CsrGraph {
    fn default() -> Self {
        Self::from_builder(&GraphBuilder::new())
    }
}
