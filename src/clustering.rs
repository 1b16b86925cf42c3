//! Shared clustering utilities for topic-based keyword extraction
//!
//! Used by TopicRank and MultipartiteRank to group keyphrase candidates
//! into topics: candidates become bag-of-words vectors, pairwise distances
//! feed a hierarchical agglomerative clustering (HAC), and the dendrogram
//! is cut at a distance threshold.
//!
//! The linkage follows the nearest-neighbour-chain algorithm; merges are
//! then ordered by distance and relabelled so that the merge at row `k`
//! creates cluster `n + k`.

use crate::types::{CandidateSet, DistanceMetric, LinkageMethod};
use rustc_hash::FxHashMap;

/// Candidates as count vectors over their normalized words
#[derive(Debug, Clone, Default)]
pub struct CandidateVectors {
    /// Canonical forms in lexicographic order
    pub keys: Vec<String>,
    /// One count vector per key
    pub rows: Vec<Vec<f64>>,
}

/// Vectorize candidates over the vocabulary of their normalized words.
///
/// Rows are sorted by canonical form so the clustering does not depend on
/// candidate insertion order.
pub fn vectorize_candidates(candidates: &CandidateSet) -> CandidateVectors {
    let mut vocabulary: FxHashMap<&str, usize> = FxHashMap::default();
    for candidate in candidates.iter() {
        for word in &candidate.normalized_words {
            let next = vocabulary.len();
            vocabulary.entry(word.as_str()).or_insert(next);
        }
    }

    let mut keys = candidates.keys();
    keys.sort();

    let rows = keys
        .iter()
        .map(|key| {
            let mut row = vec![0.0; vocabulary.len()];
            if let Some(candidate) = candidates.get(key) {
                for word in &candidate.normalized_words {
                    if let Some(&dim) = vocabulary.get(word.as_str()) {
                        row[dim] += 1.0;
                    }
                }
            }
            row
        })
        .collect();

    CandidateVectors { keys, rows }
}

/// Jaccard distance between two count vectors.
///
/// Counts are compared as values: a dimension where either vector is
/// nonzero disagrees when the counts differ, so "data" and "data data" are
/// at distance 1.
pub fn jaccard_distance(a: &[f64], b: &[f64]) -> f64 {
    let mut nonzero = 0usize;
    let mut unequal = 0usize;
    for (&x, &y) in a.iter().zip(b) {
        if x != 0.0 || y != 0.0 {
            nonzero += 1;
            if x != y {
                unequal += 1;
            }
        }
    }
    // 0/0 is NaN and gets normalized with the other distances
    unequal as f64 / nonzero as f64
}

/// Euclidean distance between two vectors
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Euclidean distance with every dimension scaled by its variance
pub fn standardized_euclidean_distance(a: &[f64], b: &[f64], variances: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .zip(variances)
        .map(|((x, y), v)| (x - y) * (x - y) / v)
        .sum::<f64>()
        .sqrt()
}

/// Sample variance (one delta degree of freedom) of every column
fn column_variances(rows: &[Vec<f64>]) -> Vec<f64> {
    let n = rows.len() as f64;
    let dims = rows.first().map_or(0, Vec::len);
    (0..dims)
        .map(|d| {
            let mean = rows.iter().map(|r| r[d]).sum::<f64>() / n;
            rows.iter().map(|r| (r[d] - mean).powi(2)).sum::<f64>() / (n - 1.0)
        })
        .collect()
}

/// Index of the pair `(i, j)`, `i != j`, in a condensed distance matrix
fn condensed_index(n: usize, i: usize, j: usize) -> usize {
    let (i, j) = if i < j { (i, j) } else { (j, i) };
    n * i - (i * (i + 1)) / 2 + (j - i - 1)
}

/// Condensed pairwise distances (row-major upper triangle).
///
/// NaN distances become 0 and infinite ones `f64::MAX`.
pub fn pairwise_distances(rows: &[Vec<f64>], metric: DistanceMetric) -> Vec<f64> {
    let n = rows.len();
    let variances = match metric {
        DistanceMetric::StandardizedEuclidean => column_variances(rows),
        _ => Vec::new(),
    };

    let mut distances = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            let d = match metric {
                DistanceMetric::Jaccard => jaccard_distance(&rows[i], &rows[j]),
                DistanceMetric::Euclidean => euclidean_distance(&rows[i], &rows[j]),
                DistanceMetric::StandardizedEuclidean => {
                    standardized_euclidean_distance(&rows[i], &rows[j], &variances)
                }
            };
            distances.push(if d.is_nan() {
                0.0
            } else if d.is_infinite() {
                f64::MAX
            } else {
                d
            });
        }
    }
    distances
}

/// One merge of the dendrogram
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Merge {
    /// Smaller cluster id
    pub left: usize,
    /// Larger cluster id
    pub right: usize,
    /// Linkage distance between the merged clusters
    pub distance: f64,
    /// Number of observations in the new cluster
    pub size: usize,
}

fn linkage_update(method: LinkageMethod, d_x: f64, d_y: f64, size_x: usize, size_y: usize) -> f64 {
    match method {
        LinkageMethod::Single => d_x.min(d_y),
        LinkageMethod::Complete => d_x.max(d_y),
        LinkageMethod::Average => {
            (size_x as f64 * d_x + size_y as f64 * d_y) / (size_x + size_y) as f64
        }
    }
}

struct LinkageUnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
    next_label: usize,
}

impl LinkageUnionFind {
    fn new(n: usize) -> Self {
        let total = 2 * n - 1;
        Self {
            parent: (0..total).collect(),
            size: vec![1; total],
            next_label: n,
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        while self.parent[x] != root {
            let next = self.parent[x];
            self.parent[x] = root;
            x = next;
        }
        root
    }

    fn merge(&mut self, x: usize, y: usize) -> usize {
        let label = self.next_label;
        self.parent[x] = label;
        self.parent[y] = label;
        self.size[label] = self.size[x] + self.size[y];
        self.next_label += 1;
        self.size[label]
    }
}

/// Hierarchical clustering of `n` observations from condensed distances.
///
/// Returns `n - 1` merges sorted by distance (stable); the merge at row `k`
/// creates cluster id `n + k`.
pub fn linkage(distances: &[f64], n: usize, method: LinkageMethod) -> Vec<Merge> {
    if n < 2 {
        return Vec::new();
    }

    let mut d = distances.to_vec();
    let mut size = vec![1usize; n];
    let mut chain: Vec<usize> = Vec::with_capacity(n);
    let mut merges: Vec<Merge> = Vec::with_capacity(n - 1);

    for _ in 0..n - 1 {
        if chain.is_empty() {
            if let Some(first) = (0..n).find(|&i| size[i] > 0) {
                chain.push(first);
            }
        }

        // Follow nearest neighbours until two clusters are mutual neighbours
        let (x, y, current_min) = loop {
            let x = chain[chain.len() - 1];
            let previous = chain.len().checked_sub(2).map(|p| chain[p]);
            let (mut y, mut current_min) = match previous {
                Some(p) => (p, d[condensed_index(n, x, p)]),
                None => (x, f64::INFINITY),
            };

            for i in 0..n {
                if size[i] == 0 || i == x {
                    continue;
                }
                let dist = d[condensed_index(n, x, i)];
                if dist < current_min {
                    current_min = dist;
                    y = i;
                }
            }

            if previous == Some(y) {
                break (x, y, current_min);
            }
            chain.push(y);
        };

        chain.truncate(chain.len() - 2);

        let (x, y) = if x > y { (y, x) } else { (x, y) };
        let (size_x, size_y) = (size[x], size[y]);
        merges.push(Merge {
            left: x,
            right: y,
            distance: current_min,
            size: size_x + size_y,
        });

        size[x] = 0;
        size[y] = size_x + size_y;

        for i in 0..n {
            if size[i] == 0 || i == y {
                continue;
            }
            let d_x = d[condensed_index(n, i, x)];
            let d_y = d[condensed_index(n, i, y)];
            d[condensed_index(n, i, y)] = linkage_update(method, d_x, d_y, size_x, size_y);
        }
    }

    merges.sort_by(|a, b| a.distance.total_cmp(&b.distance));

    // Relabel merges with the ids of the clusters they join
    let mut uf = LinkageUnionFind::new(n);
    for merge in merges.iter_mut() {
        let x_root = uf.find(merge.left);
        let y_root = uf.find(merge.right);
        (merge.left, merge.right) = if x_root < y_root {
            (x_root, y_root)
        } else {
            (y_root, x_root)
        };
        merge.size = uf.merge(x_root, y_root);
    }

    merges
}

/// Flat clusters from a dendrogram cut at a cophenetic distance.
///
/// Returns a 1-based cluster number per observation, numbered in the
/// depth-first order of the dendrogram walk from the root.
pub fn flat_clusters(merges: &[Merge], n: usize, threshold: f64) -> Vec<usize> {
    let mut labels = vec![0usize; n];
    if n == 0 {
        return labels;
    }
    if n == 1 || merges.len() + 1 != n {
        labels.iter_mut().enumerate().for_each(|(i, l)| *l = i + 1);
        return labels;
    }

    // Largest merge distance within each subtree
    let mut max_dist = vec![0.0f64; merges.len()];
    for (k, merge) in merges.iter().enumerate() {
        let mut m = merge.distance;
        for child in [merge.left, merge.right] {
            if child >= n {
                m = m.max(max_dist[child - n]);
            }
        }
        max_dist[k] = m;
    }

    let mut visited = vec![false; 2 * n - 1];
    let mut stack = vec![2 * n - 2];
    let mut n_cluster = 0usize;
    let mut leader: Option<usize> = None;

    while let Some(&node) = stack.last() {
        let root = node - n;
        let Merge { left, right, .. } = merges[root];

        if leader.is_none() && max_dist[root] <= threshold {
            leader = Some(root);
            n_cluster += 1;
        }

        if left >= n && !visited[left] {
            visited[left] = true;
            stack.push(left);
            continue;
        }
        if right >= n && !visited[right] {
            visited[right] = true;
            stack.push(right);
            continue;
        }

        for child in [left, right] {
            if child < n {
                if leader.is_none() {
                    n_cluster += 1;
                }
                labels[child] = n_cluster;
            }
        }

        if leader == Some(root) {
            leader = None;
        }
        stack.pop();
    }

    labels
}

/// Group candidates into topics.
///
/// Each topic lists canonical forms in lexicographic order; topics follow
/// the flat-cluster numbering. A single candidate forms one topic without
/// any clustering.
pub fn cluster_topics(
    candidates: &CandidateSet,
    threshold: f64,
    metric: DistanceMetric,
    method: LinkageMethod,
) -> Vec<Vec<String>> {
    match candidates.len() {
        0 => return Vec::new(),
        1 => return vec![candidates.keys()],
        _ => {}
    }

    let vectors = vectorize_candidates(candidates);
    let n = vectors.keys.len();
    let distances = pairwise_distances(&vectors.rows, metric);
    let merges = linkage(&distances, n, method);
    let labels = flat_clusters(&merges, n, threshold);

    let count = labels.iter().copied().max().unwrap_or(0);
    let mut topics: Vec<Vec<String>> = vec![Vec::new(); count];
    for (key, &label) in vectors.keys.into_iter().zip(&labels) {
        topics[label - 1].push(key);
    }

    tracing::debug!(
        candidates = n,
        topics = topics.len(),
        threshold,
        ?metric,
        ?method,
        "clustered candidates into topics"
    );
    topics
}
