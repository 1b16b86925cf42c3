//! Topic and multipartite candidate graphs
//!
//! Both graphs weigh a pair of candidates by their positional proximity:
//! every pair of occurrences contributes `1 / gap`, the gap measuring from
//! the end of the earlier occurrence to the start of the later one.

use super::builder::GraphBuilder;
use crate::types::{Candidate, CandidateSet, TopicHeuristic};
use rustc_hash::FxHashMap;

/// Positional gap between two occurrences, floored at 1.
///
/// `first_offset`/`first_len` describe one occurrence and
/// `second_offset`/`second_len` the other, in either order.
pub fn occurrence_gap(
    first_offset: usize,
    first_len: usize,
    second_offset: usize,
    second_len: usize,
) -> usize {
    let raw = first_offset.abs_diff(second_offset);
    let span_adjust = if first_offset < second_offset {
        first_len.saturating_sub(1)
    } else if first_offset > second_offset {
        second_len.saturating_sub(1)
    } else {
        0
    };
    raw.saturating_sub(span_adjust).max(1)
}

/// Sum of `1 / gap` over every pair of occurrences of two candidates
pub fn candidate_pair_weight(a: &Candidate, b: &Candidate) -> f64 {
    let mut weight = 0.0;
    for &p_a in &a.offsets {
        for &p_b in &b.offsets {
            weight += 1.0 / occurrence_gap(p_a, a.length(), p_b, b.length()) as f64;
        }
    }
    weight
}

fn members<'a>(candidates: &'a CandidateSet, topic: &'a [String]) -> Vec<&'a Candidate> {
    topic.iter().filter_map(|c| candidates.get(c)).collect()
}

/// Build the complete undirected topic graph.
///
/// Node `i` is labelled with the topic index. Every pair of topics is
/// connected, even when the accumulated weight is zero.
pub fn build_topic_graph(candidates: &CandidateSet, topics: &[Vec<String>]) -> GraphBuilder {
    let mut builder = GraphBuilder::with_capacity(topics.len());
    for i in 0..topics.len() {
        builder.get_or_create_node(&i.to_string());
    }

    let resolved: Vec<Vec<&Candidate>> = topics.iter().map(|t| members(candidates, t)).collect();

    for i in 0..resolved.len() {
        for j in (i + 1)..resolved.len() {
            let mut weight = 0.0;
            for c_i in &resolved[i] {
                for c_j in &resolved[j] {
                    weight += candidate_pair_weight(c_i, c_j);
                }
            }
            builder.increment_edge(i as u32, j as u32, weight);
        }
    }

    tracing::debug!(
        topics = topics.len(),
        edges = builder.edge_count(),
        "built topic graph"
    );
    builder
}

/// Build the directed multipartite graph over candidates.
///
/// Nodes follow candidate-set order. Candidates of different topics are
/// linked in both directions with the same weight; members of one topic are
/// never linked.
pub fn build_multipartite_graph(candidates: &CandidateSet, topics: &[Vec<String>]) -> GraphBuilder {
    let topic_of: FxHashMap<&str, usize> = topics
        .iter()
        .enumerate()
        .flat_map(|(t, members)| members.iter().map(move |c| (c.as_str(), t)))
        .collect();

    let mut builder = GraphBuilder::new_directed();
    let keys = candidates.keys();
    for key in &keys {
        builder.get_or_create_node(key);
    }

    let all: Vec<&Candidate> = candidates.iter().collect();
    for i in 0..all.len() {
        for j in (i + 1)..all.len() {
            let same_topic = match (topic_of.get(keys[i].as_str()), topic_of.get(keys[j].as_str())) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            };
            if same_topic {
                continue;
            }
            let weight = candidate_pair_weight(all[i], all[j]);
            builder.increment_edge(i as u32, j as u32, weight);
            builder.increment_edge(j as u32, i as u32, weight);
        }
    }

    tracing::debug!(
        nodes = builder.node_count(),
        edges = builder.edge_count(),
        "built multipartite graph"
    );
    builder
}

/// Member of a topic occurring first in the document; the first member in
/// topic order wins ties.
fn first_occurring<'a>(candidates: &CandidateSet, topic: &'a [String]) -> Option<&'a String> {
    let mut best: Option<(&String, usize)> = None;
    for key in topic {
        let Some(candidate) = candidates.get(key) else {
            continue;
        };
        let offset = candidate.first_offset();
        if best.map_or(true, |(_, o)| offset < o) {
            best = Some((key, offset));
        }
    }
    best.map(|(key, _)| key)
}

/// Pick the member of a topic that carries the topic's weight
pub fn select_representative<'a>(
    candidates: &CandidateSet,
    topic: &'a [String],
    heuristic: TopicHeuristic,
) -> Option<&'a String> {
    match heuristic {
        TopicHeuristic::FirstOccurring => first_occurring(candidates, topic),
        TopicHeuristic::Frequent => {
            let mut best: Option<(&String, usize, usize)> = None;
            for key in topic {
                let Some(candidate) = candidates.get(key) else {
                    continue;
                };
                let (freq, offset) = (candidate.frequency(), candidate.first_offset());
                let better = match best {
                    None => true,
                    Some((_, f, o)) => freq > f || (freq == f && offset < o),
                };
                if better {
                    best = Some((key, freq, offset));
                }
            }
            best.map(|(key, _, _)| key)
        }
    }
}

/// Boost the edges pointing at the earliest member of each topic.
///
/// For every edge `rep -> end` leaving the representative of a topic with
/// more than one member, the weights of the edges from the other members to
/// `end` are summed. Once every sum is collected, each is added onto
/// `end -> rep` scaled by `alpha * exp(1 / (1 + offset))`.
pub fn adjust_multipartite_weights(
    builder: &mut GraphBuilder,
    candidates: &CandidateSet,
    topics: &[Vec<String>],
    alpha: f64,
) {
    if alpha <= 0.0 {
        return;
    }

    let mut boosts: Vec<(u32, u32, f64)> = Vec::new();

    for topic in topics.iter().filter(|t| t.len() > 1) {
        let Some(first) = first_occurring(candidates, topic) else {
            continue;
        };
        let (Some(rep), Some(rep_candidate)) = (builder.get_node_id(first), candidates.get(first))
        else {
            continue;
        };
        let others: Vec<u32> = topic
            .iter()
            .filter(|c| *c != first)
            .filter_map(|c| builder.get_node_id(c))
            .collect();

        let position = (1.0 / (1.0 + rep_candidate.first_offset() as f64)).exp();

        let Some(node) = builder.get_node(rep) else {
            continue;
        };
        let mut targets: Vec<u32> = node.edges.keys().copied().collect();
        targets.sort_unstable();

        for end in targets {
            let boosters: Vec<f64> = others
                .iter()
                .filter_map(|&c| builder.edge_weight(c, end))
                .collect();
            if !boosters.is_empty() {
                let sum: f64 = boosters.iter().sum();
                boosts.push((end, rep, sum * alpha * position));
            }
        }
    }

    tracing::debug!(boosted = boosts.len(), alpha, "adjusted multipartite weights");

    for (end, rep, boost) in boosts {
        builder.increment_edge(end, rep, boost);
    }
}
