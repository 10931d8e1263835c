//! Filtered directed graph with bitset adjacency, the base of flag-complex enumeration.

use std::collections::HashMap;

use flagser_core::errors::{ErrorInfo, FlagserError};
use tracing::debug;

use crate::graph::FlagGraph;

const WORD_BITS: usize = 64;

/// Directed graph with vertex and edge filtration values.
///
/// In undirected mode every edge is oriented from the lower to the higher
/// vertex index, so each clique is enumerated exactly once.
#[derive(Debug, Clone)]
pub struct FilteredDigraph {
    vertex_filtration: Vec<f64>,
    words: usize,
    out_bits: Vec<u64>,
    out_neighbors: Vec<Vec<usize>>,
    edge_filtration: HashMap<(usize, usize), f64>,
    degrees: Vec<usize>,
    directed: bool,
}

impl FilteredDigraph {
    /// Builds the digraph, optionally dropping edges heavier than `prune_above`.
    ///
    /// Unweighted edges appear at the larger of their endpoint vertex weights.
    /// A weighted edge that appears before one of its endpoints is rejected.
    pub fn build(
        graph: &FlagGraph,
        directed: bool,
        prune_above: Option<f64>,
    ) -> Result<Self, FlagserError> {
        let n = graph.num_vertices();
        let vertex_filtration = graph.vertex_weights().to_vec();
        let mut edge_filtration: HashMap<(usize, usize), f64> = HashMap::new();
        let mut pruned = 0usize;

        for (source, target, weight) in graph.edges().iter() {
            let floor = vertex_filtration[source].max(vertex_filtration[target]);
            let value = match weight {
                Some(w) if w < floor => {
                    return Err(FlagserError::InvalidInput(
                        ErrorInfo::new(
                            "edge-below-vertex",
                            "edge filtration contradicts the vertex filtration",
                        )
                        .with_context("edge", format!("({source}, {target})"))
                        .with_context("edge_value", w.to_string())
                        .with_context("vertex_value", floor.to_string()),
                    ));
                }
                Some(w) => w,
                None => floor,
            };
            if prune_above.is_some_and(|threshold| value > threshold) {
                pruned += 1;
                continue;
            }
            let key = if directed || source < target {
                (source, target)
            } else {
                (target, source)
            };
            edge_filtration
                .entry(key)
                .and_modify(|existing| *existing = existing.min(value))
                .or_insert(value);
        }

        let words = n.div_ceil(WORD_BITS).max(1);
        let mut out_bits = vec![0u64; n * words];
        let mut out_neighbors = vec![Vec::new(); n];
        let mut degrees = vec![0usize; n];
        let mut keys: Vec<(usize, usize)> = edge_filtration.keys().copied().collect();
        keys.sort_unstable();
        for (source, target) in keys {
            out_bits[source * words + target / WORD_BITS] |= 1u64 << (target % WORD_BITS);
            out_neighbors[source].push(target);
            degrees[source] += 1;
            degrees[target] += 1;
        }

        debug!(
            vertices = n,
            edges = edge_filtration.len(),
            pruned,
            directed,
            "built filtered digraph"
        );
        Ok(Self {
            vertex_filtration,
            words,
            out_bits,
            out_neighbors,
            edge_filtration,
            degrees,
            directed,
        })
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertex_filtration.len()
    }

    /// Number of oriented edges.
    pub fn num_edges(&self) -> usize {
        self.edge_filtration.len()
    }

    /// Whether edges keep their orientation.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Number of 64-bit words in an adjacency row.
    pub fn words(&self) -> usize {
        self.words
    }

    /// Bitset of the out-neighbours of `vertex`.
    pub fn out_row(&self, vertex: usize) -> &[u64] {
        &self.out_bits[vertex * self.words..(vertex + 1) * self.words]
    }

    /// Sorted out-neighbours of `vertex`.
    pub fn out_neighbors(&self, vertex: usize) -> &[usize] {
        &self.out_neighbors[vertex]
    }

    /// Returns whether the oriented edge `source -> target` exists.
    pub fn has_edge(&self, source: usize, target: usize) -> bool {
        (self.out_row(source)[target / WORD_BITS] >> (target % WORD_BITS)) & 1 == 1
    }

    /// Filtration value of a vertex.
    pub fn vertex_filtration(&self, vertex: usize) -> f64 {
        self.vertex_filtration[vertex]
    }

    /// Filtration value of the oriented edge `source -> target`.
    pub fn edge_filtration(&self, source: usize, target: usize) -> Option<f64> {
        self.edge_filtration.get(&(source, target)).copied()
    }

    /// Number of oriented edges touching `vertex`.
    pub fn degree(&self, vertex: usize) -> usize {
        self.degrees[vertex]
    }

    /// Iterates the set bits of a bitset.
    pub fn bits(row: &[u64]) -> impl Iterator<Item = usize> + '_ {
        row.iter().enumerate().flat_map(|(word_idx, &word)| {
            let mut remaining = word;
            std::iter::from_fn(move || {
                if remaining == 0 {
                    return None;
                }
                let bit = remaining.trailing_zeros() as usize;
                remaining &= remaining - 1;
                Some(word_idx * WORD_BITS + bit)
            })
        })
    }
}
