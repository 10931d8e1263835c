//! Directed flag-complex enumeration by incremental clique extension.
//!
//! A `k`-simplex is a sequence `v0 .. vk` of distinct vertices with an edge
//! `vi -> vj` for every `i < j`. Starting from a single vertex, a sequence is
//! extended by every vertex in the intersection of the out-neighbourhoods of
//! its members, so each simplex is produced exactly once. Undirected complexes
//! are the special case where edges point from lower to higher indices.

use std::convert::Infallible;
use std::ops::ControlFlow;

use flagser_core::errors::{ErrorInfo, FlagserError};
use flagser_core::params::ResourceLimits;
use flagser_graph::FilteredDigraph;
use tracing::{debug, info_span};

use crate::arena::SimplexArena;

/// Filtered flag complex stored as one arena per dimension.
#[derive(Debug, Clone)]
pub struct FlagComplex {
    arenas: Vec<SimplexArena>,
    truncated: bool,
}

impl FlagComplex {
    /// Per-dimension arenas, starting at dimension zero.
    pub fn arenas(&self) -> &[SimplexArena] {
        &self.arenas
    }

    pub(crate) fn arenas_mut(&mut self) -> &mut [SimplexArena] {
        &mut self.arenas
    }

    /// Arena of the given dimension, if any simplex of that dimension exists.
    pub fn arena(&self, dimension: usize) -> Option<&SimplexArena> {
        self.arenas.get(dimension)
    }

    /// Highest dimension holding at least one simplex.
    pub fn top_dimension(&self) -> Option<usize> {
        self.arenas.iter().rposition(|arena| !arena.is_empty())
    }

    /// Number of simplices per dimension.
    pub fn cell_counts(&self) -> Vec<u64> {
        self.arenas.iter().map(|arena| arena.len() as u64).collect()
    }

    /// Whether enumeration reached its dimension limit, so higher cells may exist.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Splits the complex into its arenas.
    pub fn into_arenas(self) -> Vec<SimplexArena> {
        self.arenas
    }
}

/// Visits every simplex of dimension at most `max_dimension`.
///
/// The visitor sees vertex sequences in depth-first order and may stop the
/// traversal early by returning [`ControlFlow::Break`].
pub fn for_each_simplex<B>(
    digraph: &FilteredDigraph,
    max_dimension: Option<usize>,
    mut visit: impl FnMut(&[usize]) -> ControlFlow<B>,
) -> ControlFlow<B> {
    let words = digraph.words();
    let mut prefix = Vec::new();
    for vertex in 0..digraph.num_vertices() {
        prefix.clear();
        prefix.push(vertex);
        visit(&prefix)?;
        if max_dimension == Some(0) {
            continue;
        }
        let candidates = digraph.out_row(vertex).to_vec();
        extend(digraph, &mut prefix, &candidates, words, max_dimension, &mut visit)?;
    }
    ControlFlow::Continue(())
}

fn extend<B>(
    digraph: &FilteredDigraph,
    prefix: &mut Vec<usize>,
    candidates: &[u64],
    words: usize,
    max_dimension: Option<usize>,
    visit: &mut impl FnMut(&[usize]) -> ControlFlow<B>,
) -> ControlFlow<B> {
    for next in FilteredDigraph::bits(candidates) {
        prefix.push(next);
        visit(prefix)?;
        let dimension = prefix.len() - 1;
        if max_dimension.map_or(true, |max| dimension < max) {
            let row = digraph.out_row(next);
            let narrowed: Vec<u64> = (0..words).map(|w| candidates[w] & row[w]).collect();
            if narrowed.iter().any(|&word| word != 0) {
                extend(digraph, prefix, &narrowed, words, max_dimension, visit)?;
            }
        }
        prefix.pop();
    }
    ControlFlow::Continue(())
}

/// Enumerates and stores every simplex up to `max_dimension`.
///
/// Fails with `ResourceExhausted` once more than `limits.max_cells` simplices
/// would be stored.
pub fn enumerate_complex(
    digraph: &FilteredDigraph,
    max_dimension: Option<usize>,
    limits: &ResourceLimits,
) -> Result<FlagComplex, FlagserError> {
    let _span = info_span!("enumerate", ?max_dimension).entered();
    let mut arenas: Vec<SimplexArena> = vec![SimplexArena::new(0)];
    let mut stored = 0usize;
    let mut truncated = false;

    let outcome = for_each_simplex(digraph, max_dimension, |simplex| {
        let dimension = simplex.len() - 1;
        if let Some(budget) = limits.max_cells {
            if stored >= budget {
                return ControlFlow::Break(FlagserError::ResourceExhausted(
                    ErrorInfo::new("cell-budget", "flag complex exceeds the cell budget")
                        .with_parameter("max_cells", budget)
                        .with_context("dimension", dimension.to_string())
                        .with_hint("lower max_dimension or raise max_cells"),
                ));
            }
        }
        while arenas.len() <= dimension {
            arenas.push(SimplexArena::new(arenas.len()));
        }
        if let Err(err) = arenas[dimension].push(simplex) {
            return ControlFlow::Break(err);
        }
        stored += 1;
        if max_dimension == Some(dimension) {
            truncated = true;
        }
        ControlFlow::Continue(())
    });
    if let ControlFlow::Break(err) = outcome {
        return Err(err);
    }

    debug!(cells = ?arenas.iter().map(SimplexArena::len).collect::<Vec<_>>(), "enumerated flag complex");
    Ok(FlagComplex { arenas, truncated })
}

/// Counts simplices per dimension over the whole complex without storing them.
pub fn count_simplices(digraph: &FilteredDigraph, max_dimension: Option<usize>) -> Vec<u64> {
    let _span = info_span!("count", ?max_dimension).entered();
    let mut counts: Vec<u64> = vec![0];
    let outcome = for_each_simplex::<Infallible>(digraph, max_dimension, |simplex| {
        let dimension = simplex.len() - 1;
        if counts.len() <= dimension {
            counts.resize(dimension + 1, 0);
        }
        counts[dimension] += 1;
        ControlFlow::Continue(())
    });
    if let ControlFlow::Break(never) = outcome {
        match never {}
    }
    if digraph.num_vertices() == 0 {
        counts.clear();
    }
    counts
}

/// Alternating sum of cell counts.
pub fn euler_characteristic(counts: &[u64]) -> i64 {
    counts
        .iter()
        .enumerate()
        .map(|(dimension, &count)| if dimension % 2 == 0 { count as i64 } else { -(count as i64) })
        .sum()
}
