//! Canonical vertex-weight and edge-list representation of a flag graph.

use serde::{Deserialize, Serialize};

use flagser_core::errors::{ErrorInfo, FlagserError};

/// Edge list in either weighted or unweighted mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "edges", rename_all = "snake_case")]
pub enum EdgeList {
    /// `(source, target, weight)` triples.
    Weighted(Vec<(usize, usize, f64)>),
    /// `(source, target)` pairs.
    Unweighted(Vec<(usize, usize)>),
}

impl EdgeList {
    /// Number of edges.
    pub fn len(&self) -> usize {
        match self {
            EdgeList::Weighted(edges) => edges.len(),
            EdgeList::Unweighted(edges) => edges.len(),
        }
    }

    /// Returns whether the list holds no edge.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns whether edges carry their own weights.
    pub fn is_weighted(&self) -> bool {
        matches!(self, EdgeList::Weighted(_))
    }

    /// Iterates over `(source, target, weight)` with `None` for unweighted edges.
    pub fn iter(&self) -> Box<dyn Iterator<Item = (usize, usize, Option<f64>)> + '_> {
        match self {
            EdgeList::Weighted(edges) => Box::new(edges.iter().map(|&(s, t, w)| (s, t, Some(w)))),
            EdgeList::Unweighted(edges) => Box::new(edges.iter().map(|&(s, t)| (s, t, None))),
        }
    }
}

/// Vertex weights plus an edge list; the input of the flag-complex pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagGraph {
    vertex_weights: Vec<f64>,
    edges: EdgeList,
}

impl FlagGraph {
    /// Validates and wraps vertex weights and edges.
    ///
    /// Endpoints must be in range, self-loops are rejected and weights must not be NaN.
    pub fn new(vertex_weights: Vec<f64>, edges: EdgeList) -> Result<Self, FlagserError> {
        let n = vertex_weights.len();
        if let Some(idx) = vertex_weights.iter().position(|w| w.is_nan()) {
            return Err(FlagserError::InvalidInput(
                ErrorInfo::new("nan-weight", "vertex weight is NaN")
                    .with_context("vertex", idx.to_string()),
            ));
        }
        for (source, target, weight) in edges.iter() {
            if source >= n || target >= n {
                return Err(FlagserError::InvalidInput(
                    ErrorInfo::new("vertex-out-of-range", "edge endpoint is not a vertex")
                        .with_context("edge", format!("({source}, {target})"))
                        .with_context("vertices", n.to_string()),
                ));
            }
            if source == target {
                return Err(FlagserError::InvalidInput(
                    ErrorInfo::new("self-loop", "flag graphs cannot contain self-loops")
                        .with_context("vertex", source.to_string())
                        .with_hint("store vertex weights on the diagonal instead"),
                ));
            }
            if weight.is_some_and(f64::is_nan) {
                return Err(FlagserError::InvalidInput(
                    ErrorInfo::new("nan-weight", "edge weight is NaN")
                        .with_context("edge", format!("({source}, {target})")),
                ));
            }
        }
        Ok(Self {
            vertex_weights,
            edges,
        })
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertex_weights.len()
    }

    /// Number of edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Weight of every vertex.
    pub fn vertex_weights(&self) -> &[f64] {
        &self.vertex_weights
    }

    /// The edge list.
    pub fn edges(&self) -> &EdgeList {
        &self.edges
    }
}
