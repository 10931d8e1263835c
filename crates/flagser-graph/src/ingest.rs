//! Extraction of vertex weights and edges from an adjacency matrix.

use flagser_core::errors::{ErrorInfo, FlagserError};
use tracing::debug;

use crate::graph::{EdgeList, FlagGraph};
use crate::matrix::{EdgePresence, FlagMatrix, MatrixEntry};

/// Options applied while extracting edges.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IngestOptions {
    /// Weighted edges strictly longer than this are dropped.
    pub max_edge_length: Option<f64>,
}

/// Normalizes a dense or sparse adjacency matrix into a [`FlagGraph`].
///
/// Edges are emitted in row-major order. For sparse input, stored entries are
/// sorted first, so equivalent dense and sparse matrices produce identical
/// edge lists.
pub fn extract_graph<T: MatrixEntry>(
    matrix: &FlagMatrix<T>,
    opts: &IngestOptions,
) -> Result<FlagGraph, FlagserError> {
    let (rows, cols) = matrix.shape();
    if rows != cols {
        return Err(FlagserError::InvalidInput(
            ErrorInfo::new("non-square", "adjacency matrix must be square")
                .with_parameter("shape", format!("{rows}x{cols}")),
        ));
    }
    if let Some(cutoff) = opts.max_edge_length {
        if cutoff.is_nan() {
            return Err(FlagserError::InvalidParameter(
                ErrorInfo::new("invalid-cutoff", "max_edge_length must not be NaN")
                    .with_parameter("max_edge_length", cutoff),
            ));
        }
    }

    let mut vertex_weights = vec![0.0; rows];
    let mut declared: Vec<(usize, usize, EdgePresence)> = Vec::new();
    match matrix {
        FlagMatrix::Dense(dense) => {
            for (row, col, value) in dense.cells() {
                if row == col {
                    vertex_weights[row] = value.vertex_weight();
                } else {
                    declared.push((row, col, value.edge()));
                }
            }
        }
        FlagMatrix::Sparse(sparse) => {
            let mut entries = sparse.entries().to_vec();
            entries.sort_by_key(|&(row, col, _)| (row, col));
            if let Some(window) = entries
                .windows(2)
                .find(|pair| (pair[0].0, pair[0].1) == (pair[1].0, pair[1].1))
            {
                return Err(FlagserError::InvalidInput(
                    ErrorInfo::new("duplicate-entry", "sparse matrix stores a cell twice")
                        .with_context("row", window[0].0.to_string())
                        .with_context("col", window[0].1.to_string()),
                ));
            }
            for (row, col, value) in entries {
                if row == col {
                    vertex_weights[row] = value.vertex_weight();
                } else {
                    declared.push((row, col, value.edge()));
                }
            }
        }
    }

    if let Some(idx) = vertex_weights.iter().position(|w| w.is_nan()) {
        return Err(unsupported_value(T::DTYPE, idx, idx));
    }

    let edges = if T::WEIGHTED {
        let mut edges = Vec::new();
        for (row, col, presence) in declared {
            if let EdgePresence::PresentWithWeight(weight) = presence {
                if weight.is_nan() {
                    return Err(unsupported_value(T::DTYPE, row, col));
                }
                if opts.max_edge_length.is_some_and(|cutoff| weight > cutoff) {
                    continue;
                }
                edges.push((row, col, weight));
            }
        }
        EdgeList::Weighted(edges)
    } else {
        EdgeList::Unweighted(
            declared
                .into_iter()
                .filter(|(_, _, presence)| *presence != EdgePresence::Absent)
                .map(|(row, col, _)| (row, col))
                .collect(),
        )
    };

    debug!(
        vertices = rows,
        edges = edges.len(),
        dtype = T::DTYPE,
        "extracted flag graph"
    );
    FlagGraph::new(vertex_weights, edges)
}

fn unsupported_value(dtype: &str, row: usize, col: usize) -> FlagserError {
    FlagserError::InvalidInput(
        ErrorInfo::new("unsupported-value", "matrix holds a NaN value")
            .with_context("dtype", dtype)
            .with_context("row", row.to_string())
            .with_context("col", col.to_string()),
    )
}
