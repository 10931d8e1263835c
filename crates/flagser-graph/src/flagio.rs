//! Text `.flag` files: a vertex-weight line followed by edge lines.
//!
//! ```text
//! dim 0
//! 0 0 0.5
//! dim 1
//! 0 1 0.25
//! 1 2 1
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use flagser_core::errors::{ErrorInfo, FlagserError};

use crate::graph::{EdgeList, FlagGraph};
use crate::ingest::{extract_graph, IngestOptions};
use crate::matrix::{DenseMatrix, FlagMatrix, MatrixEntry, SparseMatrix};

/// Matrix layout produced when loading a flag file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Dense row-major matrix; absent weighted edges are stored as `+inf`.
    Dense,
    /// Coordinate matrix storing only the listed edges.
    #[default]
    Sparse,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Vertices,
    Edges,
}

/// Parses flag file text into a [`FlagGraph`].
///
/// Edges carry weights when every edge line has a third column. Listing the
/// same ordered edge twice is a format error.
pub fn parse_flag(text: &str) -> Result<FlagGraph, FlagserError> {
    let mut section = Section::Preamble;
    let mut vertex_weights: Vec<f64> = Vec::new();
    let mut weighted: Vec<(usize, usize, f64)> = Vec::new();
    let mut unweighted: Vec<(usize, usize)> = Vec::new();
    let mut seen: HashMap<(usize, usize), usize> = HashMap::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(rest) = line.strip_prefix("dim") {
            section = match rest.trim() {
                "0" => Section::Vertices,
                "1" if section != Section::Preamble => Section::Edges,
                "1" => return Err(format_error("missing-vertices", "edges listed before vertices", line_no)),
                other => {
                    return Err(format_error(
                        "unsupported-section",
                        format!("only dimensions 0 and 1 are supported, found `dim {other}`"),
                        line_no,
                    ))
                }
            };
            continue;
        }
        match section {
            Section::Preamble => {
                return Err(format_error(
                    "missing-header",
                    "expected a `dim 0` header",
                    line_no,
                ))
            }
            Section::Vertices => {
                for token in line.split_whitespace() {
                    vertex_weights.push(parse_weight(token, line_no)?);
                }
            }
            Section::Edges => {
                let tokens: Vec<&str> = line.split_whitespace().collect();
                let source = parse_index(tokens[0], line_no)?;
                let target = tokens
                    .get(1)
                    .ok_or_else(|| format_error("short-edge", "edge line needs two endpoints", line_no))
                    .and_then(|token| parse_index(token, line_no))?;
                if let Some(first) = seen.insert((source, target), line_no) {
                    return Err(format_error(
                        "duplicate-edge",
                        format!("edge ({source}, {target}) already listed on line {first}"),
                        line_no,
                    ));
                }
                match tokens.len() {
                    2 => unweighted.push((source, target)),
                    3 => weighted.push((source, target, parse_weight(tokens[2], line_no)?)),
                    _ => {
                        return Err(format_error(
                            "malformed-edge",
                            "edge line must be `source target [weight]`",
                            line_no,
                        ))
                    }
                }
                if !weighted.is_empty() && !unweighted.is_empty() {
                    return Err(format_error(
                        "mixed-edges",
                        "weighted and unweighted edges cannot be mixed",
                        line_no,
                    ));
                }
            }
        }
    }

    let edges = if unweighted.is_empty() {
        EdgeList::Weighted(weighted)
    } else {
        EdgeList::Unweighted(unweighted)
    };
    FlagGraph::new(vertex_weights, edges)
}

/// Renders a graph in flag file syntax.
///
/// Weights use the shortest representation that parses back to the same value.
pub fn render_flag(graph: &FlagGraph) -> String {
    let mut out = String::from("dim 0\n");
    let weights: Vec<String> = graph.vertex_weights().iter().map(|w| w.to_string()).collect();
    out.push_str(&weights.join(" "));
    out.push_str("\ndim 1\n");
    for (source, target, weight) in graph.edges().iter() {
        let line = match weight {
            Some(w) => format!("{source} {target} {w}\n"),
            None => format!("{source} {target}\n"),
        };
        out.push_str(&line);
    }
    out
}

/// Reads and parses a flag file.
pub fn load_flag(path: &Path) -> Result<FlagGraph, FlagserError> {
    let text =
        fs::read_to_string(path).map_err(|err| FlagserError::io("read-flag", path.display(), err))?;
    parse_flag(&text)
}

/// Loads a flag file as a weighted adjacency matrix.
pub fn load_weighted_flag(path: &Path, layout: Layout) -> Result<FlagMatrix<f64>, FlagserError> {
    let graph = load_flag(path)?;
    weighted_matrix(&graph, layout)
}

/// Loads a flag file as a boolean adjacency matrix, ignoring weights.
pub fn load_unweighted_flag(path: &Path, layout: Layout) -> Result<FlagMatrix<bool>, FlagserError> {
    let graph = load_flag(path)?;
    unweighted_matrix(&graph, layout)
}

/// Saves a weighted adjacency matrix as a flag file.
pub fn save_weighted_flag(path: &Path, matrix: &FlagMatrix<f64>) -> Result<(), FlagserError> {
    save_matrix(path, matrix)
}

/// Saves a boolean adjacency matrix as a flag file.
pub fn save_unweighted_flag(path: &Path, matrix: &FlagMatrix<bool>) -> Result<(), FlagserError> {
    save_matrix(path, matrix)
}

fn save_matrix<T: MatrixEntry>(path: &Path, matrix: &FlagMatrix<T>) -> Result<(), FlagserError> {
    let graph = extract_graph(matrix, &IngestOptions::default())?;
    fs::write(path, render_flag(&graph))
        .map_err(|err| FlagserError::io("write-flag", path.display(), err))
}

/// Builds a weighted matrix; unweighted edges are stored with weight zero.
pub fn weighted_matrix(graph: &FlagGraph, layout: Layout) -> Result<FlagMatrix<f64>, FlagserError> {
    let n = graph.num_vertices();
    let diagonal = graph.vertex_weights().iter().enumerate().map(|(v, w)| (v, v, *w));
    let edges = graph.edges().iter().map(|(s, t, w)| (s, t, w.unwrap_or(0.0)));
    match layout {
        Layout::Dense => {
            let mut dense = DenseMatrix::filled(n, f64::INFINITY);
            for (row, col, value) in diagonal.chain(edges) {
                dense.set(row, col, value)?;
            }
            Ok(FlagMatrix::Dense(dense))
        }
        Layout::Sparse => {
            let mut sparse = SparseMatrix::new(n, n);
            for (row, col, value) in diagonal.chain(edges) {
                sparse.push(row, col, value)?;
            }
            Ok(FlagMatrix::Sparse(sparse))
        }
    }
}

/// Builds a boolean matrix holding only edge presence.
pub fn unweighted_matrix(graph: &FlagGraph, layout: Layout) -> Result<FlagMatrix<bool>, FlagserError> {
    let n = graph.num_vertices();
    match layout {
        Layout::Dense => {
            let mut dense = DenseMatrix::filled(n, false);
            for (source, target, _) in graph.edges().iter() {
                dense.set(source, target, true)?;
            }
            Ok(FlagMatrix::Dense(dense))
        }
        Layout::Sparse => {
            let mut sparse = SparseMatrix::new(n, n);
            for (source, target, _) in graph.edges().iter() {
                sparse.push(source, target, true)?;
            }
            Ok(FlagMatrix::Sparse(sparse))
        }
    }
}

fn parse_weight(token: &str, line_no: usize) -> Result<f64, FlagserError> {
    token
        .parse::<f64>()
        .map_err(|err| format_error("bad-weight", format!("`{token}`: {err}"), line_no))
}

fn parse_index(token: &str, line_no: usize) -> Result<usize, FlagserError> {
    token
        .parse::<usize>()
        .map_err(|err| format_error("bad-index", format!("`{token}`: {err}"), line_no))
}

fn format_error(code: &str, message: impl Into<String>, line_no: usize) -> FlagserError {
    FlagserError::Format(ErrorInfo::new(code, message).with_context("line", line_no.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "dim 0\n0 0 0.5\ndim 1\n0 1 0.25\n1 2 1\n2 0 3.5\n";

    #[test]
    fn parses_weighted_sample() {
        let graph = parse_flag(SAMPLE).unwrap();
        assert_eq!(graph.vertex_weights(), &[0.0, 0.0, 0.5]);
        assert_eq!(
            graph.edges(),
            &EdgeList::Weighted(vec![(0, 1, 0.25), (1, 2, 1.0), (2, 0, 3.5)])
        );
    }

    #[test]
    fn render_reproduces_saved_text() {
        let graph = parse_flag(SAMPLE).unwrap();
        assert_eq!(render_flag(&graph), SAMPLE);
    }

    #[test]
    fn comments_and_unweighted_edges() {
        let graph = parse_flag("# header\ndim 0\n0 0\n\ndim 1\n0 1\n").unwrap();
        assert_eq!(graph.edges(), &EdgeList::Unweighted(vec![(0, 1)]));
    }

    #[test]
    fn errors_carry_line_numbers() {
        let err = parse_flag("dim 0\n0 0\ndim 1\n0 x 1\n").unwrap_err();
        assert_eq!(err.code(), "bad-index");
        assert_eq!(err.info().context.get("line").map(String::as_str), Some("4"));

        let err = parse_flag("0 1\n").unwrap_err();
        assert_eq!(err.code(), "missing-header");

        let err = parse_flag("dim 0\n0 0\ndim 1\n0 1 1\n1 0\n").unwrap_err();
        assert_eq!(err.code(), "mixed-edges");
    }

    #[test]
    fn repeated_edges_are_rejected() {
        let err = parse_flag("dim 0\n0 0\ndim 1\n0 1 0.5\n1 0 1\n0 1 0.25\n").unwrap_err();
        assert_eq!(err.code(), "duplicate-edge");
        assert_eq!(err.info().context.get("line").map(String::as_str), Some("6"));
        assert!(err.to_string().contains("line 4"));
    }

    #[test]
    fn matrices_keep_vertex_weights_on_the_diagonal() {
        let graph = parse_flag(SAMPLE).unwrap();
        let FlagMatrix::Dense(dense) = weighted_matrix(&graph, Layout::Dense).unwrap() else {
            panic!("expected a dense matrix");
        };
        assert_eq!(dense.get(2, 2), Some(0.5));
        assert_eq!(dense.get(0, 1), Some(0.25));
        assert_eq!(dense.get(1, 0), Some(f64::INFINITY));

        let FlagMatrix::Sparse(sparse) = unweighted_matrix(&graph, Layout::Sparse).unwrap() else {
            panic!("expected a sparse matrix");
        };
        assert_eq!(sparse.nnz(), 3);
    }

    #[test]
    fn edge_endpoints_are_validated() {
        let err = parse_flag("dim 0\n0 0\ndim 1\n0 5 1\n").unwrap_err();
        assert_eq!(err.code(), "vertex-out-of-range");
    }
}
