pub mod compute;
pub mod convert;
pub mod count;
pub mod filtrations;

use std::error::Error;
use std::fs;
use std::path::Path;

use flagser_graph::{
    extract_graph, graph_from_json, load_flag, weighted_matrix, FlagGraph, IngestOptions, Layout,
};
use tracing::info;

/// Loads a graph from a `.json` graph document or a `.flag` file.
///
/// A cutoff re-extracts a weighted graph through its adjacency matrix so
/// longer edges are dropped exactly as for matrix input. Unweighted graphs
/// ignore the cutoff.
pub fn load_graph(path: &Path, max_edge_length: Option<f64>) -> Result<FlagGraph, Box<dyn Error>> {
    let graph = if is_json(path) {
        graph_from_json(&fs::read_to_string(path)?)?
    } else {
        load_flag(path)?
    };
    let graph = match max_edge_length {
        Some(cutoff) if graph.edges().is_weighted() => {
            let matrix = weighted_matrix(&graph, Layout::Sparse)?;
            extract_graph(
                &matrix,
                &IngestOptions {
                    max_edge_length: Some(cutoff),
                },
            )?
        }
        _ => graph,
    };
    info!(
        path = %path.display(),
        vertices = graph.num_vertices(),
        edges = graph.num_edges(),
        "loaded graph"
    );
    Ok(graph)
}

/// Writes pretty JSON to `out`, or to stdout when no path is given.
pub fn write_json<T: serde::Serialize>(out: Option<&Path>, value: &T) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(value)?;
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, json)?;
        }
        None => println!("{json}"),
    }
    Ok(())
}

pub fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
