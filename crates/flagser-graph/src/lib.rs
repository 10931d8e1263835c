#![deny(missing_docs)]
#![doc = "Adjacency matrices, graph ingestion, filtered digraphs and `.flag` file I/O for the flagser engine."]

mod digraph;
mod flagio;
mod generators;
mod graph;
mod hash;
mod ingest;
mod matrix;
mod serialization;

pub use digraph::FilteredDigraph;
pub use flagio::{
    load_flag, load_unweighted_flag, load_weighted_flag, parse_flag, render_flag,
    save_unweighted_flag, save_weighted_flag, unweighted_matrix, weighted_matrix, Layout,
};
pub use generators::{gen_complete, gen_erdos_renyi};
pub use graph::{EdgeList, FlagGraph};
pub use hash::canonical_hash;
pub use ingest::{extract_graph, IngestOptions};
pub use matrix::{DenseMatrix, EdgePresence, FlagMatrix, MatrixEntry, SparseMatrix};

/// Re-export serialization helpers for downstream crates.
pub use serialization::{graph_from_json, graph_to_json};
