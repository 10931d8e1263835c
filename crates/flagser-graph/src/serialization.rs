use flagser_core::errors::{ErrorInfo, FlagserError};

use crate::graph::FlagGraph;

/// Serializes the graph to a JSON string.
pub fn graph_to_json(graph: &FlagGraph) -> Result<String, FlagserError> {
    serde_json::to_string_pretty(graph)
        .map_err(|err| FlagserError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores a graph from a JSON string, re-running structural validation.
pub fn graph_from_json(json: &str) -> Result<FlagGraph, FlagserError> {
    let raw: FlagGraph = serde_json::from_str(json)
        .map_err(|err| FlagserError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    FlagGraph::new(raw.vertex_weights().to_vec(), raw.edges().clone())
}
