use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use flagser_graph::{canonical_hash, graph_to_json, render_flag};
use tracing::info;

use super::{is_json, load_graph};

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Input graph (`.flag` or `.json`).
    #[arg(long)]
    pub input: PathBuf,
    /// Output path; the extension selects the format.
    #[arg(long)]
    pub output: PathBuf,
    /// Drop weighted edges longer than this while converting.
    #[arg(long)]
    pub max_edge_length: Option<f64>,
}

pub fn run(args: &ConvertArgs) -> Result<(), Box<dyn Error>> {
    let graph = load_graph(&args.input, args.max_edge_length)?;
    let text = if is_json(&args.output) {
        graph_to_json(&graph)?
    } else {
        render_flag(&graph)
    };
    if let Some(parent) = args.output.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&args.output, text)?;
    info!(
        output = %args.output.display(),
        hash = %canonical_hash(&graph),
        "graph converted"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flagser_graph::load_flag;

    #[test]
    fn flag_to_json_and_back_preserves_the_graph() {
        let dir = tempfile::tempdir().unwrap();
        let flag = dir.path().join("in.flag");
        fs::write(&flag, "dim 0\n0 0.5\ndim 1\n0 1 1\n").unwrap();
        let json = dir.path().join("graph.json");
        run(&ConvertArgs {
            input: flag.clone(),
            output: json.clone(),
            max_edge_length: None,
        })
        .unwrap();
        let back = dir.path().join("back.flag");
        run(&ConvertArgs {
            input: json,
            output: back.clone(),
            max_edge_length: None,
        })
        .unwrap();
        assert_eq!(load_flag(&flag).unwrap(), load_flag(&back).unwrap());
    }
}
