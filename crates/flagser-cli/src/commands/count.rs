use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use flagser_complex::euler_characteristic;
use flagser_homology::count_cells;
use serde::Serialize;

use super::{load_graph, write_json};

#[derive(Args, Debug)]
pub struct CountArgs {
    /// Input graph (`.flag` or `.json`).
    #[arg(long)]
    pub input: PathBuf,
    /// Output file for the JSON counts; stdout when omitted.
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Count cells of the undirected flag complex.
    #[arg(long)]
    pub undirected: bool,
    /// Drop weighted edges longer than this while loading.
    #[arg(long)]
    pub max_edge_length: Option<f64>,
}

#[derive(Debug, Serialize)]
struct CountReport {
    cell_counts: Vec<u64>,
    euler_characteristic: i64,
}

pub fn run(args: &CountArgs) -> Result<(), Box<dyn Error>> {
    let graph = load_graph(&args.input, args.max_edge_length)?;
    let cell_counts = count_cells(&graph, !args.undirected)?;
    let report = CountReport {
        euler_characteristic: euler_characteristic(&cell_counts),
        cell_counts,
    };
    write_json(args.out.as_deref(), &report)
}
