use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use flagser_core::config::{MaxDimension, RunConfig};
use flagser_homology::compute_homology;
use tracing::info;

use super::{load_graph, write_json};

#[derive(Args, Debug)]
pub struct ComputeArgs {
    /// Input graph (`.flag` or `.json`).
    #[arg(long)]
    pub input: PathBuf,
    /// Optional YAML run configuration; flags below override its values.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Output file for the JSON result; stdout when omitted.
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Lowest reported dimension.
    #[arg(long)]
    pub min_dimension: Option<i64>,
    /// Highest reported dimension, or `inf`.
    #[arg(long)]
    pub max_dimension: Option<String>,
    /// Compute the undirected flag complex.
    #[arg(long)]
    pub undirected: bool,
    /// Filtration algorithm name.
    #[arg(long)]
    pub filtration: Option<String>,
    /// Fall back to `max` on unknown filtration names.
    #[arg(long)]
    pub allow_filtration_fallback: bool,
    /// Prime order of the coefficient field.
    #[arg(long)]
    pub coeff: Option<i64>,
    /// Column size limit; zero or negative computes exactly.
    #[arg(long, allow_hyphen_values = true)]
    pub approximation: Option<i64>,
    /// Exponent for `pmean` and `pmoment`.
    #[arg(long)]
    pub exponent: Option<f64>,
    /// Threshold for `remove_edges`.
    #[arg(long)]
    pub edge_threshold: Option<f64>,
    /// Cap on the number of stored simplices.
    #[arg(long)]
    pub max_cells: Option<usize>,
    /// Drop weighted edges longer than this while loading.
    #[arg(long)]
    pub max_edge_length: Option<f64>,
    /// Worker threads for boundary reduction; defaults to all cores.
    #[arg(long)]
    pub threads: Option<usize>,
}

pub fn run(args: &ComputeArgs) -> Result<(), Box<dyn Error>> {
    let config = resolve_config(args)?;
    let params = config.into_params()?;
    let graph = load_graph(&args.input, args.max_edge_length)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads.unwrap_or(0))
        .build()?;
    let result = pool.install(|| compute_homology(&graph, &params))?;
    info!(
        betti = ?result.betti_numbers(),
        euler = result.euler_characteristic,
        approximate = result.approximate,
        "homology computed"
    );
    write_json(args.out.as_deref(), &result)
}

fn resolve_config(args: &ComputeArgs) -> Result<RunConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    if let Some(min) = args.min_dimension {
        config.min_dimension = min;
    }
    if let Some(max) = &args.max_dimension {
        config.max_dimension = match max.parse::<i64>() {
            Ok(value) => MaxDimension::Finite(value),
            Err(_) => MaxDimension::Named(max.clone()),
        };
    }
    if args.undirected {
        config.directed = false;
    }
    if let Some(name) = &args.filtration {
        config.filtration = name.clone();
    }
    if args.allow_filtration_fallback {
        config.allow_filtration_fallback = true;
    }
    if let Some(coeff) = args.coeff {
        config.coeff = coeff;
    }
    if let Some(approximation) = args.approximation {
        config.approximation = approximation;
    }
    if let Some(exponent) = args.exponent {
        config.exponent = exponent;
    }
    if args.edge_threshold.is_some() {
        config.edge_threshold = args.edge_threshold;
    }
    if args.max_cells.is_some() {
        config.max_cells = args.max_cells;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flagser_core::params::DimensionBound;
    use std::fs;

    fn args(input: PathBuf) -> ComputeArgs {
        ComputeArgs {
            input,
            config: None,
            out: None,
            min_dimension: None,
            max_dimension: None,
            undirected: false,
            filtration: None,
            allow_filtration_fallback: false,
            coeff: None,
            approximation: None,
            exponent: None,
            edge_threshold: None,
            max_cells: None,
            max_edge_length: None,
            threads: Some(1),
        }
    }

    #[test]
    fn flags_override_the_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("run.yaml");
        fs::write(&config, "max_dimension: 3\ncoeff: 5\nfiltration: sum\n").unwrap();

        let mut args = args(dir.path().join("graph.flag"));
        args.config = Some(config);
        args.max_dimension = Some("inf".into());
        args.coeff = Some(3);

        let params = resolve_config(&args).unwrap().into_params().unwrap();
        assert_eq!(params.max_dimension, DimensionBound::Unbounded);
        assert_eq!(params.coeff, 3);
        assert_eq!(params.filtration.name(), "sum");
    }

    #[test]
    fn compute_writes_a_json_result() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("triangle.flag");
        fs::write(&input, "dim 0\n0 0 0\ndim 1\n0 1 1\n1 2 2\n0 2 3\n").unwrap();
        let out = dir.path().join("out/result.json");

        let mut args = args(input);
        args.out = Some(out.clone());
        run(&args).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(json["euler_characteristic"], 1);
        assert_eq!(json["dimensions"].as_array().map(Vec::len), Some(3));
    }
}
