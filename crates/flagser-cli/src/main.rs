use std::error::Error;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::{
    compute::{self, ComputeArgs},
    convert::{self, ConvertArgs},
    count::{self, CountArgs},
    filtrations::{self, FiltrationsArgs},
};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "flagser", about = "Persistent homology of directed flag complexes")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute persistence diagrams, Betti numbers and cell counts.
    Compute(ComputeArgs),
    /// Count the cells of every dimension without computing homology.
    Count(CountArgs),
    /// Convert a graph between `.flag` and JSON representations.
    Convert(ConvertArgs),
    /// List the implemented filtration algorithms.
    Filtrations(FiltrationsArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.command {
        Command::Compute(args) => compute::run(&args),
        Command::Count(args) => count::run(&args),
        Command::Convert(args) => convert::run(&args),
        Command::Filtrations(args) => filtrations::run(&args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
