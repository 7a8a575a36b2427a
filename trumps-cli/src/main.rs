//! Trumps CLI - Command-line interface
//!
//! Simulate head-to-head attribute comparisons. Two cards get compared and
//! the one that wins more categories wins.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use trumps_cli::simulate_cmd::{self, SimulateArgs};

#[derive(Parser)]
#[command(name = "trumps")]
#[command(about = "Simulate single-elimination brackets decided by attribute comparisons")]
struct Cli {
    #[command(flatten)]
    args: SimulateArgs,

    /// Random seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging; stdout is reserved for results
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    simulate_cmd::run(cli.args, cli.seed)
}
