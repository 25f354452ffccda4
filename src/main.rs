use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use eight_puzzle::cli::{self, Command, DEFAULT_STORE};

#[derive(Parser)]
#[command(name = "eight-puzzle")]
#[command(version, about = "Shortest-path solver for the 8-puzzle", long_about = None)]
struct Cli {
    /// History file for saved puzzles and solve statistics
    #[arg(long, global = true, env = "EIGHT_PUZZLE_STORE", default_value = DEFAULT_STORE)]
    store: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    cli::execute(cli.command, cli.store)
}
