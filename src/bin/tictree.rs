//! tictree CLI - Tic-tac-toe against a pre-computed game tree
//!
//! Subcommands:
//! - play: interactive game on the terminal
//! - analyze: ranks and tree statistics for a single position
//! - simulate: batch of games against a random opponent

use anyhow::Result;
use clap::{Parser, Subcommand};
use tictree::cli::{
    commands::{
        analyze::{self, AnalyzeArgs},
        play::{self, PlayArgs},
        simulate::{self, SimulateArgs},
    },
    config::ConfigArgs,
    logging::init_tracing,
};

#[derive(Parser)]
#[command(name = "tictree")]
#[command(version, about = "Tic-tac-toe against a pre-computed game tree", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    /// Log at debug level (RUST_LOG still takes precedence)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game against the machine
    Play(PlayArgs),

    /// Build the tree for a position and report its ranks
    Analyze(AnalyzeArgs),

    /// Play many games against a random opponent
    Simulate(SimulateArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let logging = init_tracing(cli.verbose);

    let config = cli.config.resolve()?;
    logging.apply(&config.logging)?;

    match cli.command {
        Commands::Play(args) => play::execute(args, &config),
        Commands::Analyze(args) => analyze::execute(args, &config),
        Commands::Simulate(args) => simulate::execute(args, &config.tree),
    }
}
