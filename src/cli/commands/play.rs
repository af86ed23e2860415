//! Play command - Interactive game against the machine

use anyhow::Result;
use clap::Parser;
use tracing::info;

use crate::{
    Error,
    adapters::{TerminalInput, TerminalRenderer},
    config::AppConfig,
    session::{Session, SessionDriver},
};

#[derive(Parser, Debug)]
#[command(about = "Play a game against the machine")]
pub struct PlayArgs {
    /// Disable colored board output
    #[arg(long)]
    pub no_color: bool,

    /// Print the rank of every candidate before each machine move
    #[arg(long)]
    pub show_ranks: bool,
}

pub fn execute(args: PlayArgs, config: &AppConfig) -> Result<()> {
    let color = config.display.color && !args.no_color;
    let show_ranks = config.display.show_ranks || args.show_ranks;

    println!("You are x and move first. The machine plays o.\n");

    let session = Session::new(config.tree);
    let mut driver = SessionDriver::new(
        session,
        TerminalInput::stdin(),
        TerminalRenderer::stdout(color),
    )
    .with_show_ranks(show_ranks);

    match driver.play() {
        Ok(report) => {
            info!(
                status = %report.status,
                plies = report.stats.plies,
                nodes_built = report.stats.nodes_built,
                rebuilds = report.stats.rebuilds,
                "game over"
            );
            Ok(())
        }
        Err(Error::InputClosed) => {
            println!("\nInput closed, leaving the game.");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
