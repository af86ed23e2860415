//! Simulate command - Play the machine against a random opponent

use std::{fs::File, io::BufWriter, path::PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    adapters::{NullRenderer, RandomMoves},
    cli::output::{create_game_progress, format_number, percent, print_kv, print_section},
    config::TreeConfig,
    session::{Session, SessionDriver},
    tictactoe::Status,
    tree::PrunePolicy,
};

#[derive(Parser, Debug)]
#[command(about = "Play many games against a uniformly random opponent")]
pub struct SimulateArgs {
    /// Number of games to play
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the summary as JSON to this path
    #[arg(long, short = 'o')]
    pub export: Option<PathBuf>,
}

/// Outcome counts over a batch of games
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub games: usize,
    pub seed: Option<u64>,
    pub prune: PrunePolicy,
    pub machine_wins: usize,
    pub opponent_wins: usize,
    pub draws: usize,
    /// Trees rebuilt mid-game because pruning left nothing to play
    pub rebuilds: usize,
    pub total_plies: usize,
    pub nodes_built: usize,
}

impl SimulationSummary {
    fn record(&mut self, status: Status) {
        match status {
            Status::MachineWin => self.machine_wins += 1,
            Status::OpponentWin => self.opponent_wins += 1,
            Status::Draw => self.draws += 1,
            Status::InProgress => {}
        }
    }

    fn short(&self) -> String {
        format!(
            "W {} / D {} / L {}",
            self.machine_wins, self.draws, self.opponent_wins
        )
    }
}

pub fn execute(args: SimulateArgs, tree: &TreeConfig) -> Result<()> {
    if args.games == 0 {
        return Err(anyhow!("--games must be at least 1"));
    }

    let pb = create_game_progress(args.games as u64);
    let summary = simulate(args.games, args.seed, tree, |summary| {
        pb.inc(1);
        pb.set_message(summary.short());
    })?;
    pb.finish_with_message(summary.short());

    print_summary(&summary);

    if let Some(path) = &args.export {
        let file = File::create(path)
            .with_context(|| format!("creating export file {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &summary)?;
        println!("\nSummary written to {}", path.display());
    }
    Ok(())
}

/// Play `games` full games. Game `i` uses an opponent seeded with
/// `seed + i`, so a seeded batch is reproducible.
///
/// `on_game` is called after every finished game with the running summary.
pub fn simulate(
    games: usize,
    seed: Option<u64>,
    tree: &TreeConfig,
    mut on_game: impl FnMut(&SimulationSummary),
) -> Result<SimulationSummary> {
    let mut summary = SimulationSummary {
        seed,
        prune: tree.prune,
        ..SimulationSummary::default()
    };

    for game in 0..games {
        let source = match seed {
            Some(seed) => RandomMoves::seeded(seed.wrapping_add(game as u64)),
            None => RandomMoves::from_entropy(),
        };
        let mut driver = SessionDriver::new(Session::new(*tree), source, NullRenderer);
        let report = driver
            .play()
            .with_context(|| format!("simulating game {}", game + 1))?;

        debug!(game, status = %report.status, plies = report.moves.len(), "simulated game");
        summary.games += 1;
        summary.record(report.status);
        summary.rebuilds += report.stats.rebuilds;
        summary.total_plies += report.stats.plies;
        summary.nodes_built += report.stats.nodes_built;
        on_game(&summary);
    }

    Ok(summary)
}

fn print_summary(summary: &SimulationSummary) {
    print_section("Simulation results");
    print_kv("Games", &format_number(summary.games));
    print_kv("Prune policy", &summary.prune.to_string());
    if let Some(seed) = summary.seed {
        print_kv("Seed", &seed.to_string());
    }
    print_kv(
        "Machine wins",
        &format!(
            "{} ({:.1}%)",
            summary.machine_wins,
            percent(summary.machine_wins, summary.games)
        ),
    );
    print_kv(
        "Draws",
        &format!(
            "{} ({:.1}%)",
            summary.draws,
            percent(summary.draws, summary.games)
        ),
    );
    print_kv(
        "Opponent wins",
        &format!(
            "{} ({:.1}%)",
            summary.opponent_wins,
            percent(summary.opponent_wins, summary.games)
        ),
    );
    print_kv("Rebuilds", &format_number(summary.rebuilds));
    print_kv("Nodes built", &format_number(summary.nodes_built));
}
