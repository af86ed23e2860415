//! Analyze command - Build the tree for one position and report its ranks

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    Error,
    cli::output::{create_spinner, format_number, print_kv, print_section, print_subsection},
    config::{AppConfig, TreeConfig},
    tictactoe::{Board, Side, Status, evaluate},
    tree::{BuildStats, PrunePolicy, build_tree, select_machine_move},
};

#[derive(Parser, Debug)]
#[command(about = "Analyze a board position")]
pub struct AnalyzeArgs {
    /// Board as nine cells, e.g. "x.o/.x./..." (x opponent, o machine, . empty)
    #[arg(long)]
    pub board: String,

    /// Side to move (machine or opponent); inferred from mark counts if omitted
    #[arg(long)]
    pub turn: Option<Side>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Rank of one child of the analyzed position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CandidateRank {
    pub cell: usize,
    pub rank: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub board: String,
    pub turn: Side,
    pub status: Status,
    pub policy: PrunePolicy,
    pub root_rank: i32,
    pub live_nodes: usize,
    pub node_budget: usize,
    pub build: BuildStats,
    pub candidates: Vec<CandidateRank>,
    /// Empty cells whose child was cut by pruning
    pub pruned: Vec<usize>,
    /// Move the machine would play, when it is the machine's turn
    pub selected: Option<usize>,
    /// Every machine move was pruned, so `selected` comes from a second tree
    /// built without pruning, as a game session would do
    pub unpruned_fallback: bool,
}

pub fn execute(args: AnalyzeArgs, config: &AppConfig) -> Result<()> {
    let board = Board::from_string(&args.board).context("parsing --board")?;
    let turn = match args.turn {
        Some(turn) => turn,
        None => board.infer_next_to_move()?,
    };

    let spinner = (!args.json).then(|| create_spinner("Building game tree..."));
    let report = analyze(board, turn, config)?;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&board, &report);
    }
    Ok(())
}

/// Build the tree for `board` and collect the ranks of its root.
pub fn analyze(board: Board, turn: Side, config: &AppConfig) -> Result<AnalysisReport> {
    let status = evaluate(&board);
    let built = build_tree(board, turn, &config.tree)?;
    let root = built.tree.node(built.root)?;

    let candidates = root
        .live_children()
        .map(|(cell, child)| {
            Ok(CandidateRank {
                cell,
                rank: built.tree.node(child)?.rank,
            })
        })
        .collect::<crate::Result<Vec<_>>>()?;

    let pruned = if status.is_terminal() {
        Vec::new()
    } else {
        board
            .empty_positions()
            .filter(|&cell| root.children[cell].is_none())
            .collect()
    };

    let mut unpruned_fallback = false;
    let selected = if turn == Side::Machine && !status.is_terminal() {
        match select_machine_move(&built.tree, built.root) {
            Ok(cell) => Some(cell),
            Err(Error::NoChildren) => {
                unpruned_fallback = true;
                let unpruned = TreeConfig {
                    prune: PrunePolicy::Off,
                    ..config.tree
                };
                let rebuilt = build_tree(board, turn, &unpruned)?;
                Some(select_machine_move(&rebuilt.tree, rebuilt.root)?)
            }
            Err(err) => return Err(err.into()),
        }
    } else {
        None
    };

    Ok(AnalysisReport {
        board: board.to_label(),
        turn,
        status,
        policy: config.tree.prune,
        root_rank: root.rank,
        live_nodes: built.tree.len(),
        node_budget: built.tree.limit(),
        build: built.stats,
        candidates,
        pruned,
        selected,
        unpruned_fallback,
    })
}

fn print_report(board: &Board, report: &AnalysisReport) {
    print_section("Position analysis");
    println!("{board}");
    println!();
    print_kv("Side to move", &report.turn.to_string());
    print_kv("Status", &report.status.to_string());
    print_kv("Prune policy", &report.policy.to_string());
    print_kv("Root rank", &report.root_rank.to_string());

    print_subsection("Tree");
    print_kv("Nodes created", &format_number(report.build.nodes_created));
    print_kv("Live nodes", &format_number(report.live_nodes));
    print_kv("Node budget", &format_number(report.node_budget));
    print_kv("Terminal leaves", &format_number(report.build.terminal_leaves));
    print_kv("Detached", &format_number(report.build.detached));
    print_kv("Reclaimed", &format_number(report.build.reclaimed));

    if report.status.is_terminal() {
        return;
    }

    print_subsection("Candidates");
    for candidate in &report.candidates {
        print_kv(&format!("cell {}", candidate.cell), &candidate.rank.to_string());
    }
    for cell in &report.pruned {
        print_kv(&format!("cell {cell}"), "pruned");
    }
    if let Some(cell) = report.selected {
        println!();
        if report.unpruned_fallback {
            println!("  Every move was pruned; choosing from an unpruned tree.");
        }
        print_kv("Machine plays", &cell.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_ranks_and_pruned_cells() {
        let board = Board::from_string("xox/xoo/.x.").unwrap();
        let report = analyze(board, Side::Machine, &AppConfig::default()).unwrap();

        assert_eq!(report.status, Status::InProgress);
        assert_eq!(report.candidates, vec![CandidateRank { cell: 6, rank: 0 }]);
        assert_eq!(report.pruned, vec![8]);
        assert_eq!(report.selected, Some(6));
        assert!(!report.unpruned_fallback);
        assert_eq!(report.node_budget, crate::tree::DEFAULT_MAX_NODES);
    }

    #[test]
    fn fully_pruned_position_selects_from_unpruned_tree() {
        // x x .
        // x o .
        // . . o     two threats, every machine reply loses
        let board = Board::from_string("xx./xo./..o").unwrap();
        let report = analyze(board, Side::Machine, &AppConfig::default()).unwrap();

        assert!(report.candidates.is_empty());
        assert_eq!(report.pruned, vec![2, 5, 6, 7]);
        assert!(report.unpruned_fallback);
        let cell = report.selected.unwrap();
        assert!(board.is_empty(cell));
    }

    #[test]
    fn selection_matches_the_reported_candidates() {
        let board = Board::from_string("x...o...x").unwrap();
        let report = analyze(board, Side::Machine, &AppConfig::default()).unwrap();

        let best = report.candidates.iter().map(|c| c.rank).max().unwrap();
        let expected = report
            .candidates
            .iter()
            .filter(|c| c.rank == best)
            .map(|c| c.cell)
            .max();
        assert_eq!(report.selected, expected);
        assert!(!report.unpruned_fallback);
    }

    #[test]
    fn empty_board_with_machine_to_move_is_analyzed() {
        let report = analyze(Board::new(), Side::Machine, &AppConfig::default()).unwrap();
        assert_eq!(report.turn, Side::Machine);
        assert_eq!(report.candidates.len(), 9);
        assert!(report.selected.is_some());
    }

    #[test]
    fn terminal_board_has_no_candidates() {
        let board = Board::from_string("ooo/xx./x..").unwrap();
        let report = analyze(board, Side::Opponent, &AppConfig::default()).unwrap();

        assert_eq!(report.status, Status::MachineWin);
        assert_eq!(report.root_rank, 2);
        assert!(report.candidates.is_empty());
        assert!(report.pruned.is_empty());
        assert_eq!(report.selected, None);
        assert_eq!(report.live_nodes, 1);
    }

    #[test]
    fn report_serializes_to_json() {
        let board = Board::from_string("xox/xoo/.x.").unwrap();
        let report = analyze(board, Side::Machine, &AppConfig::default()).unwrap();
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["turn"], "machine");
        assert_eq!(json["status"], "in-progress");
        assert_eq!(json["policy"], "detach");
        assert_eq!(json["selected"], 6);
    }
}
