//! Shared helpers for the tictree integration tests.

#![allow(dead_code)]

use tictree::{
    config::TreeConfig,
    tictactoe::{Board, evaluate},
    tree::{GameTree, NodeId, PrunePolicy},
};

/// Parse a board literal, panicking on malformed input.
pub fn board(cells: &str) -> Board {
    Board::from_string(cells).expect("valid board literal")
}

/// Default tree settings with the given prune policy.
pub fn tree_config(prune: PrunePolicy) -> TreeConfig {
    TreeConfig {
        prune,
        ..TreeConfig::default()
    }
}

/// Check that every node reachable from `root` carries its own rank plus
/// the sum of its children's ranks.
///
/// Only holds for trees built without pruning.
pub fn assert_ranks_are_additive(tree: &GameTree, root: NodeId) {
    for id in tree.descendants(root) {
        let node = tree.node(id).unwrap();
        let children: i32 = node
            .live_children()
            .map(|(_, child)| tree.node(child).unwrap().rank)
            .sum();
        assert_eq!(
            node.rank,
            evaluate(&node.board).rank() + children,
            "rank mismatch at {id} ({})",
            node.board.to_label()
        );
    }
}

/// Replay `moves` on an empty board.
pub fn replay(moves: &[tictree::session::PlayedMove]) -> Board {
    moves.iter().fold(Board::new(), |board, played| {
        board
            .with_mark(played.cell, played.side)
            .expect("recorded move is legal")
    })
}
