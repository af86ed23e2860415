//! Tree node representation.
//!
//! Each node is one hypothetical board reached from the root. Nodes own their
//! children through the arena slots and keep a non-owning parent index used
//! for rank propagation and pruning.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tictactoe::{Board, Side};

/// Index into the node arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node in the game tree
#[derive(Debug, Clone)]
pub struct Node {
    /// Board at this node
    pub board: Board,

    /// Cell filled to reach this node from its parent (None for a root)
    pub move_index: Option<usize>,

    /// Side whose mark is placed next from this board
    pub turn_to_move: Side,

    /// Additive score: this board's own rank plus every descendant's
    pub rank: i32,

    /// Parent node (None for a root). Never used to free.
    pub parent: Option<NodeId>,

    /// One slot per cell; `None` when occupied, never built, pruned or reclaimed
    pub children: [Option<NodeId>; 9],
}

impl Node {
    /// Create a root node for the real game's current board.
    pub fn root(board: Board, turn_to_move: Side) -> Self {
        Self {
            board,
            move_index: None,
            turn_to_move,
            rank: 0,
            parent: None,
            children: [None; 9],
        }
    }

    /// Create a child reached by filling `move_index`.
    pub fn child(
        parent: NodeId,
        move_index: usize,
        board: Board,
        turn_to_move: Side,
        rank: i32,
    ) -> Self {
        Self {
            board,
            move_index: Some(move_index),
            turn_to_move,
            rank,
            parent: Some(parent),
            children: [None; 9],
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Live children as `(cell, id)` pairs in ascending cell order
    pub fn live_children(&self) -> impl Iterator<Item = (usize, NodeId)> + '_ {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(cell, slot)| slot.map(|id| (cell, id)))
    }

    pub fn child_count(&self) -> usize {
        self.children.iter().flatten().count()
    }
}
