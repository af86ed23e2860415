//! Tree construction: expansion, rank propagation and immediate-loss pruning

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    Result,
    config::TreeConfig,
    tictactoe::{Board, Side, Status, evaluate},
    tree::{
        arena::GameTree,
        node::{Node, NodeId},
    },
};

/// What happens to a node once one of its children is an opponent win.
///
/// Such a node lets the opponent win on the very next ply, so its parent
/// should never move into it. The policies differ only in when the detached
/// subtree's storage is released; every policy that prunes propagates the
/// same ranks and so produces the same moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrunePolicy {
    /// Never prune
    Off,
    /// Clear the parent's slot; the subtree stays allocated until the arena drops
    #[default]
    Detach,
    /// Clear the parent's slot and reclaim the subtree once it is fully built
    Reclaim,
}

impl fmt::Display for PrunePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PrunePolicy::Off => "off",
            PrunePolicy::Detach => "detach",
            PrunePolicy::Reclaim => "reclaim",
        };
        f.write_str(label)
    }
}

impl FromStr for PrunePolicy {
    type Err = crate::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalised = s.trim().to_ascii_lowercase();
        match normalised.as_str() {
            "off" | "none" | "disabled" => Ok(PrunePolicy::Off),
            "detach" | "leak" => Ok(PrunePolicy::Detach),
            "reclaim" | "free" => Ok(PrunePolicy::Reclaim),
            _ => Err(crate::Error::ParsePrunePolicy {
                input: s.to_string(),
                expected: "off, detach, reclaim".to_string(),
            }),
        }
    }
}

/// Counters collected while building a tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStats {
    /// Nodes allocated, root included
    pub nodes_created: usize,
    /// Children that ended the game (win or draw)
    pub terminal_leaves: usize,
    /// Nodes cut from their parent by immediate-loss pruning
    pub detached: usize,
    /// Nodes released during the build under [`PrunePolicy::Reclaim`]
    pub reclaimed: usize,
}

/// Expands nodes of a [`GameTree`] into every legal continuation.
pub struct TreeBuilder<'a> {
    tree: &'a mut GameTree,
    policy: PrunePolicy,
    stats: BuildStats,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(tree: &'a mut GameTree, policy: PrunePolicy) -> Self {
        Self {
            tree,
            policy,
            stats: BuildStats::default(),
        }
    }

    /// Counters accumulated by this builder so far.
    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Allocate a root for `board` and build the whole tree below it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::AllocationFailure`] if the arena runs out of
    /// room. The partially built tree is left in the arena and must be
    /// discarded by the caller.
    pub fn build(&mut self, board: Board, turn_to_move: Side) -> Result<NodeId> {
        let mut root = Node::root(board, turn_to_move);
        let status = evaluate(&board);
        root.rank = status.rank();

        let root_id = self.tree.allocate(root)?;
        self.stats.nodes_created += 1;

        if status == Status::InProgress {
            self.expand(root_id)?;
        }

        debug!(
            root = %root_id,
            board = %board.to_label(),
            turn = %turn_to_move,
            policy = %self.policy,
            nodes = self.stats.nodes_created,
            detached = self.stats.detached,
            reclaimed = self.stats.reclaimed,
            live = self.tree.len(),
            "built game tree"
        );
        Ok(root_id)
    }

    /// Create one child per empty cell of `parent_id` (ascending), scoring
    /// and attaching each before recursing into it.
    pub fn expand(&mut self, parent_id: NodeId) -> Result<()> {
        let (board, turn, grandparent) = {
            let parent = self.tree.node(parent_id)?;
            (parent.board, parent.turn_to_move, parent.parent)
        };

        for cell in board.empty_positions() {
            let mut child_board = board;
            child_board.place(cell, turn);
            let status = evaluate(&child_board);
            let rank = status.rank();

            let child = Node::child(parent_id, cell, child_board, turn.other(), rank);
            let child_id = self.tree.allocate(child)?;
            self.stats.nodes_created += 1;

            self.propagate(parent_id, rank)?;
            self.tree.node_mut(parent_id)?.children[cell] = Some(child_id);

            if status == Status::OpponentWin && self.policy != PrunePolicy::Off {
                if let Some(grandparent) = grandparent {
                    self.detach_from(grandparent, parent_id)?;
                }
            }

            if status == Status::InProgress {
                self.expand(child_id)?;
            } else {
                self.stats.terminal_leaves += 1;
            }
        }

        if self.policy == PrunePolicy::Reclaim && self.tree.is_detached(parent_id)? {
            let released = self.tree.reclaim(parent_id);
            self.stats.reclaimed += released;
            trace!(node = %parent_id, released, "reclaimed pruned subtree");
        }

        Ok(())
    }

    /// Add `rank` to `from` and every ancestor up to the root.
    fn propagate(&mut self, from: NodeId, rank: i32) -> Result<()> {
        if rank == 0 {
            return Ok(());
        }
        let mut cursor = Some(from);
        while let Some(id) = cursor {
            let node = self.tree.node_mut(id)?;
            node.rank += rank;
            cursor = node.parent;
        }
        Ok(())
    }

    /// Clear the slot of `grandparent` that holds `node`, if it still does.
    fn detach_from(&mut self, grandparent: NodeId, node: NodeId) -> Result<()> {
        let Some(cell) = self.tree.node(node)?.move_index else {
            return Ok(());
        };
        if self.tree.node(grandparent)?.children[cell] != Some(node) {
            return Ok(());
        }
        self.tree.detach(grandparent, cell)?;
        self.stats.detached += 1;
        trace!(node = %node, parent = %grandparent, cell, "pruned immediate loss");
        Ok(())
    }
}

/// A freshly built tree together with its root
#[derive(Debug)]
pub struct BuiltTree {
    pub tree: GameTree,
    pub root: NodeId,
    pub stats: BuildStats,
}

/// Build the complete tree for `board` with `turn_to_move` to play next.
pub fn build_tree(board: Board, turn_to_move: Side, config: &TreeConfig) -> Result<BuiltTree> {
    let mut tree = GameTree::with_limit(config.max_nodes);
    let mut builder = TreeBuilder::new(&mut tree, config.prune);
    let root = builder.build(board, turn_to_move)?;
    let stats = builder.stats();
    Ok(BuiltTree { tree, root, stats })
}
