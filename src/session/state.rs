//! Live game state and the walk through the pre-built tree

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    Error, Result,
    config::TreeConfig,
    tictactoe::{Board, Side, Status, evaluate},
    tree::{GameTree, NodeId, PrunePolicy, TreeBuilder, select_machine_move},
};

/// Counters describing how a session used its tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Nodes allocated by every build in this session
    pub nodes_built: usize,
    /// Nodes released, both during builds and when branches were abandoned
    pub nodes_reclaimed: usize,
    /// Times the tree had to be rebuilt from the current board
    pub rebuilds: usize,
    /// Marks placed by either side
    pub plies: usize,
}

/// One game against the machine.
///
/// The opponent always opens. The tree is built once, right after the
/// opening move, and each later ply walks one level down it, reclaiming
/// every branch that was not taken.
#[derive(Debug)]
pub struct Session {
    board: Board,
    last_mover: Option<Side>,
    status: Status,
    tree: GameTree,
    current: Option<NodeId>,
    config: TreeConfig,
    stats: SessionStats,
}

impl Session {
    /// Start a game on an empty board. Nothing is built until the opening move.
    pub fn new(config: TreeConfig) -> Self {
        Self {
            board: Board::new(),
            last_mover: None,
            status: Status::InProgress,
            tree: GameTree::with_limit(config.max_nodes),
            current: None,
            config,
            stats: SessionStats::default(),
        }
    }

    /// Resume a game from `board` with `next_to_move` to play.
    ///
    /// The named side is trusted over the mark counts, so an empty board may
    /// be resumed with the machine to move. The tree is built immediately
    /// unless the board is already decided.
    pub fn from_position(board: Board, next_to_move: Side, config: TreeConfig) -> Result<Self> {
        let mut session = Self {
            board,
            last_mover: Some(next_to_move.other()),
            status: evaluate(&board),
            ..Self::new(config)
        };
        if !session.status.is_terminal() {
            let root = session.build_from_board(next_to_move, config.prune)?;
            session.current = Some(root);
        }
        Ok(session)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Side that placed the most recent mark. For a resumed position this is
    /// the side opposite the one named to move.
    pub fn last_mover(&self) -> Option<Side> {
        self.last_mover
    }

    pub fn next_to_move(&self) -> Side {
        self.last_mover.map_or(Side::Opponent, Side::other)
    }

    pub fn tree(&self) -> &GameTree {
        &self.tree
    }

    /// Node of the tree matching the current board, once built
    pub fn current_node(&self) -> Option<NodeId> {
        self.current
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// `(cell, rank)` of every live child the machine could move into.
    pub fn machine_candidates(&self) -> Result<Vec<(usize, i32)>> {
        let node = self.current.ok_or(Error::TreeNotBuilt)?;
        self.tree
            .node(node)?
            .live_children()
            .map(|(cell, child)| Ok((cell, self.tree.node(child)?.rank)))
            .collect()
    }

    /// Place the opponent's mark on `cell` and walk the tree to match.
    ///
    /// The opening move also builds the tree.
    ///
    /// # Errors
    ///
    /// - [`Error::GameOver`] once the game has ended
    /// - [`Error::OutOfTurn`] if the machine is due to move
    /// - [`Error::InvalidPosition`] / [`Error::InvalidMove`] for cells outside
    ///   0-8 or already occupied; the session is unchanged
    /// - [`Error::AllocationFailure`] if building the tree fails
    pub fn apply_opponent_move(&mut self, cell: usize) -> Result<()> {
        self.ensure_turn(Side::Opponent)?;
        self.board.validate_move(cell)?;

        self.place(cell, Side::Opponent);
        match self.current {
            Some(node) => self.advance(node, cell)?,
            None if !self.status.is_terminal() => {
                let root = self.build_from_board(Side::Machine, self.config.prune)?;
                self.current = Some(root);
            }
            None => {}
        }
        Ok(())
    }

    /// Let the machine pick a child of the current node and move into it.
    ///
    /// Returns the cell the machine played. If immediate-loss pruning left
    /// no child at all, the tree is rebuilt from the current board without
    /// pruning and the pick is made from that.
    pub fn apply_machine_move(&mut self) -> Result<usize> {
        self.ensure_turn(Side::Machine)?;
        let node = self.current.ok_or(Error::TreeNotBuilt)?;

        let (node, cell) = match select_machine_move(&self.tree, node) {
            Ok(cell) => (node, cell),
            Err(Error::NoChildren) => {
                warn!(
                    board = %self.board.to_label(),
                    "every machine move was pruned, rebuilding without pruning"
                );
                self.stats.nodes_reclaimed += self.tree.reclaim(node);
                let root = self.build_from_board(Side::Machine, PrunePolicy::Off)?;
                self.current = Some(root);
                self.stats.rebuilds += 1;
                (root, select_machine_move(&self.tree, root)?)
            }
            Err(err) => return Err(err),
        };

        self.place(cell, Side::Machine);
        self.advance(node, cell)?;
        Ok(cell)
    }

    fn ensure_turn(&self, side: Side) -> Result<()> {
        if self.status.is_terminal() {
            return Err(Error::GameOver);
        }
        let expected = self.next_to_move();
        if expected != side {
            return Err(Error::OutOfTurn { expected });
        }
        Ok(())
    }

    fn place(&mut self, cell: usize, side: Side) {
        self.board.place(cell, side);
        self.last_mover = Some(side);
        self.status = evaluate(&self.board);
        self.stats.plies += 1;
    }

    /// Move the walk from `former` into its child at `cell` and reclaim
    /// everything else under `former`.
    fn advance(&mut self, former: NodeId, cell: usize) -> Result<()> {
        let next = self.tree.detach(former, cell)?;
        let released = self.tree.reclaim(former);
        self.stats.nodes_reclaimed += released;

        match next {
            Some(child) => {
                self.tree.make_root(child)?;
                debug_assert_eq!(self.tree.node(child)?.board, self.board);
                self.current = Some(child);
            }
            None if self.status.is_terminal() => self.current = None,
            None => {
                info!(cell, "slot was pruned, rebuilding from the current board");
                let root = self.build_from_board(self.next_to_move(), self.config.prune)?;
                self.current = Some(root);
                self.stats.rebuilds += 1;
            }
        }

        debug!(
            cell,
            released,
            live = self.tree.len(),
            status = %self.status,
            "advanced game tree"
        );
        Ok(())
    }

    fn build_from_board(&mut self, turn: Side, policy: PrunePolicy) -> Result<NodeId> {
        let mut builder = TreeBuilder::new(&mut self.tree, policy);
        let root = builder.build(self.board, turn)?;
        let built = builder.stats();
        self.stats.nodes_built += built.nodes_created;
        self.stats.nodes_reclaimed += built.reclaimed;
        Ok(root)
    }
}
