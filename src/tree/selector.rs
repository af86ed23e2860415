//! Machine move selection

use tracing::trace;

use crate::{
    Error, Result,
    tree::{arena::GameTree, node::NodeId},
};

/// Pick the child slot the machine should move into.
///
/// Scans slots 0-8 and keeps the highest rank seen. A rank equal to the
/// current best replaces it, so ties go to the later slot.
///
/// # Errors
///
/// Returns [`Error::NoChildren`] when every slot is empty.
pub fn select_machine_move(tree: &GameTree, node: NodeId) -> Result<usize> {
    let mut best: Option<(usize, i32)> = None;

    for (cell, child) in tree.node(node)?.live_children() {
        let rank = tree.node(child)?.rank;
        trace!(cell, rank, "candidate");
        if best.is_none_or(|(_, best_rank)| rank >= best_rank) {
            best = Some((cell, rank));
        }
    }

    best.map(|(cell, _)| cell).ok_or(Error::NoChildren)
}
