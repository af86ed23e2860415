//! Game tree storage with arena allocation.
//!
//! Nodes live in a contiguous `Vec` and are referenced by [`NodeId`]. Freed
//! slots go on a free list and are reused by later allocations, so the live
//! count returns to its baseline once a subtree is reclaimed.

use crate::{
    Error, Result,
    tree::node::{Node, NodeId},
};

/// Node budget used when no limit is configured. A full tree after the
/// opening move holds on the order of 60k nodes.
pub const DEFAULT_MAX_NODES: usize = 1_000_000;

/// Arena holding every node of one or more trees
#[derive(Debug)]
pub struct GameTree {
    /// Arena slots; `None` marks a reclaimed node
    slots: Vec<Option<Node>>,

    /// Reclaimed slots available for reuse
    free: Vec<NodeId>,

    /// Number of occupied slots
    live: usize,

    /// Maximum number of live nodes before allocation fails
    max_nodes: usize,
}

impl GameTree {
    /// Create an empty arena with the default node budget.
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_MAX_NODES)
    }

    /// Create an empty arena that refuses to hold more than `max_nodes` nodes.
    pub fn with_limit(max_nodes: usize) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
            max_nodes,
        }
    }

    /// Get the node budget.
    #[inline]
    pub fn limit(&self) -> usize {
        self.max_nodes
    }

    /// Number of live (allocated, not yet reclaimed) nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Largest number of slots the arena has ever held.
    #[inline]
    pub fn high_water_mark(&self) -> usize {
        self.slots.len()
    }

    /// Get a node if it is live.
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.index())?.as_ref()
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots.get_mut(id.index())?.as_mut()
    }

    /// Get a live node or report a dangling id.
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.get(id).ok_or(Error::DanglingNode { id: id.0 })
    }

    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.get_mut(id).ok_or(Error::DanglingNode { id: id.0 })
    }

    /// Store a node and return its id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`] when the node budget is exhausted
    /// or the arena cannot grow.
    pub fn allocate(&mut self, node: Node) -> Result<NodeId> {
        let limit = self.max_nodes;
        let failure = |allocated| Error::AllocationFailure { allocated, limit };

        if self.live >= self.max_nodes {
            return Err(failure(self.live));
        }

        let id = match self.free.pop() {
            Some(id) => {
                self.slots[id.index()] = Some(node);
                id
            }
            None => {
                let raw = u32::try_from(self.slots.len()).map_err(|_| failure(self.live))?;
                self.slots.try_reserve(1).map_err(|_| failure(self.live))?;
                self.slots.push(Some(node));
                NodeId(raw)
            }
        };

        self.live += 1;
        Ok(id)
    }

    /// Clear `parent`'s slot for `cell` and return what it held.
    pub fn detach(&mut self, parent: NodeId, cell: usize) -> Result<Option<NodeId>> {
        let node = self.node_mut(parent)?;
        Ok(node.children.get_mut(cell).and_then(Option::take))
    }

    /// Whether `id` has a parent whose slot no longer points back at it.
    ///
    /// A root is never detached. A node whose parent has been reclaimed
    /// counts as detached.
    pub fn is_detached(&self, id: NodeId) -> Result<bool> {
        let node = self.node(id)?;
        let (Some(parent), Some(cell)) = (node.parent, node.move_index) else {
            return Ok(false);
        };
        Ok(self
            .get(parent)
            .is_none_or(|p| p.children[cell] != Some(id)))
    }

    /// Turn a live node into a root by dropping its parent link.
    pub fn make_root(&mut self, id: NodeId) -> Result<()> {
        self.node_mut(id)?.parent = None;
        Ok(())
    }

    /// Release `id` and every node reachable through its child slots.
    ///
    /// Children are released before their parent. Reclaiming a node that is
    /// not live does nothing. Returns the number of nodes released.
    pub fn reclaim(&mut self, id: NodeId) -> usize {
        let children = match self.get_mut(id) {
            Some(node) => std::mem::take(&mut node.children),
            None => return 0,
        };

        let mut released = 0;
        for child in children.into_iter().flatten() {
            released += self.reclaim(child);
        }

        self.slots[id.index()] = None;
        self.free.push(id);
        self.live -= 1;
        released + 1
    }

    /// Ids of `root` and every node reachable from it, in pre-order.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.get(id) else {
                continue;
            };
            out.push(id);
            stack.extend(node.children.iter().rev().flatten());
        }
        out
    }

    /// Number of live nodes reachable from `root`, including `root`.
    pub fn reachable_from(&self, root: NodeId) -> usize {
        self.descendants(root).len()
    }
}

impl Default for GameTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::{Board, Side};

    fn chain(tree: &mut GameTree) -> (NodeId, NodeId, NodeId) {
        let root = tree.allocate(Node::root(Board::new(), Side::Opponent)).unwrap();
        let board = Board::new().with_mark(0, Side::Opponent).unwrap();
        let child = tree
            .allocate(Node::child(root, 0, board, Side::Machine, 0))
            .unwrap();
        tree.node_mut(root).unwrap().children[0] = Some(child);
        let board = board.with_mark(4, Side::Machine).unwrap();
        let grandchild = tree
            .allocate(Node::child(child, 4, board, Side::Opponent, 0))
            .unwrap();
        tree.node_mut(child).unwrap().children[4] = Some(grandchild);
        (root, child, grandchild)
    }

    #[test]
    fn allocate_and_lookup() {
        let mut tree = GameTree::new();
        let (root, child, _) = chain(&mut tree);
        assert_eq!(tree.len(), 3);
        assert!(tree.node(root).unwrap().is_root());
        assert_eq!(tree.node(child).unwrap().parent, Some(root));
        assert_eq!(tree.reachable_from(root), 3);
    }

    #[test]
    fn allocation_fails_past_limit() {
        let mut tree = GameTree::with_limit(2);
        tree.allocate(Node::root(Board::new(), Side::Opponent)).unwrap();
        tree.allocate(Node::root(Board::new(), Side::Opponent)).unwrap();
        let err = tree
            .allocate(Node::root(Board::new(), Side::Opponent))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::AllocationFailure {
                allocated: 2,
                limit: 2
            }
        ));
    }

    #[test]
    fn reclaim_releases_whole_subtree() {
        let mut tree = GameTree::new();
        let (root, child, grandchild) = chain(&mut tree);
        assert_eq!(tree.reclaim(root), 3);
        assert!(tree.is_empty());
        assert!(tree.get(child).is_none());
        assert!(tree.get(grandchild).is_none());
        assert_eq!(tree.reclaim(root), 0);
    }

    #[test]
    fn reclaimed_slots_are_reused() {
        let mut tree = GameTree::new();
        let (root, _, _) = chain(&mut tree);
        tree.reclaim(root);
        chain(&mut tree);
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.high_water_mark(), 3);
    }

    #[test]
    fn detach_leaves_subtree_allocated() {
        let mut tree = GameTree::new();
        let (root, child, grandchild) = chain(&mut tree);
        assert_eq!(tree.detach(root, 0).unwrap(), Some(child));
        assert!(tree.is_detached(child).unwrap());
        assert!(!tree.is_detached(grandchild).unwrap());
        assert!(!tree.is_detached(root).unwrap());
        assert_eq!(tree.reachable_from(root), 1);
        assert_eq!(tree.len(), 3);

        assert_eq!(tree.reclaim(root), 1);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn make_root_drops_parent_link() {
        let mut tree = GameTree::new();
        let (root, child, _) = chain(&mut tree);
        tree.detach(root, 0).unwrap();
        tree.reclaim(root);
        tree.make_root(child).unwrap();
        assert!(tree.node(child).unwrap().is_root());
        assert!(!tree.is_detached(child).unwrap());
    }

    #[test]
    fn dangling_lookup_is_an_error() {
        let tree = GameTree::new();
        assert!(matches!(
            tree.node(NodeId(7)),
            Err(Error::DanglingNode { id: 7 })
        ));
    }
}
