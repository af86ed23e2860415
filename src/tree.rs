//! Pre-computed game tree: storage, construction and move selection

pub mod arena;
pub mod builder;
pub mod node;
pub mod selector;

pub use arena::{DEFAULT_MAX_NODES, GameTree};
pub use builder::{BuildStats, BuiltTree, PrunePolicy, TreeBuilder, build_tree};
pub use node::{Node, NodeId};
pub use selector::select_machine_move;
