//! Adapters implementing the move source and renderer ports.
//!
//! - [`terminal`]: stdin prompts and colored board output for interactive play
//! - [`scripted`]: queued and preference-ordered move sources plus a
//!   recording renderer, used by tests and non-interactive runs
//! - [`random`]: seeded uniform opponent for simulations

pub mod random;
pub mod scripted;
pub mod terminal;

pub use random::RandomMoves;
pub use scripted::{NullRenderer, PreferenceMoves, QueuedMoves, RecordingRenderer};
pub use terminal::{TerminalInput, TerminalRenderer};
