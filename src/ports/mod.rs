//! Ports (trait boundaries) for the game's external collaborators.
//!
//! The session core never touches the console. It asks a [`MoveSource`] for
//! the opponent's cell and hands boards to a [`BoardRenderer`]; adapters in
//! [`crate::adapters`] implement both for the terminal and for tests.

pub mod move_source;
pub mod renderer;

pub use move_source::MoveSource;
pub use renderer::BoardRenderer;
