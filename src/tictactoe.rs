//! Tic-Tac-Toe board and classification

pub mod board;
pub mod lines;

pub use board::{Board, Cell, Side};
pub use lines::{Status, WINNING_LINES, evaluate, line_sums};
