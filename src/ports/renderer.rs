//! Renderer port - where boards and game events are shown

use crate::{
    Result,
    tictactoe::{Board, Side, Status},
};

/// Receives the board after every ply plus a few game events.
///
/// Only [`render_board`](BoardRenderer::render_board) is required; the event
/// hooks default to doing nothing.
pub trait BoardRenderer {
    /// Show the current board.
    fn render_board(&mut self, board: &Board) -> Result<()>;

    /// Called with `(cell, rank)` for each live machine candidate before the
    /// machine picks, when rank display is enabled.
    fn on_candidates(&mut self, _candidates: &[(usize, i32)]) -> Result<()> {
        Ok(())
    }

    /// Called after either side's move has been applied.
    fn on_move(&mut self, _side: Side, _cell: usize) -> Result<()> {
        Ok(())
    }

    /// Called once when the game reaches a terminal status.
    fn on_game_end(&mut self, _status: Status) -> Result<()> {
        Ok(())
    }
}

impl<T: BoardRenderer + ?Sized> BoardRenderer for &mut T {
    fn render_board(&mut self, board: &Board) -> Result<()> {
        (**self).render_board(board)
    }

    fn on_candidates(&mut self, candidates: &[(usize, i32)]) -> Result<()> {
        (**self).on_candidates(candidates)
    }

    fn on_move(&mut self, side: Side, cell: usize) -> Result<()> {
        (**self).on_move(side, cell)
    }

    fn on_game_end(&mut self, status: Status) -> Result<()> {
        (**self).on_game_end(status)
    }
}
