//! Move source port - where the opponent's moves come from

use crate::{Error, Result, tictactoe::Board};

/// Supplies the opponent's chosen cell.
///
/// Implementations are asked again whenever the session rejects a proposed
/// cell, so a source that keeps proposing invalid cells should eventually
/// return an error (for example [`Error::InputClosed`]) instead.
///
/// # Examples
///
/// ```
/// use tictree::{ports::MoveSource, tictactoe::Board};
///
/// struct Center;
///
/// impl MoveSource for Center {
///     fn request_opponent_move(&mut self, _board: &Board) -> tictree::Result<usize> {
///         Ok(4)
///     }
/// }
/// ```
pub trait MoveSource {
    /// Ask for the opponent's next cell (0-8) on `board`.
    fn request_opponent_move(&mut self, board: &Board) -> Result<usize>;

    /// Called when the cell returned by the last request was rejected.
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to tell the player why.
    fn on_rejected(&mut self, _cell: usize, _error: &Error) -> Result<()> {
        Ok(())
    }
}

impl<T: MoveSource + ?Sized> MoveSource for &mut T {
    fn request_opponent_move(&mut self, board: &Board) -> Result<usize> {
        (**self).request_opponent_move(board)
    }

    fn on_rejected(&mut self, cell: usize, error: &Error) -> Result<()> {
        (**self).on_rejected(cell, error)
    }
}
