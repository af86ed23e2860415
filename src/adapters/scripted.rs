//! In-memory move sources and renderers.
//!
//! These adapters avoid any console I/O, which makes whole games easy to
//! drive from tests.

use std::collections::VecDeque;

use crate::{
    Error, Result,
    ports::{BoardRenderer, MoveSource},
    tictactoe::{Board, Side, Status},
};

/// Replays a fixed list of cells verbatim, valid or not.
///
/// Returns [`Error::InputClosed`] once the list is exhausted.
///
/// # Examples
///
/// ```
/// use tictree::{adapters::QueuedMoves, ports::MoveSource, tictactoe::Board};
///
/// let mut source = QueuedMoves::new([4, 0]);
/// assert_eq!(source.request_opponent_move(&Board::new())?, 4);
/// assert_eq!(source.request_opponent_move(&Board::new())?, 0);
/// assert!(source.request_opponent_move(&Board::new()).is_err());
/// # Ok::<(), tictree::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueuedMoves {
    queue: VecDeque<usize>,
    requests: usize,
    rejected: Vec<usize>,
}

impl QueuedMoves {
    pub fn new(cells: impl IntoIterator<Item = usize>) -> Self {
        Self {
            queue: cells.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Number of times a move was requested
    pub fn requests(&self) -> usize {
        self.requests
    }

    /// Cells the session refused, in order
    pub fn rejected(&self) -> &[usize] {
        &self.rejected
    }
}

impl MoveSource for QueuedMoves {
    fn request_opponent_move(&mut self, _board: &Board) -> Result<usize> {
        self.requests += 1;
        self.queue.pop_front().ok_or(Error::InputClosed)
    }

    fn on_rejected(&mut self, cell: usize, _error: &Error) -> Result<()> {
        self.rejected.push(cell);
        Ok(())
    }
}

/// Plays the first cell of a preference list that is still empty.
///
/// Useful when the machine's replies are not known in advance: the source
/// always produces a legal move as long as the list covers the board.
#[derive(Debug, Clone)]
pub struct PreferenceMoves {
    order: Vec<usize>,
    requests: usize,
}

impl PreferenceMoves {
    pub fn new(order: impl IntoIterator<Item = usize>) -> Self {
        Self {
            order: order.into_iter().collect(),
            requests: 0,
        }
    }

    /// Cells in ascending order
    pub fn ascending() -> Self {
        Self::new(0..9)
    }

    pub fn requests(&self) -> usize {
        self.requests
    }
}

impl MoveSource for PreferenceMoves {
    fn request_opponent_move(&mut self, board: &Board) -> Result<usize> {
        self.requests += 1;
        self.order
            .iter()
            .copied()
            .find(|&cell| cell < 9 && board.is_empty(cell))
            .ok_or(Error::InputClosed)
    }
}

/// Keeps everything it is shown
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pub boards: Vec<Board>,
    pub moves: Vec<(Side, usize)>,
    pub candidates: Vec<Vec<(usize, i32)>>,
    pub outcome: Option<Status>,
    /// Number of `on_game_end` calls
    pub endings: usize,
}

impl BoardRenderer for RecordingRenderer {
    fn render_board(&mut self, board: &Board) -> Result<()> {
        self.boards.push(*board);
        Ok(())
    }

    fn on_candidates(&mut self, candidates: &[(usize, i32)]) -> Result<()> {
        self.candidates.push(candidates.to_vec());
        Ok(())
    }

    fn on_move(&mut self, side: Side, cell: usize) -> Result<()> {
        self.moves.push((side, cell));
        Ok(())
    }

    fn on_game_end(&mut self, status: Status) -> Result<()> {
        self.outcome = Some(status);
        self.endings += 1;
        Ok(())
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl BoardRenderer for NullRenderer {
    fn render_board(&mut self, _board: &Board) -> Result<()> {
        Ok(())
    }
}
