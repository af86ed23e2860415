//! Turn loop connecting a [`Session`] to its collaborators

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Error, Result,
    ports::{BoardRenderer, MoveSource},
    session::state::{Session, SessionStats},
    tictactoe::{Board, Side, Status},
};

/// A mark placed during the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedMove {
    pub side: Side,
    pub cell: usize,
}

/// Summary of a finished game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameReport {
    pub status: Status,
    pub board: Board,
    pub moves: Vec<PlayedMove>,
    pub stats: SessionStats,
}

/// Plays a [`Session`] to completion, asking `source` for opponent moves and
/// showing every ply through `renderer`.
pub struct SessionDriver<S, R> {
    session: Session,
    source: S,
    renderer: R,
    show_ranks: bool,
}

impl<S: MoveSource, R: BoardRenderer> SessionDriver<S, R> {
    pub fn new(session: Session, source: S, renderer: R) -> Self {
        Self {
            session,
            source,
            renderer,
            show_ranks: false,
        }
    }

    /// Report machine candidate ranks to the renderer before each machine move.
    pub fn with_show_ranks(mut self, show_ranks: bool) -> Self {
        self.show_ranks = show_ranks;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Alternate opponent and machine plies until the game ends.
    ///
    /// Nothing is requested from the source and no machine move is selected
    /// once the status is terminal.
    pub fn play(&mut self) -> Result<GameReport> {
        let mut moves = Vec::new();
        self.renderer.render_board(self.session.board())?;

        while !self.session.status().is_terminal() {
            let side = self.session.next_to_move();
            let cell = match side {
                Side::Opponent => self.opponent_turn()?,
                Side::Machine => self.machine_turn()?,
            };
            moves.push(PlayedMove { side, cell });
            self.renderer.on_move(side, cell)?;
            self.renderer.render_board(self.session.board())?;
        }

        let status = self.session.status();
        debug!(%status, plies = moves.len(), "game finished");
        self.renderer.on_game_end(status)?;

        Ok(GameReport {
            status,
            board: *self.session.board(),
            moves,
            stats: self.session.stats(),
        })
    }

    fn opponent_turn(&mut self) -> Result<usize> {
        loop {
            let cell = self.source.request_opponent_move(self.session.board())?;
            match self.session.apply_opponent_move(cell) {
                Ok(()) => return Ok(cell),
                Err(err @ (Error::InvalidMove { .. } | Error::InvalidPosition { .. })) => {
                    debug!(cell, %err, "rejected opponent move");
                    self.source.on_rejected(cell, &err)?;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn machine_turn(&mut self) -> Result<usize> {
        if self.show_ranks {
            let candidates = self.session.machine_candidates()?;
            self.renderer.on_candidates(&candidates)?;
        }
        self.session.apply_machine_move()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapters::{QueuedMoves, RecordingRenderer},
        config::TreeConfig,
    };

    #[test]
    fn rejected_moves_are_requested_again() {
        let session = Session::new(TreeConfig::default());
        let mut source = QueuedMoves::new([12, 4]);
        let mut renderer = RecordingRenderer::default();
        let mut driver = SessionDriver::new(session, &mut source, &mut renderer);

        // Only the opening is scripted; the next request runs dry.
        let err = driver.play().unwrap_err();
        assert!(matches!(err, Error::InputClosed));
        assert_eq!(driver.session().board().count(Side::Opponent), 1);
        assert_eq!(driver.session().board().count(Side::Machine), 1);

        assert_eq!(source.rejected(), &[12]);
        assert_eq!(renderer.moves[0], (Side::Opponent, 4));
        assert_eq!(renderer.moves[1].0, Side::Machine);
        assert!(renderer.outcome.is_none());
    }

    #[test]
    fn show_ranks_reports_candidates() {
        let board = Board::from_string("xox/xoo/.x.").unwrap();
        let session = Session::from_position(board, Side::Machine, TreeConfig::default()).unwrap();
        let mut renderer = RecordingRenderer::default();
        let mut driver =
            SessionDriver::new(session, QueuedMoves::new([8]), &mut renderer).with_show_ranks(true);

        let report = driver.play().unwrap();
        assert_eq!(report.status, Status::Draw);
        assert_eq!(renderer.candidates, vec![vec![(6, 0)]]);
        assert_eq!(
            report.moves,
            vec![
                PlayedMove {
                    side: Side::Machine,
                    cell: 6
                },
                PlayedMove {
                    side: Side::Opponent,
                    cell: 8
                },
            ]
        );
    }
}
