//! Winning lines and board classification

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Cell, board::Board};

/// Winning line indices on the 3x3 board
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

const MACHINE_LINE: u8 = 3 * Cell::Machine as u8;
const OPPONENT_LINE: u8 = 3 * Cell::Opponent as u8;

/// Classification of a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    InProgress,
    Draw,
    MachineWin,
    OpponentWin,
}

impl Status {
    /// Score contributed to the tree by a board with this classification
    pub fn rank(self) -> i32 {
        match self {
            Status::InProgress | Status::Draw => 0,
            Status::MachineWin => 2,
            Status::OpponentWin => -1,
        }
    }

    pub fn is_terminal(self) -> bool {
        self != Status::InProgress
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Status::InProgress => "in progress",
            Status::Draw => "draw",
            Status::MachineWin => "machine win",
            Status::OpponentWin => "opponent win",
        };
        f.write_str(label)
    }
}

/// Sum of cell weights along each of the eight lines
pub fn line_sums(board: &Board) -> [u8; 8] {
    let cells = board.cells();
    WINNING_LINES.map(|line| line.iter().map(|&idx| cells[idx].weight()).sum())
}

/// Classify a board.
///
/// A machine line is reported before an opponent line, then any empty cell
/// means the game is still running, otherwise the board is a draw.
pub fn evaluate(board: &Board) -> Status {
    let sums = line_sums(board);
    if sums.contains(&MACHINE_LINE) {
        Status::MachineWin
    } else if sums.contains(&OPPONENT_LINE) {
        Status::OpponentWin
    } else if !board.is_full() {
        Status::InProgress
    } else {
        Status::Draw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::Side;

    fn board(s: &str) -> Board {
        Board::from_string(s).unwrap()
    }

    #[test]
    fn test_empty_board_in_progress() {
        assert_eq!(evaluate(&Board::new()), Status::InProgress);
    }

    #[test]
    fn test_opponent_row() {
        assert_eq!(evaluate(&board("xxx/oo./...")), Status::OpponentWin);
    }

    #[test]
    fn test_machine_column() {
        assert_eq!(evaluate(&board("ox./ox./o.x")), Status::MachineWin);
    }

    #[test]
    fn test_machine_diagonal() {
        assert_eq!(evaluate(&board("x.o/xo./o.x")), Status::MachineWin);
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        // weights [1,4,1, 4,1,4, 4,1,4]
        assert_eq!(evaluate(&board("xox/oxo/oxo")), Status::Draw);
    }

    #[test]
    fn test_full_board_with_line_is_win() {
        assert_eq!(evaluate(&board("xxx/oox/oxo")), Status::OpponentWin);
    }

    #[test]
    fn test_mixed_lines_never_match_win_sums() {
        // Every two-mark or mixed line stays clear of 3 and 12.
        let mut cells = [Cell::Empty; 9];
        cells[0] = Side::Opponent.to_cell();
        cells[1] = Side::Opponent.to_cell();
        cells[2] = Side::Machine.to_cell();
        let sums = line_sums(&Board::from_cells(cells));
        assert_eq!(sums[0], 6);
        assert_eq!(evaluate(&Board::from_cells(cells)), Status::InProgress);
    }

    #[test]
    fn test_win_only_with_completed_line() {
        // Exhaustively check every board over {empty, opponent, machine}.
        let marks = [Cell::Empty, Cell::Opponent, Cell::Machine];
        for code in 0..3usize.pow(9) {
            let mut cells = [Cell::Empty; 9];
            let mut rest = code;
            for cell in cells.iter_mut() {
                *cell = marks[rest % 3];
                rest /= 3;
            }
            let b = Board::from_cells(cells);
            let completed = |target: Cell| {
                WINNING_LINES
                    .iter()
                    .any(|line| line.iter().all(|&i| cells[i] == target))
            };
            match evaluate(&b) {
                Status::MachineWin => assert!(completed(Cell::Machine)),
                Status::OpponentWin => {
                    assert!(completed(Cell::Opponent));
                    assert!(!completed(Cell::Machine));
                }
                Status::InProgress => {
                    assert!(!completed(Cell::Machine) && !completed(Cell::Opponent));
                    assert!(!b.is_full());
                }
                Status::Draw => {
                    assert!(!completed(Cell::Machine) && !completed(Cell::Opponent));
                    assert!(b.is_full());
                }
            }
        }
    }

    #[test]
    fn test_status_ranks() {
        assert_eq!(Status::Draw.rank(), 0);
        assert_eq!(Status::InProgress.rank(), 0);
        assert_eq!(Status::MachineWin.rank(), 2);
        assert_eq!(Status::OpponentWin.rank(), -1);
        assert!(!Status::InProgress.is_terminal());
        assert!(Status::Draw.is_terminal());
    }
}
