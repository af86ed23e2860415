//! Board representation and basic operations

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A cell on the Tic-Tac-Toe board.
///
/// The discriminants are the cell weights used by line sums: three opponent
/// marks sum to 3, three machine marks sum to 12, and no other mix of
/// `{0, 1, 4}` reaches either value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Empty = 0,
    Opponent = 1,
    Machine = 4,
}

impl Cell {
    /// Numeric weight of this cell in a line sum
    pub fn weight(self) -> u8 {
        self as u8
    }

    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Opponent => 'x',
            Cell::Machine => 'o',
        }
    }

    /// Parse a single board character. Digits are accepted as empty cells so
    /// that boards copied from the rendered prompt parse back.
    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '-' | '_' | '0'..='8' => Some(Cell::Empty),
            'x' | 'X' => Some(Cell::Opponent),
            'o' | 'O' => Some(Cell::Machine),
            _ => None,
        }
    }
}

/// One of the two sides placing marks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The human player, who always opens the game
    Opponent,
    /// The engine walking the pre-computed tree
    Machine,
}

impl Side {
    /// Get the other side
    pub fn other(self) -> Side {
        match self {
            Side::Opponent => Side::Machine,
            Side::Machine => Side::Opponent,
        }
    }

    /// The mark this side places on the board
    pub fn to_cell(self) -> Cell {
        match self {
            Side::Opponent => Cell::Opponent,
            Side::Machine => Cell::Machine,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Side::Opponent => "opponent",
            Side::Machine => "machine",
        };
        f.write_str(label)
    }
}

impl FromStr for Side {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "opponent" | "human" | "user" | "x" => Ok(Side::Opponent),
            "machine" | "cpu" | "computer" | "o" => Ok(Side::Machine),
            _ => Err(crate::Error::ParseSide {
                input: s.to_string(),
            }),
        }
    }
}

/// A 3x3 board stored row-major as nine cells.
///
/// Cells only ever move from `Empty` to a mark; nothing in the crate clears
/// an occupied cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Cell; 9]) -> Self {
        Board { cells }
    }

    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Get cell at position (0-8)
    pub fn get(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    /// Check if a position is empty
    pub fn is_empty(&self, pos: usize) -> bool {
        self.cells[pos] == Cell::Empty
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Empty positions in ascending order
    pub fn empty_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
    }

    /// Number of marks `side` has on the board
    pub fn count(&self, side: Side) -> usize {
        let target = side.to_cell();
        self.cells.iter().filter(|&&cell| cell == target).count()
    }

    /// Check that `pos` is on the board and unoccupied.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPosition`] for indices outside 0-8 and
    /// [`crate::Error::InvalidMove`] for occupied cells.
    pub fn validate_move(&self, pos: usize) -> Result<(), crate::Error> {
        if pos >= 9 {
            return Err(crate::Error::InvalidPosition { position: pos });
        }
        if !self.is_empty(pos) {
            return Err(crate::Error::InvalidMove { position: pos });
        }
        Ok(())
    }

    /// Return a copy of the board with `side`'s mark placed at `pos`
    #[must_use = "with_mark returns a new board; the original is unchanged"]
    pub fn with_mark(&self, pos: usize, side: Side) -> Result<Board, crate::Error> {
        self.validate_move(pos)?;
        let mut next = *self;
        next.cells[pos] = side.to_cell();
        Ok(next)
    }

    /// Place a mark on a cell already known to be empty.
    pub(crate) fn place(&mut self, pos: usize, side: Side) {
        debug_assert!(self.is_empty(pos), "placing onto occupied cell {pos}");
        self.cells[pos] = side.to_cell();
    }

    /// Work out whose ply is next from the mark counts.
    ///
    /// The opponent always opens, so equal counts mean the opponent moves
    /// next and one extra opponent mark means the machine does.
    pub fn infer_next_to_move(&self) -> Result<Side, crate::Error> {
        let opponent = self.count(Side::Opponent);
        let machine = self.count(Side::Machine);
        match opponent.checked_sub(machine) {
            Some(0) => Ok(Side::Opponent),
            Some(1) => Ok(Side::Machine),
            _ => Err(crate::Error::InvalidMarkCounts {
                opponent,
                machine,
                context: self.to_label(),
            }),
        }
    }

    /// Parse a board from nine non-whitespace characters.
    ///
    /// `x` is an opponent mark, `o` a machine mark, and `.`, `-`, `_` or a
    /// digit an empty cell. Whitespace and `/` separators are ignored, so
    /// `"x.. / .o. / ..."` is accepted.
    ///
    /// # Errors
    ///
    /// Returns error if fewer than 9 cell characters are present or any
    /// character is not a valid cell.
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/')
            .collect();
        if chars.len() < 9 {
            return Err(crate::Error::InvalidBoardLength {
                expected: 9,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; 9];
        for (i, &c) in chars.iter().take(9).enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }

        Ok(Board { cells })
    }

    /// Compact nine-character encoding, e.g. `x...o....`
    pub fn to_label(&self) -> String {
        self.cells.iter().map(|cell| cell.to_char()).collect()
    }
}

impl FromStr for Board {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::from_string(s)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(3) && i < 8 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board() {
        let board = Board::new();
        assert_eq!(board.empty_positions().count(), 9);
        assert!(!board.is_full());
    }

    #[test]
    fn test_weights() {
        assert_eq!(Cell::Empty.weight(), 0);
        assert_eq!(Cell::Opponent.weight(), 1);
        assert_eq!(Cell::Machine.weight(), 4);
    }

    #[test]
    fn test_with_mark() {
        let board = Board::new();
        let next = board.with_mark(4, Side::Opponent).unwrap();
        assert_eq!(next.get(4), Cell::Opponent);
        assert_eq!(board.get(4), Cell::Empty);

        let err = next.with_mark(4, Side::Machine).unwrap_err();
        assert!(err.to_string().contains("occupied"));
    }

    #[test]
    fn test_validate_move_out_of_range() {
        let board = Board::new();
        assert!(matches!(
            board.validate_move(9),
            Err(crate::Error::InvalidPosition { position: 9 })
        ));
    }

    #[test]
    fn test_from_string() {
        let board = Board::from_string("x.. / .o. / ...").unwrap();
        assert_eq!(board.get(0), Cell::Opponent);
        assert_eq!(board.get(4), Cell::Machine);
        assert_eq!(board.empty_positions().count(), 7);

        let digits = Board::from_string("x12345678").unwrap();
        assert_eq!(digits.count(Side::Opponent), 1);
        assert_eq!(digits.empty_positions().count(), 8);
    }

    #[test]
    fn test_from_string_rejects_bad_input() {
        assert!(matches!(
            Board::from_string("xo."),
            Err(crate::Error::InvalidBoardLength { got: 3, .. })
        ));
        assert!(matches!(
            Board::from_string("x...z...."),
            Err(crate::Error::InvalidCellCharacter {
                character: 'z',
                position: 4,
                ..
            })
        ));
    }

    #[test]
    fn test_infer_next_to_move() {
        assert_eq!(Board::new().infer_next_to_move().unwrap(), Side::Opponent);
        let board = Board::from_string("x........").unwrap();
        assert_eq!(board.infer_next_to_move().unwrap(), Side::Machine);
        let board = Board::from_string("xo.......").unwrap();
        assert_eq!(board.infer_next_to_move().unwrap(), Side::Opponent);
        assert!(Board::from_string("oo.......").unwrap().infer_next_to_move().is_err());
    }

    #[test]
    fn test_display() {
        let board = Board::from_string("x...o...x").unwrap();
        assert_eq!(board.to_string(), "x..\n.o.\n..x");
        assert_eq!(board.to_label(), "x...o...x");
    }

    #[test]
    fn test_side_parsing() {
        assert_eq!("Machine".parse::<Side>().unwrap(), Side::Machine);
        assert_eq!("x".parse::<Side>().unwrap(), Side::Opponent);
        assert!("nobody".parse::<Side>().is_err());
        assert_eq!(Side::Opponent.other(), Side::Machine);
    }
}
