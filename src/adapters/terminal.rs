//! Console adapters: line-based move prompts and a colored board renderer.

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use crossterm::style::{Color, Stylize};

use crate::{
    Error, Result,
    ports::{BoardRenderer, MoveSource},
    tictactoe::{Board, Cell, Side, Status},
};

const PROMPT: &str = "Enter the number of an unoccupied square: ";

/// Reads opponent moves one line at a time.
///
/// Lines that are not a number are answered with a hint and the prompt is
/// shown again. End of input surfaces as [`Error::InputClosed`].
pub struct TerminalInput<R, W> {
    input: R,
    output: W,
}

impl TerminalInput<StdinLock<'static>, Stdout> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalInput<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> MoveSource for TerminalInput<R, W> {
    fn request_opponent_move(&mut self, _board: &Board) -> Result<usize> {
        let mut line = String::new();
        loop {
            write!(self.output, "{PROMPT}")?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Err(Error::InputClosed);
            }

            let answer = line.trim();
            match answer.parse::<usize>() {
                Ok(cell) => {
                    writeln!(self.output, "You picked {cell}")?;
                    return Ok(cell);
                }
                Err(_) => writeln!(self.output, "'{answer}' is not a square number")?,
            }
        }
    }

    fn on_rejected(&mut self, _cell: usize, error: &Error) -> Result<()> {
        writeln!(self.output, "{error}, try again")?;
        Ok(())
    }
}

/// Draws the board as a 3x3 grid.
///
/// Empty cells show their index so they can be typed at the prompt. With
/// color enabled, indices are grey, machine marks red and opponent marks
/// green.
pub struct TerminalRenderer<W> {
    out: W,
    color: bool,
}

impl TerminalRenderer<Stdout> {
    pub fn stdout(color: bool) -> Self {
        Self::new(io::stdout(), color)
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_cell(&mut self, index: usize, cell: Cell) -> io::Result<()> {
        let (text, color) = match cell {
            Cell::Empty => (format!(" {index} "), Color::Grey),
            Cell::Machine => (" o ".to_string(), Color::DarkRed),
            Cell::Opponent => (" x ".to_string(), Color::DarkGreen),
        };
        if self.color {
            write!(self.out, "{}", text.with(color))
        } else {
            write!(self.out, "{text}")
        }
    }
}

impl<W: Write> BoardRenderer for TerminalRenderer<W> {
    fn render_board(&mut self, board: &Board) -> Result<()> {
        for (index, &cell) in board.cells().iter().enumerate() {
            self.write_cell(index, cell)?;
            if (index + 1).is_multiple_of(3) {
                writeln!(self.out)?;
            }
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }

    fn on_candidates(&mut self, candidates: &[(usize, i32)]) -> Result<()> {
        let ranks: Vec<String> = candidates
            .iter()
            .map(|(cell, rank)| format!("{cell}:{rank}"))
            .collect();
        writeln!(self.out, "Candidate ranks: {}", ranks.join(" "))?;
        Ok(())
    }

    fn on_move(&mut self, side: Side, cell: usize) -> Result<()> {
        if side == Side::Machine {
            writeln!(self.out, "Machine picks {cell}")?;
        }
        Ok(())
    }

    fn on_game_end(&mut self, status: Status) -> Result<()> {
        let message = match status {
            Status::OpponentWin => "You win!",
            Status::MachineWin => "The machine wins.",
            Status::Draw => "It's a draw.",
            Status::InProgress => return Ok(()),
        };
        writeln!(self.out, "{message}")?;
        self.out.flush()?;
        Ok(())
    }
}
