//! Core domain types for tic-tac-toe.

use super::error::{IllegalMove, ParseBoardError};
use super::position::Position;
use super::rules;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, instrument};

/// One of the two marks placed on the board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Mark {
    /// Crosses.
    X,
    /// Noughts.
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// No mark yet.
    Empty,
    /// Holds a mark.
    Occupied(Mark),
}

impl Square {
    /// The mark in this square, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Square::Empty => None,
            Square::Occupied(mark) => Some(mark),
        }
    }
}

/// 3x3 board.
///
/// `Board` is `Copy`: a snapshot is just a copy, and search explores
/// hypothetical moves on its own copies without touching the original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Square at `pos`.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.index()]
    }

    /// Square at a raw index, or `None` outside 0-8.
    pub fn square(&self, index: usize) -> Option<Square> {
        self.squares.get(index).copied()
    }

    /// True if `pos` holds no mark.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// All squares in index order.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Empty positions in increasing index order.
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        Position::ALL.into_iter().filter(move |&pos| self.is_empty(pos))
    }

    /// Number of squares holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.squares
            .iter()
            .filter(|&&s| s == Square::Occupied(mark))
            .count()
    }

    /// Total marks placed.
    pub fn marks_placed(&self) -> usize {
        self.squares.iter().filter(|&&s| s != Square::Empty).count()
    }

    /// True when no empty square remains.
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// Places `mark` at `index`, validating the move first.
    ///
    /// Rejected moves leave the board untouched.
    ///
    /// # Errors
    ///
    /// - [`IllegalMove::OutOfRange`] if `index` is not 0-8
    /// - [`IllegalMove::GameOver`] if the board is already won or full
    /// - [`IllegalMove::Occupied`] if the square already holds a mark
    #[instrument(skip(self))]
    pub fn place_mark(&mut self, index: usize, mark: Mark) -> Result<&Board, IllegalMove> {
        let pos = Position::from_index(index).ok_or(IllegalMove::OutOfRange(index))?;

        if rules::winner(self).is_some() || self.is_full() {
            return Err(IllegalMove::GameOver);
        }

        if !self.is_empty(pos) {
            return Err(IllegalMove::Occupied(pos));
        }

        self.squares[pos.index()] = Square::Occupied(mark);
        debug!(position = %pos, %mark, "Mark placed");
        Ok(self)
    }

    /// Independent copy of the current cells.
    pub fn snapshot(&self) -> Board {
        *self
    }

    /// Copy of this board with `mark` written at `pos`, without validation.
    pub(crate) fn with_mark(&self, pos: Position, mark: Mark) -> Board {
        let mut next = *self;
        next.squares[pos.index()] = Square::Occupied(mark);
        next
    }

    /// Empties every square.
    pub fn clear(&mut self) {
        self.squares = [Square::Empty; 9];
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Parses nine cells: `X`/`O` (any case) for marks and `_`, `.` or `-`
    /// for empty squares. Whitespace and `|` separators are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::with_capacity(9);
        for c in s.chars().filter(|c| !c.is_whitespace() && *c != '|') {
            let square = match c {
                'X' | 'x' => Square::Occupied(Mark::X),
                'O' | 'o' => Square::Occupied(Mark::O),
                '_' | '.' | '-' => Square::Empty,
                other => return Err(ParseBoardError::InvalidCell(other)),
            };
            cells.push(square);
        }

        let squares: [Square; 9] = cells
            .try_into()
            .map_err(|v: Vec<Square>| ParseBoardError::WrongLength(v.len()))?;
        let board = Board { squares };

        let (x, o) = (board.count(Mark::X), board.count(Mark::O));
        if x.abs_diff(o) > 1 {
            return Err(ParseBoardError::Unbalanced { x, o });
        }

        Ok(board)
    }
}

impl std::fmt::Display for Board {
    /// Renders the grid, showing empty squares by their index.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let i = row * 3 + col;
                match self.squares[i] {
                    Square::Empty => write!(f, " {} ", i)?,
                    Square::Occupied(mark) => write!(f, " {} ", mark)?,
                }
                if col < 2 {
                    write!(f, "|")?;
                }
            }
            if row < 2 {
                writeln!(f)?;
                writeln!(f, "---+---+---")?;
            }
        }
        Ok(())
    }
}
