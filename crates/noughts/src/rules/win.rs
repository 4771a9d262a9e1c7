//! Win detection.

use super::super::{Board, Mark, Position, Square};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Three positions in a row, column or diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line([Position; 3]);

impl Line {
    const fn new(a: Position, b: Position, c: Position) -> Self {
        Self([a, b, c])
    }

    /// The three positions, in increasing index order.
    pub fn positions(&self) -> [Position; 3] {
        self.0
    }

    /// The three board indices, in increasing order.
    pub fn indices(&self) -> [usize; 3] {
        self.0.map(Position::index)
    }

    /// True if `pos` lies on this line.
    pub fn contains(&self, pos: Position) -> bool {
        self.0.contains(&pos)
    }

    /// True if all three squares hold `mark`.
    pub fn is_held_by(&self, board: &Board, mark: Mark) -> bool {
        self.0
            .iter()
            .all(|&pos| board.get(pos) == Square::Occupied(mark))
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c] = self.indices();
        write!(f, "[{}, {}, {}]", a, b, c)
    }
}

/// The eight winning lines, scanned in this order.
pub const WINNING_LINES: [Line; 8] = [
    // Rows
    Line::new(Position::TopLeft, Position::TopCenter, Position::TopRight),
    Line::new(Position::MiddleLeft, Position::Center, Position::MiddleRight),
    Line::new(Position::BottomLeft, Position::BottomCenter, Position::BottomRight),
    // Columns
    Line::new(Position::TopLeft, Position::MiddleLeft, Position::BottomLeft),
    Line::new(Position::TopCenter, Position::Center, Position::BottomCenter),
    Line::new(Position::TopRight, Position::MiddleRight, Position::BottomRight),
    // Diagonals
    Line::new(Position::TopLeft, Position::Center, Position::BottomRight),
    Line::new(Position::TopRight, Position::Center, Position::BottomLeft),
];

/// First line in scan order held entirely by `mark`.
#[instrument(skip(board))]
pub fn find_winning_line(board: &Board, mark: Mark) -> Option<Line> {
    WINNING_LINES
        .iter()
        .copied()
        .find(|line| line.is_held_by(board, mark))
}

/// Like [`find_winning_line`], but only looks at lines through `last`.
///
/// After a single move only lines through the played square can have
/// been completed, so this is all the turn controller needs.
#[instrument(skip(board))]
pub fn find_winning_line_through(board: &Board, mark: Mark, last: Position) -> Option<Line> {
    WINNING_LINES
        .iter()
        .copied()
        .filter(|line| line.contains(last))
        .find(|line| line.is_held_by(board, mark))
}

/// The mark owning a complete line, if any. X is checked first.
pub fn winner(board: &Board) -> Option<(Mark, Line)> {
    [Mark::X, Mark::O]
        .into_iter()
        .find_map(|mark| find_winning_line(board, mark).map(|line| (mark, line)))
}
