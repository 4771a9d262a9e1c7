//! Draw detection and overall board status.

use super::super::{Board, Mark, Square};
use super::win::{winner, Line};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// What the rules say about a board, independent of who the players are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardStatus {
    /// Moves remain and nobody has a line.
    InProgress,
    /// `mark` holds `line`.
    Won {
        /// The winning mark.
        mark: Mark,
        /// The completed line.
        line: Line,
    },
    /// Full board, no line.
    Draw,
}

impl BoardStatus {
    /// True for `Won` and `Draw`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, BoardStatus::InProgress)
    }
}

/// Checks if every square is occupied.
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}

/// A full board with no winning line for either mark.
#[instrument(skip(board))]
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && winner(board).is_none()
}

/// Classifies `board`.
#[instrument(skip(board))]
pub fn status(board: &Board) -> BoardStatus {
    if let Some((mark, line)) = winner(board) {
        BoardStatus::Won { mark, line }
    } else if is_full(board) {
        BoardStatus::Draw
    } else {
        BoardStatus::InProgress
    }
}
