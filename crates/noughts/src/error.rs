//! Error types for the tic-tac-toe engine.
//!
//! Every rejected operation leaves the game untouched, so all of these
//! are recoverable from the caller's point of view.

use super::position::Position;
use super::types::Mark;
use derive_more::{Display, From};

/// A move that cannot be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum IllegalMove {
    /// The cell index is not in 0-8.
    #[display("Cell index {} is outside the board (0-8)", _0)]
    OutOfRange(usize),

    /// The square already holds a mark.
    #[display("Square {} is already occupied", _0)]
    Occupied(Position),

    /// The game has already been won or drawn.
    #[display("Game is already over")]
    GameOver,

    /// Human input arrived while a computer player is to move.
    #[display("It's not a human's turn ({} is computer-controlled)", _0)]
    NotHumanTurn(Mark),
}

impl std::error::Error for IllegalMove {}

/// Failure of the minimax search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum SearchError {
    /// Search was asked to move on a full or already-won board.
    #[display("No legal moves remain on the board")]
    NoLegalMoves,
}

impl std::error::Error for SearchError {}

/// Invalid game settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum SetupError {
    /// Both players were given the same mark.
    #[display("Both players were assigned mark {}", _0)]
    DuplicateMark(Mark),
}

impl std::error::Error for SetupError {}

/// Error from a controller operation that may fail in more than one way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, From)]
pub enum EngineError {
    /// The move was rejected.
    #[display("Illegal move: {}", _0)]
    IllegalMove(IllegalMove),

    /// The search engine was invoked on a finished board.
    #[display("Search failed: {}", _0)]
    Search(SearchError),
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::IllegalMove(e) => Some(e),
            EngineError::Search(e) => Some(e),
        }
    }
}

/// A board string that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseBoardError {
    /// The string did not describe exactly nine cells.
    #[display("Expected 9 cells, found {}", _0)]
    WrongLength(usize),

    /// A character is neither a mark nor an empty-cell marker.
    #[display("Unexpected cell character {:?}", _0)]
    InvalidCell(char),

    /// Mark counts differ by more than one, so the position is unreachable.
    #[display("Unreachable position: {} X marks vs {} O marks", x, o)]
    Unbalanced {
        /// Number of X marks.
        x: usize,
        /// Number of O marks.
        o: usize,
    },
}

impl std::error::Error for ParseBoardError {}
