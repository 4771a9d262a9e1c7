//! Noughts - tic-tac-toe engine with a minimax opponent
//!
//! The engine tracks one game at a time per [`GameController`]: board,
//! turn order, win/draw detection, and a depth-bounded minimax search
//! for computer-controlled players.
//!
//! # Architecture
//!
//! - **Board**: the nine squares and checked mark placement
//! - **Rules**: pure win/draw detection over a board
//! - **Search**: alpha-beta minimax with a ply-adjusted score
//! - **Controller**: the turn state machine, reporting through a [`GameObserver`]
//!
//! # Example
//!
//! ```
//! use noughts::{EventLog, GameController, GameSettings, Mark, Phase, Player};
//!
//! let settings = GameSettings::new(
//!     Player::human("Ada", Mark::X),
//!     Player::computer("Bot", Mark::O),
//! )?;
//! let mut game = GameController::new(settings, EventLog::new());
//!
//! game.submit_move(4)?;
//! let phase = game.play_computer_turns()?;
//! assert_eq!(phase, Phase::AwaitingMove(Mark::X));
//! assert_eq!(game.board().marks_placed(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod controller;
mod difficulty;
mod error;
mod events;
mod invariants;
mod player;
mod position;
pub mod rules;
mod search;
mod settings;
mod types;

// Crate-level exports - Board state
pub use action::Move;
pub use position::Position;
pub use types::{Board, Mark, Square};

// Crate-level exports - Players and settings
pub use difficulty::{Difficulty, UNBOUNDED_DEPTH};
pub use player::{Player, PlayerKind};
pub use settings::GameSettings;

// Crate-level exports - Search
pub use search::{DRAW_SCORE, Minimax, SearchOutcome, WIN_SCORE};

// Crate-level exports - Turn controller
pub use controller::{Commit, GameController, PendingMove, Phase};
pub use events::{EventLog, GameEvent, GameObserver, Outcome};
pub use invariants::{
    AlternatingTurnInvariant, HistoryConsistentInvariant, Invariant, InvariantViolation,
    MarkBalanceInvariant, check_invariants,
};

// Crate-level exports - Errors
pub use error::{EngineError, IllegalMove, ParseBoardError, SearchError, SetupError};
