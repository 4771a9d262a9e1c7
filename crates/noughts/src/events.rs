//! Typed notifications from the turn controller to its collaborators.
//!
//! The controller owns exactly one [`GameObserver`] and calls it
//! synchronously after every transition. Renderers, loggers and tests
//! subscribe by implementing the trait.

use super::rules::Line;
use super::{Board, Player, Position};
use serde::{Deserialize, Serialize};

/// How a finished game ended.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// `player` completed `line`.
    Winner {
        /// The winning player.
        player: Player,
        /// The completed line.
        line: Line,
    },
    /// The board filled up with no line.
    Draw,
}

impl Outcome {
    /// The winner, if there is one.
    pub fn winner(&self) -> Option<&Player> {
        match self {
            Outcome::Winner { player, .. } => Some(player),
            Outcome::Draw => None,
        }
    }

    /// True for a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner { player, line } => write!(f, "{} wins on {}", player, line),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// Something that happened in a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// A mark was placed. `board` is the position after the move.
    MoveApplied {
        /// Board after the move.
        board: Board,
        /// Square played.
        position: Position,
        /// Who played it.
        mover: Player,
    },
    /// `next` is now to move. Also sent when a game starts or resets.
    TurnChanged {
        /// Player to move.
        next: Player,
    },
    /// The game reached a win or a draw.
    GameEnded {
        /// Final result.
        outcome: Outcome,
    },
}

/// Receives every [`GameEvent`] as it happens.
pub trait GameObserver {
    /// Called once per event, in order.
    fn notify(&mut self, event: &GameEvent);
}

/// Ignores all events.
impl GameObserver for () {
    fn notify(&mut self, _event: &GameEvent) {}
}

impl<T: GameObserver + ?Sized> GameObserver for &mut T {
    fn notify(&mut self, event: &GameEvent) {
        (**self).notify(event);
    }
}

impl<T: GameObserver + ?Sized> GameObserver for Box<T> {
    fn notify(&mut self, event: &GameEvent) {
        (**self).notify(event);
    }
}

/// Observer that records events for later inspection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Events received so far.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Removes and returns everything recorded so far.
    pub fn take(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl GameObserver for EventLog {
    fn notify(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}
