//! Game participants.

use super::Mark;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Who picks a player's moves.
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PlayerKind {
    /// Moves arrive through `submit_move`.
    Human,
    /// Moves come from the minimax search.
    Computer,
}

/// One of the two players in a game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, Serialize, Deserialize)]
pub struct Player {
    /// Display name.
    name: String,
    /// Mark this player places.
    mark: Mark,
    /// Human or computer.
    kind: PlayerKind,
}

impl Player {
    /// Creates a player.
    pub fn new(name: impl Into<String>, mark: Mark, kind: PlayerKind) -> Self {
        Self {
            name: name.into(),
            mark,
            kind,
        }
    }

    /// Human player.
    pub fn human(name: impl Into<String>, mark: Mark) -> Self {
        Self::new(name, mark, PlayerKind::Human)
    }

    /// Computer player.
    pub fn computer(name: impl Into<String>, mark: Mark) -> Self {
        Self::new(name, mark, PlayerKind::Computer)
    }

    /// True if the search engine plays for this player.
    pub fn is_computer(&self) -> bool {
        self.kind == PlayerKind::Computer
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.mark)
    }
}
