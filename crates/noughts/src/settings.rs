//! Per-game configuration.

use super::error::SetupError;
use super::{Difficulty, Mark, Player};
use derive_getters::Getters;
use derive_setters::Setters;
use serde::Serialize;
use tracing::instrument;

/// Everything needed to start a game.
///
/// Players are stored by mark, so the two marks are always distinct.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize)]
#[setters(prefix = "with_")]
pub struct GameSettings {
    /// The player placing X.
    #[setters(skip)]
    player_x: Player,
    /// The player placing O.
    #[setters(skip)]
    player_o: Player,
    /// Mark that moves first.
    first_mark: Mark,
    /// Search depth distribution for computer players.
    difficulty: Difficulty,
    /// Seed for the difficulty sampler.
    seed: u64,
}

impl GameSettings {
    /// Settings for two players, X moving first at [`Difficulty::Hard`]
    /// with seed 0.
    ///
    /// # Errors
    ///
    /// [`SetupError::DuplicateMark`] if both players hold the same mark.
    #[instrument(skip(first, second), fields(first_player = %first, second_player = %second))]
    pub fn new(first: Player, second: Player) -> Result<Self, SetupError> {
        let (player_x, player_o) = match (*first.mark(), *second.mark()) {
            (Mark::X, Mark::O) => (first, second),
            (Mark::O, Mark::X) => (second, first),
            (mark, _) => return Err(SetupError::DuplicateMark(mark)),
        };

        Ok(Self {
            player_x,
            player_o,
            first_mark: Mark::X,
            difficulty: Difficulty::default(),
            seed: 0,
        })
    }

    /// The player holding `mark`.
    pub fn player(&self, mark: Mark) -> &Player {
        match mark {
            Mark::X => &self.player_x,
            Mark::O => &self.player_o,
        }
    }

    /// The player who moves first.
    pub fn first_player(&self) -> &Player {
        self.player(self.first_mark)
    }
}
