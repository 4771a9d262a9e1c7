//! Computer-vs-computer matches.

use anyhow::Result;
use noughts::{GameController, GameSettings, Mark, Phase};
use tracing::{debug, info, instrument};

/// Results over a run of games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Games X won.
    pub x_wins: u32,
    /// Games O won.
    pub o_wins: u32,
    /// Drawn games.
    pub draws: u32,
}

impl Tally {
    fn record(&mut self, phase: Phase) {
        match phase {
            Phase::Won { winner: Mark::X, .. } => self.x_wins += 1,
            Phase::Won { winner: Mark::O, .. } => self.o_wins += 1,
            Phase::Draw => self.draws += 1,
            Phase::AwaitingMove(_) => {}
        }
    }

    /// Games recorded.
    pub fn games(&self) -> u32 {
        self.x_wins + self.o_wins + self.draws
    }
}

impl std::fmt::Display for Tally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} games: X won {}, O won {}, {} drawn",
            self.games(),
            self.x_wins,
            self.o_wins,
            self.draws
        )
    }
}

/// Plays `games` games with both seats computer-controlled, seeding game
/// `n` with the base seed plus `n`.
#[instrument(skip(settings), fields(difficulty = %settings.difficulty(), seed = *settings.seed()))]
pub fn run(settings: &GameSettings, games: u32) -> Result<Tally> {
    let mut tally = Tally::default();
    let mut game = GameController::new(settings.clone(), ());

    for n in 0..games {
        let seed = settings.seed().wrapping_add(u64::from(n));
        game.new_game(settings.clone().with_seed(seed));
        let phase = game.play_computer_turns()?;
        anyhow::ensure!(
            phase.is_terminal(),
            "game {} stopped at {:?}; both players must be computers",
            n,
            phase
        );
        debug!(seed, ?phase, moves = game.history().len(), "Game finished");
        tally.record(phase);
    }

    info!(%tally, "Watch finished");
    Ok(tally)
}
