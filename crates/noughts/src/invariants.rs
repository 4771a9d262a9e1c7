//! Properties every reachable game satisfies.
//!
//! The controller checks them after each move in debug builds. They are
//! also public so tests can check them directly.

use super::controller::{GameController, Phase};
use super::Board;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("Invariant violated: {}", description)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: &'static str,
}

impl std::error::Error for InvariantViolation {}

/// The first mover has placed as many marks as the other player, or one more.
pub struct MarkBalanceInvariant;

impl<O> Invariant<GameController<O>> for MarkBalanceInvariant {
    fn holds(game: &GameController<O>) -> bool {
        let first = *game.settings().first_mark();
        let board = game.board();
        let (leading, trailing) = (board.count(first), board.count(first.opponent()));
        leading == trailing || leading == trailing + 1
    }

    fn description() -> &'static str {
        "First mover leads the mark count by zero or one"
    }
}

/// Moves alternate starting with the first mark, and the phase names the
/// right player to move next.
pub struct AlternatingTurnInvariant;

impl<O> Invariant<GameController<O>> for AlternatingTurnInvariant {
    fn holds(game: &GameController<O>) -> bool {
        let first = *game.settings().first_mark();
        let history = game.history();

        let alternates = history.iter().enumerate().all(|(i, mv)| {
            let expected = if i % 2 == 0 { first } else { first.opponent() };
            mv.mark == expected
        });

        let next = if history.len() % 2 == 0 { first } else { first.opponent() };
        let phase_agrees = match game.phase() {
            Phase::AwaitingMove(mark) => mark == next,
            Phase::Won { winner, .. } => history.last().map(|mv| mv.mark) == Some(winner),
            Phase::Draw => history.len() == 9,
        };

        alternates && phase_agrees
    }

    fn description() -> &'static str {
        "Players alternate turns starting with the first mark"
    }
}

/// Replaying the history onto an empty board reproduces the board, so no
/// square was ever overwritten and every mark is accounted for.
pub struct HistoryConsistentInvariant;

impl<O> Invariant<GameController<O>> for HistoryConsistentInvariant {
    fn holds(game: &GameController<O>) -> bool {
        let mut replay = Board::new();
        let replayed = game
            .history()
            .iter()
            .all(|mv| replay.place_mark(mv.position.index(), mv.mark).is_ok());

        replayed && &replay == game.board() && game.history().len() == game.board().marks_placed()
    }

    fn description() -> &'static str {
        "Move history replays to the current board"
    }
}

fn violation<I: Invariant<S>, S>(state: &S) -> Option<InvariantViolation> {
    (!I::holds(state)).then(|| InvariantViolation {
        description: I::description(),
    })
}

/// Checks every invariant, collecting all violations.
pub fn check_invariants<O>(game: &GameController<O>) -> Result<(), Vec<InvariantViolation>> {
    let violations: Vec<_> = [
        violation::<MarkBalanceInvariant, _>(game),
        violation::<AlternatingTurnInvariant, _>(game),
        violation::<HistoryConsistentInvariant, _>(game),
    ]
    .into_iter()
    .flatten()
    .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Panics on any violation in debug builds; compiled out in release.
pub(crate) fn debug_assert_invariants<O>(game: &GameController<O>) {
    if cfg!(debug_assertions)
        && let Err(violations) = check_invariants(game)
    {
        panic!("Invariant violations: {:?}", violations);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameSettings, Mark, Player};

    fn game() -> GameController<()> {
        let settings =
            GameSettings::new(Player::human("A", Mark::X), Player::human("B", Mark::O)).unwrap();
        GameController::new(settings, ())
    }

    #[test]
    fn test_fresh_game_holds() {
        assert_eq!(check_invariants(&game()), Ok(()));
    }

    #[test]
    fn test_holds_through_a_won_game() {
        let mut g = game();
        for index in [0, 3, 1, 4, 2] {
            g.submit_move(index).unwrap();
            assert_eq!(check_invariants(&g), Ok(()));
        }
        assert!(g.is_over());
    }
}
