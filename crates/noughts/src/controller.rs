//! Turn controller: the game state machine.
//!
//! ```text
//! AwaitingMove(p) --move--> Won(p, line)
//!                      \--> Draw
//!                      \--> AwaitingMove(other)
//! ```
//!
//! `Won` and `Draw` accept nothing until [`GameController::reset`] or
//! [`GameController::new_game`].
//!
//! Computer turns come in two halves so the caller can pause between
//! them: [`plan_computer_move`](GameController::plan_computer_move) runs
//! the search and hands back a [`PendingMove`], and
//! [`commit`](GameController::commit) applies it. A pending move carries
//! the game generation and ply it was computed for, and is discarded if
//! either changed in the meantime.

use super::error::{EngineError, IllegalMove, SearchError};
use super::events::{EventLog, GameEvent, GameObserver, Outcome};
use super::invariants;
use super::rules::{self, Line};
use super::search::Minimax;
use super::settings::GameSettings;
use super::{Board, Mark, Move, Player, Position};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Where the state machine is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the player holding this mark.
    AwaitingMove(Mark),
    /// `winner` completed `line`.
    Won {
        /// Winning mark.
        winner: Mark,
        /// Completed line.
        line: Line,
    },
    /// Board full, no line.
    Draw,
}

impl Phase {
    /// True for `Won` and `Draw`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Phase::AwaitingMove(_))
    }
}

/// A computer move chosen but not yet applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PendingMove {
    generation: u64,
    ply: usize,
    /// Mark being played.
    pub mark: Mark,
    /// Square chosen by the search.
    pub position: Position,
    /// Depth bound the search ran with.
    pub depth: u8,
    /// Minimax value of the chosen square for `mark`.
    pub score: i32,
}

impl PendingMove {
    /// Game generation the move was computed against.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What [`GameController::commit`] did with a pending move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Commit {
    /// The move was played; the game is now in this phase.
    Applied(Phase),
    /// The game was reset or moved on since planning; nothing changed.
    Discarded,
}

/// One game of tic-tac-toe and everything needed to run it.
///
/// Owns its board, turn state and random source; nothing is shared
/// between controllers.
#[derive(Debug)]
pub struct GameController<O = EventLog> {
    settings: GameSettings,
    board: Board,
    phase: Phase,
    history: Vec<Move>,
    generation: u64,
    rng: ChaCha8Rng,
    observer: O,
}

impl<O: GameObserver> GameController<O> {
    /// Starts a game. The observer immediately receives `TurnChanged` for
    /// the first player.
    #[instrument(skip(settings, observer), fields(first = %settings.first_mark(), difficulty = %settings.difficulty()))]
    pub fn new(settings: GameSettings, observer: O) -> Self {
        let mut game = Self {
            phase: Phase::AwaitingMove(*settings.first_mark()),
            rng: ChaCha8Rng::seed_from_u64(*settings.seed()),
            settings,
            board: Board::new(),
            history: Vec::new(),
            generation: 0,
            observer,
        };
        game.announce_turn();
        game
    }

    /// Replaces the settings and starts over.
    #[instrument(skip(self, settings))]
    pub fn new_game(&mut self, settings: GameSettings) {
        self.settings = settings;
        self.restart();
    }

    /// Clears the board and returns to the first player's turn.
    ///
    /// Any [`PendingMove`] planned before the reset is discarded on commit.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn reset(&mut self) {
        self.restart();
    }

    fn restart(&mut self) {
        self.board.clear();
        self.history.clear();
        self.generation += 1;
        self.rng = ChaCha8Rng::seed_from_u64(*self.settings.seed());
        self.phase = Phase::AwaitingMove(*self.settings.first_mark());
        info!(generation = self.generation, "Game reset");
        self.announce_turn();
    }

    /// Plays a human move for the current player.
    ///
    /// Computer players are never moved from here: follow up with
    /// [`play_computer_turns`](Self::play_computer_turns), or with
    /// [`plan_computer_move`](Self::plan_computer_move) and
    /// [`commit`](Self::commit) when the reply should be delayed.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalMove`] and changes nothing if the game is over,
    /// a computer is to move, the index is outside 0-8 or the square is
    /// taken.
    #[instrument(skip(self))]
    pub fn submit_move(&mut self, index: usize) -> Result<Phase, IllegalMove> {
        let mark = match self.phase {
            Phase::AwaitingMove(mark) => mark,
            _ => {
                warn!("Move submitted after game end");
                return Err(IllegalMove::GameOver);
            }
        };

        if self.settings.player(mark).is_computer() {
            warn!(%mark, "Human move submitted on computer's turn");
            return Err(IllegalMove::NotHumanTurn(mark));
        }

        self.apply(index, mark)
    }

    /// Runs the search for the computer to move, without applying it.
    ///
    /// Returns `None` if the game is over or a human is to move. The
    /// depth bound is drawn from the difficulty with this game's seeded
    /// generator, so equal settings replay identically.
    ///
    /// # Errors
    ///
    /// [`SearchError::NoLegalMoves`] only if the board and phase disagree.
    #[instrument(skip(self))]
    pub fn plan_computer_move(&mut self) -> Result<Option<PendingMove>, SearchError> {
        let mark = match self.phase {
            Phase::AwaitingMove(mark) if self.settings.player(mark).is_computer() => mark,
            _ => return Ok(None),
        };

        let depth = self.settings.difficulty().sample_depth(&mut self.rng);
        let outcome = Minimax::new(mark, depth).choose(&self.board, mark)?;
        debug!(%mark, position = %outcome.position, depth, score = outcome.score, "Computer move planned");

        Ok(Some(PendingMove {
            generation: self.generation,
            ply: self.history.len(),
            mark,
            position: outcome.position,
            depth,
            score: outcome.score,
        }))
    }

    /// Applies a planned computer move if it is still current.
    ///
    /// The move is discarded if the game was reset or has moved on since
    /// planning, or if its mark is not a computer player's turn here.
    ///
    /// # Errors
    ///
    /// Propagates [`IllegalMove`] from the board, changing nothing. A move
    /// planned by this game always targets an empty square; one planned by
    /// another game in the same turn may not.
    #[instrument(skip(self), fields(position = %pending.position))]
    pub fn commit(&mut self, pending: PendingMove) -> Result<Commit, IllegalMove> {
        if pending.generation != self.generation || pending.ply != self.history.len() {
            debug!(
                planned_generation = pending.generation,
                generation = self.generation,
                "Discarding stale computer move"
            );
            return Ok(Commit::Discarded);
        }

        // A pending move does not name its game; check the mover too.
        let computer_to_move = self.phase == Phase::AwaitingMove(pending.mark)
            && self.settings.player(pending.mark).is_computer();
        if !computer_to_move {
            warn!(mark = %pending.mark, phase = ?self.phase, "Discarding computer move for the wrong mover");
            return Ok(Commit::Discarded);
        }

        self.apply(pending.position.index(), pending.mark)
            .map(Commit::Applied)
    }

    /// Plays computer turns back to back until a human is to move or the
    /// game ends.
    ///
    /// # Errors
    ///
    /// Propagates search or board errors; neither occurs in a consistent game.
    #[instrument(skip(self))]
    pub fn play_computer_turns(&mut self) -> Result<Phase, EngineError> {
        while let Some(pending) = self.plan_computer_move()? {
            self.commit(pending)?;
        }
        Ok(self.phase)
    }

    /// Places `mark` at `index`, evaluates the result and notifies the observer.
    fn apply(&mut self, index: usize, mark: Mark) -> Result<Phase, IllegalMove> {
        let position = Position::from_index(index).ok_or(IllegalMove::OutOfRange(index))?;
        self.board.place_mark(index, mark)?;
        self.history.push(Move::new(mark, position));

        let mover = self.settings.player(mark).clone();
        debug!(player = %mover, %position, "Move applied");
        self.observer.notify(&GameEvent::MoveApplied {
            board: self.board,
            position,
            mover: mover.clone(),
        });

        self.phase = if let Some(line) = rules::find_winning_line_through(&self.board, mark, position) {
            Phase::Won { winner: mark, line }
        } else if self.board.is_full() {
            Phase::Draw
        } else {
            Phase::AwaitingMove(mark.opponent())
        };

        invariants::debug_assert_invariants(self);

        let phase = self.phase;
        match phase {
            Phase::Won { line, .. } => {
                info!(winner = %mover, %line, "Game won");
                self.observer.notify(&GameEvent::GameEnded {
                    outcome: Outcome::Winner {
                        player: mover,
                        line,
                    },
                });
            }
            Phase::Draw => {
                info!("Game drawn");
                self.observer.notify(&GameEvent::GameEnded {
                    outcome: Outcome::Draw,
                });
            }
            Phase::AwaitingMove(_) => self.announce_turn(),
        }

        Ok(phase)
    }

    fn announce_turn(&mut self) {
        if let Phase::AwaitingMove(mark) = self.phase {
            let next = self.settings.player(mark).clone();
            self.observer.notify(&GameEvent::TurnChanged { next });
        }
    }
}

impl<O> GameController<O> {
    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Moves applied since the last reset, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Settings of the current game.
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Bumped on every reset and new game.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Player to move, or `None` once the game is over.
    pub fn current_player(&self) -> Option<&Player> {
        match self.phase {
            Phase::AwaitingMove(mark) => Some(self.settings.player(mark)),
            _ => None,
        }
    }

    /// Final result, once there is one.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::AwaitingMove(_) => None,
            Phase::Won { winner, line } => Some(Outcome::Winner {
                player: self.settings.player(winner).clone(),
                line,
            }),
            Phase::Draw => Some(Outcome::Draw),
        }
    }

    /// True once the game is won or drawn.
    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// The observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// The observer, mutably.
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Consumes the controller, returning the observer.
    pub fn into_observer(self) -> O {
        self.observer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Difficulty;

    fn human_vs_human() -> GameSettings {
        GameSettings::new(Player::human("Ada", Mark::X), Player::human("Bob", Mark::O)).unwrap()
    }

    fn human_vs_computer() -> GameSettings {
        GameSettings::new(Player::human("Ada", Mark::X), Player::computer("Bot", Mark::O)).unwrap()
    }

    #[test]
    fn test_initial_state_announces_first_player() {
        let game = GameController::new(human_vs_human(), EventLog::new());
        assert_eq!(game.phase(), Phase::AwaitingMove(Mark::X));
        assert_eq!(game.board(), &Board::new());
        assert_eq!(
            game.observer().events(),
            &[GameEvent::TurnChanged {
                next: Player::human("Ada", Mark::X)
            }]
        );
    }

    #[test]
    fn test_first_mark_setting_picks_starting_player() {
        let settings = human_vs_computer().with_first_mark(Mark::O);
        let game = GameController::new(settings, ());
        assert_eq!(game.phase(), Phase::AwaitingMove(Mark::O));
        assert_eq!(game.current_player().map(|p| p.name().as_str()), Some("Bot"));
    }

    #[test]
    fn test_turns_alternate() {
        let mut game = GameController::new(human_vs_human(), ());
        assert_eq!(game.submit_move(4), Ok(Phase::AwaitingMove(Mark::O)));
        assert_eq!(game.submit_move(0), Ok(Phase::AwaitingMove(Mark::X)));
        assert_eq!(game.history(), &[
            Move::new(Mark::X, Position::Center),
            Move::new(Mark::O, Position::TopLeft),
        ]);
    }

    #[test]
    fn test_human_input_rejected_on_computer_turn() {
        let settings = human_vs_computer().with_first_mark(Mark::O);
        let mut game = GameController::new(settings, ());
        assert_eq!(game.submit_move(4), Err(IllegalMove::NotHumanTurn(Mark::O)));
        assert_eq!(game.board().marks_placed(), 0);
    }

    #[test]
    fn test_plan_returns_none_on_human_turn() {
        let mut game = GameController::new(human_vs_computer(), ());
        assert_eq!(game.plan_computer_move(), Ok(None));
    }

    #[test]
    fn test_commit_applies_current_plan() {
        let mut game = GameController::new(human_vs_computer(), ());
        game.submit_move(0).unwrap();
        let pending = game.plan_computer_move().unwrap().expect("computer to move");
        assert_eq!(pending.mark, Mark::O);
        assert_eq!(game.board().marks_placed(), 1);

        let commit = game.commit(pending).unwrap();
        assert_eq!(commit, Commit::Applied(Phase::AwaitingMove(Mark::X)));
        assert_eq!(game.board().get(pending.position), crate::Square::Occupied(Mark::O));
    }

    #[test]
    fn test_reset_discards_pending_move() {
        let mut game = GameController::new(human_vs_computer(), ());
        game.submit_move(0).unwrap();
        let pending = game.plan_computer_move().unwrap().unwrap();

        game.reset();
        assert_eq!(game.commit(pending), Ok(Commit::Discarded));
        assert_eq!(game.board(), &Board::new());
        assert_eq!(game.phase(), Phase::AwaitingMove(Mark::X));
    }

    #[test]
    fn test_pending_move_is_single_use() {
        let mut game = GameController::new(human_vs_computer(), ());
        game.submit_move(0).unwrap();
        let pending = game.plan_computer_move().unwrap().unwrap();
        assert!(matches!(game.commit(pending), Ok(Commit::Applied(_))));
        assert_eq!(game.commit(pending), Ok(Commit::Discarded));
        assert_eq!(game.board().marks_placed(), 2);
    }

    #[test]
    fn test_easy_difficulty_draws_shallow_depths() {
        let settings = human_vs_computer().with_difficulty(Difficulty::Easy).with_seed(3);
        let mut game = GameController::new(settings, ());
        game.submit_move(4).unwrap();
        let pending = game.plan_computer_move().unwrap().unwrap();
        assert!(Difficulty::Easy.depth_range().contains(&pending.depth));
    }
}
