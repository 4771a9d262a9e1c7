//! Minimax search with alpha-beta pruning.
//!
//! Scores are always from the maximizer's point of view:
//!
//! - maximizer completes a line at ply `d`: `WIN_SCORE - d`
//! - minimizer completes a line at ply `d`: `d - WIN_SCORE`
//! - draw, or depth bound reached: `0`
//!
//! Ply 1 is the move being chosen, so a win on the spot scores 9 and a
//! win two moves later scores 7. Quick wins beat slow ones, slow losses
//! beat quick ones.
//!
//! Children are expanded on copies of the board, never in place. Ties are
//! broken toward the lowest cell index, and pruning never changes which
//! move is returned.

use super::difficulty::UNBOUNDED_DEPTH;
use super::error::SearchError;
use super::rules::{self, WINNING_LINES};
use super::{Board, Mark, Move, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Base score of a win; the ply count is subtracted from it.
pub const WIN_SCORE: i32 = 10;

/// Score of a draw or a truncated line of play.
pub const DRAW_SCORE: i32 = 0;

/// Result of a root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Chosen square.
    pub position: Position,
    /// Minimax value of the chosen square.
    pub score: i32,
    /// Positions visited, root children included.
    pub nodes: u64,
}

/// Depth-bounded minimax for a fixed maximizing mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Minimax {
    maximizer: Mark,
    max_depth: u8,
}

impl Minimax {
    /// Search that scores positions for `maximizer`, looking at most
    /// `max_depth` plies ahead (clamped to 1..=9).
    pub fn new(maximizer: Mark, max_depth: u8) -> Self {
        Self {
            maximizer,
            max_depth: max_depth.clamp(1, UNBOUNDED_DEPTH),
        }
    }

    /// Full-depth search: perfect play.
    pub fn unbounded(maximizer: Mark) -> Self {
        Self::new(maximizer, UNBOUNDED_DEPTH)
    }

    /// The mark whose wins score positive.
    pub fn maximizer(&self) -> Mark {
        self.maximizer
    }

    /// Plies searched before a position is scored as neutral.
    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    /// Picks the best square for `to_move` on `board`.
    ///
    /// `to_move` maximizes when it is the maximizer and minimizes
    /// otherwise. `board` is only read.
    ///
    /// # Errors
    ///
    /// [`SearchError::NoLegalMoves`] if the board is full or already won.
    #[instrument(skip(self, board), fields(maximizer = %self.maximizer, max_depth = self.max_depth))]
    pub fn choose(&self, board: &Board, to_move: Mark) -> Result<SearchOutcome, SearchError> {
        if rules::winner(board).is_some() || board.is_full() {
            return Err(SearchError::NoLegalMoves);
        }

        let maximizing = to_move == self.maximizer;
        let mut alpha = i32::MIN;
        let mut beta = i32::MAX;
        let mut nodes = 0;
        let mut best: Option<(Position, i32)> = None;

        for pos in board.empty_positions() {
            let child = board.with_mark(pos, to_move);
            let score = self.alphabeta(&child, Move::new(to_move, pos), 1, alpha, beta, &mut nodes);

            // Strict comparison keeps the lowest-index move among equals.
            let improves = best.is_none_or(|(_, best_score)| {
                if maximizing {
                    score > best_score
                } else {
                    score < best_score
                }
            });

            if improves {
                best = Some((pos, score));
                if maximizing {
                    alpha = score;
                } else {
                    beta = score;
                }
            }
        }

        let (position, score) = best.ok_or(SearchError::NoLegalMoves)?;
        debug!(%position, score, nodes, "Search complete");
        Ok(SearchOutcome {
            position,
            score,
            nodes,
        })
    }

    /// Value of `board`, reached by `last` at depth `ply`.
    fn alphabeta(
        &self,
        board: &Board,
        last: Move,
        ply: u8,
        mut alpha: i32,
        mut beta: i32,
        nodes: &mut u64,
    ) -> i32 {
        *nodes += 1;

        if completes_line(board, last) {
            return self.win_score(last.mark, ply);
        }
        if board.is_full() || ply >= self.max_depth {
            return DRAW_SCORE;
        }

        let mover = last.mark.opponent();
        let maximizing = mover == self.maximizer;
        let mut value = if maximizing { i32::MIN } else { i32::MAX };

        for pos in board.empty_positions() {
            let child = board.with_mark(pos, mover);
            let score = self.alphabeta(&child, Move::new(mover, pos), ply + 1, alpha, beta, nodes);

            if maximizing {
                value = value.max(score);
                alpha = alpha.max(value);
            } else {
                value = value.min(score);
                beta = beta.min(value);
            }

            if alpha >= beta {
                break;
            }
        }

        value
    }

    fn win_score(&self, winner: Mark, ply: u8) -> i32 {
        let score = WIN_SCORE - i32::from(ply);
        if winner == self.maximizer {
            score
        } else {
            -score
        }
    }
}

/// True if `last` finished a line. Only lines through its square can have changed.
fn completes_line(board: &Board, last: Move) -> bool {
    WINNING_LINES
        .iter()
        .any(|line| line.contains(last.position) && line.is_held_by(board, last.mark))
}
