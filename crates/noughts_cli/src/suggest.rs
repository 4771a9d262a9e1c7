//! One-shot move suggestion for a board given on the command line.

use anyhow::{Context, Result};
use noughts::{Board, Mark, Minimax, SearchOutcome};
use tracing::instrument;

/// Mark to move when none is given: whoever has fewer marks, X on a tie.
pub fn infer_to_move(board: &Board) -> Mark {
    if board.count(Mark::O) < board.count(Mark::X) {
        Mark::O
    } else {
        Mark::X
    }
}

/// Best move for `to_move`, searching `depth` plies.
#[instrument]
pub fn suggest(board: &str, to_move: Option<Mark>, depth: u8) -> Result<(Board, Mark, SearchOutcome)> {
    let board: Board = board.parse().context("Invalid board")?;
    let mark = to_move.unwrap_or_else(|| infer_to_move(&board));
    let outcome = Minimax::new(mark, depth)
        .choose(&board, mark)
        .with_context(|| format!("No move for {mark}"))?;
    Ok((board, mark, outcome))
}
