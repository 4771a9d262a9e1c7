//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](super::Board): nothing here mutates or
//! remembers anything, so the same board always gives the same answer.

mod draw;
mod win;

pub use draw::{is_draw, is_full, status, BoardStatus};
pub use win::{find_winning_line, find_winning_line_through, winner, Line, WINNING_LINES};
