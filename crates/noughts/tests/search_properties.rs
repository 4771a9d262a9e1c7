//! Property-based tests for the rules and the search.
//!
//! Positions are generated by playing random legal moves from the empty
//! board, so every generated board is reachable.

use noughts::rules::{self, BoardStatus};
use noughts::{
    Board, GameController, GameSettings, Mark, Minimax, Player, Position, UNBOUNDED_DEPTH,
    WIN_SCORE, check_invariants,
};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// A reachable in-progress position and the mark to move, with at least
/// `min_moves` marks on the board.
fn arb_position(min_moves: usize) -> impl Strategy<Value = (Board, Mark)> {
    proptest::collection::vec(any::<usize>(), 9).prop_filter_map(
        "game ended before enough moves",
        move |choices| {
            let mut board = Board::new();
            let mut mover = Mark::X;
            for (n, choice) in choices.into_iter().enumerate() {
                if rules::status(&board).is_terminal() {
                    return None;
                }
                if n >= min_moves && choice % 3 == 0 {
                    break;
                }
                let empty: Vec<Position> = board.empty_positions().collect();
                let pos = empty[choice % empty.len()];
                board.place_mark(pos.index(), mover).ok()?;
                mover = mover.opponent();
            }
            (!rules::status(&board).is_terminal()).then_some((board, mover))
        },
    )
}

/// A mix of in-range and out-of-range cell indices.
fn arb_submissions() -> impl Strategy<Value = Vec<usize>> {
    proptest::collection::vec(0usize..12, 0..30)
}

// =============================================================================
// Plain minimax, without pruning, as a reference
// =============================================================================

fn reference_value(board: &Board, mover: Mark, maximizer: Mark, ply: i32) -> i32 {
    if let Some((mark, _)) = rules::winner(board) {
        let score = WIN_SCORE - ply;
        return if mark == maximizer { score } else { -score };
    }
    if board.is_full() {
        return 0;
    }

    let scores = board.empty_positions().map(|pos| {
        let mut child = board.snapshot();
        child.place_mark(pos.index(), mover).expect("empty square");
        reference_value(&child, mover.opponent(), maximizer, ply + 1)
    });

    if mover == maximizer {
        scores.max().expect("non-full board")
    } else {
        scores.min().expect("non-full board")
    }
}

fn reference_choice(board: &Board, to_move: Mark, maximizer: Mark) -> (Position, i32) {
    let mut best: Option<(Position, i32)> = None;
    for pos in board.empty_positions() {
        let mut child = board.snapshot();
        child.place_mark(pos.index(), to_move).expect("empty square");
        let value = reference_value(&child, to_move.opponent(), maximizer, 1);
        let better = match best {
            None => true,
            Some((_, b)) if to_move == maximizer => value > b,
            Some((_, b)) => value < b,
        };
        if better {
            best = Some((pos, value));
        }
    }
    best.expect("non-terminal board")
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every accepted move places exactly one mark; rejected ones place none.
    #[test]
    fn prop_marks_match_accepted_moves(submissions in arb_submissions()) {
        let settings = GameSettings::new(
            Player::human("A", Mark::X),
            Player::human("B", Mark::O),
        ).unwrap();
        let mut game = GameController::new(settings, ());

        let mut accepted = 0;
        for index in submissions {
            let before = *game.board();
            match game.submit_move(index) {
                Ok(_) => accepted += 1,
                Err(_) => {
                    prop_assert_eq!(game.board(), &before);
                }
            }
            prop_assert_eq!(game.board().marks_placed(), accepted);
            prop_assert_eq!(game.history().len(), accepted);
        }
        prop_assert_eq!(check_invariants(&game), Ok(()));
    }

    /// Rule queries give the same answer twice and never touch the board.
    #[test]
    fn prop_rules_are_pure((board, _mover) in arb_position(0)) {
        let before = board;
        let first = (
            rules::find_winning_line(&board, Mark::X),
            rules::find_winning_line(&board, Mark::O),
            rules::is_draw(&board),
            rules::status(&board),
        );
        let second = (
            rules::find_winning_line(&board, Mark::X),
            rules::find_winning_line(&board, Mark::O),
            rules::is_draw(&board),
            rules::status(&board),
        );
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(board, before);
        prop_assert_eq!(first.3, BoardStatus::InProgress);
    }

    /// Same board, same maximizer, same depth: same move, on an empty square.
    #[test]
    fn prop_search_is_deterministic((board, mover) in arb_position(1), depth in 1u8..=UNBOUNDED_DEPTH) {
        let search = Minimax::new(mover, depth);
        let first = search.choose(&board, mover).unwrap();
        let second = search.choose(&board, mover).unwrap();
        prop_assert_eq!(first, second);
        prop_assert!(board.is_empty(first.position));
    }

    /// Pruning never changes the chosen square or its value.
    #[test]
    fn prop_pruning_matches_plain_minimax((board, mover) in arb_position(3)) {
        for maximizer in [mover, mover.opponent()] {
            let outcome = Minimax::unbounded(maximizer).choose(&board, mover).unwrap();
            let (position, score) = reference_choice(&board, mover, maximizer);
            prop_assert_eq!(outcome.position, position);
            prop_assert_eq!(outcome.score, score);
        }
    }
}
