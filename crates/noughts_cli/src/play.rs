//! Interactive game loop.
//!
//! Human moves are read line by line. A computer move is planned as soon
//! as the computer is to move, then delivered by a timer task after the
//! think delay; typing `reset` or `new` while the timer runs makes the
//! planned move stale, and the controller discards it on arrival.

use crate::console::{Console, HELP, Input};
use anyhow::Result;
use noughts::{Commit, GameController, GameSettings, PendingMove};
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

/// Plays until `quit`, Ctrl+C, or the input ends with no computer move
/// outstanding. Returns the controller in its final state.
#[instrument(skip_all, fields(think_ms = think.as_millis() as u64))]
pub async fn run<R, W>(
    settings: GameSettings,
    think: Duration,
    console: Console<W>,
    input: R,
) -> Result<GameController<Console<W>>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    info!("Starting interactive game");

    let mut game = GameController::new(settings, console);
    let mut lines = input.lines();
    let (move_tx, mut move_rx) = mpsc::unbounded_channel::<PendingMove>();

    // Generation of the game the outstanding timer was started for.
    let mut thinking: Option<u64> = None;
    let mut input_open = true;

    loop {
        if thinking != Some(game.generation())
            && let Some(pending) = game.plan_computer_move()?
        {
            thinking = Some(pending.generation());
            let tx = move_tx.clone();
            tokio::spawn(async move {
                tokio::time::sleep(think).await;
                // The receiver only closes once the game loop has returned.
                let _ = tx.send(pending);
            });
        }

        let awaiting_computer = thinking == Some(game.generation());
        if !input_open && !awaiting_computer {
            debug!("Input closed and no computer move outstanding");
            break;
        }

        tokio::select! {
            Some(pending) = move_rx.recv() => {
                if pending.generation() == game.generation() {
                    thinking = None;
                }
                match game.commit(pending)? {
                    Commit::Applied(phase) => debug!(?phase, "Computer move committed"),
                    Commit::Discarded => info!(
                        planned_generation = pending.generation(),
                        "Computer move arrived after a reset, discarded"
                    ),
                }
            }
            line = lines.next_line(), if input_open => {
                match line? {
                    Some(line) => {
                        if !handle_input(&mut game, Input::parse(&line)) {
                            break;
                        }
                    }
                    None => {
                        debug!("Input closed");
                        input_open = false;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        }
    }

    info!(moves = game.history().len(), over = game.is_over(), "Game loop finished");
    Ok(game)
}

/// Acts on one typed line. Returns `false` to leave the loop.
fn handle_input<W: Write>(game: &mut GameController<Console<W>>, input: Input) -> bool {
    match input {
        Input::Square(index) => {
            if let Err(e) = game.submit_move(index) {
                debug!(index, error = %e, "Move rejected");
                game.observer_mut().say(&format!("Rejected: {e}"));
            }
        }
        Input::Reset => {
            game.observer_mut().say("Restarting.");
            game.reset();
        }
        Input::New => {
            let seed = game.settings().seed().wrapping_add(1);
            let settings = game.settings().clone().with_seed(seed);
            game.observer_mut().say(&format!("New game (seed {seed})."));
            game.new_game(settings);
        }
        Input::Help => game.observer_mut().say(HELP),
        Input::Quit => return false,
        Input::Empty => {}
        Input::Unknown(text) => {
            game.observer_mut()
                .say(&format!("Unknown input `{text}`. Type `help` for commands."));
        }
    }
    true
}
