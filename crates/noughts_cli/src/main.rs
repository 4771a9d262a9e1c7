//! Noughts - terminal front end
//!
//! Play tic-tac-toe against the minimax engine, watch the engine play
//! itself, or ask it for a move.

#![warn(missing_docs)]

mod cli;
mod config;
mod console;
mod play;
mod suggest;
mod watch;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, GameArgs};
use config::PlayConfig;
use console::{Console, Format, HELP};
use std::time::Duration;
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    match cli.command {
        Command::Play {
            game,
            think_ms,
            json,
        } => run_play(game, think_ms, json).await,
        Command::Watch { game, games } => run_watch(game, games),
        Command::Suggest {
            board,
            to_move,
            depth,
        } => run_suggest(&board, to_move, depth),
    }
}

/// Logs go to stderr so they never interleave with the board on stdout.
fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Run an interactive game
#[instrument(skip_all)]
async fn run_play(args: GameArgs, think_ms: Option<u64>, json: bool) -> Result<()> {
    let mut config = PlayConfig::resolve(&args)?;
    if let Some(think_ms) = think_ms {
        config.set_think_ms(think_ms);
    }
    let settings = config.game_settings()?;
    info!(?settings, think_ms = config.think_ms(), "Starting play");

    let format = if json { Format::Json } else { Format::Text };
    if format == Format::Text {
        println!("{HELP}\n");
    }

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let think = Duration::from_millis(*config.think_ms());
    play::run(settings, think, Console::stdout(format), stdin).await?;
    Ok(())
}

/// Run computer-vs-computer games
#[instrument(skip(args))]
fn run_watch(args: GameArgs, games: u32) -> Result<()> {
    let mut config = PlayConfig::resolve(&args)?;
    config.computers_only();
    let tally = watch::run(&config.game_settings()?, games)?;
    println!("{tally}");
    Ok(())
}

/// Print the best move for a board
fn run_suggest(board: &str, to_move: Option<noughts::Mark>, depth: u8) -> Result<()> {
    let (board, mark, outcome) = suggest::suggest(board, to_move, depth)?;
    println!("{board}\n");
    println!(
        "{mark} should play {} ({}), score {} after {} nodes",
        outcome.position,
        outcome.position.index(),
        outcome.score,
        outcome.nodes
    );
    Ok(())
}
