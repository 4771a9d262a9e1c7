//! Command-line interface for noughts.

use clap::{Args, Parser, Subcommand};
use noughts::{Difficulty, Mark, PlayerKind, UNBOUNDED_DEPTH};
use std::path::PathBuf;

/// Noughts - tic-tac-toe against a minimax opponent
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Tic-tac-toe in the terminal against a minimax opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive game
    Play {
        /// Game setup shared with `watch`
        #[command(flatten)]
        game: GameArgs,

        /// Pause before each computer move, in milliseconds
        #[arg(long)]
        think_ms: Option<u64>,

        /// Print events as JSON lines instead of a board
        #[arg(long)]
        json: bool,
    },

    /// Run computer-vs-computer games and report the tally
    Watch {
        /// Game setup shared with `play`; both seats become computers
        #[command(flatten)]
        game: GameArgs,

        /// Number of games, each seeded one higher than the last
        #[arg(short, long, default_value = "10")]
        games: u32,
    },

    /// Print the best move for a position
    Suggest {
        /// Board as nine cells, e.g. "X_O _X_ __O" (`_`, `.` or `-` for empty)
        board: String,

        /// Mark to move; inferred from the mark counts if omitted
        #[arg(long)]
        to_move: Option<Mark>,

        /// Search depth in plies
        #[arg(short, long, default_value_t = UNBOUNDED_DEPTH)]
        depth: u8,
    },
}

/// Options that pick the players and the game setup.
///
/// Each one overrides the matching field of the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct GameArgs {
    /// Path to a TOML game config
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Who plays X (human or computer)
    #[arg(long = "x")]
    pub player_x: Option<PlayerKind>,

    /// Who plays O (human or computer)
    #[arg(long = "o")]
    pub player_o: Option<PlayerKind>,

    /// Computer strength (easy, medium or hard)
    #[arg(short, long)]
    pub difficulty: Option<Difficulty>,

    /// Seed for the computer's depth sampler
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Mark that moves first
    #[arg(long)]
    pub first: Option<Mark>,
}
