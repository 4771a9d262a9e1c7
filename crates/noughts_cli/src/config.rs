//! Game configuration loaded from TOML and overridden from the command line.

use crate::cli::GameArgs;
use derive_getters::Getters;
use derive_more::{Display, Error};
use noughts::{Difficulty, GameSettings, Mark, Player, PlayerKind};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// One seat at the board.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SeatConfig {
    /// Name shown in messages.
    name: String,

    /// Human or computer.
    #[serde(default = "default_kind")]
    kind: PlayerKind,
}

impl SeatConfig {
    fn player(&self, mark: Mark) -> Player {
        Player::new(self.name.clone(), mark, self.kind)
    }
}

/// Configuration for a game played from the terminal.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PlayConfig {
    /// Who places X.
    #[serde(default = "default_player_x")]
    player_x: SeatConfig,

    /// Who places O.
    #[serde(default = "default_player_o")]
    player_o: SeatConfig,

    /// Mark that moves first.
    #[serde(default = "default_first_mark")]
    first_mark: Mark,

    /// Computer strength.
    #[serde(default)]
    difficulty: Difficulty,

    /// Seed for the computer's depth sampler.
    #[serde(default)]
    seed: u64,

    /// Pause before each computer move, in milliseconds.
    #[serde(default = "default_think_ms")]
    think_ms: u64,
}

#[instrument]
fn default_kind() -> PlayerKind {
    PlayerKind::Human
}

#[instrument]
fn default_player_x() -> SeatConfig {
    SeatConfig {
        name: "Player".to_string(),
        kind: PlayerKind::Human,
    }
}

#[instrument]
fn default_player_o() -> SeatConfig {
    SeatConfig {
        name: "Computer".to_string(),
        kind: PlayerKind::Computer,
    }
}

#[instrument]
fn default_first_mark() -> Mark {
    Mark::X
}

#[instrument]
fn default_think_ms() -> u64 {
    600
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            player_x: default_player_x(),
            player_o: default_player_o(),
            first_mark: default_first_mark(),
            difficulty: Difficulty::default(),
            seed: 0,
            think_ms: default_think_ms(),
        }
    }
}

impl PlayConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(
            x = %config.player_x.name,
            o = %config.player_o.name,
            difficulty = %config.difficulty,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Builds the config for a command: the file named by `args` (or the
    /// defaults), then every flag `args` sets.
    #[instrument(skip(args))]
    pub fn resolve(args: &GameArgs) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => {
                debug!("No config file given, using defaults");
                Self::default()
            }
        };
        config.apply(args);
        Ok(config)
    }

    /// Overrides fields with whatever the command line set.
    pub fn apply(&mut self, args: &GameArgs) {
        if let Some(kind) = args.player_x {
            self.player_x.kind = kind;
        }
        if let Some(kind) = args.player_o {
            self.player_o.kind = kind;
        }
        if let Some(difficulty) = args.difficulty {
            self.difficulty = difficulty;
        }
        if let Some(seed) = args.seed {
            self.seed = seed;
        }
        if let Some(first) = args.first {
            self.first_mark = first;
        }
    }

    /// Replaces the think delay.
    pub fn set_think_ms(&mut self, think_ms: u64) {
        self.think_ms = think_ms;
    }

    /// Makes both seats computer players.
    pub fn computers_only(&mut self) {
        self.player_x.kind = PlayerKind::Computer;
        self.player_o.kind = PlayerKind::Computer;
    }

    /// Engine settings for one game.
    #[instrument(skip(self))]
    pub fn game_settings(&self) -> Result<GameSettings, ConfigError> {
        let settings = GameSettings::new(
            self.player_x.player(Mark::X),
            self.player_o.player(Mark::O),
        )
        .map_err(|e| ConfigError::new(format!("Invalid players: {}", e)))?;

        Ok(settings
            .with_first_mark(self.first_mark)
            .with_difficulty(self.difficulty)
            .with_seed(self.seed))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_are_human_against_hard_computer() {
        let settings = PlayConfig::default().game_settings().unwrap();
        assert_eq!(*settings.player_x().kind(), PlayerKind::Human);
        assert_eq!(*settings.player_o().kind(), PlayerKind::Computer);
        assert_eq!(*settings.first_mark(), Mark::X);
        assert_eq!(*settings.difficulty(), Difficulty::Hard);
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let file = write_config(
            r#"
difficulty = "easy"
first_mark = "O"

[player_o]
name = "Hal"
"#,
        );
        let config = PlayConfig::from_file(file.path()).unwrap();

        assert_eq!(*config.difficulty(), Difficulty::Easy);
        assert_eq!(*config.first_mark(), Mark::O);
        assert_eq!(config.player_o().name(), "Hal");
        // A seat without a kind is human.
        assert_eq!(*config.player_o().kind(), PlayerKind::Human);
        assert_eq!(config.player_x(), &default_player_x());
        assert_eq!(*config.think_ms(), 600);
    }

    #[test]
    fn test_flags_override_file() {
        let file = write_config("seed = 3\ndifficulty = \"medium\"\n");
        let args = GameArgs {
            config: Some(file.path().to_path_buf()),
            player_x: Some(PlayerKind::Computer),
            seed: Some(9),
            ..GameArgs::default()
        };
        let config = PlayConfig::resolve(&args).unwrap();

        assert_eq!(*config.seed(), 9);
        assert_eq!(*config.difficulty(), Difficulty::Medium);
        assert_eq!(*config.player_x().kind(), PlayerKind::Computer);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = PlayConfig::from_file("/nonexistent/noughts.toml").unwrap_err();
        assert!(err.message.starts_with("Failed to read config file"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let file = write_config("difficulty = \"impossible\"\n");
        let err = PlayConfig::from_file(file.path()).unwrap_err();
        assert!(err.message.starts_with("Failed to parse config"));
    }
}
