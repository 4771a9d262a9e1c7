//! Terminal rendering of game events and parsing of typed commands.

use noughts::{GameEvent, GameObserver, Position};
use std::io::Write;
use tracing::warn;

/// How events are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Board drawings and sentences.
    Text,
    /// One JSON object per event.
    Json,
}

/// Observer that prints each event to a writer (stdout by default).
#[derive(Debug)]
pub struct Console<W = std::io::Stdout> {
    format: Format,
    out: W,
}

impl Console {
    /// Prints to stdout.
    pub fn stdout(format: Format) -> Self {
        Self::new(format, std::io::stdout())
    }
}

impl<W: Write> Console<W> {
    /// Prints to `out`.
    pub fn new(format: Format, out: W) -> Self {
        Self { format, out }
    }

    /// The underlying writer.
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Prints a message that is not a game event, such as a rejected move.
    pub fn say(&mut self, message: &str) {
        let text = match self.format {
            Format::Text => message.to_string(),
            Format::Json => serde_json::json!({ "event": "message", "text": message }).to_string(),
        };
        self.write_line(&text);
    }

    fn write_line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}").and_then(|()| self.out.flush()) {
            warn!(error = %e, "Failed to write to console");
        }
    }

    fn render(&self, event: &GameEvent) -> String {
        match self.format {
            Format::Json => serde_json::to_string(event).unwrap_or_else(|e| {
                warn!(error = %e, "Failed to serialize event");
                String::new()
            }),
            Format::Text => match event {
                GameEvent::MoveApplied {
                    board,
                    position,
                    mover,
                } => format!("\n{mover} plays {position}\n\n{board}\n"),
                GameEvent::TurnChanged { next } if next.is_computer() => {
                    format!("{next} is thinking...")
                }
                GameEvent::TurnChanged { next } => {
                    format!("{next} to move (0-8 or a square name)")
                }
                GameEvent::GameEnded { outcome } => {
                    format!("{outcome}. Type `new` for another game or `quit`.")
                }
            },
        }
    }
}

impl<W: Write> GameObserver for Console<W> {
    fn notify(&mut self, event: &GameEvent) {
        let text = self.render(event);
        if !text.is_empty() {
            self.write_line(&text);
        }
    }
}

/// A line typed during play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A square, by index or name.
    Square(usize),
    /// Restart the current game.
    Reset,
    /// Start a new game with the next seed.
    New,
    /// Print the commands.
    Help,
    /// Leave.
    Quit,
    /// Blank line.
    Empty,
    /// Anything else.
    Unknown(String),
}

impl Input {
    /// Parses one line. Numbers pass through unchecked so the engine can
    /// report out-of-range squares itself.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line.to_ascii_lowercase().as_str() {
            "" => Input::Empty,
            "reset" | "r" => Input::Reset,
            "new" | "n" => Input::New,
            "help" | "h" | "?" => Input::Help,
            "quit" | "q" | "exit" => Input::Quit,
            other => {
                if let Ok(index) = other.parse::<usize>() {
                    Input::Square(index)
                } else if let Ok(position) = other.parse::<Position>() {
                    Input::Square(position.index())
                } else {
                    Input::Unknown(line.to_string())
                }
            }
        }
    }
}

/// Lines printed for `help`.
pub const HELP: &str = "\
Squares are numbered 0-8 left to right, top to bottom, or named
(top-left, center, bottom-right, ...).
Commands: reset, new, help, quit";
