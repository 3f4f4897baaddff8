//! # Commands
//!
//! Player intents accepted by a [`crate::GameSession`].

use crate::game::{Direction, Position, RunSize};
use serde::{Deserialize, Serialize};

/// One player intent. Serializable so that intents can arrive from a remote
/// controller as JSON.
///
/// # Examples
///
/// ```
/// use rogulator::{Command, Direction};
///
/// let json = serde_json::to_string(&Command::Move(Direction::Up)).unwrap();
/// assert_eq!(json, r#"{"move":"up"}"#);
/// let parsed: Command = serde_json::from_str(r#""rest""#).unwrap();
/// assert_eq!(parsed, Command::Rest);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Step (or attack) in a direction
    Move(Direction),
    /// Spend a turn in place
    Rest,
    /// Click a grid cell
    Click(Position),
    /// Abandon the current run and start a fresh one
    NewGame(RunSize),
}

impl Command {
    /// Whether this command can spend a game turn.
    pub fn is_turn_action(&self) -> bool {
        !matches!(self, Command::NewGame(_))
    }
}
