//! # Input Module
//!
//! Turns keys and scripts into [`Command`]s.
//!
//! Devices live outside the crate; this module only maps characters, which is
//! what the headless binary reads from its `--commands` script.

pub mod commands;

pub use commands::*;

use crate::game::Direction;
use crate::{RogulatorError, RogulatorResult};

/// Maps key characters to commands.
#[derive(Debug, Clone)]
pub struct InputHandler {
    /// Whether to enable Vi-style movement keys (hjkl)
    pub vi_keys_enabled: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a handler accepting WASD, Vi keys and `.` to rest.
    ///
    /// # Examples
    ///
    /// ```
    /// use rogulator::{Command, Direction, InputHandler};
    ///
    /// let input = InputHandler::new();
    /// assert_eq!(input.command_for_key('w'), Some(Command::Move(Direction::Up)));
    /// assert_eq!(input.command_for_key('l'), Some(Command::Move(Direction::Right)));
    /// assert_eq!(input.command_for_key('.'), Some(Command::Rest));
    /// ```
    pub fn new() -> Self {
        Self {
            vi_keys_enabled: true,
        }
    }

    /// Command bound to a key, if any. Letters are case-insensitive.
    pub fn command_for_key(&self, key: char) -> Option<Command> {
        let key = key.to_ascii_lowercase();
        let direction = match key {
            'w' => Some(Direction::Up),
            's' => Some(Direction::Down),
            'a' => Some(Direction::Left),
            'd' => Some(Direction::Right),
            'k' if self.vi_keys_enabled => Some(Direction::Up),
            'j' if self.vi_keys_enabled => Some(Direction::Down),
            'h' if self.vi_keys_enabled => Some(Direction::Left),
            'l' if self.vi_keys_enabled => Some(Direction::Right),
            _ => None,
        };

        match (direction, key) {
            (Some(direction), _) => Some(Command::Move(direction)),
            (None, '.') | (None, 'r') => Some(Command::Rest),
            _ => None,
        }
    }

    /// Parses a key script such as `"ddds.."`. Whitespace is ignored.
    pub fn parse_script(&self, script: &str) -> RogulatorResult<Vec<Command>> {
        script
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|key| {
                self.command_for_key(key).ok_or_else(|| {
                    RogulatorError::InvalidAction(format!("Unrecognized command key '{}'", key))
                })
            })
            .collect()
    }

    /// Parses a JSON array of commands, as sent by a remote controller.
    pub fn parse_json(&self, json: &str) -> RogulatorResult<Vec<Command>> {
        serde_json::from_str(json).map_err(RogulatorError::from)
    }
}
