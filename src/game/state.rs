//! # Game State Module
//!
//! The [`GameState`] aggregate: run configuration, the player, the current
//! floor, the message log, room tracking and statistics.
//!
//! The turn engine in [`super::turn`] is the only code that mutates a state
//! during play; this module covers construction, bookkeeping and the JSON
//! save format.

use super::turn::GameEvent;
use super::visibility::update_visibility;
use super::{Floor, Player, Position, Room, RoomId};
use crate::generation::{FloorGenerator, GenerationConfig, Generator};
use crate::{balance, RogulatorError, RogulatorResult};
use log::info;
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Preset run lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunSize {
    Quick,
    Short,
    Medium,
    Long,
    Epic,
}

impl RunSize {
    pub fn all() -> [RunSize; 5] {
        [
            RunSize::Quick,
            RunSize::Short,
            RunSize::Medium,
            RunSize::Long,
            RunSize::Epic,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            RunSize::Quick => "quick",
            RunSize::Short => "short",
            RunSize::Medium => "medium",
            RunSize::Long => "long",
            RunSize::Epic => "epic",
        }
    }
}

impl fmt::Display for RunSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RunSize {
    type Err = RogulatorError;

    /// Parses a run size name, ignoring case.
    ///
    /// ```
    /// use rogulator::RunSize;
    ///
    /// assert_eq!("Medium".parse::<RunSize>().ok(), Some(RunSize::Medium));
    /// assert!("huge".parse::<RunSize>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        RunSize::all()
            .into_iter()
            .find(|size| size.name() == wanted)
            .ok_or_else(|| RogulatorError::InvalidAction(format!("Unknown run size '{}'", s)))
    }
}

/// Shape of a run: how many floors, rooms per floor, and narrative budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    pub size: RunSize,
    pub floors: u32,
    pub rooms_per_floor: u32,
    /// Upper bound on concurrent narrative threads a narrator may keep
    pub threads_max: u32,
}

impl RunConfig {
    /// Returns the preset for a run size.
    ///
    /// # Examples
    ///
    /// ```
    /// use rogulator::{RunConfig, RunSize};
    ///
    /// let quick = RunConfig::for_size(RunSize::Quick);
    /// assert_eq!((quick.floors, quick.rooms_per_floor, quick.threads_max), (1, 5, 0));
    /// ```
    pub fn for_size(size: RunSize) -> Self {
        let (floors, rooms_per_floor, threads_max) = match size {
            RunSize::Quick => (1, 5, 0),
            RunSize::Short => (3, 5, 1),
            RunSize::Medium => (6, 6, 2),
            RunSize::Long => (12, 5, 3),
            RunSize::Epic => (20, 5, 5),
        };
        Self {
            size,
            floors,
            rooms_per_floor,
            threads_max,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::for_size(RunSize::Quick)
    }
}

impl From<RunSize> for RunConfig {
    fn from(size: RunSize) -> Self {
        Self::for_size(size)
    }
}

/// Lifecycle of a run. `Won` and `Lost` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

/// Category of a log message, used by front-ends for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Info,
    Combat,
    Pickup,
    System,
}

/// One line of the message log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMessage {
    pub text: String,
    pub kind: MessageKind,
    /// Turn counter at the time the message was logged
    pub turn: u64,
}

/// Running totals for the current run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatistics {
    pub monsters_defeated: u32,
    pub damage_dealt: u64,
    pub damage_taken: u64,
    pub items_collected: u32,
    pub steps_taken: u64,
    pub rooms_entered: u32,
}

impl GameStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates statistics based on a game event.
    pub fn update_from_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::PlayerMoved { .. } => {
                self.steps_taken += 1;
            }
            GameEvent::PlayerAttacked { damage, killed, .. } => {
                self.damage_dealt += u64::from(damage.unsigned_abs());
                if *killed {
                    self.monsters_defeated += 1;
                }
            }
            GameEvent::MonsterAttacked { damage, .. } => {
                self.damage_taken += u64::from(damage.unsigned_abs());
            }
            GameEvent::ItemPickedUp { .. } | GameEvent::MacguffinCollected { .. } => {
                self.items_collected += 1;
            }
            GameEvent::RoomEntered { .. } => {
                self.rooms_entered += 1;
            }
            _ => {}
        }
    }
}

/// Everything describing one run in progress.
///
/// Serializes to an opaque JSON blob through [`GameState::save_to_json`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub run_id: Uuid,
    pub config: RunConfig,
    pub player: Player,
    pub floor: Floor,
    /// 1-based
    pub floor_number: u32,
    pub turn: u64,
    pub status: GameStatus,
    /// Newest last, capped at [`balance::MAX_MESSAGES`]
    pub messages: VecDeque<GameMessage>,
    pub current_room_id: Option<RoomId>,
    pub previous_room_id: Option<RoomId>,
    pub statistics: GameStatistics,
}

impl GameState {
    /// Starts a new run: generates floor 1 and places the player at its entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use rogulator::{GameState, GameStatus, RunConfig};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let state = GameState::new_game(RunConfig::default(), &mut StdRng::seed_from_u64(1));
    /// assert_eq!(state.status, GameStatus::Playing);
    /// assert_eq!(state.turn, 0);
    /// assert_eq!(state.floor_number, 1);
    /// ```
    pub fn new_game(config: RunConfig, rng: &mut StdRng) -> Self {
        let generation = GenerationConfig::for_floor(1, &config);
        let generated = FloorGenerator::new().generate(&generation, rng);

        let mut state = Self::with_floor(config, generated.floor, generated.player_start);
        state.run_id = uuid::Builder::from_random_bytes(rng.gen()).into_uuid();

        info!(
            "New {} run {} ({} floors)",
            config.size, state.run_id, config.floors
        );
        state
    }

    /// Builds a run around an existing floor.
    ///
    /// Logs the arrival message, starts room tracking in whatever room holds
    /// `player_start` and computes the initial field of view.
    pub fn with_floor(config: RunConfig, floor: Floor, player_start: Position) -> Self {
        let floor_number = floor.number;
        let mut state = Self {
            run_id: Uuid::new_v4(),
            config,
            player: Player::new(player_start),
            floor,
            floor_number,
            turn: 0,
            status: GameStatus::Playing,
            messages: VecDeque::new(),
            current_room_id: None,
            previous_room_id: None,
            statistics: GameStatistics::new(),
        };

        state.current_room_id = state.floor.room_at(player_start).map(|room| room.id);
        let goal = state
            .floor
            .macguffin
            .as_ref()
            .map_or_else(|| "exit".to_string(), |macguffin| macguffin.name().to_string());
        state.add_message(
            format!("You enter the dungeon. Find the {} and escape!", goal),
            MessageKind::System,
        );
        update_visibility(&mut state.floor, player_start, balance::VIEW_RADIUS);
        state
    }

    /// Appends to the log, dropping the oldest entries beyond capacity.
    pub fn add_message(&mut self, text: impl Into<String>, kind: MessageKind) {
        self.messages.push_back(GameMessage {
            text: text.into(),
            kind,
            turn: self.turn,
        });
        while self.messages.len() > balance::MAX_MESSAGES {
            self.messages.pop_front();
        }
    }

    /// The last `count` messages, oldest first.
    pub fn recent_messages(&self, count: usize) -> impl Iterator<Item = &GameMessage> {
        self.messages
            .iter()
            .skip(self.messages.len().saturating_sub(count))
    }

    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }

    /// Checks if the run has reached a terminal status.
    pub fn is_game_ended(&self) -> bool {
        self.status != GameStatus::Playing
    }

    /// The room the player is currently standing in, if any.
    pub fn current_room(&self) -> Option<&Room> {
        self.current_room_id.and_then(|id| self.floor.room(id))
    }

    pub fn previous_room(&self) -> Option<&Room> {
        self.previous_room_id.and_then(|id| self.floor.room(id))
    }

    /// Saves the game state to JSON.
    pub fn save_to_json(&self) -> RogulatorResult<String> {
        serde_json::to_string(self).map_err(RogulatorError::from)
    }

    /// Loads game state from JSON.
    pub fn load_from_json(json: &str) -> RogulatorResult<Self> {
        serde_json::from_str(json).map_err(RogulatorError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn new_state(seed: u64) -> GameState {
        GameState::new_game(RunConfig::default(), &mut StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_run_size_presets() {
        let expected = [(1, 5, 0), (3, 5, 1), (6, 6, 2), (12, 5, 3), (20, 5, 5)];
        for (size, (floors, rooms, threads)) in RunSize::all().into_iter().zip(expected) {
            let config = RunConfig::for_size(size);
            assert_eq!(config.floors, floors);
            assert_eq!(config.rooms_per_floor, rooms);
            assert_eq!(config.threads_max, threads);
            assert_eq!(size.to_string().parse::<RunSize>().ok(), Some(size));
        }
    }

    #[test]
    fn test_new_game_starts_at_entry() {
        let state = new_state(42);
        let entry = state.floor.rooms.first().expect("entry room");
        assert_eq!(state.player.position, entry.center());
        assert_eq!(state.current_room_id, Some(entry.id));
        assert_eq!(state.previous_room_id, None);
        assert_eq!(state.player.hp, 30);
        assert!(state.floor.macguffin.is_some());
        assert!(state.floor.get_tile(state.player.position).is_some_and(|t| t.visible));
    }

    #[test]
    fn test_welcome_message_names_the_macguffin() {
        let state = new_state(3);
        let name = state
            .floor
            .macguffin
            .as_ref()
            .map(|m| m.name().to_string())
            .expect("floor 1 has a macguffin");
        let first = state.messages.front().expect("welcome message");
        assert_eq!(first.kind, MessageKind::System);
        assert_eq!(first.text, format!("You enter the dungeon. Find the {} and escape!", name));
    }

    #[test]
    fn test_same_seed_same_run() {
        let a = new_state(1234);
        let b = new_state(1234);
        assert_eq!(a.run_id, b.run_id);
        assert_eq!(a.player, b.player);
        assert_eq!(a.floor.tiles, b.floor.tiles);
    }

    #[test]
    fn test_message_log_is_capped() {
        let mut state = new_state(5);
        for i in 0..120 {
            state.add_message(format!("message {}", i), MessageKind::Info);
        }
        assert_eq!(state.messages.len(), balance::MAX_MESSAGES);
        assert_eq!(state.messages.back().map(|m| m.text.as_str()), Some("message 119"));
        assert_eq!(state.messages.front().map(|m| m.text.as_str()), Some("message 70"));

        let recent: Vec<_> = state.recent_messages(2).map(|m| m.text.clone()).collect();
        assert_eq!(recent, vec!["message 118".to_string(), "message 119".to_string()]);
    }

    #[test]
    fn test_save_and_load_round_trip() -> RogulatorResult<()> {
        let state = new_state(77);
        let json = state.save_to_json()?;
        let loaded = GameState::load_from_json(&json)?;
        assert_eq!(loaded.run_id, state.run_id);
        assert_eq!(loaded.player, state.player);
        assert_eq!(loaded.floor.monsters, state.floor.monsters);
        assert_eq!(loaded.messages, state.messages);
        Ok(())
    }

    #[test]
    fn test_load_rejects_garbage() {
        assert!(matches!(
            GameState::load_from_json("{not json"),
            Err(RogulatorError::Serde(_))
        ));
    }
}
