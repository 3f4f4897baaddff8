//! # Generation Module
//!
//! Procedural floor generation: room-and-corridor layouts, monster encounters,
//! scattered items and the quest macguffin.
//!
//! Generation is driven entirely by the [`GenerationConfig`] and the caller's
//! random number generator, so a seed always reproduces the same floor.

pub mod catalog;
pub mod dungeon;
pub mod encounters;
pub mod items;

pub use catalog::*;
pub use dungeon::*;
pub use encounters::*;
pub use items::*;

use crate::balance;
use crate::game::{Floor, Position, RunConfig};
use crate::RogulatorResult;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Configuration for generating a single floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// 1-based floor number; only floor 1 receives a macguffin
    pub floor_number: u32,
    /// Rooms requested, including the entry and exit rooms
    pub rooms_per_floor: u32,
    pub width: u32,
    pub height: u32,
    /// Attempts to place each room before skipping it
    pub placement_attempts: u32,
    /// Minimum empty margin between rooms
    pub room_padding: i32,
    /// Probability that a filler room is a chamber (otherwise a dead end)
    pub chamber_chance: f64,
    /// Probability that a non-entry room receives a monster
    pub monster_spawn_chance: f64,
    pub min_items: u32,
    pub max_items: u32,
}

impl GenerationConfig {
    /// Creates the configuration for one floor of a run.
    ///
    /// # Examples
    ///
    /// ```
    /// use rogulator::{GenerationConfig, RunConfig, RunSize};
    ///
    /// let run = RunConfig::for_size(RunSize::Medium);
    /// let config = GenerationConfig::for_floor(2, &run);
    /// assert_eq!(config.floor_number, 2);
    /// assert_eq!(config.rooms_per_floor, 6);
    /// assert_eq!((config.width, config.height), (50, 40));
    /// ```
    pub fn for_floor(floor_number: u32, run: &RunConfig) -> Self {
        Self {
            floor_number,
            rooms_per_floor: run.rooms_per_floor,
            width: balance::FLOOR_WIDTH,
            height: balance::FLOOR_HEIGHT,
            placement_attempts: balance::ROOM_PLACEMENT_ATTEMPTS,
            room_padding: balance::ROOM_PADDING,
            chamber_chance: balance::CHAMBER_CHANCE,
            monster_spawn_chance: balance::MONSTER_SPAWN_CHANCE,
            min_items: balance::ITEMS_PER_FLOOR_MIN,
            max_items: balance::ITEMS_PER_FLOOR_MAX,
        }
    }

    /// Creates a configuration for testing: a smaller floor, no monsters.
    pub fn for_testing() -> Self {
        Self {
            floor_number: 1,
            rooms_per_floor: 3,
            width: 30,
            height: 24,
            monster_spawn_chance: 0.0,
            ..Self::default()
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::for_floor(1, &RunConfig::default())
    }
}

/// Result of generating a floor: the floor and where the player arrives.
#[derive(Debug, Clone)]
pub struct GeneratedFloor {
    pub floor: Floor,
    pub player_start: Position,
}

/// Trait for procedural generators.
///
/// Generation itself is total; `validate` checks the structural guarantees
/// separately so that tests and tooling can assert them.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> T;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> RogulatorResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}
