//! # Rogulator
//!
//! A turn-based roguelike dungeon-crawler engine with an optional narrative layer.
//!
//! ## Architecture Overview
//!
//! The engine is a set of small systems orchestrated by a single state machine:
//!
//! - **Game State**: the [`GameState`] aggregate and the turn engine that mutates it
//! - **Generation System**: room-and-corridor floor generation with monster, item
//!   and macguffin placement
//! - **Pathfinding**: bounded A* used by the monster AI
//! - **Visibility**: raycast field of view with persistent exploration
//! - **Narrative Boundary**: a serializable context snapshot handed to an optional
//!   [`Narrator`]; the game is fully playable without one
//!
//! Rendering, input devices and persistence live outside the crate. Callers send
//! [`Command`]s through a [`GameSession`] and read the resulting state back.

pub mod game;
pub mod generation;
pub mod input;
pub mod narrative;
pub mod utils;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use narrative::*;
pub use utils::{find_path, next_step, BresenhamLine};

/// Core error type for the Rogulator engine.
///
/// Turn resolution itself never fails; these errors only surface at the edges
/// (serialization, command parsing, generation validation, narration).
#[derive(thiserror::Error, Debug)]
pub enum RogulatorError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Action or command cannot be understood
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// Generated floor failed validation
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// Narrative collaborator failed
    #[error("Narrative error: {0}")]
    Narrative(String),
}

/// Result type used throughout the Rogulator codebase.
pub type RogulatorResult<T> = Result<T, RogulatorError>;

/// Version information for the engine.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game balance constants.
///
/// Centralized here so tuning never requires touching the systems themselves.
pub mod balance {
    /// Player starting (and maximum) health
    pub const PLAYER_STARTING_HP: i32 = 30;

    /// Damage dealt by an unarmed player
    pub const PLAYER_BASE_DAMAGE: i32 = 2;

    /// Health restored by natural regeneration
    pub const HEAL_AMOUNT: i32 = 1;

    /// Heal once every N turns while moving
    pub const HEAL_INTERVAL_MOVING: u64 = 10;

    /// Heal once every N turns while resting
    pub const HEAL_INTERVAL_RESTING: u64 = 3;

    /// Minimum damage after armor reduction
    pub const MIN_DAMAGE: i32 = 1;

    /// Player view radius in tiles
    pub const VIEW_RADIUS: u32 = 8;

    /// Distance at which monsters notice the player
    pub const MONSTER_DETECTION_RANGE: f64 = 8.0;

    /// Default floor width in tiles
    pub const FLOOR_WIDTH: u32 = 50;

    /// Default floor height in tiles
    pub const FLOOR_HEIGHT: u32 = 40;

    /// Chance that a non-entry room receives a monster
    pub const MONSTER_SPAWN_CHANCE: f64 = 0.5;

    /// Fewest items scattered on a floor
    pub const ITEMS_PER_FLOOR_MIN: u32 = 1;

    /// Most items scattered on a floor
    pub const ITEMS_PER_FLOOR_MAX: u32 = 2;

    /// Chance that a filler room is a chamber rather than a dead end
    pub const CHAMBER_CHANCE: f64 = 0.7;

    /// Attempts to place a room before skipping it
    pub const ROOM_PLACEMENT_ATTEMPTS: u32 = 30;

    /// Empty margin kept between rooms
    pub const ROOM_PADDING: i32 = 2;

    /// Search bound for monster pathfinding, in steps
    pub const PATHFINDING_MAX_DEPTH: u32 = 20;

    /// Message log capacity
    pub const MAX_MESSAGES: usize = 50;

    /// Half-width of the square in which monsters count as "nearby" for narration
    pub const NARRATIVE_RADIUS: i32 = 5;

    /// Number of log lines passed to the narrator
    pub const NARRATIVE_RECENT_EVENTS: usize = 3;
}
