//! # Game Module
//!
//! Core game state management, floor representation, and the turn engine.
//!
//! This module contains the fundamental building blocks of the engine:
//! - Grid primitives (positions, directions, adjacency)
//! - Floor, tile and room representation
//! - Templates and live instances for monsters, items and the macguffin
//! - The `GameState` aggregate and the turn engine that mutates it
//! - Visibility, combat, monster AI and the autopilot

pub mod ai;
pub mod autoexplore;
pub mod combat;
pub mod entities;
pub mod session;
pub mod state;
pub mod turn;
pub mod visibility;
pub mod world;

pub use autoexplore::*;
pub use entities::*;
pub use session::*;
pub use state::*;
pub use turn::*;
pub use visibility::*;
pub use world::*;

use serde::{Deserialize, Serialize};

/// Represents a 2D coordinate on the floor grid.
///
/// # Examples
///
/// ```
/// use rogulator::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
///
/// let adjacent = pos.cardinal_adjacent_positions();
/// assert_eq!(adjacent.len(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the origin position (0, 0).
    pub fn origin() -> Self {
        Self::new(0, 0)
    }

    /// Calculates the Manhattan distance to another position.
    ///
    /// # Examples
    ///
    /// ```
    /// use rogulator::Position;
    ///
    /// let pos1 = Position::new(0, 0);
    /// let pos2 = Position::new(3, 4);
    /// assert_eq!(pos1.manhattan_distance(pos2), 7);
    /// ```
    pub fn manhattan_distance(self, other: Position) -> u32 {
        (self.x - other.x).unsigned_abs() + (self.y - other.y).unsigned_abs()
    }

    /// Calculates the Euclidean distance to another position.
    pub fn euclidean_distance(self, other: Position) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        (dx * dx + dy * dy).sqrt()
    }

    /// Calculates the Chebyshev (king-move) distance to another position.
    pub fn chebyshev_distance(self, other: Position) -> u32 {
        (self.x - other.x)
            .unsigned_abs()
            .max((self.y - other.y).unsigned_abs())
    }

    /// Checks whether exactly one axis differs by one and the other matches.
    ///
    /// ```
    /// use rogulator::Position;
    ///
    /// let pos = Position::new(5, 5);
    /// assert!(pos.is_cardinally_adjacent(Position::new(5, 6)));
    /// assert!(!pos.is_cardinally_adjacent(Position::new(6, 6)));
    /// assert!(!pos.is_cardinally_adjacent(pos));
    /// ```
    pub fn is_cardinally_adjacent(self, other: Position) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// Returns the 4 cardinal adjacent positions (no diagonals).
    pub fn cardinal_adjacent_positions(self) -> [Position; 4] {
        Direction::all().map(|direction| self.step(direction))
    }

    /// Returns the neighbouring position one step in `direction`.
    pub fn step(self, direction: Direction) -> Position {
        self + direction.to_delta()
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal movement directions. Diagonal movement is not modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Converts a direction to a position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use rogulator::{Direction, Position};
    ///
    /// let delta = Direction::Up.to_delta();
    /// assert_eq!(delta, Position::new(0, -1));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::Up => Position::new(0, -1),
            Direction::Down => Position::new(0, 1),
            Direction::Left => Position::new(-1, 0),
            Direction::Right => Position::new(1, 0),
        }
    }

    /// Converts a unit cardinal delta to a direction.
    ///
    /// Returns None if the delta doesn't correspond to a single cardinal step.
    pub fn from_delta(delta: Position) -> Option<Direction> {
        match (delta.x, delta.y) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }

    /// Picks the single step that best approximates `delta`.
    ///
    /// The axis with the larger magnitude wins; ties go horizontal. A zero
    /// delta has no direction.
    ///
    /// ```
    /// use rogulator::{Direction, Position};
    ///
    /// assert_eq!(Direction::dominant(Position::new(1, 1)), Some(Direction::Right));
    /// assert_eq!(Direction::dominant(Position::new(0, -1)), Some(Direction::Up));
    /// assert_eq!(Direction::dominant(Position::new(0, 0)), None);
    /// ```
    pub fn dominant(delta: Position) -> Option<Direction> {
        if delta.x == 0 && delta.y == 0 {
            return None;
        }
        if delta.x.abs() >= delta.y.abs() {
            Some(if delta.x > 0 {
                Direction::Right
            } else {
                Direction::Left
            })
        } else {
            Some(if delta.y > 0 {
                Direction::Down
            } else {
                Direction::Up
            })
        }
    }

    /// Returns all 4 directions in search order.
    pub fn all() -> [Direction; 4] {
        [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
    }
}

/// Identifier for monster, item and macguffin instances, unique within a floor.
pub type EntityId = u64;

/// Identifier for rooms, unique within a floor.
pub type RoomId = u32;
