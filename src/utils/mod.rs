//! # Utilities Module
//!
//! Grid algorithms shared by the game systems: line tracing and pathfinding.

pub mod math;
pub mod pathfinding;

pub use math::BresenhamLine;
pub use pathfinding::{find_path, next_step};
