//! # Autoexplore Module
//!
//! An autopilot that walks the player to the macguffin and then to the stairs.
//! Used by the headless binary's `--autoplay` mode and by tests.

use super::state::GameState;
use super::{Direction, Position};
use crate::utils::find_path;
use std::collections::HashSet;

/// Plans one step at a time toward the current objective.
///
/// Monsters are not avoided: stepping into one is an attack, which is how the
/// autopilot clears its way.
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    /// Path planned on the last call, starting at the player
    pub current_path: Vec<Position>,
    /// Objective of the last call
    pub target: Option<Position>,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// The uncollected macguffin if there is one, otherwise the stairs.
    pub fn objective(state: &GameState) -> Option<Position> {
        state
            .floor
            .macguffin
            .as_ref()
            .filter(|macguffin| !macguffin.collected)
            .map(|macguffin| macguffin.position)
            .or_else(|| state.floor.stairs_down_position())
    }

    /// Direction of the next step toward the objective.
    ///
    /// Returns `None` when the run is over, there is no objective, the player
    /// already stands on it, or it cannot be reached.
    pub fn next_direction(&mut self, state: &GameState) -> Option<Direction> {
        self.current_path.clear();
        self.target = None;
        if state.is_game_ended() {
            return None;
        }

        let target = Self::objective(state)?;
        self.target = Some(target);

        let depth = state.floor.width * state.floor.height;
        let path = find_path(
            &state.floor,
            state.player.position,
            target,
            depth,
            &HashSet::new(),
        )?;
        let next = *path.get(1)?;
        self.current_path = path;

        Direction::from_delta(next - state.player.position)
    }
}
