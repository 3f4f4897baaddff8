//! # Monster AI
//!
//! The monster pass run at the end of every player turn.
//!
//! Monsters act in spawn order against a snapshot of where everyone stood
//! when the pass began. A monster that has noticed the player attacks when
//! cardinally adjacent and otherwise closes in along the shortest path.

use super::state::GameState;
use super::turn::GameEvent;
use super::{EntityId, Position};
use crate::balance;
use crate::utils::next_step;
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::HashSet;

impl GameState {
    /// Gives every living monster a chance to act.
    ///
    /// Each monster consumes one random draw and acts only if it falls below
    /// its speed. The pass stops as soon as the player is dead.
    pub(crate) fn run_monster_turns(&mut self, rng: &mut StdRng, events: &mut Vec<GameEvent>) {
        let snapshot: Vec<(EntityId, Position)> = self
            .floor
            .living_monsters()
            .map(|monster| (monster.instance_id, monster.position))
            .collect();

        for &(monster_id, _) in &snapshot {
            if !self.player.is_alive() || !self.is_playing() {
                break;
            }

            let Some(monster) = self
                .floor
                .monsters
                .get(&monster_id)
                .filter(|monster| monster.is_alive())
            else {
                continue;
            };
            let position = monster.position;
            let speed = monster.template.speed;
            let pursues = monster.template.behavior.pursues();

            if rng.gen::<f64>() >= speed {
                continue;
            }

            let player_position = self.player.position;
            if position.euclidean_distance(player_position) > balance::MONSTER_DETECTION_RANGE {
                continue;
            }

            if position.is_cardinally_adjacent(player_position) {
                self.monster_attack(monster_id, events);
                continue;
            }

            if !pursues {
                continue;
            }

            let blocked: HashSet<Position> = snapshot
                .iter()
                .filter(|(other, _)| *other != monster_id)
                .map(|(_, pos)| *pos)
                .collect();
            let Some(step) = next_step(&self.floor, position, player_position, &blocked) else {
                debug!("Monster {} at {} has no path to the player", monster_id, position);
                continue;
            };
            if step == player_position || self.floor.monster_at(step).is_some() {
                continue;
            }

            if let Some(monster) = self.floor.monsters.get_mut(&monster_id) {
                monster.position = step;
            }
            events.push(GameEvent::MonsterMoved {
                monster_id,
                from: position,
                to: step,
            });
        }
    }
}
