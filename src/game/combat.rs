//! # Combat
//!
//! Melee resolution between the player and monsters. Attacks always hit.

use super::state::{GameState, GameStatus, MessageKind};
use super::turn::GameEvent;
use super::EntityId;
use crate::balance;
use log::info;

/// Damage a monster deals through the player's armor; never below the minimum.
///
/// ```
/// use rogulator::game::combat::damage_after_armor;
///
/// assert_eq!(damage_after_armor(3, 1), 2);
/// assert_eq!(damage_after_armor(1, 5), 1);
/// ```
pub fn damage_after_armor(damage: i32, reduction: i32) -> i32 {
    (damage - reduction).max(balance::MIN_DAMAGE)
}

impl GameState {
    /// The player strikes a monster. A monster reduced to zero is removed.
    pub(crate) fn player_attack(&mut self, monster_id: EntityId, events: &mut Vec<GameEvent>) {
        let damage = self.player.attack_damage();
        let Some(monster) = self.floor.monsters.get_mut(&monster_id) else {
            return;
        };

        monster.current_hp -= damage;
        let remaining_hp = monster.current_hp;
        let monster_name = monster.name().to_string();
        let killed = !monster.is_alive();

        self.add_message(
            format!("You hit the {} for {} damage!", monster_name, damage),
            MessageKind::Combat,
        );
        if killed {
            self.floor.remove_monster(monster_id);
            self.add_message(
                format!("The {} is defeated!", monster_name),
                MessageKind::Combat,
            );
        }

        self.record(
            GameEvent::PlayerAttacked {
                monster_id,
                monster_name,
                damage,
                remaining_hp,
                killed,
            },
            events,
        );
    }

    /// A monster strikes the player, possibly ending the run.
    pub(crate) fn monster_attack(&mut self, monster_id: EntityId, events: &mut Vec<GameEvent>) {
        let Some(monster) = self.floor.monsters.get(&monster_id) else {
            return;
        };
        let monster_name = monster.name().to_string();
        let damage = damage_after_armor(monster.template.damage, self.player.damage_reduction());

        self.player.hp = (self.player.hp - damage).max(0);
        self.add_message(
            format!("The {} hits you for {} damage!", monster_name, damage),
            MessageKind::Combat,
        );
        self.record(
            GameEvent::MonsterAttacked {
                monster_id,
                monster_name: monster_name.clone(),
                damage,
                player_hp: self.player.hp,
            },
            events,
        );

        if !self.player.is_alive() {
            self.status = GameStatus::Lost;
            self.add_message("You have been defeated...", MessageKind::System);
            self.record(
                GameEvent::PlayerDied {
                    killed_by: monster_name,
                },
                events,
            );
            info!("Run {} lost on turn {}", self.run_id, self.turn);
        }
    }
}
