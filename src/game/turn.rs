//! # Turn Engine
//!
//! Resolves one player intent and everything that follows from it.
//!
//! A turn is spent by moving, attacking or resting. Bumping into a wall costs
//! nothing. Every spent turn ends with the same sequence: advance the turn
//! counter, natural healing, the monster pass, and a fresh field of view.
//! Once the run is won or lost every entry point is a no-op.

use super::state::{GameState, GameStatus, MessageKind};
use super::visibility::update_visibility;
use super::{Direction, EntityId, ItemKind, Position, RoomId, RoomType, TileType};
use crate::balance;
use log::{debug, info};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Something that happened during a turn, reported to collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    PlayerMoved {
        from: Position,
        to: Position,
    },
    PlayerRested,
    PlayerHealed {
        amount: i32,
    },
    PlayerAttacked {
        monster_id: EntityId,
        monster_name: String,
        damage: i32,
        remaining_hp: i32,
        killed: bool,
    },
    MonsterAttacked {
        monster_id: EntityId,
        monster_name: String,
        damage: i32,
        player_hp: i32,
    },
    MonsterMoved {
        monster_id: EntityId,
        from: Position,
        to: Position,
    },
    ItemPickedUp {
        item_name: String,
        kind: ItemKind,
    },
    MacguffinCollected {
        name: String,
    },
    RoomEntered {
        room_id: RoomId,
        room_type: RoomType,
    },
    PlayerDied {
        killed_by: String,
    },
    Victory,
}

/// What a single intent did.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnOutcome {
    /// Whether the intent consumed a turn
    pub turn_taken: bool,
    /// Whether the player stepped into a room different from the last one
    pub entered_new_room: bool,
    pub events: Vec<GameEvent>,
}

impl TurnOutcome {
    pub fn none() -> Self {
        Self::default()
    }
}

/// How the player spent the turn; selects the healing interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Recovery {
    Moving,
    Resting,
}

impl Recovery {
    fn interval(self) -> u64 {
        match self {
            Recovery::Moving => balance::HEAL_INTERVAL_MOVING,
            Recovery::Resting => balance::HEAL_INTERVAL_RESTING,
        }
    }
}

impl GameState {
    /// Moves the player one step, attacking whatever monster stands there.
    ///
    /// # Examples
    ///
    /// ```
    /// use rogulator::{Direction, GameState, RunConfig};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let mut rng = StdRng::seed_from_u64(9);
    /// let mut state = GameState::new_game(RunConfig::default(), &mut rng);
    /// // The entry room is at least 5 wide, so one step from its center is always open.
    /// let outcome = state.move_player(Direction::Left, &mut rng);
    /// assert!(outcome.turn_taken);
    /// assert_eq!(state.turn, 1);
    /// ```
    pub fn move_player(&mut self, direction: Direction, rng: &mut StdRng) -> TurnOutcome {
        let mut outcome = TurnOutcome::none();
        if !self.is_playing() {
            return outcome;
        }

        let from = self.player.position;
        let target = from.step(direction);

        if let Some(monster_id) = self.floor.monster_at(target) {
            self.player_attack(monster_id, &mut outcome.events);
            self.end_turn(Recovery::Moving, rng, &mut outcome);
            return outcome;
        }

        if !self.floor.is_walkable(target) {
            debug!("Bumped into {:?} at {}", self.floor.tile_type(target), target);
            return outcome;
        }

        self.player.position = target;
        self.record(GameEvent::PlayerMoved { from, to: target }, &mut outcome.events);
        outcome.entered_new_room = self.track_room(&mut outcome.events);
        self.pick_up_item(&mut outcome.events);
        self.pick_up_macguffin(&mut outcome.events);
        self.check_victory(&mut outcome.events);
        self.end_turn(Recovery::Moving, rng, &mut outcome);
        outcome
    }

    /// Spends a turn standing still, healing faster than moving.
    pub fn rest(&mut self, rng: &mut StdRng) -> TurnOutcome {
        let mut outcome = TurnOutcome::none();
        if !self.is_playing() {
            return outcome;
        }

        self.add_message("You rest for a moment.", MessageKind::Info);
        self.record(GameEvent::PlayerRested, &mut outcome.events);
        self.end_turn(Recovery::Resting, rng, &mut outcome);
        outcome
    }

    /// Resolves a click on a grid cell.
    ///
    /// Clicking the player rests; clicking any of the eight surrounding cells
    /// moves along the dominant axis; anything farther is ignored.
    pub fn click(&mut self, target: Position, rng: &mut StdRng) -> TurnOutcome {
        if !self.is_playing() {
            return TurnOutcome::none();
        }

        let delta = target - self.player.position;
        if delta == Position::origin() {
            return self.rest(rng);
        }
        if target.chebyshev_distance(self.player.position) != 1 {
            return TurnOutcome::none();
        }

        match Direction::dominant(delta) {
            Some(direction) => self.move_player(direction, rng),
            None => TurnOutcome::none(),
        }
    }

    /// Folds an event into the statistics and the outcome.
    pub(crate) fn record(&mut self, event: GameEvent, events: &mut Vec<GameEvent>) {
        self.statistics.update_from_event(&event);
        events.push(event);
    }

    fn end_turn(&mut self, recovery: Recovery, rng: &mut StdRng, outcome: &mut TurnOutcome) {
        self.turn += 1;
        outcome.turn_taken = true;

        if self.player.hp < self.player.max_hp && self.turn % recovery.interval() == 0 {
            let healed = self.player.heal(balance::HEAL_AMOUNT);
            if recovery == Recovery::Resting {
                self.add_message("You feel a little better.", MessageKind::Info);
            }
            self.record(GameEvent::PlayerHealed { amount: healed }, &mut outcome.events);
        }

        if self.is_playing() {
            self.run_monster_turns(rng, &mut outcome.events);
        }

        update_visibility(&mut self.floor, self.player.position, balance::VIEW_RADIUS);
    }

    /// Updates current/previous room ids after the player moved.
    ///
    /// Returns true when the player stepped into a room other than the one
    /// tracked last. Leaving a room for a corridor updates the tracking but
    /// does not count as entering anything.
    fn track_room(&mut self, events: &mut Vec<GameEvent>) -> bool {
        let room = self
            .floor
            .room_at(self.player.position)
            .map(|room| (room.id, room.room_type));
        let room_id = room.map(|(id, _)| id);
        if room_id == self.current_room_id {
            return false;
        }

        self.previous_room_id = self.current_room_id;
        self.current_room_id = room_id;

        match room {
            Some((room_id, room_type)) => {
                debug!("Entered {} room {}", room_type, room_id);
                self.record(GameEvent::RoomEntered { room_id, room_type }, events);
                true
            }
            None => false,
        }
    }

    fn pick_up_item(&mut self, events: &mut Vec<GameEvent>) {
        let Some(item_id) = self.floor.item_at(self.player.position) else {
            return;
        };
        let Some(item) = self.floor.remove_item(item_id) else {
            return;
        };
        let template = item.template;

        let message = match template.kind {
            ItemKind::Weapon => {
                let message = match &self.player.weapon {
                    Some(old) => format!("You swap your {} for {}.", old.name, template.name),
                    None => format!("You pick up {}.", template.name),
                };
                self.player.weapon = Some(template.clone());
                message
            }
            ItemKind::Armor => {
                let message = match &self.player.armor {
                    Some(old) => format!("You swap your {} for {}.", old.name, template.name),
                    None => format!("You pick up {}.", template.name),
                };
                self.player.armor = Some(template.clone());
                message
            }
            ItemKind::Consumable => {
                let healed = self.player.heal(template.effect);
                format!("You drink {} and heal {} HP.", template.name, healed)
            }
            ItemKind::Gold => {
                self.player.gold += template.effect.max(0).unsigned_abs();
                format!("You pick up {} gold.", template.effect)
            }
            ItemKind::Key => {
                self.player.keys += 1;
                format!("You pick up {}.", template.name)
            }
        };

        self.add_message(message, MessageKind::Pickup);
        self.record(
            GameEvent::ItemPickedUp {
                item_name: template.name,
                kind: template.kind,
            },
            events,
        );
    }

    fn pick_up_macguffin(&mut self, events: &mut Vec<GameEvent>) {
        let position = self.player.position;
        let Some(macguffin) = self
            .floor
            .macguffin
            .as_mut()
            .filter(|macguffin| !macguffin.collected && macguffin.position == position)
        else {
            return;
        };

        macguffin.collected = true;
        let name = macguffin.name().to_string();
        self.player.has_macguffin = true;
        self.add_message(format!("You pick up the {}!", name), MessageKind::Pickup);
        self.record(GameEvent::MacguffinCollected { name }, events);
    }

    fn check_victory(&mut self, events: &mut Vec<GameEvent>) {
        if !self.player.has_macguffin
            || self.floor.tile_type(self.player.position) != Some(TileType::StairsDown)
        {
            return;
        }

        self.status = GameStatus::Won;
        self.add_message("You escaped with the treasure! Victory!", MessageKind::System);
        self.record(GameEvent::Victory, events);
        info!("Run {} won on turn {}", self.run_id, self.turn + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Bounds, Floor, Room, RunConfig};
    use crate::generation::ContentCatalog;
    use rand::SeedableRng;

    /// A 12x7 open room (interior x 1..=10, y 1..=5) surrounded by walls.
    fn arena() -> GameState {
        let mut floor = Floor::new(1, 12, 7);
        let bounds = Bounds::new(1, 1, 10, 5);
        for pos in bounds.positions() {
            floor.set_tile_type(pos, TileType::Floor);
        }
        floor.rooms.push(Room::new(0, RoomType::Chamber, bounds));
        GameState::with_floor(RunConfig::default(), floor, Position::new(3, 3))
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0)
    }

    fn template(id: &str) -> crate::game::ItemTemplate {
        ContentCatalog::default()
            .item(id)
            .cloned()
            .expect("seed content")
    }

    #[test]
    fn test_bumping_a_wall_is_free() {
        let mut state = arena();
        state.player.position = Position::new(1, 3);
        let outcome = state.move_player(Direction::Left, &mut rng());
        assert!(!outcome.turn_taken);
        assert!(outcome.events.is_empty());
        assert_eq!(state.turn, 0);
        assert_eq!(state.player.position, Position::new(1, 3));
    }

    #[test]
    fn test_move_advances_turn() {
        let mut state = arena();
        let outcome = state.move_player(Direction::Right, &mut rng());
        assert!(outcome.turn_taken);
        assert_eq!(state.turn, 1);
        assert_eq!(state.player.position, Position::new(4, 3));
        assert_eq!(state.statistics.steps_taken, 1);
        assert!(outcome.events.contains(&GameEvent::PlayerMoved {
            from: Position::new(3, 3),
            to: Position::new(4, 3)
        }));
    }

    #[test]
    fn test_rest_logs_and_takes_turn() {
        let mut state = arena();
        let outcome = state.rest(&mut rng());
        assert!(outcome.turn_taken);
        assert_eq!(state.turn, 1);
        assert_eq!(
            state.messages.back().map(|m| m.text.as_str()),
            Some("You rest for a moment.")
        );
    }

    #[test]
    fn test_resting_heals_every_third_turn() {
        let mut state = arena();
        state.player.hp = 20;
        let mut rng = rng();
        state.rest(&mut rng);
        state.rest(&mut rng);
        assert_eq!(state.player.hp, 20);
        let outcome = state.rest(&mut rng);
        assert_eq!(state.player.hp, 21);
        assert!(outcome.events.contains(&GameEvent::PlayerHealed { amount: 1 }));
        assert!(state.messages.iter().any(|m| m.text == "You feel a little better."));
    }

    #[test]
    fn test_moving_heals_every_tenth_turn() {
        let mut state = arena();
        state.player.hp = 10;
        let mut rng = rng();
        for i in 0..10 {
            let direction = if i % 2 == 0 { Direction::Right } else { Direction::Left };
            state.move_player(direction, &mut rng);
            if i < 9 {
                assert_eq!(state.player.hp, 10);
            }
        }
        assert_eq!(state.turn, 10);
        assert_eq!(state.player.hp, 11);
        assert!(!state.messages.iter().any(|m| m.text == "You feel a little better."));
    }

    #[test]
    fn test_click_moves_along_dominant_axis() {
        let mut state = arena();
        let mut rng = rng();
        state.click(Position::new(4, 4), &mut rng);
        assert_eq!(state.player.position, Position::new(4, 3));
        state.click(Position::new(4, 2), &mut rng);
        assert_eq!(state.player.position, Position::new(4, 2));
    }

    #[test]
    fn test_click_self_rests_and_far_click_is_ignored() {
        let mut state = arena();
        let mut rng = rng();
        let outcome = state.click(Position::new(3, 3), &mut rng);
        assert!(outcome.turn_taken);
        assert_eq!(state.player.position, Position::new(3, 3));

        let outcome = state.click(Position::new(7, 3), &mut rng);
        assert!(!outcome.turn_taken);
        assert_eq!(state.turn, 1);
    }

    #[test]
    fn test_weapon_pickup_and_swap() {
        let mut state = arena();
        state.floor.spawn_item(template("rusty_sword"), Position::new(4, 3));
        state.floor.spawn_item(template("iron_sword"), Position::new(5, 3));
        let mut rng = rng();

        state.move_player(Direction::Right, &mut rng);
        assert_eq!(state.player.attack_damage(), 5);
        assert_eq!(
            state.messages.back().map(|m| m.text.as_str()),
            Some("You pick up Rusty Sword.")
        );

        state.move_player(Direction::Right, &mut rng);
        assert_eq!(state.player.attack_damage(), 7);
        assert!(state
            .messages
            .iter()
            .any(|m| m.text == "You swap your Rusty Sword for Iron Sword."));
        assert!(state.floor.items.is_empty());
        assert_eq!(state.statistics.items_collected, 2);
    }

    #[test]
    fn test_consumable_heal_is_capped() {
        let mut state = arena();
        state.player.hp = 25;
        state.floor.spawn_item(template("health_potion"), Position::new(4, 3));
        state.move_player(Direction::Right, &mut rng());
        assert_eq!(state.player.hp, 30);
        assert!(state
            .messages
            .iter()
            .any(|m| m.text == "You drink Health Potion and heal 5 HP."));
    }

    #[test]
    fn test_gold_and_keys() {
        let mut state = arena();
        state.floor.spawn_item(template("gold_coin"), Position::new(4, 3));
        state.floor.spawn_item(template("rusty_key"), Position::new(5, 3));
        let mut rng = rng();
        state.move_player(Direction::Right, &mut rng);
        state.move_player(Direction::Right, &mut rng);
        assert_eq!(state.player.gold, 5);
        assert_eq!(state.player.keys, 1);
        assert!(state.messages.iter().any(|m| m.text == "You pick up 5 gold."));
    }

    #[test]
    fn test_stairs_without_macguffin_do_not_win() {
        let mut state = arena();
        state.floor.set_tile_type(Position::new(4, 3), TileType::StairsDown);
        state.move_player(Direction::Right, &mut rng());
        assert_eq!(state.status, GameStatus::Playing);
    }

    #[test]
    fn test_macguffin_then_stairs_wins_and_freezes() {
        let mut state = arena();
        let catalog = ContentCatalog::default();
        state
            .floor
            .place_macguffin(catalog.macguffins[0].clone(), Position::new(4, 3));
        state.floor.set_tile_type(Position::new(5, 3), TileType::StairsDown);
        let mut rng = rng();

        let outcome = state.move_player(Direction::Right, &mut rng);
        assert!(state.player.has_macguffin);
        assert!(state.floor.macguffin.as_ref().is_some_and(|m| m.collected));
        assert!(outcome
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::MacguffinCollected { .. })));

        let outcome = state.move_player(Direction::Right, &mut rng);
        assert_eq!(state.status, GameStatus::Won);
        assert!(outcome.events.contains(&GameEvent::Victory));
        assert_eq!(
            state.messages.back().map(|m| m.text.as_str()),
            Some("You escaped with the treasure! Victory!")
        );

        let turn = state.turn;
        let position = state.player.position;
        assert_eq!(state.move_player(Direction::Left, &mut rng), TurnOutcome::none());
        assert_eq!(state.rest(&mut rng), TurnOutcome::none());
        assert_eq!(state.click(position, &mut rng), TurnOutcome::none());
        assert_eq!(state.turn, turn);
        assert_eq!(state.player.position, position);
    }

    #[test]
    fn test_room_tracking() {
        let mut floor = Floor::new(1, 20, 7);
        let left = Bounds::new(1, 1, 5, 5);
        let right = Bounds::new(10, 1, 5, 5);
        for bounds in [left, right] {
            for pos in bounds.positions() {
                floor.set_tile_type(pos, TileType::Floor);
            }
        }
        for x in 6..10 {
            floor.set_tile_type(Position::new(x, 3), TileType::Floor);
        }
        floor.rooms.push(Room::new(0, RoomType::Entry, left));
        floor.rooms.push(Room::new(1, RoomType::Exit, right));
        let mut state = GameState::with_floor(RunConfig::default(), floor, Position::new(5, 3));
        let mut rng = rng();
        assert_eq!(state.current_room_id, Some(0));

        let outcome = state.move_player(Direction::Right, &mut rng);
        assert!(!outcome.entered_new_room);
        assert_eq!(state.current_room_id, None);
        assert_eq!(state.previous_room_id, Some(0));

        for _ in 0..3 {
            assert!(!state.move_player(Direction::Right, &mut rng).entered_new_room);
        }
        let outcome = state.move_player(Direction::Right, &mut rng);
        assert!(outcome.entered_new_room);
        assert_eq!(state.current_room_id, Some(1));
        assert_eq!(state.previous_room_id, None);
        assert_eq!(state.statistics.rooms_entered, 1);

        assert!(!state.move_player(Direction::Right, &mut rng).entered_new_room);
    }
}
