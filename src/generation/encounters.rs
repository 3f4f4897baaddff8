//! # Encounter Generation
//!
//! Monster placement. Each room other than the entry may receive one monster.

use super::{ContentCatalog, GenerationConfig};
use crate::game::{Bounds, Floor, Position, RoomId, TileType};
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;

/// Places monsters in the rooms of a freshly carved floor.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncounterGenerator;

impl EncounterGenerator {
    /// Rolls for one monster per non-entry room.
    ///
    /// A monster is only placed when its sampled interior tile is plain floor,
    /// so it never lands on the stairs. Returns how many were spawned.
    pub fn populate(
        &self,
        floor: &mut Floor,
        catalog: &ContentCatalog,
        config: &GenerationConfig,
        entry_room: Option<RoomId>,
        rng: &mut StdRng,
    ) -> usize {
        let candidates: Vec<Bounds> = floor
            .rooms
            .iter()
            .filter(|room| Some(room.id) != entry_room)
            .map(|room| room.bounds)
            .collect();

        let chance = config.monster_spawn_chance.clamp(0.0, 1.0);
        let mut spawned = 0;
        for bounds in candidates {
            if !rng.gen_bool(chance) {
                continue;
            }
            let Some(template) = catalog.random_monster(rng) else {
                break;
            };
            let pos = random_interior_position(&bounds, rng);
            if floor.tile_type(pos) != Some(TileType::Floor) {
                debug!("Monster spawn at {} skipped: not a floor tile", pos);
                continue;
            }
            floor.spawn_monster(template.clone(), pos);
            spawned += 1;
        }

        spawned
    }
}

/// Uniform position inside a room, excluding its outer ring.
pub fn random_interior_position(bounds: &Bounds, rng: &mut StdRng) -> Position {
    Position::new(
        rng.gen_range(bounds.interior_x()),
        rng.gen_range(bounds.interior_y()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Room, RoomType};
    use rand::SeedableRng;

    fn two_room_floor() -> Floor {
        let mut floor = Floor::new(1, 30, 12);
        let entry = Bounds::new(1, 1, 6, 6);
        let other = Bounds::new(12, 1, 7, 7);
        for bounds in [entry, other] {
            for pos in bounds.positions() {
                floor.set_tile_type(pos, TileType::Floor);
            }
        }
        floor.rooms.push(Room::new(0, RoomType::Entry, entry));
        floor.rooms.push(Room::new(1, RoomType::Chamber, other));
        floor
    }

    #[test]
    fn test_interior_positions_avoid_the_ring() {
        let bounds = Bounds::new(4, 4, 5, 6);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            let pos = random_interior_position(&bounds, &mut rng);
            assert!(bounds.interior_x().contains(&pos.x));
            assert!(bounds.interior_y().contains(&pos.y));
        }
    }

    #[test]
    fn test_guaranteed_spawn_skips_entry() {
        let mut floor = two_room_floor();
        let config = GenerationConfig {
            monster_spawn_chance: 1.0,
            ..GenerationConfig::default()
        };
        let spawned = EncounterGenerator.populate(
            &mut floor,
            &ContentCatalog::default(),
            &config,
            Some(0),
            &mut StdRng::seed_from_u64(8),
        );
        assert_eq!(spawned, 1);
        let monster = floor.monsters.values().next().expect("one monster");
        assert!(floor.rooms[1].contains(monster.position));
    }

    #[test]
    fn test_zero_chance_spawns_nothing() {
        let mut floor = two_room_floor();
        let config = GenerationConfig {
            monster_spawn_chance: 0.0,
            ..GenerationConfig::default()
        };
        let spawned = EncounterGenerator.populate(
            &mut floor,
            &ContentCatalog::default(),
            &config,
            Some(0),
            &mut StdRng::seed_from_u64(8),
        );
        assert_eq!(spawned, 0);
        assert!(floor.monsters.is_empty());
    }

    #[test]
    fn test_monster_never_spawns_on_stairs() {
        let mut floor = two_room_floor();
        // Only interior tile of a 3x3 room is its center.
        let exit = Bounds::new(22, 1, 3, 3);
        for pos in exit.positions() {
            floor.set_tile_type(pos, TileType::Floor);
        }
        floor.set_tile_type(exit.center(), TileType::StairsDown);
        floor.rooms.push(Room::new(2, RoomType::Exit, exit));
        let config = GenerationConfig {
            monster_spawn_chance: 1.0,
            ..GenerationConfig::default()
        };
        EncounterGenerator.populate(
            &mut floor,
            &ContentCatalog::default(),
            &config,
            Some(0),
            &mut StdRng::seed_from_u64(2),
        );
        assert!(floor.monster_at(exit.center()).is_none());
        assert_eq!(floor.monsters.len(), 1);
    }
}
