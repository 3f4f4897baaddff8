//! Property tests for floor generation and visibility.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rogulator::{
    update_visibility, Direction, FloorGenerator, GeneratedFloor, GenerationConfig, Generator,
    Position, RoomType, RunConfig, RunSize, TileType,
};
use std::collections::{HashSet, VecDeque};

fn run_sizes() -> impl Strategy<Value = RunSize> {
    prop::sample::select(RunSize::all().to_vec())
}

fn generate(seed: u64, size: RunSize, floor_number: u32) -> (GeneratedFloor, GenerationConfig) {
    let config = GenerationConfig::for_floor(floor_number, &RunConfig::for_size(size));
    let generated = FloorGenerator::new().generate(&config, &mut StdRng::seed_from_u64(seed));
    (generated, config)
}

/// Plain breadth-first flood fill over walkable tiles.
fn flood_fill(generated: &GeneratedFloor) -> HashSet<Position> {
    let floor = &generated.floor;
    let mut seen = HashSet::from([generated.player_start]);
    let mut queue = VecDeque::from([generated.player_start]);
    while let Some(pos) = queue.pop_front() {
        for direction in Direction::all() {
            let next = pos.step(direction);
            if floor.is_walkable(next) && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_every_room_center_is_reachable(seed in any::<u64>(), size in run_sizes()) {
        let (generated, config) = generate(seed, size, 1);
        let reached = flood_fill(&generated);
        for room in &generated.floor.rooms {
            prop_assert!(reached.contains(&room.center()), "room {} unreachable", room.id);
        }
        prop_assert!(FloorGenerator::new().validate(&generated, &config).is_ok());
    }

    #[test]
    fn prop_rooms_keep_their_padding(seed in any::<u64>(), size in run_sizes()) {
        let (generated, config) = generate(seed, size, 1);
        let rooms = &generated.floor.rooms;
        prop_assert!(rooms.len() as u32 <= config.rooms_per_floor);
        for (i, a) in rooms.iter().enumerate() {
            for b in rooms.iter().skip(i + 1) {
                prop_assert!(!a.bounds.overlaps(&b.bounds, config.room_padding));
            }
        }
    }

    #[test]
    fn prop_entities_stand_on_open_ground(seed in any::<u64>(), floor_number in 1u32..4) {
        let (generated, _) = generate(seed, RunSize::Medium, floor_number);
        let floor = &generated.floor;

        for monster in floor.monsters.values() {
            prop_assert_eq!(floor.tile_type(monster.position), Some(TileType::Floor));
            prop_assert!(floor
                .room_of_type(RoomType::Entry)
                .map_or(true, |entry| !entry.contains(monster.position)));
        }

        let item_positions: HashSet<Position> = floor.items.values().map(|i| i.position).collect();
        prop_assert_eq!(item_positions.len(), floor.items.len());
        prop_assert!(floor.items.len() <= 2);
        for pos in item_positions {
            prop_assert_eq!(floor.tile_type(pos), Some(TileType::Floor));
        }

        match &floor.macguffin {
            Some(macguffin) => {
                prop_assert_eq!(floor_number, 1);
                prop_assert_eq!(floor.tile_type(macguffin.position), Some(TileType::Floor));
            }
            None => prop_assert!(floor_number > 1 || floor.rooms.is_empty()),
        }

        if !floor.rooms.is_empty() {
            prop_assert_eq!(floor.count_tiles(TileType::StairsDown), 1);
        }
    }

    #[test]
    fn prop_explored_only_grows(
        seed in any::<u64>(),
        moves in prop::collection::vec(0usize..4, 1..30),
    ) {
        let (mut generated, _) = generate(seed, RunSize::Quick, 1);
        let mut viewer = generated.player_start;
        let mut explored: HashSet<Position> = HashSet::new();

        for choice in moves {
            let next = viewer.step(Direction::all()[choice]);
            if generated.floor.is_walkable(next) {
                viewer = next;
            }
            update_visibility(&mut generated.floor, viewer, 8);

            let now: HashSet<Position> = generated
                .floor
                .positions()
                .filter(|&p| generated.floor.get_tile(p).is_some_and(|t| t.explored))
                .collect();
            prop_assert!(explored.is_subset(&now));
            prop_assert!(generated.floor.tiles.iter().flatten().all(|t| !t.visible || t.explored));
            prop_assert!(generated.floor.get_tile(viewer).is_some_and(|t| t.visible));
            explored = now;
        }
    }
}
