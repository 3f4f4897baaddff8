//! # Dungeon Generation
//!
//! Room-and-corridor floor layouts.
//!
//! Rooms are placed by rejection sampling, connected in placement order with
//! L-shaped corridors, and then handed to the encounter and item generators.

use super::{
    ContentCatalog, EncounterGenerator, GeneratedFloor, GenerationConfig, Generator, ItemGenerator,
};
use crate::game::{Bounds, Floor, Position, Room, RoomId, RoomType, TileType};
use crate::{RogulatorError, RogulatorResult};
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;

/// Generates complete floors: layout, stairs, monsters, items and macguffin.
#[derive(Debug, Clone, Default)]
pub struct FloorGenerator {
    catalog: ContentCatalog,
    encounters: EncounterGenerator,
    items: ItemGenerator,
}

impl FloorGenerator {
    /// Creates a generator drawing from the default content catalog.
    ///
    /// # Examples
    ///
    /// ```
    /// use rogulator::{FloorGenerator, GenerationConfig, Generator};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let generator = FloorGenerator::new();
    /// let config = GenerationConfig::default();
    /// let generated = generator.generate(&config, &mut StdRng::seed_from_u64(42));
    /// assert!(generated.floor.is_walkable(generated.player_start));
    /// assert!(generator.validate(&generated, &config).is_ok());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator drawing from a custom catalog.
    pub fn with_catalog(catalog: ContentCatalog) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    pub fn catalog(&self) -> &ContentCatalog {
        &self.catalog
    }

    /// Entry, exit, then filler rooms up to the requested count.
    fn room_sequence(&self, config: &GenerationConfig, rng: &mut StdRng) -> Vec<RoomType> {
        let mut sequence = vec![RoomType::Entry, RoomType::Exit];
        for _ in 2..config.rooms_per_floor {
            sequence.push(if rng.gen_bool(config.chamber_chance.clamp(0.0, 1.0)) {
                RoomType::Chamber
            } else {
                RoomType::DeadEnd
            });
        }
        sequence
    }

    /// Places and carves every room that fits.
    fn place_rooms(&self, floor: &mut Floor, config: &GenerationConfig, rng: &mut StdRng) {
        for room_type in self.room_sequence(config, rng) {
            match self.try_place_room(room_type, &floor.rooms, config, rng) {
                Some(bounds) => {
                    let id = floor.rooms.len() as RoomId;
                    Self::carve_room(floor, &bounds);
                    floor.rooms.push(Room::new(id, room_type, bounds));
                }
                None => debug!(
                    "Skipped {} room after {} placement attempts",
                    room_type, config.placement_attempts
                ),
            }
        }
    }

    /// Samples size and position until a candidate clears every placed room.
    fn try_place_room(
        &self,
        room_type: RoomType,
        placed: &[Room],
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> Option<Bounds> {
        let limits = room_type.size_limits();
        let floor_width = config.width as i32;
        let floor_height = config.height as i32;

        for _ in 0..config.placement_attempts {
            let width = rng.gen_range(limits.min_width..=limits.max_width);
            let height = rng.gen_range(limits.min_height..=limits.max_height);
            let max_x = floor_width - width - 1;
            let max_y = floor_height - height - 1;
            if max_x < 1 || max_y < 1 {
                continue;
            }

            let candidate = Bounds::new(
                rng.gen_range(1..=max_x),
                rng.gen_range(1..=max_y),
                width,
                height,
            );
            if placed
                .iter()
                .all(|room| !candidate.overlaps(&room.bounds, config.room_padding))
            {
                return Some(candidate);
            }
        }

        None
    }

    fn carve_room(floor: &mut Floor, bounds: &Bounds) {
        for pos in bounds.positions() {
            floor.set_tile_type(pos, TileType::Floor);
        }
    }

    /// Joins each room to the next one in placement order.
    fn connect_rooms(floor: &mut Floor) {
        let centers: Vec<Position> = floor.rooms.iter().map(Room::center).collect();
        for pair in centers.windows(2) {
            Self::carve_l_corridor(floor, pair[0], pair[1]);
        }
    }

    /// Carves an L-shaped corridor, horizontal leg first.
    fn carve_l_corridor(floor: &mut Floor, start: Position, end: Position) {
        for x in start.x.min(end.x)..=start.x.max(end.x) {
            floor.set_tile_type(Position::new(x, start.y), TileType::Floor);
        }
        for y in start.y.min(end.y)..=start.y.max(end.y) {
            floor.set_tile_type(Position::new(end.x, y), TileType::Floor);
        }
    }

    /// Places the stairs and returns the entry room and player start.
    ///
    /// Falls back to the first and last rooms when the entry or exit could
    /// not be placed, and to the carved map center when no room exists.
    fn add_stairs(floor: &mut Floor) -> (Option<RoomId>, Position) {
        let entry = floor
            .room_of_type(RoomType::Entry)
            .or_else(|| floor.rooms.first())
            .map(|room| (room.id, room.center()));
        let exit_center = floor
            .room_of_type(RoomType::Exit)
            .or_else(|| floor.rooms.last())
            .map(Room::center);

        if let Some(stairs) = exit_center {
            floor.set_tile_type(stairs, TileType::StairsDown);
        }

        match entry {
            Some((id, start)) => (Some(id), start),
            None => {
                let center = Position::new(floor.width as i32 / 2, floor.height as i32 / 2);
                floor.set_tile_type(center, TileType::Floor);
                debug!("No rooms placed; starting at map center {}", center);
                (None, center)
            }
        }
    }
}

impl Generator<GeneratedFloor> for FloorGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> GeneratedFloor {
        let mut floor = Floor::new(config.floor_number, config.width, config.height);

        self.place_rooms(&mut floor, config, rng);
        Self::connect_rooms(&mut floor);
        let (entry_room, player_start) = Self::add_stairs(&mut floor);

        self.encounters
            .populate(&mut floor, &self.catalog, config, entry_room, rng);
        self.items
            .scatter_items(&mut floor, &self.catalog, config, entry_room, rng);
        if config.floor_number == 1 {
            self.items.place_macguffin(&mut floor, &self.catalog, rng);
        }

        debug!(
            "Generated floor {}: {} rooms, {} monsters, {} items, macguffin: {}",
            floor.number,
            floor.rooms.len(),
            floor.monsters.len(),
            floor.items.len(),
            floor.macguffin.is_some()
        );

        GeneratedFloor {
            floor,
            player_start,
        }
    }

    fn validate(&self, generated: &GeneratedFloor, _config: &GenerationConfig) -> RogulatorResult<()> {
        let floor = &generated.floor;
        if floor.count_tiles(TileType::Floor) == 0 {
            return Err(RogulatorError::GenerationFailed(
                "Floor has no floor tiles".to_string(),
            ));
        }

        let reachable = floor.reachable_from(generated.player_start);
        if let Some(room) = floor
            .rooms
            .iter()
            .find(|room| !reachable.contains(&room.center()))
        {
            return Err(RogulatorError::GenerationFailed(format!(
                "Room {} ({}) is not reachable from the entry",
                room.id, room.room_type
            )));
        }

        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "FloorGenerator"
    }
}
