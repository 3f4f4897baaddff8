//! # Item Generation
//!
//! Scatters loot across a floor and places the quest macguffin.

use super::{random_interior_position, ContentCatalog, GenerationConfig};
use crate::game::{Bounds, Floor, Position, RoomId, RoomType, TileType};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

/// Places items and the macguffin on a freshly carved floor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemGenerator;

impl ItemGenerator {
    /// Scatters between `min_items` and `max_items` items in non-entry rooms.
    ///
    /// Samples that land off plain floor or on another item are dropped
    /// rather than retried. Returns how many were placed.
    pub fn scatter_items(
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
        if candidates.is_empty() {
            return 0;
        }

        let count = rng.gen_range(config.min_items..=config.max_items.max(config.min_items));
        let mut placed = 0;
        for _ in 0..count {
            let (Some(bounds), Some(template)) =
                (candidates.choose(rng), catalog.random_item(rng))
            else {
                break;
            };
            let pos = random_interior_position(bounds, rng);
            if floor.tile_type(pos) != Some(TileType::Floor) || floor.item_at(pos).is_some() {
                debug!("Item spawn at {} skipped", pos);
                continue;
            }
            floor.spawn_item(template.clone(), pos);
            placed += 1;
        }

        placed
    }

    /// Places a random macguffin inside the exit room (fallback: last room).
    ///
    /// If the sampled tile is not plain floor the tile to its right is tried
    /// once. Returns the chosen position, if any.
    pub fn place_macguffin(
        &self,
        floor: &mut Floor,
        catalog: &ContentCatalog,
        rng: &mut StdRng,
    ) -> Option<Position> {
        let bounds = floor
            .room_of_type(RoomType::Exit)
            .or_else(|| floor.rooms.last())
            .map(|room| room.bounds)?;
        let template = catalog.random_macguffin(rng)?.clone();

        let sampled = random_interior_position(&bounds, rng);
        let pos = [sampled, Position::new(sampled.x + 1, sampled.y)]
            .into_iter()
            .find(|&pos| floor.tile_type(pos) == Some(TileType::Floor));

        match pos {
            Some(pos) => {
                floor.place_macguffin(template, pos);
                Some(pos)
            }
            None => {
                debug!("Macguffin placement near {} failed", sampled);
                None
            }
        }
    }
}
