//! # World Module
//!
//! Floor, tile and room representation.
//!
//! A [`Floor`] owns the tile grid together with every entity living on it.
//! Monsters and items are kept in id-ordered maps so that removal is cheap and
//! iteration order matches spawn order.

use super::entities::{Item, ItemTemplate, Macguffin, MacguffinTemplate, Monster, MonsterTemplate};
use super::{EntityId, Position, RoomId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::ops::RangeInclusive;

/// The kind of terrain occupying a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileType {
    Floor,
    Wall,
    Door,
    StairsDown,
    StairsUp,
}

impl TileType {
    /// Anything that is not a wall can be walked on.
    pub fn is_walkable(self) -> bool {
        self != TileType::Wall
    }

    /// Walls are the only tiles that block line of sight.
    pub fn blocks_sight(self) -> bool {
        self == TileType::Wall
    }
}

/// A single grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub tile_type: TileType,
    /// Ever seen by the player. Never reset.
    pub explored: bool,
    /// Seen this turn. Recomputed every turn.
    pub visible: bool,
}

impl Tile {
    /// Creates an unexplored, unseen tile of the given type.
    pub fn new(tile_type: TileType) -> Self {
        Self {
            tile_type,
            explored: false,
            visible: false,
        }
    }

    pub fn floor() -> Self {
        Self::new(TileType::Floor)
    }

    pub fn wall() -> Self {
        Self::new(TileType::Wall)
    }

    /// Sets visibility; a visible tile is always marked explored as well.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if visible {
            self.explored = true;
        }
    }
}

/// Purpose of a room within the floor layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    /// Where the player arrives
    Entry,
    /// Holds the stairs down
    Exit,
    /// Reserved; never produced by the generator
    Corridor,
    /// Standard filler room
    Chamber,
    /// Small filler room
    DeadEnd,
}

/// Inclusive size limits used when sampling a room of some type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomSizeLimits {
    pub min_width: i32,
    pub max_width: i32,
    pub min_height: i32,
    pub max_height: i32,
}

impl RoomType {
    /// Size limits for this room type.
    pub fn size_limits(self) -> RoomSizeLimits {
        let (min_width, max_width, min_height, max_height) = match self {
            RoomType::Entry | RoomType::Exit => (5, 7, 5, 7),
            RoomType::Corridor => (3, 3, 5, 9),
            RoomType::Chamber => (5, 9, 5, 9),
            RoomType::DeadEnd => (4, 5, 4, 5),
        };
        RoomSizeLimits {
            min_width,
            max_width,
            min_height,
            max_height,
        }
    }

    /// Lowercase name used in logs and narrative context.
    pub fn name(self) -> &'static str {
        match self {
            RoomType::Entry => "entry",
            RoomType::Exit => "exit",
            RoomType::Corridor => "corridor",
            RoomType::Chamber => "chamber",
            RoomType::DeadEnd => "dead_end",
        }
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Axis-aligned rectangle in tile coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Gets the center position, rounding toward the top-left.
    ///
    /// # Examples
    ///
    /// ```
    /// use rogulator::{Bounds, Position};
    ///
    /// let bounds = Bounds::new(5, 5, 10, 7);
    /// assert_eq!(bounds.center(), Position::new(10, 8));
    /// ```
    pub fn center(&self) -> Position {
        Position::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Checks if a position lies inside the rectangle.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.x
            && pos.x < self.x + self.width
            && pos.y >= self.y
            && pos.y < self.y + self.height
    }

    /// Checks whether the rectangles come within `padding` tiles of each other.
    ///
    /// Two rectangles are considered apart only when a gap wider than
    /// `padding` separates them on at least one axis.
    pub fn overlaps(&self, other: &Bounds, padding: i32) -> bool {
        !(self.x + self.width + padding < other.x
            || other.x + other.width + padding < self.x
            || self.y + self.height + padding < other.y
            || other.y + other.height + padding < self.y)
    }

    /// Column range excluding the outer ring.
    pub fn interior_x(&self) -> RangeInclusive<i32> {
        (self.x + 1)..=(self.x + self.width - 2)
    }

    /// Row range excluding the outer ring.
    pub fn interior_y(&self) -> RangeInclusive<i32> {
        (self.y + 1)..=(self.y + self.height - 2)
    }

    /// All positions covered by the rectangle, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (self.y..self.y + self.height)
            .flat_map(move |y| (self.x..self.x + self.width).map(move |x| Position::new(x, y)))
    }
}

/// A typed rectangle placed by the generator. Immutable after generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub room_type: RoomType,
    pub bounds: Bounds,
}

impl Room {
    /// Creates a new room.
    ///
    /// # Examples
    ///
    /// ```
    /// use rogulator::{Bounds, Position, Room, RoomType};
    ///
    /// let room = Room::new(1, RoomType::Chamber, Bounds::new(5, 5, 10, 8));
    /// assert!(room.contains(Position::new(7, 7)));
    /// assert!(!room.contains(Position::new(20, 20)));
    /// ```
    pub fn new(id: RoomId, room_type: RoomType, bounds: Bounds) -> Self {
        Self {
            id,
            room_type,
            bounds,
        }
    }

    pub fn center(&self) -> Position {
        self.bounds.center()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.bounds.contains(pos)
    }
}

/// One dungeon floor: the tile grid plus everything living on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Floor {
    /// 1-based floor number
    pub number: u32,
    pub width: u32,
    pub height: u32,
    /// Tiles indexed as `tiles[y][x]`
    pub tiles: Vec<Vec<Tile>>,
    pub rooms: Vec<Room>,
    pub monsters: BTreeMap<EntityId, Monster>,
    pub items: BTreeMap<EntityId, Item>,
    pub macguffin: Option<Macguffin>,
    next_entity_id: EntityId,
}

impl Floor {
    /// Creates a floor filled with unexplored walls and no entities.
    pub fn new(number: u32, width: u32, height: u32) -> Self {
        Self {
            number,
            width,
            height,
            tiles: vec![vec![Tile::wall(); width as usize]; height as usize],
            rooms: Vec::new(),
            monsters: BTreeMap::new(),
            items: BTreeMap::new(),
            macguffin: None,
            next_entity_id: 1,
        }
    }

    /// Checks if a position lies on the grid.
    pub fn is_valid_position(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    pub fn get_tile(&self, pos: Position) -> Option<&Tile> {
        if !self.is_valid_position(pos) {
            return None;
        }
        self.tiles
            .get(pos.y as usize)
            .and_then(|row| row.get(pos.x as usize))
    }

    pub fn get_tile_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        if !self.is_valid_position(pos) {
            return None;
        }
        self.tiles
            .get_mut(pos.y as usize)
            .and_then(|row| row.get_mut(pos.x as usize))
    }

    pub fn tile_type(&self, pos: Position) -> Option<TileType> {
        self.get_tile(pos).map(|tile| tile.tile_type)
    }

    /// Changes a tile's terrain. Returns false for off-grid positions.
    pub fn set_tile_type(&mut self, pos: Position, tile_type: TileType) -> bool {
        match self.get_tile_mut(pos) {
            Some(tile) => {
                tile.tile_type = tile_type;
                true
            }
            None => false,
        }
    }

    /// Off-grid positions are never walkable.
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.tile_type(pos)
            .map(TileType::is_walkable)
            .unwrap_or(false)
    }

    /// Counts tiles of the given type.
    pub fn count_tiles(&self, tile_type: TileType) -> usize {
        self.tiles
            .iter()
            .flat_map(|row| row.iter())
            .filter(|tile| tile.tile_type == tile_type)
            .count()
    }

    /// Iterates over every grid position, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let width = self.width as i32;
        (0..self.height as i32).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }

    /// First room containing the position, if any.
    pub fn room_at(&self, pos: Position) -> Option<&Room> {
        self.rooms.iter().find(|room| room.contains(pos))
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|room| room.id == id)
    }

    /// First room of the given type, if any.
    pub fn room_of_type(&self, room_type: RoomType) -> Option<&Room> {
        self.rooms.iter().find(|room| room.room_type == room_type)
    }

    /// Position of the first stairs-down tile.
    pub fn stairs_down_position(&self) -> Option<Position> {
        self.positions()
            .find(|&pos| self.tile_type(pos) == Some(TileType::StairsDown))
    }

    /// Every walkable position reachable from `start` through cardinal steps.
    pub fn reachable_from(&self, start: Position) -> HashSet<Position> {
        if !self.is_walkable(start) {
            return HashSet::new();
        }
        ::pathfinding::prelude::bfs_reach(start, |&pos| {
            pos.cardinal_adjacent_positions()
                .into_iter()
                .filter(|&next| self.is_walkable(next))
                .collect::<Vec<_>>()
        })
        .collect()
    }

    fn allocate_entity_id(&mut self) -> EntityId {
        let id = self.next_entity_id;
        self.next_entity_id += 1;
        id
    }

    /// Instantiates a monster template at `position`.
    pub fn spawn_monster(&mut self, template: MonsterTemplate, position: Position) -> EntityId {
        let id = self.allocate_entity_id();
        self.monsters.insert(id, Monster::new(id, template, position));
        id
    }

    /// Instantiates an item template at `position`.
    pub fn spawn_item(&mut self, template: ItemTemplate, position: Position) -> EntityId {
        let id = self.allocate_entity_id();
        self.items.insert(id, Item::new(id, template, position));
        id
    }

    /// Instantiates the floor's macguffin, replacing any previous one.
    pub fn place_macguffin(&mut self, template: MacguffinTemplate, position: Position) -> EntityId {
        let id = self.allocate_entity_id();
        self.macguffin = Some(Macguffin::new(id, template, position));
        id
    }

    /// Living monster standing on `pos`.
    pub fn monster_at(&self, pos: Position) -> Option<EntityId> {
        self.living_monsters()
            .find(|monster| monster.position == pos)
            .map(|monster| monster.instance_id)
    }

    /// Monsters with positive health, in spawn order.
    pub fn living_monsters(&self) -> impl Iterator<Item = &Monster> {
        self.monsters.values().filter(|monster| monster.is_alive())
    }

    pub fn remove_monster(&mut self, id: EntityId) -> Option<Monster> {
        self.monsters.remove(&id)
    }

    /// Item lying on `pos`.
    pub fn item_at(&self, pos: Position) -> Option<EntityId> {
        self.items
            .values()
            .find(|item| item.position == pos)
            .map(|item| item.instance_id)
    }

    pub fn remove_item(&mut self, id: EntityId) -> Option<Item> {
        self.items.remove(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::ContentCatalog;

    #[test]
    fn test_new_floor_is_all_walls() {
        let floor = Floor::new(1, 20, 10);
        assert_eq!(floor.count_tiles(TileType::Wall), 200);
        assert!(floor.tiles.iter().flatten().all(|t| !t.explored && !t.visible));
        assert!(!floor.is_walkable(Position::new(3, 3)));
    }

    #[test]
    fn test_position_validity() {
        let floor = Floor::new(1, 20, 10);
        assert!(floor.is_valid_position(Position::new(0, 0)));
        assert!(floor.is_valid_position(Position::new(19, 9)));
        assert!(!floor.is_valid_position(Position::new(20, 9)));
        assert!(!floor.is_valid_position(Position::new(-1, 0)));
        assert!(floor.get_tile(Position::new(5, 10)).is_none());
    }

    #[test]
    fn test_tile_visibility_marks_explored() {
        let mut tile = Tile::floor();
        tile.set_visible(true);
        assert!(tile.visible && tile.explored);
        tile.set_visible(false);
        assert!(!tile.visible && tile.explored);
    }

    #[test]
    fn test_bounds_geometry() {
        let bounds = Bounds::new(5, 5, 10, 8);
        assert_eq!(bounds.center(), Position::new(10, 9));
        assert!(bounds.contains(Position::new(5, 5)));
        assert!(bounds.contains(Position::new(14, 12)));
        assert!(!bounds.contains(Position::new(15, 12)));
        assert_eq!(bounds.interior_x(), 6..=13);
        assert_eq!(bounds.interior_y(), 6..=11);
        assert_eq!(bounds.positions().count(), 80);
    }

    #[test]
    fn test_bounds_overlap_with_padding() {
        let a = Bounds::new(1, 1, 5, 5);
        // Gap of exactly two tiles (x = 6, 7) still counts as touching with padding 2.
        let touching = Bounds::new(8, 1, 5, 5);
        let apart = Bounds::new(9, 1, 5, 5);
        assert!(a.overlaps(&touching, 2));
        assert!(touching.overlaps(&a, 2));
        assert!(!a.overlaps(&apart, 2));
        assert!(!apart.overlaps(&a, 2));
    }

    #[test]
    fn test_room_size_limits() {
        let limits = RoomType::DeadEnd.size_limits();
        assert_eq!((limits.min_width, limits.max_width), (4, 5));
        let limits = RoomType::Chamber.size_limits();
        assert_eq!((limits.min_height, limits.max_height), (5, 9));
        assert_eq!(RoomType::DeadEnd.to_string(), "dead_end");
    }

    #[test]
    fn test_dead_monsters_are_absent() {
        let catalog = ContentCatalog::default();
        let mut floor = Floor::new(1, 10, 10);
        let pos = Position::new(3, 3);
        let id = floor.spawn_monster(catalog.monsters[0].clone(), pos);
        assert_eq!(floor.monster_at(pos), Some(id));

        if let Some(monster) = floor.monsters.get_mut(&id) {
            monster.current_hp = 0;
        }
        assert_eq!(floor.monster_at(pos), None);
        assert_eq!(floor.living_monsters().count(), 0);
    }

    #[test]
    fn test_entity_ids_are_unique_and_ordered() {
        let catalog = ContentCatalog::default();
        let mut floor = Floor::new(1, 10, 10);
        let a = floor.spawn_monster(catalog.monsters[0].clone(), Position::new(1, 1));
        let b = floor.spawn_item(catalog.items[0].clone(), Position::new(2, 2));
        let c = floor.spawn_monster(catalog.monsters[1].clone(), Position::new(3, 3));
        assert!(a < b && b < c);
        let order: Vec<_> = floor.monsters.keys().copied().collect();
        assert_eq!(order, vec![a, c]);
        assert_eq!(floor.item_at(Position::new(2, 2)), Some(b));
        assert!(floor.remove_item(b).is_some());
        assert_eq!(floor.item_at(Position::new(2, 2)), None);
    }

    #[test]
    fn test_reachability_stops_at_walls() {
        let mut floor = Floor::new(1, 10, 3);
        for x in 1..4 {
            floor.set_tile_type(Position::new(x, 1), TileType::Floor);
        }
        for x in 5..9 {
            floor.set_tile_type(Position::new(x, 1), TileType::Floor);
        }
        let reached = floor.reachable_from(Position::new(1, 1));
        assert_eq!(reached.len(), 3);
        assert!(!reached.contains(&Position::new(5, 1)));
        assert!(floor.reachable_from(Position::new(0, 0)).is_empty());
    }
}
