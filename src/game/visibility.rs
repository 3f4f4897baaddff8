//! # Visibility Module
//!
//! Raycast field of view with persistent exploration memory.
//!
//! Every turn the visible set is recomputed from scratch while `explored`
//! only ever grows.

use super::{Floor, Position};
use crate::utils::BresenhamLine;

/// Recomputes which tiles the viewer can see.
///
/// Every tile within Euclidean `radius` that has an unobstructed line to the
/// viewer becomes visible and explored. The viewer's own tile is always
/// visible.
pub fn update_visibility(floor: &mut Floor, viewer: Position, radius: u32) {
    for tile in floor.tiles.iter_mut().flatten() {
        tile.visible = false;
    }

    let reach = radius as i32;
    let max_distance = f64::from(radius);
    let mut seen = Vec::new();
    for y in (viewer.y - reach)..=(viewer.y + reach) {
        for x in (viewer.x - reach)..=(viewer.x + reach) {
            let target = Position::new(x, y);
            if !floor.is_valid_position(target) {
                continue;
            }
            if viewer.euclidean_distance(target) <= max_distance
                && has_line_of_sight(floor, viewer, target)
            {
                seen.push(target);
            }
        }
    }
    seen.push(viewer);

    for pos in seen {
        if let Some(tile) = floor.get_tile_mut(pos) {
            tile.set_visible(true);
        }
    }
}

/// Whether nothing opaque lies strictly between `from` and `to`.
///
/// Walls and off-grid cells block sight; the endpoints themselves never do,
/// so the face of a wall is visible.
pub fn has_line_of_sight(floor: &Floor, from: Position, to: Position) -> bool {
    BresenhamLine::new(from, to)
        .filter(|&pos| pos != from && pos != to)
        .all(|pos| {
            floor
                .tile_type(pos)
                .map_or(false, |tile_type| !tile_type.blocks_sight())
        })
}

pub fn is_position_visible(floor: &Floor, pos: Position) -> bool {
    floor.get_tile(pos).map_or(false, |tile| tile.visible)
}

pub fn is_position_explored(floor: &Floor, pos: Position) -> bool {
    floor.get_tile(pos).map_or(false, |tile| tile.explored)
}
