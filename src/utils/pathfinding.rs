//! # Pathfinding Algorithms
//!
//! Bounded A* over the 4-connected floor grid.
//!
//! The search uses unit step costs and the Manhattan heuristic. Ties between
//! equally promising nodes are broken by the lower heuristic and then by
//! position, so the same floor always yields the same path.

use crate::balance;
use crate::game::{Floor, Position};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

/// Node for the A* open set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AStarNode {
    position: Position,
    g_score: u32,
    f_score: u32,
}

impl AStarNode {
    fn h_score(&self) -> u32 {
        self.f_score - self.g_score
    }
}

impl PartialOrd for AStarNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AStarNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed on every key for min-heap behavior in BinaryHeap
        other
            .f_score
            .cmp(&self.f_score)
            .then_with(|| other.h_score().cmp(&self.h_score()))
            .then_with(|| other.position.cmp(&self.position))
    }
}

/// Finds a shortest cardinal path from `start` to `goal`, both included.
///
/// Cells in `blocked` are treated as impassable for this search only. Nodes
/// whose cost has reached `max_depth` are not expanded, so the returned path
/// never has more than `max_depth` steps.
///
/// Returns `None` when the goal is not walkable or cannot be reached within
/// the depth bound.
///
/// # Examples
///
/// ```
/// use rogulator::{find_path, Floor, Position, TileType};
/// use std::collections::HashSet;
///
/// let mut floor = Floor::new(1, 5, 5);
/// for pos in floor.positions().collect::<Vec<_>>() {
///     floor.set_tile_type(pos, TileType::Floor);
/// }
///
/// let path = find_path(&floor, Position::new(0, 0), Position::new(4, 4), 20, &HashSet::new());
/// assert_eq!(path.map(|p| p.len()), Some(9));
/// ```
pub fn find_path(
    floor: &Floor,
    start: Position,
    goal: Position,
    max_depth: u32,
    blocked: &HashSet<Position>,
) -> Option<Vec<Position>> {
    if !floor.is_walkable(goal) {
        return None;
    }
    if start == goal {
        return Some(vec![start]);
    }

    let mut open_set = BinaryHeap::new();
    let mut came_from: HashMap<Position, Position> = HashMap::new();
    let mut g_scores: HashMap<Position, u32> = HashMap::new();
    let mut closed: HashSet<Position> = HashSet::new();

    g_scores.insert(start, 0);
    open_set.push(AStarNode {
        position: start,
        g_score: 0,
        f_score: start.manhattan_distance(goal),
    });

    while let Some(current) = open_set.pop() {
        if current.position == goal {
            let path = reconstruct_path(&came_from, goal);
            log::trace!(
                "Path {} -> {} found with {} steps",
                start,
                goal,
                path.len() - 1
            );
            return Some(path);
        }

        if !closed.insert(current.position) {
            continue;
        }

        if current.g_score >= max_depth {
            continue;
        }

        for neighbor in current.position.cardinal_adjacent_positions() {
            if closed.contains(&neighbor)
                || blocked.contains(&neighbor)
                || !floor.is_walkable(neighbor)
            {
                continue;
            }

            let tentative_g = current.g_score + 1;
            let known_g = g_scores.get(&neighbor).copied().unwrap_or(u32::MAX);
            if tentative_g < known_g {
                came_from.insert(neighbor, current.position);
                g_scores.insert(neighbor, tentative_g);
                open_set.push(AStarNode {
                    position: neighbor,
                    g_score: tentative_g,
                    f_score: tentative_g + neighbor.manhattan_distance(goal),
                });
            }
        }
    }

    log::trace!("No path {} -> {} within depth {}", start, goal, max_depth);
    None
}

fn reconstruct_path(came_from: &HashMap<Position, Position>, goal: Position) -> Vec<Position> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&previous) = came_from.get(&current) {
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}

/// First step from `from` toward `to`, searched with the default depth.
pub fn next_step(
    floor: &Floor,
    from: Position,
    to: Position,
    blocked: &HashSet<Position>,
) -> Option<Position> {
    find_path(floor, from, to, balance::PATHFINDING_MAX_DEPTH, blocked)
        .and_then(|path| path.get(1).copied())
}
