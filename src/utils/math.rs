//! # Game Mathematics
//!
//! Integer line tracing used by the visibility engine.

use crate::game::Position;

/// Iterator over the grid cells of a Bresenham line, both endpoints included.
///
/// # Examples
///
/// ```
/// use rogulator::{BresenhamLine, Position};
///
/// let cells: Vec<Position> = BresenhamLine::new(Position::new(0, 0), Position::new(3, 1)).collect();
/// assert_eq!(cells.first(), Some(&Position::new(0, 0)));
/// assert_eq!(cells.last(), Some(&Position::new(3, 1)));
/// assert_eq!(cells.len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct BresenhamLine {
    current: Position,
    end: Position,
    dx: i32,
    dy: i32,
    step_x: i32,
    step_y: i32,
    error: i32,
    finished: bool,
}

impl BresenhamLine {
    pub fn new(start: Position, end: Position) -> Self {
        let dx = (end.x - start.x).abs();
        let dy = (end.y - start.y).abs();
        Self {
            current: start,
            end,
            dx,
            dy,
            step_x: if start.x < end.x { 1 } else { -1 },
            step_y: if start.y < end.y { 1 } else { -1 },
            error: dx - dy,
            finished: false,
        }
    }
}

impl Iterator for BresenhamLine {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.finished {
            return None;
        }

        let point = self.current;
        if point == self.end {
            self.finished = true;
            return Some(point);
        }

        let doubled = 2 * self.error;
        if doubled > -self.dy {
            self.error -= self.dy;
            self.current.x += self.step_x;
        }
        if doubled < self.dx {
            self.error += self.dx;
            self.current.y += self.step_y;
        }

        Some(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_point_line() {
        let p = Position::new(4, 4);
        let cells: Vec<_> = BresenhamLine::new(p, p).collect();
        assert_eq!(cells, vec![p]);
    }

    #[test]
    fn test_straight_lines() {
        let cells: Vec<_> = BresenhamLine::new(Position::new(2, 5), Position::new(2, 1)).collect();
        assert_eq!(cells.len(), 5);
        assert!(cells.iter().all(|p| p.x == 2));
        assert_eq!(cells[1], Position::new(2, 4));

        let cells: Vec<_> = BresenhamLine::new(Position::new(0, 0), Position::new(-3, 0)).collect();
        assert_eq!(
            cells,
            vec![
                Position::new(0, 0),
                Position::new(-1, 0),
                Position::new(-2, 0),
                Position::new(-3, 0)
            ]
        );
    }

    #[test]
    fn test_diagonal_line_steps_both_axes() {
        let cells: Vec<_> = BresenhamLine::new(Position::new(0, 0), Position::new(3, 3)).collect();
        assert_eq!(
            cells,
            vec![
                Position::new(0, 0),
                Position::new(1, 1),
                Position::new(2, 2),
                Position::new(3, 3)
            ]
        );
    }

    #[test]
    fn test_consecutive_cells_touch() {
        let cells: Vec<_> = BresenhamLine::new(Position::new(1, 7), Position::new(9, 2)).collect();
        for pair in cells.windows(2) {
            assert_eq!(pair[0].chebyshev_distance(pair[1]), 1);
        }
    }
}
