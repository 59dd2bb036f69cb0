use crate::game_repr::{Move, Square};

use super::super::position::{MoveList, Position};

/// The eight queen directions as `(dx, dy)`.
///
/// Generation order follows this table, so it fixes the order of every
/// move list the engine produces.
pub const DIRECTIONS: [(i8, i8); 8] = [
    (0, 1),   // north
    (0, -1),  // south
    (1, 0),   // east
    (-1, 0),  // west
    (1, 1),   // north-east
    (1, -1),  // south-east
    (-1, 1),  // north-west
    (-1, -1), // south-west
];

/// Empty squares reachable from `origin` in one direction, nearest first.
/// Stops at the board edge or the first non-empty cell.
pub struct Ray<'a> {
    pos: &'a Position,
    current: Square,
    dx: i8,
    dy: i8,
}

impl Iterator for Ray<'_> {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        let next = self
            .current
            .offset(self.dx, self.dy, self.pos.width(), self.pos.height())?;
        if !self.pos.cell_at(next).is_empty() {
            return None;
        }
        self.current = next;
        Some(next)
    }
}

impl Position {
    #[inline]
    pub fn ray(&self, origin: Square, (dx, dy): (i8, i8)) -> Ray<'_> {
        Ray { pos: self, current: origin, dx, dy }
    }

    /// Generate queen moves into a provided buffer
    pub fn queen_moves_into(&self, from: Square, moves: &mut MoveList) {
        for &dir in &DIRECTIONS {
            moves.extend(self.ray(from, dir).map(|to| Move::new(from, to)));
        }
    }

    pub(crate) fn queen_move_count(&self, from: Square) -> usize {
        DIRECTIONS.iter().map(|&dir| self.ray(from, dir).count()).sum()
    }
}
