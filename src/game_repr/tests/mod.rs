use super::*;

// ==================== HELPER FUNCTIONS ====================

pub fn sq(x: u8, y: u8) -> Square {
    Square::new(x, y)
}

pub fn mv(x1: u8, y1: u8, x2: u8, y2: u8) -> Move {
    Move::new(sq(x1, y1), sq(x2, y2))
}

/// 4x4 board with one queen each in opposite corners
pub fn corners_4x4() -> Position {
    Position::new(4, 4, &[sq(1, 1)], &[sq(4, 4)]).unwrap()
}

/// Helper function to check if a move exists in the move list
pub fn has_move(moves: &[Move], from: Square, to: Square) -> bool {
    moves.iter().any(|m| m.from() == from && m.to() == to)
}

/// Ray-walk check used by the legality tests: every cell strictly after
/// `from` up to and including `to` must be empty on `pos`.
pub fn path_is_clear(pos: &Position, m: Move) -> bool {
    let (from, to) = (m.from(), m.to());
    let dx = (to.x as i16 - from.x as i16).signum() as i8;
    let dy = (to.y as i16 - from.y as i16).signum() as i8;
    let mut cur = from;
    loop {
        cur = match cur.offset(dx, dy, pos.width(), pos.height()) {
            Some(next) => next,
            None => return false,
        };
        if !pos.cell_at(cur).is_empty() {
            return false;
        }
        if cur == to {
            return true;
        }
    }
}

// ==================== TEST MODULES ====================

mod perft;
