use crate::game_repr::{Position, Square};

mod move_ordering_tests;

pub fn sq(x: u8, y: u8) -> Square {
    Square::new(x, y)
}

/// Burn each listed cell of `pos`
pub fn burn_all(pos: &mut Position, squares: &[(u8, u8)]) {
    for &(x, y) in squares {
        assert!(pos.burn(sq(x, y)), "({}, {}) is not empty", x, y);
    }
}
