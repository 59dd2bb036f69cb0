use std::sync::LazyLock;

use super::{Cell, Side, Square};

/// Largest supported board side length.
pub const MAX_DIMENSION: u8 = 16;

const MAX_CELLS: usize = MAX_DIMENSION as usize * MAX_DIMENSION as usize;

/// Tag index for a burned cell; occupied cells use `Side::index()`.
const BURNED_TAG: usize = 2;

/// Zobrist hashing constants for Queen Battle positions
///
/// One random 64-bit key per (cell, state) pair, where the state is
/// "white queen", "black queen" or "burned". Empty cells contribute nothing,
/// so a position hash is the XOR of the keys of every non-empty cell.
pub struct ZobristKeys {
    /// [cell][tag] - cells laid out on a MAX_DIMENSION x MAX_DIMENSION grid
    cells: [[u64; 3]; MAX_CELLS],
}

impl ZobristKeys {
    /// Keys come from a fixed seed, so hashes are stable across runs.
    fn generate() -> Self {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(0x51ee_2b47_7a11_c0de);

        let mut cells = [[0u64; 3]; MAX_CELLS];
        for cell in &mut cells {
            for tag in cell {
                *tag = rng.gen();
            }
        }

        Self { cells }
    }

    #[inline]
    fn slot(square: Square) -> usize {
        (square.x as usize - 1) * MAX_DIMENSION as usize + (square.y as usize - 1)
    }

    #[inline]
    pub fn occupied(&self, square: Square, side: Side) -> u64 {
        self.cells[Self::slot(square)][side.index()]
    }

    #[inline]
    pub fn burned(&self, square: Square) -> u64 {
        self.cells[Self::slot(square)][BURNED_TAG]
    }

    /// Key contributed by `cell` standing on `square` (zero for empty cells).
    #[inline]
    pub fn cell(&self, square: Square, cell: Cell) -> u64 {
        match cell {
            Cell::Empty => 0,
            Cell::Occupied(side) => self.occupied(square, side),
            Cell::Burned => self.burned(square),
        }
    }
}

/// Shared key table, built on first use
pub static ZOBRIST: LazyLock<ZobristKeys> = LazyLock::new(ZobristKeys::generate);
