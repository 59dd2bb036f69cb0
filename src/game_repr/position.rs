use std::fmt;

use smallvec::SmallVec;

use super::zobrist::ZOBRIST;
use super::*;

/*
 * MODULE IS RESPONSIBLE FOR
 * GAME REPRESENTATION AND LOGIC
 */

/// Move buffer used by generation and search; spills to the heap on crowded boards.
pub type MoveList = SmallVec<[Move; 64]>;

/// Queen squares of one side, in placement order.
pub type QueenList = SmallVec<[Square; 4]>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    width: u8,
    height: u8,
    /// Row-major cell grid: index = (y - 1) * width + (x - 1)
    cells: Vec<Cell>,
    /// [side] - queen squares, order fixed for the whole match
    queens: [QueenList; 2],
    /// Number of burned cells, kept in step with `cells`
    burned: usize,
    /// Zobrist hash, updated incrementally by apply/retract
    hash: u64,
}

impl Position {
    /// Build the starting position of a match.
    ///
    /// The hash is computed from scratch here, every later change is incremental.
    pub fn new(
        width: u8,
        height: u8,
        white: &[Square],
        black: &[Square],
    ) -> Result<Position, PositionError> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(PositionError::InvalidDimensions { width, height });
        }

        let mut pos = Self {
            width,
            height,
            cells: vec![Cell::Empty; width as usize * height as usize],
            queens: Default::default(),
            burned: 0,
            hash: 0,
        };

        for (side, squares) in [(Side::White, white), (Side::Black, black)] {
            for &square in squares {
                if !pos.contains(square) {
                    return Err(PositionError::OutOfBounds { square, width, height });
                }
                let idx = pos.index(square);
                if !pos.cells[idx].is_empty() {
                    return Err(PositionError::DuplicateSquare(square));
                }
                pos.cells[idx] = Cell::Occupied(side);
                pos.queens[side.index()].push(square);
            }
        }

        pos.hash = pos.compute_hash();
        Ok(pos)
    }

    #[inline]
    fn index(&self, square: Square) -> usize {
        (square.y as usize - 1) * self.width as usize + (square.x as usize - 1)
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn contains(&self, square: Square) -> bool {
        (1..=self.width).contains(&square.x) && (1..=self.height).contains(&square.y)
    }

    /// State of an on-board cell. Panics if `square` is off the board.
    #[inline]
    pub fn cell_at(&self, square: Square) -> Cell {
        self.cells[self.index(square)]
    }

    pub fn get(&self, square: Square) -> Option<Cell> {
        self.contains(square).then(|| self.cell_at(square))
    }

    pub fn queens_of(&self, side: Side) -> &[Square] {
        &self.queens[side.index()]
    }

    pub fn count_burned(&self) -> usize {
        self.burned
    }

    pub fn count_empty(&self) -> usize {
        self.cells.len() - self.burned - self.queens[0].len() - self.queens[1].len()
    }

    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Side whose turn it is, derived from the board itself:
    /// every move burns exactly one cell and White moves first.
    pub fn side_to_move(&self) -> Side {
        if self.burned % 2 == 0 {
            Side::White
        } else {
            Side::Black
        }
    }

    /// Recompute the Zobrist hash from the cell grid.
    pub fn compute_hash(&self) -> u64 {
        let mut hash = 0u64;
        for y in 1..=self.height {
            for x in 1..=self.width {
                let square = Square::new(x, y);
                hash ^= ZOBRIST.cell(square, self.cell_at(square));
            }
        }
        hash
    }

    /// Generate every legal move of `side` into `moves`.
    /// The buffer is NOT cleared before adding moves.
    pub fn legal_moves_into(&self, side: Side, moves: &mut MoveList) {
        for &queen in self.queens_of(side) {
            self.queen_moves_into(queen, moves);
        }
    }

    pub fn legal_moves(&self, side: Side) -> MoveList {
        let mut moves = MoveList::new();
        self.legal_moves_into(side, &mut moves);
        moves
    }

    /// Number of legal moves of `side`, without building the list.
    pub fn count_moves(&self, side: Side) -> usize {
        self.queens_of(side)
            .iter()
            .map(|&queen| self.queen_move_count(queen))
            .sum()
    }

    pub fn has_legal_moves(&self, side: Side) -> bool {
        self.queens_of(side)
            .iter()
            .any(|&queen| DIRECTIONS.iter().any(|&dir| self.ray(queen, dir).next().is_some()))
    }

    /// Full legality check for a move coming from outside the engine.
    pub fn is_legal(&self, mv: Move, side: Side) -> bool {
        let (from, to) = (mv.from(), mv.to());
        if !self.contains(from) || !self.contains(to) || !self.cell_at(from).is(side) {
            return false;
        }

        let dx = to.x as i16 - from.x as i16;
        let dy = to.y as i16 - from.y as i16;
        if (dx == 0 && dy == 0) || (dx != 0 && dy != 0 && dx.abs() != dy.abs()) {
            return false;
        }

        let dir = (dx.signum() as i8, dy.signum() as i8);
        self.ray(from, dir).any(|square| square == to)
    }

    /// Move a queen, burning its departure cell.
    ///
    /// `mv` must come from `legal_moves(side)` on this exact position; nothing
    /// is re-validated.
    pub fn apply_move(&mut self, mv: Move, side: Side) {
        let (from, to) = (mv.from(), mv.to());
        let (from_idx, to_idx) = (self.index(from), self.index(to));

        self.cells[from_idx] = Cell::Burned;
        self.cells[to_idx] = Cell::Occupied(side);
        self.burned += 1;

        let queen = self.queens[side.index()].iter_mut().find(|q| **q == from);
        debug_assert!(queen.is_some(), "no {} queen on {}", side, from);
        if let Some(queen) = queen {
            *queen = to;
        }

        self.hash ^= ZOBRIST.occupied(from, side);
        self.hash ^= ZOBRIST.burned(from);
        self.hash ^= ZOBRIST.occupied(to, side);
    }

    /// Exact inverse of `apply_move`. Calls must mirror the apply order.
    pub fn retract_move(&mut self, mv: Move, side: Side) {
        let (from, to) = (mv.from(), mv.to());
        let (from_idx, to_idx) = (self.index(from), self.index(to));

        self.cells[from_idx] = Cell::Occupied(side);
        self.cells[to_idx] = Cell::Empty;
        self.burned -= 1;

        if let Some(queen) = self.queens[side.index()].iter_mut().find(|q| **q == to) {
            *queen = from;
        }

        self.hash ^= ZOBRIST.occupied(to, side);
        self.hash ^= ZOBRIST.burned(from);
        self.hash ^= ZOBRIST.occupied(from, side);
    }

    /// Burn an empty cell without moving a queen. Used to set up positions;
    /// returns `false` and leaves the board untouched if the cell is not empty.
    pub fn burn(&mut self, square: Square) -> bool {
        if self.get(square) != Some(Cell::Empty) {
            return false;
        }
        let idx = self.index(square);
        self.cells[idx] = Cell::Burned;
        self.burned += 1;
        self.hash ^= ZOBRIST.burned(square);
        true
    }

    /// Count move paths of length `depth`, sides alternating from `side`.
    pub fn perft(&self, depth: u32, side: Side) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = self.legal_moves(side);

        // Bulk counting optimization for depth 1
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0;
        let mut pos = self.clone(); // Clone once at this level

        for mv in moves {
            pos.apply_move(mv, side);
            nodes += pos.perft(depth - 1, side.opposite());
            pos.retract_move(mv, side);
        }

        nodes
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (1..=self.height).rev() {
            for x in 1..=self.width {
                write!(f, "{}", self.cell_at(Square::new(x, y)).to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
