// Move ordering for alpha-beta search
//
// Good moves first means earlier cutoffs. The score is a cheap positional
// guess about the destination only; it never feeds into a position value.

use crate::game_repr::{Move, MoveList, Position, Side, DIRECTIONS};
use smallvec::SmallVec;

/// Score for move ordering (higher = better)
#[derive(Debug, Clone, Copy)]
struct MoveScore {
    mov: Move,
    score: i32,
}

/// Chebyshev distance from a square to the board centre, in half-cells.
///
/// Coordinates are doubled so even-sized boards keep an integer centre.
#[inline]
fn doubled_center_distance(x: u8, y: u8, width: u8, height: u8) -> i32 {
    let dx = (2 * x as i32 - (width as i32 + 1)).abs();
    let dy = (2 * y as i32 - (height as i32 + 1)).abs();
    dx.max(dy)
}

/// Score a single move for ordering purposes.
///
/// Destinations near the centre come first; among equally central ones,
/// the destination with more empty neighbours wins. Constant time.
pub fn quick_move_score(pos: &Position, mov: Move) -> i32 {
    let to = mov.to();
    let distance = doubled_center_distance(to.x, to.y, pos.width(), pos.height());

    let mut open = 0;
    for (dx, dy) in DIRECTIONS {
        if let Some(n) = to.offset(dx, dy, pos.width(), pos.height()) {
            if pos.cell_at(n).is_empty() {
                open += 1;
            }
        }
    }

    // Neighbour count is at most 8, so one step of distance always dominates
    -distance * 16 + open
}

/// Sort moves by descending ordering score.
///
/// The sort is stable: equal scores keep generation order, which keeps the
/// search deterministic.
pub fn order_moves(pos: &Position, moves: &mut MoveList) {
    if moves.len() < 2 {
        return;
    }

    let mut scored: SmallVec<[MoveScore; 64]> = moves
        .iter()
        .map(|&mov| MoveScore {
            mov,
            score: quick_move_score(pos, mov),
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));

    for (slot, entry) in moves.iter_mut().zip(&scored) {
        *slot = entry.mov;
    }
}

/// Generate the legal moves of the side and return them ordered.
pub fn generate_ordered_moves(pos: &Position, side: Side) -> MoveList {
    let mut moves = MoveList::new();
    pos.legal_moves_into(side, &mut moves);
    order_moves(pos, &mut moves);
    moves
}
