// Position evaluation function
// Returns a score from the point of view of `perspective` (positive = good)

use std::collections::VecDeque;

use crate::game_repr::{Position, Side, Square, DIRECTIONS};

/// Score of a decided game. Larger than any heuristic score reachable on a
/// MAX_DIMENSION board with the default weights.
pub const WIN_SCORE: i32 = 1_000_000;

/// Score of a drawn game
pub const DRAW_SCORE: i32 = 0;

/// Default weight of one move of mobility difference
pub const MOBILITY_WEIGHT: i32 = 5;

/// Default weight of one cell of territory difference
pub const TERRITORY_WEIGHT: i32 = 20;

/// Tunable heuristic weights
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalWeights {
    pub mobility: i32,
    pub territory: i32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            mobility: MOBILITY_WEIGHT,
            territory: TERRITORY_WEIGHT,
        }
    }
}

/// Result of assessing a position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    /// Score from the requested perspective
    pub score: i32,
    /// True when the game is over (win, loss or draw); the score is then exact
    pub terminal: bool,
}

impl Evaluation {
    fn decided(score: i32) -> Self {
        Self { score, terminal: true }
    }

    fn heuristic(score: i32) -> Self {
        Self { score, terminal: false }
    }
}

/// Number of legal moves of `side`.
///
/// This is the move count, not the number of queens that can move.
pub fn mobility(pos: &Position, side: Side) -> i32 {
    pos.count_moves(side) as i32
}

/// Sliding distance from the nearest queen of `side` to every cell.
///
/// Multi-source BFS: all queens start at distance 0, and expanding a cell
/// labels every empty cell on its eight rays with distance + 1. The queue
/// hands out cells in non-decreasing distance, so the first label is final.
fn queen_distances(pos: &Position, side: Side) -> Vec<Option<u16>> {
    let width = pos.width() as usize;
    let slot = |sq: Square| (sq.y as usize - 1) * width + (sq.x as usize - 1);

    let mut dist = vec![None; pos.total_cells()];
    let mut queue = VecDeque::with_capacity(pos.total_cells());

    for &queen in pos.queens_of(side) {
        dist[slot(queen)] = Some(0);
        queue.push_back(queen);
    }

    while let Some(cell) = queue.pop_front() {
        let next = dist[slot(cell)].unwrap_or(0) + 1;
        for &dir in &DIRECTIONS {
            for target in pos.ray(cell, dir) {
                let label = &mut dist[slot(target)];
                if label.is_none() {
                    *label = Some(next);
                    queue.push_back(target);
                }
            }
        }
    }

    dist
}

/// Territory balance, positive when White reaches more empty cells first.
///
/// Ties and cells neither side can reach count for nobody.
pub fn territory(pos: &Position) -> i32 {
    let white = queen_distances(pos, Side::White);
    let black = queen_distances(pos, Side::Black);

    let mut balance = 0;
    for y in 1..=pos.height() {
        for x in 1..=pos.width() {
            let square = Square::new(x, y);
            if !pos.cell_at(square).is_empty() {
                continue;
            }
            let idx = (y as usize - 1) * pos.width() as usize + (x as usize - 1);
            balance += match (white[idx], black[idx]) {
                (Some(w), Some(b)) if w < b => 1,
                (Some(w), Some(b)) if b < w => -1,
                (Some(_), None) => 1,
                (None, Some(_)) => -1,
                _ => 0,
            };
        }
    }
    balance
}

/// True once no more than `width` empty cells remain: the game is drawn
/// whatever the mobility.
pub fn is_move_limit_draw(pos: &Position) -> bool {
    pos.count_empty() <= pos.width() as usize
}

#[inline]
fn orient(white_score: i32, perspective: Side) -> i32 {
    match perspective {
        Side::White => white_score,
        Side::Black => -white_score,
    }
}

/// Assess a position for `perspective`, flagging decided games.
pub fn assess(pos: &Position, perspective: Side, weights: &EvalWeights) -> Evaluation {
    // The move-limit draw takes precedence over mobility
    if is_move_limit_draw(pos) {
        return Evaluation::decided(DRAW_SCORE);
    }

    let white_mobility = mobility(pos, Side::White);
    let black_mobility = mobility(pos, Side::Black);

    match (white_mobility, black_mobility) {
        (0, 0) => Evaluation::decided(DRAW_SCORE),
        (0, _) => Evaluation::decided(orient(-WIN_SCORE, perspective)),
        (_, 0) => Evaluation::decided(orient(WIN_SCORE, perspective)),
        _ => {
            let raw = (white_mobility - black_mobility) * weights.mobility
                + territory(pos) * weights.territory;
            Evaluation::heuristic(orient(raw, perspective))
        }
    }
}

/// Evaluate a position with the default weights.
pub fn evaluate(pos: &Position, perspective: Side) -> i32 {
    assess(pos, perspective, &EvalWeights::default()).score
}

/// Check whether a score is a decided win or loss
pub fn is_win_score(score: i32) -> bool {
    score.abs() >= WIN_SCORE
}
