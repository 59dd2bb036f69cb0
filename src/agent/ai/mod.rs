// AI Agent - Negamax with Alpha-Beta Pruning
//
// This module implements the Queen Battle search agent using the Negamax
// algorithm with alpha-beta pruning, iterative deepening, and a
// transposition table.
//
// Key features:
// - Deterministic (same position and budget always give the same move)
// - Fail-soft alpha-beta with bound-aware caching
// - Hard wall-clock budget, polled every few nodes
// - Mobility and territory evaluation with decided-game detection
// - Cheap centre-first move ordering for earlier cutoffs

mod evaluation;
mod move_ordering;
mod negamax;
mod negamax_player;
mod search;
mod transposition_table;

#[cfg(test)]
mod tests;

pub use negamax_player::{NegamaxPlayer, TurnState};

// Re-export the search building blocks
pub use evaluation::{
    assess, evaluate, is_move_limit_draw, is_win_score, mobility, territory, EvalWeights,
    Evaluation, DRAW_SCORE, MOBILITY_WEIGHT, TERRITORY_WEIGHT, WIN_SCORE,
};
pub use move_ordering::{generate_ordered_moves, order_moves, quick_move_score};
pub use negamax::{negamax, NodeValue, SearchAborted, SearchContext, INFINITY};
pub use search::{
    iterative_deepening_search, SearchLimits, SearchResult, DEFAULT_MAX_DEPTH,
    DEFAULT_NODE_CHECK_INTERVAL,
};
pub use transposition_table::{
    NodeType, TranspositionTable, TranspositionTableEntry, DEFAULT_CAPACITY, RESOLVED_DEPTH,
};
