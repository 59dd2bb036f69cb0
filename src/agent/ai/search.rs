// Iterative Deepening Search
//
// Searches depth 1, 2, 3, ... until the deadline, the depth cap, or a pass
// whose value can no longer change. Only completed passes count: a pass cut
// short by the deadline is thrown away and the previous answer stands.

use std::time::{Duration, Instant};

use log::{debug, info};

use crate::game_repr::{Move, Position, Side};
use super::evaluation::{EvalWeights, WIN_SCORE};
use super::move_ordering::generate_ordered_moves;
use super::negamax::{negamax, SearchAborted, SearchContext, INFINITY};
use super::transposition_table::TranspositionTable;

/// Default depth cap
pub const DEFAULT_MAX_DEPTH: u8 = 50;

/// Default number of nodes between two clock checks
pub const DEFAULT_NODE_CHECK_INTERVAL: u64 = 1000;

/// Bounds on one search episode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_depth: u8,
    /// Wall-clock budget measured from the start of the search; None = unlimited
    pub time_limit: Option<Duration>,
    pub node_check_interval: u64,
}

impl SearchLimits {
    /// Fixed-depth search without a clock
    pub fn depth(max_depth: u8) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    /// Clocked search with the default depth cap
    pub fn timed(time_limit: Duration) -> Self {
        Self {
            time_limit: Some(time_limit),
            ..Self::default()
        }
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            time_limit: None,
            node_check_interval: DEFAULT_NODE_CHECK_INTERVAL,
        }
    }
}

/// Result of a search operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move of the deepest completed pass; None when no pass completed
    /// or the side has no legal move
    pub best_move: Option<Move>,
    pub score: i32,
    /// Depth of the deepest completed pass
    pub depth: u8,
    pub nodes_searched: u64,
    pub nodes_expanded: u64,
    pub time_ms: u64,
    /// The last pass reached only decided games: deeper search changes nothing
    pub resolved: bool,
}

/// Outcome of one completed root pass
struct RootPass {
    best_move: Option<Move>,
    score: i32,
    resolved: bool,
}

/// Search every root move to `depth`.
///
/// The first move searched gets the full window; each later one is searched
/// against the best score so far and only replaces it when strictly better.
fn search_root(
    pos: &mut Position,
    depth: u8,
    side: Side,
    ctx: &mut SearchContext<'_>,
) -> Result<RootPass, SearchAborted> {
    ctx.nodes += 1;
    ctx.expanded += 1;

    let mut alpha = -INFINITY;
    let beta = INFINITY;
    let mut pass = RootPass {
        best_move: None,
        score: -INFINITY,
        resolved: true,
    };

    for &mov in &generate_ordered_moves(pos, side) {
        if ctx.time_up() {
            return Err(SearchAborted);
        }

        pos.apply_move(mov, side);
        let child = negamax(pos, depth - 1, -beta, -alpha, side.opposite(), ctx)?;
        pos.retract_move(mov, side);

        let score = -child.score;
        pass.resolved &= child.resolved;

        if score > pass.score {
            pass.score = score;
            pass.best_move = Some(mov);
        }
        alpha = alpha.max(score);
    }

    Ok(pass)
}

/// Perform iterative deepening search to find the best move
///
/// # Arguments
/// * `pos` - Position to search; searched on a private copy, never modified
/// * `side` - Side to move
/// * `limits` - Depth cap, time budget and clock polling interval
/// * `tt` - Position cache; the caller decides when to clear it
/// * `weights` - Heuristic weights for non-terminal leaves
///
/// # Returns
/// SearchResult of the deepest completed pass
pub fn iterative_deepening_search(
    pos: &Position,
    side: Side,
    limits: &SearchLimits,
    tt: &mut TranspositionTable,
    weights: &EvalWeights,
) -> SearchResult {
    let start_time = Instant::now();
    let deadline = limits.time_limit.map(|limit| start_time + limit);
    let mut best_result = SearchResult::default();

    if !pos.has_legal_moves(side) {
        debug!("{} has no legal move, nothing to search", side);
        return best_result;
    }

    let mut search_pos = pos.clone();
    let mut ctx = SearchContext::new(tt, *weights, deadline, limits.node_check_interval);

    for depth in 1..=limits.max_depth {
        // Check time limit before starting new depth
        if ctx.time_up() {
            break;
        }

        match search_root(&mut search_pos, depth, side, &mut ctx) {
            Ok(pass) => {
                best_result.best_move = pass.best_move;
                best_result.score = pass.score;
                best_result.depth = depth;
                best_result.resolved = pass.resolved;
                best_result.nodes_searched = ctx.nodes;
                best_result.nodes_expanded = ctx.expanded;
                best_result.time_ms = start_time.elapsed().as_millis() as u64;

                log_search_info(&best_result);

                if pass.resolved {
                    debug!("Search tree resolved at depth {}", depth);
                    break;
                }
                if pass.score >= WIN_SCORE {
                    // Forced win found, more depth cannot improve on it
                    break;
                }
            }
            Err(SearchAborted) => {
                debug!("Depth {} interrupted after {} nodes", depth, ctx.nodes);
                break;
            }
        }
    }

    best_result.nodes_searched = ctx.nodes;
    best_result.nodes_expanded = ctx.expanded;
    best_result.time_ms = start_time.elapsed().as_millis() as u64;

    debug!(
        "Cache: {} / {} slots used, hit rate {:.1}%",
        ctx.tt.len(),
        ctx.tt.capacity(),
        ctx.tt.hit_rate() * 100.0
    );

    best_result
}

/// Log search information for a completed depth
fn log_search_info(result: &SearchResult) {
    let nps = if result.time_ms > 0 {
        result.nodes_searched * 1000 / result.time_ms
    } else {
        result.nodes_searched
    };

    info!(
        "depth {} score {} nodes {} expanded {} time {}ms nps {} move {}",
        result.depth,
        result.score,
        result.nodes_searched,
        result.nodes_expanded,
        result.time_ms,
        nps,
        result
            .best_move
            .map_or_else(|| "none".to_string(), |mv| mv.to_string())
    );
}
