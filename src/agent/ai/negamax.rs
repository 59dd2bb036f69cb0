// Negamax Search with Alpha-Beta Pruning
//
// Negamax uses the zero-sum property of the game, max(a, b) = -min(-a, -b):
// one function serves both sides by negating the child's score at each ply.
//
// The search is fail-soft: a node may return a value outside its
// (alpha, beta) window, and the transposition table records whether a stored
// value is exact or only a bound.
//
// Every node also reports whether its value is *resolved*, i.e. every leaf
// below it was a decided game. Resolved values never change with more depth,
// so they are cached with RESOLVED_DEPTH and let the root stop deepening.

use std::time::Instant;

use thiserror::Error;

use crate::game_repr::{Position, Side};
use super::evaluation::{assess, EvalWeights, WIN_SCORE};
use super::move_ordering::generate_ordered_moves;
use super::transposition_table::{NodeType, TranspositionTable, RESOLVED_DEPTH};

/// Bound wider than any score the evaluation can return
pub const INFINITY: i32 = WIN_SCORE + 1;

/// The deadline passed mid-search; the partial result must be discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("search deadline passed")]
pub struct SearchAborted;

/// Value of a searched node, from the point of view of the side to move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeValue {
    pub score: i32,
    /// True when every leaf below was a decided game
    pub resolved: bool,
}

/// Mutable state of one search episode: counters, deadline and the cache.
pub struct SearchContext<'a> {
    pub tt: &'a mut TranspositionTable,
    pub weights: EvalWeights,
    deadline: Option<Instant>,
    node_check_interval: u64,
    /// Nodes visited, cache hits and leaves included
    pub nodes: u64,
    /// Nodes whose moves were generated and searched
    pub expanded: u64,
}

impl<'a> SearchContext<'a> {
    pub fn new(
        tt: &'a mut TranspositionTable,
        weights: EvalWeights,
        deadline: Option<Instant>,
        node_check_interval: u64,
    ) -> Self {
        Self {
            tt,
            weights,
            deadline,
            node_check_interval: node_check_interval.max(1),
            nodes: 0,
            expanded: 0,
        }
    }

    /// Check if the deadline has passed
    pub fn time_up(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Count a visited node, polling the clock every `node_check_interval` nodes
    #[inline]
    fn visit(&mut self) -> Result<(), SearchAborted> {
        self.nodes += 1;
        if self.nodes % self.node_check_interval == 0 && self.time_up() {
            return Err(SearchAborted);
        }
        Ok(())
    }
}

/// Negamax search with alpha-beta pruning
///
/// # Arguments
///
/// * `pos` - Position to search, restored on return unless the search aborts
/// * `depth` - Remaining search depth (0 = leaf, evaluate)
/// * `alpha` - Lower bound (best score `side` can already guarantee)
/// * `beta` - Upper bound (best score the opponent will allow)
/// * `side` - Side to move
/// * `ctx` - Counters, deadline and transposition table of this search
///
/// # Returns
///
/// The node value from the perspective of `side`, or `SearchAborted` when
/// the deadline passed. An aborted search leaves `pos` in the middle of a
/// line: only search a disposable copy.
pub fn negamax(
    pos: &mut Position,
    depth: u8,
    mut alpha: i32,
    beta: i32,
    side: Side,
    ctx: &mut SearchContext<'_>,
) -> Result<NodeValue, SearchAborted> {
    ctx.visit()?;

    let eval = assess(pos, side, &ctx.weights);
    if eval.terminal {
        return Ok(NodeValue { score: eval.score, resolved: true });
    }
    if depth == 0 {
        return Ok(NodeValue { score: eval.score, resolved: false });
    }

    let hash = pos.hash();
    if let Some(entry) = ctx.tt.probe(hash, depth) {
        let cached = NodeValue {
            score: entry.score,
            resolved: entry.is_resolved(),
        };
        match entry.node_type {
            NodeType::Exact => return Ok(cached),
            NodeType::LowerBound if entry.score >= beta => return Ok(cached),
            NodeType::UpperBound if entry.score <= alpha => return Ok(cached),
            _ => {}
        }
    }

    ctx.expanded += 1;
    let original_alpha = alpha;
    let mut best = -INFINITY;
    let mut resolved = true;

    // Zero mobility was caught by the assessment, so this is never empty
    let moves = generate_ordered_moves(pos, side);
    for &mv in &moves {
        pos.apply_move(mv, side);
        let child = negamax(pos, depth - 1, -beta, -alpha, side.opposite(), ctx)?;
        pos.retract_move(mv, side);

        let score = -child.score;
        resolved &= child.resolved;

        if score > best {
            best = score;
        }
        if best > alpha {
            alpha = best;
        }
        if alpha >= beta {
            break; // Beta cutoff
        }
    }

    let node_type = if best <= original_alpha {
        NodeType::UpperBound
    } else if best >= beta {
        NodeType::LowerBound
    } else {
        NodeType::Exact
    };
    let stored_depth = if resolved { RESOLVED_DEPTH } else { depth };
    ctx.tt.store(hash, best, stored_depth, node_type);

    Ok(NodeValue { score: best, resolved })
}
