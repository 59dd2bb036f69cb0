//! Configuration types for agents and local matches.
//!
//! Plain data with `Default`s; the `queen-battle` binary maps its command
//! line flags onto these, tests build them directly.

use std::time::Duration;

use crate::agent::ai::{EvalWeights, SearchLimits, DEFAULT_CAPACITY};
use crate::agent::player::MatchSetup;
use crate::game_repr::{Side, Square};

/// Tunables of the search agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentConfig {
    /// Kept back from the play clock for everything outside the search
    pub safety_margin: Duration,
    /// Transposition table slots, rounded up to a power of two; 0 disables it
    pub cache_capacity: usize,
    /// Nodes between two clock checks
    pub node_check_interval: u64,
    /// Iterative deepening stops here even with time left
    pub max_depth: u8,
    pub weights: EvalWeights,
}

impl Default for AgentConfig {
    fn default() -> Self {
        let limits = SearchLimits::default();
        Self {
            safety_margin: Duration::from_millis(500),
            cache_capacity: DEFAULT_CAPACITY,
            node_check_interval: limits.node_check_interval,
            max_depth: limits.max_depth,
            weights: EvalWeights::default(),
        }
    }
}

impl AgentConfig {
    /// Search budget for one turn under `play_clock`.
    ///
    /// A clock shorter than the safety margin leaves a zero budget: the
    /// search then completes no depth and the agent answers `noop`.
    pub fn time_limit(&self, play_clock: Duration) -> Duration {
        play_clock.saturating_sub(self.safety_margin)
    }

    /// Search limits for one turn under `play_clock`
    pub fn search_limits(&self, play_clock: Duration) -> SearchLimits {
        SearchLimits {
            max_depth: self.max_depth,
            time_limit: Some(self.time_limit(play_clock)),
            node_check_interval: self.node_check_interval,
        }
    }
}

/// Board and clock of one local match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    pub width: u8,
    pub height: u8,
    /// Budget per step, handed to both players
    pub play_clock: Duration,
    pub white: Vec<Square>,
    pub black: Vec<Square>,
}

impl MatchConfig {
    /// The setup a player of `side` receives at `init`
    pub fn setup_for(&self, side: Side) -> MatchSetup {
        MatchSetup {
            side,
            width: self.width,
            height: self.height,
            play_clock: self.play_clock,
            white: self.white.clone(),
            black: self.black.clone(),
        }
    }
}

impl Default for MatchConfig {
    /// 6x6 board, two queens each in the corners, 1 second per step
    fn default() -> Self {
        Self {
            width: 6,
            height: 6,
            play_clock: Duration::from_secs(1),
            white: vec![Square::new(1, 1), Square::new(6, 1)],
            black: vec![Square::new(1, 6), Square::new(6, 6)],
        }
    }
}
