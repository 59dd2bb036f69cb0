//! NegamaxPlayer - Queen Battle agent using Negamax with Alpha-Beta pruning
//!
//! This module is the turn controller of the search agent. It owns the
//! authoritative [`Board`] of the match and, on each of its turns, hands a
//! copy of the position to [`iterative_deepening_search`] under the play
//! clock, then commits the chosen move.
//!
//! # Turn cycle
//!
//! ```text
//! AwaitingOpponent --(our side to move)--> Deciding --(move or noop)--> AwaitingOpponent
//!        |                                                                    |
//!        +------------------------------ cleanup ----------------------------> Done
//! ```
//!
//! Every call to `next_action` first replays the reported move, then asks the
//! board whose turn it is. When it is not ours the answer is `noop` and no
//! search runs.
//!
//! # Time budget
//!
//! The turn gets `play_clock - safety_margin` of wall-clock time, counted
//! from the moment `next_action` is entered, so the replay and the cache
//! reset are paid out of the same budget as the search. The deadline is
//! polled every `node_check_interval` nodes and before every root
//! move; a depth cut short by the deadline is discarded, so the committed
//! move always comes from the deepest fully searched depth. When the budget
//! is too small to finish even depth 1 the agent answers `noop`.
//!
//! # Examples
//!
//! ```
//! use std::time::{Duration, Instant};
//! use queen_battle::agent::{Action, MatchSetup, Player};
//! use queen_battle::agent::ai::NegamaxPlayer;
//! use queen_battle::config::AgentConfig;
//! use queen_battle::game_repr::{Side, Square};
//!
//! let mut ai = NegamaxPlayer::new(AgentConfig::default());
//! ai.init(&MatchSetup {
//!     side: Side::White,
//!     width: 5,
//!     height: 5,
//!     play_clock: Duration::from_secs(1),
//!     white: vec![Square::new(1, 1)],
//!     black: vec![Square::new(5, 5)],
//! });
//!
//! // White moves first, so the first answer is a move
//! assert!(matches!(ai.next_action(None), Action::Play(_)));
//! ```

use std::time::{Duration, Instant};

use log::{debug, error, info};

use crate::agent::player::{Action, MatchSetup, Player};
use crate::board::{Board, Replay};
use crate::config::AgentConfig;
use crate::game_repr::Move;
use super::search::{iterative_deepening_search, SearchResult};
use super::transposition_table::TranspositionTable;

/// Where the agent is in its turn cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    /// Waiting for the opponent, or not yet initialised
    AwaitingOpponent,
    /// Searching for our move
    Deciding,
    /// The match is over; every call answers `noop`
    Done,
}

/// AI Player that uses Negamax search with alpha-beta pruning
///
/// The transposition table is allocated once, when the player is built, and
/// cleared at the start of every turn; the position hash does not encode
/// whose turn it is, so values from an earlier turn are never reused.
pub struct NegamaxPlayer {
    config: AgentConfig,

    /// Display name for this AI player
    name: String,

    /// Authoritative record of the match; None before `init`, after
    /// `cleanup`, or when the setup was rejected
    board: Option<Board>,

    play_clock: Duration,

    tt: TranspositionTable,

    state: TurnState,

    /// Statistics of the most recent search
    last_search: Option<SearchResult>,
}

impl NegamaxPlayer {
    /// Create a new NegamaxPlayer with the name "AI (Negamax)"
    pub fn new(config: AgentConfig) -> Self {
        Self::with_name(config, "AI (Negamax)".to_string())
    }

    /// Create a new NegamaxPlayer with custom name
    pub fn with_name(config: AgentConfig, name: String) -> Self {
        Self {
            tt: TranspositionTable::with_capacity(config.cache_capacity),
            config,
            name,
            board: None,
            play_clock: Duration::ZERO,
            state: TurnState::AwaitingOpponent,
            last_search: None,
        }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    /// Statistics of the most recent search, if any ran
    pub fn last_search(&self) -> Option<&SearchResult> {
        self.last_search.as_ref()
    }

    /// Replay a move played on the board (the opponent's, or our own echo).
    pub fn on_opponent_move(&mut self, mv: Move) -> Replay {
        match self.board.as_mut() {
            Some(board) => board.replay(mv),
            None => Replay::Ignored,
        }
    }

    /// Decide our action in the current position.
    ///
    /// Answers `noop` without searching when it is not our turn.
    pub fn decide(&mut self) -> Action {
        self.decide_within(Instant::now())
    }

    /// Decide with the turn budget counted from `turn_start`.
    fn decide_within(&mut self, turn_start: Instant) -> Action {
        if self.state == TurnState::Done {
            return Action::Noop;
        }
        let Some(board) = self.board.as_mut() else {
            return Action::Noop;
        };
        if !board.is_our_turn() {
            return Action::Noop;
        }

        self.state = TurnState::Deciding;
        self.tt.clear();

        let mut limits = self.config.search_limits(self.play_clock);
        limits.time_limit = limits
            .time_limit
            .map(|limit| limit.saturating_sub(turn_start.elapsed()));
        let result = iterative_deepening_search(
            board.position(),
            board.side(),
            &limits,
            &mut self.tt,
            &self.config.weights,
        );

        let action = match result.best_move {
            Some(mv) => {
                board.commit(mv);
                info!(
                    "[{}] {} plays {} (depth {}, score {}, {} nodes in {}ms)",
                    self.name,
                    board.side(),
                    mv,
                    result.depth,
                    result.score,
                    result.nodes_searched,
                    result.time_ms
                );
                Action::Play(mv)
            }
            None => {
                info!("[{}] no move found, answering noop", self.name);
                Action::Noop
            }
        };

        self.last_search = Some(result);
        self.state = TurnState::AwaitingOpponent;
        action
    }
}

impl Player for NegamaxPlayer {
    fn init(&mut self, setup: &MatchSetup) {
        self.play_clock = setup.play_clock;
        self.last_search = None;
        self.tt.clear();
        self.state = TurnState::AwaitingOpponent;

        self.board = match Board::from_setup(setup) {
            Ok(board) => {
                debug!(
                    "[{}] playing {} on {}x{}, {}ms per move",
                    self.name,
                    setup.side,
                    setup.width,
                    setup.height,
                    setup.play_clock.as_millis()
                );
                Some(board)
            }
            Err(e) => {
                error!("[{}] rejected match setup: {}", self.name, e);
                None
            }
        };
    }

    fn next_action(&mut self, last_move: Option<[i32; 4]>) -> Action {
        let turn_start = Instant::now();
        if self.state == TurnState::Done {
            return Action::Noop;
        }
        if let Some(board) = self.board.as_mut() {
            board.replay_report(last_move);
        }
        self.decide_within(turn_start)
    }

    fn cleanup(&mut self) {
        self.board = None;
        self.tt.clear();
        self.state = TurnState::Done;
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::ai::evaluation::WIN_SCORE;
    use crate::agent::ai::transposition_table::{NodeType, RESOLVED_DEPTH};
    use crate::game_repr::{Side, Square};

    fn config() -> AgentConfig {
        AgentConfig {
            safety_margin: Duration::from_millis(100),
            cache_capacity: 1 << 14,
            ..AgentConfig::default()
        }
    }

    fn setup(side: Side) -> MatchSetup {
        MatchSetup {
            side,
            width: 4,
            height: 4,
            play_clock: Duration::from_millis(400),
            white: vec![Square::new(1, 1)],
            black: vec![Square::new(4, 4)],
        }
    }

    #[test]
    fn test_white_moves_first() {
        let mut ai = NegamaxPlayer::new(config());
        ai.init(&setup(Side::White));

        let action = ai.next_action(None);

        let mv = action.as_move().expect("White should move");
        assert_eq!(mv.from(), Square::new(1, 1));
        assert_eq!(ai.board().unwrap().position().count_burned(), 1);
        assert_eq!(ai.state(), TurnState::AwaitingOpponent);
        assert!(ai.last_search().is_some());
    }

    #[test]
    fn test_noop_when_not_our_turn() {
        let mut ai = NegamaxPlayer::new(config());
        ai.init(&setup(Side::Black));

        assert_eq!(ai.next_action(None), Action::Noop);
        assert!(ai.last_search().is_none(), "No search off turn");
    }

    #[test]
    fn test_replays_opponent_then_moves() {
        let mut ai = NegamaxPlayer::new(config());
        ai.init(&setup(Side::Black));
        ai.next_action(None);

        let action = ai.next_action(Some([1, 1, 1, 3]));

        let mv = action.as_move().expect("Black should move");
        assert_eq!(mv.from(), Square::new(4, 4));
        let board = ai.board().unwrap();
        assert_eq!(board.position().count_burned(), 2);
        assert!(!board.is_our_turn());
    }

    #[test]
    fn test_own_echo_then_noop() {
        let mut ai = NegamaxPlayer::new(config());
        ai.init(&setup(Side::White));
        let mv = ai.next_action(None).as_move().unwrap();

        // The coordinator reports our own move back to us
        assert_eq!(ai.next_action(Some(mv.coords())), Action::Noop);
        assert_eq!(ai.board().unwrap().position().count_burned(), 1);
    }

    #[test]
    fn test_finds_winning_move() {
        let mut ai = NegamaxPlayer::new(config());
        ai.init(&MatchSetup {
            side: Side::White,
            width: 3,
            height: 3,
            play_clock: Duration::from_millis(400),
            white: vec![Square::new(2, 2)],
            black: vec![Square::new(3, 2)],
        });
        ai.on_opponent_move(Move::new(Square::new(2, 2), Square::new(1, 3)));
        ai.on_opponent_move(Move::new(Square::new(3, 2), Square::new(3, 3)));

        // Black's only exit is (2, 3)
        let action = ai.decide();

        assert_eq!(action, Action::Play(Move::new(Square::new(1, 3), Square::new(2, 3))));
        assert_eq!(ai.last_search().unwrap().score, WIN_SCORE);
    }

    #[test]
    fn test_short_clock_answers_noop() {
        let mut ai = NegamaxPlayer::new(AgentConfig {
            safety_margin: Duration::from_secs(1),
            ..config()
        });
        ai.init(&setup(Side::White));

        assert_eq!(ai.next_action(None), Action::Noop);
        assert_eq!(ai.last_search().unwrap().depth, 0);
    }

    #[test]
    fn test_budget_counts_from_turn_start() {
        // 400ms clock minus 100ms margin, already spent before the search
        let mut ai = NegamaxPlayer::new(config());
        ai.init(&setup(Side::White));
        let turn_start = Instant::now()
            .checked_sub(Duration::from_millis(350))
            .expect("clock far enough from boot");

        assert_eq!(ai.decide_within(turn_start), Action::Noop);
        assert_eq!(ai.last_search().unwrap().depth, 0);
        assert_eq!(ai.board().unwrap().position().count_burned(), 0);
    }

    #[test]
    fn test_cache_from_earlier_turn_is_not_reused() {
        let depth_limited = AgentConfig {
            max_depth: 3,
            ..config()
        };
        let match_setup = MatchSetup {
            side: Side::Black,
            width: 5,
            height: 5,
            play_clock: Duration::from_secs(5),
            white: vec![Square::new(1, 1)],
            black: vec![Square::new(5, 5)],
        };
        let opening = Move::new(Square::new(1, 1), Square::new(1, 3));

        let mut clean = NegamaxPlayer::new(depth_limited);
        clean.init(&match_setup);
        let expected = clean.next_action(Some(opening.coords()));
        let expected_score = clean.last_search().unwrap().score;

        let mut ai = NegamaxPlayer::new(depth_limited);
        ai.init(&match_setup);
        ai.on_opponent_move(opening);

        // A stale entry claiming that one of Black's moves leaves White lost
        let stale = Move::new(Square::new(5, 5), Square::new(5, 4));
        let mut child = ai.board().unwrap().position().clone();
        assert!(child.is_legal(stale, Side::Black));
        child.apply_move(stale, Side::Black);
        ai.tt.store(child.hash(), -WIN_SCORE, RESOLVED_DEPTH, NodeType::Exact);

        let action = ai.decide();

        assert_eq!(action, expected);
        assert_eq!(ai.last_search().unwrap().score, expected_score);
        assert!(expected_score < WIN_SCORE);
    }

    #[test]
    fn test_invalid_setup_answers_noop() {
        let mut ai = NegamaxPlayer::new(config());
        let mut bad = setup(Side::White);
        bad.white = vec![Square::new(4, 4)];

        ai.init(&bad);

        assert!(ai.board().is_none());
        assert_eq!(ai.next_action(None), Action::Noop);
    }

    #[test]
    fn test_cleanup_ends_the_match() {
        let mut ai = NegamaxPlayer::new(config());
        ai.init(&setup(Side::White));
        ai.cleanup();

        assert_eq!(ai.state(), TurnState::Done);
        assert!(ai.board().is_none());
        assert_eq!(ai.next_action(None), Action::Noop);
    }
}
