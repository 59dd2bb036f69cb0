//! Player trait and associated types for Queen Battle agents.
//!
//! A player is anything that can take part in a match run by a coordinator:
//! the search-based [`NegamaxPlayer`](crate::agent::ai::NegamaxPlayer), the
//! [`RandomPlayer`](crate::agent::RandomPlayer) baseline, or a remote agent
//! behind some transport.
//!
//! # Lifecycle
//!
//! The coordinator drives every player through the same three calls:
//!
//! 1. `init` once, with the board size, the starting placements, the side the
//!    player controls and the per-move clock.
//! 2. `next_action` once per step, with the move played in the previous step
//!    (none on the very first step). Both players are asked every step; the
//!    side to move answers with a move, the other side with `noop`.
//! 3. `cleanup` once when the match is over.
//!
//! Players never return errors to the coordinator. Bad input is logged and
//! ignored; a player that cannot move answers `noop`.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::game_repr::{Move, Side, Square};

/// Result of a completed game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    /// Black ran out of moves or forfeited
    WhiteWins,
    /// White ran out of moves or forfeited
    BlackWins,
    /// Both sides stuck at once, or few enough empty cells left
    Draw,
}

impl GameResult {
    /// Create a GameResult from the winning side
    pub fn from_winner(winner: Side) -> Self {
        match winner {
            Side::White => GameResult::WhiteWins,
            Side::Black => GameResult::BlackWins,
        }
    }

    pub fn winner(&self) -> Option<Side> {
        match self {
            GameResult::WhiteWins => Some(Side::White),
            GameResult::BlackWins => Some(Side::Black),
            GameResult::Draw => None,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameResult::WhiteWins => write!(f, "White wins"),
            GameResult::BlackWins => write!(f, "Black wins"),
            GameResult::Draw => write!(f, "Draw"),
        }
    }
}

/// Everything a player learns when a match starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSetup {
    /// The side this player controls
    pub side: Side,
    pub width: u8,
    pub height: u8,
    /// Wall-clock budget per step
    pub play_clock: Duration,
    /// Starting White queens, in list order
    pub white: Vec<Square>,
    /// Starting Black queens, in list order
    pub black: Vec<Square>,
}

/// A player's answer for one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Play(Move),
    Noop,
}

impl Action {
    pub fn as_move(&self) -> Option<Move> {
        match self {
            Action::Play(mv) => Some(*mv),
            Action::Noop => None,
        }
    }
}

/// Wire form: `(play x1 y1 x2 y2)` or `noop`
impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Action::Play(mv) => write!(f, "(play {})", mv),
            Action::Noop => write!(f, "noop"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid action {0:?}, expected \"(play x1 y1 x2 y2)\" or \"noop\"")]
pub struct ParseActionError(pub String);

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseActionError(s.to_string());
        let trimmed = s.trim();

        if trimmed.eq_ignore_ascii_case("noop") {
            return Ok(Action::Noop);
        }

        let inner = trimmed
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(err)?;

        let mut tokens = inner.split_whitespace();
        if !tokens.next().is_some_and(|t| t.eq_ignore_ascii_case("play")) {
            return Err(err());
        }

        let mut coords = [0i32; 4];
        for coord in &mut coords {
            *coord = tokens.next().and_then(|t| t.parse().ok()).ok_or_else(err)?;
        }
        if tokens.next().is_some() {
            return Err(err());
        }

        Move::from_coords(coords).map(Action::Play).ok_or_else(err)
    }
}

/// Trait for entities that take part in a match.
///
/// Only `init` and `next_action` must be implemented.
pub trait Player {
    /// Start a new match. Called once, before any `next_action`.
    fn init(&mut self, setup: &MatchSetup);

    /// Answer one step.
    ///
    /// `last_move` is the move played in the previous step as
    /// `[x1, y1, x2, y2]`, or `None` on the first step. The side to move
    /// answers [`Action::Play`], the other side [`Action::Noop`].
    fn next_action(&mut self, last_move: Option<[i32; 4]>) -> Action;

    /// The match is over; release per-match state.
    fn cleanup(&mut self) {
        // Default: do nothing
    }

    /// Get the display name of this player.
    fn name(&self) -> &str {
        "Player"
    }
}
