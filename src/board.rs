use log::{debug, warn};

use crate::agent::player::MatchSetup;
use crate::game_repr::{Cell, Move, MoveList, Position, PositionError, Side};

/// Board component: a player's own record of the match in progress.
///
/// Every agent keeps one authoritative `Position`, built at `init` and
/// changed only by moves that were actually played: the moves the agent
/// commits itself, and the moves the coordinator reports back.
///
/// # Replaying reported moves
///
/// The coordinator reports the previous step's move to both players, so an
/// agent sees its opponent's moves and the echo of its own. The mover is
/// read off the board: whoever has a queen on the source cell. An echo of
/// our own move finds that cell already burned and is skipped; any other
/// move that is not legal for the side on its source cell is logged and
/// ignored.
///
/// # Turn detection
///
/// Every move burns exactly one cell, so the side to move follows from the
/// number of burned cells (`Position::side_to_move`). No turn flag is kept,
/// which means a dropped or repeated report cannot desynchronise it.
#[derive(Debug, Clone)]
pub struct Board {
    /// The authoritative position
    position: Position,

    /// The side this player controls
    side: Side,

    /// Our most recent committed move, to recognise its echo
    last_committed: Option<Move>,
}

/// What `Board::replay` did with a reported move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Replay {
    /// No move was reported
    Nothing,
    /// The move was applied for the given side
    Applied(Side, Move),
    /// The move was our own, already applied when it was committed
    OwnEcho,
    /// The move was malformed or illegal and was dropped
    Ignored,
}

impl Board {
    /// Build the starting position from the match setup
    pub fn from_setup(setup: &MatchSetup) -> Result<Self, PositionError> {
        let position = Position::new(setup.width, setup.height, &setup.white, &setup.black)?;
        Ok(Self {
            position,
            side: setup.side,
            last_committed: None,
        })
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// True when the side to move, derived from the burned count, is ours
    pub fn is_our_turn(&self) -> bool {
        self.position.side_to_move() == self.side
    }

    /// Our legal moves in the current position
    pub fn legal_moves(&self) -> MoveList {
        self.position.legal_moves(self.side)
    }

    /// Apply a reported `[x1, y1, x2, y2]` move, if it is one that happened.
    pub fn replay_report(&mut self, last_move: Option<[i32; 4]>) -> Replay {
        let Some(coords) = last_move else {
            return Replay::Nothing;
        };

        match Move::from_coords(coords) {
            Some(mv) => self.replay(mv),
            None => {
                warn!("Ignoring malformed move {:?}", coords);
                Replay::Ignored
            }
        }
    }

    /// Apply a move played on the board, for whichever side owns its source.
    pub fn replay(&mut self, mv: Move) -> Replay {
        let mover = match self.position.get(mv.from()) {
            Some(Cell::Occupied(side)) => side,
            _ if self.last_committed == Some(mv) => {
                debug!("Skipping echo of our own move {}", mv);
                return Replay::OwnEcho;
            }
            _ => {
                warn!("Ignoring move {}: no queen on {}", mv, mv.from());
                return Replay::Ignored;
            }
        };

        if !self.position.is_legal(mv, mover) {
            warn!("Ignoring illegal {} move {}", mover, mv);
            return Replay::Ignored;
        }

        self.position.apply_move(mv, mover);
        debug!("Replayed {} move {}", mover, mv);
        Replay::Applied(mover, mv)
    }

    /// Apply a move this player decided on. `mv` must be legal for our side.
    pub fn commit(&mut self, mv: Move) {
        debug_assert!(self.position.is_legal(mv, self.side), "committing illegal move {}", mv);
        self.position.apply_move(mv, self.side);
        self.last_committed = Some(mv);
    }
}
