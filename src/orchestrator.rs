//! Local match coordination.
//!
//! This module contains the [`Orchestrator`], a referee that runs one match
//! between two [`Player`]s in-process, the way a remote match coordinator
//! would run it over the network.
//!
//! # Game Flow
//!
//! ```text
//! [init both] -> [check end] -> [ask both players] -> [validate] -> [apply]
//!                     ^                                                 |
//!                     +-------------------------------------------------+
//! ```
//!
//! Each step both players receive the previous step's move. The side to move
//! must answer with a legal move, the other side with `noop`; any other
//! answer forfeits the match. The orchestrator keeps its own authoritative
//! [`Position`] and never trusts a player's board.
//!
//! Every move burns a cell, so a match lasts at most `width * height` steps.

use log::{info, warn};
use thiserror::Error;

use crate::agent::ai::is_move_limit_draw;
use crate::agent::player::{Action, GameResult, Player};
use crate::config::MatchConfig;
use crate::game_repr::{Move, Position, PositionError, Side};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrchestratorError {
    #[error("invalid match setup: {0}")]
    InvalidSetup(#[from] PositionError),
}

/// Why a player lost by forfeit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForfeitReason {
    /// The side to move answered `noop` although it had a legal move
    Noop,
    /// The side to move answered with a move that is not legal
    IllegalMove(Move),
    /// The side not to move answered with a move
    OutOfTurn(Move),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Forfeit {
    pub side: Side,
    pub reason: ForfeitReason,
}

/// Outcome of a finished match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchReport {
    pub result: GameResult,
    /// Every move played, in order
    pub moves: Vec<Move>,
    /// Set when the match ended by forfeit rather than on the board
    pub forfeit: Option<Forfeit>,
    /// Position at the end of the match
    pub final_position: Position,
}

/// Referee for one match between two players.
pub struct Orchestrator {
    config: MatchConfig,
    /// (white_player, black_player)
    players: (Box<dyn Player>, Box<dyn Player>),
}

impl Orchestrator {
    pub fn new(config: MatchConfig, white: Box<dyn Player>, black: Box<dyn Player>) -> Self {
        Self {
            config,
            players: (white, black),
        }
    }

    fn player_mut(&mut self, side: Side) -> &mut dyn Player {
        match side {
            Side::White => self.players.0.as_mut(),
            Side::Black => self.players.1.as_mut(),
        }
    }

    /// Result if the game is over on the board, before `mover` acts
    fn check_game_end(position: &Position, mover: Side) -> Option<GameResult> {
        if is_move_limit_draw(position) {
            return Some(GameResult::Draw);
        }
        if position.has_legal_moves(mover) {
            return None;
        }
        if position.has_legal_moves(mover.opposite()) {
            Some(GameResult::from_winner(mover.opposite()))
        } else {
            Some(GameResult::Draw)
        }
    }

    /// Judge the answers of one step. Returns the move to apply, or the forfeit.
    fn judge(
        position: &Position,
        mover: Side,
        mover_action: Action,
        waiting_action: Action,
    ) -> Result<Move, Forfeit> {
        if let Action::Play(mv) = waiting_action {
            return Err(Forfeit {
                side: mover.opposite(),
                reason: ForfeitReason::OutOfTurn(mv),
            });
        }

        match mover_action {
            Action::Noop => Err(Forfeit {
                side: mover,
                reason: ForfeitReason::Noop,
            }),
            Action::Play(mv) if !position.is_legal(mv, mover) => Err(Forfeit {
                side: mover,
                reason: ForfeitReason::IllegalMove(mv),
            }),
            Action::Play(mv) => Ok(mv),
        }
    }

    /// Play the match to the end.
    ///
    /// Both players are initialised first and cleaned up afterwards, also
    /// when the match ends by forfeit.
    pub fn run(mut self) -> Result<MatchReport, OrchestratorError> {
        let mut position = Position::new(
            self.config.width,
            self.config.height,
            &self.config.white,
            &self.config.black,
        )?;

        for side in [Side::White, Side::Black] {
            let setup = self.config.setup_for(side);
            self.player_mut(side).init(&setup);
        }
        info!(
            "Match {} (White) vs {} (Black) on {}x{}",
            self.players.0.name(),
            self.players.1.name(),
            self.config.width,
            self.config.height
        );

        let mut moves = Vec::new();
        let mut last_move: Option<[i32; 4]> = None;
        let mut forfeit = None;

        let result = loop {
            let mover = position.side_to_move();
            if let Some(result) = Self::check_game_end(&position, mover) {
                break result;
            }

            let white_action = self.players.0.next_action(last_move);
            let black_action = self.players.1.next_action(last_move);
            let (mover_action, waiting_action) = match mover {
                Side::White => (white_action, black_action),
                Side::Black => (black_action, white_action),
            };

            match Self::judge(&position, mover, mover_action, waiting_action) {
                Ok(mv) => {
                    position.apply_move(mv, mover);
                    info!("{}. {} {}", moves.len() + 1, mover, mv);
                    moves.push(mv);
                    last_move = Some(mv.coords());
                }
                Err(f) => {
                    warn!("{} forfeits: {:?}", f.side, f.reason);
                    forfeit = Some(f);
                    break GameResult::from_winner(f.side.opposite());
                }
            }
        };

        self.players.0.cleanup();
        self.players.1.cleanup();

        info!("{} after {} moves\n{}", result, moves.len(), position);

        Ok(MatchReport {
            result,
            moves,
            forfeit,
            final_position: position,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use super::*;
    use crate::agent::player::MatchSetup;
    use crate::agent::RandomPlayer;
    use crate::game_repr::Square;

    type Seen = Rc<RefCell<Vec<Option<[i32; 4]>>>>;

    /// Plays a fixed script of answers and records what it was told
    struct ScriptedPlayer {
        script: Vec<Action>,
        seen: Seen,
        cleaned_up: Rc<RefCell<bool>>,
    }

    impl Player for ScriptedPlayer {
        fn init(&mut self, _setup: &MatchSetup) {}

        fn next_action(&mut self, last_move: Option<[i32; 4]>) -> Action {
            self.seen.borrow_mut().push(last_move);
            if self.script.is_empty() {
                Action::Noop
            } else {
                self.script.remove(0)
            }
        }

        fn cleanup(&mut self) {
            *self.cleaned_up.borrow_mut() = true;
        }
    }

    fn scripted(script: Vec<Action>) -> (Box<dyn Player>, Seen, Rc<RefCell<bool>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let cleaned_up = Rc::new(RefCell::new(false));
        let player = ScriptedPlayer {
            script,
            seen: seen.clone(),
            cleaned_up: cleaned_up.clone(),
        };
        (Box::new(player), seen, cleaned_up)
    }

    fn play(x1: u8, y1: u8, x2: u8, y2: u8) -> Action {
        Action::Play(Move::new(Square::new(x1, y1), Square::new(x2, y2)))
    }

    fn corners_4x4() -> MatchConfig {
        MatchConfig {
            width: 4,
            height: 4,
            play_clock: Duration::from_millis(300),
            white: vec![Square::new(1, 1)],
            black: vec![Square::new(4, 4)],
        }
    }

    #[test]
    fn test_noop_from_mover_forfeits() {
        let (white, _, white_done) = scripted(vec![Action::Noop]);
        let (black, _, black_done) = scripted(vec![]);

        let report = Orchestrator::new(corners_4x4(), white, black).run().unwrap();

        assert_eq!(report.result, GameResult::BlackWins);
        assert_eq!(
            report.forfeit,
            Some(Forfeit { side: Side::White, reason: ForfeitReason::Noop })
        );
        assert!(*white_done.borrow() && *black_done.borrow());
    }

    #[test]
    fn test_illegal_move_forfeits() {
        let (white, _, _) = scripted(vec![play(1, 1, 1, 2)]);
        // Diagonal onto White's burned start square
        let (black, _, _) = scripted(vec![Action::Noop, play(4, 4, 1, 1)]);

        let report = Orchestrator::new(corners_4x4(), white, black).run().unwrap();

        assert_eq!(report.result, GameResult::WhiteWins);
        assert_eq!(report.moves.len(), 1);
        assert!(matches!(
            report.forfeit,
            Some(Forfeit { side: Side::Black, reason: ForfeitReason::IllegalMove(_) })
        ));
    }

    #[test]
    fn test_out_of_turn_move_forfeits() {
        let (white, _, _) = scripted(vec![play(1, 1, 1, 2)]);
        let (black, _, _) = scripted(vec![play(4, 4, 4, 3)]);

        let report = Orchestrator::new(corners_4x4(), white, black).run().unwrap();

        assert_eq!(report.result, GameResult::WhiteWins);
        assert!(report.moves.is_empty());
        assert!(matches!(
            report.forfeit,
            Some(Forfeit { side: Side::Black, reason: ForfeitReason::OutOfTurn(_) })
        ));
    }

    #[test]
    fn test_both_players_see_previous_move() {
        let (white, white_seen, _) = scripted(vec![play(1, 1, 1, 2), Action::Noop]);
        let (black, black_seen, _) = scripted(vec![Action::Noop, play(4, 4, 4, 3)]);

        // White forfeits on its second turn
        Orchestrator::new(corners_4x4(), white, black).run().unwrap();

        let expected = vec![None, Some([1, 1, 1, 2]), Some([4, 4, 4, 3])];
        assert_eq!(*white_seen.borrow(), expected);
        assert_eq!(*black_seen.borrow(), expected);
    }

    #[test]
    fn test_stuck_mover_loses() {
        // 2x4: White on (2, 1) is walled in once Black takes (2, 2)
        let config = MatchConfig {
            width: 2,
            height: 4,
            play_clock: Duration::from_millis(300),
            white: vec![Square::new(1, 1)],
            black: vec![Square::new(1, 2)],
        };
        let (white, _, _) = scripted(vec![play(1, 1, 2, 1)]);
        let (black, _, _) = scripted(vec![Action::Noop, play(1, 2, 2, 2)]);

        let report = Orchestrator::new(config, white, black).run().unwrap();

        assert_eq!(report.result, GameResult::BlackWins);
        assert!(report.forfeit.is_none());
        assert_eq!(report.moves.len(), 2);
    }

    #[test]
    fn test_draw_rule_ends_match() {
        // 3x2: after one move only 3 empty cells remain, not more than the width
        let config = MatchConfig {
            width: 3,
            height: 2,
            play_clock: Duration::from_millis(300),
            white: vec![Square::new(1, 1)],
            black: vec![Square::new(3, 2)],
        };
        let (white, _, _) = scripted(vec![play(1, 1, 2, 1)]);
        let (black, _, _) = scripted(vec![]);

        let report = Orchestrator::new(config, white, black).run().unwrap();

        assert_eq!(report.result, GameResult::Draw);
        assert!(report.forfeit.is_none());
        assert_eq!(report.moves.len(), 1);
    }

    #[test]
    fn test_invalid_setup_is_an_error() {
        let mut config = corners_4x4();
        config.black = vec![Square::new(1, 1)];

        let result = Orchestrator::new(
            config,
            Box::new(RandomPlayer::new(1)),
            Box::new(RandomPlayer::new(2)),
        )
        .run();

        assert_eq!(
            result.err(),
            Some(OrchestratorError::InvalidSetup(PositionError::DuplicateSquare(Square::new(1, 1))))
        );
    }

    #[test]
    fn test_random_match_completes() {
        let report = Orchestrator::new(
            MatchConfig::default(),
            Box::new(RandomPlayer::new(1)),
            Box::new(RandomPlayer::new(2)),
        )
        .run()
        .unwrap();

        assert!(report.forfeit.is_none());
        let end = &report.final_position;
        assert_eq!(end.count_burned(), report.moves.len());
        let mover = end.side_to_move();
        assert!(is_move_limit_draw(end) || !end.has_legal_moves(mover));
    }
}
