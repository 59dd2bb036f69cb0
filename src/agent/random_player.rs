//! Baseline player that picks a uniformly random legal move.
//!
//! Used as a sparring partner for the search agent and in tests. The RNG is
//! seeded, so a match between fixed players is reproducible.

use log::{debug, error};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::agent::player::{Action, MatchSetup, Player};
use crate::board::Board;

pub struct RandomPlayer {
    rng: StdRng,
    board: Option<Board>,
    name: String,
}

impl RandomPlayer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            board: None,
            name: format!("Random ({})", seed),
        }
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }
}

impl Player for RandomPlayer {
    fn init(&mut self, setup: &MatchSetup) {
        self.board = Board::from_setup(setup)
            .map_err(|e| error!("[{}] rejected match setup: {}", self.name, e))
            .ok();
    }

    fn next_action(&mut self, last_move: Option<[i32; 4]>) -> Action {
        let Some(board) = self.board.as_mut() else {
            return Action::Noop;
        };
        board.replay_report(last_move);

        if !board.is_our_turn() {
            return Action::Noop;
        }

        let moves = board.legal_moves();
        if moves.is_empty() {
            return Action::Noop;
        }

        let mv = moves[self.rng.gen_range(0..moves.len())];
        board.commit(mv);
        debug!("[{}] plays {}", self.name, mv);
        Action::Play(mv)
    }

    fn cleanup(&mut self) {
        self.board = None;
    }

    fn name(&self) -> &str {
        &self.name
    }
}
