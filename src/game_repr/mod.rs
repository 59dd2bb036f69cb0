mod error;
mod moves;
mod piece;
mod position;
mod piece_moves;
pub mod zobrist;

#[cfg(test)]
mod tests;

pub use error::*;
pub use moves::*;
pub use piece::*;
pub use position::*;
pub use piece_moves::*;
pub use zobrist::MAX_DIMENSION;
