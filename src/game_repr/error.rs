use thiserror::Error;

use super::{Square, MAX_DIMENSION};

/// Reasons a starting position can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("board dimensions {width}x{height} outside 1..={max}", max = MAX_DIMENSION)]
    InvalidDimensions { width: u8, height: u8 },

    #[error("square {square} lies outside the {width}x{height} board")]
    OutOfBounds { square: Square, width: u8, height: u8 },

    #[error("square {0} holds more than one queen")]
    DuplicateSquare(Square),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid square {0:?}, expected \"x,y\" with 1-based coordinates")]
pub struct ParseSquareError(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid side {0:?}, expected \"white\" or \"black\"")]
pub struct ParseSideError(pub String);
