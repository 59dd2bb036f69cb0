use std::fmt;
use std::str::FromStr;

use super::error::{ParseSideError, ParseSquareError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn opposite(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Index into per-side arrays (queen lists, Zobrist tags)
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            Self::White => 0,
            Self::Black => 1,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Side {
    type Err = ParseSideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "white" => Ok(Side::White),
            "black" => Ok(Side::Black),
            _ => Err(ParseSideError(s.to_string())),
        }
    }
}

/// State of a single board cell.
///
/// Transitions are one-way during play: `Empty -> Occupied` when a queen lands,
/// `Occupied -> Burned` when it leaves. Only `retract_move` walks them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Side),
    Burned,
}

impl Cell {
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is(&self, side: Side) -> bool {
        matches!(self, Cell::Occupied(s) if *s == side)
    }

    pub fn to_char(&self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Occupied(Side::White) => 'W',
            Cell::Occupied(Side::Black) => 'B',
            Cell::Burned => '#',
        }
    }
}

/// 1-based board coordinate, `x` is the column and `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub x: u8,
    pub y: u8,
}

impl Square {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Square one step away in direction `(dx, dy)`, if it stays inside a
    /// `width` x `height` board.
    #[inline]
    pub fn offset(&self, dx: i8, dy: i8, width: u8, height: u8) -> Option<Square> {
        let nx = self.x as i16 + dx as i16;
        let ny = self.y as i16 + dy as i16;
        if nx < 1 || ny < 1 || nx > width as i16 || ny > height as i16 {
            return None;
        }
        Some(Square::new(nx as u8, ny as u8))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .trim()
            .split_once(',')
            .ok_or_else(|| ParseSquareError(s.to_string()))?;
        let x = x.trim().parse::<u8>().map_err(|_| ParseSquareError(s.to_string()))?;
        let y = y.trim().parse::<u8>().map_err(|_| ParseSquareError(s.to_string()))?;
        if x == 0 || y == 0 {
            return Err(ParseSquareError(s.to_string()));
        }
        Ok(Square::new(x, y))
    }
}
