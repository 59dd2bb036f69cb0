use std::fmt;

use super::Square;

/*-------ARCHITECTURE--------*/

// | 8 bits | 8 bits | 8 bits | 8 bits |
// |   x1   |   y1   |   x2   |   y2   |
// |              32 bits              |

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    buf: u32,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Move {
        let mut buf = 0u32;
        buf |= (from.x as u32) << 24;
        buf |= (from.y as u32) << 16;
        buf |= (to.x as u32) << 8;
        buf |= to.y as u32;

        Self { buf }
    }

    /// Build a move from the wire form `[x1, y1, x2, y2]`.
    ///
    /// Returns `None` when any coordinate falls outside `1..=255`; whether the
    /// squares exist on a given board is checked by the caller.
    pub fn from_coords(coords: [i32; 4]) -> Option<Move> {
        let mut c = [0u8; 4];
        for (dst, &src) in c.iter_mut().zip(coords.iter()) {
            *dst = u8::try_from(src).ok().filter(|&v| v >= 1)?;
        }
        Some(Move::new(Square::new(c[0], c[1]), Square::new(c[2], c[3])))
    }

    #[inline]
    pub fn from(&self) -> Square {
        Square::new((self.buf >> 24) as u8, (self.buf >> 16) as u8)
    }

    #[inline]
    pub fn to(&self) -> Square {
        Square::new((self.buf >> 8) as u8, self.buf as u8)
    }

    pub fn coords(&self) -> [i32; 4] {
        let (from, to) = (self.from(), self.to());
        [from.x as i32, from.y as i32, to.x as i32, to.y as i32]
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} -> {})", self.from(), self.to())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (from, to) = (self.from(), self.to());
        write!(f, "{} {} {} {}", from.x, from.y, to.x, to.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_packing() {
        let mv = Move::new(Square::new(3, 16), Square::new(255, 1));
        assert_eq!(mv.from(), Square::new(3, 16));
        assert_eq!(mv.to(), Square::new(255, 1));
        assert_eq!(mv.coords(), [3, 16, 255, 1]);
    }

    #[test]
    fn test_from_coords_rejects_out_of_range() {
        assert!(Move::from_coords([1, 1, 1, 3]).is_some());
        assert!(Move::from_coords([0, 1, 1, 3]).is_none());
        assert!(Move::from_coords([1, -4, 1, 3]).is_none());
        assert!(Move::from_coords([1, 1, 256, 3]).is_none());
    }
}
