use crate::game_repr::{Position, Side};
use super::{corners_4x4, sq};

fn corners_3x3() -> Position {
    Position::new(3, 3, &[sq(1, 1)], &[sq(3, 3)]).unwrap()
}

#[test]
fn test_perft_depth_0() {
    assert_eq!(corners_3x3().perft(0, Side::White), 1);
}

#[test]
fn test_perft_depth_1() {
    assert_eq!(corners_3x3().perft(1, Side::White), 5);
    assert_eq!(corners_3x3().perft(1, Side::Black), 5);
    assert_eq!(corners_4x4().perft(1, Side::White), 8);
}

#[test]
fn test_perft_depth_2() {
    assert_eq!(corners_3x3().perft(2, Side::White), 22);
}

#[test]
fn test_perft_symmetric_sides() {
    // Point-symmetric start: both sides see the same tree
    let pos = corners_4x4();
    assert_eq!(pos.perft(3, Side::White), pos.perft(3, Side::Black));
}

#[test]
fn test_perft_leaves_position_untouched() {
    let pos = corners_4x4();
    let before = pos.clone();
    pos.perft(3, Side::White);
    assert_eq!(pos, before);
}
