// Tests for move ordering

use crate::agent::ai::move_ordering::{generate_ordered_moves, order_moves, quick_move_score};
use crate::game_repr::{Move, Position, Side};
use super::{burn_all, sq};

#[test]
fn test_ordering_preserves_moves() {
    let pos = Position::new(6, 5, &[sq(1, 1), sq(6, 1)], &[sq(3, 5)]).unwrap();

    let mut ordered = generate_ordered_moves(&pos, Side::White);
    let mut plain = pos.legal_moves(Side::White);

    assert_eq!(ordered.len(), plain.len());
    ordered.sort_by_key(|m| m.coords());
    plain.sort_by_key(|m| m.coords());
    assert_eq!(ordered, plain);
}

#[test]
fn test_center_moves_first() {
    let pos = Position::new(5, 5, &[sq(1, 1)], &[sq(5, 1)]).unwrap();
    let moves = generate_ordered_moves(&pos, Side::White);

    assert_eq!(moves[0], Move::new(sq(1, 1), sq(3, 3)), "Board centre comes first");
    for pair in moves.windows(2) {
        assert!(quick_move_score(&pos, pair[0]) >= quick_move_score(&pos, pair[1]));
    }
}

#[test]
fn test_open_neighbourhood_breaks_ties() {
    // (2, 2) and (3, 3) are equally central on a 4x4 board
    let mut pos = Position::new(4, 4, &[sq(1, 1)], &[sq(4, 1)]).unwrap();
    burn_all(&mut pos, &[(2, 3), (1, 3)]);

    let near = Move::new(sq(1, 1), sq(2, 2));
    let far = Move::new(sq(1, 1), sq(3, 3));

    assert!(quick_move_score(&pos, far) > quick_move_score(&pos, near));
}

#[test]
fn test_closer_to_center_always_wins() {
    // A central cell with one open neighbour still beats an edge cell with more
    let mut pos = Position::new(5, 5, &[sq(1, 3)], &[sq(5, 5)]).unwrap();
    burn_all(&mut pos, &[(2, 2), (2, 4), (3, 2), (3, 4), (4, 2), (4, 3), (4, 4)]);

    let center = Move::new(sq(1, 3), sq(3, 3));
    let edge = Move::new(sq(1, 3), sq(1, 4));

    assert!(quick_move_score(&pos, center) > quick_move_score(&pos, edge));
}

#[test]
fn test_ordering_is_stable() {
    // Mirror-image destinations score the same and keep generation order
    let pos = Position::new(3, 3, &[sq(2, 1)], &[sq(2, 3)]).unwrap();
    let generated = pos.legal_moves(Side::White);
    let mut ordered = generated.clone();

    order_moves(&pos, &mut ordered);

    let west = Move::new(sq(2, 1), sq(1, 1));
    let east = Move::new(sq(2, 1), sq(3, 1));
    let pos_of = |list: &[Move], m: Move| list.iter().position(|&x| x == m).unwrap();
    assert_eq!(
        pos_of(&generated, east) < pos_of(&generated, west),
        pos_of(&ordered, east) < pos_of(&ordered, west)
    );
    assert_eq!(ordered[0], Move::new(sq(2, 1), sq(2, 2)));
}
