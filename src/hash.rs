//! Shape-canonical board digests.
//!
//! Two boards that differ only by a permutation of same-shape pieces hash
//! identically, which is what keeps the search space tractable. Both the
//! shape digest and the board digest are FNV-1a; the board digest frames
//! every shape group with `S<shape>:` and every member with `P` so that one
//! group of two pieces can never collide with two groups of one.

use std::collections::BTreeMap;
use std::hash::Hasher;

use fnv::FnvHasher;

use crate::board::Board;
use crate::data::Pos;

/// Positions translated so min-row = 0 and min-col = 0, sorted row-major.
pub fn normalized_shape(positions: &[Pos]) -> Vec<Pos> {
    let min_r = positions.iter().map(|p| p.r).min().unwrap_or(0);
    let min_c = positions.iter().map(|p| p.c).min().unwrap_or(0);
    let mut shape: Vec<Pos> = positions
        .iter()
        .map(|p| Pos::new(p.r - min_r, p.c - min_c))
        .collect();
    shape.sort();
    shape
}

/// 64-bit digest of a piece's normalized shape.
pub fn shape_digest(positions: &[Pos]) -> u64 {
    let mut hasher = FnvHasher::default();
    write_positions(&mut hasher, &normalized_shape(positions));
    hasher.finish()
}

/// 64-bit digest of the whole board, canonical under permutation of
/// same-shape pieces.
pub fn board_digest(board: &Board) -> u64 {
    // group absolute position sets by shape; BTreeMap gives ascending
    // shape-digest order for free
    let mut groups: BTreeMap<u64, Vec<&[Pos]>> = BTreeMap::new();
    for piece in board.pieces().values() {
        groups
            .entry(shape_digest(&piece.positions))
            .or_default()
            .push(&piece.positions);
    }

    let mut hasher = FnvHasher::default();
    for (shape, mut members) in groups {
        // piece positions are stored sorted, so slice comparison is the
        // lexicographic order over position sets
        members.sort();
        hasher.write(format!("S{}:", shape).as_bytes());
        for positions in members {
            hasher.write(b"P");
            write_positions(&mut hasher, positions);
        }
    }
    hasher.finish()
}

fn write_positions(hasher: &mut FnvHasher, positions: &[Pos]) {
    for pos in positions {
        hasher.write(format!("{},{};", pos.r, pos.c).as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Pos;

    #[test]
    fn shapes_ignore_translation() {
        let l_shape = [Pos::new(2, 3), Pos::new(3, 3), Pos::new(3, 4)];
        let translated = [Pos::new(5, 1), Pos::new(6, 1), Pos::new(6, 2)];
        let mirrored = [Pos::new(2, 4), Pos::new(3, 3), Pos::new(3, 4)];

        assert_eq!(shape_digest(&l_shape), shape_digest(&translated));
        assert_ne!(shape_digest(&l_shape), shape_digest(&mirrored));
    }

    #[test]
    fn shape_is_order_independent() {
        let a = [Pos::new(0, 0), Pos::new(0, 1)];
        let b = [Pos::new(0, 1), Pos::new(0, 0)];
        assert_eq!(shape_digest(&a), shape_digest(&b));
    }

    #[test]
    fn swapping_same_shape_pieces_collapses() {
        let board: Board = "
OOOOO
Ob0lO
O0m0O
OOXOO
"
        .parse()
        .unwrap();
        let swapped: Board = "
OOOOO
Ob0mO
O0l0O
OOXOO
"
        .parse()
        .unwrap();

        assert_eq!(board_digest(&board), board_digest(&swapped));
    }

    #[test]
    fn moving_a_piece_changes_the_digest() {
        let board: Board = "
OOOOO
Ob0lO
O0m0O
OOXOO
"
        .parse()
        .unwrap();
        let moved: Board = "
OOOOO
Ob00O
O0mlO
OOXOO
"
        .parse()
        .unwrap();

        assert_ne!(board_digest(&board), board_digest(&moved));
    }

    #[test]
    fn swapping_different_shapes_does_not_collapse() {
        let board: Board = "
OOOOOO
Obb0lO
O0000O
OOXXOO
"
        .parse()
        .unwrap();
        let swapped: Board = "
OOOOOO
Ob0l0O
Ob000O
OOXXOO
"
        .parse()
        .unwrap();
        // not even comparable states, just make sure distinct layouts of
        // distinct shapes do not accidentally fold together
        assert_ne!(board_digest(&board), board_digest(&swapped));
    }

    #[test]
    fn target_joins_its_shape_group() {
        let board: Board = "
OOOOO
Ob0lO
O000O
OOXOO
"
        .parse()
        .unwrap();
        let swapped: Board = "
OOOOO
Ol0bO
O000O
OOXOO
"
        .parse()
        .unwrap();
        // the target is grouped like any other piece, so swapping it with
        // a same-shape piece collapses too
        assert_eq!(board_digest(&board), board_digest(&swapped));
    }

    #[test]
    fn digest_is_deterministic_across_runs() {
        let board: Board = "
OOOOO
Ob0lO
O0m0O
OOXOO
"
        .parse()
        .unwrap();
        assert_eq!(board_digest(&board), board_digest(&board.clone()));
    }
}
