//! Perft: the correctness oracle for generation + apply/undo.
//!
//! Walks the legal move tree to a fixed depth, classifying every transition
//! (capture, en passant, castle, promotion, check, discovery check, double
//! check, checkmate) into per-depth counters. The node counts for well-known
//! positions are published constants that any conforming implementation must
//! reproduce exactly.

use crate::board::chess_types::{PieceType, Square};
use crate::board::position::PositionState;
use crate::move_generation::attack_map::{attackers_of, king_square};
use crate::move_generation::legal_move_generator::legal_moves;
use crate::move_generation::move_apply::{apply_move, undo_move};
use crate::move_generation::move_record::Move;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub discovery_checks: u64,
    pub double_checks: u64,
    pub checkmates: u64,
}

/// Per-depth counters; depth 0 is the root node itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerftResult {
    per_depth: Vec<PerftCounts>,
}

impl PerftResult {
    /// Counters for one depth. Panics when `depth` exceeds the walked depth.
    #[inline]
    pub fn at(&self, depth: u8) -> PerftCounts {
        self.per_depth[depth as usize]
    }

    #[inline]
    pub fn max_depth(&self) -> u8 {
        (self.per_depth.len() - 1) as u8
    }
}

pub fn perft(state: &PositionState, depth: u8) -> PerftResult {
    let mut per_depth = vec![PerftCounts::default(); depth as usize + 1];
    per_depth[0].nodes = 1;

    if depth > 0 {
        let mut probe = state.clone();
        perft_recurse(&mut probe, depth, 1, &mut per_depth);
    }

    PerftResult { per_depth }
}

fn perft_recurse(
    state: &mut PositionState,
    max_depth: u8,
    current_depth: u8,
    per_depth: &mut [PerftCounts],
) {
    for mv in legal_moves(state) {
        let mover = state.side_to_move;
        let undo = apply_move(state, &mv);

        {
            let counts = &mut per_depth[current_depth as usize];
            counts.nodes += 1;
            if mv.is_capture() {
                counts.captures += 1;
            }
            if mv.is_en_passant() {
                counts.en_passant += 1;
            }
            if mv.is_castling() {
                counts.castles += 1;
            }
            if mv.is_promotion() {
                counts.promotions += 1;
            }
        }

        classify_check(state, &mv, &mut per_depth[current_depth as usize]);

        if current_depth < max_depth {
            perft_recurse(state, max_depth, current_depth + 1, per_depth);
        }

        undo_move(state, &mv, &undo);
    }
}

/// Classify the check delivered by an already-applied move, if any.
fn classify_check(state: &PositionState, mv: &Move, counts: &mut PerftCounts) {
    let defender = state.side_to_move;
    let attacker = defender.opposite();
    let Some(defender_king) = king_square(state, defender) else {
        return;
    };

    let checkers = attackers_of(state, defender_king, attacker);
    if checkers.is_empty() {
        return;
    }

    counts.checks += 1;

    let kind_after = mv
        .promotion
        .unwrap_or_else(|| moved_kind(state, mv.to));
    let moved_piece_is_checker = checkers
        .iter()
        .any(|(square, kind)| *square == mv.to && *kind == kind_after);

    if checkers.len() >= 2 {
        counts.double_checks += 1;
    } else if !moved_piece_is_checker {
        let (checker_square, checker_kind) = checkers[0];
        if is_slider(checker_kind) && is_square_between(mv.from, checker_square, defender_king) {
            counts.discovery_checks += 1;
        }
    }

    if legal_moves(state).is_empty() {
        counts.checkmates += 1;
    }
}

#[inline]
fn moved_kind(state: &PositionState, to: Square) -> PieceType {
    state
        .piece_at(to)
        .expect("destination square holds the moved piece")
        .kind
}

#[inline]
fn is_slider(kind: PieceType) -> bool {
    matches!(kind, PieceType::Bishop | PieceType::Rook | PieceType::Queen)
}

/// True when `mid` lies strictly between `a` and `b` on a shared rank, file,
/// or diagonal.
fn is_square_between(mid: Square, a: Square, b: Square) -> bool {
    if mid == a || mid == b {
        return false;
    }

    let d_row = b.row as i8 - a.row as i8;
    let d_col = b.col as i8 - a.col as i8;
    if !(d_row == 0 || d_col == 0 || d_row.abs() == d_col.abs()) {
        return false;
    }

    let step_row = d_row.signum();
    let step_col = d_col.signum();
    let mut row = a.row as i8 + step_row;
    let mut col = a.col as i8 + step_col;
    while (row, col) != (b.row as i8, b.col as i8) {
        if (row, col) == (mid.row as i8, mid.col as i8) {
            return true;
        }
        row += step_row;
        col += step_col;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIWIPETE_FEN: &str =
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

    #[test]
    fn depth_zero_counts_a_single_node() {
        let state = PositionState::new_game();
        let result = perft(&state, 0);
        assert_eq!(result.at(0).nodes, 1);
        assert_eq!(result.max_depth(), 0);
    }

    #[test]
    fn startpos_shallow_node_counts_match_published_tables() {
        let state = PositionState::new_game();
        let result = perft(&state, 3);
        assert_eq!(result.at(1).nodes, 20);
        assert_eq!(result.at(2).nodes, 400);
        assert_eq!(result.at(3).nodes, 8_902);
        assert_eq!(result.at(3).captures, 34);
        assert_eq!(result.at(3).checks, 12);
        assert_eq!(result.at(3).en_passant, 0);
        assert_eq!(result.at(3).castles, 0);
        assert_eq!(result.at(3).double_checks, 0);
        assert_eq!(result.at(3).checkmates, 0);
    }

    #[test]
    fn startpos_depth_four_counts_match_published_tables() {
        let state = PositionState::new_game();
        let result = perft(&state, 4);
        assert_eq!(result.at(4).nodes, 197_281);
        assert_eq!(result.at(4).captures, 1_576);
        assert_eq!(result.at(4).checks, 469);
        assert_eq!(result.at(4).checkmates, 8);
    }

    #[test]
    fn kiwipete_depth_one_classification_matches_published_tables() {
        let state = PositionState::from_fen(KIWIPETE_FEN).expect("FEN should parse");
        let result = perft(&state, 1);
        assert_eq!(result.at(1).nodes, 48);
        assert_eq!(result.at(1).captures, 8);
        assert_eq!(result.at(1).castles, 2);
        assert_eq!(result.at(1).en_passant, 0);
        assert_eq!(result.at(1).promotions, 0);
        assert_eq!(result.at(1).checks, 0);
    }

    #[test]
    fn kiwipete_depth_three_node_count_matches_published_tables() {
        let state = PositionState::from_fen(KIWIPETE_FEN).expect("FEN should parse");
        let result = perft(&state, 3);
        assert_eq!(result.at(2).nodes, 2_039);
        assert_eq!(result.at(3).nodes, 97_862);
        assert_eq!(result.at(2).en_passant, 1);
        assert_eq!(result.at(2).castles, 91);
        assert_eq!(result.at(3).checkmates, 1);
    }

    #[test]
    fn between_test_requires_alignment() {
        let a = Square::new(4, 4);
        let b = Square::new(4, 0);
        assert!(is_square_between(Square::new(4, 2), a, b));
        assert!(!is_square_between(Square::new(3, 2), a, b));
        assert!(!is_square_between(a, a, b));
    }
}
