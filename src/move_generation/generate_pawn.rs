//! Pseudo-legal pawn move generation.
//!
//! Single push, double push from the starting rank, diagonal captures onto
//! enemy pieces or the en-passant target, and promotion expansion (one move
//! per promotable kind) on the last rank.

use crate::board::chess_types::*;
use crate::board::position::PositionState;
use crate::move_generation::move_record::{
    Move, FLAG_CAPTURE, FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT,
};

pub fn generate_pawn_moves(state: &PositionState, out: &mut Vec<Move>) {
    let side = state.side_to_move;
    // White pawns move toward row 0 (rank 8), Black toward row 7.
    let (dir, start_row, promo_row) = match side {
        Color::White => (-1i8, 6u8, 0u8),
        Color::Black => (1i8, 1u8, 7u8),
    };

    for row in 0..8u8 {
        for col in 0..8u8 {
            let from = Square::new(row, col);
            if state.piece_at(from) != Some(Piece::new(side, PieceType::Pawn)) {
                continue;
            }

            if let Some(to) = from.offset(dir, 0) {
                if state.piece_at(to).is_none() {
                    push_pawn_move(out, from, to, promo_row, 0);

                    if row == start_row {
                        // Both the intervening and target squares must be empty.
                        if let Some(two) = from.offset(2 * dir, 0) {
                            if state.piece_at(two).is_none() {
                                out.push(Move::new(from, two, FLAG_DOUBLE_PAWN_PUSH));
                            }
                        }
                    }
                }
            }

            for d_col in [-1i8, 1i8] {
                let Some(to) = from.offset(dir, d_col) else {
                    continue;
                };
                match state.piece_at(to) {
                    Some(piece) if piece.color != side => {
                        push_pawn_move(out, from, to, promo_row, FLAG_CAPTURE);
                    }
                    Some(_) => {}
                    None => {
                        if state.en_passant_square == Some(to) {
                            out.push(Move::new(from, to, FLAG_CAPTURE | FLAG_EN_PASSANT));
                        }
                    }
                }
            }
        }
    }
}

#[inline]
fn push_pawn_move(out: &mut Vec<Move>, from: Square, to: Square, promo_row: u8, flags: u8) {
    if to.row == promo_row {
        for promo in PROMOTION_TYPES {
            out.push(Move::promoting(from, to, promo, flags));
        }
    } else {
        out.push(Move::new(from, to, flags));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_pawns_have_single_and_double_pushes() {
        let state = PositionState::new_game();
        let mut moves = Vec::new();
        generate_pawn_moves(&state, &mut moves);
        assert_eq!(moves.len(), 16);
        assert_eq!(moves.iter().filter(|m| m.is_double_pawn_push()).count(), 8);
    }

    #[test]
    fn double_push_requires_empty_intervening_square() {
        let state = PositionState::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1")
            .expect("FEN should parse");
        let mut moves = Vec::new();
        generate_pawn_moves(&state, &mut moves);
        assert!(moves.is_empty());
    }

    #[test]
    fn promotion_push_expands_to_four_moves() {
        let state = PositionState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1")
            .expect("FEN should parse");
        let mut moves = Vec::new();
        generate_pawn_moves(&state, &mut moves);
        assert_eq!(moves.len(), 4);
        assert!(moves.iter().all(|m| m.is_promotion()));
        assert!(moves.iter().any(|m| m.promotion == Some(PieceType::Queen)));
        assert!(moves.iter().any(|m| m.promotion == Some(PieceType::Knight)));
    }

    #[test]
    fn en_passant_capture_is_generated_onto_the_target_square() {
        // White pawn e5, Black just played d7d5.
        let state = PositionState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1")
            .expect("FEN should parse");
        let mut moves = Vec::new();
        generate_pawn_moves(&state, &mut moves);
        let ep: Vec<_> = moves.iter().filter(|m| m.is_en_passant()).collect();
        assert_eq!(ep.len(), 1);
        assert_eq!(ep[0].to, Square::new(2, 3));
        assert!(ep[0].is_capture());
    }
}
