//! Pseudo-legal king move generation, including castling.
//!
//! Castling requires the relevant rights flag, the rook on its home square,
//! empty squares between king and rook, and an unattacked king origin,
//! transit, and destination. The rights flags themselves are maintained by
//! the move applier.

use crate::board::chess_types::*;
use crate::board::position::PositionState;
use crate::move_generation::attack_map::{square_attacked, KING_OFFSETS};
use crate::move_generation::move_record::{Move, FLAG_CAPTURE, FLAG_CASTLING};

pub fn generate_king_moves(state: &PositionState, out: &mut Vec<Move>) {
    let side = state.side_to_move;

    for row in 0..8u8 {
        for col in 0..8u8 {
            let from = Square::new(row, col);
            if state.piece_at(from) != Some(Piece::new(side, PieceType::King)) {
                continue;
            }

            for (d_row, d_col) in KING_OFFSETS {
                let Some(to) = from.offset(d_row, d_col) else {
                    continue;
                };
                match state.piece_at(to) {
                    None => out.push(Move::new(from, to, 0)),
                    Some(piece) if piece.color != side => {
                        out.push(Move::new(from, to, FLAG_CAPTURE))
                    }
                    Some(_) => {}
                }
            }

            generate_castling_moves(state, out, from);
            return;
        }
    }
}

fn generate_castling_moves(state: &PositionState, out: &mut Vec<Move>, king_from: Square) {
    let side = state.side_to_move;
    let enemy = side.opposite();
    let home_row = match side {
        Color::White => 7u8,
        Color::Black => 0u8,
    };
    let (kingside_right, queenside_right) = match side {
        Color::White => (CASTLE_WHITE_KINGSIDE, CASTLE_WHITE_QUEENSIDE),
        Color::Black => (CASTLE_BLACK_KINGSIDE, CASTLE_BLACK_QUEENSIDE),
    };

    if king_from != Square::new(home_row, 4) {
        return;
    }
    // Cannot castle out of check.
    if square_attacked(state, king_from, enemy) {
        return;
    }

    let rook = Some(Piece::new(side, PieceType::Rook));

    if state.castling_rights & kingside_right != 0
        && state.piece_at(Square::new(home_row, 7)) == rook
        && state.piece_at(Square::new(home_row, 5)).is_none()
        && state.piece_at(Square::new(home_row, 6)).is_none()
        && !square_attacked(state, Square::new(home_row, 5), enemy)
        && !square_attacked(state, Square::new(home_row, 6), enemy)
    {
        out.push(Move::new(king_from, Square::new(home_row, 6), FLAG_CASTLING));
    }

    if state.castling_rights & queenside_right != 0
        && state.piece_at(Square::new(home_row, 0)) == rook
        && state.piece_at(Square::new(home_row, 1)).is_none()
        && state.piece_at(Square::new(home_row, 2)).is_none()
        && state.piece_at(Square::new(home_row, 3)).is_none()
        && !square_attacked(state, Square::new(home_row, 3), enemy)
        && !square_attacked(state, Square::new(home_row, 2), enemy)
    {
        out.push(Move::new(king_from, Square::new(home_row, 2), FLAG_CASTLING));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn castles(state: &PositionState) -> Vec<Move> {
        let mut moves = Vec::new();
        generate_king_moves(state, &mut moves);
        moves.into_iter().filter(|m| m.is_castling()).collect()
    }

    #[test]
    fn both_castles_generated_on_an_open_back_rank() {
        let state = PositionState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        let moves = castles(&state);
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().any(|m| m.to == Square::new(7, 6)));
        assert!(moves.iter().any(|m| m.to == Square::new(7, 2)));
    }

    #[test]
    fn castling_blocked_by_a_piece_between_king_and_rook() {
        let state = PositionState::from_fen("r3k2r/8/8/8/8/8/8/R2QK2R w KQkq - 0 1")
            .expect("FEN should parse");
        let moves = castles(&state);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].to, Square::new(7, 6));
    }

    #[test]
    fn castling_suppressed_when_transit_square_is_attacked() {
        // Black rook on f8 covers f1, ruling out kingside castling.
        let state = PositionState::from_fen("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1")
            .expect("FEN should parse");
        let moves = castles(&state);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].to, Square::new(7, 2));
    }

    #[test]
    fn no_castling_while_in_check() {
        let state = PositionState::from_fen("4k3/8/8/8/8/8/4r3/R3K2R w KQ - 0 1")
            .expect("FEN should parse");
        assert!(castles(&state).is_empty());
    }

    #[test]
    fn no_castling_without_the_rights_flag() {
        let state = PositionState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w kq - 0 1")
            .expect("FEN should parse");
        assert!(castles(&state).is_empty());
    }
}
