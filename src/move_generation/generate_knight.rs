//! Pseudo-legal knight move generation.

use crate::board::chess_types::*;
use crate::board::position::PositionState;
use crate::move_generation::attack_map::KNIGHT_OFFSETS;
use crate::move_generation::move_record::{Move, FLAG_CAPTURE};

pub fn generate_knight_moves(state: &PositionState, out: &mut Vec<Move>) {
    let side = state.side_to_move;

    for row in 0..8u8 {
        for col in 0..8u8 {
            let from = Square::new(row, col);
            if state.piece_at(from) != Some(Piece::new(side, PieceType::Knight)) {
                continue;
            }

            for (d_row, d_col) in KNIGHT_OFFSETS {
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
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_knights_have_four_moves() {
        let state = PositionState::new_game();
        let mut moves = Vec::new();
        generate_knight_moves(&state, &mut moves);
        assert_eq!(moves.len(), 4);
        assert!(moves.iter().all(|m| !m.is_capture()));
    }

    #[test]
    fn central_knight_reaches_all_eight_targets() {
        let state = PositionState::from_fen("4k3/8/8/8/3N4/8/8/4K3 w - - 0 1")
            .expect("FEN should parse");
        let mut moves = Vec::new();
        generate_knight_moves(&state, &mut moves);
        assert_eq!(moves.len(), 8);
    }
}
