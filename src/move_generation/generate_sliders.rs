//! Pseudo-legal slider move generation (bishop, rook, queen).
//!
//! Ray walks continue until blocked; the blocking square is included only
//! when enemy-occupied.

use crate::board::chess_types::*;
use crate::board::position::PositionState;
use crate::move_generation::attack_map::{BISHOP_DIRECTIONS, ROOK_DIRECTIONS};
use crate::move_generation::move_record::{Move, FLAG_CAPTURE};

pub fn generate_bishop_moves(state: &PositionState, out: &mut Vec<Move>) {
    generate_ray_moves(state, out, PieceType::Bishop, &BISHOP_DIRECTIONS);
}

pub fn generate_rook_moves(state: &PositionState, out: &mut Vec<Move>) {
    generate_ray_moves(state, out, PieceType::Rook, &ROOK_DIRECTIONS);
}

pub fn generate_queen_moves(state: &PositionState, out: &mut Vec<Move>) {
    generate_ray_moves(state, out, PieceType::Queen, &BISHOP_DIRECTIONS);
    generate_ray_moves(state, out, PieceType::Queen, &ROOK_DIRECTIONS);
}

fn generate_ray_moves(
    state: &PositionState,
    out: &mut Vec<Move>,
    kind: PieceType,
    directions: &[(i8, i8); 4],
) {
    let side = state.side_to_move;

    for row in 0..8u8 {
        for col in 0..8u8 {
            let from = Square::new(row, col);
            if state.piece_at(from) != Some(Piece::new(side, kind)) {
                continue;
            }

            for &(d_row, d_col) in directions {
                let mut current = from;
                while let Some(to) = current.offset(d_row, d_col) {
                    match state.piece_at(to) {
                        None => {
                            out.push(Move::new(from, to, 0));
                            current = to;
                        }
                        Some(piece) => {
                            if piece.color != side {
                                out.push(Move::new(from, to, FLAG_CAPTURE));
                            }
                            break;
                        }
                    }
                }
            }
        }
    }
}
