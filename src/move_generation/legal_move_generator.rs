//! Legal move generation.
//!
//! Runs the piece-wise pseudo-legal generators, then keeps each candidate
//! only if the mover's own king is not attacked after applying it. The probe
//! runs on one internal clone with apply/undo, so the call has no side
//! effects on the input state. A position with zero legal moves is either
//! checkmate or stalemate; callers distinguish the two via the attack query.

use crate::board::position::PositionState;
use crate::move_generation::attack_map::is_king_in_check;
use crate::move_generation::generate_king::generate_king_moves;
use crate::move_generation::generate_knight::generate_knight_moves;
use crate::move_generation::generate_pawn::generate_pawn_moves;
use crate::move_generation::generate_sliders::{
    generate_bishop_moves, generate_queen_moves, generate_rook_moves,
};
use crate::move_generation::move_apply::{apply_move, undo_move};
use crate::move_generation::move_record::Move;

pub fn legal_moves(state: &PositionState) -> Vec<Move> {
    let mut pseudo = Vec::<Move>::with_capacity(64);
    generate_pawn_moves(state, &mut pseudo);
    generate_knight_moves(state, &mut pseudo);
    generate_bishop_moves(state, &mut pseudo);
    generate_rook_moves(state, &mut pseudo);
    generate_queen_moves(state, &mut pseudo);
    generate_king_moves(state, &mut pseudo);

    let mover = state.side_to_move;
    let mut probe = state.clone();
    let mut legal = Vec::<Move>::with_capacity(pseudo.len());

    for mv in pseudo {
        let undo = apply_move(&mut probe, &mv);
        if !is_king_in_check(&probe, mover) {
            legal.push(mv);
        }
        undo_move(&mut probe, &mv, &undo);
    }

    legal
}
