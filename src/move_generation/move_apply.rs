//! In-place move application and exact undo.
//!
//! `apply_move` mutates the position and returns the minimal inverse data;
//! `undo_move` restores the pre-apply state bit for bit from that record and
//! the move alone. Legality is the generator's responsibility: applying a
//! move that was not generated for this exact state is a precondition
//! violation, asserted rather than re-validated.

use crate::board::chess_types::*;
use crate::board::position::PositionState;
use crate::board::undo_record::UndoRecord;
use crate::move_generation::move_record::Move;

pub fn apply_move(state: &mut PositionState, mv: &Move) -> UndoRecord {
    let mover = state.side_to_move;
    let piece = state
        .piece_at(mv.from)
        .expect("apply_move precondition: origin square holds the moving piece");
    debug_assert_eq!(piece.color, mover, "moving piece must belong to the side to move");

    let mut undo = UndoRecord {
        captured: None,
        prev_castling_rights: state.castling_rights,
        prev_en_passant_square: state.en_passant_square,
        prev_halfmove_clock: state.halfmove_clock,
    };

    if mv.is_en_passant() {
        // The captured pawn sits behind the target square, not on it.
        let behind = match mover {
            Color::White => 1i8,
            Color::Black => -1i8,
        };
        let captured_square = mv
            .to
            .offset(behind, 0)
            .expect("en-passant capture square is always on the board");
        undo.captured = state.take_piece(captured_square).map(|p| (p, captured_square));
        debug_assert!(undo.captured.is_some(), "en-passant target must shadow a pawn");
    } else if mv.is_capture() {
        undo.captured = state.take_piece(mv.to).map(|p| (p, mv.to));
        debug_assert!(undo.captured.is_some(), "capture flag requires an occupied target");
    }

    state.set_piece(mv.from, None);
    let placed = match mv.promotion {
        Some(kind) => Piece::new(mover, kind),
        None => piece,
    };
    state.set_piece(mv.to, Some(placed));

    if mv.is_castling() && piece.kind == PieceType::King {
        let row = mv.from.row;
        if mv.to.col == 6 {
            relocate_rook(state, Square::new(row, 7), Square::new(row, 5));
        } else if mv.to.col == 2 {
            relocate_rook(state, Square::new(row, 0), Square::new(row, 3));
        }
    }

    update_castling_rights(state, mover, mv.from, mv.to, piece.kind);

    state.en_passant_square = if mv.is_double_pawn_push() {
        // The square passed over.
        Some(Square::new((mv.from.row + mv.to.row) / 2, mv.from.col))
    } else {
        None
    };

    if piece.kind == PieceType::Pawn || mv.is_capture() {
        state.halfmove_clock = 0;
    } else {
        state.halfmove_clock = state.halfmove_clock.saturating_add(1);
    }
    if mover == Color::Black {
        state.fullmove_number = state.fullmove_number.saturating_add(1);
    }

    state.side_to_move = mover.opposite();
    undo
}

pub fn undo_move(state: &mut PositionState, mv: &Move, undo: &UndoRecord) {
    let mover = state.side_to_move.opposite();

    let placed = state
        .take_piece(mv.to)
        .expect("undo_move precondition: target square holds the moved piece");
    let original = match mv.promotion {
        Some(_) => Piece::new(mover, PieceType::Pawn),
        None => placed,
    };
    state.set_piece(mv.from, Some(original));

    if let Some((piece, square)) = undo.captured {
        state.set_piece(square, Some(piece));
    }

    if mv.is_castling() {
        let row = mv.from.row;
        if mv.to.col == 6 {
            relocate_rook(state, Square::new(row, 5), Square::new(row, 7));
        } else if mv.to.col == 2 {
            relocate_rook(state, Square::new(row, 3), Square::new(row, 0));
        }
    }

    state.castling_rights = undo.prev_castling_rights;
    state.en_passant_square = undo.prev_en_passant_square;
    state.halfmove_clock = undo.prev_halfmove_clock;
    if mover == Color::Black {
        state.fullmove_number = state.fullmove_number.saturating_sub(1);
    }
    state.side_to_move = mover;
}

fn relocate_rook(state: &mut PositionState, from: Square, to: Square) {
    let rook = state.take_piece(from);
    debug_assert!(
        matches!(rook, Some(p) if p.kind == PieceType::Rook),
        "castling relocates a rook from its home square"
    );
    state.set_piece(to, rook);
}

fn update_castling_rights(
    state: &mut PositionState,
    mover: Color,
    from: Square,
    to: Square,
    moved_kind: PieceType,
) {
    if moved_kind == PieceType::King {
        state.castling_rights &= match mover {
            Color::White => !(CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE),
            Color::Black => !(CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE),
        };
    }

    if moved_kind == PieceType::Rook {
        state.castling_rights &= !rook_corner_right(from);
    }
    // Capturing a rook on its home corner also removes the right.
    state.castling_rights &= !rook_corner_right(to);
}

#[inline]
fn rook_corner_right(square: Square) -> CastlingRights {
    match (square.row, square.col) {
        (7, 0) => CASTLE_WHITE_QUEENSIDE,
        (7, 7) => CASTLE_WHITE_KINGSIDE,
        (0, 0) => CASTLE_BLACK_QUEENSIDE,
        (0, 7) => CASTLE_BLACK_KINGSIDE,
        _ => 0,
    }
}
