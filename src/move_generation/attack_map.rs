//! Square-attack queries.
//!
//! `square_attacked` is the single source of truth for check detection and
//! castling-path safety; `attackers_of` enumerates the attacking pieces and
//! feeds perft's check classification. Both re-derive attackers by casting
//! the per-piece offsets and rays outward from the queried square.

use crate::board::chess_types::*;
use crate::board::position::PositionState;

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Locate the king of `color`. Reachable legal states always have one.
pub fn king_square(state: &PositionState, color: Color) -> Option<Square> {
    for row in 0..8u8 {
        for col in 0..8u8 {
            let square = Square::new(row, col);
            if state.piece_at(square) == Some(Piece::new(color, PieceType::King)) {
                return Some(square);
            }
        }
    }
    None
}

#[inline]
pub fn is_king_in_check(state: &PositionState, color: Color) -> bool {
    match king_square(state, color) {
        Some(square) => square_attacked(state, square, color.opposite()),
        None => false,
    }
}

/// Is `square` attacked by any piece of `attacker`?
pub fn square_attacked(state: &PositionState, square: Square, attacker: Color) -> bool {
    // A pawn of `attacker` attacks this square from the row it would
    // capture from: row + 1 for White (pawns move toward row 0), row - 1
    // for Black.
    let pawn_row = match attacker {
        Color::White => 1i8,
        Color::Black => -1i8,
    };
    for d_col in [-1i8, 1i8] {
        if let Some(from) = square.offset(pawn_row, d_col) {
            if state.piece_at(from) == Some(Piece::new(attacker, PieceType::Pawn)) {
                return true;
            }
        }
    }

    for (d_row, d_col) in KNIGHT_OFFSETS {
        if let Some(from) = square.offset(d_row, d_col) {
            if state.piece_at(from) == Some(Piece::new(attacker, PieceType::Knight)) {
                return true;
            }
        }
    }

    for (d_row, d_col) in KING_OFFSETS {
        if let Some(from) = square.offset(d_row, d_col) {
            if state.piece_at(from) == Some(Piece::new(attacker, PieceType::King)) {
                return true;
            }
        }
    }

    if ray_attacker(state, square, attacker, &BISHOP_DIRECTIONS, PieceType::Bishop).is_some() {
        return true;
    }
    if ray_attacker(state, square, attacker, &ROOK_DIRECTIONS, PieceType::Rook).is_some() {
        return true;
    }

    false
}

/// Every piece of `attacker` currently attacking `square`.
pub fn attackers_of(state: &PositionState, square: Square, attacker: Color) -> Vec<(Square, PieceType)> {
    let mut attackers = Vec::new();

    let pawn_row = match attacker {
        Color::White => 1i8,
        Color::Black => -1i8,
    };
    for d_col in [-1i8, 1i8] {
        if let Some(from) = square.offset(pawn_row, d_col) {
            if state.piece_at(from) == Some(Piece::new(attacker, PieceType::Pawn)) {
                attackers.push((from, PieceType::Pawn));
            }
        }
    }

    for (d_row, d_col) in KNIGHT_OFFSETS {
        if let Some(from) = square.offset(d_row, d_col) {
            if state.piece_at(from) == Some(Piece::new(attacker, PieceType::Knight)) {
                attackers.push((from, PieceType::Knight));
            }
        }
    }

    for (d_row, d_col) in KING_OFFSETS {
        if let Some(from) = square.offset(d_row, d_col) {
            if state.piece_at(from) == Some(Piece::new(attacker, PieceType::King)) {
                attackers.push((from, PieceType::King));
            }
        }
    }

    collect_ray_attackers(state, square, attacker, &BISHOP_DIRECTIONS, PieceType::Bishop, &mut attackers);
    collect_ray_attackers(state, square, attacker, &ROOK_DIRECTIONS, PieceType::Rook, &mut attackers);

    attackers
}

/// Walk `directions` outward from `square`; the first piece on each ray
/// attacks it when that piece is an `attacker` queen or `slider`.
fn ray_attacker(
    state: &PositionState,
    square: Square,
    attacker: Color,
    directions: &[(i8, i8); 4],
    slider: PieceType,
) -> Option<(Square, PieceType)> {
    for &(d_row, d_col) in directions {
        let mut current = square;
        while let Some(next) = current.offset(d_row, d_col) {
            if let Some(piece) = state.piece_at(next) {
                if piece.color == attacker && (piece.kind == slider || piece.kind == PieceType::Queen) {
                    return Some((next, piece.kind));
                }
                break;
            }
            current = next;
        }
    }
    None
}

fn collect_ray_attackers(
    state: &PositionState,
    square: Square,
    attacker: Color,
    directions: &[(i8, i8); 4],
    slider: PieceType,
    out: &mut Vec<(Square, PieceType)>,
) {
    for &(d_row, d_col) in directions {
        let mut current = square;
        while let Some(next) = current.offset(d_row, d_col) {
            if let Some(piece) = state.piece_at(next) {
                if piece.color == attacker && (piece.kind == slider || piece.kind == PieceType::Queen) {
                    out.push((next, piece.kind));
                }
                break;
            }
            current = next;
        }
    }
}
