//! Static board evaluation.
//!
//! The score is signed from White's perspective: for every occupied square,
//! material value times the positional weight of that square, times the
//! color sign. Positional tables are read directly by row for White and with
//! the row mirrored for Black, so one table serves both sides. The tables
//! are positive weights around a neutral 10, narrowing as piece value grows
//! so material stays the dominant term of the product.

use crate::board::chess_types::*;
use crate::board::position::PositionState;

/// Sentinel magnitude for mate; larger than any reachable material total.
pub const MATE_SCORE: i32 = 1_000_000;

/// Neutral positional weight; a square scoring 10 adds exactly the piece's
/// material value times ten.
pub const NEUTRAL_WEIGHT: i32 = 10;

#[inline]
pub const fn piece_value(kind: PieceType) -> i32 {
    match kind {
        PieceType::Pawn => 100,
        PieceType::Knight => 350,
        PieceType::Bishop => 325,
        PieceType::Rook => 500,
        PieceType::Queen => 975,
        PieceType::King => 0,
    }
}

// Tables are laid out `[row][col]` with row 0 = rank 8; White indexes rows
// directly, Black mirrored. White pawns therefore advance toward row 0.

const PAWN_TABLE: [[i32; 8]; 8] = [
    [10, 10, 10, 10, 10, 10, 10, 10],
    [16, 16, 16, 16, 16, 16, 16, 16],
    [12, 12, 13, 14, 14, 13, 12, 12],
    [11, 11, 12, 13, 13, 12, 11, 11],
    [10, 10, 11, 12, 12, 11, 10, 10],
    [10, 9, 9, 10, 10, 9, 9, 10],
    [10, 10, 10, 8, 8, 10, 10, 10],
    [10, 10, 10, 10, 10, 10, 10, 10],
];

const KNIGHT_TABLE: [[i32; 8]; 8] = [
    [6, 7, 8, 8, 8, 8, 7, 6],
    [7, 9, 10, 10, 10, 10, 9, 7],
    [8, 10, 11, 12, 12, 11, 10, 8],
    [8, 10, 12, 13, 13, 12, 10, 8],
    [8, 10, 12, 13, 13, 12, 10, 8],
    [8, 10, 11, 12, 12, 11, 10, 8],
    [7, 9, 10, 10, 10, 10, 9, 7],
    [6, 7, 8, 8, 8, 8, 7, 6],
];

const BISHOP_TABLE: [[i32; 8]; 8] = [
    [8, 9, 9, 9, 9, 9, 9, 8],
    [9, 10, 10, 10, 10, 10, 10, 9],
    [9, 10, 11, 11, 11, 11, 10, 9],
    [9, 10, 11, 12, 12, 11, 10, 9],
    [9, 11, 11, 12, 12, 11, 11, 9],
    [9, 10, 11, 11, 11, 11, 10, 9],
    [9, 11, 10, 10, 10, 10, 11, 9],
    [8, 9, 9, 9, 9, 9, 9, 8],
];

const ROOK_TABLE: [[i32; 8]; 8] = [
    [10, 10, 10, 10, 10, 10, 10, 10],
    [11, 11, 11, 11, 11, 11, 11, 11],
    [10, 10, 10, 10, 10, 10, 10, 10],
    [10, 10, 10, 10, 10, 10, 10, 10],
    [10, 10, 10, 10, 10, 10, 10, 10],
    [10, 10, 10, 10, 10, 10, 10, 10],
    [10, 10, 10, 10, 10, 10, 10, 10],
    [9, 10, 10, 11, 11, 10, 10, 9],
];

const QUEEN_TABLE: [[i32; 8]; 8] = [
    [10, 10, 10, 10, 10, 10, 10, 10],
    [10, 10, 10, 10, 10, 10, 10, 10],
    [10, 10, 10, 10, 10, 10, 10, 10],
    [10, 10, 10, 11, 11, 10, 10, 10],
    [10, 10, 10, 11, 11, 10, 10, 10],
    [10, 10, 10, 10, 10, 10, 10, 10],
    [10, 10, 10, 10, 10, 10, 10, 10],
    [10, 10, 10, 10, 10, 10, 10, 10],
];

#[inline]
pub const fn positional_weight(kind: PieceType, row: usize, col: usize) -> i32 {
    match kind {
        PieceType::Pawn => PAWN_TABLE[row][col],
        PieceType::Knight => KNIGHT_TABLE[row][col],
        PieceType::Bishop => BISHOP_TABLE[row][col],
        PieceType::Rook => ROOK_TABLE[row][col],
        PieceType::Queen => QUEEN_TABLE[row][col],
        // The king's material value is 0, so its product term is always
        // zero; a king table would be unreachable data.
        PieceType::King => NEUTRAL_WEIGHT,
    }
}

/// Static score from White's perspective; positive favors White.
pub fn evaluate(state: &PositionState) -> i32 {
    let mut total = 0i32;

    for row in 0..8usize {
        for col in 0..8usize {
            let Some(piece) = state.board[row][col] else {
                continue;
            };
            let table_row = match piece.color {
                Color::White => row,
                Color::Black => 7 - row,
            };
            total += piece_value(piece.kind)
                * positional_weight(piece.kind, table_row, col)
                * piece.color.sign();
        }
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_is_balanced() {
        assert_eq!(evaluate(&PositionState::new_game()), 0);
    }

    #[test]
    fn color_mirrored_positions_negate_the_score() {
        let white_up = PositionState::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1")
            .expect("FEN should parse");
        let black_up = PositionState::from_fen("4k3/4p3/8/8/8/8/8/4K3 b - - 0 1")
            .expect("FEN should parse");
        assert_eq!(evaluate(&white_up), -evaluate(&black_up));
        assert!(evaluate(&white_up) > 0);
    }

    #[test]
    fn material_outweighs_positional_placement() {
        // White is a rook up; a rim knight versus a centralized knight must
        // not flip the sign.
        let state = PositionState::from_fen("4k3/8/8/3n4/8/8/N7/R3K3 w - - 0 1")
            .expect("FEN should parse");
        assert!(evaluate(&state) > 0);
    }

    #[test]
    fn king_placement_never_moves_the_score() {
        let cornered = PositionState::from_fen("4k3/8/8/8/8/8/4P3/K7 w - - 0 1")
            .expect("FEN should parse");
        let centralized = PositionState::from_fen("4k3/8/8/8/3K4/8/4P3/8 w - - 0 1")
            .expect("FEN should parse");
        assert_eq!(evaluate(&cornered), evaluate(&centralized));
    }

    #[test]
    fn pawn_advancement_is_rewarded() {
        let home = PositionState::from_fen("4k3/8/8/8/8/8/P7/4K3 w - - 0 1")
            .expect("FEN should parse");
        let advanced = PositionState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1")
            .expect("FEN should parse");
        assert!(evaluate(&advanced) > evaluate(&home));
    }
}
