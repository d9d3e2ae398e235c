//! Central board state representation.
//!
//! `PositionState` is the single owner of the 8x8 mailbox plus the non-board
//! fields (side to move, castling rights, en-passant target, clocks). It is
//! mutated in place by make/unmake style workflows and cloned only at search
//! roots, never per node.
//!
//! `PositionRecord` is the validated input boundary: a structured record of
//! all 64 cell placements plus the non-board fields, as produced by the FEN
//! parser. The core never parses text itself.

use crate::board::chess_rules::STARTING_POSITION_FEN;
use crate::board::chess_types::*;
use crate::errors::EngineError;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

/// Structured position input covering all 64 squares (empty cells included).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionRecord {
    pub placements: Vec<(Square, Option<Piece>)>,
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

/// In-place mutable game position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionState {
    /// `board[row][col]`, row 0 = rank 8.
    pub board: [[Option<Piece>; 8]; 8],
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

impl Default for PositionState {
    fn default() -> Self {
        Self {
            board: [[None; 8]; 8],
            side_to_move: Color::White,
            castling_rights: 0,
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

impl PositionState {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn new_game() -> Self {
        Self::from_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    pub fn from_fen(fen: &str) -> Result<Self, EngineError> {
        let record = parse_fen(fen)?;
        Self::from_record(&record)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    /// Build a state from a validated structured record.
    ///
    /// This is the only place boundary validation happens: the record must
    /// name every square exactly once, keep squares in range, and place
    /// exactly one king per side. Downstream components assume these hold.
    pub fn from_record(record: &PositionRecord) -> Result<Self, EngineError> {
        if record.placements.len() != 64 {
            return Err(EngineError::InvalidPositionRecord(format!(
                "expected 64 placements, got {}",
                record.placements.len()
            )));
        }

        let mut state = Self::new_empty();
        let mut seen = [[false; 8]; 8];
        let mut kings = [0usize; 2];

        for (square, cell) in &record.placements {
            if square.row > 7 || square.col > 7 {
                return Err(EngineError::InvalidPositionRecord(format!(
                    "square ({}, {}) is out of range",
                    square.row, square.col
                )));
            }
            let (row, col) = (square.row as usize, square.col as usize);
            if seen[row][col] {
                return Err(EngineError::InvalidPositionRecord(format!(
                    "square ({}, {}) placed twice",
                    square.row, square.col
                )));
            }
            seen[row][col] = true;
            if let Some(piece) = cell {
                if piece.kind == PieceType::King {
                    kings[match piece.color {
                        Color::White => 0,
                        Color::Black => 1,
                    }] += 1;
                }
            }
            state.board[row][col] = *cell;
        }

        if kings != [1, 1] {
            return Err(EngineError::InvalidPositionRecord(format!(
                "expected one king per side, got {} white / {} black",
                kings[0], kings[1]
            )));
        }

        if let Some(ep) = record.en_passant_square {
            if ep.row > 7 || ep.col > 7 {
                return Err(EngineError::InvalidPositionRecord(format!(
                    "en-passant square ({}, {}) is out of range",
                    ep.row, ep.col
                )));
            }
        }

        state.side_to_move = record.side_to_move;
        state.castling_rights = record.castling_rights & CASTLE_ALL;
        state.en_passant_square = record.en_passant_square;
        state.halfmove_clock = record.halfmove_clock;
        state.fullmove_number = record.fullmove_number;
        Ok(state)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square.row as usize][square.col as usize]
    }

    #[inline]
    pub fn set_piece(&mut self, square: Square, cell: Option<Piece>) {
        self.board[square.row as usize][square.col as usize] = cell;
    }

    #[inline]
    pub fn take_piece(&mut self, square: Square) -> Option<Piece> {
        self.board[square.row as usize][square.col as usize].take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_game_places_both_kings() {
        let state = PositionState::new_game();
        assert_eq!(
            state.piece_at(Square::new(7, 4)),
            Some(Piece::new(Color::White, PieceType::King))
        );
        assert_eq!(
            state.piece_at(Square::new(0, 4)),
            Some(Piece::new(Color::Black, PieceType::King))
        );
        assert_eq!(state.side_to_move, Color::White);
        assert_eq!(state.castling_rights, CASTLE_ALL);
        assert_eq!(state.fullmove_number, 1);
    }

    #[test]
    fn record_with_wrong_placement_count_is_rejected() {
        let mut record = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        record.placements.pop();
        let err = PositionState::from_record(&record).unwrap_err();
        assert!(matches!(err, EngineError::InvalidPositionRecord(_)));
    }

    #[test]
    fn record_with_duplicate_square_is_rejected() {
        let mut record = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        record.placements[1].0 = record.placements[0].0;
        let err = PositionState::from_record(&record).unwrap_err();
        assert!(matches!(err, EngineError::InvalidPositionRecord(_)));
    }

    #[test]
    fn record_missing_a_king_is_rejected() {
        let err = PositionState::from_fen("8/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap_err();
        assert!(matches!(err, EngineError::InvalidPositionRecord(_)));
    }
}
