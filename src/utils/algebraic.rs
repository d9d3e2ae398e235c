//! Coordinate-notation conversions.
//!
//! Converts between human-readable coordinates (`e4`), long-algebraic move
//! text (`e2e4`, `e7e8q`) and the internal (row, column) squares. Row 0 is
//! rank 8, so rank text and row index run in opposite directions.

use crate::board::chess_types::{PieceType, Square};
use crate::errors::EngineError;
use crate::move_generation::move_record::Move;

pub fn square_from_text(text: &str) -> Result<Square, EngineError> {
    let bytes = text.as_bytes();
    if bytes.len() != 2 {
        return Err(EngineError::InvalidSquare(text.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(EngineError::InvalidSquare(text.to_owned()));
    }

    Ok(Square::new(b'8' - rank, file - b'a'))
}

pub fn square_to_text(square: Square) -> String {
    let file = char::from(b'a' + square.col);
    let rank = char::from(b'8' - square.row);
    format!("{file}{rank}")
}

/// Parse long-algebraic move text into (origin, target, promotion).
pub fn parse_move_text(text: &str) -> Result<(Square, Square, Option<PieceType>), EngineError> {
    if text.len() != 4 && text.len() != 5 {
        return Err(EngineError::InvalidMoveText(text.to_owned()));
    }

    let from = square_from_text(&text[0..2])?;
    let to = square_from_text(&text[2..4])?;
    let promotion = match text.as_bytes().get(4) {
        None => None,
        Some(b'q') => Some(PieceType::Queen),
        Some(b'r') => Some(PieceType::Rook),
        Some(b'b') => Some(PieceType::Bishop),
        Some(b'n') => Some(PieceType::Knight),
        Some(_) => return Err(EngineError::InvalidMoveText(text.to_owned())),
    };

    Ok((from, to, promotion))
}

pub fn move_to_text(mv: &Move) -> String {
    let mut out = String::with_capacity(5);
    out.push_str(&square_to_text(mv.from));
    out.push_str(&square_to_text(mv.to));
    match mv.promotion {
        Some(PieceType::Queen) => out.push('q'),
        Some(PieceType::Rook) => out.push('r'),
        Some(PieceType::Bishop) => out.push('b'),
        Some(PieceType::Knight) => out.push('n'),
        _ => {}
    }
    out
}
