//! FEN-to-PositionRecord parser.
//!
//! Produces the structured position record consumed by
//! `PositionState::from_record`; all 64 squares appear in the record, empty
//! cells included. FEN lists rank 8 first, which maps directly onto row 0.

use crate::board::chess_types::*;
use crate::board::position::PositionRecord;
use crate::errors::EngineError;
use crate::utils::algebraic::square_from_text;

pub fn parse_fen(fen: &str) -> Result<PositionRecord, EngineError> {
    let mut parts = fen.split_whitespace();

    let board_part = parts
        .next()
        .ok_or_else(|| EngineError::InvalidFen("missing board layout".to_owned()))?;
    let side_part = parts
        .next()
        .ok_or_else(|| EngineError::InvalidFen("missing side to move".to_owned()))?;
    let castling_part = parts
        .next()
        .ok_or_else(|| EngineError::InvalidFen("missing castling rights".to_owned()))?;
    let en_passant_part = parts
        .next()
        .ok_or_else(|| EngineError::InvalidFen("missing en-passant square".to_owned()))?;
    let halfmove_part = parts
        .next()
        .ok_or_else(|| EngineError::InvalidFen("missing halfmove clock".to_owned()))?;
    let fullmove_part = parts
        .next()
        .ok_or_else(|| EngineError::InvalidFen("missing fullmove number".to_owned()))?;

    if parts.next().is_some() {
        return Err(EngineError::InvalidFen("extra trailing fields".to_owned()));
    }

    Ok(PositionRecord {
        placements: parse_board(board_part)?,
        side_to_move: parse_side_to_move(side_part)?,
        castling_rights: parse_castling_rights(castling_part)?,
        en_passant_square: parse_en_passant_square(en_passant_part)?,
        halfmove_clock: halfmove_part
            .parse::<u16>()
            .map_err(|_| EngineError::InvalidFen(format!("invalid halfmove clock '{halfmove_part}'")))?,
        fullmove_number: fullmove_part
            .parse::<u16>()
            .map_err(|_| EngineError::InvalidFen(format!("invalid fullmove number '{fullmove_part}'")))?,
    })
}

fn parse_board(board_part: &str) -> Result<Vec<(Square, Option<Piece>)>, EngineError> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(EngineError::InvalidFen(
            "board layout must contain 8 ranks".to_owned(),
        ));
    }

    let mut placements = Vec::with_capacity(64);
    for (row, rank_str) in ranks.iter().enumerate() {
        let mut col = 0usize;
        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(EngineError::InvalidFen(format!(
                        "invalid empty-square count '{ch}'"
                    )));
                }
                for _ in 0..empty_count {
                    if col >= 8 {
                        return Err(EngineError::InvalidFen(
                            "board rank has too many files".to_owned(),
                        ));
                    }
                    placements.push((Square::new(row as u8, col as u8), None));
                    col += 1;
                }
                continue;
            }

            let piece = piece_from_fen_char(ch).ok_or_else(|| {
                EngineError::InvalidFen(format!("invalid piece character '{ch}'"))
            })?;
            if col >= 8 {
                return Err(EngineError::InvalidFen(
                    "board rank has too many files".to_owned(),
                ));
            }
            placements.push((Square::new(row as u8, col as u8), Some(piece)));
            col += 1;
        }

        if col != 8 {
            return Err(EngineError::InvalidFen(
                "board rank does not sum to 8 files".to_owned(),
            ));
        }
    }

    Ok(placements)
}

fn parse_side_to_move(side_part: &str) -> Result<Color, EngineError> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        other => Err(EngineError::InvalidFen(format!(
            "invalid side to move '{other}'"
        ))),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, EngineError> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        let flag = match ch {
            'K' => CASTLE_WHITE_KINGSIDE,
            'Q' => CASTLE_WHITE_QUEENSIDE,
            'k' => CASTLE_BLACK_KINGSIDE,
            'q' => CASTLE_BLACK_QUEENSIDE,
            other => {
                return Err(EngineError::InvalidFen(format!(
                    "invalid castling character '{other}'"
                )))
            }
        };
        if rights & flag != 0 {
            return Err(EngineError::InvalidFen(format!(
                "duplicate castling character '{ch}'"
            )));
        }
        rights |= flag;
    }
    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> Result<Option<Square>, EngineError> {
    if en_passant_part == "-" {
        Ok(None)
    } else {
        Ok(Some(square_from_text(en_passant_part)?))
    }
}

fn piece_from_fen_char(ch: char) -> Option<Piece> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };
    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceType::Pawn,
        'n' => PieceType::Knight,
        'b' => PieceType::Bishop,
        'r' => PieceType::Rook,
        'q' => PieceType::Queen,
        'k' => PieceType::King,
        _ => return None,
    };
    Some(Piece::new(color, kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::chess_rules::STARTING_POSITION_FEN;

    #[test]
    fn starting_fen_covers_all_64_squares() {
        let record = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        assert_eq!(record.placements.len(), 64);
        assert_eq!(record.side_to_move, Color::White);
        assert_eq!(record.castling_rights, CASTLE_ALL);
        assert_eq!(record.en_passant_square, None);
        assert_eq!(
            record.placements[0],
            (Square::new(0, 0), Some(Piece::new(Color::Black, PieceType::Rook)))
        );
    }

    #[test]
    fn en_passant_square_and_clocks_are_parsed() {
        let record = parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 3 21").expect("FEN should parse");
        assert_eq!(record.en_passant_square, Some(Square::new(2, 3)));
        assert_eq!(record.halfmove_clock, 3);
        assert_eq!(record.fullmove_number, 21);
    }

    #[test]
    fn malformed_fens_are_rejected() {
        assert!(parse_fen("").is_err());
        assert!(parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1").is_err());
        assert!(parse_fen("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").is_err());
        assert!(parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1").is_err());
        assert!(parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 extra").is_err());
        assert!(parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KZkq - 0 1").is_err());
    }
}
