//! PositionState-to-FEN generator, the round-trip inverse of the parser.

use crate::board::chess_types::*;
use crate::board::position::PositionState;
use crate::utils::algebraic::square_to_text;

pub fn generate_fen(state: &PositionState) -> String {
    let mut fen = String::with_capacity(90);

    for row in 0..8usize {
        if row > 0 {
            fen.push('/');
        }
        let mut empty_run = 0u8;
        for col in 0..8usize {
            match state.board[row][col] {
                None => empty_run += 1,
                Some(piece) => {
                    if empty_run > 0 {
                        fen.push(char::from(b'0' + empty_run));
                        empty_run = 0;
                    }
                    fen.push(piece_to_fen_char(piece));
                }
            }
        }
        if empty_run > 0 {
            fen.push(char::from(b'0' + empty_run));
        }
    }

    fen.push(' ');
    fen.push(match state.side_to_move {
        Color::White => 'w',
        Color::Black => 'b',
    });

    fen.push(' ');
    if state.castling_rights == 0 {
        fen.push('-');
    } else {
        if state.castling_rights & CASTLE_WHITE_KINGSIDE != 0 {
            fen.push('K');
        }
        if state.castling_rights & CASTLE_WHITE_QUEENSIDE != 0 {
            fen.push('Q');
        }
        if state.castling_rights & CASTLE_BLACK_KINGSIDE != 0 {
            fen.push('k');
        }
        if state.castling_rights & CASTLE_BLACK_QUEENSIDE != 0 {
            fen.push('q');
        }
    }

    fen.push(' ');
    match state.en_passant_square {
        None => fen.push('-'),
        Some(square) => fen.push_str(&square_to_text(square)),
    }

    fen.push_str(&format!(
        " {} {}",
        state.halfmove_clock, state.fullmove_number
    ));
    fen
}

fn piece_to_fen_char(piece: Piece) -> char {
    let ch = match piece.kind {
        PieceType::Pawn => 'p',
        PieceType::Knight => 'n',
        PieceType::Bishop => 'b',
        PieceType::Rook => 'r',
        PieceType::Queen => 'q',
        PieceType::King => 'k',
    };
    match piece.color {
        Color::White => ch.to_ascii_uppercase(),
        Color::Black => ch,
    }
}
