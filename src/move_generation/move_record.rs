//! Move representation and derived flags.
//!
//! A move is origin, target, optional promotion kind, and a flag byte. Flags
//! are derived during generation from the position the move was generated
//! against; they are never set independently by callers.

use crate::board::chess_types::{PieceType, Square};

pub const FLAG_CAPTURE: u8 = 1 << 0;
pub const FLAG_DOUBLE_PAWN_PUSH: u8 = 1 << 1;
pub const FLAG_EN_PASSANT: u8 = 1 << 2;
pub const FLAG_CASTLING: u8 = 1 << 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
    pub flags: u8,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square, flags: u8) -> Self {
        Self {
            from,
            to,
            promotion: None,
            flags,
        }
    }

    #[inline]
    pub const fn promoting(from: Square, to: Square, promotion: PieceType, flags: u8) -> Self {
        Self {
            from,
            to,
            promotion: Some(promotion),
            flags,
        }
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.flags & FLAG_CAPTURE != 0
    }

    #[inline]
    pub const fn is_double_pawn_push(&self) -> bool {
        self.flags & FLAG_DOUBLE_PAWN_PUSH != 0
    }

    #[inline]
    pub const fn is_en_passant(&self) -> bool {
        self.flags & FLAG_EN_PASSANT != 0
    }

    #[inline]
    pub const fn is_castling(&self) -> bool {
        self.flags & FLAG_CASTLING != 0
    }

    #[inline]
    pub const fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }
}
