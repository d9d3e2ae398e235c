use crate::board::chess_types::*;

/// Minimal inverse data for one applied move.
///
/// Together with the move itself this restores the pre-apply position
/// exactly; it is produced by `apply_move` and consumed by `undo_move`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoRecord {
    /// Captured piece and the square it stood on. The square differs from
    /// the move target only for en-passant captures.
    pub captured: Option<(Piece, Square)>,

    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_square: Option<Square>,
    pub prev_halfmove_clock: u16,
}
