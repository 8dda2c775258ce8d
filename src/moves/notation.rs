//! Short algebraic-style text for logged moves.
//!
//! Disambiguation between two identical pieces reaching the same square is
//! not attempted.

use std::fmt;

use crate::game_state::chess_rules::QUEENSIDE_CASTLE_COL;
use crate::game_state::chess_types::PieceKind;
use crate::moves::chess_move::Move;
use crate::utils::algebraic::square_to_algebraic;

impl Move {
    pub fn chess_notation(&self) -> String {
        let dest = square_to_algebraic(self.end);

        if self.is_pawn_promotion {
            let piece = self
                .promotion_piece
                .map(|kind| kind.letter().to_string())
                .unwrap_or_default();
            return format!("{dest}={piece}");
        }

        if self.is_castle {
            return if self.end.col == QUEENSIDE_CASTLE_COL {
                "O-O-O".to_owned()
            } else {
                "O-O".to_owned()
            };
        }

        if self.is_en_passant {
            return format!("{}x{dest}", self.start.file_char());
        }

        match (self.piece_moved.kind, self.is_capture()) {
            (PieceKind::Pawn, true) => format!("{}x{dest}", self.start.file_char()),
            (PieceKind::Pawn, false) => dest,
            (kind, true) => format!("{}x{dest}", kind.letter()),
            (kind, false) => format!("{}{dest}", kind.letter()),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.chess_notation())
    }
}
