//! Canonical chess-rule constants.
//!
//! Starting position, ray directions and the home squares that castling
//! rights are tied to.

use crate::game_state::chess_types::{Direction, Square};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// The four orthogonal directions.
pub const ORTHOGONAL_DIRECTIONS: [Direction; 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];

/// The four diagonal directions.
pub const DIAGONAL_DIRECTIONS: [Direction; 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// All eight compass directions, orthogonal first.
pub const ALL_DIRECTIONS: [Direction; 8] = [
    (-1, 0),
    (0, -1),
    (1, 0),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

pub const KNIGHT_OFFSETS: [Direction; 8] = [
    (-2, -1),
    (-2, 1),
    (-1, 2),
    (1, 2),
    (2, -1),
    (2, 1),
    (-1, -2),
    (1, -2),
];

pub const KING_START_COL: u8 = 4;
pub const KINGSIDE_ROOK_COL: u8 = 7;
pub const QUEENSIDE_ROOK_COL: u8 = 0;

/// Columns the king lands on when castling.
pub const KINGSIDE_CASTLE_COL: u8 = 6;
pub const QUEENSIDE_CASTLE_COL: u8 = 2;

#[inline]
pub fn is_orthogonal(direction: Direction) -> bool {
    direction.0 == 0 || direction.1 == 0
}

/// Home square of the rook that a castling right refers to.
#[inline]
pub const fn rook_home(back_row: u8, kingside: bool) -> Square {
    if kingside {
        Square::new(back_row, KINGSIDE_ROOK_COL)
    } else {
        Square::new(back_row, QUEENSIDE_ROOK_COL)
    }
}
