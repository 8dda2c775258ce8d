//! Terminal-oriented Unicode board renderer.
//!
//! Rank 8 is printed first, so the board reads from Light's side.

use crate::game_state::{chess_types::*, game_state::GameState};

/// Render the board to a Unicode string for terminal output.
pub fn render_game_state(game_state: &GameState) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for row in 0..8u8 {
        let rank = char::from(b'8' - row);
        out.push(rank);
        out.push(' ');

        for col in 0..8u8 {
            match game_state.piece_at(Square::new(row, col)) {
                Some(piece) => out.push(piece_to_unicode(piece)),
                None => out.push('·'),
            }

            if col < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(rank);
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

fn piece_to_unicode(piece: Piece) -> char {
    match (piece.color, piece.kind) {
        (Color::Light, PieceKind::Pawn) => '♙',
        (Color::Light, PieceKind::Knight) => '♘',
        (Color::Light, PieceKind::Bishop) => '♗',
        (Color::Light, PieceKind::Rook) => '♖',
        (Color::Light, PieceKind::Queen) => '♕',
        (Color::Light, PieceKind::King) => '♔',
        (Color::Dark, PieceKind::Pawn) => '♟',
        (Color::Dark, PieceKind::Knight) => '♞',
        (Color::Dark, PieceKind::Bishop) => '♝',
        (Color::Dark, PieceKind::Rook) => '♜',
        (Color::Dark, PieceKind::Queen) => '♛',
        (Color::Dark, PieceKind::King) => '♚',
    }
}
