use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::square_to_algebraic;

pub fn generate_fen(game_state: &GameState) -> String {
    let board = generate_board_field(&game_state.board);
    let side_to_move = match game_state.side_to_move {
        Color::Light => "w",
        Color::Dark => "b",
    };
    let castling = generate_castling_field(game_state.castling_rights);
    let en_passant = game_state
        .en_passant_square
        .map(square_to_algebraic)
        .unwrap_or_else(|| "-".to_owned());

    format!(
        "{} {} {} {} {} {}",
        board,
        side_to_move,
        castling,
        en_passant,
        game_state.halfmove_clock,
        game_state.fullmove_number
    )
}

fn generate_board_field(board: &Board) -> String {
    let mut out = String::new();

    for row in 0..8u8 {
        let mut empty_count = 0u8;

        for col in 0..8u8 {
            match board.get(Square::new(row, col)) {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(piece_to_fen_char(piece));
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if row < 7 {
            out.push('/');
        }
    }

    out
}

fn piece_to_fen_char(piece: Piece) -> char {
    let letter = piece.kind.letter();
    match piece.color {
        Color::Light => letter,
        Color::Dark => letter.to_ascii_lowercase(),
    }
}

fn generate_castling_field(rights: CastleRights) -> String {
    let mut out = String::new();

    if rights.light_kingside {
        out.push('K');
    }
    if rights.light_queenside {
        out.push('Q');
    }
    if rights.dark_kingside {
        out.push('k');
    }
    if rights.dark_queenside {
        out.push('q');
    }

    if out.is_empty() {
        out.push('-');
    }

    out
}
