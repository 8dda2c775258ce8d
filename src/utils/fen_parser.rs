//! FEN-to-GameState parser.
//!
//! Reads the board, side to move, castling rights and en-passant fields.
//! The two clock fields are optional and default to `0 1`.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side to move"))?;
    let castling_part = parts.next().ok_or_else(|| invalid("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| invalid("missing en-passant square"))?;
    let halfmove_part = parts.next().unwrap_or("0");
    let fullmove_part = parts.next().unwrap_or("1");

    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let board = parse_board(board_part)?;
    let side_to_move = parse_side_to_move(side_part)?;
    let castling_rights = parse_castling_rights(castling_part)?;
    let en_passant_square = parse_en_passant_square(en_passant_part)?;
    let halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| invalid(&format!("halfmove clock {halfmove_part}")))?;
    let fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| invalid(&format!("fullmove number {fullmove_part}")))?;

    GameState::from_position(
        board,
        side_to_move,
        castling_rights,
        en_passant_square,
        halfmove_clock,
        fullmove_number,
    )
}

fn invalid(reason: &str) -> ChessError {
    ChessError::InvalidFen(reason.to_owned())
}

fn parse_board(board_part: &str) -> ChessResult<Board> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    let mut board = Board::empty();
    // FEN lists rank 8 first, which is row 0.
    for (row, rank_str) in ranks.iter().enumerate() {
        let mut col = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(&format!("empty-square count '{ch}'")));
                }
                col += empty_count as usize;
                continue;
            }

            let piece = piece_from_fen_char(ch)
                .ok_or_else(|| invalid(&format!("piece character '{ch}'")))?;
            if col >= 8 {
                return Err(invalid("rank has too many files"));
            }
            board.set(Square::new(row as u8, col as u8), Some(piece));
            col += 1;
        }

        if col != 8 {
            return Err(invalid("rank does not sum to 8 files"));
        }
    }

    Ok(board)
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(invalid(&format!("side to move {side_part}"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastleRights> {
    let mut rights = CastleRights::NONE;
    if castling_part == "-" {
        return Ok(rights);
    }

    for ch in castling_part.chars() {
        match ch {
            'K' => rights.light_kingside = true,
            'Q' => rights.light_queenside = true,
            'k' => rights.dark_kingside = true,
            'q' => rights.dark_queenside = true,
            _ => return Err(invalid(&format!("castling rights character {ch}"))),
        }
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)
        .map_err(|_| invalid(&format!("en-passant square {en_passant_part}")))?;
    // Only the square a pawn just skipped over (rank 3 or 6) can be a target.
    if square.row != 2 && square.row != 5 {
        return Err(invalid(&format!("en-passant square {en_passant_part}")));
    }
    Ok(Some(square))
}

fn piece_from_fen_char(ch: char) -> Option<Piece> {
    let color = if ch.is_ascii_uppercase() {
        Color::Light
    } else if ch.is_ascii_lowercase() {
        Color::Dark
    } else {
        return None;
    };

    PieceKind::from_letter(ch).map(|kind| Piece::new(color, kind))
}
