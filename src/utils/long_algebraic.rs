//! Coordinate move text such as `e2e4` or `e7e8q`.
//!
//! Text is always resolved against a legal move list, so the flags of the
//! returned [`Move`] (castle, en passant, promotion) come from generation
//! rather than being guessed from the squares.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::moves::chess_move::Move;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

pub fn move_to_long_algebraic(mv: &Move) -> String {
    let mut out = square_to_algebraic(mv.start);
    out.push_str(&square_to_algebraic(mv.end));
    if let Some(kind) = mv.promotion_piece {
        out.push(kind.letter().to_ascii_lowercase());
    }
    out
}

/// Split `e7e8q` into its squares and optional promotion piece.
pub fn parse_long_algebraic(text: &str) -> ChessResult<(Square, Square, Option<PieceKind>)> {
    let text = text.trim();
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(ChessError::InvalidMoveText(text.to_owned()));
    }

    let bad_text = || ChessError::InvalidMoveText(text.to_owned());
    let from = algebraic_to_square(&text[0..2]).map_err(|_| bad_text())?;
    let to = algebraic_to_square(&text[2..4]).map_err(|_| bad_text())?;
    let promotion = match text[4..].chars().next() {
        None => None,
        Some(ch) => {
            let kind = PieceKind::from_letter(ch).ok_or_else(bad_text)?;
            if !kind.is_promotion_choice() {
                return Err(ChessError::InvalidPromotionPiece(kind));
            }
            Some(kind)
        }
    };

    Ok((from, to, promotion))
}

/// Find the legal move matching `from`/`to`, applying `promotion` to a
/// pending promotion. A promotion without a piece comes back unresolved.
pub fn resolve_move(
    legal_moves: &[Move],
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
) -> ChessResult<Move> {
    let mv = legal_moves
        .iter()
        .find(|mv| mv.start == from && mv.end == to)
        .copied()
        .ok_or_else(|| {
            ChessError::IllegalMove(format!(
                "{}{}",
                square_to_algebraic(from),
                square_to_algebraic(to)
            ))
        })?;

    match promotion {
        None => Ok(mv),
        Some(kind) if mv.is_pawn_promotion => Ok(mv.with_promotion(kind)),
        Some(kind) => Err(ChessError::InvalidMoveText(format!(
            "{} is not a promotion (got {:?})",
            move_to_long_algebraic(&mv),
            kind
        ))),
    }
}

pub fn find_move(legal_moves: &[Move], text: &str) -> ChessResult<Move> {
    let (from, to, promotion) = parse_long_algebraic(text)?;
    resolve_move(legal_moves, from, to, promotion)
}
