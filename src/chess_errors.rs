//! Errors used throughout the chess engine.
//!
//! `ChessError` is the single error type returned by game-state mutation,
//! notation parsing and the session layer. Move generation has its own
//! narrower [`MoveGenerationError`], which converts into `ChessError` so
//! callers can propagate both with `?`.
//!
//! Usage guidelines:
//! - Parsing and input variants (`InvalidFen`, `InvalidSquare`,
//!   `InvalidMoveText`, `IllegalMove`) are recoverable and suitable for
//!   showing to a user.
//! - `PromotionPieceRequired` and `InvalidPromotionPiece` are caller
//!   protocol errors: the move was legal but not fully specified.
//! - `MoveGeneration(MissingKing)` means a board invariant was violated and
//!   the state should be discarded.

use thiserror::Error;

use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::move_generation::move_generator::MoveGenerationError;

pub type ChessResult<T> = Result<T, ChessError>;

#[derive(Debug, Error)]
pub enum ChessError {
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("invalid square: {0}")]
    InvalidSquare(String),

    #[error("invalid move text: {0}")]
    InvalidMoveText(String),

    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// A promotion move reached `make_move` without its target piece.
    #[error("promotion on row {} col {} needs a piece (q, r, b or n)", .square.row, .square.col)]
    PromotionPieceRequired { square: Square },

    #[error("cannot promote to {0:?}")]
    InvalidPromotionPiece(PieceKind),

    #[error("it is not a human player's turn ({} to move)", .0.name())]
    NotHumanTurn(Color),

    #[error("the game is already over")]
    GameOver,

    #[error(transparent)]
    MoveGeneration(#[from] MoveGenerationError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_side_and_wrap_generation_errors() {
        assert_eq!(
            ChessError::NotHumanTurn(Color::Dark).to_string(),
            "it is not a human player's turn (black to move)"
        );

        let err: ChessError = MoveGenerationError::MissingKing { color: Color::Light }.into();
        assert!(matches!(err, ChessError::MoveGeneration(_)));
    }
}
