use thiserror::Error;

use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::Move;

pub type MoveGenResult<T> = Result<T, MoveGenerationError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveGenerationError {
    /// The cached king square does not hold that color's king.
    #[error("no {} king on its recorded square", .color.name())]
    MissingKing { color: Color },

    #[error("invalid game state: {0}")]
    InvalidState(String),
}

pub trait MoveGenerator: Send + Sync {
    /// Legal moves for the side to move. Refreshes the check/pin caches and
    /// terminal flags on `game_state` as a side effect.
    fn generate_legal_moves(&self, game_state: &mut GameState) -> MoveGenResult<Vec<Move>>;
}
