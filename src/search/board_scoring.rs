//! Static position scoring.
//!
//! Search delegates to [`BoardScorer`] so the material count can be swapped
//! without touching the selection loop.

use crate::game_state::{chess_types::*, game_state::GameState};

/// Score of a mated side, from the mating side's point of view.
pub const CHECKMATE: i32 = 1000;
pub const STALEMATE: i32 = 0;

pub trait BoardScorer: Send + Sync {
    /// Light-minus-Dark score of the board.
    fn balance(&self, board: &Board) -> i32;

    /// Score from the perspective of `color`.
    fn score_for(&self, game_state: &GameState, color: Color) -> i32 {
        let balance = self.balance(&game_state.board);
        match color {
            Color::Light => balance,
            Color::Dark => -balance,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    pub const fn piece_value(piece: PieceKind) -> i32 {
        match piece {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 0,
        }
    }
}

impl BoardScorer for MaterialScorer {
    fn balance(&self, board: &Board) -> i32 {
        board
            .occupied()
            .map(|(_, piece)| {
                let value = Self::piece_value(piece.kind);
                match piece.color {
                    Color::Light => value,
                    Color::Dark => -value,
                }
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_material_is_level() {
        let game = GameState::new_game();
        assert_eq!(MaterialScorer.balance(&game.board), 0);
    }

    #[test]
    fn balance_is_signed_for_light() {
        let game = GameState::from_fen("3qk3/8/8/8/8/8/PP6/R3K3 w - - 0 1").expect("fixture FEN");
        assert_eq!(MaterialScorer.balance(&game.board), 7 - 9);
        assert_eq!(MaterialScorer.score_for(&game, Color::Light), -2);
        assert_eq!(MaterialScorer.score_for(&game, Color::Dark), 2);
    }
}
