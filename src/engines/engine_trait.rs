//! Engine abstraction used by the console session.
//!
//! Each engine-controlled side owns one boxed [`Engine`]; the session asks
//! it for a move whenever that side is to play.

use crate::chess_errors::ChessResult;
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::Move;

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    /// `None` only when the side to move has no legal moves. Promotions
    /// always carry their piece.
    pub best_move: Option<Move>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    /// Pick a move for the side to move. The state is restored before
    /// returning.
    fn choose_move(&mut self, game_state: &mut GameState) -> ChessResult<EngineOutput>;
}
