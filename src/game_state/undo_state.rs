use crate::game_state::chess_types::*;

/// State that `undo_move` cannot rebuild from the logged [`Move`] alone.
///
/// One record is pushed per `make_move`, in lock-step with the move log.
///
/// [`Move`]: crate::moves::chess_move::Move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoState {
    pub prev_en_passant_square: Option<Square>,
    pub prev_halfmove_clock: u16,
}
