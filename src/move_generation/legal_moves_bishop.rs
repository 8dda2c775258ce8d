use crate::game_state::chess_rules::DIAGONAL_DIRECTIONS;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{walk_rays, PieceMoveContext};
use crate::moves::chess_move::Move;

pub fn generate_bishop_moves(
    ctx: &PieceMoveContext<'_>,
    from: Square,
    pin: Option<Direction>,
    out: &mut Vec<Move>,
) {
    walk_rays(ctx, from, PieceKind::Bishop, &DIAGONAL_DIRECTIONS, pin, out);
}
