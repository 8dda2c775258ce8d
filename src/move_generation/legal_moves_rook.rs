use crate::game_state::chess_rules::ORTHOGONAL_DIRECTIONS;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{walk_rays, PieceMoveContext};
use crate::moves::chess_move::Move;

pub fn generate_rook_moves(
    ctx: &PieceMoveContext<'_>,
    from: Square,
    pin: Option<Direction>,
    out: &mut Vec<Move>,
) {
    walk_rays(ctx, from, PieceKind::Rook, &ORTHOGONAL_DIRECTIONS, pin, out);
}
