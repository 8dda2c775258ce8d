use crate::game_state::chess_rules::ALL_DIRECTIONS;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{walk_rays, PieceMoveContext};
use crate::moves::chess_move::Move;

/// Rook and bishop rays together. The pin is looked up once by the caller
/// and applies to both ray sets.
pub fn generate_queen_moves(
    ctx: &PieceMoveContext<'_>,
    from: Square,
    pin: Option<Direction>,
    out: &mut Vec<Move>,
) {
    walk_rays(ctx, from, PieceKind::Queen, &ALL_DIRECTIONS, pin, out);
}
