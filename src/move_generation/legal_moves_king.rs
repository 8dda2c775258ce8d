use crate::game_state::chess_rules::{
    rook_home, ALL_DIRECTIONS, KINGSIDE_CASTLE_COL, KING_START_COL, QUEENSIDE_CASTLE_COL,
};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::scan_pins_and_checks;
use crate::move_generation::legal_move_shared::{GenerationMode, PieceMoveContext};
use crate::moves::chess_move::Move;

/// Squares attacked by one side, as produced by attack-mode generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttackMap {
    attacked: [[bool; 8]; 8],
}

impl AttackMap {
    #[inline]
    pub fn mark(&mut self, square: Square) {
        self.attacked[square.row as usize][square.col as usize] = true;
    }

    #[inline]
    pub fn contains(&self, square: Square) -> bool {
        self.attacked[square.row as usize][square.col as usize]
    }

    pub fn count(&self) -> usize {
        self.attacked.iter().flatten().filter(|hit| **hit).count()
    }
}

/// One-square king steps.
///
/// In legal mode each destination is re-scanned with the king standing on
/// it; the scan treats the king's current square as empty, so retreating
/// along a checking ray is caught.
pub fn generate_king_moves(ctx: &PieceMoveContext<'_>, from: Square, out: &mut Vec<Move>) {
    let king = ctx.piece(PieceKind::King);
    for direction in ALL_DIRECTIONS {
        let Some(to) = from.offset(direction, 1) else {
            continue;
        };
        if !ctx.can_land_on(to) {
            continue;
        }
        if ctx.mode == GenerationMode::Legal
            && scan_pins_and_checks(ctx.board, to, ctx.color).in_check
        {
            continue;
        }
        out.push(Move::from_parts(from, to, king, ctx.board));
    }
}

/// Castling moves for the side in `ctx`, given the enemy's attack map.
///
/// The king must be on its home square and not attacked, the squares
/// between king and rook must be empty, and the two squares the king
/// crosses and lands on must not be attacked.
pub fn generate_castle_moves(
    ctx: &PieceMoveContext<'_>,
    rights: CastleRights,
    enemy_attacks: &AttackMap,
    out: &mut Vec<Move>,
) {
    let color = ctx.color;
    let back_row = color.back_row();
    let king_home = Square::new(back_row, KING_START_COL);
    let king = ctx.piece(PieceKind::King);

    if ctx.board.get(king_home) != Some(king) || enemy_attacks.contains(king_home) {
        return;
    }

    if rights.kingside(color) && rook_in_place(ctx, rook_home(back_row, true)) {
        let transit = [Square::new(back_row, 5), Square::new(back_row, 6)];
        if transit
            .iter()
            .all(|sq| ctx.board.is_empty(*sq) && !enemy_attacks.contains(*sq))
        {
            let to = Square::new(back_row, KINGSIDE_CASTLE_COL);
            out.push(Move::castle(king_home, to, king, ctx.board));
        }
    }

    if rights.queenside(color) && rook_in_place(ctx, rook_home(back_row, false)) {
        let between = [
            Square::new(back_row, 1),
            Square::new(back_row, 2),
            Square::new(back_row, 3),
        ];
        // b-file square only has to be empty; the rook crosses it, the king does not.
        let king_path = [Square::new(back_row, 3), Square::new(back_row, 2)];
        if between.iter().all(|sq| ctx.board.is_empty(*sq))
            && king_path.iter().all(|sq| !enemy_attacks.contains(*sq))
        {
            let to = Square::new(back_row, QUEENSIDE_CASTLE_COL);
            out.push(Move::castle(king_home, to, king, ctx.board));
        }
    }
}

#[inline]
fn rook_in_place(ctx: &PieceMoveContext<'_>, square: Square) -> bool {
    ctx.board.get(square) == Some(ctx.piece(PieceKind::Rook))
}
