use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::scan_pins_and_checks;
use crate::move_generation::legal_move_shared::{pin_allows, GenerationMode, PieceMoveContext};
use crate::moves::chess_move::Move;

pub fn generate_pawn_moves(
    ctx: &PieceMoveContext<'_>,
    from: Square,
    pin: Option<Direction>,
    out: &mut Vec<Move>,
) {
    let pawn = ctx.piece(PieceKind::Pawn);
    let forward = ctx.color.pawn_forward();

    if ctx.mode == GenerationMode::Attacks {
        for file_delta in [-1i8, 1i8] {
            if let Some(to) = from.offset((forward, file_delta), 1) {
                out.push(Move::from_parts(from, to, pawn, ctx.board));
            }
        }
        return;
    }

    let push = (forward, 0);
    if let Some(one_step) = from.offset(push, 1) {
        if ctx.board.is_empty(one_step) && pin_allows(pin, push) {
            out.push(Move::from_parts(from, one_step, pawn, ctx.board));

            if from.row == ctx.color.pawn_start_row() {
                if let Some(two_step) = from.offset(push, 2) {
                    if ctx.board.is_empty(two_step) {
                        out.push(Move::from_parts(from, two_step, pawn, ctx.board));
                    }
                }
            }
        }
    }

    // captures and en passant
    for file_delta in [-1i8, 1i8] {
        let step = (forward, file_delta);
        let Some(to) = from.offset(step, 1) else {
            continue;
        };
        if !pin_allows(pin, step) {
            continue;
        }

        if ctx.board.color_at(to) == Some(ctx.color.opposite()) {
            out.push(Move::from_parts(from, to, pawn, ctx.board));
        } else if ctx.en_passant_square == Some(to) && en_passant_keeps_king_safe(ctx, from, to) {
            out.push(Move::en_passant(from, to, pawn, ctx.board));
        }
    }
}

/// En passant empties two squares on one row, which the pin scan cannot see
/// (king and rook on the capturing rank). Play it out and rescan.
fn en_passant_keeps_king_safe(ctx: &PieceMoveContext<'_>, from: Square, to: Square) -> bool {
    let mut board = *ctx.board;
    let pawn = board.take(from);
    board.set(Square::new(from.row, to.col), None);
    board.set(to, pawn);
    !scan_pins_and_checks(&board, ctx.king_square, ctx.color).in_check
}
