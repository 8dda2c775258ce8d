//! Full legal move generation pipeline.
//!
//! Scans the side to move for checks and pins, runs the per-piece
//! generators with the pins applied, filters the result against the current
//! check, appends castling and classifies terminal positions.

use tracing::debug;

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::{check_resolution_squares, scan_pins_and_checks};
use crate::move_generation::legal_move_shared::{GenerationMode, PieceMoveContext, PinSet};
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::{
    generate_castle_moves, generate_king_moves, AttackMap,
};
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerationError, MoveGenerator};
use crate::moves::chess_move::Move;

/// Positions seen this many times are drawn.
pub const REPETITION_LIMIT: usize = 3;

pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, game_state: &mut GameState) -> MoveGenResult<Vec<Move>> {
        generate_valid_moves(game_state)
    }
}

/// Legal moves for the side to move.
///
/// Refreshes `in_check`, `pins`, `checks`, `checkmate`, `stalemate` and
/// `draw_by_repetition` on `game_state`.
pub fn generate_valid_moves(game_state: &mut GameState) -> MoveGenResult<Vec<Move>> {
    let color = game_state.side_to_move;
    let king_square = verified_king_square(game_state, color)?;

    let scan = scan_pins_and_checks(&game_state.board, king_square, color);
    game_state.in_check = scan.in_check;
    game_state.pins = scan.pins.clone();
    game_state.checks = scan.checks.clone();

    let ctx = PieceMoveContext {
        board: &game_state.board,
        color,
        king_square,
        en_passant_square: game_state.en_passant_square,
        mode: GenerationMode::Legal,
    };

    let mut moves = Vec::with_capacity(64);
    if scan.is_double_check() {
        generate_king_moves(&ctx, king_square, &mut moves);
    } else {
        let mut pins = PinSet::new(scan.pins);
        moves = generate_pseudo_legal_moves(&ctx, &mut pins);

        if let Some(check) = scan.checks.first() {
            let blocks = check_resolution_squares(king_square, check);
            // En passant was already replayed against the king.
            moves.retain(|mv| {
                mv.piece_moved.kind == PieceKind::King
                    || mv.is_en_passant
                    || blocks.contains(&mv.end)
            });
        } else if has_castle_rights(game_state.castling_rights, color) {
            let enemy_attacks = attacked_squares(
                &game_state.board,
                color.opposite(),
                game_state.king_location(color.opposite()),
            );
            generate_castle_moves(
                &ctx,
                game_state.castling_rights,
                &enemy_attacks,
                &mut moves,
            );
        }
    }

    let no_moves = moves.is_empty();
    game_state.checkmate = no_moves && scan.in_check;
    game_state.stalemate = no_moves && !scan.in_check;
    game_state.draw_by_repetition = game_state.repetition_count() >= REPETITION_LIMIT;

    debug!(
        side = color.name(),
        moves = moves.len(),
        in_check = scan.in_check,
        checkmate = game_state.checkmate,
        stalemate = game_state.stalemate,
        repetition = game_state.draw_by_repetition,
        "generated legal moves"
    );

    Ok(moves)
}

/// Every move of the side in `ctx` from one piece-kind dispatch, with each
/// square's pin consumed as that square is visited.
pub fn generate_pseudo_legal_moves(ctx: &PieceMoveContext<'_>, pins: &mut PinSet) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    for (square, piece) in ctx.board.occupied() {
        if piece.color != ctx.color {
            continue;
        }
        let pin = pins.take(square);
        match piece.kind {
            PieceKind::Pawn => generate_pawn_moves(ctx, square, pin, &mut out),
            PieceKind::Knight => generate_knight_moves(ctx, square, pin, &mut out),
            PieceKind::Bishop => generate_bishop_moves(ctx, square, pin, &mut out),
            PieceKind::Rook => generate_rook_moves(ctx, square, pin, &mut out),
            PieceKind::Queen => generate_queen_moves(ctx, square, pin, &mut out),
            PieceKind::King => generate_king_moves(ctx, square, &mut out),
        }
    }
    out
}

/// Squares `attacker` attacks on `board`, ignoring pins and the safety of
/// its own king.
pub fn attacked_squares(board: &Board, attacker: Color, attacker_king: Square) -> AttackMap {
    let ctx = PieceMoveContext {
        board,
        color: attacker,
        king_square: attacker_king,
        en_passant_square: None,
        mode: GenerationMode::Attacks,
    };
    let mut map = AttackMap::default();
    for mv in generate_pseudo_legal_moves(&ctx, &mut PinSet::default()) {
        map.mark(mv.end);
    }
    map
}

fn verified_king_square(game_state: &GameState, color: Color) -> MoveGenResult<Square> {
    let square = game_state.king_location(color);
    match game_state.board.get(square) {
        Some(piece) if piece.is(color, PieceKind::King) => Ok(square),
        _ => Err(MoveGenerationError::MissingKing { color }),
    }
}

#[inline]
fn has_castle_rights(rights: CastleRights, color: Color) -> bool {
    rights.kingside(color) || rights.queenside(color)
}
