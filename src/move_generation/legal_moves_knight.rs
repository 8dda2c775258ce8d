use crate::game_state::chess_rules::KNIGHT_OFFSETS;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::PieceMoveContext;
use crate::moves::chess_move::Move;

/// Knight jumps. A pinned knight can never stay on its pin line, so it has
/// no moves at all.
pub fn generate_knight_moves(
    ctx: &PieceMoveContext<'_>,
    from: Square,
    pin: Option<Direction>,
    out: &mut Vec<Move>,
) {
    if pin.is_some() {
        return;
    }

    let knight = ctx.piece(PieceKind::Knight);
    for offset in KNIGHT_OFFSETS {
        let Some(to) = from.offset(offset, 1) else {
            continue;
        };
        if ctx.can_land_on(to) {
            out.push(Move::from_parts(from, to, knight, ctx.board));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::game_state::GameState;
    use crate::move_generation::legal_move_shared::GenerationMode;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(text: &str) -> Square {
        algebraic_to_square(text).expect("test square should parse")
    }

    fn knight_moves(mode: GenerationMode, pin: Option<Direction>) -> Vec<Move> {
        let game = GameState::new_game();
        let ctx = PieceMoveContext {
            board: &game.board,
            color: Color::Light,
            king_square: game.king_location(Color::Light),
            en_passant_square: None,
            mode,
        };
        let mut out = Vec::new();
        generate_knight_moves(&ctx, sq("g1"), pin, &mut out);
        out
    }

    #[test]
    fn knight_skips_friendly_squares() {
        let moves = knight_moves(GenerationMode::Legal, None);
        let mut targets: Vec<Square> = moves.iter().map(|mv| mv.end).collect();
        targets.sort();
        assert_eq!(targets, vec![sq("f3"), sq("h3")]);
    }

    #[test]
    fn pinned_knight_is_frozen() {
        assert!(knight_moves(GenerationMode::Legal, Some((-1, 0))).is_empty());
    }

    #[test]
    fn attack_mode_includes_defended_squares() {
        let moves = knight_moves(GenerationMode::Attacks, None);
        assert_eq!(moves.len(), 3);
        assert!(moves.iter().any(|mv| mv.end == sq("e2")));
    }
}
