//! Leaf-node counting over make/undo, for validating move generation
//! against published perft tables.

use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerationError, MoveGenerator};
use crate::moves::chess_move::{expand_promotions, Move};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Perft from a copy of `game_state` with the standard generator.
pub fn perft_legal(game_state: &GameState, depth: u8) -> MoveGenResult<PerftCounts> {
    let mut game = game_state.clone();
    perft(&LegalMoveGenerator, &mut game, depth)
}

/// Count leaves `depth` plies below `game_state`. Promotions count once per
/// piece choice. The state is restored before returning.
pub fn perft<G: MoveGenerator>(
    generator: &G,
    game_state: &mut GameState,
    depth: u8,
) -> MoveGenResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    for mv in legal_expanded(generator, game_state)? {
        total.merge(perft_after(generator, game_state, mv, depth)?);
    }
    Ok(total)
}

/// Per-root-move node counts, sorted by move text.
pub fn perft_divide<G: MoveGenerator>(
    generator: &G,
    game_state: &mut GameState,
    depth: u8,
) -> MoveGenResult<Vec<(String, usize)>> {
    let mut out = Vec::new();
    if depth == 0 {
        return Ok(out);
    }
    for mv in legal_expanded(generator, game_state)? {
        let counts = perft_after(generator, game_state, mv, depth)?;
        out.push((
            crate::utils::long_algebraic::move_to_long_algebraic(&mv),
            counts.nodes,
        ));
    }
    out.sort();
    Ok(out)
}

fn legal_expanded<G: MoveGenerator>(
    generator: &G,
    game_state: &mut GameState,
) -> MoveGenResult<Vec<Move>> {
    let moves = generator.generate_legal_moves(game_state)?;
    Ok(expand_promotions(&moves))
}

fn perft_after<G: MoveGenerator>(
    generator: &G,
    game_state: &mut GameState,
    mv: Move,
    depth: u8,
) -> MoveGenResult<PerftCounts> {
    game_state
        .make_move(mv)
        .map_err(|err| MoveGenerationError::InvalidState(format!("make_move failed: {err}")))?;

    let counts = if depth == 1 {
        leaf_counts(generator, game_state, &mv)
    } else {
        perft(generator, game_state, depth - 1)
    };

    game_state.undo_move();
    counts
}

fn leaf_counts<G: MoveGenerator>(
    generator: &G,
    game_state: &mut GameState,
    mv: &Move,
) -> MoveGenResult<PerftCounts> {
    let mut counts = PerftCounts {
        nodes: 1,
        captures: usize::from(mv.is_capture()),
        en_passant: usize::from(mv.is_en_passant),
        castles: usize::from(mv.is_castle),
        promotions: usize::from(mv.is_pawn_promotion),
        ..PerftCounts::default()
    };

    if game_state.in_check() {
        counts.checks = 1;
        let replies = generator.generate_legal_moves(game_state)?;
        counts.checkmates = usize::from(replies.is_empty());
    }

    Ok(counts)
}
