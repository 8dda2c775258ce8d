//! Random-move engine.
//!
//! Selects uniformly from legal moves; used for diagnostics, playout tests
//! and the weakest opponent setting.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::chess_errors::ChessResult;
use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;
use crate::search::two_ply::find_random_move;

pub struct RandomEngine {
    move_generator: LegalMoveGenerator,
    rng: StdRng,
}

impl RandomEngine {
    /// `seed` makes the move sequence reproducible.
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            move_generator: LegalMoveGenerator,
            rng: seeded_rng(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "Sable Random"
    }

    fn choose_move(&mut self, game_state: &mut GameState) -> ChessResult<EngineOutput> {
        let legal_moves = self.move_generator.generate_legal_moves(game_state)?;

        let mut out = EngineOutput::default();
        out.info_lines
            .push(format!("random_engine legal_moves {}", legal_moves.len()));
        out.best_move = find_random_move(&legal_moves, &mut self.rng);
        Ok(out)
    }
}

pub(crate) fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_a_legal_move_and_leaves_the_state_alone() {
        let mut game = GameState::new_game();
        let legal = game.get_valid_moves().expect("generation should succeed");
        let mut engine = RandomEngine::new(Some(42));
        let out = engine.choose_move(&mut game).expect("engine should run");
        let mv = out.best_move.expect("startpos has moves");
        assert!(legal.contains(&mv));
        assert!(game.move_log.is_empty());
    }

    #[test]
    fn same_seed_same_choice() {
        let mut game = GameState::new_game();
        let first = RandomEngine::new(Some(9))
            .choose_move(&mut game)
            .expect("engine should run")
            .best_move;
        let second = RandomEngine::new(Some(9))
            .choose_move(&mut game)
            .expect("engine should run")
            .best_move;
        assert_eq!(first, second);
    }

    #[test]
    fn no_move_when_mated() {
        let mut game =
            GameState::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").expect("fixture FEN");
        let out = RandomEngine::new(Some(1))
            .choose_move(&mut game)
            .expect("engine should run");
        assert!(out.best_move.is_none());
    }
}
