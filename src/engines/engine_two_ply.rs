//! Two-ply material engine with a random fallback.

use rand::rngs::StdRng;

use crate::chess_errors::ChessResult;
use crate::engines::engine_random::seeded_rng;
use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;
use crate::search::two_ply::{find_best_move, find_random_move};

pub struct TwoPlyEngine {
    move_generator: LegalMoveGenerator,
    rng: StdRng,
}

impl TwoPlyEngine {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            move_generator: LegalMoveGenerator,
            rng: seeded_rng(seed),
        }
    }
}

impl Default for TwoPlyEngine {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Engine for TwoPlyEngine {
    fn name(&self) -> &str {
        "Sable Two-Ply"
    }

    fn choose_move(&mut self, game_state: &mut GameState) -> ChessResult<EngineOutput> {
        let legal_moves = self.move_generator.generate_legal_moves(game_state)?;

        let mut out = EngineOutput::default();
        out.info_lines
            .push(format!("two_ply_engine legal_moves {}", legal_moves.len()));

        if legal_moves.is_empty() {
            return Ok(out);
        }

        out.best_move = match find_best_move(game_state, &legal_moves, &mut self.rng)? {
            Some(mv) => Some(mv),
            None => {
                out.info_lines
                    .push("two_ply_engine no improving move, playing random".to_owned());
                find_random_move(&legal_moves, &mut self.rng)
            }
        };
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::long_algebraic::move_to_long_algebraic;

    #[test]
    fn wins_material_when_offered() {
        let mut game =
            GameState::from_fen("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1").expect("fixture FEN");
        let out = TwoPlyEngine::new(Some(5))
            .choose_move(&mut game)
            .expect("engine should run");
        let mv = out.best_move.expect("a move");
        assert_eq!(move_to_long_algebraic(&mv), "d1d5");
        assert!(game.move_log.is_empty());
    }

    #[test]
    fn falls_back_to_random_when_every_line_is_lost() {
        // Kg1 is forced and ...Rb1 mates.
        let mut game =
            GameState::from_fen("1r5k/8/8/8/8/8/r7/7K w - - 0 1").expect("fixture FEN");
        let out = TwoPlyEngine::new(Some(2))
            .choose_move(&mut game)
            .expect("engine should run");
        let mv = out.best_move.expect("a move");
        assert_eq!(move_to_long_algebraic(&mv), "h1g1");
        assert_eq!(out.info_lines.len(), 2);
    }
}
