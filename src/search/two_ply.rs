//! Two-ply material search.
//!
//! For each candidate the opponent's best material reply is found, and the
//! candidate that leaves the opponent the least is played. Terminal
//! positions are scored without looking at material: a mate is worth
//! [`CHECKMATE`] to the side giving it, a stalemate is [`STALEMATE`].

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use tracing::debug;

use crate::game_state::chess_types::{Color, PieceKind};
use crate::game_state::game_state::GameState;
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerationError};
use crate::moves::chess_move::{expand_promotions, Move};
use crate::search::board_scoring::{BoardScorer, MaterialScorer, CHECKMATE, STALEMATE};

/// Best move for the side to move among `valid_moves`, or `None` when no
/// candidate beats the worst case (every line gets the mover mated).
///
/// Candidates are shuffled first, so equal scores resolve differently per
/// `rng`. The state is restored before returning.
pub fn find_best_move<R: Rng + ?Sized>(
    game_state: &mut GameState,
    valid_moves: &[Move],
    rng: &mut R,
) -> MoveGenResult<Option<Move>> {
    find_best_move_with(&MaterialScorer, game_state, valid_moves, rng)
}

pub fn find_best_move_with<S: BoardScorer, R: Rng + ?Sized>(
    scorer: &S,
    game_state: &mut GameState,
    valid_moves: &[Move],
    rng: &mut R,
) -> MoveGenResult<Option<Move>> {
    let mover = game_state.side_to_move;
    let mut candidates = expand_promotions(valid_moves);
    candidates.shuffle(rng);

    let mut best_move = None;
    let mut best_opponent_score = CHECKMATE;

    for mv in candidates {
        apply(game_state, mv)?;
        let opponent_score = opponent_best_reply(scorer, game_state, mover.opposite());
        game_state.undo_move();
        let opponent_score = opponent_score?;

        if opponent_score < best_opponent_score {
            best_opponent_score = opponent_score;
            best_move = Some(mv);
        }
    }

    debug!(
        side = mover.name(),
        candidates = valid_moves.len(),
        best = ?best_move.map(|mv| mv.chess_notation()),
        opponent_score = best_opponent_score,
        "two-ply search finished"
    );

    Ok(best_move)
}

/// Uniformly random move. A pending promotion becomes a queen.
pub fn find_random_move<R: Rng + ?Sized>(valid_moves: &[Move], rng: &mut R) -> Option<Move> {
    valid_moves.choose(rng).map(|mv| {
        if mv.is_pawn_promotion && mv.promotion_piece.is_none() {
            mv.with_promotion(PieceKind::Queen)
        } else {
            *mv
        }
    })
}

/// Highest score `opponent` can reach with one reply, from its side.
fn opponent_best_reply<S: BoardScorer>(
    scorer: &S,
    game_state: &mut GameState,
    opponent: Color,
) -> MoveGenResult<i32> {
    let replies = game_state.get_valid_moves()?;
    if replies.is_empty() {
        return Ok(if game_state.checkmate {
            -CHECKMATE
        } else {
            STALEMATE
        });
    }

    let mut best = -CHECKMATE;
    for reply in expand_promotions(&replies) {
        apply(game_state, reply)?;
        let score = reply_score(scorer, game_state, opponent);
        game_state.undo_move();
        best = best.max(score?);
    }
    Ok(best)
}

/// Score after `opponent` replied; the original mover is to move.
fn reply_score<S: BoardScorer>(
    scorer: &S,
    game_state: &mut GameState,
    opponent: Color,
) -> MoveGenResult<i32> {
    if game_state.get_valid_moves()?.is_empty() {
        return Ok(if game_state.checkmate {
            CHECKMATE
        } else {
            STALEMATE
        });
    }
    Ok(scorer.score_for(game_state, opponent))
}

fn apply(game_state: &mut GameState, mv: Move) -> MoveGenResult<()> {
    game_state
        .make_move(mv)
        .map_err(|err| MoveGenerationError::InvalidState(format!("search move failed: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::long_algebraic::{find_move, move_to_long_algebraic};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn best(fen: &str, seed: u64) -> (GameState, Option<Move>) {
        let mut game = GameState::from_fen(fen).expect("fixture FEN");
        let moves = game.get_valid_moves().expect("generation should succeed");
        let mut rng = StdRng::seed_from_u64(seed);
        let best = find_best_move(&mut game, &moves, &mut rng).expect("search should succeed");
        (game, best)
    }

    #[test]
    fn takes_a_hanging_queen() {
        for seed in 0..4 {
            let (_, mv) = best("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1", seed);
            let mv = mv.expect("a best move");
            assert_eq!(move_to_long_algebraic(&mv), "d1d5");
        }
    }

    #[test]
    fn plays_mate_in_one() {
        let (_, mv) = best("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", 7);
        assert_eq!(move_to_long_algebraic(&mv.expect("a best move")), "a1a8");
    }

    #[test]
    fn prefers_mate_over_stalemate() {
        for seed in 0..4 {
            let (mut game, mv) = best("7k/8/6K1/8/8/8/8/5Q2 w - - 0 1", seed);
            game.make_move(mv.expect("a best move")).expect("move should apply");
            let replies = game.get_valid_moves().expect("generation should succeed");
            assert!(replies.is_empty());
            assert!(game.checkmate);
        }
    }

    #[test]
    fn never_allows_a_back_rank_mate() {
        let fen = "4r1k1/8/8/8/8/8/5PPP/3R2K1 w - - 0 1";
        for seed in 0..4 {
            let (mut game, mv) = best(fen, seed);
            game.make_move(mv.expect("a best move")).expect("move should apply");
            let replies = game.get_valid_moves().expect("generation should succeed");
            for reply in expand_promotions(&replies) {
                game.make_move(reply).expect("reply should apply");
                game.get_valid_moves().expect("generation should succeed");
                assert!(!game.checkmate, "{reply} mates after {}", game.move_log[0]);
                game.undo_move();
            }
        }
    }

    #[test]
    fn search_restores_the_position() {
        let (game, _) = best(crate::game_state::chess_rules::STARTING_POSITION_FEN, 1);
        assert_eq!(game.get_fen(), crate::game_state::chess_rules::STARTING_POSITION_FEN);
        assert!(game.move_log.is_empty());
    }

    #[test]
    fn no_moves_means_no_choice() {
        let mut game = GameState::new_game();
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(find_best_move(&mut game, &[], &mut rng).expect("search"), None);
        assert_eq!(find_random_move(&[], &mut rng), None);
    }

    #[test]
    fn random_move_resolves_promotions() {
        let mut game = GameState::from_fen("7k/P7/8/8/8/8/8/K7 w - - 0 1").expect("fixture FEN");
        let moves = game.get_valid_moves().expect("generation should succeed");
        let promo = find_move(&moves, "a7a8").expect("promotion");
        let mut rng = StdRng::seed_from_u64(11);
        let picked = find_random_move(&[promo], &mut rng).expect("a move");
        assert_eq!(picked.promotion_piece, Some(PieceKind::Queen));
    }
}
