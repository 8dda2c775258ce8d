//! One game between two players, human or engine.
//!
//! `GameSession` is the only caller of `make_move` outside search: it keeps
//! the legal move list in step with the state, routes engine turns and
//! turns terminal flags into a [`GameOutcome`].

use tracing::{info, warn};

use crate::chess_errors::{ChessError, ChessResult};
use crate::engines::engine_trait::Engine;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::Move;
use crate::session::config::SessionConfig;
use crate::utils::long_algebraic::{parse_long_algebraic, resolve_move};
use crate::utils::move_log::{write_pgn, PgnHeaders};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Checkmate { winner: Color },
    Stalemate,
    DrawByRepetition,
    Resignation { winner: Color },
    DrawByAgreement,
    PlyLimit,
}

impl GameOutcome {
    /// PGN result token.
    pub fn pgn_result(self) -> &'static str {
        match self {
            GameOutcome::Checkmate { winner } | GameOutcome::Resignation { winner } => {
                match winner {
                    Color::Light => "1-0",
                    Color::Dark => "0-1",
                }
            }
            GameOutcome::Stalemate
            | GameOutcome::DrawByRepetition
            | GameOutcome::DrawByAgreement => "1/2-1/2",
            GameOutcome::PlyLimit => "*",
        }
    }

    pub fn describe(self) -> String {
        match self {
            GameOutcome::Checkmate { winner } => format!("checkmate, {} wins", winner.name()),
            GameOutcome::Stalemate => "stalemate, draw".to_owned(),
            GameOutcome::DrawByRepetition => "threefold repetition, draw".to_owned(),
            GameOutcome::Resignation { winner } => {
                format!("{} resigns, {} wins", winner.opposite().name(), winner.name())
            }
            GameOutcome::DrawByAgreement => "draw agreed".to_owned(),
            GameOutcome::PlyLimit => "ply limit reached".to_owned(),
        }
    }
}

pub struct GameSession {
    config: SessionConfig,
    game_state: GameState,
    legal_moves: Vec<Move>,
    /// Indexed by [`Color::index`]; `None` for a human side.
    engines: [Option<Box<dyn Engine>>; 2],
    outcome: Option<GameOutcome>,
}

impl GameSession {
    pub fn new(config: SessionConfig) -> ChessResult<Self> {
        let game_state = initial_state(&config)?;
        let engines = [
            config.white.build_engine(config.side_seed(0)),
            config.black.build_engine(config.side_seed(1)),
        ];
        let mut session = Self {
            config,
            game_state,
            legal_moves: Vec::new(),
            engines,
            outcome: None,
        };
        session.refresh()?;
        info!(
            white = %session.config.white,
            black = %session.config.black,
            "new game session"
        );
        Ok(session)
    }

    #[inline]
    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    #[inline]
    pub fn legal_moves(&self) -> &[Move] {
        &self.legal_moves
    }

    #[inline]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    #[inline]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn is_human_turn(&self) -> bool {
        self.engines[self.game_state.side_to_move.index()].is_none()
    }

    fn has_human(&self) -> bool {
        self.engines.iter().any(Option::is_none)
    }

    /// Play a human move given by its squares. `promotion` is required when
    /// the move promotes.
    pub fn submit_move(
        &mut self,
        start: Square,
        end: Square,
        promotion: Option<PieceKind>,
    ) -> ChessResult<Move> {
        if self.outcome.is_some() {
            return Err(ChessError::GameOver);
        }
        if !self.is_human_turn() {
            return Err(ChessError::NotHumanTurn(self.game_state.side_to_move));
        }

        let mv = resolve_move(&self.legal_moves, start, end, promotion)?;
        self.game_state.make_move(mv)?;
        info!(side = mv.piece_moved.color.name(), mv = %mv, "human move");
        self.refresh()?;
        Ok(mv)
    }

    /// [`submit_move`](Self::submit_move) from coordinate text like `e7e8q`.
    pub fn submit_text(&mut self, text: &str) -> ChessResult<Move> {
        let (start, end, promotion) = parse_long_algebraic(text)?;
        self.submit_move(start, end, promotion)
    }

    /// Let the engine for the side to move play once. Returns `None` on a
    /// human turn or when the game is over.
    pub fn play_engine_turn(&mut self) -> ChessResult<Option<Move>> {
        if self.outcome.is_some() {
            return Ok(None);
        }
        let side = self.game_state.side_to_move;
        let Some(engine) = self.engines[side.index()].as_mut() else {
            return Ok(None);
        };

        let output = engine.choose_move(&mut self.game_state)?;
        let Some(mv) = output.best_move else {
            warn!(side = side.name(), "engine returned no move");
            return Ok(None);
        };
        self.game_state.make_move(mv)?;
        info!(side = side.name(), engine = engine.name(), mv = %mv, "engine move");
        self.refresh()?;
        Ok(Some(mv))
    }

    /// Play engine turns until a human is to move or the game ends.
    pub fn play_engine_turns(&mut self) -> ChessResult<Vec<Move>> {
        let mut played = Vec::new();
        while let Some(mv) = self.play_engine_turn()? {
            played.push(mv);
        }
        Ok(played)
    }

    /// Take back moves until a human is to move again (one ply when both
    /// sides are human). Returns the moves taken back, latest first.
    pub fn undo(&mut self) -> ChessResult<Vec<Move>> {
        let mut undone = Vec::new();
        if let Some(mv) = self.game_state.undo_move() {
            undone.push(mv);
        }
        while self.has_human() && !self.is_human_turn() {
            match self.game_state.undo_move() {
                Some(mv) => undone.push(mv),
                None => break,
            }
        }
        self.outcome = None;
        self.refresh()?;
        info!(plies = undone.len(), "undo");
        Ok(undone)
    }

    /// Start over from the configured position.
    pub fn reset(&mut self) -> ChessResult<()> {
        self.game_state = initial_state(&self.config)?;
        for engine in self.engines.iter_mut().flatten() {
            engine.new_game();
        }
        self.outcome = None;
        self.refresh()?;
        info!("game reset");
        Ok(())
    }

    /// The side to move gives up.
    pub fn resign(&mut self) -> ChessResult<GameOutcome> {
        self.finish(GameOutcome::Resignation {
            winner: self.game_state.side_to_move.opposite(),
        })
    }

    pub fn agree_draw(&mut self) -> ChessResult<GameOutcome> {
        self.finish(GameOutcome::DrawByAgreement)
    }

    fn finish(&mut self, outcome: GameOutcome) -> ChessResult<GameOutcome> {
        if self.outcome.is_some() {
            return Err(ChessError::GameOver);
        }
        self.outcome = Some(outcome);
        info!(outcome = %outcome.describe(), "game over");
        Ok(outcome)
    }

    pub fn status_line(&self) -> String {
        if let Some(outcome) = self.outcome {
            return format!("Game over: {}", outcome.describe());
        }
        let side = self.game_state.side_to_move;
        let check = if self.game_state.in_check { " (check)" } else { "" };
        format!(
            "Move {}, {} to move{}",
            self.game_state.fullmove_number,
            side.name(),
            check
        )
    }

    /// The game so far as PGN, headed with the configured players.
    pub fn pgn(&self) -> String {
        let result = self.outcome.map_or("*", GameOutcome::pgn_result);
        let headers = PgnHeaders::new(
            &self.config.white.to_string(),
            &self.config.black.to_string(),
            result,
        );
        write_pgn(&self.game_state, &headers)
    }

    /// Regenerate legal moves and derive the outcome from the new position.
    fn refresh(&mut self) -> ChessResult<()> {
        self.legal_moves = self.game_state.get_valid_moves()?;

        let state = &self.game_state;
        let outcome = if state.checkmate {
            Some(GameOutcome::Checkmate {
                winner: state.side_to_move.opposite(),
            })
        } else if state.stalemate {
            Some(GameOutcome::Stalemate)
        } else if state.draw_by_repetition {
            Some(GameOutcome::DrawByRepetition)
        } else if self
            .config
            .max_plies
            .is_some_and(|limit| state.move_log.len() >= limit)
        {
            Some(GameOutcome::PlyLimit)
        } else {
            None
        };

        if let Some(outcome) = outcome {
            if self.outcome.is_none() {
                info!(outcome = %outcome.describe(), "game over");
            }
            self.outcome = Some(outcome);
        }
        Ok(())
    }
}

fn initial_state(config: &SessionConfig) -> ChessResult<GameState> {
    match &config.start_fen {
        Some(fen) => GameState::from_fen(fen),
        None => Ok(GameState::new_game()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::config::PlayerKind;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(text: &str) -> Square {
        algebraic_to_square(text).expect("test square should parse")
    }

    fn human_vs_human() -> SessionConfig {
        SessionConfig {
            white: PlayerKind::Human,
            black: PlayerKind::Human,
            ..SessionConfig::default()
        }
    }

    #[test]
    fn fools_mate_ends_the_session() {
        let mut session = GameSession::new(human_vs_human()).expect("session");
        for text in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            session.submit_text(text).expect("legal move");
        }
        assert_eq!(
            session.outcome(),
            Some(GameOutcome::Checkmate {
                winner: Color::Dark
            })
        );
        assert!(session.legal_moves().is_empty());
        assert!(matches!(session.submit_text("e1f2"), Err(ChessError::GameOver)));
        assert!(session.pgn().ends_with("Qh4 0-1\n"));
    }

    #[test]
    fn illegal_and_incomplete_moves_are_rejected_without_changes() {
        let mut session = GameSession::new(SessionConfig {
            start_fen: Some("7k/P7/8/8/8/8/8/4K3 w - - 0 1".to_owned()),
            ..human_vs_human()
        })
        .expect("session");

        assert!(matches!(
            session.submit_move(sq("e1"), sq("e3"), None),
            Err(ChessError::IllegalMove(_))
        ));
        assert!(matches!(
            session.submit_move(sq("a7"), sq("a8"), None),
            Err(ChessError::PromotionPieceRequired { .. })
        ));
        assert!(session.game_state().move_log.is_empty());

        let mv = session
            .submit_move(sq("a7"), sq("a8"), Some(PieceKind::Rook))
            .expect("promotion with a piece");
        assert_eq!(mv.promotion_piece, Some(PieceKind::Rook));
    }

    #[test]
    fn engine_replies_and_undo_returns_to_the_human() {
        let mut session = GameSession::new(SessionConfig {
            seed: Some(17),
            ..SessionConfig::default()
        })
        .expect("session");
        assert!(session.is_human_turn());

        session.submit_text("e2e4").expect("legal move");
        assert!(!session.is_human_turn());
        assert!(matches!(
            session.submit_text("e7e5"),
            Err(ChessError::NotHumanTurn(Color::Dark))
        ));

        let replies = session.play_engine_turns().expect("engine turn");
        assert_eq!(replies.len(), 1);
        assert!(session.is_human_turn());
        assert_eq!(session.game_state().move_log.len(), 2);

        let undone = session.undo().expect("undo");
        assert_eq!(undone.len(), 2);
        assert!(session.game_state().move_log.is_empty());
        assert!(session.is_human_turn());
        assert_eq!(session.legal_moves().len(), 20);
    }

    #[test]
    fn engines_play_each_other_until_the_ply_limit() {
        let mut session = GameSession::new(SessionConfig {
            white: PlayerKind::Random,
            black: PlayerKind::TwoPly,
            seed: Some(3),
            max_plies: Some(6),
            start_fen: None,
        })
        .expect("session");
        let played = session.play_engine_turns().expect("engine turns");
        assert_eq!(played.len(), session.game_state().move_log.len());
        match session.outcome() {
            Some(GameOutcome::PlyLimit) => assert_eq!(played.len(), 6),
            Some(_) => assert!(played.len() <= 6),
            None => panic!("engine game should have stopped"),
        }
    }

    #[test]
    fn resign_draw_and_reset() {
        let mut session = GameSession::new(human_vs_human()).expect("session");
        session.submit_text("e2e4").expect("legal move");
        assert_eq!(
            session.resign().expect("resign"),
            GameOutcome::Resignation {
                winner: Color::Light
            }
        );
        assert!(matches!(session.agree_draw(), Err(ChessError::GameOver)));
        assert!(session.status_line().starts_with("Game over: black resigns"));

        session.reset().expect("reset");
        assert_eq!(session.outcome(), None);
        assert!(session.game_state().move_log.is_empty());
        assert_eq!(session.agree_draw().expect("draw"), GameOutcome::DrawByAgreement);
        assert!(session.pgn().ends_with("1/2-1/2\n"));
    }

    #[test]
    fn repetition_is_reported_as_a_draw() {
        let mut session = GameSession::new(human_vs_human()).expect("session");
        for _ in 0..2 {
            for text in ["g1f3", "g8f6", "f3g1", "f6g8"] {
                session.submit_text(text).expect("legal move");
            }
        }
        assert_eq!(session.outcome(), Some(GameOutcome::DrawByRepetition));
    }

    #[test]
    fn status_line_mentions_check() {
        let session = GameSession::new(SessionConfig {
            start_fen: Some("4k3/8/8/8/8/8/8/R3K2r w - - 0 1".to_owned()),
            ..human_vs_human()
        })
        .expect("session");
        assert_eq!(session.status_line(), "Move 1, white to move (check)");
    }
}
