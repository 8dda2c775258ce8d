//! Crate root module declarations for the Sable Chess rules engine.
//!
//! This file exposes the rules core (game state, move values, legal move
//! generation), the shallow material search, the engine wrappers, the
//! console session layer and the notation/serialization helpers so the
//! binary, tests and benches can import stable module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod undo_state;
}

pub mod moves {
    pub mod chess_move;
    pub mod notation;
}

pub mod move_generation {
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_bishop;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_queen;
    pub mod legal_moves_rook;
    pub mod move_generator;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod two_ply;
}

pub mod engines {
    pub mod engine_random;
    pub mod engine_trait;
    pub mod engine_two_ply;
}

pub mod session {
    pub mod config;
    pub mod console;
    pub mod game_session;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod move_log;
    pub mod render_game_state;
}
