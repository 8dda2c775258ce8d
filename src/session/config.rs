//! Session configuration.
//!
//! Plain data with a `Default`; the binary fills it from command-line
//! arguments and tests build it directly.

use std::fmt;

use clap::ValueEnum;

use crate::engines::engine_random::RandomEngine;
use crate::engines::engine_trait::Engine;
use crate::engines::engine_two_ply::TwoPlyEngine;

/// Who plays one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlayerKind {
    Human,
    /// Uniform random legal moves.
    Random,
    /// Two-ply material search.
    TwoPly,
}

impl PlayerKind {
    /// The engine for this side, or `None` for a human.
    pub fn build_engine(self, seed: Option<u64>) -> Option<Box<dyn Engine>> {
        match self {
            PlayerKind::Human => None,
            PlayerKind::Random => Some(Box::new(RandomEngine::new(seed))),
            PlayerKind::TwoPly => Some(Box::new(TwoPlyEngine::new(seed))),
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlayerKind::Human => "Human",
            PlayerKind::Random => "Random engine",
            PlayerKind::TwoPly => "Two-ply engine",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub white: PlayerKind,
    pub black: PlayerKind,
    /// Base seed for engine randomness; each side derives its own.
    pub seed: Option<u64>,
    /// Stop the game after this many plies in total.
    pub max_plies: Option<usize>,
    /// Start from this FEN instead of the initial position.
    pub start_fen: Option<String>,
}

impl SessionConfig {
    /// Seed for one side's engine, distinct per side.
    pub fn side_seed(&self, side_index: usize) -> Option<u64> {
        self.seed.map(|seed| seed.wrapping_add(side_index as u64))
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            white: PlayerKind::Human,
            black: PlayerKind::TwoPly,
            seed: None,
            max_plies: None,
            start_fen: None,
        }
    }
}
