//! Shared primitive types used across the engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Heuristic / search score
pub type Score = i32;

/// Upper bound of every heuristic score (a won position)
pub const MAX_HEURISTIC_SCORE: Score = 2_000_000_000;
/// Lower bound of every heuristic score (a lost position)
pub const MIN_HEURISTIC_SCORE: Score = -2_000_000_000;

/// The two sides of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Player {
    #[default]
    Attacker,
    Defender,
}

impl Player {
    /// The other side
    pub fn next(self) -> Self {
        match self {
            Player::Attacker => Player::Defender,
            Player::Defender => Player::Attacker,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Player::Attacker => "Attacker",
            Player::Defender => "Defender",
        }
    }

    /// Lowercase letter used in board renderings
    pub fn letter(self) -> char {
        match self {
            Player::Attacker => 'a',
            Player::Defender => 'd',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
