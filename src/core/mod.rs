pub mod config;
pub mod error;
pub mod types;

pub use config::{GameOptions, GameType, HeuristicKind, PolicyKind};
pub use error::{Result, WargameError};
pub use types::{Player, Score, MAX_HEURISTIC_SCORE, MIN_HEURISTIC_SCORE};
