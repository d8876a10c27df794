use thiserror::Error;

use crate::board::coord::CoordPair;
use crate::core::types::Player;
use crate::rules::legality::IllegalMove;

#[derive(Error, Debug)]
pub enum WargameError {
    #[error("invalid move {mv}: {reason}")]
    InvalidMove { mv: CoordPair, reason: IllegalMove },

    #[error("Malformed coordinates: {0:?}")]
    MalformedCoordinate(String),

    #[error("Broker error: {0}")]
    Broker(String),

    #[error("{0} has no legal moves")]
    NoLegalMoves(Player),

    #[error("Game is over, {0} won")]
    GameOver(Player),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl WargameError {
    /// Errors the move source should answer with "try again" rather than abort
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            WargameError::InvalidMove { .. }
                | WargameError::MalformedCoordinate(_)
                | WargameError::Broker(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, WargameError>;
