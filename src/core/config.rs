//! Game configuration with documented defaults
//!
//! Options can be built in code, loaded from a TOML file, or assembled by the
//! command-line front end. Every option has a default so a partial TOML file
//! is valid.

use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, WargameError};
use crate::core::types::Player;

/// Smallest board on which the two starting layouts do not overlap
pub const MIN_DIM: usize = 4;
/// Largest board addressable by the single-symbol column labels
pub const MAX_DIM: usize = 16;

/// Which sides are played by a human (or the broker) and which by the computer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameType {
    /// Both sides human
    #[default]
    AttackerVsDefender,
    /// Human attacker, computer defender
    AttackerVsComp,
    /// Computer attacker, human defender
    CompVsDefender,
    /// Both sides computer
    CompVsComp,
}

impl GameType {
    /// Is this side driven by a decision policy?
    pub fn is_computer(&self, player: Player) -> bool {
        match self {
            GameType::AttackerVsDefender => false,
            GameType::AttackerVsComp => player == Player::Defender,
            GameType::CompVsDefender => player == Player::Attacker,
            GameType::CompVsComp => true,
        }
    }

    /// "Human" or "AI" label for a side
    pub fn player_kind(&self, player: Player) -> &'static str {
        if self.is_computer(player) {
            "AI"
        } else {
            "Human"
        }
    }
}

impl FromStr for GameType {
    type Err = String;

    /// Parse the command-line spelling: auto, attacker, defender or manual
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "manual" => Ok(GameType::AttackerVsDefender),
            "attacker" => Ok(GameType::AttackerVsComp),
            "defender" => Ok(GameType::CompVsDefender),
            "auto" | "comp" => Ok(GameType::CompVsComp),
            other => Err(format!(
                "unknown game type '{}' (expected auto|attacker|defender|manual)",
                other
            )),
        }
    }
}

/// Decision policy used for computer-controlled sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// Uniform random choice among legal moves
    #[default]
    Random,
    /// Depth/time bounded minimax, optionally with alpha-beta pruning
    Minimax,
}

impl FromStr for PolicyKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "random" => Ok(PolicyKind::Random),
            "minimax" => Ok(PolicyKind::Minimax),
            other => Err(format!("unknown policy '{}' (expected random|minimax)", other)),
        }
    }
}

/// Static evaluation used by the search at its horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HeuristicKind {
    /// Unit counts, Command weighted heavily
    #[default]
    E0,
    /// Unit counts weighted by remaining health
    E1,
}

impl FromStr for HeuristicKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "e0" => Ok(HeuristicKind::E0),
            "e1" => Ok(HeuristicKind::E1),
            other => Err(format!("unknown heuristic '{}' (expected e0|e1)", other)),
        }
    }
}

/// Options for one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameOptions {
    /// Board side length
    ///
    /// Must stay within MIN_DIM..=MAX_DIM: below 4 the two starting layouts
    /// collide, above 16 columns have no label symbol.
    pub dim: usize,

    /// Deepest iteration the search may reach
    pub max_depth: Option<u32>,

    /// Iterations up to and including this depth always run to completion
    ///
    /// The time budget is only honoured once a result at this depth exists,
    /// so a computer side never plays an unsearched move.
    pub min_depth: Option<u32>,

    /// Wall-clock budget per decision, in seconds
    pub max_time: Option<f64>,

    /// Turn cap; the Defender wins when it is reached
    pub max_turns: Option<u32>,

    /// Which sides the computer plays
    pub game_type: GameType,

    /// Prune the search tree with alpha-beta
    pub alpha_beta: bool,

    /// Shuffle move order before searching (random tie-breaking)
    pub randomize_moves: bool,

    /// Move broker URL
    pub broker: Option<String>,

    /// Decision policy for computer sides
    pub policy: PolicyKind,

    /// Horizon evaluation for the minimax policy
    pub heuristic: HeuristicKind,

    /// RNG seed; a fresh seed is drawn when absent
    pub seed: Option<u64>,

    /// Evaluate root candidates on the rayon pool
    pub parallel: bool,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            dim: 5,
            max_depth: Some(4),
            min_depth: Some(2),
            max_time: Some(5.0),
            max_turns: Some(100),
            game_type: GameType::AttackerVsDefender,
            alpha_beta: true,
            randomize_moves: true,
            broker: None,
            policy: PolicyKind::Random,
            heuristic: HeuristicKind::E0,
            seed: None,
            parallel: false,
        }
    }
}

impl GameOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a TOML file; missing keys take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let options: GameOptions = toml::from_str(&contents)?;
        options.validate()?;
        Ok(options)
    }

    /// Check options for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !(MIN_DIM..=MAX_DIM).contains(&self.dim) {
            return Err(WargameError::Config(format!(
                "dim ({}) must be between {} and {}",
                self.dim, MIN_DIM, MAX_DIM
            )));
        }

        if let (Some(min), Some(max)) = (self.min_depth, self.max_depth) {
            if min > max {
                return Err(WargameError::Config(format!(
                    "min_depth ({}) should be <= max_depth ({})",
                    min, max
                )));
            }
        }

        if self.max_depth == Some(0) {
            return Err(WargameError::Config("max_depth must be at least 1".into()));
        }

        if let Some(secs) = self.max_time {
            if !secs.is_finite() || secs <= 0.0 {
                return Err(WargameError::Config(format!(
                    "max_time ({}) must be a positive number of seconds",
                    secs
                )));
            }
            if Duration::try_from_secs_f64(secs).is_err() {
                return Err(WargameError::Config(format!(
                    "max_time ({}) is too large",
                    secs
                )));
            }
        }

        Ok(())
    }

    /// Search time budget as a Duration
    ///
    /// Values `validate()` would reject saturate instead of panicking.
    pub fn max_time_duration(&self) -> Option<Duration> {
        self.max_time
            .map(|secs| Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX))
    }

    /// Default trace file name, encoding the main options
    ///
    /// The timeout is always written with a decimal point (`5.0`). Without a
    /// turn cap the last field is `off`.
    pub fn trace_file_name(&self) -> String {
        let timeout = self
            .max_time
            .map(|t| format!("{:?}", t))
            .unwrap_or_else(|| "off".to_string());
        let turns = self
            .max_turns
            .map(|t| t.to_string())
            .unwrap_or_else(|| "off".to_string());
        format!("gameTrace-{}-{}-{}.txt", self.alpha_beta, timeout, turns)
    }
}
