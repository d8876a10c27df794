//! Game state, turn management, statistics, and the trace

pub mod state;
pub mod stats;
pub mod trace;

pub use state::{GameState, GameStatus};
pub use stats::{SearchStats, SharedStats};
pub use trace::GameTrace;
