//! Computer players
//!
//! Architecture: Trait + Options hybrid
//! - DecisionPolicy trait defines the interface for swappable players
//! - GameOptions selects the policy and tunes the search
//! - SearchBudget carries the time limit and an optional cancel flag

pub mod candidates;
pub mod heuristic;
pub mod minimax;
pub mod random;

pub use candidates::{move_candidates, move_candidates_for};
pub use heuristic::evaluate;
pub use minimax::MinimaxPolicy;
pub use random::RandomPolicy;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::info;

use crate::board::coord::CoordPair;
use crate::core::config::{GameOptions, PolicyKind};
use crate::core::types::Score;
use crate::game::state::GameState;

/// What a policy decided
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    /// Heuristic value of the chosen line, Attacker positive
    pub score: Score,
    /// None when the side to play has no legal move
    pub chosen: Option<CoordPair>,
    /// Mean depth of the evaluated leaves
    pub avg_depth: f32,
}

impl Decision {
    pub fn none(score: Score) -> Self {
        Self {
            score,
            chosen: None,
            avg_depth: 0.0,
        }
    }
}

/// Wall-clock limit for one decision
#[derive(Debug, Clone)]
pub struct SearchBudget {
    started: Instant,
    max_time: Option<Duration>,
    cancel: Option<Arc<AtomicBool>>,
}

impl SearchBudget {
    pub fn new(max_time: Option<Duration>) -> Self {
        Self {
            started: Instant::now(),
            max_time,
            cancel: None,
        }
    }

    pub fn unlimited() -> Self {
        Self::new(None)
    }

    pub fn from_options(options: &GameOptions) -> Self {
        Self::new(options.max_time_duration())
    }

    /// Also stop once `flag` is raised
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn expired(&self) -> bool {
        if let Some(flag) = &self.cancel {
            if flag.load(Ordering::Relaxed) {
                return true;
            }
        }
        self.max_time.is_some_and(|max| self.elapsed() >= max)
    }
}

/// Trait for computer player implementations
pub trait DecisionPolicy: Send {
    /// Short label for logs
    fn name(&self) -> &'static str;

    /// Choose a move for the side to play without changing `state`
    fn select_move(&mut self, state: &GameState, budget: &SearchBudget) -> Decision;
}

/// Build the policy named in the options
pub fn build_policy(options: &GameOptions) -> Box<dyn DecisionPolicy> {
    let seed = options.seed.unwrap_or_else(rand::random);
    match options.policy {
        PolicyKind::Random => Box::new(RandomPolicy::new(seed)),
        PolicyKind::Minimax => Box::new(MinimaxPolicy::from_options(options, seed)),
    }
}

/// Ask `policy` for a move, then log the search statistics
pub fn suggest_move(state: &GameState, policy: &mut dyn DecisionPolicy) -> Decision {
    let budget = SearchBudget::from_options(state.options());
    let decision = policy.select_move(state, &budget);
    let elapsed = budget.elapsed().as_secs_f64();

    let stats = state.stats().with(|stats| {
        stats.total_seconds += elapsed;
        stats.clone()
    });

    info!("{} heuristic score: {}", policy.name(), decision.score);
    info!("Average recursive depth: {:.1}", decision.avg_depth);
    info!("Evals per depth: {}", stats.per_depth_summary());
    if let Some(rate) = stats.evaluations_per_second() {
        info!("Eval perf.: {:.1}k/s", rate / 1000.0);
    }
    info!("Elapsed time: {:.1}s", elapsed);

    decision
}
