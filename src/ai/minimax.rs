//! Minimax search with optional alpha-beta pruning
//!
//! Iterative deepening from depth 1 to `max_depth`. Every node forks the
//! state, plays the candidate through the normal rule engine, and recurses.
//! Iterations up to `min_depth` always finish; deeper ones give up as soon as
//! the budget runs out and the last finished iteration's move is played.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::debug;

use crate::ai::candidates::move_candidates;
use crate::ai::heuristic::evaluate;
use crate::ai::{Decision, DecisionPolicy, SearchBudget};
use crate::board::coord::CoordPair;
use crate::core::config::{GameOptions, HeuristicKind};
use crate::core::types::{Player, Score, MAX_HEURISTIC_SCORE, MIN_HEURISTIC_SCORE};
use crate::game::state::GameState;

/// Below this many root moves the rayon pool costs more than it saves
pub const PARALLEL_THRESHOLD: usize = 8;

/// Leaf evaluations keyed by ply
#[derive(Debug, Default)]
struct Tally(BTreeMap<u32, u64>);

impl Tally {
    fn record(&mut self, ply: u32) {
        *self.0.entry(ply).or_insert(0) += 1;
    }

    fn absorb(&mut self, other: Tally) {
        for (ply, count) in other.0 {
            *self.0.entry(ply).or_insert(0) += count;
        }
    }

    fn average_depth(&self) -> f32 {
        let (sum, count) = self
            .0
            .iter()
            .fold((0u64, 0u64), |(s, c), (&ply, &n)| (s + u64::from(ply) * n, c + n));
        if count == 0 {
            0.0
        } else {
            sum as f32 / count as f32
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct SearchParams {
    heuristic: HeuristicKind,
    alpha_beta: bool,
    /// May this iteration stop early when the budget expires?
    interruptible: bool,
}

/// Depth/time bounded adversarial search
pub struct MinimaxPolicy {
    heuristic: HeuristicKind,
    max_depth: u32,
    min_depth: u32,
    alpha_beta: bool,
    randomize_moves: bool,
    parallel: bool,
    rng: ChaCha8Rng,
}

impl MinimaxPolicy {
    pub fn from_options(options: &GameOptions, seed: u64) -> Self {
        let max_depth = options.max_depth.unwrap_or(4).max(1);
        Self {
            heuristic: options.heuristic,
            max_depth,
            min_depth: options.min_depth.unwrap_or(1).clamp(1, max_depth),
            alpha_beta: options.alpha_beta,
            randomize_moves: options.randomize_moves,
            parallel: options.parallel,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Iterative deepening; also returns the deepest iteration that finished
    fn deepen(&mut self, state: &GameState, budget: &SearchBudget) -> (Decision, u32) {
        let mut candidates = move_candidates(state);
        if candidates.is_empty() {
            return (Decision::none(evaluate(self.heuristic, state)), 0);
        }
        if self.randomize_moves {
            candidates.shuffle(&mut self.rng);
        }

        let mut tally = Tally::default();
        let mut best: Option<(Score, CoordPair)> = None;
        let mut completed = 0;

        for depth in 1..=self.max_depth {
            let interruptible = depth > self.min_depth;
            if interruptible && budget.expired() {
                break;
            }
            let params = SearchParams {
                heuristic: self.heuristic,
                alpha_beta: self.alpha_beta,
                interruptible,
            };

            let mut iteration = Tally::default();
            let result = self.search_root(state, &candidates, depth, params, budget, &mut iteration);
            tally.absorb(iteration);

            match result {
                Some((score, mv)) => {
                    debug!("depth {} best {} score {}", depth, mv, score);
                    best = Some((score, mv));
                    completed = depth;
                    // Search the previous best first next time round
                    if let Some(pos) = candidates.iter().position(|c| *c == mv) {
                        candidates[..=pos].rotate_right(1);
                    }
                    if score == MAX_HEURISTIC_SCORE || score == MIN_HEURISTIC_SCORE {
                        break;
                    }
                }
                None => {
                    debug!("depth {} abandoned, budget exhausted", depth);
                    break;
                }
            }
        }

        let avg_depth = tally.average_depth();
        state.stats().with(|stats| stats.merge(&tally.0));

        let decision = match best {
            Some((score, mv)) => Decision {
                score,
                chosen: Some(mv),
                avg_depth,
            },
            None => Decision::none(evaluate(self.heuristic, state)),
        };
        (decision, completed)
    }

    /// Search one iteration; None when the budget cut it short
    fn search_root(
        &self,
        state: &GameState,
        candidates: &[CoordPair],
        depth: u32,
        params: SearchParams,
        budget: &SearchBudget,
        tally: &mut Tally,
    ) -> Option<(Score, CoordPair)> {
        let maximizing = state.next_player() == Player::Attacker;

        let scored: Vec<(CoordPair, Score)> =
            if self.parallel && candidates.len() >= PARALLEL_THRESHOLD {
                // PARALLEL: every worker plays on its own fork
                let results: Vec<(CoordPair, Option<Score>, Tally)> = candidates
                    .par_iter()
                    .map(|&mv| {
                        let mut local = Tally::default();
                        let score = search_child(
                            state,
                            mv,
                            depth,
                            MIN_HEURISTIC_SCORE,
                            MAX_HEURISTIC_SCORE,
                            params,
                            budget,
                            &mut local,
                        );
                        (mv, score, local)
                    })
                    .collect();
                let mut scored = Vec::with_capacity(results.len());
                for (mv, score, local) in results {
                    tally.absorb(local);
                    scored.push((mv, score?));
                }
                scored
            } else {
                let mut alpha = MIN_HEURISTIC_SCORE;
                let mut beta = MAX_HEURISTIC_SCORE;
                let mut scored = Vec::with_capacity(candidates.len());
                for &mv in candidates {
                    let score = search_child(state, mv, depth, alpha, beta, params, budget, tally)?;
                    if params.alpha_beta {
                        if maximizing {
                            alpha = alpha.max(score);
                        } else {
                            beta = beta.min(score);
                        }
                    }
                    scored.push((mv, score));
                }
                scored
            };

        // First best wins ties, so move order decides between equals
        let mut best: Option<(Score, CoordPair)> = None;
        for (mv, score) in scored {
            let better = match best {
                None => true,
                Some((best_score, _)) if maximizing => score > best_score,
                Some((best_score, _)) => score < best_score,
            };
            if better {
                best = Some((score, mv));
            }
        }
        best
    }
}

/// Play `mv` on a fork of `state` and search below it
#[allow(clippy::too_many_arguments)]
fn search_child(
    state: &GameState,
    mv: CoordPair,
    depth: u32,
    alpha: Score,
    beta: Score,
    params: SearchParams,
    budget: &SearchBudget,
    tally: &mut Tally,
) -> Option<Score> {
    let mut child = state.fork();
    if child.perform_move(mv).is_err() {
        // Candidates come from the enumerator, so this only guards misuse
        return Some(if state.next_player() == Player::Attacker {
            MIN_HEURISTIC_SCORE
        } else {
            MAX_HEURISTIC_SCORE
        });
    }
    child.next_turn();
    minimax(&child, depth - 1, 1, alpha, beta, params, budget, tally)
}

#[allow(clippy::too_many_arguments)]
fn minimax(
    state: &GameState,
    depth_left: u32,
    ply: u32,
    mut alpha: Score,
    mut beta: Score,
    params: SearchParams,
    budget: &SearchBudget,
    tally: &mut Tally,
) -> Option<Score> {
    if params.interruptible && budget.expired() {
        return None;
    }

    if depth_left == 0 || state.is_finished() {
        tally.record(ply);
        return Some(evaluate(params.heuristic, state));
    }

    let candidates = move_candidates(state);
    if candidates.is_empty() {
        tally.record(ply);
        return Some(evaluate(params.heuristic, state));
    }

    let maximizing = state.next_player() == Player::Attacker;
    let mut best = if maximizing {
        MIN_HEURISTIC_SCORE
    } else {
        MAX_HEURISTIC_SCORE
    };

    for mv in candidates {
        let mut child = state.fork();
        if child.perform_move(mv).is_err() {
            continue;
        }
        child.next_turn();
        let score = minimax(&child, depth_left - 1, ply + 1, alpha, beta, params, budget, tally)?;

        if maximizing {
            best = best.max(score);
            alpha = alpha.max(best);
        } else {
            best = best.min(score);
            beta = beta.min(best);
        }
        if params.alpha_beta && beta <= alpha {
            break;
        }
    }

    Some(best)
}

impl DecisionPolicy for MinimaxPolicy {
    fn name(&self) -> &'static str {
        if self.alpha_beta {
            "alpha-beta"
        } else {
            "minimax"
        }
    }

    fn select_move(&mut self, state: &GameState, budget: &SearchBudget) -> Decision {
        self.deepen(state, budget).0
    }
}
