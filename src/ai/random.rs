//! Uniform random policy - the default computer player

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::ai::candidates::move_candidates;
use crate::ai::{Decision, DecisionPolicy, SearchBudget};
use crate::game::state::GameState;

/// Picks any legal move with equal probability
pub struct RandomPolicy {
    rng: ChaCha8Rng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl DecisionPolicy for RandomPolicy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn select_move(&mut self, state: &GameState, _budget: &SearchBudget) -> Decision {
        let candidates = move_candidates(state);
        state.stats().with(|stats| stats.record_evaluations(0, 1));
        match candidates.choose(&mut self.rng) {
            Some(&mv) => Decision {
                score: 0,
                chosen: Some(mv),
                avg_depth: 1.0,
            },
            None => Decision::none(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameOptions;

    #[test]
    fn test_random_move_is_legal() {
        let game = GameState::new(GameOptions::default()).unwrap();
        let mut policy = RandomPolicy::new(7);
        for _ in 0..20 {
            let decision = policy.select_move(&game, &SearchBudget::unlimited());
            let mv = decision.chosen.unwrap();
            assert!(game.is_valid_move(mv));
        }
    }

    #[test]
    fn test_same_seed_same_choices() {
        let game = GameState::new(GameOptions::default()).unwrap();
        let mut a = RandomPolicy::new(99);
        let mut b = RandomPolicy::new(99);
        for _ in 0..10 {
            let budget = SearchBudget::unlimited();
            assert_eq!(
                a.select_move(&game, &budget).chosen,
                b.select_move(&game, &budget).chosen
            );
        }
    }

    #[test]
    fn test_records_root_evaluation() {
        let game = GameState::new(GameOptions::default()).unwrap();
        let mut policy = RandomPolicy::new(1);
        policy.select_move(&game, &SearchBudget::unlimited());
        assert_eq!(game.stats().snapshot().evaluations_per_depth.get(&0), Some(&1));
    }
}
