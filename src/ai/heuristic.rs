//! Static position evaluation
//!
//! Scores are from the Attacker's point of view: positive favours the
//! Attacker, negative the Defender.

use crate::board::unit::{Unit, UnitType};
use crate::core::config::HeuristicKind;
use crate::core::types::{Player, Score, MAX_HEURISTIC_SCORE, MIN_HEURISTIC_SCORE};
use crate::game::state::GameState;

const COMMAND_WEIGHT: Score = 9999;
const UNIT_WEIGHT: Score = 3;

fn weight(unit: &Unit) -> Score {
    match unit.unit_type {
        UnitType::Command => COMMAND_WEIGHT,
        _ => UNIT_WEIGHT,
    }
}

/// e0: unit counts, Command weighted heavily
fn e0(state: &GameState, player: Player) -> Score {
    state
        .board()
        .player_units(player)
        .map(|(_, unit)| weight(unit))
        .sum()
}

/// e1: like e0, scaled by each unit's remaining health
fn e1(state: &GameState, player: Player) -> Score {
    state
        .board()
        .player_units(player)
        .map(|(_, unit)| weight(unit) * Score::from(unit.health))
        .sum()
}

/// Evaluate a position; finished games score at the extremes
pub fn evaluate(kind: HeuristicKind, state: &GameState) -> Score {
    match state.winner() {
        Some(Player::Attacker) => return MAX_HEURISTIC_SCORE,
        Some(Player::Defender) => return MIN_HEURISTIC_SCORE,
        None => {}
    }
    let side: fn(&GameState, Player) -> Score = match kind {
        HeuristicKind::E0 => e0,
        HeuristicKind::E1 => e1,
    };
    side(state, Player::Attacker) - side(state, Player::Defender)
}
