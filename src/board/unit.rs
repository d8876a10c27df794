//! Units, their types, and the damage / repair matrices

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::types::Player;

/// Highest health a unit can have
pub const MAX_HEALTH: u8 = 9;

/// Unit types, in matrix order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitType {
    /// Losing it loses the game
    Command,
    /// Agile, repairs Command/Generic/Defense
    Repair,
    /// Agile, hits Command hard
    Offense,
    Generic,
    Defense,
}

impl UnitType {
    pub const ALL: [UnitType; 5] = [
        UnitType::Command,
        UnitType::Repair,
        UnitType::Offense,
        UnitType::Generic,
        UnitType::Defense,
    ];

    /// Matrix row / column index
    pub fn index(self) -> usize {
        match self {
            UnitType::Command => 0,
            UnitType::Repair => 1,
            UnitType::Offense => 2,
            UnitType::Generic => 3,
            UnitType::Defense => 4,
        }
    }

    /// Agile units move in any orthogonal direction and ignore engagement
    pub fn is_agile(self) -> bool {
        matches!(self, UnitType::Repair | UnitType::Offense)
    }

    /// Uppercase letter used in board renderings
    pub fn letter(self) -> char {
        match self {
            UnitType::Command => 'C',
            UnitType::Repair => 'R',
            UnitType::Offense => 'O',
            UnitType::Generic => 'G',
            UnitType::Defense => 'D',
        }
    }
}

/// Damage dealt, indexed [attacker][target]
pub const DAMAGE_TABLE: [[u8; 5]; 5] = [
    [3, 3, 3, 3, 1], // Command
    [1, 1, 6, 1, 1], // Repair
    [9, 6, 1, 6, 1], // Offense
    [3, 3, 3, 3, 1], // Generic
    [1, 1, 1, 1, 1], // Defense
];

/// Health restored, indexed [repairer][target]
pub const REPAIR_TABLE: [[u8; 5]; 5] = [
    [0, 1, 1, 0, 0], // Command
    [3, 0, 0, 3, 3], // Repair
    [0, 0, 0, 0, 0], // Offense
    [0, 0, 0, 0, 0], // Generic
    [0, 0, 0, 0, 0], // Defense
];

/// A unit on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Unit {
    pub player: Player,
    pub unit_type: UnitType,
    pub health: u8,
}

impl Unit {
    /// A full-health unit
    pub fn new(player: Player, unit_type: UnitType) -> Self {
        Self {
            player,
            unit_type,
            health: MAX_HEALTH,
        }
    }

    /// A unit with explicit health (clamped to 0..=9)
    pub fn with_health(player: Player, unit_type: UnitType, health: u8) -> Self {
        Self {
            player,
            unit_type,
            health: health.min(MAX_HEALTH),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn is_full_health(&self) -> bool {
        self.health >= MAX_HEALTH
    }

    /// Shift health by `delta`, clamped to 0..=9
    ///
    /// Removing a dead unit from the board is the caller's job.
    pub fn mod_health(&mut self, delta: i32) {
        let health = i64::from(self.health) + i64::from(delta);
        self.health = health.clamp(0, i64::from(MAX_HEALTH)) as u8;
    }

    /// Damage this unit deals to `target`, never more than it has left
    pub fn damage_amount(&self, target: &Unit) -> u8 {
        DAMAGE_TABLE[self.unit_type.index()][target.unit_type.index()].min(target.health)
    }

    /// Health this unit restores to `target`, never past full health
    pub fn repair_amount(&self, target: &Unit) -> u8 {
        let amount = REPAIR_TABLE[self.unit_type.index()][target.unit_type.index()];
        amount.min(MAX_HEALTH.saturating_sub(target.health))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.player.letter(),
            self.unit_type.letter(),
            self.health
        )
    }
}
