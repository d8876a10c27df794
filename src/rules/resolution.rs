//! Move resolution - applying an admitted move to the board
//!
//! Callers check legality first; resolution assumes the move is legal.

use crate::board::coord::{Coord, CoordPair};
use crate::board::grid::Board;
use crate::board::unit::UnitType;
use crate::core::types::Player;

/// Health every neighbour loses when a unit self-destructs
pub const SELF_DESTRUCT_DAMAGE: i32 = 2;

/// What a resolved move did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Mover removed, `splashed` neighbours took damage
    SelfDestruct { splashed: u8 },
    /// Both units lost `damage` health
    Attack { damage: u8 },
    /// Target gained `amount` health
    Repair { amount: u8 },
    /// Same-type friend at the destination; nothing changes
    Hold,
    /// Mover stepped into the empty destination
    Relocate,
}

/// Command units removed while resolving a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommandLoss {
    pub attacker: bool,
    pub defender: bool,
}

impl CommandLoss {
    fn record(&mut self, player: Player) {
        match player {
            Player::Attacker => self.attacker = true,
            Player::Defender => self.defender = true,
        }
    }
}

/// Result of resolving one move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub outcome: MoveOutcome,
    pub commands_lost: CommandLoss,
}

/// Apply a legal move to the board
pub fn resolve_move(board: &mut Board, mv: CoordPair) -> Resolution {
    let mut commands_lost = CommandLoss::default();
    let outcome = match (board.get(mv.src).copied(), board.get(mv.dst).copied()) {
        (None, _) => MoveOutcome::Hold,
        (Some(_), _) if mv.is_self_move() => {
            let splashed = self_destruct(board, mv.src, &mut commands_lost);
            MoveOutcome::SelfDestruct { splashed }
        }
        (Some(mover), Some(target)) if mover.player != target.player => {
            let damage = mover.damage_amount(&target);
            mod_health(board, mv.dst, -i32::from(damage), &mut commands_lost);
            mod_health(board, mv.src, -i32::from(damage), &mut commands_lost);
            MoveOutcome::Attack { damage }
        }
        (Some(mover), Some(target)) if mover.unit_type == target.unit_type => MoveOutcome::Hold,
        (Some(mover), Some(target)) => {
            let amount = mover.repair_amount(&target);
            mod_health(board, mv.dst, i32::from(amount), &mut commands_lost);
            MoveOutcome::Repair { amount }
        }
        (Some(mover), None) => {
            board.set(mv.dst, Some(mover));
            board.set(mv.src, None);
            MoveOutcome::Relocate
        }
    };

    Resolution {
        outcome,
        commands_lost,
    }
}

/// Shift the health of the unit at `coord`, removing it if it dies
pub fn mod_health(board: &mut Board, coord: Coord, delta: i32, lost: &mut CommandLoss) {
    let Some(unit) = board.get_mut(coord) else {
        return;
    };
    unit.mod_health(delta);
    if !unit.is_alive() {
        remove_unit(board, coord, lost);
    }
}

fn remove_unit(board: &mut Board, coord: Coord, lost: &mut CommandLoss) {
    if let Some(unit) = board.take(coord) {
        if unit.unit_type == UnitType::Command {
            lost.record(unit.player);
        }
    }
}

/// Splash every occupied neighbour, then remove the mover
fn self_destruct(board: &mut Board, src: Coord, lost: &mut CommandLoss) -> u8 {
    let mut splashed = 0;
    for coord in src.surrounding() {
        if !board.is_empty(coord) {
            mod_health(board, coord, -SELF_DESTRUCT_DAMAGE, lost);
            splashed += 1;
        }
    }
    remove_unit(board, src, lost);
    splashed
}
