//! Move legality
//!
//! A move is legal when the source holds a unit of the side to play and three
//! independent rules agree:
//! - direction: agile units step any orthogonal way, the rest only toward
//!   the enemy corner (Attacker up/left, Defender down/right)
//! - engagement: a non-agile unit next to an enemy cannot act on any other cell
//! - target: the destination must be empty, an enemy, a same-type friend, or
//!   a damaged friend this unit can actually repair
//!
//! Self-destruct (src == dst) passes the direction and engagement rules.

use thiserror::Error;

use crate::board::coord::{Coord, CoordPair};
use crate::board::grid::Board;
use crate::board::unit::Unit;
use crate::core::types::Player;

/// Why a move was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("coordinates are off the board")]
    OutOfBounds,

    #[error("no unit at the source cell")]
    NoUnitAtSource,

    #[error("source unit belongs to {0}")]
    NotYourUnit(Player),

    #[error("destination is not orthogonally adjacent")]
    NotAdjacent,

    #[error("unit cannot move in that direction")]
    WrongDirection,

    #[error("unit is engaged in combat")]
    EngagementLocked,

    #[error("target is already at full health")]
    TargetAtFullHealth,

    #[error("unit cannot repair that target")]
    CannotRepair,
}

/// Check a move for `player` on `board`
pub fn check_move(board: &Board, player: Player, mv: CoordPair) -> Result<(), IllegalMove> {
    let CoordPair { src, dst } = mv;
    if !board.is_valid_coord(src) || !board.is_valid_coord(dst) {
        return Err(IllegalMove::OutOfBounds);
    }

    let unit = board.get(src).ok_or(IllegalMove::NoUnitAtSource)?;
    if unit.player != player {
        return Err(IllegalMove::NotYourUnit(unit.player));
    }

    check_direction(unit, src, dst)?;
    check_engagement(board, unit, src, dst)?;
    check_target(board, unit, src, dst)
}

/// Boolean form of [`check_move`]
pub fn is_valid_move(board: &Board, player: Player, mv: CoordPair) -> bool {
    check_move(board, player, mv).is_ok()
}

/// Destination-direction rule
pub fn check_direction(unit: &Unit, src: Coord, dst: Coord) -> Result<(), IllegalMove> {
    if src == dst {
        return Ok(());
    }
    if !src.is_adjacent_to(&dst) {
        return Err(IllegalMove::NotAdjacent);
    }
    if unit.unit_type.is_agile() {
        return Ok(());
    }

    let allowed = match unit.player {
        Player::Attacker => dst.row == src.row - 1 || dst.col == src.col - 1,
        Player::Defender => dst.row == src.row + 1 || dst.col == src.col + 1,
    };
    if allowed {
        Ok(())
    } else {
        Err(IllegalMove::WrongDirection)
    }
}

/// Engagement-lock rule
///
/// The destination cell itself is not counted, so a unit whose only
/// neighbouring enemy is its target may still strike it.
pub fn check_engagement(
    board: &Board,
    unit: &Unit,
    src: Coord,
    dst: Coord,
) -> Result<(), IllegalMove> {
    if src == dst || unit.unit_type.is_agile() {
        return Ok(());
    }
    if is_engaged(board, unit, src, Some(dst)) {
        Err(IllegalMove::EngagementLocked)
    } else {
        Ok(())
    }
}

/// Does `unit` at `src` have an enemy on an orthogonal neighbour other than `except`?
pub fn is_engaged(board: &Board, unit: &Unit, src: Coord, except: Option<Coord>) -> bool {
    src.adjacent()
        .into_iter()
        .filter(|c| Some(*c) != except)
        .filter_map(|c| board.get(c))
        .any(|other| other.player != unit.player)
}

/// Destination-content rule
pub fn check_target(
    board: &Board,
    unit: &Unit,
    src: Coord,
    dst: Coord,
) -> Result<(), IllegalMove> {
    if src == dst {
        return Ok(());
    }
    let Some(target) = board.get(dst) else {
        return Ok(());
    };
    if target.player != unit.player || target.unit_type == unit.unit_type {
        return Ok(());
    }
    if target.is_full_health() {
        return Err(IllegalMove::TargetAtFullHealth);
    }
    if unit.repair_amount(target) == 0 {
        return Err(IllegalMove::CannotRepair);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::unit::UnitType;

    fn board_with(units: &[(i32, i32, Player, UnitType, u8)]) -> Board {
        let mut board = Board::empty(5);
        for &(row, col, player, unit_type, health) in units {
            board.set(
                Coord::new(row, col),
                Some(Unit::with_health(player, unit_type, health)),
            );
        }
        board
    }

    #[test]
    fn test_attacker_moves_up_or_left_only() {
        let board = board_with(&[(2, 2, Player::Attacker, UnitType::Generic, 9)]);
        let src = Coord::new(2, 2);
        let legal: Vec<_> = src
            .adjacent()
            .into_iter()
            .filter(|dst| is_valid_move(&board, Player::Attacker, CoordPair::new(src, *dst)))
            .collect();
        assert_eq!(legal, vec![Coord::new(1, 2), Coord::new(2, 1)]);
    }

    #[test]
    fn test_defender_moves_down_or_right_only() {
        let board = board_with(&[(2, 2, Player::Defender, UnitType::Defense, 9)]);
        let src = Coord::new(2, 2);
        let legal: Vec<_> = src
            .adjacent()
            .into_iter()
            .filter(|dst| is_valid_move(&board, Player::Defender, CoordPair::new(src, *dst)))
            .collect();
        assert_eq!(legal, vec![Coord::new(3, 2), Coord::new(2, 3)]);
    }

    #[test]
    fn test_agile_moves_any_orthogonal_direction() {
        let board = board_with(&[(2, 2, Player::Attacker, UnitType::Offense, 9)]);
        let src = Coord::new(2, 2);
        for dst in src.adjacent() {
            assert!(is_valid_move(&board, Player::Attacker, CoordPair::new(src, dst)));
        }
        let diagonal = CoordPair::new(src, Coord::new(1, 1));
        assert_eq!(
            check_move(&board, Player::Attacker, diagonal),
            Err(IllegalMove::NotAdjacent)
        );
    }

    #[test]
    fn test_wrong_owner_rejected() {
        let board = board_with(&[(2, 2, Player::Defender, UnitType::Generic, 9)]);
        let mv = CoordPair::self_move(Coord::new(2, 2));
        assert_eq!(
            check_move(&board, Player::Attacker, mv),
            Err(IllegalMove::NotYourUnit(Player::Defender))
        );
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let board = board_with(&[(0, 0, Player::Attacker, UnitType::Generic, 9)]);
        let mv = CoordPair::new(Coord::new(0, 0), Coord::new(-1, 0));
        assert_eq!(
            check_move(&board, Player::Attacker, mv),
            Err(IllegalMove::OutOfBounds)
        );
    }

    #[test]
    fn test_engaged_unit_is_locked() {
        // Attacker generic at C2 with a defender on its right (C3)
        let board = board_with(&[
            (2, 2, Player::Attacker, UnitType::Generic, 9),
            (2, 3, Player::Defender, UnitType::Generic, 9),
        ]);
        let src = Coord::new(2, 2);
        assert_eq!(
            check_move(&board, Player::Attacker, CoordPair::new(src, Coord::new(1, 2))),
            Err(IllegalMove::EngagementLocked)
        );
        assert!(is_valid_move(&board, Player::Attacker, CoordPair::self_move(src)));
    }

    #[test]
    fn test_engaged_unit_may_strike_its_only_neighbour() {
        let board = board_with(&[
            (2, 2, Player::Attacker, UnitType::Generic, 9),
            (1, 2, Player::Defender, UnitType::Generic, 9),
        ]);
        let mv = CoordPair::new(Coord::new(2, 2), Coord::new(1, 2));
        assert!(is_valid_move(&board, Player::Attacker, mv));
    }

    #[test]
    fn test_agile_unit_ignores_engagement() {
        let board = board_with(&[
            (2, 2, Player::Attacker, UnitType::Offense, 9),
            (2, 3, Player::Defender, UnitType::Generic, 9),
        ]);
        let mv = CoordPair::new(Coord::new(2, 2), Coord::new(3, 2));
        assert!(is_valid_move(&board, Player::Attacker, mv));
    }

    #[test]
    fn test_repair_target_rules() {
        let board = board_with(&[
            (2, 2, Player::Defender, UnitType::Repair, 9),
            (3, 2, Player::Defender, UnitType::Generic, 9),
            (2, 3, Player::Defender, UnitType::Defense, 5),
            (2, 1, Player::Defender, UnitType::Offense, 5),
        ]);
        let src = Coord::new(2, 2);
        assert_eq!(
            check_move(&board, Player::Defender, CoordPair::new(src, Coord::new(3, 2))),
            Err(IllegalMove::TargetAtFullHealth)
        );
        assert!(is_valid_move(
            &board,
            Player::Defender,
            CoordPair::new(src, Coord::new(2, 3))
        ));
        // Repair units cannot mend offense units
        assert_eq!(
            check_move(&board, Player::Defender, CoordPair::new(src, Coord::new(2, 1))),
            Err(IllegalMove::CannotRepair)
        );
    }

    #[test]
    fn test_same_type_friend_is_permitted() {
        let board = board_with(&[
            (2, 2, Player::Attacker, UnitType::Generic, 9),
            (1, 2, Player::Attacker, UnitType::Generic, 9),
        ]);
        let mv = CoordPair::new(Coord::new(2, 2), Coord::new(1, 2));
        assert!(is_valid_move(&board, Player::Attacker, mv));
    }
}
