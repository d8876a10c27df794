//! The square board of optional unit slots

use std::fmt;

use crate::board::coord::{Coord, CoordPair};
use crate::board::unit::{Unit, UnitType};
use crate::core::types::Player;

/// A `dim` x `dim` grid, stored row-major in one flat vector
///
/// Cells are `Copy`, so cloning the board is a single allocation and a
/// memcpy. Search clones one board per explored move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    dim: usize,
    cells: Vec<Option<Unit>>,
}

impl Board {
    /// An empty board
    pub fn empty(dim: usize) -> Self {
        Self {
            dim,
            cells: vec![None; dim * dim],
        }
    }

    /// The fixed starting layout
    ///
    /// Defender holds the top-left corner, Attacker the bottom-right.
    pub fn with_starting_layout(dim: usize) -> Self {
        let mut board = Self::empty(dim);
        let md = dim as i32 - 1;
        let layout = [
            (0, 0, Player::Defender, UnitType::Command),
            (1, 0, Player::Defender, UnitType::Repair),
            (0, 1, Player::Defender, UnitType::Repair),
            (2, 0, Player::Defender, UnitType::Defense),
            (0, 2, Player::Defender, UnitType::Defense),
            (1, 1, Player::Defender, UnitType::Generic),
            (md, md, Player::Attacker, UnitType::Command),
            (md - 1, md, Player::Attacker, UnitType::Offense),
            (md, md - 1, Player::Attacker, UnitType::Offense),
            (md - 2, md, Player::Attacker, UnitType::Generic),
            (md, md - 2, Player::Attacker, UnitType::Generic),
            (md - 1, md - 1, Player::Attacker, UnitType::Defense),
        ];
        for (row, col, player, unit_type) in layout {
            board.set(Coord::new(row, col), Some(Unit::new(player, unit_type)));
        }
        board
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn is_valid_coord(&self, coord: Coord) -> bool {
        coord.is_within(self.dim)
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        if self.is_valid_coord(coord) {
            Some(coord.row as usize * self.dim + coord.col as usize)
        } else {
            None
        }
    }

    /// Unit at `coord`; None when empty or out of bounds
    pub fn get(&self, coord: Coord) -> Option<&Unit> {
        self.index(coord).and_then(|i| self.cells[i].as_ref())
    }

    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut Unit> {
        let i = self.index(coord)?;
        self.cells[i].as_mut()
    }

    /// Overwrite a cell; out-of-bounds writes are ignored
    pub fn set(&mut self, coord: Coord, unit: Option<Unit>) {
        if let Some(i) = self.index(coord) {
            self.cells[i] = unit;
        }
    }

    /// Remove and return the unit at `coord`
    pub fn take(&mut self, coord: Coord) -> Option<Unit> {
        let i = self.index(coord)?;
        self.cells[i].take()
    }

    pub fn is_empty(&self, coord: Coord) -> bool {
        self.get(coord).is_none()
    }

    /// All occupied cells, row-major
    pub fn units(&self) -> impl Iterator<Item = (Coord, &Unit)> + '_ {
        CoordPair::from_dim(self.dim)
            .iter_rectangle()
            .filter_map(move |coord| self.get(coord).map(|unit| (coord, unit)))
    }

    /// Units of one side, row-major
    pub fn player_units(&self, player: Player) -> impl Iterator<Item = (Coord, &Unit)> + '_ {
        self.units().filter(move |(_, unit)| unit.player == player)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n   ")?;
        for col in 0..self.dim {
            let label = Coord::new(0, col as i32).col_char();
            write!(f, "{:^3} ", label)?;
        }
        writeln!(f)?;
        for row in 0..self.dim {
            write!(f, "{}: ", Coord::new(row as i32, 0).row_char())?;
            for col in 0..self.dim {
                match self.get(Coord::new(row as i32, col as i32)) {
                    Some(unit) => write!(f, "{:^3} ", unit.to_string())?,
                    None => write!(f, " .  ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
