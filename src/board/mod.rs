//! Board model - coordinates, units, and the grid that owns them

pub mod coord;
pub mod grid;
pub mod unit;

pub use coord::{Coord, CoordPair, RectIter};
pub use grid::Board;
pub use unit::{Unit, UnitType, DAMAGE_TABLE, MAX_HEALTH, REPAIR_TABLE};
