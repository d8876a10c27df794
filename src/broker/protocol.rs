//! Broker wire format
//!
//! Moves travel as `{"from": {"row", "col"}, "to": {"row", "col"}, "turn"}`
//! wrapped in a `{"success", "data"}` envelope.

use serde::{Deserialize, Serialize};

use crate::board::coord::{Coord, CoordPair};

/// One cell on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRef {
    pub row: i32,
    pub col: i32,
}

impl From<Coord> for CellRef {
    fn from(coord: Coord) -> Self {
        Self {
            row: coord.row,
            col: coord.col,
        }
    }
}

impl From<CellRef> for Coord {
    fn from(cell: CellRef) -> Self {
        Coord::new(cell.row, cell.col)
    }
}

/// A move tagged with the turn it was played on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerMove {
    pub from: CellRef,
    pub to: CellRef,
    pub turn: u32,
}

impl BrokerMove {
    pub fn new(mv: CoordPair, turn: u32) -> Self {
        Self {
            from: mv.src.into(),
            to: mv.dst.into(),
            turn,
        }
    }

    pub fn coords(&self) -> CoordPair {
        CoordPair::new(self.from.into(), self.to.into())
    }
}

/// Response envelope for both GET and POST
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrokerResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<BrokerMove>,
}

impl BrokerResponse {
    /// The move in a GET response, if it is the one `expected_turn` waits for
    ///
    /// Stale or early moves are ignored; the caller polls again.
    pub fn move_for_turn(&self, expected_turn: u32) -> Option<CoordPair> {
        if !self.success {
            return None;
        }
        self.data
            .filter(|data| data.turn == expected_turn)
            .map(|data| data.coords())
    }

    /// Does a POST response echo exactly what was sent?
    pub fn confirms(&self, posted: &BrokerMove) -> bool {
        self.success && self.data.as_ref() == Some(posted)
    }
}
