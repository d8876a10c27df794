//! Move exchange with the outside world
//!
//! A human side is fed by a [`MoveSource`]; every move a computer side plays
//! can be published through a [`MoveSink`]. The HTTP broker implements both,
//! and one link can serve both roles through an `Rc<RefCell<_>>` handle.

pub mod client;
pub mod protocol;

pub use client::{BrokerClient, BrokerLink};
pub use protocol::{BrokerMove, BrokerResponse, CellRef};

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::board::coord::CoordPair;
use crate::core::error::Result;
use crate::game::state::GameState;

/// Pause between broker polls
pub const BROKER_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Supplies moves for a human-controlled side
pub trait MoveSource {
    /// Next move for the side to play in `state`
    ///
    /// `Ok(None)` means nothing is available yet. Recoverable errors are
    /// reported and the session asks again.
    fn next_move(&mut self, state: &GameState) -> Result<Option<CoordPair>>;

    /// How long to wait before asking again after an empty answer
    fn retry_delay(&self) -> Duration {
        Duration::ZERO
    }

    /// Label used when announcing where a move came from
    fn label(&self) -> &'static str {
        "Player"
    }
}

/// Receives moves played by computer-controlled sides
pub trait MoveSink {
    /// Publish `mv`, played as move number `turn`
    fn publish_move(&mut self, mv: CoordPair, turn: u32) -> Result<()>;
}

impl<T: MoveSource> MoveSource for Rc<RefCell<T>> {
    fn next_move(&mut self, state: &GameState) -> Result<Option<CoordPair>> {
        self.borrow_mut().next_move(state)
    }

    fn retry_delay(&self) -> Duration {
        self.borrow().retry_delay()
    }

    fn label(&self) -> &'static str {
        self.borrow().label()
    }
}

impl<T: MoveSink> MoveSink for Rc<RefCell<T>> {
    fn publish_move(&mut self, mv: CoordPair, turn: u32) -> Result<()> {
        self.borrow_mut().publish_move(mv, turn)
    }
}
