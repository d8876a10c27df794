//! Moves typed at the terminal

use std::io::{self, BufRead, Write};

use crate::board::coord::CoordPair;
use crate::broker::MoveSource;
use crate::core::error::{Result, WargameError};
use crate::game::state::GameState;

/// Reads one move per line from `input`
pub struct ConsoleMoveSource<R> {
    input: R,
}

impl ConsoleMoveSource<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> ConsoleMoveSource<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> MoveSource for ConsoleMoveSource<R> {
    fn next_move(&mut self, state: &GameState) -> Result<Option<CoordPair>> {
        print!("Player {}, enter your move: ", state.next_player());
        io::stdout().flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed").into());
        }

        let board = state.board();
        match CoordPair::parse(&line) {
            Some(mv) if board.is_valid_coord(mv.src) && board.is_valid_coord(mv.dst) => Ok(Some(mv)),
            _ => {
                println!("Invalid coordinates! Try again.");
                Err(WargameError::MalformedCoordinate(line.trim().to_string()))
            }
        }
    }
}
