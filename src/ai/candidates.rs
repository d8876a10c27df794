//! Legal move enumeration
//!
//! Order is part of the contract: sources row-major, then for each source
//! the adjacent destinations up/left/down/right, then its self-destruct.

use crate::board::coord::CoordPair;
use crate::core::types::Player;
use crate::game::state::GameState;
use crate::rules;

/// Legal moves for the side to play
pub fn move_candidates(state: &GameState) -> Vec<CoordPair> {
    move_candidates_for(state, state.next_player())
}

/// Legal moves for `side`, whether or not it is that side's turn
pub fn move_candidates_for(state: &GameState, side: Player) -> Vec<CoordPair> {
    let board = state.board();
    let mut moves = Vec::new();
    for (src, _) in board.player_units(side) {
        for dst in src.adjacent() {
            let mv = CoordPair::new(src, dst);
            if rules::is_valid_move(board, side, mv) {
                moves.push(mv);
            }
        }
        moves.push(CoordPair::self_move(src));
    }
    moves
}
