//! Game state - board, turn order, termination, and the trace
//!
//! One `GameState` lives for a whole game. The search works on forks: a fork
//! owns a deep copy of the board but shares the options and statistics, and
//! its trace is disabled.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::board::coord::CoordPair;
use crate::board::grid::Board;
use crate::board::unit::UnitType;
use crate::core::config::GameOptions;
use crate::core::error::{Result, WargameError};
use crate::core::types::Player;
use crate::game::stats::SharedStats;
use crate::game::trace::GameTrace;
use crate::rules::{self, IllegalMove, MoveOutcome};

/// Whether play continues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Terminal(Player),
}

#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    next_player: Player,
    turns_played: u32,
    attacker_has_command: bool,
    defender_has_command: bool,
    winner_recorded: bool,
    options: Arc<GameOptions>,
    stats: SharedStats,
    trace: GameTrace,
}

impl GameState {
    /// A new game with the starting layout; records the trace header
    pub fn new(options: GameOptions) -> Result<Self> {
        options.validate()?;
        let board = Board::with_starting_layout(options.dim);
        let mut state = Self::from_board(options, board, Player::Attacker);
        state.record_header();
        Ok(state)
    }

    /// A game from an arbitrary position, with command flags taken from the board
    ///
    /// The trace starts empty. Used for scenarios and tests.
    pub fn from_board(options: GameOptions, board: Board, next_player: Player) -> Self {
        let has_command = |player| {
            board
                .player_units(player)
                .any(|(_, unit)| unit.unit_type == UnitType::Command)
        };
        let attacker_has_command = has_command(Player::Attacker);
        let defender_has_command = has_command(Player::Defender);
        Self {
            board,
            next_player,
            turns_played: 0,
            attacker_has_command,
            defender_has_command,
            winner_recorded: false,
            options: Arc::new(options),
            stats: SharedStats::new(),
            trace: GameTrace::new(),
        }
    }

    /// Search clone: own board, shared options and statistics, no trace
    pub fn fork(&self) -> Self {
        Self {
            board: self.board.clone(),
            next_player: self.next_player,
            turns_played: self.turns_played,
            attacker_has_command: self.attacker_has_command,
            defender_has_command: self.defender_has_command,
            winner_recorded: self.winner_recorded,
            options: Arc::clone(&self.options),
            stats: self.stats.clone(),
            trace: GameTrace::disabled(),
        }
    }

    fn record_header(&mut self) {
        let options = Arc::clone(&self.options);
        let timeout = match options.max_time {
            Some(secs) => format!("{}s", secs),
            None => "off".to_string(),
        };
        let turns = match options.max_turns {
            Some(n) => n.to_string(),
            None => "unlimited".to_string(),
        };
        self.trace.record(format!("timeout: {}", timeout));
        self.trace.record(format!("max number of turns: {}", turns));
        self.trace.record(format!(
            "alpha-beta: {}",
            if options.alpha_beta { "on" } else { "off" }
        ));
        self.trace.record(format!(
            "player 1: {} & player 2: {}",
            options.game_type.player_kind(Player::Attacker),
            options.game_type.player_kind(Player::Defender)
        ));
        self.trace.record("Initial board configuration:");
        let snapshot = self.to_string();
        self.trace.record(snapshot);
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn next_player(&self) -> Player {
        self.next_player
    }

    pub fn turns_played(&self) -> u32 {
        self.turns_played
    }

    pub fn options(&self) -> &GameOptions {
        &self.options
    }

    pub fn stats(&self) -> &SharedStats {
        &self.stats
    }

    pub fn trace(&self) -> &GameTrace {
        &self.trace
    }

    /// Append a line to the trace (dropped on forks)
    pub fn record(&mut self, line: impl Into<String>) {
        self.trace.record(line);
    }

    /// Authoritative flag: is this side's Command unit still on the board?
    pub fn has_command(&self, player: Player) -> bool {
        match player {
            Player::Attacker => self.attacker_has_command,
            Player::Defender => self.defender_has_command,
        }
    }

    // ------------------------------------------------------------------------
    // Moves
    // ------------------------------------------------------------------------

    /// Legality of `mv` for the side to play
    pub fn check_move(&self, mv: CoordPair) -> std::result::Result<(), IllegalMove> {
        rules::check_move(&self.board, self.next_player, mv)
    }

    pub fn is_valid_move(&self, mv: CoordPair) -> bool {
        self.check_move(mv).is_ok()
    }

    /// Validate and resolve a move for the side to play
    ///
    /// Every attempt is traced. Rejected moves leave the board untouched; the
    /// turn is never advanced here, see [`GameState::next_turn`].
    pub fn perform_move(&mut self, mv: CoordPair) -> Result<MoveOutcome> {
        if let GameStatus::Terminal(winner) = self.status() {
            return Err(WargameError::GameOver(winner));
        }

        let turn = self.turns_played + 1;
        let player = self.next_player;
        self.trace.record(format!("turn #{}", turn));
        self.trace.record(player.name());
        self.trace.record(format!("move from {} to {}", mv.src, mv.dst));

        self.check_move(mv)
            .map_err(|reason| WargameError::InvalidMove { mv, reason })?;

        let resolution = rules::resolve_move(&mut self.board, mv);
        if resolution.commands_lost.attacker {
            self.attacker_has_command = false;
        }
        if resolution.commands_lost.defender {
            self.defender_has_command = false;
        }

        if self.trace.is_enabled() {
            debug!(
                "{} {}: {:?}",
                self.next_player, mv, resolution.outcome
            );
        }

        if self.is_finished() {
            self.trace.record("New board configuration:");
            let snapshot = self.to_string();
            self.trace.record(snapshot);
        }

        Ok(resolution.outcome)
    }

    /// Hand the move to the other side
    pub fn next_turn(&mut self) {
        self.next_player = self.next_player.next();
        self.turns_played += 1;
    }

    // ------------------------------------------------------------------------
    // Termination
    // ------------------------------------------------------------------------

    fn turn_limit_reached(&self) -> bool {
        self.options
            .max_turns
            .is_some_and(|max| self.turns_played >= max)
    }

    /// A Command unit has fallen or the turn cap is reached
    pub fn is_finished(&self) -> bool {
        !self.attacker_has_command || !self.defender_has_command || self.turn_limit_reached()
    }

    /// Winner of a finished game
    ///
    /// A lost Attacker command is checked first; the Defender also wins
    /// when the turn cap runs out.
    pub fn winner(&self) -> Option<Player> {
        if !self.is_finished() {
            return None;
        }
        if !self.attacker_has_command {
            Some(Player::Defender)
        } else if !self.defender_has_command {
            Some(Player::Attacker)
        } else {
            Some(Player::Defender)
        }
    }

    pub fn status(&self) -> GameStatus {
        match self.winner() {
            Some(winner) => GameStatus::Terminal(winner),
            None => GameStatus::InProgress,
        }
    }

    /// Winner of a finished game, recorded in the trace the first time
    pub fn declare_winner(&mut self) -> Option<Player> {
        let winner = self.winner()?;
        if !self.winner_recorded {
            self.winner_recorded = true;
            let line = if self.attacker_has_command && self.defender_has_command {
                format!(
                    "{} wins because max turns ({}) have passed",
                    winner, self.turns_played
                )
            } else {
                format!("{} wins in {} turns", winner, self.turns_played)
            };
            self.trace.record(line);
        }
        Some(winner)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Next player: {}", self.next_player)?;
        writeln!(f, "Turns played: {}", self.turns_played)?;
        write!(f, "{}", self.board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::coord::Coord;

    fn new_game() -> GameState {
        GameState::new(GameOptions::default()).unwrap()
    }

    #[test]
    fn test_new_game_header() {
        let game = new_game();
        let lines = game.trace().lines();
        assert_eq!(lines[0], "timeout: 5s");
        assert_eq!(lines[1], "max number of turns: 100");
        assert_eq!(lines[2], "alpha-beta: on");
        assert_eq!(lines[3], "player 1: Human & player 2: Human");
        assert_eq!(lines[4], "Initial board configuration:");
        assert!(lines[5].starts_with("Next player: Attacker"));
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_invalid_options_rejected() {
        let mut options = GameOptions::default();
        options.dim = 2;
        assert!(GameState::new(options).is_err());
    }

    #[test]
    fn test_rejected_move_is_traced_but_harmless() {
        let mut game = new_game();
        let before = game.board().clone();
        let trace_len = game.trace().lines().len();
        // Defender's command; it is the Attacker's turn
        let err = game
            .perform_move(CoordPair::from_quad(0, 0, 1, 0))
            .unwrap_err();
        assert!(matches!(err, WargameError::InvalidMove { .. }));
        assert_eq!(game.board(), &before);
        assert_eq!(game.turns_played(), 0);
        assert_eq!(game.trace().lines().len(), trace_len + 3);
        assert_eq!(game.trace().lines()[trace_len + 2], "move from A0 to B0");
    }

    #[test]
    fn test_fork_does_not_touch_parent() {
        let game = new_game();
        let mut fork = game.fork();
        fork.perform_move(CoordPair::from_quad(3, 3, 3, 3)).unwrap();
        fork.next_turn();
        assert!(game.board().get(Coord::new(3, 3)).is_some());
        assert!(fork.board().get(Coord::new(3, 3)).is_none());
        assert_eq!(game.turns_played(), 0);
        assert!(fork.trace().lines().is_empty());
        assert!(fork.stats().ptr_eq(game.stats()));
    }

    #[test]
    fn test_next_turn_alternates() {
        let mut game = new_game();
        game.next_turn();
        assert_eq!(game.next_player(), Player::Defender);
        assert_eq!(game.turns_played(), 1);
        game.next_turn();
        assert_eq!(game.next_player(), Player::Attacker);
    }

    #[test]
    fn test_turn_cap_defender_wins() {
        let mut options = GameOptions::default();
        options.max_turns = Some(2);
        let mut game = GameState::new(options).unwrap();
        game.next_turn();
        assert_eq!(game.winner(), None);
        game.next_turn();
        assert_eq!(game.status(), GameStatus::Terminal(Player::Defender));
        assert_eq!(game.declare_winner(), Some(Player::Defender));
        assert_eq!(game.declare_winner(), Some(Player::Defender));
        let last = game.trace().lines().last().unwrap();
        assert_eq!(last, "Defender wins because max turns (2) have passed");
        let wins = game
            .trace()
            .lines()
            .iter()
            .filter(|l| l.contains("wins"))
            .count();
        assert_eq!(wins, 1);
    }

    #[test]
    fn test_no_turn_cap_never_terminates_on_turns() {
        let mut options = GameOptions::default();
        options.max_turns = None;
        let mut game = GameState::new(options).unwrap();
        for _ in 0..500 {
            game.next_turn();
        }
        assert!(!game.is_finished());
    }

    #[test]
    fn test_moves_after_game_over_rejected() {
        let mut options = GameOptions::default();
        options.max_turns = Some(0);
        let mut game = GameState::new(options).unwrap();
        let err = game
            .perform_move(CoordPair::from_quad(4, 4, 4, 4))
            .unwrap_err();
        assert!(matches!(err, WargameError::GameOver(Player::Defender)));
    }
}
