//! The game loop
//!
//! Alternates turns until a winner is declared. Human sides take moves from a
//! [`MoveSource`] and retry until one is legal; computer sides ask their
//! [`DecisionPolicy`] and optionally publish the result to a [`MoveSink`].

pub mod console;

pub use console::ConsoleMoveSource;

use std::path::PathBuf;
use std::thread;

use tracing::{error, info, warn};

use crate::ai::{suggest_move, DecisionPolicy};
use crate::board::coord::CoordPair;
use crate::broker::{MoveSink, MoveSource};
use crate::core::error::{Result, WargameError};
use crate::core::types::Player;
use crate::game::state::GameState;

/// One game from the opening to its winner
pub struct GameSession {
    state: GameState,
    policy: Box<dyn DecisionPolicy>,
    source: Box<dyn MoveSource>,
    sink: Option<Box<dyn MoveSink>>,
    trace_path: Option<PathBuf>,
    echo: bool,
}

impl GameSession {
    pub fn new(
        state: GameState,
        policy: Box<dyn DecisionPolicy>,
        source: Box<dyn MoveSource>,
    ) -> Self {
        Self {
            state,
            policy,
            source,
            sink: None,
            trace_path: None,
            echo: true,
        }
    }

    /// Publish computer moves here
    pub fn with_sink(mut self, sink: Box<dyn MoveSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Write the trace to `path` once the game ends
    pub fn with_trace_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.trace_path = Some(path.into());
        self
    }

    /// Print the board before every turn (on by default)
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Play to the end and return the winner
    pub fn run(&mut self) -> Result<Player> {
        let winner = loop {
            if self.echo {
                println!();
                println!("{}", self.state);
            }
            if let Some(winner) = self.state.declare_winner() {
                if self.echo {
                    println!("{} wins!\nGame Over!!", winner);
                }
                info!("{} wins after {} turns", winner, self.state.turns_played());
                break winner;
            }
            self.play_turn()?;
        };

        if let Some(path) = &self.trace_path {
            self.state.trace().write_to(path)?;
            info!("Trace written to {}", path.display());
        }
        Ok(winner)
    }

    /// Play exactly one turn for the side to move
    pub fn play_turn(&mut self) -> Result<CoordPair> {
        let player = self.state.next_player();
        if self.state.options().game_type.is_computer(player) {
            self.computer_turn()
        } else {
            self.human_turn()
        }
    }

    fn human_turn(&mut self) -> Result<CoordPair> {
        let label = self.source.label();
        loop {
            let mv = match self.source.next_move(&self.state) {
                Ok(Some(mv)) => mv,
                Ok(None) => {
                    self.pause();
                    continue;
                }
                Err(e) if e.is_recoverable() => {
                    warn!("{}", e);
                    self.pause();
                    continue;
                }
                Err(e) => return Err(e),
            };

            let player = self.state.next_player();
            match self.state.perform_move(mv) {
                Ok(outcome) => {
                    info!("{} {}: {} {:?}", label, player, mv, outcome);
                    self.state.next_turn();
                    return Ok(mv);
                }
                Err(e) if e.is_recoverable() => {
                    warn!("The move is not valid! Try again. ({})", e);
                    self.pause();
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn computer_turn(&mut self) -> Result<CoordPair> {
        let player = self.state.next_player();
        let decision = suggest_move(&self.state, self.policy.as_mut());
        let Some(mv) = decision.chosen else {
            error!("Computer doesn't know what to do!!!");
            return Err(WargameError::NoLegalMoves(player));
        };

        let outcome = self.state.perform_move(mv)?;
        info!("Computer {}: {} {:?}", player, mv, outcome);
        self.state
            .record(format!("heuristic score: {}", decision.score));
        self.state.next_turn();

        if let Some(sink) = self.sink.as_mut() {
            // Publishing failures do not stop the game
            if let Err(e) = sink.publish_move(mv, self.state.turns_played()) {
                warn!("{}", e);
            }
        }
        Ok(mv)
    }

    fn pause(&self) {
        let delay = self.source.retry_delay();
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use crate::ai::RandomPolicy;
    use crate::core::config::{GameOptions, GameType};

    /// Replays a fixed list of answers
    struct Scripted(VecDeque<Result<Option<CoordPair>>>);

    impl MoveSource for Scripted {
        fn next_move(&mut self, _state: &GameState) -> Result<Option<CoordPair>> {
            self.0
                .pop_front()
                .unwrap_or_else(|| Err(WargameError::Broker("script exhausted".into())))
        }
    }

    struct Recorder(Arc<Mutex<Vec<(CoordPair, u32)>>>);

    impl MoveSink for Recorder {
        fn publish_move(&mut self, mv: CoordPair, turn: u32) -> Result<()> {
            self.0.lock().unwrap().push((mv, turn));
            Ok(())
        }
    }

    fn options(game_type: GameType) -> GameOptions {
        GameOptions {
            game_type,
            max_turns: Some(6),
            seed: Some(17),
            ..GameOptions::default()
        }
    }

    #[test]
    fn test_human_turn_retries_until_legal() {
        let state = GameState::new(options(GameType::AttackerVsDefender)).unwrap();
        let script = Scripted(VecDeque::from(vec![
            Err(WargameError::MalformedCoordinate("zz".into())),
            Ok(None),
            // Defender unit, rejected
            Ok(Some(CoordPair::from_quad(0, 0, 0, 1))),
            Ok(Some(CoordPair::from_quad(3, 3, 3, 3))),
        ]));
        let mut session =
            GameSession::new(state, Box::new(RandomPolicy::new(1)), Box::new(script)).with_echo(false);

        let mv = session.play_turn().unwrap();
        assert_eq!(mv, CoordPair::from_quad(3, 3, 3, 3));
        assert_eq!(session.state().turns_played(), 1);
        assert_eq!(session.state().next_player(), Player::Defender);
    }

    #[test]
    fn test_fatal_source_error_ends_session() {
        let state = GameState::new(options(GameType::AttackerVsDefender)).unwrap();
        let script = Scripted(VecDeque::from(vec![Err(WargameError::IoError(
            std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "closed"),
        ))]));
        let mut session =
            GameSession::new(state, Box::new(RandomPolicy::new(1)), Box::new(script)).with_echo(false);
        assert!(matches!(session.run(), Err(WargameError::IoError(_))));
    }

    #[test]
    fn test_computer_game_runs_to_turn_cap_and_publishes() {
        let state = GameState::new(options(GameType::CompVsComp)).unwrap();
        let published = Arc::new(Mutex::new(Vec::new()));
        let mut session = GameSession::new(
            state,
            Box::new(RandomPolicy::new(5)),
            Box::new(Scripted(VecDeque::new())),
        )
        .with_sink(Box::new(Recorder(Arc::clone(&published))))
        .with_echo(false);

        let winner = session.run().unwrap();
        let state = session.state();
        assert!(state.is_finished());
        assert_eq!(Some(winner), state.winner());

        let published = published.lock().unwrap();
        assert_eq!(published.len() as u32, state.turns_played());
        for (i, (_, turn)) in published.iter().enumerate() {
            assert_eq!(*turn, i as u32 + 1);
        }
        assert!(state.trace().lines().iter().any(|l| l.starts_with("heuristic score")));
    }

    #[test]
    fn test_no_legal_moves_is_an_error() {
        use crate::board::coord::Coord;
        use crate::board::grid::Board;
        use crate::board::unit::{Unit, UnitType};

        struct Stuck;
        impl DecisionPolicy for Stuck {
            fn name(&self) -> &'static str {
                "stuck"
            }
            fn select_move(
                &mut self,
                _state: &GameState,
                _budget: &crate::ai::SearchBudget,
            ) -> crate::ai::Decision {
                crate::ai::Decision::none(0)
            }
        }

        let mut board = Board::empty(5);
        board.set(Coord::new(0, 0), Some(Unit::new(Player::Defender, UnitType::Command)));
        board.set(Coord::new(4, 4), Some(Unit::new(Player::Attacker, UnitType::Command)));
        let state = GameState::from_board(options(GameType::CompVsComp), board, Player::Attacker);
        let mut session = GameSession::new(
            state,
            Box::new(Stuck),
            Box::new(Scripted(VecDeque::new())),
        )
        .with_echo(false);
        assert!(matches!(
            session.play_turn(),
            Err(WargameError::NoLegalMoves(Player::Attacker))
        ));
    }

    #[test]
    fn test_trace_written_at_end() {
        let dir = std::env::temp_dir().join(format!("wargame-session-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("trace.txt");

        let state = GameState::new(options(GameType::CompVsComp)).unwrap();
        let mut session = GameSession::new(
            state,
            Box::new(RandomPolicy::new(8)),
            Box::new(Scripted(VecDeque::new())),
        )
        .with_trace_path(path.clone())
        .with_echo(false);
        session.run().unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("timeout: 5s\n"));
        assert!(written.contains("wins"));
        std::fs::remove_dir_all(&dir).ok();
    }
}
