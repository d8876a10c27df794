//! AI Wargame - Entry Point
//!
//! Builds the game options from an optional TOML file and the command line,
//! then plays one game in the terminal (or through a move broker) and writes
//! the trace file.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::process::ExitCode;

use ai_wargame::ai::build_policy;
use ai_wargame::broker::BrokerLink;
use ai_wargame::core::config::{GameOptions, GameType, HeuristicKind, PolicyKind};
use ai_wargame::core::error::Result;
use ai_wargame::game::GameState;
use ai_wargame::session::{ConsoleMoveSource, GameSession};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Two-player wargame on a square grid
#[derive(Parser, Debug)]
#[command(name = "ai_wargame")]
#[command(about = "Play the AI wargame against a human, the computer or a broker")]
struct Args {
    /// TOML file with game options, applied before the flags below
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board side length
    #[arg(long)]
    dim: Option<usize>,

    /// Maximum search depth
    #[arg(long)]
    max_depth: Option<u32>,

    /// Depth the search always completes regardless of time
    #[arg(long)]
    min_depth: Option<u32>,

    /// Maximum search time per move, in seconds
    #[arg(long)]
    max_time: Option<f64>,

    /// Maximum number of turns for a game
    #[arg(long)]
    max_turns: Option<u32>,

    /// Game type: auto|attacker|defender|manual
    #[arg(long)]
    game_type: Option<GameType>,

    /// Play via a game broker at this URL
    #[arg(long)]
    broker: Option<String>,

    /// Use alpha-beta pruning (true|false)
    #[arg(long)]
    alpha_beta: Option<bool>,

    /// Computer policy: random|minimax
    #[arg(long)]
    policy: Option<PolicyKind>,

    /// Search heuristic: e0|e1
    #[arg(long)]
    heuristic: Option<HeuristicKind>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Search root moves in parallel
    #[arg(long)]
    parallel: bool,

    /// Trace file path (defaults to a name built from the options)
    #[arg(long)]
    trace: Option<PathBuf>,
}

impl Args {
    fn into_options(self) -> Result<(GameOptions, Option<PathBuf>)> {
        let mut options = match &self.config {
            Some(path) => GameOptions::load(path)?,
            None => GameOptions::default(),
        };

        if let Some(dim) = self.dim {
            options.dim = dim;
        }
        if self.max_depth.is_some() {
            options.max_depth = self.max_depth;
        }
        if self.min_depth.is_some() {
            options.min_depth = self.min_depth;
        }
        if self.max_time.is_some() {
            options.max_time = self.max_time;
        }
        if self.max_turns.is_some() {
            options.max_turns = self.max_turns;
        }
        if let Some(game_type) = self.game_type {
            options.game_type = game_type;
        }
        if self.broker.is_some() {
            options.broker = self.broker;
        }
        if let Some(alpha_beta) = self.alpha_beta {
            options.alpha_beta = alpha_beta;
        }
        if let Some(policy) = self.policy {
            options.policy = policy;
        }
        if let Some(heuristic) = self.heuristic {
            options.heuristic = heuristic;
        }
        if self.seed.is_some() {
            options.seed = self.seed;
        }
        if self.parallel {
            options.parallel = true;
        }

        options.validate()?;
        Ok((options, self.trace))
    }
}

fn run(args: Args) -> Result<()> {
    let (options, trace) = args.into_options()?;
    let trace_path = trace.unwrap_or_else(|| PathBuf::from(options.trace_file_name()));

    tracing::info!(
        "Starting {:?} game on a {}x{} board",
        options.game_type,
        options.dim,
        options.dim
    );

    let policy = build_policy(&options);
    let broker = options.broker.clone();
    let state = GameState::new(options)?;

    let session = match broker {
        Some(url) => {
            println!("Getting moves with auto-retry from game broker at {}", url);
            let link = Rc::new(RefCell::new(BrokerLink::new(url)?));
            GameSession::new(state, policy, Box::new(Rc::clone(&link))).with_sink(Box::new(link))
        }
        None => GameSession::new(state, policy, Box::new(ConsoleMoveSource::stdin())),
    };

    let mut session = session.with_trace_path(trace_path);

    session.run()?;
    Ok(())
}

fn main() -> ExitCode {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ai_wargame=info")),
        )
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
