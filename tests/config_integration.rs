//! Loading game options from TOML files

use std::fs;
use std::path::PathBuf;

use ai_wargame::core::config::{GameOptions, GameType, HeuristicKind, PolicyKind};
use ai_wargame::core::error::WargameError;
use ai_wargame::game::GameState;

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("wargame-config-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_load_full_options() {
    let path = temp_file(
        "full.toml",
        r#"
        dim = 6
        max_depth = 5
        min_depth = 3
        max_time = 2.5
        max_turns = 40
        game_type = "AttackerVsComp"
        alpha_beta = false
        randomize_moves = false
        broker = "http://localhost:8001/test"
        policy = "minimax"
        heuristic = "e1"
        seed = 1234
        parallel = true
        "#,
    );
    let options = GameOptions::load(&path).unwrap();
    assert_eq!(options.dim, 6);
    assert_eq!(options.max_depth, Some(5));
    assert_eq!(options.min_depth, Some(3));
    assert_eq!(options.max_time, Some(2.5));
    assert_eq!(options.max_turns, Some(40));
    assert_eq!(options.game_type, GameType::AttackerVsComp);
    assert!(!options.alpha_beta);
    assert!(!options.randomize_moves);
    assert_eq!(options.broker.as_deref(), Some("http://localhost:8001/test"));
    assert_eq!(options.policy, PolicyKind::Minimax);
    assert_eq!(options.heuristic, HeuristicKind::E1);
    assert_eq!(options.seed, Some(1234));
    assert!(options.parallel);
    assert_eq!(options.trace_file_name(), "gameTrace-false-2.5-40.txt");

    let game = GameState::new(options).unwrap();
    assert_eq!(game.board().dim(), 6);
    assert_eq!(game.trace().lines()[3], "player 1: Human & player 2: AI");
}

#[test]
fn test_load_rejects_invalid_values() {
    let path = temp_file("tiny.toml", "dim = 3\n");
    assert!(matches!(
        GameOptions::load(&path),
        Err(WargameError::Config(_))
    ));
}

#[test]
fn test_load_rejects_bad_syntax() {
    let path = temp_file("broken.toml", "dim = = 5\n");
    assert!(matches!(
        GameOptions::load(&path),
        Err(WargameError::TomlError(_))
    ));
}

#[test]
fn test_missing_file_is_io_error() {
    let path = std::env::temp_dir().join("wargame-config-does-not-exist.toml");
    assert!(matches!(
        GameOptions::load(&path),
        Err(WargameError::IoError(_))
    ));
}
