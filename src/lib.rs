//! AI Wargame - two-player grid wargame engine with computer opponents

pub mod ai;
pub mod board;
pub mod broker;
pub mod core;
pub mod game;
pub mod rules;
pub mod session;
