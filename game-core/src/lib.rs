//! Core traits and types for game integration
//!
//! This crate provides the boundary between a search engine and the games
//! it searches:
//! - `GameState`: the capability interface a game state must expose
//! - `Played`: a scoped make-and-auto-undo guard for trial moves
//! - `game_utils`: shared helpers for two-player zero-sum scoring

pub mod game_utils;
pub mod state;

// Re-export main types for convenience
pub use state::{GameState, Played};
