//! Vanishing-mark Tic-Tac-Toe
//!
//! Tic-tac-toe where every mark disappears six moves after it was placed.
//! This crate provides:
//! - The board model with its vanishing rule and win detection
//! - A depth-limited minimax player
//! - A value-table player that learns by temporal differences
//! - A game orchestrator with observers, a console player and a CLI

pub mod app;
pub mod cli;
pub mod error;
pub mod human;
pub mod minimax;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod tictactoe;
pub mod types;

pub use error::{Error, Result};
pub use types::StateKey;
