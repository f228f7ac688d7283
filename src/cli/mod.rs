//! Command-line interface
//!
//! `train` runs the value-table learner against minimax; `play` pits a human
//! against either computer player.

pub mod commands;
pub mod output;
