//! Depth-limited minimax search
//!
//! The search is exhaustive up to its depth limit: no pruning and no
//! transposition table. Every simulated ply goes through
//! [`Board::advance`](crate::tictactoe::Board::advance), so marks vanish in
//! the search exactly when they vanish in a live game.

pub mod search;

pub use search::{DEFAULT_DEPTH_LIMIT, MAX_DEPTH_LIMIT, MIN_DEPTH_LIMIT, MinimaxAgent, search};
