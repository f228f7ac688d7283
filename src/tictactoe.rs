//! Vanishing-mark Tic-Tac-Toe rules
//!
//! Every mark remembers the ordinal of the move that placed it. Ownership
//! follows from parity (even ordinals belong to X, odd ordinals to O) and age
//! follows from the distance to the current turn. Once six newer marks exist
//! a mark vanishes, so the board never holds more than [`LIFESPAN`] marks.

pub mod board;
pub mod game;
pub mod lines;

pub use board::{BOARD_CELLS, Board, Cell, LIFESPAN, Move, Player};
pub use game::{GameOutcome, GameState};
pub use lines::{LineAnalyzer, WINNING_LINES};
