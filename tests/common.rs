//! Common test utilities for the vanishing test suite.

#![allow(dead_code)]

use vanishing::{
    Result,
    ports::Agent,
    tictactoe::{Board, GameState, Move, Player},
};

pub fn mv(row: usize, col: usize) -> Move {
    Move::new(row, col).unwrap()
}

/// Play `moves` from the empty board, returning the final state and the
/// winner reported by the last move.
pub fn play_sequence(moves: &[(usize, usize)]) -> (GameState, Option<Player>) {
    let mut state = GameState::new();
    let mut winner = None;
    for &(row, col) in moves {
        winner = state.play(mv(row, col)).unwrap();
    }
    (state, winner)
}

/// Agent that always plays the first empty cell in row-major order
pub struct FirstFree;

impl Agent for FirstFree {
    fn choose_move(&mut self, board: &Board, turn: u32) -> Result<Move> {
        board
            .available_moves()
            .first()
            .copied()
            .ok_or(vanishing::Error::NoValidMoves { turn })
    }

    fn name(&self) -> &str {
        "FirstFree"
    }
}

/// Agent replaying a fixed script of moves
pub struct Scripted {
    moves: Vec<Move>,
    next: usize,
}

impl Scripted {
    pub fn new(moves: &[(usize, usize)]) -> Self {
        Self {
            moves: moves.iter().map(|&(r, c)| mv(r, c)).collect(),
            next: 0,
        }
    }
}

impl Agent for Scripted {
    fn choose_move(&mut self, _board: &Board, turn: u32) -> Result<Move> {
        let chosen = self
            .moves
            .get(self.next)
            .copied()
            .ok_or(vanishing::Error::NoValidMoves { turn })?;
        self.next += 1;
        Ok(chosen)
    }

    fn name(&self) -> &str {
        "Scripted"
    }
}
