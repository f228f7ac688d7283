//! Live game state

use serde::{Deserialize, Serialize};

use super::board::{Board, Move, Player};

/// Outcome of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    /// Stopped by the orchestrator's turn limit without a winner
    TurnLimit,
}

impl GameOutcome {
    pub fn winner(self) -> Option<Player> {
        match self {
            GameOutcome::Win(player) => Some(player),
            GameOutcome::TurnLimit => None,
        }
    }
}

/// A board together with the ordinal of the move about to be made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub turn: u32,
}

impl GameState {
    /// Empty board, turn 0
    pub fn new() -> Self {
        GameState {
            board: Board::new(),
            turn: 0,
        }
    }

    /// The player whose move it is
    pub fn to_move(&self) -> Player {
        Player::from_turn(self.turn)
    }

    /// Cells the player to move may choose from
    ///
    /// Moves are chosen before the oldest mark vanishes, so the cell freed on
    /// this turn is not yet available.
    pub fn legal_moves(&self) -> Vec<Move> {
        self.board.available_moves()
    }

    /// Play `mv` for the player to move and advance the turn counter.
    ///
    /// Returns the winner if the placement completed a line.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::CellOccupied`] if `mv` targets a marked cell;
    /// the state is left unchanged.
    pub fn play(&mut self, mv: Move) -> Result<Option<Player>, crate::Error> {
        self.board = self.board.advance(mv, self.turn)?;
        let winner = self.board.winner_player();
        tracing::trace!(turn = self.turn, %mv, ?winner, "move played");
        self.turn += 1;
        Ok(winner)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
