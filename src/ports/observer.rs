//! Observer port - abstraction for watching games as they are played

use crate::{
    Result,
    tictactoe::{Board, GameOutcome, GameState, Move},
};

/// Observer trait for monitoring training runs and interactive games
///
/// # Event Sequence
///
/// 1. `on_training_start(total_games)` - Once at the beginning
/// 2. For each game:
///    - `on_game_start(game_num, initial)`
///    - `on_move(...)` - For each move in the game
///    - `on_game_end(game_num, outcome, turns)`
/// 3. `on_training_end()` - Once at the end
///
/// All methods default to doing nothing.
pub trait Observer {
    fn on_training_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    fn on_game_start(&mut self, _game_num: usize, _initial: &Board) -> Result<()> {
        Ok(())
    }

    /// Called after each move is applied.
    ///
    /// * `before` - State before the move (board and ordinal of the move)
    /// * `mv` - The move that was played
    /// * `after` - Board after the oldest mark vanished and `mv` was placed
    fn on_move(
        &mut self,
        _game_num: usize,
        _before: &GameState,
        _mv: Move,
        _after: &Board,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when a game ends; `turns` is the number of moves played.
    fn on_game_end(&mut self, _game_num: usize, _outcome: GameOutcome, _turns: u32) -> Result<()> {
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
