//! Agent ports - move selection and the optional training capability

use crate::{
    Result,
    tictactoe::{Board, Move},
};

/// Anything that can pick a move for the current position.
///
/// # Examples
///
/// ```no_run
/// use vanishing::{
///     ports::Agent,
///     tictactoe::GameState,
/// };
///
/// fn next_move(agent: &mut dyn Agent, state: &GameState) -> vanishing::Result<()> {
///     let mv = agent.choose_move(&state.board, state.turn)?;
///     println!("{} plays {mv}", agent.name());
///     Ok(())
/// }
/// ```
pub trait Agent {
    /// Select a move for the board as it stands before move `turn`.
    ///
    /// # Errors
    ///
    /// Returns an error if no move can be produced (no empty cell, or the
    /// move source failed).
    fn choose_move(&mut self, board: &Board, turn: u32) -> Result<Move>;

    /// Get the agent's name, used in logs and summaries.
    fn name(&self) -> &str;

    /// Expose the training capability, if this agent learns.
    ///
    /// The orchestrator calls this instead of inspecting concrete types.
    /// Agents that only play keep the default.
    fn as_trainable(&mut self) -> Option<&mut dyn Trainable> {
        None
    }
}

/// Capability of agents that learn from individual moves.
pub trait Trainable {
    /// Learn from one move.
    ///
    /// Called by the orchestrator right after `mv` was played as move `turn`,
    /// with the board before the move, the reward for the move, and the
    /// board after it.
    fn update(&mut self, prior: &Board, mv: Move, turn: u32, reward: f64, resulting: &Board);

    /// Flush learned state to persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written; learned state stays
    /// usable in memory.
    fn save(&self) -> Result<()>;
}
