//! State-value temporal difference learning
//!
//! The learner keeps a single scalar per encoded position (see
//! [`StateKey`](crate::types::StateKey)) rather than one per (state, action)
//! pair. After each move the value of the position the move was played from
//! is pulled toward the move's reward plus the discounted value of the
//! position that followed:
//!
//! V(s) ← V(s) + α[r + γ V(s') - V(s)], with α = 0.1 and γ = 0.9.
//!
//! Move selection is ε-greedy over the values of the positions each move
//! leads to.
//!
//! ## Usage Example
//!
//! ```no_run
//! use vanishing::{q_learning::ValueTableAgent, tictactoe::Player};
//!
//! // Loads values_x.txt from the current directory if it exists
//! let agent = ValueTableAgent::in_dir(Player::X, ".")
//!     .with_exploration_rate(0.1)
//!     .with_seed(7);
//! ```

pub mod agent;
pub mod serialization;
pub mod value_table;

// Public re-exports
pub use agent::ValueTableAgent;
pub use serialization::TableFile;
pub use value_table::{DISCOUNT_FACTOR, LEARNING_RATE, ValueTable};
