//! Application layer: agent configuration and construction.
//!
//! # Usage
//!
//! ```
//! use vanishing::app::{AgentConfig, App};
//! use vanishing::tictactoe::Player;
//!
//! let app = App::new();
//! let config = AgentConfig::new().with_exploration_rate(0.1).with_seed(42);
//! let learner = app.create_value_agent(Player::X, &config);
//! assert_eq!(learner.exploration_rate(), 0.1);
//! ```

pub mod config;
pub mod container;

pub use config::{AgentConfig, AgentKind};
pub use container::{App, AppBuilder};
