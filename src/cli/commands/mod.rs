//! CLI subcommands

pub mod play;
pub mod train;

use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::{app::AgentConfig, minimax::DEFAULT_DEPTH_LIMIT, tictactoe::Player};

/// Player token as a command-line value
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlayerArg {
    X,
    O,
}

impl From<PlayerArg> for Player {
    fn from(value: PlayerArg) -> Self {
        match value {
            PlayerArg::X => Player::X,
            PlayerArg::O => Player::O,
        }
    }
}

/// Agent settings shared by every command
#[derive(Args, Debug, Clone)]
pub struct AgentArgs {
    /// Minimax search depth (1-10; other values keep the default)
    #[arg(long, short = 'd', default_value_t = DEFAULT_DEPTH_LIMIT)]
    pub depth: u32,

    /// Probability that the learner plays a random move (0.0-1.0)
    #[arg(long, short = 'e', default_value_t = 0.0)]
    pub exploration: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory holding the value-table files
    #[arg(long, default_value = ".")]
    pub table_dir: PathBuf,
}

impl AgentArgs {
    pub fn to_config(&self) -> AgentConfig {
        let config = AgentConfig::new()
            .with_depth_limit(self.depth)
            .with_exploration_rate(self.exploration)
            .with_table_dir(self.table_dir.clone());
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}
