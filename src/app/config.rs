//! Configuration types for agent creation.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::minimax::DEFAULT_DEPTH_LIMIT;

/// Kind of computer player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum AgentKind {
    /// Depth-limited minimax search
    Minimax,
    /// Learned value table
    ValueTable,
}

/// Configuration for creating computer agents.
///
/// Values are passed through to the agents unchanged; agents ignore depth
/// limits and exploration rates outside their valid ranges.
///
/// # Examples
///
/// ```
/// use vanishing::app::AgentConfig;
///
/// let config = AgentConfig::new()
///     .with_depth_limit(4)
///     .with_exploration_rate(0.1)
///     .with_seed(42)
///     .with_table_dir("tables");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Search horizon of minimax agents
    pub depth_limit: u32,
    /// Probability of a random move for value-table agents
    pub exploration_rate: f64,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
    /// Directory holding value-table stores; `None` keeps tables in memory
    pub table_dir: Option<PathBuf>,
}

impl AgentConfig {
    /// Create a configuration with default values:
    /// - Depth limit: 7
    /// - Exploration rate: 0.0 (always greedy)
    /// - Seed: None (non-deterministic)
    /// - Table directory: None (in-memory tables)
    pub fn new() -> Self {
        Self {
            depth_limit: DEFAULT_DEPTH_LIMIT,
            exploration_rate: 0.0,
            seed: None,
            table_dir: None,
        }
    }

    pub fn with_depth_limit(mut self, depth_limit: u32) -> Self {
        self.depth_limit = depth_limit;
        self
    }

    pub fn with_exploration_rate(mut self, rate: f64) -> Self {
        self.exploration_rate = rate;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Persist value tables in `dir`.
    pub fn with_table_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.table_dir = Some(dir.into());
        self
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new()
    }
}
