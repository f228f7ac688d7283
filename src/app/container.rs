//! Agent factory.
//!
//! The app owns defaults shared by every agent it creates and wires value
//! tables to their on-disk stores.

use crate::{
    app::config::{AgentConfig, AgentKind},
    minimax::MinimaxAgent,
    ports::Agent,
    q_learning::ValueTableAgent,
    tictactoe::Player,
};

/// Creates configured agents.
///
/// # Examples
///
/// ```
/// use vanishing::app::{AgentConfig, AgentKind, App};
/// use vanishing::tictactoe::Player;
///
/// let app = App::new();
/// let config = AgentConfig::new().with_depth_limit(3);
/// let agent = app.create_agent(AgentKind::Minimax, Player::O, &config);
/// assert_eq!(agent.name(), "Minimax-O");
/// ```
#[derive(Debug, Clone, Default)]
pub struct App {
    /// Seed used when the config carries none
    default_seed: Option<u64>,
}

impl App {
    /// Create a new app with no default seed.
    pub fn new() -> Self {
        Self { default_seed: None }
    }

    /// Create a builder for an app with custom defaults.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    pub fn default_seed(&self) -> Option<u64> {
        self.default_seed
    }

    pub fn create_minimax(&self, player: Player, config: &AgentConfig) -> MinimaxAgent {
        MinimaxAgent::new(player).with_depth_limit(config.depth_limit)
    }

    /// Create a value-table agent, loading its store when a table directory
    /// is configured.
    pub fn create_value_agent(&self, player: Player, config: &AgentConfig) -> ValueTableAgent {
        let agent = match &config.table_dir {
            Some(dir) => ValueTableAgent::in_dir(player, dir),
            None => ValueTableAgent::new(player),
        };
        let agent = agent.with_exploration_rate(config.exploration_rate);

        // Apply seed from config or use app default
        match config.seed.or(self.default_seed) {
            Some(seed) => agent.with_seed(seed),
            None => agent,
        }
    }

    pub fn create_agent(
        &self,
        kind: AgentKind,
        player: Player,
        config: &AgentConfig,
    ) -> Box<dyn Agent> {
        match kind {
            AgentKind::Minimax => Box::new(self.create_minimax(player, config)),
            AgentKind::ValueTable => Box::new(self.create_value_agent(player, config)),
        }
    }
}

/// Builder for [`App`]
#[derive(Debug, Default)]
pub struct AppBuilder {
    default_seed: Option<u64>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    pub fn build(self) -> App {
        App {
            default_seed: self.default_seed,
        }
    }
}
