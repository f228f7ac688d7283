//! Game orchestration and training runs

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::{Agent, Observer},
    tictactoe::{Board, GameOutcome, GameState, Player},
    types::reward,
};

/// Games are cut off once this many moves have been played
pub const DEFAULT_MAX_TURNS: u32 = 100;

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of games per run
    pub num_games: usize,

    /// Move count after which a game stops without a winner
    pub max_turns: u32,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_games: 1000,
            max_turns: DEFAULT_MAX_TURNS,
        }
    }
}

/// A single finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub outcome: GameOutcome,
    /// Number of moves played
    pub turns: u32,
    pub final_board: Board,
}

/// Aggregated statistics of a run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    pub total_games: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    /// Sum of game lengths over games X won
    pub x_win_turns: u64,
    /// Sum of game lengths over games O won
    pub o_win_turns: u64,
    /// Games stopped by the turn limit
    pub turn_limit_games: usize,
}

impl TrainingResult {
    pub fn record(&mut self, game: &GameRecord) {
        self.total_games += 1;
        match game.outcome {
            GameOutcome::Win(Player::X) => {
                self.x_wins += 1;
                self.x_win_turns += u64::from(game.turns);
            }
            GameOutcome::Win(Player::O) => {
                self.o_wins += 1;
                self.o_win_turns += u64::from(game.turns);
            }
            GameOutcome::TurnLimit => self.turn_limit_games += 1,
        }
    }

    /// Average length of games X won
    pub fn avg_x_win_turns(&self) -> Option<f64> {
        average(self.x_win_turns, self.x_wins)
    }

    /// Average length of games O won
    pub fn avg_o_win_turns(&self) -> Option<f64> {
        average(self.o_win_turns, self.o_wins)
    }

    /// Average length over all games that had a winner
    pub fn avg_decided_turns(&self) -> Option<f64> {
        average(self.x_win_turns + self.o_win_turns, self.x_wins + self.o_wins)
    }
}

fn average(total: u64, count: usize) -> Option<f64> {
    (count > 0).then(|| total as f64 / count as f64)
}

/// Plays games between two agents, feeding learners after every move
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Play `num_games` games, `x` always moving first
    pub fn run(&mut self, x: &mut dyn Agent, o: &mut dyn Agent) -> Result<TrainingResult> {
        let mut result = TrainingResult::default();

        for observer in &mut self.observers {
            observer.on_training_start(self.config.num_games)?;
        }

        for game_num in 0..self.config.num_games {
            let game = self.play_game(game_num, x, o)?;
            result.record(&game);

            for observer in &mut self.observers {
                observer.on_game_end(game_num, game.outcome, game.turns)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        tracing::info!(
            games = result.total_games,
            x_wins = result.x_wins,
            o_wins = result.o_wins,
            turn_limit = result.turn_limit_games,
            "training run finished"
        );
        Ok(result)
    }

    /// Play one game from the empty board.
    ///
    /// Each turn: the player to move picks a move against the current board,
    /// the oldest mark vanishes, the new mark is placed, and the position is
    /// checked for a winner. Every agent exposing the training capability is
    /// then updated with the move's reward.
    pub fn play_game(
        &mut self,
        game_num: usize,
        x: &mut dyn Agent,
        o: &mut dyn Agent,
    ) -> Result<GameRecord> {
        let mut state = GameState::new();

        for observer in &mut self.observers {
            observer.on_game_start(game_num, &state.board)?;
        }

        let outcome = loop {
            let before = state;
            let mover: &mut dyn Agent = match before.to_move() {
                Player::X => &mut *x,
                Player::O => &mut *o,
            };
            let mv = mover.choose_move(&before.board, before.turn)?;
            let winner = state.play(mv)?;

            let move_reward = reward::for_move(winner.is_some(), before.turn);
            if let Some(learner) = x.as_trainable() {
                learner.update(&before.board, mv, before.turn, move_reward, &state.board);
            }
            if let Some(learner) = o.as_trainable() {
                learner.update(&before.board, mv, before.turn, move_reward, &state.board);
            }

            for observer in &mut self.observers {
                observer.on_move(game_num, &before, mv, &state.board)?;
            }

            if let Some(player) = winner {
                break GameOutcome::Win(player);
            }
            if state.turn >= self.config.max_turns {
                break GameOutcome::TurnLimit;
            }
        };

        tracing::debug!(game_num, ?outcome, turns = state.turn, "game finished");
        Ok(GameRecord {
            outcome,
            turns: state.turn,
            final_board: state.board,
        })
    }
}

/// Flush every agent that exposes the training capability.
///
/// # Errors
///
/// Returns the first save failure; learned state stays in memory.
pub fn save_learners(agents: &mut [&mut dyn Agent]) -> Result<()> {
    for agent in agents.iter_mut() {
        if let Some(learner) = agent.as_trainable() {
            learner.save()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        minimax::MinimaxAgent,
        ports::Trainable,
        q_learning::ValueTableAgent,
        tictactoe::{BOARD_CELLS, Move},
    };

    /// Plays the first empty cell
    struct FirstFree;

    impl Agent for FirstFree {
        fn choose_move(&mut self, board: &Board, turn: u32) -> Result<Move> {
            board
                .available_moves()
                .first()
                .copied()
                .ok_or(crate::Error::NoValidMoves { turn })
        }

        fn name(&self) -> &str {
            "FirstFree"
        }
    }

    /// Records every update it receives
    #[derive(Default)]
    struct Recorder {
        rewards: Vec<(u32, f64)>,
        saves: std::cell::Cell<usize>,
    }

    impl Agent for Recorder {
        fn choose_move(&mut self, board: &Board, turn: u32) -> Result<Move> {
            FirstFree.choose_move(board, turn)
        }

        fn name(&self) -> &str {
            "Recorder"
        }

        fn as_trainable(&mut self) -> Option<&mut dyn Trainable> {
            Some(self)
        }
    }

    impl Trainable for Recorder {
        fn update(&mut self, prior: &Board, mv: Move, turn: u32, reward: f64, resulting: &Board) {
            assert!(prior.is_empty(mv));
            assert_eq!(resulting.get(mv).ordinal(), Some(turn));
            self.rewards.push((turn, reward));
        }

        fn save(&self) -> Result<()> {
            self.saves.set(self.saves.get() + 1);
            Ok(())
        }
    }

    #[test]
    fn test_first_free_game_x_wins() {
        // X plays (0,0) (0,2) (1,1); its seventh move (2,0) lands after (0,0)
        // vanished and completes the anti-diagonal
        let mut pipeline = TrainingPipeline::new(TrainingConfig::default());
        let record = pipeline
            .play_game(0, &mut FirstFree, &mut FirstFree)
            .unwrap();
        assert_eq!(record.outcome, GameOutcome::Win(Player::X));
        assert_eq!(record.turns, 7);
        assert!(record.final_board.occupied_count() <= 6);
    }

    #[test]
    fn test_learner_receives_reward_contract() {
        let mut pipeline = TrainingPipeline::new(TrainingConfig::default());
        let mut learner = Recorder::default();
        let record = pipeline
            .play_game(0, &mut learner, &mut FirstFree)
            .unwrap();

        assert_eq!(learner.rewards.len() as u32, record.turns);
        let (last_turn, last_reward) = *learner.rewards.last().unwrap();
        assert_eq!(last_turn, record.turns - 1);
        assert_eq!(last_reward, 1000.0);
        assert!(learner.rewards[..learner.rewards.len() - 1]
            .iter()
            .all(|&(_, r)| r == -1.0));
    }

    #[test]
    fn test_turn_limit_stops_game() {
        let config = TrainingConfig {
            num_games: 1,
            max_turns: 3,
        };
        let mut pipeline = TrainingPipeline::new(config);
        let record = pipeline
            .play_game(0, &mut FirstFree, &mut FirstFree)
            .unwrap();
        assert_eq!(record.outcome, GameOutcome::TurnLimit);
        assert_eq!(record.turns, 3);
    }

    #[test]
    fn test_run_aggregates_results() {
        let config = TrainingConfig {
            num_games: 4,
            max_turns: DEFAULT_MAX_TURNS,
        };
        let mut pipeline = TrainingPipeline::new(config);
        let result = pipeline.run(&mut FirstFree, &mut FirstFree).unwrap();

        assert_eq!(result.total_games, 4);
        assert_eq!(result.x_wins, 4);
        assert_eq!(result.avg_x_win_turns(), Some(7.0));
        assert_eq!(result.avg_o_win_turns(), None);
        assert_eq!(result.avg_decided_turns(), Some(7.0));
    }

    #[test]
    fn test_value_agent_learns_against_minimax() {
        let config = TrainingConfig {
            num_games: 3,
            max_turns: 30,
        };
        let mut pipeline = TrainingPipeline::new(config);
        let mut learner = ValueTableAgent::new(Player::X)
            .with_exploration_rate(0.2)
            .with_seed(5);
        let mut minimax = MinimaxAgent::new(Player::O).with_depth_limit(2);

        let result = pipeline.run(&mut learner, &mut minimax).unwrap();
        assert_eq!(result.total_games, 3);
        assert!(!learner.table().is_empty());
        assert!(learner.table().len() <= BOARD_CELLS * 30 * 3);
    }

    #[test]
    fn test_save_learners_skips_plain_agents() {
        let mut learner = Recorder::default();
        let mut plain = FirstFree;
        {
            let mut agents: [&mut dyn Agent; 2] = [&mut learner, &mut plain];
            save_learners(&mut agents).unwrap();
        }
        assert_eq!(learner.saves.get(), 1);
    }
}
