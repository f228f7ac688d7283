//! Value-table learning agent
//!
//! The agent scores each candidate move by the learned value of the position
//! it leads to and learns with a TD(0) update over states.

use std::path::Path;

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    Error, Result,
    ports::{Agent, Trainable},
    q_learning::{serialization::TableFile, value_table::ValueTable},
    tictactoe::{Board, Move, Player},
    types::StateKey,
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// ε-greedy agent backed by a [`ValueTable`]
#[derive(Debug, Clone)]
pub struct ValueTableAgent {
    player: Player,
    table: ValueTable,
    store: Option<TableFile>,
    exploration_rate: f64,
    rng: StdRng,
    rng_seed: Option<u64>,
    name: String,
}

impl ValueTableAgent {
    /// Create an agent with an empty in-memory table and no store.
    pub fn new(player: Player) -> Self {
        Self {
            player,
            table: ValueTable::new(),
            store: None,
            exploration_rate: 0.0,
            rng: build_rng(None),
            rng_seed: None,
            name: format!("ValueTable-{player}"),
        }
    }

    /// Create an agent backed by `store`, loading it immediately.
    ///
    /// A missing or unreadable store leaves the table empty.
    pub fn with_store(player: Player, store: TableFile) -> Self {
        let mut agent = Self::new(player);
        agent.table = store.load();
        agent.store = Some(store);
        agent
    }

    /// Create an agent using the default store for `player` inside `dir`.
    pub fn in_dir<P: AsRef<Path>>(player: Player, dir: P) -> Self {
        Self::with_store(player, TableFile::for_player(dir, player))
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        self
    }

    /// Builder form of [`ValueTableAgent::set_exploration_rate`]
    pub fn with_exploration_rate(mut self, rate: f64) -> Self {
        self.set_exploration_rate(rate);
        self
    }

    /// Change the probability of playing a random move. Values outside
    /// 0.0..=1.0 are ignored.
    pub fn set_exploration_rate(&mut self, rate: f64) {
        if (0.0..=1.0).contains(&rate) {
            self.exploration_rate = rate;
        } else {
            tracing::debug!(
                requested = rate,
                kept = self.exploration_rate,
                "ignoring out-of-range exploration rate"
            );
        }
    }

    pub fn exploration_rate(&self) -> f64 {
        self.exploration_rate
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn table(&self) -> &ValueTable {
        &self.table
    }

    pub fn store(&self) -> Option<&TableFile> {
        self.store.as_ref()
    }

    pub fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }

    /// Move whose resulting position is best for the agent's side.
    ///
    /// Values are from X's point of view, so X takes the highest and O the
    /// lowest. Each candidate is simulated with the live transition (the
    /// oldest mark vanishes, then the new mark is placed) and the result is
    /// encoded against `turn`. Unseen positions count as 0.0; ties keep the
    /// first move in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoValidMoves`] if the board has no empty cell.
    pub fn greedy_move(&self, board: &Board, turn: u32) -> Result<Move> {
        let maximizing = self.player.is_maximizing();
        let mut best: Option<(Move, f64)> = None;
        for mv in board.available_moves() {
            let Ok(next) = board.advance(mv, turn) else {
                continue;
            };
            let value = self.table.get(&StateKey::encode(&next, turn));
            let better = |best_value: f64| {
                if maximizing {
                    value > best_value
                } else {
                    value < best_value
                }
            };
            if best.is_none_or(|(_, best_value)| better(best_value)) {
                best = Some((mv, value));
            }
        }

        best.map(|(mv, _)| mv)
            .ok_or(Error::NoValidMoves { turn })
    }

    /// ε-greedy move selection
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoValidMoves`] if the board has no empty cell.
    pub fn select_move(&mut self, board: &Board, turn: u32) -> Result<Move> {
        let moves = board.available_moves();
        if moves.is_empty() {
            tracing::error!(agent = %self.name, turn, "no available moves for value-table agent");
            return Err(Error::NoValidMoves { turn });
        }

        if self.rng.random::<f64>() < self.exploration_rate {
            // Explore: uniform over legal moves
            if let Some(&mv) = moves.choose(&mut self.rng) {
                tracing::debug!(agent = %self.name, turn, %mv, "exploratory move");
                return Ok(mv);
            }
        }

        self.greedy_move(board, turn)
    }

    /// Learn from move `turn`, played at `mv`, that earned `reward`.
    ///
    /// The prior board is encoded against `turn` and the resulting board
    /// against `turn + 1`; the prior state's value moves toward
    /// `reward + γ V(next)`.
    pub fn update(&mut self, prior: &Board, mv: Move, turn: u32, reward: f64, resulting: &Board) {
        let state = StateKey::encode(prior, turn);
        let next_state = StateKey::encode(resulting, turn + 1);
        let updated = self.table.td_update(state, reward, &next_state);
        tracing::trace!(agent = %self.name, turn, %mv, reward, updated, "value updated");
    }

    /// Write the table to the agent's store, if it has one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the store cannot be written.
    pub fn save(&self) -> Result<()> {
        match &self.store {
            Some(store) => store.save(&self.table),
            None => {
                tracing::debug!(agent = %self.name, "no store configured; skipping save");
                Ok(())
            }
        }
    }
}

impl Agent for ValueTableAgent {
    fn choose_move(&mut self, board: &Board, turn: u32) -> Result<Move> {
        self.select_move(board, turn)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn as_trainable(&mut self) -> Option<&mut dyn Trainable> {
        Some(self)
    }
}

impl Trainable for ValueTableAgent {
    fn update(&mut self, prior: &Board, mv: Move, turn: u32, reward: f64, resulting: &Board) {
        ValueTableAgent::update(self, prior, mv, turn, reward, resulting);
    }

    fn save(&self) -> Result<()> {
        ValueTableAgent::save(self)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use tempfile::tempdir;

    use super::*;

    fn mv(row: usize, col: usize) -> Move {
        Move::new(row, col).unwrap()
    }

    #[test]
    fn test_update_from_fresh_table() {
        let mut agent = ValueTableAgent::new(Player::X);
        let prior = Board::new();
        let resulting = prior.advance(mv(1, 1), 0).unwrap();

        agent.update(&prior, mv(1, 1), 0, 1000.0, &resulting);

        let key = StateKey::encode(&prior, 0);
        assert!((agent.table().get(&key) - 100.0).abs() < 1e-9);
        assert_eq!(agent.table().len(), 1);
    }

    #[test]
    fn test_empty_table_picks_first_move() {
        let mut agent = ValueTableAgent::new(Player::X).with_seed(1);
        assert_eq!(agent.choose_move(&Board::new(), 0).unwrap(), mv(0, 0));
    }

    #[test]
    fn test_greedy_prefers_highest_valued_result() {
        let mut agent = ValueTableAgent::new(Player::X).with_seed(1);
        let center = Board::new().advance(mv(1, 1), 0).unwrap();
        let corner = Board::new().advance(mv(2, 2), 0).unwrap();
        agent.table.set(StateKey::encode(&center, 0), 5.0);
        agent.table.set(StateKey::encode(&corner, 0), 7.0);

        assert_eq!(agent.choose_move(&Board::new(), 0).unwrap(), mv(2, 2));
    }

    #[test]
    fn test_greedy_lookahead_applies_vanishing() {
        let board = Board::from_ordinals([
            [Some(0), Some(1), Some(2)],
            [Some(3), Some(4), Some(5)],
            [None, None, None],
        ]);
        let mut agent = ValueTableAgent::new(Player::X).with_seed(3);

        // the mark at (0, 0) must be gone in the position the agent looks up
        let expected = Board::from_ordinals([
            [None, Some(1), Some(2)],
            [Some(3), Some(4), Some(5)],
            [None, Some(6), None],
        ]);
        agent.table.set(StateKey::encode(&expected, 6), 1.0);

        assert_eq!(agent.choose_move(&board, 6).unwrap(), mv(2, 1));
    }

    #[test]
    fn test_o_picks_lowest_valued_result() {
        // X threatens the top row; O must block at (0, 2)
        let board = Board::from_ordinals([
            [Some(0), Some(2), None],
            [None, Some(1), None],
            [None, None, None],
        ]);
        let mut agent = ValueTableAgent::new(Player::O).with_seed(5);
        let ignore = board.advance(mv(2, 2), 3).unwrap();
        let block = board.advance(mv(0, 2), 3).unwrap();
        agent.table.set(StateKey::encode(&ignore, 3), 90.0);
        agent.table.set(StateKey::encode(&block, 3), -50.0);

        assert_eq!(agent.choose_move(&board, 3).unwrap(), mv(0, 2));
    }

    #[test]
    fn test_full_exploration_stays_legal() {
        let board = Board::from_ordinals([
            [Some(0), None, Some(2)],
            [None, Some(1), None],
            [None, None, None],
        ]);
        let legal: HashSet<Move> = board.available_moves().into_iter().collect();
        let mut agent = ValueTableAgent::new(Player::O)
            .with_exploration_rate(1.0)
            .with_seed(42);

        let chosen: HashSet<Move> = (0..200)
            .map(|_| agent.choose_move(&board, 3).unwrap())
            .collect();
        assert!(chosen.is_subset(&legal));
        assert!(chosen.len() > 1);
    }

    #[test]
    fn test_exploration_rate_clamping() {
        let mut agent = ValueTableAgent::new(Player::X);
        assert_eq!(agent.exploration_rate(), 0.0);

        agent.set_exploration_rate(0.3);
        assert_eq!(agent.exploration_rate(), 0.3);
        agent.set_exploration_rate(1.5);
        assert_eq!(agent.exploration_rate(), 0.3);
        agent.set_exploration_rate(-0.1);
        assert_eq!(agent.exploration_rate(), 0.3);
        agent.set_exploration_rate(1.0);
        assert_eq!(agent.exploration_rate(), 1.0);
    }

    #[test]
    fn test_save_and_reload_through_store() -> Result<()> {
        let dir = tempdir()?;
        let mut agent = ValueTableAgent::in_dir(Player::X, dir.path());
        assert!(agent.table().is_empty());

        let prior = Board::new();
        let resulting = prior.advance(mv(0, 0), 0).unwrap();
        agent.update(&prior, mv(0, 0), 0, -1.0, &resulting);
        Trainable::save(&agent)?;

        let reloaded = ValueTableAgent::in_dir(Player::X, dir.path());
        assert_eq!(reloaded.table().len(), 1);
        assert_eq!(
            reloaded.table().get(&StateKey::encode(&prior, 0)),
            agent.table().get(&StateKey::encode(&prior, 0))
        );
        Ok(())
    }

    #[test]
    fn test_in_memory_agent_save_is_noop() {
        let agent = ValueTableAgent::new(Player::O);
        assert!(agent.save().is_ok());
    }

    #[test]
    fn test_exposes_training_capability() {
        let mut agent = ValueTableAgent::new(Player::X);
        assert!(agent.as_trainable().is_some());
    }
}
