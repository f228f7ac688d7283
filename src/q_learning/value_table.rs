//! State-value table for temporal difference learning

use std::collections::HashMap;

use crate::types::StateKey;

/// Learning rate α
pub const LEARNING_RATE: f64 = 0.1;

/// Discount factor γ
pub const DISCOUNT_FACTOR: f64 = 0.9;

/// Table mapping encoded states to scalar values
///
/// One value is kept per state, not per (state, action) pair. Entries are
/// only ever inserted or overwritten; unseen states read as 0.0.
#[derive(Debug, Clone)]
pub struct ValueTable {
    values: HashMap<StateKey, f64>,
}

impl ValueTable {
    /// Create an empty table with α = 0.1 and γ = 0.9
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Value of a state, 0.0 if unseen
    pub fn get(&self, state: &StateKey) -> f64 {
        self.values.get(state).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, state: StateKey, value: f64) {
        self.values.insert(state, value);
    }

    /// TD(0) state-value update
    ///
    /// V(s) ← V(s) + α[r + γ V(s') - V(s)]
    ///
    /// Returns the new value of `state`.
    pub fn td_update(&mut self, state: StateKey, reward: f64, next_state: &StateKey) -> f64 {
        let current = self.get(&state);
        let next = self.get(next_state);
        let td_target = reward + DISCOUNT_FACTOR * next;
        let td_error = td_target - current;
        let updated = current + LEARNING_RATE * td_error;
        self.set(state, updated);
        updated
    }

    /// Iterate over all stored (state, value) pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&StateKey, f64)> {
        self.values.iter().map(|(k, &v)| (k, v))
    }

    /// Number of stored states
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Default for ValueTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> StateKey {
        StateKey::parse(s).unwrap()
    }

    #[test]
    fn test_value_table_initialization() {
        let table = ValueTable::new();
        assert!(table.is_empty());
        assert_eq!(table.get(&key("-1,-1,-1,-1,-1,-1,-1,-1,-1")), 0.0);
    }

    #[test]
    fn test_value_table_set_get() {
        let mut table = ValueTable::new();
        let state = key("0,-1,-1,-1,-1,-1,-1,-1,-1");
        table.set(state.clone(), 1.5);
        assert_eq!(table.get(&state), 1.5);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_td_update_from_fresh_table() {
        let mut table = ValueTable::new();
        let state = key("-1,-1,-1,-1,-1,-1,-1,-1,-1");
        let next_state = key("0,-1,-1,-1,-1,-1,-1,-1,-1");

        // V(s) = 0 + 0.1 * (1000 + 0.9 * 0 - 0) = 100
        let updated = table.td_update(state.clone(), 1000.0, &next_state);
        assert!((updated - 100.0).abs() < 1e-9);
        assert!((table.get(&state) - 100.0).abs() < 1e-9);
        // the successor is read, never written
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_td_update_bootstraps_from_next_state() {
        let mut table = ValueTable::new();
        let state = key("-1,-1,-1,-1,-1,-1,-1,-1,-1");
        let next_state = key("0,-1,-1,-1,-1,-1,-1,-1,-1");
        table.set(next_state.clone(), 50.0);
        table.set(state.clone(), 10.0);

        // V(s) = 10 + 0.1 * (-1 + 0.9 * 50 - 10) = 13.4
        let updated = table.td_update(state, -1.0, &next_state);
        assert!((updated - 13.4).abs() < 1e-9);
    }
}
