//! Newtype wrappers and shared constants.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tictactoe::{BOARD_CELLS, Board, LIFESPAN};

/// Separator between the nine cell values of a [`StateKey`]
pub const KEY_DELIMITER: char = ',';

/// Encoded value of an empty cell in a [`StateKey`]
pub const EMPTY_CELL_CODE: i64 = -1;

/// Age-normalized board encoding used as a value-table key.
///
/// Each cell, in row-major order, is written as `-1` when empty and
/// otherwise as the mark's ordinal minus `max(0, turn - 6)`. Subtracting the
/// oldest ordinal that can still be on the board turns absolute move numbers
/// into ages, so the same shape of position maps to the same key no matter
/// how long the game has been running.
///
/// # Examples
///
/// ```
/// use vanishing::tictactoe::Board;
/// use vanishing::types::StateKey;
///
/// let key = StateKey::encode(&Board::new(), 0);
/// assert_eq!(key.as_str(), "-1,-1,-1,-1,-1,-1,-1,-1,-1");
///
/// let parsed = StateKey::parse("0,-1,-1,-1,1,-1,-1,-1,-1").unwrap();
/// assert_eq!(parsed.as_str(), "0,-1,-1,-1,1,-1,-1,-1,-1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateKey(String);

impl StateKey {
    /// Encode `board` as seen when move `turn` is about to be made.
    pub fn encode(board: &Board, turn: u32) -> Self {
        let min_age = i64::from(turn.saturating_sub(LIFESPAN));
        let encoded: Vec<String> = board
            .cells()
            .iter()
            .map(|cell| match cell.ordinal() {
                None => EMPTY_CELL_CODE.to_string(),
                Some(ordinal) => (i64::from(ordinal) - min_age).to_string(),
            })
            .collect();
        StateKey(encoded.join(&KEY_DELIMITER.to_string()))
    }

    /// Parse and validate a key read from storage.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidInput`] unless the string holds exactly
    /// nine comma-separated integers, each at least `-1`.
    pub fn parse(s: &str) -> Result<Self, crate::Error> {
        let s = s.trim();
        let fields: Vec<&str> = s.split(KEY_DELIMITER).collect();
        if fields.len() != BOARD_CELLS {
            return Err(crate::Error::InvalidInput {
                message: format!(
                    "state key '{s}' has {} cells, expected {BOARD_CELLS}",
                    fields.len()
                ),
            });
        }

        for field in &fields {
            match field.trim().parse::<i64>() {
                Ok(value) if value >= EMPTY_CELL_CODE => {}
                _ => {
                    return Err(crate::Error::InvalidInput {
                        message: format!("state key '{s}' has invalid cell value '{field}'"),
                    });
                }
            }
        }

        Ok(StateKey(
            fields
                .iter()
                .map(|f| f.trim())
                .collect::<Vec<_>>()
                .join(&KEY_DELIMITER.to_string()),
        ))
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for StateKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rewards handed to learners by the orchestrator.
pub mod reward {
    /// The game ended on an even (X) move.
    pub const X_WINS: f64 = 1000.0;

    /// The game ended on an odd (O) move.
    pub const O_WINS: f64 = -1000.0;

    /// Any move that does not end the game.
    pub const STEP: f64 = -1.0;

    /// Reward for move `turn`, given whether it ended the game.
    pub fn for_move(game_over: bool, turn: u32) -> f64 {
        match (game_over, turn.is_multiple_of(2)) {
            (true, true) => X_WINS,
            (true, false) => O_WINS,
            (false, _) => STEP,
        }
    }
}
