//! Minimax agent over vanishing-mark positions

use crate::{
    Error, Result,
    ports::Agent,
    tictactoe::{Board, Move, Player},
};

/// Smallest accepted depth limit
pub const MIN_DEPTH_LIMIT: u32 = 1;

/// Largest accepted depth limit
pub const MAX_DEPTH_LIMIT: u32 = 10;

/// Depth limit used when none is configured
pub const DEFAULT_DEPTH_LIMIT: u32 = 7;

/// Score `board` with `remaining` plies left, `turn` being the ordinal of the
/// next move.
///
/// A completed line scores `+remaining` for X and `-remaining` for O, so
/// earlier wins weigh more than later ones. Reaching the horizon scores 0.
/// The board is taken by value; each child is a fresh copy.
pub fn search(board: Board, maximizing: bool, turn: u32, remaining: u32) -> i32 {
    if remaining == 0 {
        return 0;
    }

    if let Some(ordinal) = board.winner() {
        let score = remaining as i32;
        return if Player::from_turn(ordinal).is_maximizing() {
            score
        } else {
            -score
        };
    }

    let moves = board.available_moves();
    if moves.is_empty() {
        return 0;
    }

    let mut best = if maximizing { i32::MIN } else { i32::MAX };
    for mv in moves {
        let Ok(child) = board.advance(mv, turn) else {
            continue;
        };
        let score = search(child, !maximizing, turn + 1, remaining - 1);
        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }
    best
}

/// Minimax player with a fixed role
///
/// X maximizes, O minimizes. Ties between equally scored moves keep the
/// first one in row-major order.
#[derive(Debug, Clone)]
pub struct MinimaxAgent {
    player: Player,
    depth_limit: u32,
    name: String,
}

impl MinimaxAgent {
    /// Create an agent playing `player` with the default depth limit
    pub fn new(player: Player) -> Self {
        Self {
            player,
            depth_limit: DEFAULT_DEPTH_LIMIT,
            name: format!("Minimax-{player}"),
        }
    }

    /// Builder form of [`MinimaxAgent::set_depth_limit`]
    pub fn with_depth_limit(mut self, depth_limit: u32) -> Self {
        self.set_depth_limit(depth_limit);
        self
    }

    /// Change the depth limit. Values outside 1..=10 are ignored.
    pub fn set_depth_limit(&mut self, depth_limit: u32) {
        if (MIN_DEPTH_LIMIT..=MAX_DEPTH_LIMIT).contains(&depth_limit) {
            self.depth_limit = depth_limit;
        } else {
            tracing::debug!(
                requested = depth_limit,
                kept = self.depth_limit,
                "ignoring out-of-range depth limit"
            );
        }
    }

    pub fn depth_limit(&self) -> u32 {
        self.depth_limit
    }

    pub fn player(&self) -> Player {
        self.player
    }

    /// Root scores for every available move, in row-major order
    pub fn evaluate_moves(&self, board: &Board, turn: u32) -> Vec<(Move, i32)> {
        let maximizing = self.player.is_maximizing();
        board
            .available_moves()
            .into_iter()
            .filter_map(|mv| {
                let child = board.advance(mv, turn).ok()?;
                Some((mv, search(child, !maximizing, turn + 1, self.depth_limit)))
            })
            .collect()
    }

    /// Pick the best-scoring move for this agent's role.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoValidMoves`] if the board has no empty cell.
    pub fn best_move(&self, board: &Board, turn: u32) -> Result<Move> {
        if Player::from_turn(turn) != self.player {
            tracing::warn!(
                agent = %self.name,
                turn,
                "minimax agent asked to move on the opponent's turn"
            );
        }

        let maximizing = self.player.is_maximizing();
        let mut best: Option<(Move, i32)> = None;

        for (mv, score) in self.evaluate_moves(board, turn) {
            let better = match best {
                None => true,
                Some((_, best_score)) if maximizing => score > best_score,
                Some((_, best_score)) => score < best_score,
            };
            if better {
                best = Some((mv, score));
            }
        }

        match best {
            Some((mv, score)) => {
                tracing::debug!(agent = %self.name, turn, %mv, score, "minimax move selected");
                Ok(mv)
            }
            None => {
                tracing::error!(agent = %self.name, turn, "no available moves for minimax");
                Err(Error::NoValidMoves { turn })
            }
        }
    }
}

impl Agent for MinimaxAgent {
    fn choose_move(&mut self, board: &Board, turn: u32) -> Result<Move> {
        self.best_move(board, turn)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
