//! Board representation and the vanishing-mark transition rules

use std::fmt;

use serde::{Deserialize, Serialize};

use super::lines::LineAnalyzer;

/// Number of cells on the 3x3 board
pub const BOARD_CELLS: usize = 9;

/// Number of moves a mark survives before it vanishes
pub const LIFESPAN: u32 = 6;

/// A cell on the board
///
/// An occupied cell stores the 0-based ordinal of the move that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    PlacedAt(u32),
}

impl Cell {
    /// Ordinal of the move that placed this mark, if any
    pub fn ordinal(self) -> Option<u32> {
        match self {
            Cell::Empty => None,
            Cell::PlacedAt(turn) => Some(turn),
        }
    }

    /// Owner of the mark, derived from the ordinal's parity
    pub fn owner(self) -> Option<Player> {
        self.ordinal().map(Player::from_turn)
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn to_char(self) -> char {
        match self.owner() {
            None => ' ',
            Some(player) => player.to_char(),
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Plays the even ordinals (moves first)
    X,
    /// Plays the odd ordinals
    O,
}

impl Player {
    /// The player who makes the move with the given ordinal
    pub fn from_turn(turn: u32) -> Player {
        if turn.is_multiple_of(2) {
            Player::X
        } else {
            Player::O
        }
    }

    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// X maximizes scores and rewards, O minimizes them
    pub fn is_maximizing(self) -> bool {
        self == Player::X
    }

    pub fn to_char(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A (row, column) placement, both in `0..3`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    /// Create a move, validating that it lies on the board.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidMove`] if either coordinate is >= 3.
    pub fn new(row: usize, col: usize) -> Result<Self, crate::Error> {
        if row < 3 && col < 3 {
            Ok(Move { row, col })
        } else {
            Err(crate::Error::InvalidMove { row, col })
        }
    }

    /// Row-major cell index (0-8)
    pub fn index(self) -> usize {
        self.row * 3 + self.col
    }

    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index < BOARD_CELLS);
        Move {
            row: index / 3,
            col: index % 3,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The 3x3 grid, stored row-major
///
/// `Board` is `Copy`, so every caller that derives a new position works on
/// its own value and never disturbs a board another branch can see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; BOARD_CELLS],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; BOARD_CELLS],
        }
    }

    /// Build a board from row-major ordinals (`None` for empty cells)
    pub fn from_ordinals(rows: [[Option<u32>; 3]; 3]) -> Self {
        let mut board = Board::new();
        for (r, row) in rows.iter().enumerate() {
            for (c, ordinal) in row.iter().enumerate() {
                if let Some(turn) = ordinal {
                    board.cells[r * 3 + c] = Cell::PlacedAt(*turn);
                }
            }
        }
        board
    }

    pub fn cells(&self) -> &[Cell; BOARD_CELLS] {
        &self.cells
    }

    pub fn get(&self, mv: Move) -> Cell {
        self.cells[mv.index()]
    }

    pub fn is_empty(&self, mv: Move) -> bool {
        self.get(mv).is_empty()
    }

    /// Count the marks currently on the board
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Place the mark for move `turn` at `mv`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::CellOccupied`] if the target cell already holds
    /// a mark. Callers that only play moves from [`Board::available_moves`]
    /// never see this.
    #[must_use = "place returns a new board; the original is unchanged"]
    pub fn place(&self, mv: Move, turn: u32) -> Result<Board, crate::Error> {
        if !self.is_empty(mv) {
            tracing::error!(%mv, turn, "attempted to place a mark on an occupied cell");
            return Err(crate::Error::CellOccupied {
                row: mv.row,
                col: mv.col,
                turn,
            });
        }

        let mut next = *self;
        next.cells[mv.index()] = Cell::PlacedAt(turn);
        Ok(next)
    }

    /// Remove the mark placed [`LIFESPAN`] moves before `turn`, if present
    #[must_use = "expire_oldest returns a new board; the original is unchanged"]
    pub fn expire_oldest(&self, turn: u32) -> Board {
        let mut next = *self;
        if turn < LIFESPAN {
            return next;
        }

        let oldest = turn - LIFESPAN;
        if let Some(cell) = next
            .cells
            .iter_mut()
            .find(|cell| cell.ordinal() == Some(oldest))
        {
            *cell = Cell::Empty;
        }
        next
    }

    /// Play move `turn` at `mv`: the oldest mark vanishes first, then the
    /// new mark is placed.
    ///
    /// This is the one transition shared by live play, the minimax search and
    /// the value-table lookahead.
    #[must_use = "advance returns a new board; the original is unchanged"]
    pub fn advance(&self, mv: Move, turn: u32) -> Result<Board, crate::Error> {
        self.expire_oldest(turn).place(mv, turn)
    }

    /// All empty cells in row-major order
    pub fn available_moves(&self) -> Vec<Move> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, cell)| cell.is_empty())
            .map(|(i, _)| Move::from_index(i))
            .collect()
    }

    /// Ordinal of a cell on a winning line, if any line is complete
    pub fn winner(&self) -> Option<u32> {
        LineAnalyzer::winning_ordinal(&self.cells)
    }

    /// The player owning a complete line, if any
    pub fn winner_player(&self) -> Option<Player> {
        self.winner().map(Player::from_turn)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                write!(f, "{}", self.cells[row * 3 + col].to_char())?;
                if col != 2 {
                    write!(f, "|")?;
                }
            }
            writeln!(f)?;
            if row != 2 {
                writeln!(f, "-+-+-")?;
            }
        }
        Ok(())
    }
}
