//! Winning line analysis

use super::{Cell, Player};

/// Winning line indices on the 3x3 board
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Utility for analyzing winning lines
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Find the first complete line and return the ordinal of its first cell
    ///
    /// A line is complete when all three cells hold marks of the same parity.
    pub fn winning_ordinal(cells: &[Cell; 9]) -> Option<u32> {
        WINNING_LINES
            .iter()
            .find_map(|line| Self::line_ordinal(cells, line))
    }

    /// Check if a player owns a complete line
    pub fn has_won(cells: &[Cell; 9], player: Player) -> bool {
        WINNING_LINES.iter().any(|line| {
            Self::line_ordinal(cells, line).map(Player::from_turn) == Some(player)
        })
    }

    fn line_ordinal(cells: &[Cell; 9], line: &[usize; 3]) -> Option<u32> {
        let first = cells[line[0]].ordinal()?;
        let parity = first % 2;
        line[1..]
            .iter()
            .all(|&idx| cells[idx].ordinal().is_some_and(|o| o % 2 == parity))
            .then_some(first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_won_horizontal() {
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::PlacedAt(0);
        cells[1] = Cell::PlacedAt(2);
        cells[2] = Cell::PlacedAt(4);

        assert!(LineAnalyzer::has_won(&cells, Player::X));
        assert!(!LineAnalyzer::has_won(&cells, Player::O));
    }

    #[test]
    fn test_has_won_vertical() {
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::PlacedAt(1);
        cells[3] = Cell::PlacedAt(7);
        cells[6] = Cell::PlacedAt(5);

        assert!(LineAnalyzer::has_won(&cells, Player::O));
        assert_eq!(LineAnalyzer::winning_ordinal(&cells), Some(1));
    }

    #[test]
    fn test_has_won_anti_diagonal() {
        let mut cells = [Cell::Empty; 9];
        cells[2] = Cell::PlacedAt(6);
        cells[4] = Cell::PlacedAt(8);
        cells[6] = Cell::PlacedAt(10);

        assert_eq!(LineAnalyzer::winning_ordinal(&cells), Some(6));
    }

    #[test]
    fn test_gap_in_line_is_not_a_win() {
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::PlacedAt(0);
        cells[8] = Cell::PlacedAt(4);

        assert_eq!(LineAnalyzer::winning_ordinal(&cells), None);
    }
}
