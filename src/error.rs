//! Error types for the vanishing crate

use thiserror::Error;

/// Main error type for the vanishing crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("cell ({row}, {col}) is already occupied; cannot place mark {turn}")]
    CellOccupied { row: usize, col: usize, turn: u32 },

    #[error("invalid move: ({row}, {col}) is outside the 3x3 board")]
    InvalidMove { row: usize, col: usize },

    #[error("no valid moves available at turn {turn}")]
    NoValidMoves { turn: u32 },

    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
