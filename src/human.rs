//! Console player that reads its moves from a text stream

use std::io::{BufRead, StdinLock, Stdout, Write};

use crate::{
    Error, Result,
    ports::Agent,
    tictactoe::{Board, Move},
};

/// Human player prompting for 1-based row and column numbers
///
/// Out-of-range numbers and unparsable lines re-prompt for the same
/// coordinate; an occupied cell restarts from the row.
pub struct HumanAgent<R, W> {
    input: R,
    output: W,
    name: String,
}

impl HumanAgent<StdinLock<'static>, Stdout> {
    /// Human reading from stdin and prompting on stdout
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> HumanAgent<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            name: "Human".to_string(),
        }
    }

    /// Consume the agent and return its output sink
    pub fn into_output(self) -> W {
        self.output
    }

    fn write_line(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}")
            .and_then(|_| self.output.flush())
            .map_err(|source| Error::Io {
                operation: "write prompt".to_string(),
                source,
            })
    }

    /// Prompt until a number in 1..=3 is entered; returns it 0-based
    fn read_coordinate(&mut self, label: &str) -> Result<usize> {
        loop {
            self.write_line(&format!("please choose {label} 1-3: "))?;

            let mut line = String::new();
            let read = self.input.read_line(&mut line).map_err(|source| Error::Io {
                operation: "read move".to_string(),
                source,
            })?;
            if read == 0 {
                return Err(Error::InvalidInput {
                    message: "input closed before a move was entered".to_string(),
                });
            }

            match line.trim().parse::<usize>() {
                Ok(value) if (1..=3).contains(&value) => return Ok(value - 1),
                _ => tracing::debug!(input = line.trim(), "rejected {label} input"),
            }
        }
    }
}

impl<R: BufRead, W: Write> Agent for HumanAgent<R, W> {
    fn choose_move(&mut self, board: &Board, _turn: u32) -> Result<Move> {
        loop {
            let row = self.read_coordinate("row")?;
            let col = self.read_coordinate("col")?;
            let mv = Move::new(row, col)?;
            if board.is_empty(mv) {
                return Ok(mv);
            }
            self.write_line("this spot is taken, try again")?;
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
