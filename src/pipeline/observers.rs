//! Observers for training runs and interactive games
//!
//! Observers keep reporting out of the game loop: the progress bar is used by
//! long training runs, the board printer by games against a human.

use std::io::{Stdout, Write};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    Error, Result,
    ports::Observer,
    tictactoe::{Board, GameOutcome, GameState, Move, Player},
};

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    x_wins: usize,
    o_wins: usize,
    turn_limit: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            x_wins: 0,
            o_wins: 0,
            turn_limit: 0,
        }
    }

    fn tally(&self) -> String {
        format!("{} O:{} limit:{}", self.x_wins, self.o_wins, self.turn_limit)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games (X:{msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, outcome: GameOutcome, _turns: u32) -> Result<()> {
        match outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::TurnLimit => self.turn_limit += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64 + 1);
            pb.set_message(self.tally());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.tally());
        }
        Ok(())
    }
}

/// Prints the board after every move and announces the result
pub struct BoardPrinter<W> {
    out: W,
}

impl BoardPrinter<Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> BoardPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn print(&mut self, text: std::fmt::Arguments<'_>) -> Result<()> {
        self.out
            .write_fmt(text)
            .and_then(|_| self.out.flush())
            .map_err(|source| Error::Io {
                operation: "print board".to_string(),
                source,
            })
    }
}

impl<W: Write> Observer for BoardPrinter<W> {
    fn on_game_start(&mut self, _game_num: usize, initial: &Board) -> Result<()> {
        self.print(format_args!("{initial}\n"))
    }

    fn on_move(
        &mut self,
        _game_num: usize,
        before: &GameState,
        mv: Move,
        after: &Board,
    ) -> Result<()> {
        let player = before.to_move();
        self.print(format_args!(
            "turn {}: {player} plays {mv}\n{after}\n",
            before.turn + 1
        ))
    }

    fn on_game_end(&mut self, _game_num: usize, outcome: GameOutcome, turns: u32) -> Result<()> {
        match outcome {
            GameOutcome::Win(player) => {
                self.print(format_args!("{player} WON THE GAME AFTER {turns} TURNS\n"))
            }
            GameOutcome::TurnLimit => self.print(format_args!(
                "no winner after {turns} turns, stopping the game\n"
            )),
        }
    }
}
