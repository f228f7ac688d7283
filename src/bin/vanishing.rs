//! Vanishing tic-tac-toe CLI
//!
//! - `train`: value-table learner (X) against minimax (O)
//! - `play`: a human against minimax or the learner

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "vanishing")]
#[command(
    version,
    about = "Tic-tac-toe where every mark vanishes after six moves",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the value-table learner against minimax
    Train(vanishing::cli::commands::train::TrainArgs),

    /// Play against minimax or the value-table learner
    Play(vanishing::cli::commands::play::PlayArgs),
}

fn main() -> Result<()> {
    // RUST_LOG overrides the default filter
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vanishing=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => vanishing::cli::commands::train::execute(args),
        Commands::Play(args) => vanishing::cli::commands::play::execute(args),
    }
}
