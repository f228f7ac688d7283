//! Train command - Train the value-table learner against minimax

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    app::{AgentConfig, App},
    cli::{
        commands::AgentArgs,
        output::{format_average, format_number, print_kv, print_section},
    },
    pipeline::{
        DEFAULT_MAX_TURNS, ProgressObserver, TrainingConfig, TrainingPipeline, TrainingResult,
        save_learners,
    },
    ports::Agent,
    tictactoe::Player,
};

#[derive(Debug, Serialize)]
struct SummaryStats {
    #[serde(flatten)]
    totals: TrainingResult,
    avg_x_win_turns: Option<f64>,
    avg_o_win_turns: Option<f64>,
    avg_decided_turns: Option<f64>,
}

impl From<&TrainingResult> for SummaryStats {
    fn from(result: &TrainingResult) -> Self {
        Self {
            totals: result.clone(),
            avg_x_win_turns: result.avg_x_win_turns(),
            avg_o_win_turns: result.avg_o_win_turns(),
            avg_decided_turns: result.avg_decided_turns(),
        }
    }
}

#[derive(Debug, Serialize)]
struct TrainingSummaryFile {
    training: SummaryStats,
    metadata: SummaryMetadata,
}

#[derive(Debug, Serialize)]
struct SummaryMetadata {
    learner: String,
    opponent: String,
    max_turns: u32,
    agents: AgentConfig,
}

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Train the value-table learner (X) against minimax (O)")]
pub struct TrainArgs {
    /// Number of training games
    #[arg(long, short = 'g', default_value_t = 1000)]
    pub games: usize,

    /// Moves after which a game is stopped without a winner
    #[arg(long, default_value_t = DEFAULT_MAX_TURNS)]
    pub max_turns: u32,

    #[command(flatten)]
    pub agent: AgentArgs,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let summary_spec = args.summary.as_ref().map(|raw| {
        let sanitized = sanitize_summary_path(raw);
        let normalized = sanitized != *raw;
        (sanitized, normalized)
    });

    let agent_config = args.agent.to_config();
    let app = App::new();
    let mut learner = app.create_value_agent(Player::X, &agent_config);
    let mut opponent = app.create_minimax(Player::O, &agent_config);

    print_section("Training");
    print_kv("Learner", learner.name());
    print_kv("Opponent", opponent.name());
    print_kv("Games", &format_number(args.games));
    print_kv("Depth limit", &opponent.depth_limit().to_string());
    print_kv("Exploration", &learner.exploration_rate().to_string());
    print_kv("Known states", &format_number(learner.table().len()));

    let config = TrainingConfig {
        num_games: args.games,
        max_turns: args.max_turns,
    };
    let mut pipeline = TrainingPipeline::new(config);
    if !args.no_progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }

    let result = pipeline
        .run(&mut learner, &mut opponent)
        .context("training run failed")?;

    print_section("Results");
    println!(
        "X won {} times with avg turn {}",
        format_number(result.x_wins),
        format_average(result.avg_x_win_turns())
    );
    println!(
        "O won {} times with avg turn {}",
        format_number(result.o_wins),
        format_average(result.avg_o_win_turns())
    );
    println!(
        "{} games stopped after {} turns",
        format_number(result.turn_limit_games),
        args.max_turns
    );
    println!(
        "avg turns per decided game: {}",
        format_average(result.avg_decided_turns())
    );
    print_kv("Known states", &format_number(learner.table().len()));

    if let Some((summary_path, normalized)) = summary_spec {
        if normalized {
            println!("\nNormalizing summary path to {}", summary_path.display());
        }

        if let Some(parent) = summary_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        let summary = TrainingSummaryFile {
            training: SummaryStats::from(&result),
            metadata: SummaryMetadata {
                learner: learner.name().to_string(),
                opponent: opponent.name().to_string(),
                max_turns: args.max_turns,
                agents: agent_config.clone(),
            },
        };

        let file = File::create(&summary_path)
            .with_context(|| format!("creating {}", summary_path.display()))?;
        to_writer_pretty(file, &summary)?;
        println!("\nSummary written to {}", summary_path.display());
    }

    let mut agents: [&mut dyn Agent; 2] = [&mut learner, &mut opponent];
    save_learners(&mut agents).context("saving value table")?;
    Ok(())
}
