//! Play command - A human against a computer player

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::{AgentKind, App},
    cli::{
        commands::{AgentArgs, PlayerArg},
        output::{print_kv, print_section},
    },
    human::HumanAgent,
    pipeline::{BoardPrinter, DEFAULT_MAX_TURNS, TrainingConfig, TrainingPipeline, save_learners},
    ports::Agent,
    tictactoe::Player,
};

#[derive(Parser, Debug)]
#[command(about = "Play against the computer")]
pub struct PlayArgs {
    /// Computer opponent
    #[arg(value_enum, default_value = "minimax")]
    pub opponent: AgentKind,

    /// Token the human plays; X always moves first
    #[arg(long, value_enum, default_value = "o")]
    pub human: PlayerArg,

    /// Number of games to play
    #[arg(long, short = 'n', default_value_t = 1)]
    pub games: usize,

    /// Moves after which a game is stopped without a winner
    #[arg(long, default_value_t = DEFAULT_MAX_TURNS)]
    pub max_turns: u32,

    #[command(flatten)]
    pub agent: AgentArgs,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let human_player = Player::from(args.human);
    let app = App::new();
    let agent_config = args.agent.to_config();
    let mut computer = app.create_agent(args.opponent, human_player.opponent(), &agent_config);
    let mut human = HumanAgent::stdio();

    print_section("Vanishing tic-tac-toe");
    print_kv("You play", &human_player.to_string());
    print_kv("Computer", computer.name());
    println!("\nEach mark vanishes six moves after it was placed.");

    let config = TrainingConfig {
        num_games: args.games,
        max_turns: args.max_turns,
    };
    let mut pipeline =
        TrainingPipeline::new(config).with_observer(Box::new(BoardPrinter::stdout()));

    let result = match human_player {
        Player::X => pipeline.run(&mut human, computer.as_mut()),
        Player::O => pipeline.run(computer.as_mut(), &mut human),
    }
    .context("game aborted")?;

    if args.games > 1 {
        print_section("Results");
        print_kv("X wins", &result.x_wins.to_string());
        print_kv("O wins", &result.o_wins.to_string());
        print_kv("Stopped", &result.turn_limit_games.to_string());
    }

    // A learning opponent keeps what it picked up from these games
    let mut agents: [&mut dyn Agent; 1] = [computer.as_mut()];
    save_learners(&mut agents).context("saving value table")?;
    Ok(())
}
