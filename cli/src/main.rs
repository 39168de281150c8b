mod config;
mod game_runner;

use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tictactoe_engine::tictactoe::{Board, BotType, Player};
use tictactoe_engine::{log, logger};

use config::{default_config_path, get_config_manager};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BotArg {
    Minimax,
    Random,
}

impl From<BotArg> for BotType {
    fn from(arg: BotArg) -> Self {
        match arg {
            BotArg::Minimax => BotType::Minimax,
            BotArg::Random => BotType::Random,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PlayerArg {
    X,
    O,
}

impl From<PlayerArg> for Player {
    fn from(arg: PlayerArg) -> Self {
        match arg {
            PlayerArg::X => Player::X,
            PlayerArg::O => Player::O,
        }
    }
}

#[derive(Parser)]
#[command(name = "tictactoe_cli", about = "Tic-Tac-Toe with a perfect-play engine")]
struct Args {
    /// Path to the YAML config file
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    use_log_prefix: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play against a bot in the terminal
    Play {
        #[arg(long, value_enum)]
        bot: Option<BotArg>,
        #[arg(long, value_enum)]
        human: Option<PlayerArg>,
    },
    /// Print the optimal move for a board such as "XO./.X./..O"
    BestMove { board: String },
    /// Let two bots play each other
    SelfPlay {
        #[arg(long, value_enum, default_value = "minimax")]
        x_bot: BotArg,
        #[arg(long, value_enum, default_value = "minimax")]
        o_bot: BotArg,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    let config = get_config_manager(&config_path).get_config()?;

    let prefix = config
        .log_prefix
        .clone()
        .or_else(|| args.use_log_prefix.then(|| "TicTacToe".to_string()));
    logger::init_logger(prefix);
    log!("Using config {}", config_path.display());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut rng = rand::rng();

    match args.command {
        Command::Play { bot, human } => {
            let bot_type = bot.map(BotType::from).unwrap_or(config.bot);
            let human = human.map(Player::from).unwrap_or(config.human_player);
            game_runner::run_human_game(
                io::stdin().lock(),
                &mut out,
                bot_type,
                human,
                &mut rng,
                config.show_search_stats,
            )?;
        }
        Command::BestMove { board } => {
            let board: Board = board.parse()?;
            game_runner::run_best_move(&board, &mut out)?;
        }
        Command::SelfPlay { x_bot, o_bot } => {
            game_runner::run_self_play(
                &mut out,
                x_bot.into(),
                o_bot.into(),
                &mut rng,
                config.show_search_stats,
            )?;
        }
    }

    Ok(())
}
