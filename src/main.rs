use std::time::Duration;

use clap::Parser;
use negamax_chess::{
    config::{self, get_config},
    perft::perft,
    position::{FenError, Position},
    search::search_with_time_manager,
    time::TimeManager,
};
use thiserror::Error;

#[derive(Error, Debug)]
enum EngineError {
    #[error("Error during the perft command: {0}")]
    PerftError(#[from] negamax_chess::perft::PerftError),

    #[error("Invalid FEN: {0:?}")]
    FenError(#[from] FenError),

    #[error("Error while loading the configuration: {0}")]
    ConfigError(#[from] config::ConfigError),
}

mod arguments {
    use std::path::PathBuf;

    use clap::{Parser, Subcommand};

    /// A negamax chess engine written by Mathieu Pagé
    #[derive(Parser)]
    #[command(
        name = "negamax-chess",
        author = "Mathieu Pagé",
        version = "0.1.0",
        about = "A negamax chess engine written by Mathieu Pagé"
    )]
    pub struct EngineArgs {
        /// Configuration file (TOML, JSON or YAML)
        #[arg(short, long, global = true)]
        pub config: Option<PathBuf>,

        #[command(subcommand)]
        pub command: Commands,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Commands {
        /// Search a position and print the best line
        Search {
            /// FEN string representing the position to search
            #[arg(short, long, default_value = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")]
            fen: String,

            /// Time given to the search, in milliseconds
            #[arg(short, long)]
            move_time: Option<u64>,
        },

        /// Calculate the perft of a position
        Perft {
            /// The depth to calculate the perft
            #[arg(short, long)]
            depth: u16,

            /// FEN string representing the position to calculate the perft
            #[arg(short, long, default_value = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")]
            fen: String,
        },
    }
}

fn run() -> Result<(), EngineError> {
    // Parse command line arguments
    let args = arguments::EngineArgs::parse();

    let log_filter = env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "warn");
    env_logger::Builder::from_env(log_filter).init();

    if let Some(path) = args.config {
        config::initialize(path)?;
    }
    let config = get_config();

    // Run the command
    match args.command {
        arguments::Commands::Search { fen, move_time } => {
            let position = Position::new_from_fen(&fen)?;
            let move_time = Duration::from_millis(move_time.unwrap_or(config.move_time_ms));

            let pv = search_with_time_manager(&position, TimeManager::from_move_time(move_time));

            println!("{}\n", position.to_compact_string());
            match pv.best_move() {
                Some(best_move) => println!("bestmove {}", best_move),
                None => println!("bestmove (none)"),
            }
            println!("pv {}", pv);
            println!("score {}{}", pv.score(), if pv.is_mate() { " (mate found)" } else { "" });
        }
        arguments::Commands::Perft { depth, fen } => {
            perft(&fen, depth)?;
        }
    }

    Ok(())
}

/// Main entry point for the negamax-chess engine.
fn main() {
    if let Err(e) = run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
