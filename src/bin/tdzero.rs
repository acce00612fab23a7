//! tdzero CLI - TD(0) self-play learning for tic-tac-toe
//!
//! This CLI provides:
//! - Self-play training of an X and an O agent, with optional snapshots
//! - Interactive games against a trained agent
//! - Inspection of the values a saved agent has learned
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tdzero")]
#[command(version, about = "TD(0) self-play learning for tic-tac-toe", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train two agents against each other
    Train(tdzero::cli::commands::train::TrainArgs),

    /// Play against a trained agent
    Play(tdzero::cli::commands::play::PlayArgs),

    /// Show learned values around a board
    Inspect(tdzero::cli::commands::inspect::InspectArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => tdzero::cli::commands::train::execute(args),
        Commands::Play(args) => tdzero::cli::commands::play::execute(args),
        Commands::Inspect(args) => tdzero::cli::commands::inspect::execute(args),
    }
}
