//! Inspect command - Show what a saved agent has learned about a board

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    adapters::render_with_indices,
    cli::output::{print_kv, print_section, print_subsection},
    td::{SavedAgent, TdAgent},
    tictactoe::BoardState,
};

#[derive(Parser, Debug)]
#[command(about = "Show learned values around a board")]
pub struct InspectArgs {
    /// Agent snapshot (MessagePack)
    pub agent: PathBuf,

    /// Board as nine characters, row by row (`-` or `.` for empty)
    #[arg(long, short = 'b', default_value = "---------")]
    pub board: String,
}

/// One legal move of the agent and the value of the board it leads to
#[derive(Debug, Clone, PartialEq)]
pub struct MoveValue {
    pub cell: usize,
    pub successor: BoardState,
    pub value: f64,
}

/// Successor values for every legal move on `board`, best first.
///
/// Equal values keep cell order.
pub fn successor_values(agent: &TdAgent, board: &BoardState) -> Result<Vec<MoveValue>> {
    let mut values = board
        .legal_moves()
        .into_iter()
        .map(|cell| {
            let successor = board.apply_move(cell, agent.symbol())?;
            let value = agent.values().get(&successor)?;
            Ok(MoveValue {
                cell,
                successor,
                value,
            })
        })
        .collect::<crate::Result<Vec<_>>>()?;
    values.sort_by(|a, b| b.value.total_cmp(&a.value));
    Ok(values)
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let agent = SavedAgent::load_from_file(&args.agent)?.to_agent()?;
    let board = BoardState::from_string(&args.board)
        .with_context(|| format!("Invalid board '{}'", args.board))?;

    print_section(&format!("TD(0) agent playing {}", agent.symbol()));
    print_kv("Episodes trained", &agent.episodes().saturating_sub(1).to_string());
    print_kv("Exploration rate", &agent.config().exploration_rate.to_string());
    print_kv("Learning rate", &agent.config().learning_rate.to_string());

    println!("\n{}\n", render_with_indices(&board));
    print_kv("Board value", &format!("{:.4}", agent.values().get(&board)?));

    let moves = successor_values(&agent, &board)?;
    if moves.is_empty() {
        println!("\nNo legal moves: the game is over.");
        return Ok(());
    }

    print_subsection(&format!("Moves for {}", agent.symbol()));
    for mv in moves {
        print_kv(
            &format!("cell {}", mv.cell),
            &format!("{:.4}  ({})", mv.value, mv.successor.encode()),
        );
    }
    Ok(())
}
