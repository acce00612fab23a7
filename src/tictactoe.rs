//! Tic-Tac-Toe game implementation

pub mod board;
pub mod environment;
pub mod game;
pub mod lines;
pub mod state_space;

pub use board::{BoardState, Cell, Player};
pub use environment::Environment;
pub use game::{GameOutcome, Move};
pub use lines::{LineAnalyzer, WINNING_LINES};
pub use state_space::{STATE_COUNT, StateSpace};
