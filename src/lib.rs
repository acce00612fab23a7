//! TD(0) self-play learning for tic-tac-toe
//!
//! This crate provides:
//! - Tic-Tac-Toe board model, terminal checks and the full base-3 state space
//! - Tabular TD(0) agents with ε-greedy play and backward value sweeps
//! - An episode driver and self-play training sessions with observers
//! - A human participant reading moves from any line-based input
//! - MessagePack agent snapshots and a `tdzero` CLI

pub mod adapters;
pub mod cli;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod td;
pub mod tictactoe;

pub use error::{Error, Result};
pub use pipeline::{TrainingConfig, TrainingResult, TrainingSession};
pub use td::{AgentConfig, TdAgent};
