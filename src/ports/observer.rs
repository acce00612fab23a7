//! Observer port - abstraction for training observation and data collection
//!
//! Observers can be composed to collect different kinds of data during
//! training without coupling the session to any output format.

use crate::{
    Result,
    tictactoe::{BoardState, GameOutcome, Move},
};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - once per `run_episodes` call
/// 2. For each episode:
///    - `on_episode_start(episode)`
///    - `on_move(...)` for each move
///    - `on_episode_end(episode, outcome, moves)`
/// 3. `on_training_end()`
///
/// All methods default to no-ops.
pub trait Observer {
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        Ok(())
    }

    /// Called after a move has been applied.
    ///
    /// # Parameters
    ///
    /// * `episode` - Index of the current episode (0-based)
    /// * `step` - Step number within the episode (0-based)
    /// * `mv` - The move just made
    /// * `state` - Board after the move
    fn on_move(
        &mut self,
        _episode: usize,
        _step: usize,
        _mv: Move,
        _state: &BoardState,
    ) -> Result<()> {
        Ok(())
    }

    /// Called once the episode is over, before the board is reset.
    fn on_episode_end(
        &mut self,
        _episode: usize,
        _outcome: GameOutcome,
        _moves: usize,
    ) -> Result<()> {
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }

    /// Whether this observer draws to the terminal while training runs.
    /// Sessions demote their periodic progress logs to `debug` when any
    /// observer does.
    fn draws_progress(&self) -> bool {
        false
    }
}
