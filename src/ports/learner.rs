//! Learner port - abstraction over anything that can take a turn
//!
//! Both the TD agent and the human input channel implement this trait, so
//! the same episode driver serves self-play training and interactive games.

use rand::rngs::StdRng;

use crate::{
    Result,
    tictactoe::{BoardState, Player},
};

/// A participant in an episode
///
/// # Event Sequence
///
/// For every episode the driver calls:
/// 1. `select_move` whenever it is this participant's turn
/// 2. `observe` after every move by either side, with the resulting board
/// 3. `learn` once the board is terminal, or `discard_episode` if the
///    episode fails before that
///
/// # Examples
///
/// ```no_run
/// use rand::rngs::StdRng;
/// use tdzero::{ports::Learner, tictactoe::{BoardState, Player}};
///
/// struct FirstFree;
///
/// impl Learner for FirstFree {
///     fn symbol(&self) -> Player {
///         Player::O
///     }
///
///     fn select_move(&mut self, state: &BoardState, _rng: &mut StdRng) -> tdzero::Result<usize> {
///         state
///             .empty_positions()
///             .first()
///             .copied()
///             .ok_or(tdzero::Error::NoValidMoves)
///     }
///
///     fn name(&self) -> &str {
///         "first-free"
///     }
/// }
/// ```
pub trait Learner {
    /// Mark this participant places
    fn symbol(&self) -> Player;

    /// Select an empty cell (0-8) on `state`.
    ///
    /// # Errors
    ///
    /// Returns an error if no valid moves are available or the participant
    /// cannot produce one (e.g. a closed input channel).
    fn select_move(&mut self, state: &BoardState, rng: &mut StdRng) -> Result<usize>;

    /// Record the board that resulted from a move by either side.
    ///
    /// # Default Implementation
    ///
    /// Does nothing, suitable for participants that do not learn.
    fn observe(&mut self, _state: &BoardState) {}

    /// Update after the episode reached a terminal board.
    ///
    /// # Default Implementation
    ///
    /// Does nothing and returns `Ok(())`.
    fn learn(&mut self) -> Result<()> {
        Ok(())
    }

    /// Forget what was recorded for an episode that ended in an error.
    ///
    /// # Default Implementation
    ///
    /// Does nothing, suitable for participants that keep no episode state.
    fn discard_episode(&mut self) {}

    /// Used for identification in logs and summaries.
    fn name(&self) -> &str;
}
