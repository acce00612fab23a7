//! Shared board for a single episode

use super::{BoardState, GameOutcome, Move, Player};

/// Owns the board both players act on during an episode.
///
/// The board is only ever written through [`Environment::apply_move`], which
/// validates the target cell first and leaves the state untouched on error.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    state: BoardState,
    history: Vec<Move>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current shared board
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// Moves applied since the last reset, in order
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Write `player`'s mark into `cell` and return the resulting board.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::InvalidPosition`] if `cell > 8`
    /// - [`crate::Error::IllegalMove`] if the cell is already occupied
    /// - [`crate::Error::GameOver`] if the episode has already finished
    pub fn apply_move(&mut self, player: Player, cell: usize) -> crate::Result<BoardState> {
        if self.state.is_game_over() {
            return Err(crate::Error::GameOver);
        }

        self.state = self.state.apply_move(cell, player)?;
        self.history.push(Move {
            position: cell,
            player,
        });
        Ok(self.state)
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Final outcome once the game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        GameOutcome::from_state(&self.state)
    }

    /// Clear the board for the next episode
    pub fn reset(&mut self) {
        self.state = BoardState::new();
        self.history.clear();
    }
}
