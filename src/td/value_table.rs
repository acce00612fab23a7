//! State-value table for TD(0) learning

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    tictactoe::{BoardState, Player, STATE_COUNT, StateSpace},
};

/// Value of a board the owner has won
pub const WIN_VALUE: f64 = 1.0;
/// Value of a board the owner has lost
pub const LOSS_VALUE: f64 = -1.0;
/// Value of a drawn board
pub const DRAW_VALUE: f64 = 0.0;
/// Optimistic prior for every non-terminal board
pub const UNDECIDED_VALUE: f64 = 0.5;

/// A single serialized table row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueEntry {
    /// 9-character board encoding
    pub state: String,
    pub value: f64,
}

/// Value table mapping every board to an expected outcome in [-1, 1], seen
/// from the owning player's side.
#[derive(Debug, Clone)]
pub struct ValueTable {
    owner: Player,
    values: HashMap<BoardState, f64>,
}

impl ValueTable {
    /// Seed a table for `owner` from the full state space.
    pub fn new(owner: Player) -> Self {
        let values = StateSpace::enumerate_all()
            .map(|state| (state, Self::initial_value(&state, owner)))
            .collect();
        Self { owner, values }
    }

    /// Starting value of `state` for `owner`. Win is checked before loss, so
    /// boards where both players own a line count as wins.
    pub fn initial_value(state: &BoardState, owner: Player) -> f64 {
        if state.is_win(owner) {
            WIN_VALUE
        } else if state.is_loss(owner) {
            LOSS_VALUE
        } else if state.is_draw() {
            DRAW_VALUE
        } else {
            UNDECIDED_VALUE
        }
    }

    pub fn owner(&self) -> Player {
        self.owner
    }

    /// Look up the value of `state`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MissingValueEntry`] if the board has no row,
    /// which only happens when a table was built from incomplete entries.
    pub fn get(&self, state: &BoardState) -> Result<f64> {
        self.values
            .get(state)
            .copied()
            .ok_or_else(|| crate::Error::MissingValueEntry {
                state: state.encode(),
            })
    }

    /// Overwrite the value of `state`
    pub fn set(&mut self, state: BoardState, value: f64) {
        self.values.insert(state, value);
    }

    /// Single backward TD(0) sweep over an episode.
    ///
    /// The last state anchors the sweep. Each earlier state moves toward its
    /// successor's value, using the successor's value as already updated in
    /// this pass:
    ///
    /// V(s_i) ← V(s_i) + α[V(s_{i+1}) - V(s_i)]
    ///
    /// Trajectories with fewer than two states leave the table unchanged.
    pub fn backup(&mut self, trajectory: &[BoardState], learning_rate: f64) -> Result<()> {
        let Some((last, earlier)) = trajectory.split_last() else {
            return Ok(());
        };

        let mut next_value = self.get(last)?;
        for state in earlier.iter().rev() {
            let current = self.get(state)?;
            let updated = current + learning_rate * (next_value - current);
            self.set(*state, updated);
            next_value = updated;
        }
        Ok(())
    }

    /// Rows in base-3 index order
    pub fn entries(&self) -> Vec<ValueEntry> {
        let mut rows: Vec<(&BoardState, &f64)> = self.values.iter().collect();
        rows.sort_by_key(|(state, _)| state.index());
        rows.into_iter()
            .map(|(state, &value)| ValueEntry {
                state: state.encode(),
                value,
            })
            .collect()
    }

    /// Rebuild a table from serialized rows.
    ///
    /// # Errors
    ///
    /// Fails if a row does not parse or the rows do not cover the whole
    /// state space.
    pub fn from_entries(owner: Player, entries: &[ValueEntry]) -> Result<Self> {
        let mut values = HashMap::with_capacity(entries.len());
        for entry in entries {
            values.insert(BoardState::from_string(&entry.state)?, entry.value);
        }

        if values.len() != STATE_COUNT {
            return Err(crate::Error::InvalidConfiguration {
                message: format!(
                    "value table has {} distinct states, expected {STATE_COUNT}",
                    values.len()
                ),
            });
        }

        Ok(Self { owner, values })
    }

    /// Get total number of values stored
    pub fn size(&self) -> usize {
        self.values.len()
    }
}
