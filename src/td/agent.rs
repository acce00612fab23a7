//! TD(0) state-value agent
//!
//! The agent keeps a value for every board from its own side, plays
//! ε-greedily over the values of the boards its moves would produce, and
//! after each episode sweeps backward over every board it saw.

use rand::{Rng, rngs::StdRng, seq::IndexedRandom};

use super::{AgentConfig, value_table::ValueTable};
use crate::{
    Result,
    ports::Learner,
    tictactoe::{BoardState, Environment, Player},
};

/// Tabular TD(0) agent for one symbol
#[derive(Debug, Clone)]
pub struct TdAgent {
    symbol: Player,
    config: AgentConfig,
    values: ValueTable,
    trajectory: Vec<BoardState>,
    /// Completed-episode counter `t`, starting at 1
    episodes: u64,
    name: String,
}

impl TdAgent {
    /// Create an agent with a freshly seeded value table
    ///
    /// # Arguments
    ///
    /// * `symbol` - Mark this agent places
    /// * `exploration_rate` - ε, within [0, 1]
    /// * `learning_rate` - α, within (0, 1]
    pub fn new(symbol: Player, exploration_rate: f64, learning_rate: f64) -> Result<Self> {
        Self::from_config(symbol, AgentConfig::new(exploration_rate, learning_rate))
    }

    pub fn from_config(symbol: Player, config: AgentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            symbol,
            config,
            values: ValueTable::new(symbol),
            trajectory: Vec::new(),
            episodes: 1,
            name: format!("TD(0)-{symbol}"),
        })
    }

    pub(crate) fn from_parts(
        config: AgentConfig,
        values: ValueTable,
        episodes: u64,
    ) -> Result<Self> {
        config.validate()?;
        let symbol = values.owner();
        Ok(Self {
            symbol,
            config,
            values,
            trajectory: Vec::new(),
            episodes: episodes.max(1),
            name: format!("TD(0)-{symbol}"),
        })
    }

    pub fn symbol(&self) -> Player {
        self.symbol
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Change ε, e.g. to play greedily after training.
    pub fn set_exploration_rate(&mut self, exploration_rate: f64) -> Result<()> {
        let config = AgentConfig {
            exploration_rate,
            ..self.config
        };
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn values(&self) -> &ValueTable {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut ValueTable {
        &mut self.values
    }

    /// Boards observed so far in the current episode
    pub fn trajectory(&self) -> &[BoardState] {
        &self.trajectory
    }

    /// Episode counter `t`; 1 before the first update
    pub fn episodes(&self) -> u64 {
        self.episodes
    }

    /// Exploration probability for the next move
    pub fn effective_exploration_rate(&self) -> f64 {
        if self.config.decay {
            self.config.exploration_rate / ((self.episodes as f64).ln() + 1.0)
        } else {
            self.config.exploration_rate
        }
    }

    /// Value of the board each legal move would produce, in cell order.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MissingValueEntry`] if a successor board has no
    /// row in the table.
    pub fn evaluate_moves(&self, state: &BoardState) -> Result<Vec<(usize, f64)>> {
        state
            .empty_positions()
            .into_iter()
            .map(|cell| {
                let next = state.apply_move(cell, self.symbol)?;
                Ok((cell, self.values.get(&next)?))
            })
            .collect()
    }

    /// ε-greedy choice over successor values, exact ties broken uniformly.
    pub fn choose_move<R: Rng>(&self, state: &BoardState, rng: &mut R) -> Result<usize> {
        let scored = self.evaluate_moves(state)?;
        if scored.is_empty() {
            return Err(crate::Error::NoValidMoves);
        }

        if rng.random::<f64>() < self.effective_exploration_rate() {
            let (cell, _) = scored.choose(rng).ok_or(crate::Error::NoValidMoves)?;
            return Ok(*cell);
        }

        let best = scored
            .iter()
            .map(|&(_, value)| value)
            .fold(f64::NEG_INFINITY, f64::max);
        let maximizers: Vec<usize> = scored
            .iter()
            .filter(|&&(_, value)| value == best)
            .map(|&(cell, _)| cell)
            .collect();

        maximizers
            .choose(rng)
            .copied()
            .ok_or(crate::Error::NoValidMoves)
    }

    /// Choose a move on the environment's board and apply it there.
    ///
    /// Returns the chosen cell.
    pub fn select_action<R: Rng>(
        &mut self,
        env: &mut Environment,
        rng: &mut R,
    ) -> Result<usize> {
        let cell = self.choose_move(env.state(), rng)?;
        env.apply_move(self.symbol, cell)?;
        Ok(cell)
    }

    /// Append a post-move board to this episode's trajectory
    pub fn record_observed_state(&mut self, state: BoardState) {
        self.trajectory.push(state);
    }

    /// Backward TD(0) sweep over the recorded trajectory.
    ///
    /// The trajectory is cleared and `t` advances even when the sweep fails.
    pub fn update(&mut self) -> Result<()> {
        let trajectory = std::mem::take(&mut self.trajectory);
        let result = self.values.backup(&trajectory, self.config.learning_rate);
        self.episodes += 1;
        result
    }
}

impl Learner for TdAgent {
    fn symbol(&self) -> Player {
        self.symbol
    }

    fn select_move(&mut self, state: &BoardState, rng: &mut StdRng) -> Result<usize> {
        self.choose_move(state, rng)
    }

    fn observe(&mut self, state: &BoardState) {
        self.record_observed_state(*state);
    }

    fn learn(&mut self) -> Result<()> {
        self.update()
    }

    fn discard_episode(&mut self) {
        self.trajectory.clear();
    }

    fn name(&self) -> &str {
        &self.name
    }
}
