//! Configuration types for TD agent creation.

use serde::{Deserialize, Serialize};

/// Default probability of taking a random move
pub const DEFAULT_EXPLORATION_RATE: f64 = 0.1;
/// Default TD(0) step size
pub const DEFAULT_LEARNING_RATE: f64 = 0.5;

/// Configuration for creating a [`TdAgent`](super::TdAgent).
///
/// # Examples
///
/// ```
/// use tdzero::td::AgentConfig;
///
/// let config = AgentConfig::new(0.2, 0.4).with_decay(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Probability of exploring a uniformly random legal move, in [0, 1]
    pub exploration_rate: f64,
    /// Step size α of the backward sweep, in (0, 1]
    pub learning_rate: f64,
    /// Scale exploration by `1 / (ln(t) + 1)` where `t` counts completed
    /// episodes starting at 1
    pub decay: bool,
}

impl AgentConfig {
    pub fn new(exploration_rate: f64, learning_rate: f64) -> Self {
        Self {
            exploration_rate,
            learning_rate,
            decay: false,
        }
    }

    /// Enable or disable exploration decay.
    pub fn with_decay(mut self, decay: bool) -> Self {
        self.decay = decay;
        self
    }

    /// Check both rates are inside their ranges.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] naming the offending rate.
    pub fn validate(&self) -> crate::Result<()> {
        if !(0.0..=1.0).contains(&self.exploration_rate) {
            return Err(crate::Error::InvalidConfiguration {
                message: format!(
                    "exploration rate {} must be within [0, 1]",
                    self.exploration_rate
                ),
            });
        }
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(crate::Error::InvalidConfiguration {
                message: format!(
                    "learning rate {} must be within (0, 1]",
                    self.learning_rate
                ),
            });
        }
        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new(DEFAULT_EXPLORATION_RATE, DEFAULT_LEARNING_RATE)
    }
}
