//! Tabular TD(0) state-value learning
//!
//! Each agent owns a value table seeded from the full state space:
//!
//! | Board (owner's view) | Initial value |
//! |----------------------|---------------|
//! | Win                  | 1.0           |
//! | Loss                 | -1.0          |
//! | Draw                 | 0.0           |
//! | Anything else        | 0.5           |
//!
//! Moves are chosen ε-greedily over the values of the boards they produce.
//! When an episode ends the agent walks its trajectory backward once, nudging
//! each board toward the value of the board that followed it.
//!
//! ## Usage Example
//!
//! ```no_run
//! use rand::{SeedableRng, rngs::StdRng};
//! use tdzero::{td::TdAgent, tictactoe::{Environment, Player}};
//!
//! let mut agent = TdAgent::new(Player::X, 0.1, 0.5)?;
//! let mut env = Environment::new();
//! let mut rng = StdRng::seed_from_u64(7);
//!
//! agent.select_action(&mut env, &mut rng)?;
//! agent.record_observed_state(*env.state());
//! agent.update()?;
//! # Ok::<(), tdzero::Error>(())
//! ```

pub mod agent;
pub mod config;
pub mod serialization;
pub mod value_table;

// Public re-exports
pub use agent::TdAgent;
pub use config::AgentConfig;
pub use serialization::SavedAgent;
pub use value_table::{ValueEntry, ValueTable};
