//! Configuration file loading for CLI commands

use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};

use crate::pipeline::TrainingConfig;

/// Load a training configuration from JSON, or the defaults when no path is
/// given. Missing fields fall back to their defaults.
///
/// ```json
/// {
///   "episodes": 20000,
///   "seed": 7,
///   "agent_x": { "exploration_rate": 0.2, "learning_rate": 0.4, "decay": true },
///   "agent_o": { "exploration_rate": 0.1 }
/// }
/// ```
pub fn load_training_config(path: Option<&Path>) -> Result<TrainingConfig> {
    let Some(path) = path else {
        return Ok(TrainingConfig::default());
    };

    let file = File::open(path)
        .with_context(|| format!("Failed to open config file: {}", path.display()))?;
    let config: TrainingConfig = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;
    Ok(config)
}
