//! Serialization support for trained TD agents.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use super::{
    AgentConfig, TdAgent,
    value_table::{ValueEntry, ValueTable},
};
use crate::tictactoe::Player;

/// Snapshot of a trained agent, stored as MessagePack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedAgent {
    pub version: u32,
    pub symbol: Player,
    pub config: AgentConfig,
    pub episodes: u64,
    values: Vec<ValueEntry>,
}

impl SavedAgent {
    pub const VERSION: u32 = 1;

    pub fn from_agent(agent: &TdAgent) -> Self {
        Self {
            version: Self::VERSION,
            symbol: agent.symbol(),
            config: *agent.config(),
            episodes: agent.episodes(),
            values: agent.values().entries(),
        }
    }

    pub fn to_agent(&self) -> Result<TdAgent> {
        if self.version != Self::VERSION {
            return Err(anyhow!(
                "Unsupported agent save format version: {}. Expected {}",
                self.version,
                Self::VERSION
            ));
        }

        let values = ValueTable::from_entries(self.symbol, &self.values)
            .context("Saved value table is incomplete")?;
        Ok(TdAgent::from_parts(self.config, values, self.episodes)?)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())
            .with_context(|| format!("Failed to create file: {}", path.as_ref().display()))?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, self).context("Failed to serialize TD agent")?;

        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())
            .with_context(|| format!("Failed to open file: {}", path.as_ref().display()))?;
        let reader = BufReader::new(file);

        rmp_serde::decode::from_read(reader).context("Failed to deserialize TD agent")
    }
}
