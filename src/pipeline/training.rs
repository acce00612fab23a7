//! Self-play training session

use std::path::Path;

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use super::episode::play_episode;
use crate::{
    Error, Result,
    ports::Observer,
    td::{AgentConfig, TdAgent},
    tictactoe::{Environment, GameOutcome, Player},
};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Number of self-play episodes
    pub episodes: usize,

    /// Random seed (None = seeded from OS entropy)
    pub seed: Option<u64>,

    /// Agent playing X
    pub agent_x: AgentConfig,

    /// Agent playing O
    pub agent_o: AgentConfig,

    /// Emit an info log line every this many episodes (0 disables)
    pub log_interval: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 10_000,
            seed: None,
            agent_x: AgentConfig::default(),
            agent_o: AgentConfig::default(),
            log_interval: 1_000,
        }
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<()> {
        self.agent_x.validate()?;
        self.agent_o.validate()
    }
}

/// Result of a training run, counted per symbol
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    pub total_episodes: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    pub x_win_rate: f64,
    pub o_win_rate: f64,
    pub draw_rate: f64,
}

impl TrainingResult {
    pub fn new(x_wins: usize, o_wins: usize, draws: usize) -> Self {
        let total_episodes = x_wins + o_wins + draws;
        let rate = |count: usize| {
            if total_episodes > 0 {
                count as f64 / total_episodes as f64
            } else {
                0.0
            }
        };

        Self {
            total_episodes,
            x_wins,
            o_wins,
            draws,
            x_win_rate: rate(x_wins),
            o_win_rate: rate(o_wins),
            draw_rate: rate(draws),
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Two TD agents, a shared board and a single random source.
///
/// The opening agent alternates between episodes: X opens every even
/// episode, O every odd one, counted across all `run_episodes` calls.
pub struct TrainingSession {
    config: TrainingConfig,
    agent_x: TdAgent,
    agent_o: TdAgent,
    env: Environment,
    rng: StdRng,
    observers: Vec<Box<dyn Observer>>,
    episodes_played: usize,
}

/// Seeded generator when a seed is given, otherwise one drawn from OS entropy
pub fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

impl TrainingSession {
    /// Create a session with two fresh agents
    pub fn new(config: TrainingConfig) -> Result<Self> {
        config.validate()?;
        let agent_x = TdAgent::from_config(Player::X, config.agent_x)?;
        let agent_o = TdAgent::from_config(Player::O, config.agent_o)?;
        Self::with_agents(config, agent_x, agent_o)
    }

    /// Create a session around existing (e.g. loaded) agents
    pub fn with_agents(config: TrainingConfig, agent_x: TdAgent, agent_o: TdAgent) -> Result<Self> {
        if agent_x.symbol() != Player::X || agent_o.symbol() != Player::O {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "session needs an X and an O agent, got {} and {}",
                    agent_x.symbol(),
                    agent_o.symbol()
                ),
            });
        }

        let rng = build_rng(config.seed);
        Ok(Self {
            config,
            agent_x,
            agent_o,
            env: Environment::new(),
            rng,
            observers: Vec::new(),
            episodes_played: 0,
        })
    }

    /// Add an observer to the session
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    pub fn agent(&self, symbol: Player) -> &TdAgent {
        match symbol {
            Player::X => &self.agent_x,
            Player::O => &self.agent_o,
        }
    }

    pub fn agent_mut(&mut self, symbol: Player) -> &mut TdAgent {
        match symbol {
            Player::X => &mut self.agent_x,
            Player::O => &mut self.agent_o,
        }
    }

    /// Hand both agents back, X first
    pub fn into_agents(self) -> (TdAgent, TdAgent) {
        (self.agent_x, self.agent_o)
    }

    /// Shared random source, e.g. for interactive games after training
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Total episodes completed by this session
    pub fn episodes_played(&self) -> usize {
        self.episodes_played
    }

    /// Which symbol opens the next episode
    pub fn next_opener(&self) -> Player {
        if self.episodes_played.is_multiple_of(2) {
            Player::X
        } else {
            Player::O
        }
    }

    /// Level of the periodic progress line: `debug` while an observer draws
    /// a progress bar, `info` otherwise.
    pub fn progress_log_level(&self) -> log::Level {
        if self.observers.iter().any(|o| o.draws_progress()) {
            log::Level::Debug
        } else {
            log::Level::Info
        }
    }

    /// Play the configured number of episodes
    pub fn run(&mut self) -> Result<TrainingResult> {
        self.run_episodes(self.config.episodes)
    }

    /// Play `n` self-play episodes, alternating the opener.
    pub fn run_episodes(&mut self, n: usize) -> Result<TrainingResult> {
        log::info!(
            "training {n} episodes (X: ε={} α={}, O: ε={} α={})",
            self.agent_x.config().exploration_rate,
            self.agent_x.config().learning_rate,
            self.agent_o.config().exploration_rate,
            self.agent_o.config().learning_rate,
        );

        for observer in &mut self.observers {
            observer.on_training_start(n)?;
        }

        let progress_level = self.progress_log_level();
        let (mut x_wins, mut o_wins, mut draws) = (0, 0, 0);
        for _ in 0..n {
            let episode = self.episodes_played;
            let opener = self.next_opener();
            let players: [&mut dyn crate::ports::Learner; 2] = match opener {
                Player::X => [&mut self.agent_x, &mut self.agent_o],
                Player::O => [&mut self.agent_o, &mut self.agent_x],
            };

            let record = play_episode(
                &mut self.env,
                players,
                &mut self.rng,
                episode,
                &mut self.observers,
            )?;
            self.episodes_played += 1;

            match record.outcome {
                GameOutcome::Win(Player::X) => x_wins += 1,
                GameOutcome::Win(Player::O) => o_wins += 1,
                GameOutcome::Draw => draws += 1,
            }

            if self.config.log_interval > 0
                && self.episodes_played.is_multiple_of(self.config.log_interval)
            {
                log::log!(
                    progress_level,
                    "{:<12}{:>10} X:{} O:{} D:{}",
                    "episodes",
                    self.episodes_played,
                    x_wins,
                    o_wins,
                    draws
                );
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        let result = TrainingResult::new(x_wins, o_wins, draws);
        log::info!(
            "training finished: X {:.1}% O {:.1}% draw {:.1}%",
            result.x_win_rate * 100.0,
            result.o_win_rate * 100.0,
            result.draw_rate * 100.0
        );
        Ok(result)
    }
}
