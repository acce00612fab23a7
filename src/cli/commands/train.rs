//! Train command - Self-play training of two TD(0) agents

use std::{
    cell::RefCell,
    fs::File,
    path::{Path, PathBuf},
    rc::Rc,
};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    cli::{
        config::load_training_config,
        output::{format_number, format_percent, print_kv, print_section, print_subsection},
    },
    pipeline::{MetricsObserver, ProgressObserver, TrainingConfig, TrainingResult, TrainingSession},
    td::{SavedAgent, TdAgent},
    tictactoe::{BoardState, Player},
};

#[derive(Debug, Serialize)]
struct TrainingSummaryFile {
    training: TrainingResult,
    average_moves: f64,
    draw_rate_history: Vec<f64>,
    config: TrainingConfig,
}

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Trailing separator or no file name means a directory target
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

#[derive(Parser, Debug, Default)]
#[command(about = "Train two TD(0) agents by self-play")]
pub struct TrainArgs {
    /// Number of self-play episodes (overrides the config file)
    #[arg(long, short = 'e')]
    pub episodes: Option<usize>,

    /// JSON training configuration
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Random seed for reproducibility (overrides the config file)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Exploration rate ε for both agents
    #[arg(long)]
    pub exploration_rate: Option<f64>,

    /// Learning rate α for both agents
    #[arg(long)]
    pub learning_rate: Option<f64>,

    /// Decay ε as ε / (ln t + 1) for both agents
    #[arg(long)]
    pub decay: bool,

    /// Directory for agent_x.msgpack and agent_o.msgpack snapshots
    #[arg(long, short = 'O')]
    pub output_dir: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// Merge command-line overrides into the (file or default) configuration
pub fn resolve_config(args: &TrainArgs) -> Result<TrainingConfig> {
    let mut config = load_training_config(args.config.as_deref())?;

    if let Some(episodes) = args.episodes {
        config.episodes = episodes;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    for agent in [&mut config.agent_x, &mut config.agent_o] {
        if let Some(rate) = args.exploration_rate {
            agent.exploration_rate = rate;
        }
        if let Some(rate) = args.learning_rate {
            agent.learning_rate = rate;
        }
        if args.decay {
            agent.decay = true;
        }
    }

    config.validate().context("Invalid training options")?;
    Ok(config)
}

/// Write both agents to `dir` as `agent_x.msgpack` and `agent_o.msgpack`
pub fn save_agents(dir: &Path, agent_x: &TdAgent, agent_o: &TdAgent) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    for agent in [agent_x, agent_o] {
        let path = dir.join(snapshot_file_name(agent.symbol()));
        SavedAgent::from_agent(agent).save_to_file(&path)?;
        println!("Saved {} agent to {}", agent.symbol(), path.display());
    }
    Ok(())
}

/// File name used for a symbol's snapshot inside an output directory
pub fn snapshot_file_name(symbol: Player) -> &'static str {
    match symbol {
        Player::X => "agent_x.msgpack",
        Player::O => "agent_o.msgpack",
    }
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = resolve_config(&args)?;

    let summary_target = args.summary.as_ref().map(|raw| {
        let sanitized = sanitize_summary_path(raw);
        let normalized = sanitized != *raw;
        (sanitized, normalized)
    });

    print_section("TD(0) Self-Play Training");
    print_kv("Episodes", &format_number(config.episodes));
    print_kv(
        "Seed",
        &config
            .seed
            .map_or_else(|| "entropy".to_string(), |seed| seed.to_string()),
    );
    for (symbol, agent) in [(Player::X, &config.agent_x), (Player::O, &config.agent_o)] {
        print_kv(
            &format!("Agent {symbol}"),
            &format!(
                "ε={} α={}{}",
                agent.exploration_rate,
                agent.learning_rate,
                if agent.decay { " (decaying)" } else { "" }
            ),
        );
    }

    let metrics = Rc::new(RefCell::new(
        MetricsObserver::new().with_window(config.log_interval),
    ));
    let mut session = TrainingSession::new(config.clone())?
        .with_observer(Box::new(Rc::clone(&metrics)));
    if !args.no_progress {
        session = session.with_observer(Box::new(ProgressObserver::new()));
    }

    let result = session.run()?;

    print_subsection("Results");
    print_kv("X wins", &format!("{} ({})", result.x_wins, format_percent(result.x_win_rate)));
    print_kv("O wins", &format!("{} ({})", result.o_wins, format_percent(result.o_win_rate)));
    print_kv("Draws", &format!("{} ({})", result.draws, format_percent(result.draw_rate)));
    print_kv("Average moves", &format!("{:.2}", metrics.borrow().average_moves()));

    print_subsection("X opening move values");
    let empty = BoardState::new();
    let mut openings = session.agent(Player::X).evaluate_moves(&empty)?;
    openings.sort_by(|a, b| b.1.total_cmp(&a.1));
    for (cell, value) in openings {
        print_kv(&format!("cell {cell}"), &format!("{value:.4}"));
    }

    let (agent_x, agent_o) = session.into_agents();
    if let Some(dir) = &args.output_dir {
        println!();
        save_agents(dir, &agent_x, &agent_o)?;
    }

    if let Some((summary_path, normalized)) = summary_target {
        if normalized {
            println!("\nNormalizing summary path to {}", summary_path.display());
        }

        if let Some(parent) = summary_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create summary directory: {}", parent.display())
            })?;
        }

        let metrics = metrics.borrow();
        let summary = TrainingSummaryFile {
            training: result,
            average_moves: metrics.average_moves(),
            draw_rate_history: metrics.draw_rate_history().to_vec(),
            config,
        };

        let file = File::create(&summary_path)
            .with_context(|| format!("Failed to create file: {}", summary_path.display()))?;
        to_writer_pretty(file, &summary)?;
        println!("\nSummary written to {}", summary_path.display());
    }

    Ok(())
}
