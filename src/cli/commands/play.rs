//! Play command - Human vs. a trained TD(0) agent on the terminal

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use rand::rngs::StdRng;

use crate::{
    Error,
    adapters::{HumanPlayer, render_with_indices},
    cli::output::{print_kv, print_section},
    pipeline::{EpisodeRecord, TrainingConfig, TrainingSession, play_episode, training::build_rng},
    ports::Learner,
    td::{SavedAgent, TdAgent},
    tictactoe::{Environment, GameOutcome, Player},
};

#[derive(Parser, Debug)]
#[command(about = "Play against a TD(0) agent")]
pub struct PlayArgs {
    /// Symbol the human plays (`x` or `o`)
    #[arg(long, default_value = "o")]
    pub human: String,

    /// Load the agent from a snapshot instead of training one
    #[arg(long, short = 'a')]
    pub agent: Option<PathBuf>,

    /// Self-play episodes used to train the agent when no snapshot is given
    #[arg(long, default_value_t = 20_000)]
    pub train_episodes: usize,

    /// Number of games to play
    #[arg(long, short = 'g', default_value_t = 1)]
    pub games: usize,

    /// Exploration rate ε of the agent during play
    #[arg(long, default_value_t = 0.0)]
    pub exploration_rate: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Tally of games played against a human
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayTally {
    pub human_wins: usize,
    pub agent_wins: usize,
    pub draws: usize,
}

impl PlayTally {
    pub fn games(&self) -> usize {
        self.human_wins + self.agent_wins + self.draws
    }
}

/// Play up to `games` games between `agent` and `human`.
///
/// X opens even-numbered games and O odd-numbered ones. The final board of
/// each game is rendered to `out`. Play stops early, without error, when the
/// human's input closes. The agent keeps learning from these games.
pub fn play_games<R: BufRead, W: Write, O: Write>(
    agent: &mut TdAgent,
    human: &mut HumanPlayer<R, W>,
    games: usize,
    rng: &mut StdRng,
    out: &mut O,
) -> Result<PlayTally> {
    let human_symbol = human.symbol();
    if agent.symbol() == human_symbol {
        return Err(anyhow!(
            "Agent and human both play {human_symbol}; pick the other symbol"
        ));
    }

    let mut env = Environment::new();
    let mut tally = PlayTally::default();
    for game in 0..games {
        let agent_opens = match agent.symbol() {
            Player::X => game.is_multiple_of(2),
            Player::O => !game.is_multiple_of(2),
        };
        let players: [&mut dyn Learner; 2] = if agent_opens {
            [&mut *agent, &mut *human]
        } else {
            [&mut *human, &mut *agent]
        };

        let record: EpisodeRecord = match play_episode(&mut env, players, rng, game, &mut []) {
            Ok(record) => record,
            Err(Error::InputClosed) => {
                log::info!("input closed after {} games", tally.games());
                writeln!(out, "\nInput closed, stopping.")?;
                break;
            }
            Err(e) => return Err(e).context("Game aborted"),
        };

        writeln!(out, "\n{}", render_with_indices(&record.final_state))?;
        match record.outcome {
            GameOutcome::Win(winner) if winner == human_symbol => {
                tally.human_wins += 1;
                writeln!(out, "You win!")?;
            }
            GameOutcome::Win(_) => {
                tally.agent_wins += 1;
                writeln!(out, "The agent wins.")?;
            }
            GameOutcome::Draw => {
                tally.draws += 1;
                writeln!(out, "Draw.")?;
            }
        }
    }

    Ok(tally)
}

fn prepare_agent(args: &PlayArgs, agent_symbol: Player, rng_seed: Option<u64>) -> Result<TdAgent> {
    let mut agent = match &args.agent {
        Some(path) => {
            let agent = SavedAgent::load_from_file(path)?.to_agent()?;
            if agent.symbol() != agent_symbol {
                return Err(anyhow!(
                    "Snapshot {} plays {}, but the agent must play {agent_symbol}",
                    path.display(),
                    agent.symbol()
                ));
            }
            agent
        }
        None => {
            println!("Training agent for {} self-play episodes...", args.train_episodes);
            let config = TrainingConfig {
                episodes: args.train_episodes,
                seed: rng_seed,
                ..TrainingConfig::default()
            };
            let mut session = TrainingSession::new(config)?;
            session.run()?;
            let (agent_x, agent_o) = session.into_agents();
            match agent_symbol {
                Player::X => agent_x,
                Player::O => agent_o,
            }
        }
    };

    agent.set_exploration_rate(args.exploration_rate)?;
    Ok(agent)
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let human_symbol: Player = args
        .human
        .parse()
        .with_context(|| format!("Invalid value '{}' for --human (expected 'x' or 'o')", args.human))?;
    let agent_symbol = human_symbol.opponent();

    let mut agent = prepare_agent(&args, agent_symbol, args.seed)?;
    let mut rng = build_rng(args.seed.map(|seed| seed.wrapping_add(1)));

    print_section("Tic-Tac-Toe vs. TD(0)");
    print_kv("You play", &human_symbol.to_string());
    print_kv("Agent plays", &agent_symbol.to_string());
    print_kv("Agent ε", &agent.config().exploration_rate.to_string());

    let stdin = io::stdin();
    let mut human = HumanPlayer::new(human_symbol, stdin.lock(), io::stdout());
    let tally = play_games(&mut agent, &mut human, args.games, &mut rng, &mut io::stdout())?;

    println!();
    print_kv("You", &tally.human_wins.to_string());
    print_kv("Agent", &tally.agent_wins.to_string());
    print_kv("Draws", &tally.draws.to_string());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rand::SeedableRng;

    use super::*;
    use crate::tictactoe::BoardState;

    /// Greedy X agent that opens in cell 0 and follows up in cell 1 after O takes 3
    fn top_row_agent() -> TdAgent {
        let mut agent = TdAgent::new(Player::X, 0.0, 0.5).unwrap();
        for (board, value) in [("X--------", 0.9), ("XX-O-----", 0.8)] {
            agent
                .values_mut()
                .set(BoardState::from_string(board).unwrap(), value);
        }
        agent
    }

    #[test]
    fn test_human_loses_single_game() {
        let mut agent = top_row_agent();
        // Agent opens game 0; human answers 3 and 4, agent completes the row
        let mut human = HumanPlayer::new(Player::O, Cursor::new("3\n4\n"), Vec::new());
        let mut out = Vec::new();
        let mut rng = StdRng::seed_from_u64(3);

        let tally = play_games(&mut agent, &mut human, 1, &mut rng, &mut out).unwrap();
        assert_eq!(
            tally,
            PlayTally {
                human_wins: 0,
                agent_wins: 1,
                draws: 0
            }
        );
        let rendered = String::from_utf8(out).unwrap();
        assert!(rendered.contains(" X | X | X"));
        assert!(rendered.contains("The agent wins."));
    }

    #[test]
    fn test_closed_input_stops_play() {
        let mut agent = top_row_agent();
        let mut human = HumanPlayer::new(Player::O, Cursor::new(""), Vec::new());
        let mut out = Vec::new();
        let mut rng = StdRng::seed_from_u64(3);

        let tally = play_games(&mut agent, &mut human, 3, &mut rng, &mut out).unwrap();
        assert_eq!(tally.games(), 0);
        assert!(String::from_utf8(out).unwrap().contains("Input closed"));
    }

    #[test]
    fn test_same_symbol_is_rejected() {
        let mut agent = top_row_agent();
        let mut human = HumanPlayer::new(Player::X, Cursor::new("0\n"), Vec::new());
        let mut rng = StdRng::seed_from_u64(3);
        assert!(play_games(&mut agent, &mut human, 1, &mut rng, &mut Vec::new()).is_err());
    }
}
