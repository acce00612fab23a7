//! Single-episode driver shared by training and interactive play

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::{Learner, Observer},
    tictactoe::{BoardState, Environment, GameOutcome, Move},
};

/// What happened in one finished episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub outcome: GameOutcome,
    pub moves: Vec<Move>,
    pub final_state: BoardState,
}

/// Play one episode from an empty board to a terminal one.
///
/// `players[0]` moves first. After every move both players observe the
/// resulting board; once the board is terminal both learn, observers are
/// told the outcome and the environment is reset.
///
/// # Errors
///
/// Fails if both players carry the same symbol, if a player cannot produce
/// a move, if the move is illegal, or if learning fails. On any failure
/// after the board was reset, both players discard what they recorded for
/// this episode.
pub fn play_episode(
    env: &mut Environment,
    mut players: [&mut dyn Learner; 2],
    rng: &mut StdRng,
    episode: usize,
    observers: &mut [Box<dyn Observer>],
) -> Result<EpisodeRecord> {
    if players[0].symbol() == players[1].symbol() {
        return Err(Error::InvalidConfiguration {
            message: format!(
                "{} and {} both play {}",
                players[0].name(),
                players[1].name(),
                players[0].symbol()
            ),
        });
    }

    let result = run_episode(env, &mut players, rng, episode, observers);
    if let Err(e) = &result {
        log::debug!("episode {episode} aborted: {e}");
        for player in players.iter_mut() {
            player.discard_episode();
        }
    }
    result
}

fn run_episode(
    env: &mut Environment,
    players: &mut [&mut dyn Learner; 2],
    rng: &mut StdRng,
    episode: usize,
    observers: &mut [Box<dyn Observer>],
) -> Result<EpisodeRecord> {
    env.reset();
    for observer in observers.iter_mut() {
        observer.on_episode_start(episode)?;
    }

    let mut step = 0;
    while !env.is_game_over() {
        let mover = &mut players[step % 2];
        let symbol = mover.symbol();
        let cell = mover.select_move(env.state(), rng)?;
        let state = env.apply_move(symbol, cell)?;

        for player in players.iter_mut() {
            player.observe(&state);
        }

        let mv = Move {
            position: cell,
            player: symbol,
        };
        for observer in observers.iter_mut() {
            observer.on_move(episode, step, mv, &state)?;
        }
        step += 1;
    }

    let outcome = env.outcome().ok_or(Error::NoValidMoves)?;
    for player in players.iter_mut() {
        player.learn()?;
    }

    log::debug!("episode {episode}: {outcome} after {step} moves");
    for observer in observers.iter_mut() {
        observer.on_episode_end(episode, outcome, step)?;
    }

    let record = EpisodeRecord {
        outcome,
        moves: env.history().to_vec(),
        final_state: *env.state(),
    };
    env.reset();
    Ok(record)
}
