//! Observer adapters for training sessions

use std::{cell::RefCell, rc::Rc};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    Result,
    ports::Observer,
    tictactoe::{BoardState, GameOutcome, Move, Player},
};

/// Lets a caller keep a handle on an observer after boxing it into a session
impl<T: Observer> Observer for Rc<RefCell<T>> {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        self.borrow_mut().on_training_start(total_episodes)
    }

    fn on_episode_start(&mut self, episode: usize) -> Result<()> {
        self.borrow_mut().on_episode_start(episode)
    }

    fn on_move(&mut self, episode: usize, step: usize, mv: Move, state: &BoardState) -> Result<()> {
        self.borrow_mut().on_move(episode, step, mv, state)
    }

    fn on_episode_end(&mut self, episode: usize, outcome: GameOutcome, moves: usize) -> Result<()> {
        self.borrow_mut().on_episode_end(episode, outcome, moves)
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.borrow_mut().on_training_end()
    }

    fn draws_progress(&self) -> bool {
        self.borrow().draws_progress()
    }
}

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    x_wins: usize,
    o_wins: usize,
    draws: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            x_wins: 0,
            o_wins: 0,
            draws: 0,
        }
    }

    fn message(&self) -> String {
        format!("X:{} O:{} D:{}", self.x_wins, self.o_wins, self.draws)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, _episode: usize, outcome: GameOutcome, _moves: usize) -> Result<()> {
        match outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.inc(1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = self.progress_bar.take() {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }

    fn draws_progress(&self) -> bool {
        true
    }
}

/// Metrics observer - Tracks outcome counts and episode lengths
#[derive(Debug, Clone, Default)]
pub struct MetricsObserver {
    x_wins: usize,
    o_wins: usize,
    draws: usize,
    total_episodes: usize,
    total_moves: usize,
    /// Draw rate over each completed window of `window` episodes
    draw_rate_history: Vec<f64>,
    window: usize,
    window_draws: usize,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the draw rate every `window` episodes
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    pub fn wins(&self, player: Player) -> usize {
        match player {
            Player::X => self.x_wins,
            Player::O => self.o_wins,
        }
    }

    pub fn draws(&self) -> usize {
        self.draws
    }

    /// Fraction of episodes ending in a draw
    pub fn draw_rate(&self) -> f64 {
        if self.total_episodes == 0 {
            0.0
        } else {
            self.draws as f64 / self.total_episodes as f64
        }
    }

    /// Mean number of moves per episode
    pub fn average_moves(&self) -> f64 {
        if self.total_episodes == 0 {
            0.0
        } else {
            self.total_moves as f64 / self.total_episodes as f64
        }
    }

    pub fn draw_rate_history(&self) -> &[f64] {
        &self.draw_rate_history
    }
}

impl Observer for MetricsObserver {
    fn on_episode_end(&mut self, _episode: usize, outcome: GameOutcome, moves: usize) -> Result<()> {
        match outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Draw => {
                self.draws += 1;
                self.window_draws += 1;
            }
        }
        self.total_episodes += 1;
        self.total_moves += moves;

        if self.window > 0 && self.total_episodes.is_multiple_of(self.window) {
            self.draw_rate_history
                .push(self.window_draws as f64 / self.window as f64);
            self.window_draws = 0;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_observer_counts() {
        let mut metrics = MetricsObserver::new().with_window(2);
        metrics.on_episode_end(0, GameOutcome::Win(Player::X), 5).unwrap();
        metrics.on_episode_end(1, GameOutcome::Draw, 9).unwrap();
        metrics.on_episode_end(2, GameOutcome::Draw, 9).unwrap();
        metrics.on_episode_end(3, GameOutcome::Draw, 9).unwrap();

        assert_eq!(metrics.total_episodes(), 4);
        assert_eq!(metrics.wins(Player::X), 1);
        assert_eq!(metrics.wins(Player::O), 0);
        assert_eq!(metrics.draws(), 3);
        assert_eq!(metrics.draw_rate(), 0.75);
        assert_eq!(metrics.average_moves(), 8.0);
        assert_eq!(metrics.draw_rate_history(), &[0.5, 1.0]);
    }

    #[test]
    fn test_shared_observer_forwards() {
        let shared = Rc::new(RefCell::new(MetricsObserver::new()));
        let mut boxed: Box<dyn Observer> = Box::new(Rc::clone(&shared));
        boxed.on_episode_end(0, GameOutcome::Win(Player::O), 6).unwrap();
        assert_eq!(shared.borrow().wins(Player::O), 1);
    }

    #[test]
    fn test_only_progress_bar_draws_progress() {
        assert!(ProgressObserver::new().draws_progress());
        assert!(!MetricsObserver::new().draws_progress());
        assert!(Rc::new(RefCell::new(ProgressObserver::new())).draws_progress());
    }

    #[test]
    fn test_empty_metrics() {
        let metrics = MetricsObserver::new();
        assert_eq!(metrics.draw_rate(), 0.0);
        assert_eq!(metrics.average_moves(), 0.0);
        assert!(metrics.draw_rate_history().is_empty());
    }
}
